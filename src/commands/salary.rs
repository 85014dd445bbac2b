// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SalarySummary;
use crate::repo::salary::{self, NewSalaryEntry};
use crate::utils::{arg, fmt_money, maybe_print_json, opt_arg, opt_date, parse_decimal, pretty_table, today};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let entry = NewSalaryEntry {
                company: arg(sub, "company")?,
                position: arg(sub, "position")?,
                salary_amount: parse_decimal(arg(sub, "amount")?)?,
                date_of_change: opt_date(sub, "date")?.unwrap_or_else(today),
                bonus_amount: parse_decimal(arg(sub, "bonus")?)?,
                commission_amount: parse_decimal(arg(sub, "commission")?)?,
                notes: opt_arg(sub, "notes"),
            };
            let id = salary::add(conn, &entry)?;
            info!(id, company = entry.company, "salary entry added");
            println!(
                "Recorded {} at {} from {}",
                fmt_money(&entry.salary_amount),
                entry.company,
                entry.date_of_change
            );
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<i64>("id").copied().context("Missing --id")?;
            if !salary::remove(conn, id)? {
                return Err(anyhow!("No salary entry with id {}", id));
            }
            println!("Removed salary entry {}", id);
        }
        Some(("list", sub)) => {
            let data = salary::list(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|e| {
                        vec![
                            e.id.to_string(),
                            e.date_of_change.to_string(),
                            e.company,
                            e.position,
                            fmt_money(&e.salary_amount),
                            fmt_money(&e.bonus_amount),
                            fmt_money(&e.commission_amount),
                            e.notes.unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "From", "Company", "Position", "Salary", "Bonus", "Commission", "Notes"],
                        rows
                    )
                );
            }
        }
        Some(("summary", sub)) => {
            let as_of = opt_date(sub, "as-of")?.unwrap_or_else(today);
            let months = sub.get_one::<u32>("months").copied().unwrap_or(6);
            let summary = SalarySummary::compute(&salary::list(conn)?, as_of, months)
                .context("Summarize salary")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
                let current = summary
                    .current
                    .as_ref()
                    .map(|e| format!("{} at {}", e.position, e.company))
                    .unwrap_or_else(|| "-".into());
                let rows = vec![
                    vec!["As of".into(), summary.as_of.to_string()],
                    vec!["Current".into(), current],
                    vec![
                        "Months with salary".into(),
                        format!("{} of {}", summary.months_covered, summary.months),
                    ],
                    vec![
                        "Average monthly income".into(),
                        fmt_money(&summary.average_monthly_income),
                    ],
                ];
                println!("{}", pretty_table(&["Salary", "Value"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
