// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Goal;
use crate::repo::goals;
use crate::utils::{arg, fmt_money, maybe_print_json, opt_arg, opt_date, parse_decimal, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress_percent: Decimal,
    pub monthly_contribution: Option<Decimal>,
}

impl GoalProgress {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        Self {
            progress_percent: goal.progress_percent(),
            monthly_contribution: goal.monthly_contribution(today),
            goal,
        }
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            let target = parse_decimal(arg(sub, "target")?)?;
            let date = opt_date(sub, "date")?;
            let id = goals::add(conn, name, target, date, opt_arg(sub, "category"))?;
            info!(id, name, "goal added");
            println!("Added goal '{}' for {}", name, fmt_money(&target));
        }
        Some(("contribute", sub)) => {
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let goal = goals::contribute(conn, arg(sub, "name")?, amount)?;
            println!(
                "'{}' now at {} of {} ({}%)",
                goal.name,
                fmt_money(&goal.current_amount),
                fmt_money(&goal.target_amount),
                goal.progress_percent()
            );
        }
        Some(("list", sub)) => {
            let now = today();
            let data: Vec<GoalProgress> = goals::list(conn)?
                .into_iter()
                .map(|g| GoalProgress::new(g, now))
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|p| {
                        vec![
                            p.goal.name,
                            fmt_money(&p.goal.current_amount),
                            fmt_money(&p.goal.target_amount),
                            format!("{}%", p.progress_percent),
                            p.goal
                                .target_date
                                .map(|d| d.to_string())
                                .unwrap_or_default(),
                            p.monthly_contribution
                                .map(|c| fmt_money(&c))
                                .unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Goal", "Saved", "Target", "Progress", "By", "Per month"],
                        rows
                    )
                );
            }
        }
        _ => {}
    }
    Ok(())
}
