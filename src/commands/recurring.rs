// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Frequency, RecurringTransaction};
use crate::repo::recurring;
use crate::utils::{arg, fmt_money, maybe_print_json, opt_arg, parse_date, parse_decimal, pretty_table};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("deactivate", sub)) => {
            let id = id(sub)?;
            if !recurring::deactivate(conn, id)? {
                return Err(anyhow!("Recurring transaction {} not found", id));
            }
            println!("Deactivated recurring transaction {}", id);
        }
        Some(("rm", sub)) => {
            let id = id(sub)?;
            if !recurring::remove(conn, id)? {
                return Err(anyhow!("Recurring transaction {} not found", id));
            }
            println!("Removed recurring transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn id(sub: &clap::ArgMatches) -> Result<i64> {
    sub.get_one::<i64>("id").copied().context("Missing --id")
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let rt = RecurringTransaction {
        amount: parse_decimal(arg(sub, "amount")?)?,
        category: arg(sub, "category")?.to_string(),
        frequency: Frequency::parse(arg(sub, "frequency")?),
        next_date: parse_date(arg(sub, "next-date")?)?,
    };
    let id = recurring::add(conn, &rt, opt_arg(sub, "description"))?;
    info!(id, frequency = %rt.frequency, "recurring transaction added");
    println!(
        "Added recurring #{}: {} {} {} from {}",
        id,
        fmt_money(&rt.amount),
        rt.category,
        rt.frequency,
        rt.next_date
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = recurring::list(conn, sub.get_flag("all"))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.transaction.next_date.to_string(),
                    r.transaction.frequency.to_string(),
                    fmt_money(&r.transaction.amount),
                    r.transaction.category,
                    r.description.unwrap_or_default(),
                    if r.active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Next", "Frequency", "Amount", "Category", "Description", "Active"],
                rows,
            )
        );
    }
    Ok(())
}
