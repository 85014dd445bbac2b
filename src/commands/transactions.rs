// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::accounts;
use crate::repo::transactions::{self, Filter, NewTransaction};
use crate::utils::{arg, fmt_money, maybe_print_json, opt_arg, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(arg(sub, "date")?)?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let description = arg(sub, "description")?;
    let account = opt_arg(sub, "account");
    let account_id = account
        .map(|name| accounts::id_for_name(conn, name))
        .transpose()?;

    let id = transactions::add(
        conn,
        &NewTransaction {
            date,
            account_id,
            amount,
            category: opt_arg(sub, "category"),
            description,
        },
    )?;
    info!(id, %date, %amount, "transaction recorded");
    println!(
        "Recorded {} on {} at '{}'{}",
        fmt_money(&amount),
        date,
        description,
        account.map(|a| format!(" (acct: {})", a)).unwrap_or_default()
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let filter = Filter {
        month: opt_arg(sub, "month").map(str::to_string),
        account: opt_arg(sub, "account").map(str::to_string),
        category: opt_arg(sub, "category").map(str::to_string),
        limit: sub.get_one::<usize>("limit").copied(),
    };
    let data = transactions::list(conn, &filter)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .into_iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.account.unwrap_or_default(),
                    t.description,
                    fmt_money(&t.amount),
                    t.category.unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Account", "Description", "Amount", "Category"], rows)
        );
    }
    Ok(())
}
