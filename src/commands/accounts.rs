// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::accounts;
use crate::utils::{arg, fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            let typ = arg(sub, "type")?;
            let ccy = arg(sub, "currency")?.to_uppercase();
            let opening = parse_decimal(arg(sub, "opening")?)?;
            let id = accounts::add(conn, name, typ, &ccy, opening)?;
            info!(id, name, "account added");
            println!(
                "Added account '{}' ({}, {}, opening {})",
                name,
                typ,
                ccy,
                fmt_money(&opening)
            );
        }
        Some(("list", sub)) => {
            let data = accounts::list(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|a| vec![a.name, a.r#type, a.currency, fmt_money(&a.opening_balance)])
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Type", "Currency", "Opening"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let name = arg(sub, "name")?;
            if !accounts::remove(conn, name)? {
                return Err(anyhow!("Account '{}' not found", name));
            }
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
