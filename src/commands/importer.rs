// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::transactions::{self, NewTransaction};
use crate::utils::{arg, parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::{params, Connection};
use std::collections::{hash_map::Entry, HashMap};
use tracing::info;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Columns: date, description, amount, category, account. Category and
/// account may be blank. The whole file is imported in one transaction.
fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = arg(sub, "path")?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut account_cache: HashMap<String, i64> = HashMap::new();
    let mut imported = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let description = rec.get(1).context("description missing")?.trim();
        let amount_raw = rec.get(2).context("amount missing")?.trim();
        let category = rec.get(3).map(str::trim).filter(|s| !s.is_empty());
        let account = rec.get(4).map(str::trim).filter(|s| !s.is_empty());

        let date = parse_date(date_raw).with_context(|| format!("Row {}", row))?;
        let amount = parse_decimal(amount_raw)
            .with_context(|| format!("Row {}: invalid amount for {}", row, description))?;

        let account_id = match account {
            None => None,
            Some(name) => Some(match account_cache.entry(name.to_string()) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let id: i64 = tx
                        .query_row(
                            "SELECT id FROM accounts WHERE name=?1",
                            params![name],
                            |r| r.get(0),
                        )
                        .with_context(|| format!("Row {}: account '{}' not found", row, name))?;
                    *entry.insert(id)
                }
            }),
        };

        transactions::add(
            &tx,
            &NewTransaction {
                date,
                account_id,
                amount,
                category,
                description,
            },
        )?;
        imported += 1;
    }
    tx.commit()?;
    info!(imported, path, "csv import finished");
    println!("Imported {} transactions from {}", imported, path);
    Ok(())
}
