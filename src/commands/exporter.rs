// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{forecast::project, loans::terms_from};
use crate::utils::{arg, opt_date};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("schedule", sub)) => export_schedule(sub),
        Some(("forecast", sub)) => export_forecast(conn, sub),
        _ => Ok(()),
    }
}

fn write_rows<T: Serialize>(
    fmt: &str,
    out: &str,
    header: &[&str],
    rows: Vec<Vec<String>>,
    items: &T,
) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(header)?;
            for row in rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        "json" => std::fs::write(out, serde_json::to_string_pretty(items)?)?,
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}

fn export_schedule(sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.to_lowercase();
    let out = arg(sub, "out")?;
    let schedule = terms_from(sub)?.schedule()?;
    let rows = schedule
        .schedule
        .iter()
        .map(|e| {
            vec![
                e.payment_number.to_string(),
                e.payment_date.to_string(),
                e.payment_amount.round_dp(2).to_string(),
                e.principal_portion.round_dp(2).to_string(),
                e.interest_portion.round_dp(2).to_string(),
                e.remaining_balance.round_dp(2).to_string(),
            ]
        })
        .collect();
    write_rows(
        &fmt,
        out,
        &[
            "payment_number",
            "payment_date",
            "payment_amount",
            "principal_portion",
            "interest_portion",
            "remaining_balance",
        ],
        rows,
        &schedule,
    )?;
    info!(out, payments = schedule.schedule.len(), "schedule exported");
    println!("Exported schedule to {}", out);
    Ok(())
}

fn export_forecast(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.to_lowercase();
    let out = arg(sub, "out")?;
    let days = project(conn, sub.get_one::<u32>("days").copied(), opt_date(sub, "start")?)?;
    let rows = days
        .iter()
        .map(|d| {
            vec![
                d.date.to_string(),
                d.inflow.round_dp(2).to_string(),
                d.outflow.round_dp(2).to_string(),
                d.net().round_dp(2).to_string(),
                d.balance.round_dp(2).to_string(),
                d.transactions
                    .iter()
                    .map(|t| t.category.as_str())
                    .collect::<Vec<_>>()
                    .join(";"),
            ]
        })
        .collect();
    write_rows(
        &fmt,
        out,
        &["date", "inflow", "outflow", "net", "balance", "categories"],
        rows,
        &days,
    )?;
    info!(out, days = days.len(), "forecast exported");
    println!("Exported forecast to {}", out);
    Ok(())
}
