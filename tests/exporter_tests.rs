// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashcast::models::{Frequency, RecurringTransaction};
use cashcast::repo::recurring;
use cashcast::{cli, commands::exporter, db};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["cashcast", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_schedule_as_json() {
    let conn = conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("schedule.json");
    let out_str = out.to_string_lossy().to_string();
    export(
        &conn,
        &[
            "schedule", "--principal", "1200", "--rate", "12", "--term", "12", "--start",
            "2024-01-01", "--format", "json", "--out", &out_str,
        ],
    )
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let entries = parsed["schedule"].as_array().unwrap();
    assert_eq!(entries.len(), 12);
    assert_eq!(entries[0]["payment_date"], "2024-01-01");
    assert_eq!(entries[11]["payment_number"], 12);
}

#[test]
fn export_schedule_as_csv_rounds_to_cents() {
    let conn = conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("schedule.csv");
    let out_str = out.to_string_lossy().to_string();
    export(
        &conn,
        &[
            "schedule", "--principal", "1200", "--rate", "12", "--term", "12", "--start",
            "2024-01-01", "--out", &out_str,
        ],
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "payment_number");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 12);
    assert_eq!(&rows[0][2], "106.62");
    assert_eq!(&rows[0][4], "12.00");
}

#[test]
fn export_forecast_uses_active_recurring() {
    let conn = conn();
    recurring::add(
        &conn,
        &RecurringTransaction {
            amount: Decimal::from(-75),
            category: "gym".into(),
            frequency: Frequency::Weekly,
            next_date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        },
        None,
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out = dir.path().join("forecast.csv");
    let out_str = out.to_string_lossy().to_string();
    export(
        &conn,
        &["forecast", "--days", "14", "--start", "2024-03-01", "--out", &out_str],
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 14);
    assert_eq!(&rows[1][0], "2024-03-02");
    assert_eq!(&rows[1][2], "75");
    assert_eq!(&rows[1][5], "gym");
    assert_eq!(&rows[13][4], "-150");
}
