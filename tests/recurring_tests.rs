// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashcast::models::Frequency;
use cashcast::repo::recurring;
use cashcast::{cli, commands, db};
use rusqlite::Connection;

fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["cashcast", "recurring"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("recurring", m)) => commands::recurring::handle(conn, m),
        _ => panic!("no recurring subcommand"),
    }
}

#[test]
fn add_accepts_loose_frequency_spellings() {
    let conn = conn();
    run(&conn, &["add", "--amount", "2500", "--category", "salary", "--frequency", "Bi-Weekly", "--next-date", "2024-05-03"]).unwrap();
    run(&conn, &["add", "--amount", "-99", "--category", "insurance", "--frequency", "yearly", "--next-date", "2024-09-01"]).unwrap();
    run(&conn, &["add", "--amount", "-10", "--category", "odd", "--frequency", "sometimes", "--next-date", "2024-06-01"]).unwrap();

    let all = recurring::active(&conn).unwrap();
    let freqs: Vec<Frequency> = all.iter().map(|r| r.frequency).collect();
    assert_eq!(freqs, vec![Frequency::Biweekly, Frequency::Annual, Frequency::Annual]);
}

#[test]
fn deactivated_entries_leave_the_forecast() {
    let conn = conn();
    run(&conn, &["add", "--amount", "-50", "--category", "gym", "--frequency", "monthly", "--next-date", "2024-05-01"]).unwrap();
    run(&conn, &["add", "--amount", "-15", "--category", "music", "--frequency", "monthly", "--next-date", "2024-05-02"]).unwrap();
    let gym = recurring::list(&conn, false).unwrap()[0].id;

    run(&conn, &["deactivate", "--id", &gym.to_string()]).unwrap();
    assert_eq!(recurring::active(&conn).unwrap().len(), 1);
    let everything = recurring::list(&conn, true).unwrap();
    assert_eq!(everything.len(), 2);
    assert!(!everything[0].active);

    run(&conn, &["rm", "--id", &gym.to_string()]).unwrap();
    assert_eq!(recurring::list(&conn, true).unwrap().len(), 1);
    assert!(run(&conn, &["rm", "--id", "999"]).is_err());
}
