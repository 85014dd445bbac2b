// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashcast::repo::accounts;
use cashcast::repo::transactions::{self, Filter};
use cashcast::{cli, commands::importer, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    accounts::add(&conn, "A1", "checking", "USD", Decimal::ZERO).unwrap();
    conn
}

fn import(conn: &mut Connection, path: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["cashcast", "import", "transactions", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn csv_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file.flush().unwrap();
    file
}

fn count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn importer_trims_cli_path_argument() {
    let mut conn = base_conn();
    let file = csv_file("date,description,amount,category,account\n2025-02-03,Shop,-5.00,,A1\n");
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    import(&mut conn, &padded).unwrap();
    assert_eq!(count(&conn), 1);
}

#[test]
fn blank_category_and_account_are_optional() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,description,amount,category,account\n\
         2025-02-03, Salary ,2500,Income,\n\
         2025-02-04,Market,-42.10,Groceries,A1\n",
    );
    import(&mut conn, file.path().to_str().unwrap()).unwrap();

    let rows = transactions::list(&conn, &Filter::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Market");
    assert_eq!(rows[0].account.as_deref(), Some("A1"));
    assert_eq!(rows[1].description, "Salary");
    assert!(rows[1].account.is_none());
    assert_eq!(rows[1].category.as_deref(), Some("Income"));
}

#[test]
fn bad_row_rolls_back_whole_file() {
    let mut conn = base_conn();
    let file = csv_file(
        "date,description,amount,category,account\n\
         2025-02-03,Shop,-5.00,,A1\n\
         2025-02-30,Broken,-1,,A1\n",
    );
    let err = import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Row 3"));
    assert_eq!(count(&conn), 0);
}

#[test]
fn unknown_account_names_the_row() {
    let mut conn = base_conn();
    let file = csv_file("date,description,amount,category,account\n2025-02-03,Shop,-5,,Savings\n");
    let err = import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Savings"));
}
