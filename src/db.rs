// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.cashcast", "Cashcast", "cashcast"));

pub const DB_ENV: &str = "CASHCAST_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("cashcast.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL,
        currency TEXT NOT NULL,
        opening_balance TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        account_id INTEGER,
        amount TEXT NOT NULL,
        category TEXT,
        description TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS recurring_transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        frequency TEXT NOT NULL,
        next_date TEXT NOT NULL,
        description TEXT,
        is_active INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS loans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        principal TEXT NOT NULL,
        interest_rate TEXT NOT NULL,
        term_months INTEGER NOT NULL,
        start_date TEXT NOT NULL,
        payment_amount TEXT NOT NULL,
        next_payment_date TEXT NOT NULL,
        remaining_payments INTEGER NOT NULL
    );

    -- scheduled rows are written on loan creation, recorded rows on payment
    CREATE TABLE IF NOT EXISTS loan_payments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        loan_id INTEGER NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('scheduled','recorded')),
        payment_date TEXT NOT NULL,
        payment_amount TEXT NOT NULL,
        principal_portion TEXT NOT NULL,
        interest_portion TEXT NOT NULL,
        extra_payment TEXT NOT NULL DEFAULT '0',
        remaining_balance TEXT NOT NULL,
        FOREIGN KEY(loan_id) REFERENCES loans(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_loan_payments_loan ON loan_payments(loan_id, kind, payment_date);

    CREATE TABLE IF NOT EXISTS cash_flow_predictions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        prediction_date TEXT NOT NULL,
        predicted_amount TEXT NOT NULL,
        inflow TEXT NOT NULL,
        outflow TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(prediction_date)
    );

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0',
        target_date TEXT,
        category TEXT
    );

    CREATE TABLE IF NOT EXISTS holdings(
        symbol TEXT PRIMARY KEY,
        shares TEXT NOT NULL,
        cost_basis TEXT NOT NULL DEFAULT '0'
    );

    CREATE TABLE IF NOT EXISTS stock_prices(
        symbol TEXT PRIMARY KEY,
        price TEXT NOT NULL,
        fetched_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS salary_entries(
        id INTEGER PRIMARY KEY,
        company TEXT NOT NULL,
        position TEXT NOT NULL,
        salary_amount TEXT NOT NULL,
        date_of_change TEXT NOT NULL,
        bonus_amount TEXT NOT NULL DEFAULT '0',
        commission_amount TEXT NOT NULL DEFAULT '0',
        notes TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_salary_entries_date ON salary_entries(date_of_change);
    "#,
    )?;
    Ok(())
}
