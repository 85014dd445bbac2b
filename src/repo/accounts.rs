// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::stored_decimal;
use crate::models::Account;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn add(
    conn: &Connection,
    name: &str,
    r#type: &str,
    currency: &str,
    opening_balance: Decimal,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO accounts(name, type, currency, opening_balance) VALUES (?1, ?2, ?3, ?4)",
        params![name, r#type, currency, opening_balance.to_string()],
    )
    .with_context(|| format!("Add account '{}'", name))?;
    Ok(conn.last_insert_rowid())
}

pub fn list(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, currency, opening_balance FROM accounts ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, r#type, currency, opening) = row?;
        out.push(Account {
            id,
            name,
            r#type,
            currency,
            opening_balance: stored_decimal(&opening, "opening balance")?,
        });
    }
    Ok(out)
}

pub fn remove(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM accounts WHERE name=?1", params![name])?;
    Ok(n > 0)
}

pub fn id_for_name(conn: &Connection, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM accounts WHERE name=?1",
        params![name],
        |r| r.get(0),
    )
    .with_context(|| format!("Account '{}' not found", name))
}

/// Opening balances plus every recorded transaction, across all accounts.
pub fn total_balance(conn: &Connection) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for account in list(conn)? {
        total += account.opening_balance;
    }
    let mut stmt = conn.prepare("SELECT amount FROM transactions")?;
    let mut rows = stmt.query([])?;
    while let Some(r) = rows.next()? {
        let raw: String = r.get(0)?;
        total += stored_decimal(&raw, "transaction amount")?;
    }
    Ok(total)
}
