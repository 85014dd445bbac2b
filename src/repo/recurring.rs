// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::stored_decimal;
use crate::models::{Frequency, RecurringRecord, RecurringTransaction};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

pub fn add(
    conn: &Connection,
    rt: &RecurringTransaction,
    description: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO recurring_transactions(amount, category, frequency, next_date, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            rt.amount.to_string(),
            rt.category,
            rt.frequency.as_str(),
            rt.next_date,
            description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Ordered by next occurrence.
pub fn list(conn: &Connection, include_inactive: bool) -> Result<Vec<RecurringRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, amount, category, frequency, next_date, description, is_active
         FROM recurring_transactions
         WHERE is_active=1 OR ?1
         ORDER BY next_date, id",
    )?;
    let rows = stmt.query_map(params![include_inactive], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, NaiveDate>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, bool>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, amount, category, frequency, next_date, description, active) = row?;
        out.push(RecurringRecord {
            id,
            description,
            active,
            transaction: RecurringTransaction {
                amount: stored_decimal(&amount, "recurring amount")?,
                category,
                frequency: Frequency::parse(&frequency),
                next_date,
            },
        });
    }
    Ok(out)
}

/// The projection input: every active recurring transaction.
pub fn active(conn: &Connection) -> Result<Vec<RecurringTransaction>> {
    Ok(list(conn, false)?
        .into_iter()
        .map(|r| r.transaction)
        .collect())
}

pub fn deactivate(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute(
        "UPDATE recurring_transactions SET is_active=0 WHERE id=?1",
        params![id],
    )?;
    Ok(n > 0)
}

pub fn remove(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM recurring_transactions WHERE id=?1",
        params![id],
    )?;
    Ok(n > 0)
}
