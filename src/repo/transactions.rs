// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::stored_decimal;
use crate::models::Transaction;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, ToSql};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewTransaction<'a> {
    pub date: NaiveDate,
    pub account_id: Option<i64>,
    pub amount: Decimal,
    pub category: Option<&'a str>,
    pub description: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub month: Option<String>, // YYYY-MM
    pub account: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

pub fn add(conn: &Connection, tx: &NewTransaction<'_>) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(date, account_id, amount, category, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            tx.date,
            tx.account_id,
            tx.amount.to_string(),
            tx.category,
            tx.description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Newest first. Filters become bound parameters.
pub fn list(conn: &Connection, filter: &Filter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, a.name, t.amount, t.category, t.description
         FROM transactions t LEFT JOIN accounts a ON t.account_id=a.id WHERE 1=1",
    );
    let mut binds: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(month) = &filter.month {
        sql.push_str(" AND substr(t.date,1,7)=?");
        binds.push(Box::new(month.clone()));
    }
    if let Some(account) = &filter.account {
        sql.push_str(" AND a.name=?");
        binds.push(Box::new(account.clone()));
    }
    if let Some(category) = &filter.category {
        sql.push_str(" AND t.category=?");
        binds.push(Box::new(category.clone()));
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        binds.push(Box::new(limit as i64));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(binds.iter().map(|b| b.as_ref())))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(3)?;
        out.push(Transaction {
            id: r.get(0)?,
            date: r.get(1)?,
            account: r.get(2)?,
            amount: stored_decimal(&amount, "transaction amount")?,
            category: r.get(4)?,
            description: r.get(5)?,
        });
    }
    Ok(out)
}

/// `(date, amount)` for every transaction in `[from, to]`.
pub fn amounts_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<(NaiveDate, Decimal)>> {
    let mut stmt = conn.prepare(
        "SELECT date, amount FROM transactions WHERE date>=?1 AND date<=?2 ORDER BY date",
    )?;
    let rows = stmt.query_map(params![from, to], |r| {
        Ok((r.get::<_, NaiveDate>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (date, raw) = row?;
        out.push((date, stored_decimal(&raw, "transaction amount")?));
    }
    Ok(out)
}
