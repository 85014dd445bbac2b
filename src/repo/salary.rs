// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Salary journal: one row per change in pay, keyed by the date it applies.

use super::stored_decimal;
use crate::models::SalaryEntry;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;

pub struct NewSalaryEntry<'a> {
    pub company: &'a str,
    pub position: &'a str,
    pub salary_amount: Decimal,
    pub date_of_change: NaiveDate,
    pub bonus_amount: Decimal,
    pub commission_amount: Decimal,
    pub notes: Option<&'a str>,
}

pub fn add(conn: &Connection, e: &NewSalaryEntry<'_>) -> Result<i64> {
    for (what, v) in [
        ("Salary", e.salary_amount),
        ("Bonus", e.bonus_amount),
        ("Commission", e.commission_amount),
    ] {
        if v < Decimal::ZERO {
            return Err(anyhow!("{} must not be negative", what));
        }
    }
    conn.execute(
        "INSERT INTO salary_entries(company, position, salary_amount, date_of_change,
             bonus_amount, commission_amount, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            e.company,
            e.position,
            e.salary_amount.to_string(),
            e.date_of_change,
            e.bonus_amount.to_string(),
            e.commission_amount.to_string(),
            e.notes
        ],
    )
    .with_context(|| format!("Add salary entry for {}", e.company))?;
    Ok(conn.last_insert_rowid())
}

type SalaryRow = (
    i64,
    String,
    String,
    String,
    NaiveDate,
    String,
    String,
    Option<String>,
);

fn read_salary_row(r: &Row<'_>) -> rusqlite::Result<SalaryRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
    ))
}

fn to_entry(row: SalaryRow) -> Result<SalaryEntry> {
    let (id, company, position, salary, date_of_change, bonus, commission, notes) = row;
    Ok(SalaryEntry {
        id,
        company,
        position,
        salary_amount: stored_decimal(&salary, "salary")?,
        date_of_change,
        bonus_amount: stored_decimal(&bonus, "bonus")?,
        commission_amount: stored_decimal(&commission, "commission")?,
        notes,
    })
}

/// Newest change first.
pub fn list(conn: &Connection) -> Result<Vec<SalaryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, company, position, salary_amount, date_of_change,
                bonus_amount, commission_amount, notes
         FROM salary_entries ORDER BY date_of_change DESC, id DESC",
    )?;
    let rows = stmt.query_map([], read_salary_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(to_entry(row?)?);
    }
    Ok(out)
}

pub fn remove(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM salary_entries WHERE id=?1", params![id])?;
    Ok(n > 0)
}
