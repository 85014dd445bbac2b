// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::stored_decimal;
use crate::models::Goal;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

pub fn add(
    conn: &Connection,
    name: &str,
    target_amount: Decimal,
    target_date: Option<NaiveDate>,
    category: Option<&str>,
) -> Result<i64> {
    if target_amount < Decimal::ZERO {
        return Err(anyhow!("Goal target must not be negative"));
    }
    conn.execute(
        "INSERT INTO goals(name, target_amount, target_date, category) VALUES (?1, ?2, ?3, ?4)",
        params![name, target_amount.to_string(), target_date, category],
    )
    .with_context(|| format!("Add goal '{}'", name))?;
    Ok(conn.last_insert_rowid())
}

type GoalRow = (i64, String, String, String, Option<NaiveDate>, Option<String>);

fn read_goal_row(r: &Row<'_>) -> rusqlite::Result<GoalRow> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?))
}

fn to_goal(row: GoalRow) -> Result<Goal> {
    let (id, name, target, current, target_date, category) = row;
    Ok(Goal {
        id,
        name,
        target_amount: stored_decimal(&target, "goal target")?,
        current_amount: stored_decimal(&current, "goal amount")?,
        target_date,
        category,
    })
}

pub fn get(conn: &Connection, name: &str) -> Result<Goal> {
    let row: Option<GoalRow> = conn
        .query_row(
            "SELECT id, name, target_amount, current_amount, target_date, category
             FROM goals WHERE name=?1",
            params![name],
            read_goal_row,
        )
        .optional()?;
    row.map(to_goal)
        .transpose()?
        .with_context(|| format!("Goal '{}' not found", name))
}

/// Ordered by target date, undated goals last.
pub fn list(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, current_amount, target_date, category
         FROM goals ORDER BY target_date IS NULL, target_date, name",
    )?;
    let rows = stmt.query_map([], read_goal_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(to_goal(row?)?);
    }
    Ok(out)
}

/// Add `amount` (may be negative for a withdrawal) to the goal's balance.
pub fn contribute(conn: &Connection, name: &str, amount: Decimal) -> Result<Goal> {
    let mut goal = get(conn, name)?;
    goal.current_amount += amount;
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE id=?2",
        params![goal.current_amount.to_string(), goal.id],
    )?;
    Ok(goal)
}
