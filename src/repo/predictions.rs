// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::stored_decimal;
use crate::models::DailyPrediction;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

/// Store one row per predicted day; re-running a forecast over the same
/// dates replaces the earlier rows.
pub fn save(conn: &mut Connection, days: &[DailyPrediction]) -> Result<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO cash_flow_predictions(prediction_date, predicted_amount, inflow, outflow)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(prediction_date) DO UPDATE SET
                 predicted_amount=excluded.predicted_amount,
                 inflow=excluded.inflow,
                 outflow=excluded.outflow,
                 created_at=datetime('now')",
        )?;
        for d in days {
            stmt.execute(params![
                d.date,
                d.net().to_string(),
                d.inflow.to_string(),
                d.outflow.to_string()
            ])?;
        }
    }
    tx.commit()?;
    Ok(days.len())
}

/// Net predicted amount per day in `[from, to]`.
pub fn between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<(NaiveDate, rust_decimal::Decimal)>> {
    let mut stmt = conn.prepare(
        "SELECT prediction_date, predicted_amount FROM cash_flow_predictions
         WHERE prediction_date>=?1 AND prediction_date<=?2
         ORDER BY prediction_date",
    )?;
    let rows = stmt.query_map(params![from, to], |r| {
        Ok((r.get::<_, NaiveDate>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (date, raw) = row?;
        out.push((date, stored_decimal(&raw, "predicted amount")?));
    }
    Ok(out)
}
