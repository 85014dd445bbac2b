// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forecast::MAX_TIMEFRAME_DAYS;
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub const FORECAST_DAYS: &str = "forecast_days";
pub const LARGE_EXPENSE_THRESHOLD: &str = "large_expense_threshold";
pub const STOCK_MAX_AGE_HOURS: &str = "stock_max_age_hours";

/// Known keys and their defaults.
pub const DEFAULTS: &[(&str, &str)] = &[
    (FORECAST_DAYS, "30"),
    (LARGE_EXPENSE_THRESHOLD, "200"),
    (STOCK_MAX_AGE_HOURS, "24"),
];

fn default_for(key: &str) -> Result<&'static str> {
    DEFAULTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| anyhow!("Unknown setting '{}'", key))
}

fn check_value(key: &str, value: &str) -> Result<()> {
    match key {
        FORECAST_DAYS => {
            let days: u32 = value
                .parse()
                .with_context(|| format!("{} must be a whole number", key))?;
            if days == 0 || days > MAX_TIMEFRAME_DAYS {
                return Err(anyhow!(
                    "{} must be between 1 and {}",
                    key,
                    MAX_TIMEFRAME_DAYS
                ));
            }
        }
        LARGE_EXPENSE_THRESHOLD => {
            let v: Decimal = value
                .parse()
                .with_context(|| format!("{} must be a decimal", key))?;
            if v < Decimal::ZERO {
                return Err(anyhow!("{} must not be negative", key));
            }
        }
        STOCK_MAX_AGE_HOURS => {
            value
                .parse::<u32>()
                .with_context(|| format!("{} must be a whole number of hours", key))?;
        }
        _ => return Err(anyhow!("Unknown setting '{}'", key)),
    }
    Ok(())
}

pub fn get(conn: &Connection, key: &str) -> Result<String> {
    let default = default_for(key)?;
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| default.to_string()))
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    check_value(key, value)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Every known key with its effective value.
pub fn list(conn: &Connection) -> Result<Vec<(String, String)>> {
    DEFAULTS
        .iter()
        .map(|(k, _)| Ok((k.to_string(), get(conn, k)?)))
        .collect()
}

pub fn forecast_days(conn: &Connection) -> Result<u32> {
    let v = get(conn, FORECAST_DAYS)?;
    v.parse()
        .with_context(|| format!("Invalid {} '{}'", FORECAST_DAYS, v))
}

pub fn large_expense_threshold(conn: &Connection) -> Result<Decimal> {
    let v = get(conn, LARGE_EXPENSE_THRESHOLD)?;
    v.parse()
        .with_context(|| format!("Invalid {} '{}'", LARGE_EXPENSE_THRESHOLD, v))
}

pub fn stock_max_age_hours(conn: &Connection) -> Result<u32> {
    let v = get(conn, STOCK_MAX_AGE_HOURS)?;
    v.parse()
        .with_context(|| format!("Invalid {} '{}'", STOCK_MAX_AGE_HOURS, v))
}
