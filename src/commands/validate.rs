// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::{predictions, transactions};
use crate::utils::{fmt_money, maybe_print_json, opt_date, pretty_table, today};
use crate::validation::{compare, group_by_date};
use anyhow::{Context, Result};
use chrono::Days;
use rusqlite::Connection;

/// Score saved predictions in the `days` ending at `end` (inclusive)
/// against recorded transactions over the same dates.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let days = m.get_one::<u32>("days").copied().unwrap_or(30).max(1);
    let end = opt_date(m, "end")?.unwrap_or_else(today);
    let from = end
        .checked_sub_days(Days::new(u64::from(days) - 1))
        .context("Validation window starts before the supported date range")?;

    let predicted = group_by_date(predictions::between(conn, from, end)?)?;
    let actual = group_by_date(transactions::amounts_between(conn, from, end)?)?;
    let metrics = compare(&predicted, &actual)
        .with_context(|| format!("Validate predictions {}..{}", from, end))?;

    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &metrics)? {
        let rows = vec![
            vec!["Window".into(), format!("{} .. {}", from, end)],
            vec!["Predictions".into(), metrics.total_predictions.to_string()],
            vec!["MAE".into(), fmt_money(&metrics.mean_absolute_error)],
            vec!["MSE".into(), fmt_money(&metrics.mean_squared_error)],
            vec!["RMSE".into(), fmt_money(&metrics.root_mean_squared_error)],
            vec![
                "Direction accuracy".into(),
                format!("{}%", fmt_money(&metrics.direction_accuracy)),
            ],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}
