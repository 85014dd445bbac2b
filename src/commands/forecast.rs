// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forecast::{alerts, build_cash_flow_prediction, monthly_summary, total, weekly_summary};
use crate::models::{CashFlowAlert, DailyPrediction, PeriodSummary};
use crate::repo::{accounts, predictions, recurring, settings};
use crate::utils::{fmt_money, maybe_print_json, opt_date, opt_decimal, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct ForecastReport {
    pub days: Vec<DailyPrediction>,
    pub weekly: Vec<PeriodSummary>,
    pub monthly: Vec<PeriodSummary>,
    pub total: Option<PeriodSummary>,
    pub alerts: Vec<CashFlowAlert>,
}

/// Daily predictions over the active recurring set. `days` falls back to
/// the `forecast_days` setting and `start` to today.
pub fn project(
    conn: &Connection,
    days: Option<u32>,
    start: Option<chrono::NaiveDate>,
) -> Result<Vec<DailyPrediction>> {
    let days = match days {
        Some(d) => d,
        None => settings::forecast_days(conn)?,
    };
    let start = start.unwrap_or_else(today);
    let active = recurring::active(conn)?;
    Ok(build_cash_flow_prediction(&active, days, start)?)
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let days = project(conn, m.get_one::<u32>("days").copied(), opt_date(m, "start")?)?;
    let opening = match opt_decimal(m, "opening")? {
        Some(v) => v,
        None => accounts::total_balance(conn)?,
    };
    let threshold = settings::large_expense_threshold(conn)?;

    if m.get_flag("save") {
        let saved = predictions::save(conn, &days)?;
        info!(saved, "predictions saved");
        eprintln!("Saved {} daily predictions", saved);
    }

    let report = ForecastReport {
        weekly: weekly_summary(&days)?,
        monthly: monthly_summary(&days)?,
        total: total(&days)?,
        alerts: alerts(&days, opening, threshold)?,
        days,
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let view = m.get_one::<String>("view").map(String::as_str).unwrap_or("daily");
    match view {
        "weekly" => println!("{}", summary_table(&report.weekly)),
        "monthly" => println!("{}", summary_table(&report.monthly)),
        _ => {
            let rows = report
                .days
                .iter()
                .map(|d| {
                    vec![
                        d.date.to_string(),
                        fmt_money(&d.inflow),
                        fmt_money(&d.outflow),
                        fmt_money(&d.net()),
                        fmt_money(&d.balance),
                        d.transactions
                            .iter()
                            .map(|t| t.category.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    &["Date", "Inflow", "Outflow", "Net", "Balance", "Categories"],
                    rows
                )
            );
        }
    }
    if let Some(t) = &report.total {
        println!(
            "Total: inflow {}  outflow {}  net {}",
            fmt_money(&t.inflow),
            fmt_money(&t.outflow),
            fmt_money(&t.net)
        );
    }
    if !report.alerts.is_empty() {
        let rows = report
            .alerts
            .iter()
            .map(|a| {
                vec![
                    a.date.to_string(),
                    a.severity.as_str().to_string(),
                    a.message.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Severity", "Alert"], rows));
    }
    Ok(())
}

fn summary_table(periods: &[PeriodSummary]) -> comfy_table::Table {
    let rows = periods
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                p.start.to_string(),
                p.end.to_string(),
                fmt_money(&p.inflow),
                fmt_money(&p.outflow),
                fmt_money(&p.net),
                fmt_money(&p.closing_balance),
            ]
        })
        .collect();
    pretty_table(
        &["Period", "From", "To", "Inflow", "Outflow", "Net", "Closing"],
        rows,
    )
}
