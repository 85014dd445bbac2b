// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cash-flow projection from recurring transactions.
//!
//! The projection replays each recurring transaction's schedule across a
//! window of daily buckets and then accumulates a running balance. It never
//! looks at real account balances; `alerts` takes an opening balance when
//! the caller has one.

use crate::error::{CalcError, CalcResult};
use crate::models::{
    AlertKind, CashFlowAlert, DailyPrediction, PeriodSummary, PredictedOccurrence,
    RecurringTransaction, Severity,
};
use crate::recurrence::occurrences;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_LARGE_EXPENSE: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Longest projection window, ten years of days.
pub const MAX_TIMEFRAME_DAYS: u32 = 3660;

fn add(a: Decimal, b: Decimal, what: &'static str) -> CalcResult<Decimal> {
    a.checked_add(b).ok_or(CalcError::Overflow(what))
}

fn sub(a: Decimal, b: Decimal, what: &'static str) -> CalcResult<Decimal> {
    a.checked_sub(b).ok_or(CalcError::Overflow(what))
}

/// One bucket per day starting at `start`, ascending, exactly
/// `timeframe_days` long.
pub fn build_cash_flow_prediction(
    recurring: &[RecurringTransaction],
    timeframe_days: u32,
    start: NaiveDate,
) -> CalcResult<Vec<DailyPrediction>> {
    if timeframe_days == 0 {
        return Err(CalcError::invalid("timeframe must be at least one day"));
    }
    if timeframe_days > MAX_TIMEFRAME_DAYS {
        return Err(CalcError::invalid(format!(
            "timeframe of {} days exceeds the {} day limit",
            timeframe_days, MAX_TIMEFRAME_DAYS
        )));
    }
    let last = start
        .checked_add_days(Days::new(u64::from(timeframe_days) - 1))
        .ok_or_else(|| CalcError::invalid("timeframe runs past the supported date range"))?;

    let mut days: Vec<DailyPrediction> = start
        .iter_days()
        .take(timeframe_days as usize)
        .map(DailyPrediction::empty)
        .collect();

    let mut landed = 0usize;
    for rt in recurring {
        for date in occurrences(rt.next_date, rt.frequency, start, last) {
            let idx = (date - start).num_days() as usize;
            let day = &mut days[idx];
            if rt.amount > Decimal::ZERO {
                day.inflow = add(day.inflow, rt.amount, "cash-flow bucket")?;
            } else if rt.amount < Decimal::ZERO {
                day.outflow = add(day.outflow, rt.amount.abs(), "cash-flow bucket")?;
            }
            day.transactions.push(PredictedOccurrence {
                amount: rt.amount,
                category: rt.category.clone(),
            });
            landed += 1;
        }
    }

    let mut balance = Decimal::ZERO;
    for day in days.iter_mut() {
        let net = sub(day.inflow, day.outflow, "cash-flow bucket")?;
        balance = add(balance, net, "running balance")?;
        day.balance = balance;
    }

    debug!(
        recurring = recurring.len(),
        occurrences = landed,
        timeframe_days,
        %start,
        "built cash-flow prediction"
    );
    Ok(days)
}

fn summarize(label: String, days: &[DailyPrediction]) -> CalcResult<Option<PeriodSummary>> {
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Ok(None);
    };
    let mut inflow = Decimal::ZERO;
    let mut outflow = Decimal::ZERO;
    for d in days {
        inflow = add(inflow, d.inflow, "period inflow")?;
        outflow = add(outflow, d.outflow, "period outflow")?;
    }
    Ok(Some(PeriodSummary {
        label,
        start: first.date,
        end: last.date,
        inflow,
        outflow,
        net: sub(inflow, outflow, "period net")?,
        closing_balance: last.balance,
    }))
}

/// Seven-day chunks counted from the first day; the last may be shorter.
pub fn weekly_summary(days: &[DailyPrediction]) -> CalcResult<Vec<PeriodSummary>> {
    let mut out = Vec::new();
    for (i, chunk) in days.chunks(7).enumerate() {
        out.extend(summarize(format!("week {}", i + 1), chunk)?);
    }
    Ok(out)
}

/// Grouped by calendar month (`YYYY-MM`), in date order.
pub fn monthly_summary(days: &[DailyPrediction]) -> CalcResult<Vec<PeriodSummary>> {
    let mut months: BTreeMap<(i32, u32), (usize, usize)> = BTreeMap::new();
    for (i, d) in days.iter().enumerate() {
        months
            .entry((d.date.year(), d.date.month()))
            .and_modify(|range| range.1 = i)
            .or_insert((i, i));
    }
    let mut out = Vec::with_capacity(months.len());
    for ((y, m), (lo, hi)) in months {
        out.extend(summarize(format!("{:04}-{:02}", y, m), &days[lo..=hi])?);
    }
    Ok(out)
}

pub fn total(days: &[DailyPrediction]) -> CalcResult<Option<PeriodSummary>> {
    summarize("total".to_string(), days)
}

fn negative_severity(balance: Decimal) -> Severity {
    if balance < Decimal::from(-500) {
        Severity::High
    } else if balance < Decimal::from(-100) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Days where `opening_balance` plus the projected running balance dips
/// below zero, and days carrying recurring expenses larger than
/// `large_expense`.
pub fn alerts(
    days: &[DailyPrediction],
    opening_balance: Decimal,
    large_expense: Decimal,
) -> CalcResult<Vec<CashFlowAlert>> {
    let mut out = Vec::new();
    for day in days {
        let projected = add(opening_balance, day.balance, "projected balance")?;
        if projected < Decimal::ZERO {
            out.push(CashFlowAlert {
                date: day.date,
                kind: AlertKind::NegativeBalance,
                severity: negative_severity(projected),
                message: format!("Projected negative balance of {:.2}", projected.abs()),
            });
        }

        let large: Vec<&PredictedOccurrence> = day
            .transactions
            .iter()
            .filter(|t| t.amount < -large_expense)
            .collect();
        if !large.is_empty() {
            let mut sum = Decimal::ZERO;
            for t in &large {
                sum = add(sum, t.amount, "large expense total")?;
            }
            out.push(CashFlowAlert {
                date: day.date,
                kind: AlertKind::LargeExpense,
                severity: Severity::Medium,
                message: format!(
                    "{} large expense(s) totaling {:.2}",
                    large.len(),
                    sum.abs()
                ),
            });
        }
    }
    Ok(out)
}
