// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashcast::error::CalcError;
use cashcast::forecast::{
    MAX_TIMEFRAME_DAYS, alerts, build_cash_flow_prediction, monthly_summary, total,
};
use cashcast::models::{AlertKind, Frequency, RecurringTransaction, Severity};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn recurring(amount: i64, frequency: &str, next_date: NaiveDate) -> RecurringTransaction {
    RecurringTransaction {
        amount: Decimal::from(amount),
        category: "test".into(),
        frequency: Frequency::parse(frequency),
        next_date,
    }
}

#[test]
fn monthly_inflow_lands_twice_in_sixty_days() {
    let today = date(2024, 1, 15);
    let days =
        build_cash_flow_prediction(&[recurring(1000, "monthly", today)], 60, today).unwrap();
    assert_eq!(days.len(), 60);
    let hits: Vec<_> = days.iter().filter(|d| !d.inflow.is_zero()).collect();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].date, today);
    assert_eq!(hits[1].date, date(2024, 2, 15));
    assert!(hits.iter().all(|d| d.inflow == Decimal::from(1000)));
    assert_eq!(days.last().unwrap().balance, Decimal::from(2000));
}

#[test]
fn same_day_inflow_and_outflow_net_out() {
    let day = date(2024, 3, 5);
    let start = date(2024, 3, 1);
    let days = build_cash_flow_prediction(
        &[recurring(500, "monthly", day), recurring(-200, "monthly", day)],
        10,
        start,
    )
    .unwrap();
    let bucket = &days[4];
    assert_eq!(bucket.date, day);
    assert_eq!(bucket.inflow, Decimal::from(500));
    assert_eq!(bucket.outflow, Decimal::from(200));
    assert_eq!(bucket.net(), Decimal::from(300));
    assert_eq!(bucket.transactions.len(), 2);
    assert_eq!(days[3].balance, Decimal::ZERO);
    assert_eq!(bucket.balance, Decimal::from(300));
}

#[test]
fn balance_is_running_sum_of_net() {
    let start = date(2024, 1, 1);
    let days = build_cash_flow_prediction(
        &[
            recurring(2500, "biweekly", date(2024, 1, 5)),
            recurring(-45, "weekly", date(2023, 12, 30)),
            recurring(-1200, "monthly", date(2024, 1, 1)),
            recurring(-12, "daily", date(2024, 2, 10)),
            recurring(-300, "quarterly", date(2024, 2, 1)),
        ],
        120,
        start,
    )
    .unwrap();
    let mut prev = Decimal::ZERO;
    for d in &days {
        assert_eq!(d.balance, prev + d.inflow - d.outflow);
        prev = d.balance;
    }
    assert_eq!(total(&days).unwrap().unwrap().closing_balance, prev);
}

#[test]
fn unknown_frequency_terminates_with_full_window() {
    let start = date(2024, 1, 1);
    let days =
        build_cash_flow_prediction(&[recurring(-50, "whenever", start)], 400, start).unwrap();
    assert_eq!(days.len(), 400);
    // falls back to yearly
    let hits: Vec<_> = days.iter().filter(|d| !d.outflow.is_zero()).map(|d| d.date).collect();
    assert_eq!(hits, vec![date(2024, 1, 1), date(2025, 1, 1)]);
}

#[test]
fn order_of_recurring_inputs_does_not_matter() {
    let start = date(2024, 5, 1);
    let a = recurring(800, "weekly", date(2024, 5, 3));
    let b = recurring(-150, "monthly", date(2024, 4, 20));
    let forward = build_cash_flow_prediction(&[a.clone(), b.clone()], 45, start).unwrap();
    let reverse = build_cash_flow_prediction(&[b, a], 45, start).unwrap();
    for (x, y) in forward.iter().zip(&reverse) {
        assert_eq!((x.inflow, x.outflow, x.balance), (y.inflow, y.outflow, y.balance));
    }
}

#[test]
fn alerts_flag_overdraft_and_large_bills() {
    let start = date(2024, 6, 1);
    let days = build_cash_flow_prediction(
        &[
            recurring(-900, "monthly", date(2024, 6, 3)),
            recurring(-50, "weekly", date(2024, 6, 2)),
        ],
        7,
        start,
    )
    .unwrap();
    let found = alerts(&days, Decimal::from(300), Decimal::from(200)).unwrap();
    let large: Vec<_> = found.iter().filter(|a| a.kind == AlertKind::LargeExpense).collect();
    assert_eq!(large.len(), 1);
    assert_eq!(large[0].date, date(2024, 6, 3));
    let first_negative = found
        .iter()
        .find(|a| a.kind == AlertKind::NegativeBalance)
        .unwrap();
    assert_eq!(first_negative.date, date(2024, 6, 3));
    // 300 - 50 - 900 = -650
    assert_eq!(first_negative.severity, Severity::High);
}

#[test]
fn monthly_summary_closes_each_month() {
    let start = date(2024, 1, 20);
    let days =
        build_cash_flow_prediction(&[recurring(100, "weekly", start)], 20, start).unwrap();
    let months = monthly_summary(&days).unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].label, "2024-01");
    assert_eq!(months[0].end, date(2024, 1, 31));
    assert_eq!(months[0].inflow, Decimal::from(200));
    assert_eq!(months[1].closing_balance, Decimal::from(300));
}

#[test]
fn two_huge_daily_incomes_report_overflow() {
    let start = date(2024, 1, 1);
    let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
    let bonus = RecurringTransaction {
        amount: huge,
        category: "bonus".into(),
        frequency: Frequency::Daily,
        next_date: start,
    };
    let result = build_cash_flow_prediction(&[bonus.clone(), bonus], 2, start);
    assert!(matches!(result, Err(CalcError::Overflow(_))));
}

#[test]
fn opening_balance_overflow_is_reported_by_alerts() {
    let start = date(2024, 1, 1);
    let days =
        build_cash_flow_prediction(&[recurring(-10, "daily", start)], 3, start).unwrap();
    let result = alerts(&days, Decimal::MIN, Decimal::from(200));
    assert!(matches!(result, Err(CalcError::Overflow(_))));
}

#[test]
fn timeframe_is_capped() {
    let start = date(2024, 1, 1);
    let err = build_cash_flow_prediction(&[], u32::MAX, start).unwrap_err();
    assert!(matches!(err, CalcError::InvalidArgument(_)));
    assert!(build_cash_flow_prediction(&[], MAX_TIMEFRAME_DAYS, start).is_ok());
}
