// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashcast::models::LoanTerms;
use cashcast::repo::loans::{self, PaymentKind};
use cashcast::{cli, commands, db};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn terms() -> LoanTerms {
    LoanTerms {
        principal: dec("1000"),
        annual_rate_percent: dec("12"),
        term_months: 12,
        start_date: date(2024, 1, 31),
    }
}

#[test]
fn create_stores_schedule_and_first_due_date() {
    let mut conn = conn();
    let (id, schedule) = loans::create(&mut conn, "car", &terms()).unwrap();

    let loan = loans::get(&conn, "car").unwrap();
    assert_eq!(loan.id, id);
    assert_eq!(loan.monthly_payment, schedule.monthly_payment);
    assert_eq!(loan.next_payment_date, date(2024, 1, 31));
    assert_eq!(loan.remaining_payments, 12);

    let scheduled = loans::payments(&conn, id, PaymentKind::Scheduled).unwrap();
    assert_eq!(scheduled.len(), 12);
    assert_eq!(scheduled[1].payment_date, date(2024, 2, 29));
    assert!(loans::payments(&conn, id, PaymentKind::Recorded).unwrap().is_empty());
    // scheduled rows do not count as paid
    assert_eq!(loans::current_balance(&conn, &loan).unwrap(), dec("1000"));
}

#[test]
fn recorded_payments_reduce_balance_and_roll_due_date() {
    let mut conn = conn();
    let (id, _) = loans::create(&mut conn, "car", &terms()).unwrap();

    let p = loans::record_payment(&mut conn, id, date(2024, 1, 31), dec("100"), dec("50")).unwrap();
    assert_eq!(p.interest_portion, dec("10"));
    assert_eq!(p.principal_portion, dec("90"));
    assert_eq!(p.remaining_balance, dec("860"));

    let second =
        loans::record_payment(&mut conn, id, date(2024, 2, 29), dec("100"), Decimal::ZERO).unwrap();
    assert_eq!(second.interest_portion, dec("8.6"));
    assert_eq!(second.remaining_balance, dec("768.6"));

    let loan = loans::get(&conn, "car").unwrap();
    assert_eq!(loan.next_payment_date, date(2024, 3, 29));
    assert_eq!(loan.remaining_payments, 10);
    assert_eq!(loans::current_balance(&conn, &loan).unwrap(), dec("768.6"));
    assert_eq!(loans::payments(&conn, id, PaymentKind::Recorded).unwrap().len(), 2);
}

#[test]
fn overpayment_clears_loan_at_zero() {
    let mut conn = conn();
    let (id, _) = loans::create(&mut conn, "small", &terms()).unwrap();
    let p = loans::record_payment(&mut conn, id, date(2024, 1, 31), dec("2000"), Decimal::ZERO).unwrap();
    assert!(p.remaining_balance.is_zero());
}

#[test]
fn duplicate_names_are_rejected() {
    let mut conn = conn();
    loans::create(&mut conn, "car", &terms()).unwrap();
    assert!(loans::create(&mut conn, "car", &terms()).is_err());
}

#[test]
fn invalid_terms_store_nothing() {
    let mut conn = conn();
    let bad = LoanTerms {
        term_months: 0,
        ..terms()
    };
    assert!(loans::create(&mut conn, "bad", &bad).is_err());
    assert!(loans::list(&conn).unwrap().is_empty());
}

#[test]
fn loan_cli_add_and_pay() {
    let mut conn = conn();
    let cli = cli::build_cli();
    let add = cli.clone().get_matches_from([
        "cashcast", "loan", "add", "--name", "bike", "--principal", "1200", "--rate", "12",
        "--term", "12", "--start", "2024-01-01",
    ]);
    if let Some(("loan", m)) = add.subcommand() {
        commands::loans::handle(&mut conn, m).unwrap();
    } else {
        panic!("no loan subcommand");
    }

    let pay = cli.get_matches_from([
        "cashcast", "loan", "pay", "--name", "bike", "--date", "2024-01-01",
    ]);
    if let Some(("loan", m)) = pay.subcommand() {
        commands::loans::handle(&mut conn, m).unwrap();
    } else {
        panic!("no loan subcommand");
    }

    let loan = loans::get(&conn, "bike").unwrap();
    let recorded = loans::payments(&conn, loan.id, PaymentKind::Recorded).unwrap();
    assert_eq!(recorded.len(), 1);
    // defaults to the scheduled payment
    assert_eq!(recorded[0].payment_amount, loan.monthly_payment);
    assert_eq!(recorded[0].interest_portion, dec("12"));
}

#[test]
fn backdated_payment_is_rejected_and_balance_follows_the_chain() {
    let mut conn = conn();
    let (id, _) = loans::create(&mut conn, "car", &terms()).unwrap();
    let feb = loans::record_payment(&mut conn, id, date(2024, 2, 29), dec("100"), Decimal::ZERO)
        .unwrap();

    let err = loans::record_payment(&mut conn, id, date(2024, 1, 31), dec("100"), Decimal::ZERO)
        .unwrap_err();
    assert!(err.to_string().contains("before the latest recorded payment"));
    assert_eq!(loans::payments(&conn, id, PaymentKind::Recorded).unwrap().len(), 1);

    // same-day follow-up continues from the previous balance
    let again = loans::record_payment(&mut conn, id, date(2024, 2, 29), dec("100"), Decimal::ZERO)
        .unwrap();
    assert!(again.remaining_balance < feb.remaining_balance);
    let loan = loans::get(&conn, "car").unwrap();
    assert_eq!(loans::current_balance(&conn, &loan).unwrap(), again.remaining_balance);
}
