// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AmortizationEntry, LoanPayment, LoanTerms};
use crate::repo::loans::{self, PaymentKind};
use crate::utils::{
    arg, fmt_money, maybe_print_json, opt_date, opt_decimal, parse_decimal, pretty_table, today,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("schedule", sub)) => schedule(sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// `--principal --rate --term [--start]`, shared with `export schedule`.
pub fn terms_from(sub: &clap::ArgMatches) -> Result<LoanTerms> {
    Ok(LoanTerms {
        principal: parse_decimal(arg(sub, "principal")?)?,
        annual_rate_percent: parse_decimal(arg(sub, "rate")?)?,
        term_months: sub.get_one::<u32>("term").copied().context("Missing --term")?,
        start_date: opt_date(sub, "start")?.unwrap_or_else(today),
    })
}

fn schedule_rows(entries: &[AmortizationEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| {
            vec![
                e.payment_number.to_string(),
                e.payment_date.to_string(),
                fmt_money(&e.payment_amount),
                fmt_money(&e.principal_portion),
                fmt_money(&e.interest_portion),
                fmt_money(&e.remaining_balance),
            ]
        })
        .collect()
}

const SCHEDULE_HEADERS: [&str; 6] = ["#", "Date", "Payment", "Principal", "Interest", "Balance"];

fn schedule(sub: &clap::ArgMatches) -> Result<()> {
    let terms = terms_from(sub)?;
    let s = terms.schedule()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!("{}", pretty_table(&SCHEDULE_HEADERS, schedule_rows(&s.schedule)));
    println!(
        "Monthly payment {}  total interest {}  total paid {}",
        fmt_money(&s.monthly_payment),
        fmt_money(&s.total_interest),
        fmt_money(&s.total_paid)
    );
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = arg(sub, "name")?;
    let terms = terms_from(sub)?;
    let (_, s) = loans::create(conn, name, &terms)?;
    println!(
        "Added loan '{}': {} payments of {} (total interest {})",
        name,
        s.schedule.len(),
        fmt_money(&s.monthly_payment),
        fmt_money(&s.total_interest)
    );
    Ok(())
}

fn pay(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let loan = loans::get(conn, arg(sub, "name")?)?;
    let amount = opt_decimal(sub, "amount")?.unwrap_or(loan.monthly_payment);
    let extra = opt_decimal(sub, "extra")?.unwrap_or(Decimal::ZERO);
    let date = opt_date(sub, "date")?.unwrap_or_else(today);
    let p = loans::record_payment(conn, loan.id, date, amount, extra)?;
    println!(
        "Paid {} on '{}' ({} interest, {} principal, {} extra); balance {}",
        fmt_money(&p.payment_amount),
        loan.name,
        fmt_money(&p.interest_portion),
        fmt_money(&p.principal_portion),
        fmt_money(&p.extra_payment),
        fmt_money(&p.remaining_balance)
    );
    Ok(())
}

fn payment_rows(payments: &[LoanPayment]) -> Vec<Vec<String>> {
    payments
        .iter()
        .map(|p| {
            vec![
                p.payment_date.to_string(),
                fmt_money(&p.payment_amount),
                fmt_money(&p.principal_portion),
                fmt_money(&p.interest_portion),
                fmt_money(&p.extra_payment),
                fmt_money(&p.remaining_balance),
            ]
        })
        .collect()
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let loan = loans::get(conn, arg(sub, "name")?)?;
    let kind = if sub.get_flag("schedule") {
        PaymentKind::Scheduled
    } else {
        PaymentKind::Recorded
    };
    let balance = loans::current_balance(conn, &loan)?;
    let payments = loans::payments(conn, loan.id, kind)?;
    let v = json!({ "loan": loan, "balance": balance, "payments": payments });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        return Ok(());
    }
    println!(
        "{}: {} at {}% over {} months, payment {}, next due {} ({} left), balance {}",
        loan.name,
        fmt_money(&loan.principal),
        loan.annual_rate_percent,
        loan.term_months,
        fmt_money(&loan.monthly_payment),
        loan.next_payment_date,
        loan.remaining_payments,
        fmt_money(&balance)
    );
    println!(
        "{}",
        pretty_table(
            &["Date", "Payment", "Principal", "Interest", "Extra", "Balance"],
            payment_rows(&payments)
        )
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut items = Vec::new();
    for loan in loans::list(conn)? {
        let balance = loans::current_balance(conn, &loan)?;
        items.push((loan, balance));
    }
    let v: Vec<_> = items
        .iter()
        .map(|(loan, balance)| json!({ "loan": loan, "balance": balance }))
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        return Ok(());
    }
    let rows = items
        .into_iter()
        .map(|(l, balance)| {
            vec![
                l.name,
                fmt_money(&l.principal),
                format!("{}%", l.annual_rate_percent),
                fmt_money(&l.monthly_payment),
                l.next_payment_date.to_string(),
                l.remaining_payments.to_string(),
                fmt_money(&balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Name", "Principal", "Rate", "Payment", "Next due", "Left", "Balance"],
            rows
        )
    );
    Ok(())
}
