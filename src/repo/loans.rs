// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Loans and their payment history. Creating a loan stores its initial
//! schedule as `scheduled` rows; `record_payment` appends `recorded` rows,
//! and only recorded rows move the outstanding balance.

use super::stored_decimal;
use crate::amortization::apply_payment;
use crate::models::{AmortizationSchedule, Loan, LoanPayment, LoanTerms};
use crate::recurrence::add_months;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    Scheduled,
    Recorded,
}

impl PaymentKind {
    fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Scheduled => "scheduled",
            PaymentKind::Recorded => "recorded",
        }
    }
}

const LOAN_COLUMNS: &str = "id, name, principal, interest_rate, term_months, start_date,
     payment_amount, next_payment_date, remaining_payments";

type LoanRow = (i64, String, String, String, u32, NaiveDate, String, NaiveDate, i64);

fn read_loan_row(r: &Row<'_>) -> rusqlite::Result<LoanRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
    ))
}

fn to_loan(row: LoanRow) -> Result<Loan> {
    let (id, name, principal, rate, term_months, start_date, payment, next, remaining) = row;
    Ok(Loan {
        id,
        name,
        principal: stored_decimal(&principal, "principal")?,
        annual_rate_percent: stored_decimal(&rate, "interest rate")?,
        term_months,
        start_date,
        monthly_payment: stored_decimal(&payment, "payment amount")?,
        next_payment_date: next,
        remaining_payments: remaining,
    })
}

fn insert_payment(conn: &Connection, kind: PaymentKind, p: &LoanPayment) -> Result<i64> {
    conn.execute(
        "INSERT INTO loan_payments(loan_id, kind, payment_date, payment_amount,
             principal_portion, interest_portion, extra_payment, remaining_balance)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            p.loan_id,
            kind.as_str(),
            p.payment_date,
            p.payment_amount.to_string(),
            p.principal_portion.to_string(),
            p.interest_portion.to_string(),
            p.extra_payment.to_string(),
            p.remaining_balance.to_string()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Store the loan and its full initial schedule atomically.
pub fn create(
    conn: &mut Connection,
    name: &str,
    terms: &LoanTerms,
) -> Result<(i64, AmortizationSchedule)> {
    let schedule = terms.schedule()?;
    let first_due = schedule
        .schedule
        .first()
        .map(|e| e.payment_date)
        .unwrap_or(terms.start_date);

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO loans(name, principal, interest_rate, term_months, start_date,
             payment_amount, next_payment_date, remaining_payments)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            name,
            terms.principal.to_string(),
            terms.annual_rate_percent.to_string(),
            terms.term_months,
            terms.start_date,
            schedule.monthly_payment.to_string(),
            first_due,
            terms.term_months
        ],
    )
    .with_context(|| format!("Add loan '{}'", name))?;
    let loan_id = tx.last_insert_rowid();
    for e in &schedule.schedule {
        let row = LoanPayment {
            id: 0,
            loan_id,
            payment_date: e.payment_date,
            payment_amount: e.payment_amount,
            principal_portion: e.principal_portion,
            interest_portion: e.interest_portion,
            extra_payment: Decimal::ZERO,
            remaining_balance: e.remaining_balance,
        };
        insert_payment(&tx, PaymentKind::Scheduled, &row)?;
    }
    tx.commit()?;
    info!(loan_id, name, payments = schedule.schedule.len(), "loan created");
    Ok((loan_id, schedule))
}

pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Loan>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM loans WHERE name=?1", LOAN_COLUMNS),
            params![name],
            read_loan_row,
        )
        .optional()?;
    row.map(to_loan).transpose()
}

pub fn get(conn: &Connection, name: &str) -> Result<Loan> {
    find_by_name(conn, name)?.with_context(|| format!("Loan '{}' not found", name))
}

pub fn list(conn: &Connection) -> Result<Vec<Loan>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM loans ORDER BY name", LOAN_COLUMNS))?;
    let rows = stmt.query_map([], read_loan_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(to_loan(row?)?);
    }
    Ok(out)
}

/// Remaining balance after the latest recorded payment, or the principal if
/// nothing has been paid yet.
pub fn current_balance(conn: &Connection, loan: &Loan) -> Result<Decimal> {
    let latest: Option<String> = conn
        .query_row(
            "SELECT remaining_balance FROM loan_payments
             WHERE loan_id=?1 AND kind='recorded'
             ORDER BY id DESC LIMIT 1",
            params![loan.id],
            |r| r.get(0),
        )
        .optional()?;
    match latest {
        Some(raw) => stored_decimal(&raw, "remaining balance"),
        None => Ok(loan.principal),
    }
}

/// Apply a payment to the current balance, store it, and roll the next
/// due date forward one month. Payments must arrive in date order; one
/// dated before the latest recorded payment is rejected.
pub fn record_payment(
    conn: &mut Connection,
    loan_id: i64,
    date: NaiveDate,
    amount: Decimal,
    extra: Decimal,
) -> Result<LoanPayment> {
    let tx = conn.transaction()?;
    let loan = tx
        .query_row(
            &format!("SELECT {} FROM loans WHERE id=?1", LOAN_COLUMNS),
            params![loan_id],
            read_loan_row,
        )
        .optional()?
        .with_context(|| format!("Loan {} not found", loan_id))
        .and_then(to_loan)?;

    let latest: Option<NaiveDate> = tx
        .query_row(
            "SELECT MAX(payment_date) FROM loan_payments WHERE loan_id=?1 AND kind='recorded'",
            params![loan.id],
            |r| r.get(0),
        )?;
    if let Some(latest) = latest {
        if date < latest {
            anyhow::bail!(
                "Payment date {} is before the latest recorded payment on {}",
                date,
                latest
            );
        }
    }

    let balance = current_balance(&tx, &loan)?;
    let split = apply_payment(balance, loan.annual_rate_percent, amount, extra)?;
    let mut payment = LoanPayment {
        id: 0,
        loan_id: loan.id,
        payment_date: date,
        payment_amount: amount,
        principal_portion: split.principal_portion,
        interest_portion: split.interest_portion,
        extra_payment: split.extra_payment,
        remaining_balance: split.new_balance,
    };
    payment.id = insert_payment(&tx, PaymentKind::Recorded, &payment)?;
    tx.execute(
        "UPDATE loans SET next_payment_date=?1,
             remaining_payments=MAX(remaining_payments - 1, 0)
         WHERE id=?2",
        params![add_months(date, 1)?, loan.id],
    )?;
    tx.commit()?;
    info!(loan_id = loan.id, %amount, %extra, "loan payment recorded");
    Ok(payment)
}

pub fn payments(conn: &Connection, loan_id: i64, kind: PaymentKind) -> Result<Vec<LoanPayment>> {
    let mut stmt = conn.prepare(
        "SELECT id, payment_date, payment_amount, principal_portion, interest_portion,
                extra_payment, remaining_balance
         FROM loan_payments WHERE loan_id=?1 AND kind=?2
         ORDER BY payment_date, id",
    )?;
    let rows = stmt.query_map(params![loan_id, kind.as_str()], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, NaiveDate>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, payment_date, amount, principal, interest, extra, remaining) = row?;
        out.push(LoanPayment {
            id,
            loan_id,
            payment_date,
            payment_amount: stored_decimal(&amount, "payment amount")?,
            principal_portion: stored_decimal(&principal, "principal portion")?,
            interest_portion: stored_decimal(&interest, "interest portion")?,
            extra_payment: stored_decimal(&extra, "extra payment")?,
            remaining_balance: stored_decimal(&remaining, "remaining balance")?,
        });
    }
    Ok(out)
}
