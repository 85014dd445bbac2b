// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed-payment (annuity) loan schedules.

use crate::error::{CalcError, CalcResult};
use crate::models::{AmortizationEntry, AmortizationSchedule, LoanTerms, PaymentBreakdown};
use crate::recurrence::add_months;
use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn mul(a: Decimal, b: Decimal) -> CalcResult<Decimal> {
    a.checked_mul(b)
        .ok_or(CalcError::Overflow("amortization product"))
}

/// `annual_rate_percent / 12 / 100`
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / MONTHS_PER_YEAR / HUNDRED
}

/// The standard level payment `P * r * (1+r)^n / ((1+r)^n - 1)`, or
/// `P / n` when the rate is zero.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> CalcResult<Decimal> {
    validate(principal, annual_rate_percent, term_months)?;
    let n = Decimal::from(term_months);
    let r = monthly_rate(annual_rate_percent);
    if r.is_zero() {
        return Ok(principal / n);
    }
    let growth = (Decimal::ONE + r)
        .checked_powi(term_months as i64)
        .ok_or(CalcError::Overflow("(1 + r)^n"))?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        // rate too small to register at decimal precision
        return Ok(principal / n);
    }
    let numerator = mul(mul(principal, r)?, growth)?;
    numerator
        .checked_div(denominator)
        .ok_or(CalcError::DivisionByZero("annuity denominator"))
}

fn validate(principal: Decimal, annual_rate_percent: Decimal, term_months: u32) -> CalcResult<()> {
    if principal <= Decimal::ZERO {
        return Err(CalcError::invalid(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(CalcError::invalid(format!(
            "annual rate must not be negative, got {}",
            annual_rate_percent
        )));
    }
    if term_months == 0 {
        return Err(CalcError::invalid("term must be at least one month"));
    }
    Ok(())
}

/// Full monthly schedule for a fixed-rate loan. Payment `k` falls `k - 1`
/// calendar months after `start_date`.
pub fn build_amortization_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
    start_date: NaiveDate,
) -> CalcResult<AmortizationSchedule> {
    let payment = monthly_payment(principal, annual_rate_percent, term_months)?;
    let r = monthly_rate(annual_rate_percent);

    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(term_months as usize);
    for k in 1..=term_months {
        let interest = mul(balance, r)?;
        let principal_portion = payment - interest;
        balance -= principal_portion;
        total_interest += interest;
        schedule.push(AmortizationEntry {
            payment_number: k,
            payment_date: add_months(start_date, k - 1)?,
            payment_amount: payment,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance.max(Decimal::ZERO),
        });
    }

    debug!(
        %principal,
        %annual_rate_percent,
        term_months,
        monthly_payment = %payment.round_dp(2),
        "built amortization schedule"
    );
    Ok(AmortizationSchedule {
        monthly_payment: payment,
        total_interest,
        total_paid: mul(payment, Decimal::from(term_months))?,
        schedule,
    })
}

impl LoanTerms {
    pub fn schedule(&self) -> CalcResult<AmortizationSchedule> {
        build_amortization_schedule(
            self.principal,
            self.annual_rate_percent,
            self.term_months,
            self.start_date,
        )
    }
}

/// Split an actual payment (plus optional extra principal) against the
/// current balance.
pub fn apply_payment(
    balance: Decimal,
    annual_rate_percent: Decimal,
    payment: Decimal,
    extra: Decimal,
) -> CalcResult<PaymentBreakdown> {
    if balance < Decimal::ZERO {
        return Err(CalcError::invalid("balance must not be negative"));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(CalcError::invalid("annual rate must not be negative"));
    }
    if payment < Decimal::ZERO || extra < Decimal::ZERO {
        return Err(CalcError::invalid("payment amounts must not be negative"));
    }
    let interest = mul(balance, monthly_rate(annual_rate_percent))?;
    let principal_portion = payment - interest;
    let new_balance = (balance - principal_portion - extra).max(Decimal::ZERO);
    Ok(PaymentBreakdown {
        interest_portion: interest,
        principal_portion,
        extra_payment: extra,
        new_balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        let s = build_amortization_schedule(dec("1200"), Decimal::ZERO, 12, start()).unwrap();
        assert_eq!(s.monthly_payment, dec("100"));
        assert!(s.schedule.iter().all(|e| e.interest_portion.is_zero()));
        assert!(s.schedule.last().unwrap().remaining_balance.is_zero());
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(matches!(
            build_amortization_schedule(Decimal::ZERO, dec("5"), 12, start()),
            Err(CalcError::InvalidArgument(_))
        ));
        assert!(matches!(
            build_amortization_schedule(dec("1000"), dec("5"), 0, start()),
            Err(CalcError::InvalidArgument(_))
        ));
        assert!(matches!(
            build_amortization_schedule(dec("1000"), dec("-1"), 12, start()),
            Err(CalcError::InvalidArgument(_))
        ));
    }

    #[test]
    fn payment_dates_follow_calendar_months() {
        let s = build_amortization_schedule(dec("1000"), dec("6"), 14, start()).unwrap();
        assert_eq!(s.schedule[0].payment_date, start());
        assert_eq!(
            s.schedule[12].payment_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn extra_payment_reduces_balance_further() {
        let b = apply_payment(dec("1000"), dec("12"), dec("100"), dec("50")).unwrap();
        assert_eq!(b.interest_portion, dec("10"));
        assert_eq!(b.principal_portion, dec("90"));
        assert_eq!(b.new_balance, dec("860"));
    }

    #[test]
    fn overpayment_floors_balance_at_zero() {
        let b = apply_payment(dec("50"), dec("12"), dec("100"), Decimal::ZERO).unwrap();
        assert!(b.new_balance.is_zero());
    }
}
