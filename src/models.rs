// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CalcError, CalcResult};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a recurring transaction repeats. Unknown spellings parse to
/// `Annual` (see `recurrence`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annual,
}

/// Input to the cash-flow projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub amount: Decimal, // positive = inflow
    pub category: String,
    pub frequency: Frequency,
    pub next_date: NaiveDate,
}

/// A recurring transaction as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringRecord {
    pub id: i64,
    pub description: Option<String>,
    pub active: bool,
    #[serde(flatten)]
    pub transaction: RecurringTransaction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedOccurrence {
    pub amount: Decimal,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub balance: Decimal,
    pub transactions: Vec<PredictedOccurrence>,
}

impl DailyPrediction {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            inflow: Decimal::ZERO,
            outflow: Decimal::ZERO,
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}

/// Weekly, monthly or whole-window roll-up of daily predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub inflow: Decimal,
    pub outflow: Decimal,
    pub net: Decimal,
    pub closing_balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    NegativeBalance,
    LargeExpense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowAlert {
    pub date: NaiveDate,
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub payment_amount: Decimal,
    pub principal_portion: Decimal,
    pub interest_portion: Decimal,
    pub remaining_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_paid: Decimal,
    pub schedule: Vec<AmortizationEntry>,
}

/// Split of one actual payment against an outstanding balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub interest_portion: Decimal,
    pub principal_portion: Decimal,
    pub extra_payment: Decimal,
    pub new_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub mean_absolute_error: Decimal,
    pub mean_squared_error: Decimal,
    pub root_mean_squared_error: Decimal,
    pub direction_accuracy: Decimal, // percent
    pub total_predictions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub r#type: String,
    pub currency: String,
    pub opening_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub account: Option<String>,
    pub amount: Decimal,
    pub category: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub name: String,
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub start_date: NaiveDate,
    pub monthly_payment: Decimal,
    pub next_payment_date: NaiveDate,
    pub remaining_payments: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPayment {
    pub id: i64,
    pub loan_id: i64,
    pub payment_date: NaiveDate,
    pub payment_amount: Decimal,
    pub principal_portion: Decimal,
    pub interest_portion: Decimal,
    pub extra_payment: Decimal,
    pub remaining_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl Goal {
    /// `current / target * 100` to two places; zero when the target is zero.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        (self.current_amount / self.target_amount * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Even monthly saving needed to reach the target by `target_date`.
    /// Past-due goals need the whole remainder now; undated goals have no pace.
    pub fn monthly_contribution(&self, today: NaiveDate) -> Option<Decimal> {
        let target_date = self.target_date?;
        let remaining = (self.target_amount - self.current_amount).max(Decimal::ZERO);
        let mut months = (target_date.year() - today.year()) * 12 + target_date.month() as i32
            - today.month() as i32;
        if target_date.day() > today.day() {
            months += 1;
        }
        Some(remaining / Decimal::from(months.max(1)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub shares: Decimal,
    /// Total paid for the position, not per share.
    pub cost_basis: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoldingPerformance {
    pub current_value: Decimal,
    pub total_gain: Decimal,
    pub return_percent: Decimal,
}

impl Holding {
    /// Value, gain and return against the cost basis at `price`. A zero
    /// basis has no defined return and is an error.
    pub fn performance(&self, price: Decimal) -> CalcResult<HoldingPerformance> {
        if self.cost_basis.is_zero() {
            return Err(CalcError::DivisionByZero("cost basis is zero"));
        }
        let current_value = price
            .checked_mul(self.shares)
            .ok_or(CalcError::Overflow("holding value"))?;
        let total_gain = current_value
            .checked_sub(self.cost_basis)
            .ok_or(CalcError::Overflow("holding gain"))?;
        let return_percent = total_gain
            .checked_div(self.cost_basis)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(CalcError::Overflow("holding return"))?;
        Ok(HoldingPerformance {
            current_value,
            total_gain,
            return_percent,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub price: Decimal,
    pub fetched_at: NaiveDateTime,
}

/// One salary change: the annual pay that applies from `date_of_change`
/// until the next entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryEntry {
    pub id: i64,
    pub company: String,
    pub position: String,
    pub salary_amount: Decimal,
    pub date_of_change: NaiveDate,
    pub bonus_amount: Decimal,
    pub commission_amount: Decimal,
    pub notes: Option<String>,
}

impl SalaryEntry {
    /// Salary, bonus and commission spread over twelve months.
    pub fn monthly_income(&self) -> CalcResult<Decimal> {
        let annual = self
            .salary_amount
            .checked_add(self.bonus_amount)
            .and_then(|v| v.checked_add(self.commission_amount))
            .ok_or(CalcError::Overflow("annual compensation"))?;
        Ok(annual / Decimal::from(12))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SalarySummary {
    pub as_of: NaiveDate,
    pub months: u32,
    /// Months in the window with a salary in effect.
    pub months_covered: u32,
    pub average_monthly_income: Decimal,
    pub current: Option<SalaryEntry>,
}

impl SalarySummary {
    /// Average monthly income over the `months` calendar months ending with
    /// the month of `as_of`. Each month uses the entry in effect at its last
    /// day (capped at `as_of`); months before the first entry are skipped.
    pub fn compute(entries: &[SalaryEntry], as_of: NaiveDate, months: u32) -> CalcResult<Self> {
        if months == 0 {
            return Err(CalcError::invalid("summary needs at least one month"));
        }
        let in_effect = |day: NaiveDate| {
            entries
                .iter()
                .filter(|e| e.date_of_change <= day)
                .max_by_key(|e| (e.date_of_change, e.id))
        };
        let this_month = as_of
            .with_day(1)
            .ok_or(CalcError::Overflow("date out of range"))?;

        let mut sum = Decimal::ZERO;
        let mut covered = 0u32;
        for back in 0..months {
            let first = this_month
                .checked_sub_months(Months::new(back))
                .ok_or(CalcError::Overflow("date out of range"))?;
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|d| d.checked_sub_days(Days::new(1)))
                .ok_or(CalcError::Overflow("date out of range"))?
                .min(as_of);
            if let Some(entry) = in_effect(last) {
                sum = sum
                    .checked_add(entry.monthly_income()?)
                    .ok_or(CalcError::Overflow("salary total"))?;
                covered += 1;
            }
        }

        Ok(SalarySummary {
            as_of,
            months,
            months_covered: covered,
            average_monthly_income: if covered == 0 {
                Decimal::ZERO
            } else {
                sum / Decimal::from(covered)
            },
            current: in_effect(as_of).cloned(),
        })
    }
}
