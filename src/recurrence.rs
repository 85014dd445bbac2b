// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Date arithmetic for recurring transactions and payment calendars.
//!
//! Month-based frequencies are anchored: the n-th occurrence is computed
//! from the original date rather than by stepping from the previous one,
//! so a series starting on the 31st lands on every month end without
//! drifting to the 28th after February.

use crate::error::{CalcError, CalcResult};
use crate::models::Frequency;
use chrono::{Days, Months, NaiveDate};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

enum Step {
    Days(u64),
    Months(u32),
}

impl Frequency {
    /// Lenient parse. Anything unrecognized becomes `Annual` so a projection
    /// over it still advances and terminates.
    pub fn parse(raw: &str) -> Frequency {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "biweekly" | "bi-weekly" | "fortnightly" => Frequency::Biweekly,
            "monthly" => Frequency::Monthly,
            "quarterly" => Frequency::Quarterly,
            "annual" | "annually" | "yearly" => Frequency::Annual,
            other => {
                warn!(frequency = other, "unrecognized frequency, using annual");
                Frequency::Annual
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Annual => "annual",
        }
    }

    fn step(&self) -> Step {
        match self {
            Frequency::Daily => Step::Days(1),
            Frequency::Weekly => Step::Days(7),
            Frequency::Biweekly => Step::Days(14),
            Frequency::Monthly => Step::Months(1),
            Frequency::Quarterly => Step::Months(3),
            Frequency::Annual => Step::Months(12),
        }
    }

    /// The occurrence `n` steps after `anchor` (`n == 0` is the anchor).
    /// `None` once the date leaves chrono's range.
    pub fn nth_occurrence(&self, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self.step() {
            Step::Days(days) => anchor.checked_add_days(Days::new(days.checked_mul(n as u64)?)),
            Step::Months(months) => anchor.checked_add_months(Months::new(months.checked_mul(n)?)),
        }
    }

    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.nth_occurrence(date, 1)
    }
}

impl FromStr for Frequency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Frequency::parse(s))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar-month addition; the day clamps to the end of shorter months.
pub fn add_months(date: NaiveDate, months: u32) -> CalcResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or(CalcError::Overflow("date out of range"))
}

/// Occurrences of a series in order, stopping after `until`.
pub struct Occurrences {
    anchor: NaiveDate,
    frequency: Frequency,
    until: NaiveDate,
    n: u32,
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let date = self.frequency.nth_occurrence(self.anchor, self.n)?;
        if date > self.until {
            return None;
        }
        self.n = self.n.checked_add(1)?;
        Some(date)
    }
}

/// Dates of the series anchored at `anchor` that fall in `[from, until]`.
pub fn occurrences(
    anchor: NaiveDate,
    frequency: Frequency,
    from: NaiveDate,
    until: NaiveDate,
) -> impl Iterator<Item = NaiveDate> {
    Occurrences {
        anchor,
        frequency,
        until,
        n: 0,
    }
    .skip_while(move |d| *d < from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monthly_rolls_over_year_end() {
        assert_eq!(Frequency::Monthly.advance(d(2024, 12, 15)), Some(d(2025, 1, 15)));
    }

    #[test]
    fn monthly_anchor_keeps_month_end() {
        let dates: Vec<_> =
            occurrences(d(2024, 1, 31), Frequency::Monthly, d(2024, 1, 1), d(2024, 4, 30)).collect();
        assert_eq!(
            dates,
            vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]
        );
    }

    #[test]
    fn unknown_frequency_falls_back_to_annual() {
        assert_eq!(Frequency::parse("every blue moon"), Frequency::Annual);
        assert_eq!(" Weekly ".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(Frequency::parse("yearly"), Frequency::Annual);
    }

    #[test]
    fn occurrences_skip_dates_before_window() {
        let dates: Vec<_> =
            occurrences(d(2024, 1, 1), Frequency::Weekly, d(2024, 1, 10), d(2024, 1, 31)).collect();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 1, 22), d(2024, 1, 29)]);
    }
}
