// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{CalcError, CalcResult};
use crate::models::ValidationMetrics;
use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::BTreeMap;

/// Sum amounts per date.
pub fn group_by_date<I>(rows: I) -> CalcResult<BTreeMap<NaiveDate, Decimal>>
where
    I: IntoIterator<Item = (NaiveDate, Decimal)>,
{
    let mut out = BTreeMap::new();
    for (date, amount) in rows {
        let slot = out.entry(date).or_insert(Decimal::ZERO);
        *slot = slot
            .checked_add(amount)
            .ok_or(CalcError::Overflow("daily total"))?;
    }
    Ok(out)
}

fn same_direction(a: Decimal, b: Decimal) -> bool {
    (a >= Decimal::ZERO) == (b >= Decimal::ZERO)
}

/// Score predicted daily amounts against what actually happened. Every
/// predicted date counts; a date with no actuals is compared against zero.
pub fn compare(
    predicted: &BTreeMap<NaiveDate, Decimal>,
    actual: &BTreeMap<NaiveDate, Decimal>,
) -> CalcResult<ValidationMetrics> {
    if predicted.is_empty() {
        return Err(CalcError::DivisionByZero("no predictions in range"));
    }

    let mut abs_error = Decimal::ZERO;
    let mut sq_error = Decimal::ZERO;
    let mut hits = 0usize;
    for (date, p) in predicted {
        let a = actual.get(date).copied().unwrap_or(Decimal::ZERO);
        let diff = p.checked_sub(a).ok_or(CalcError::Overflow("prediction error"))?;
        abs_error = abs_error
            .checked_add(diff.abs())
            .ok_or(CalcError::Overflow("absolute error"))?;
        sq_error = diff
            .checked_mul(diff)
            .and_then(|sq| sq_error.checked_add(sq))
            .ok_or(CalcError::Overflow("squared error"))?;
        if same_direction(*p, a) {
            hits += 1;
        }
    }

    let n = Decimal::from(predicted.len());
    let mse = sq_error / n;
    Ok(ValidationMetrics {
        mean_absolute_error: abs_error / n,
        mean_squared_error: mse,
        root_mean_squared_error: mse.sqrt().ok_or(CalcError::Overflow("rmse"))?,
        direction_accuracy: Decimal::from(hits) * Decimal::ONE_HUNDRED / n,
        total_predictions: predicted.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn empty_predictions_fail_explicitly() {
        let err = compare(&BTreeMap::new(), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero(_)));
    }

    #[test]
    fn zero_counts_as_non_negative_direction() {
        let predicted = group_by_date([(d(1), Decimal::ZERO)]).unwrap();
        let actual = group_by_date([(d(1), Decimal::from(5))]).unwrap();
        let m = compare(&predicted, &actual).unwrap();
        assert_eq!(m.direction_accuracy, Decimal::ONE_HUNDRED);
        assert_eq!(m.mean_absolute_error, Decimal::from(5));
    }

    #[test]
    fn grouping_sums_same_day_rows() {
        let grouped = group_by_date([
            (d(1), Decimal::from(10)),
            (d(1), Decimal::from(-4)),
            (d(2), Decimal::from(1)),
        ])
        .unwrap();
        assert_eq!(grouped[&d(1)], Decimal::from(6));
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn opposite_extremes_overflow_the_difference() {
        let big: Decimal = "50000000000000000000000000000".parse().unwrap();
        let predicted = BTreeMap::from([(d(1), big)]);
        let actual = BTreeMap::from([(d(1), -big)]);
        assert!(matches!(
            compare(&predicted, &actual),
            Err(CalcError::Overflow(_))
        ));
    }

    #[test]
    fn same_day_sum_overflow_is_reported() {
        let err = group_by_date([(d(1), Decimal::MAX), (d(1), Decimal::ONE)]).unwrap_err();
        assert!(matches!(err, CalcError::Overflow(_)));
    }
}
