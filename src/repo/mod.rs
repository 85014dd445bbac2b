// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One module per stored entity. Every statement is parameterized; callers
//! never splice user input into SQL.

pub mod accounts;
pub mod goals;
pub mod loans;
pub mod predictions;
pub mod recurring;
pub mod salary;
pub mod settings;
pub mod stocks;
pub mod transactions;

use anyhow::{Context, Result};
use rust_decimal::Decimal;

/// Amounts are stored as decimal TEXT.
pub(crate) fn stored_decimal(raw: &str, what: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, raw))
}
