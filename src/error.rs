// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures of the pure calculation engines. All of them are a function of
/// the input, so none is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}

impl CalcError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CalcError::InvalidArgument(msg.into())
    }
}

pub type CalcResult<T> = std::result::Result<T, CalcError>;
