// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod amortization;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod forecast;
pub mod market;
pub mod models;
pub mod recurrence;
pub mod repo;
pub mod utils;
pub mod validation;
