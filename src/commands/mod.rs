// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod config;
pub mod exporter;
pub mod forecast;
pub mod goals;
pub mod importer;
pub mod loans;
pub mod recurring;
pub mod reports;
pub mod salary;
pub mod stocks;
pub mod transactions;
pub mod validate;
