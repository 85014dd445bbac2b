// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo::transactions::{self, Filter};
use crate::utils::{fmt_money, maybe_print_json, opt_arg, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthFlow {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub spent: Decimal,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => {
            let months = sub.get_one::<u32>("months").copied().unwrap_or(12) as usize;
            let data = cashflow(conn, months)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|f| {
                        vec![
                            f.month,
                            fmt_money(&f.income),
                            fmt_money(&f.expense),
                            fmt_money(&f.net),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Month", "Income", "Expense", "Net"], rows)
                );
            }
        }
        Some(("spend-by-category", sub)) => {
            let month = opt_arg(sub, "month")
                .map(str::to_string)
                .unwrap_or_else(|| today().format("%Y-%m").to_string());
            let data = spend_by_category(conn, &month)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|c| vec![c.category, fmt_money(&c.spent)])
                    .collect();
                println!("{}", pretty_table(&["Category", "Spent"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Income and expense per calendar month, newest first, at most `months`.
pub fn cashflow(conn: &Connection, months: usize) -> Result<Vec<MonthFlow>> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions::list(conn, &Filter::default())? {
        let entry = map
            .entry(t.date.format("%Y-%m").to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.amount > Decimal::ZERO {
            entry.0 += t.amount;
        } else {
            entry.1 += -t.amount;
        }
    }
    Ok(map
        .into_iter()
        .rev()
        .take(months)
        .map(|(month, (income, expense))| MonthFlow {
            month,
            income,
            expense,
            net: income - expense,
        })
        .collect())
}

/// Spending (negative amounts) per category for `month` (YYYY-MM), largest
/// first. Uncategorized spending is grouped under "(none)".
pub fn spend_by_category(conn: &Connection, month: &str) -> Result<Vec<CategorySpend>> {
    let filter = Filter {
        month: Some(month.to_string()),
        ..Filter::default()
    };
    let mut map: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions::list(conn, &filter)? {
        if t.amount < Decimal::ZERO {
            *map.entry(t.category.unwrap_or_else(|| "(none)".to_string()))
                .or_insert(Decimal::ZERO) += -t.amount;
        }
    }
    let mut out: Vec<CategorySpend> = map
        .into_iter()
        .map(|(category, spent)| CategorySpend { category, spent })
        .collect();
    out.sort_by(|a, b| b.spent.cmp(&a.spent).then_with(|| a.category.cmp(&b.category)));
    Ok(out)
}
