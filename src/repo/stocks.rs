// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::stored_decimal;
use crate::models::{Holding, StockQuote};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

/// Adding an existing symbol replaces its share count and cost basis.
pub fn upsert_holding(
    conn: &Connection,
    symbol: &str,
    shares: Decimal,
    cost_basis: Decimal,
) -> Result<()> {
    conn.execute(
        "INSERT INTO holdings(symbol, shares, cost_basis) VALUES (?1, ?2, ?3)
         ON CONFLICT(symbol) DO UPDATE SET shares=excluded.shares, cost_basis=excluded.cost_basis",
        params![symbol, shares.to_string(), cost_basis.to_string()],
    )?;
    Ok(())
}

pub fn remove_holding(conn: &Connection, symbol: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM holdings WHERE symbol=?1", params![symbol])?;
    Ok(n > 0)
}

pub fn holdings(conn: &Connection) -> Result<Vec<Holding>> {
    let mut stmt =
        conn.prepare("SELECT symbol, shares, cost_basis FROM holdings ORDER BY symbol")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (symbol, shares, cost_basis) = row?;
        out.push(Holding {
            symbol,
            shares: stored_decimal(&shares, "shares")?,
            cost_basis: stored_decimal(&cost_basis, "cost basis")?,
        });
    }
    Ok(out)
}

pub fn quote(conn: &Connection, symbol: &str) -> Result<Option<StockQuote>> {
    let row = conn
        .query_row(
            "SELECT symbol, price, fetched_at FROM stock_prices WHERE symbol=?1",
            params![symbol],
            |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, NaiveDateTime>(2)?,
                ))
            },
        )
        .optional()?;
    row.map(|(symbol, price, fetched_at)| {
        Ok(StockQuote {
            symbol,
            price: stored_decimal(&price, "stock price")?,
            fetched_at,
        })
    })
    .transpose()
}

/// The cache keeps only the latest price per symbol.
pub fn upsert_quote(conn: &Connection, q: &StockQuote) -> Result<()> {
    conn.execute(
        "INSERT INTO stock_prices(symbol, price, fetched_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(symbol) DO UPDATE SET price=excluded.price, fetched_at=excluded.fetched_at",
        params![q.symbol, q.price.to_string(), q.fetched_at],
    )?;
    Ok(())
}
