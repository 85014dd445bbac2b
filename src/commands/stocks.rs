// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::CalcError;
use crate::market::{is_market_open, is_stale, next_refresh_at};
use crate::models::{Holding, HoldingPerformance, StockQuote};
use crate::repo::{settings, stocks};
use crate::utils::{arg, fmt_money, http_client, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

#[derive(Debug, Deserialize)]
struct YahooResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    result: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    symbol: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Position {
    pub symbol: String,
    pub shares: Decimal,
    pub cost_basis: Decimal,
    pub price: Option<Decimal>,
    pub value: Option<Decimal>,
    pub gain: Option<Decimal>,
    pub return_percent: Option<Decimal>,
    pub fetched_at: Option<NaiveDateTime>,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let symbol = arg(sub, "symbol")?.to_uppercase();
            let shares = parse_decimal(arg(sub, "shares")?)?;
            let cost = parse_decimal(arg(sub, "cost")?)?;
            if cost < Decimal::ZERO {
                return Err(anyhow!("Cost basis must not be negative"));
            }
            stocks::upsert_holding(conn, &symbol, shares, cost)?;
            println!("Holding {} x {} (cost {})", shares, symbol, fmt_money(&cost));
        }
        Some(("rm", sub)) => {
            let symbol = arg(sub, "symbol")?.to_uppercase();
            if !stocks::remove_holding(conn, &symbol)? {
                return Err(anyhow!("No holding for '{}'", symbol));
            }
            println!("Removed holding {}", symbol);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("refresh", sub)) => refresh(conn, sub.get_flag("force"))?,
        _ => {}
    }
    Ok(())
}

/// Every holding with its cached price and, where a price and a non-zero
/// cost basis exist, its gain and return.
pub fn positions(conn: &Connection) -> Result<Vec<Position>> {
    let mut data = Vec::new();
    for h in stocks::holdings(conn)? {
        let q = stocks::quote(conn, &h.symbol)?;
        let perf = match &q {
            Some(q) => performance(&h, q.price)?,
            None => None,
        };
        let value = q
            .as_ref()
            .map(|q| {
                q.price
                    .checked_mul(h.shares)
                    .ok_or_else(|| anyhow!("{} value overflows", h.symbol))
            })
            .transpose()?;
        data.push(Position {
            value,
            price: q.as_ref().map(|q| q.price),
            gain: perf.as_ref().map(|p| p.total_gain),
            return_percent: perf.map(|p| p.return_percent),
            fetched_at: q.map(|q| q.fetched_at),
            symbol: h.symbol,
            shares: h.shares,
            cost_basis: h.cost_basis,
        });
    }
    Ok(data)
}

fn performance(h: &Holding, price: Decimal) -> Result<Option<HoldingPerformance>> {
    match h.performance(price) {
        Ok(p) => Ok(Some(p)),
        Err(CalcError::DivisionByZero(reason)) => {
            debug!(symbol = %h.symbol, reason, "no return without a cost basis");
            Ok(None)
        }
        Err(e) => Err(anyhow!("{} performance: {}", h.symbol, e)),
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = positions(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let dash = || "-".to_string();
        let rows = data
            .into_iter()
            .map(|p| {
                vec![
                    p.symbol,
                    p.shares.to_string(),
                    fmt_money(&p.cost_basis),
                    p.price.map(|v| fmt_money(&v)).unwrap_or_else(dash),
                    p.value.map(|v| fmt_money(&v)).unwrap_or_else(dash),
                    p.gain.map(|v| fmt_money(&v)).unwrap_or_else(dash),
                    p.return_percent
                        .map(|v| format!("{}%", fmt_money(&v)))
                        .unwrap_or_else(dash),
                    p.fetched_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Symbol", "Shares", "Cost", "Price", "Value", "Gain", "Return", "As of"],
                rows
            )
        );
    }
    Ok(())
}

/// Held symbols whose cached quote is missing or older than
/// `stock_max_age_hours`; every held symbol when `force` is set.
pub fn symbols_to_refresh(conn: &Connection, now: NaiveDateTime, force: bool) -> Result<Vec<String>> {
    let max_age = settings::stock_max_age_hours(conn)?;
    let mut out = Vec::new();
    for h in stocks::holdings(conn)? {
        if force || is_stale(stocks::quote(conn, &h.symbol)?.as_ref(), now, max_age) {
            out.push(h.symbol);
        }
    }
    Ok(out)
}

fn refresh(conn: &Connection, force: bool) -> Result<()> {
    let now = Local::now().naive_local();
    if !force && !is_market_open(now) {
        println!(
            "Market closed; next refresh at {}",
            next_refresh_at(now).format("%Y-%m-%d %H:%M")
        );
        return Ok(());
    }
    let symbols = symbols_to_refresh(conn, now, force)?;
    if symbols.is_empty() {
        println!("All cached prices are fresh");
        return Ok(());
    }

    let client = http_client()?;
    let resp = client
        .get(QUOTE_URL)
        .query(&[("symbols", symbols.join(","))])
        .send()?
        .error_for_status()?;
    let yr: YahooResponse = resp.json()?;

    let mut updated = 0usize;
    for q in yr.quote_response.result {
        let (Some(symbol), Some(px)) = (q.symbol, q.regular_market_price) else {
            continue;
        };
        let Some(price) = Decimal::from_f64_retain(px) else {
            warn!(%symbol, px, "unrepresentable price skipped");
            continue;
        };
        if !symbols.contains(&symbol) {
            continue;
        }
        stocks::upsert_quote(
            conn,
            &StockQuote {
                symbol,
                price,
                fetched_at: now,
            },
        )?;
        updated += 1;
    }
    info!(requested = symbols.len(), updated, "stock prices refreshed");
    println!(
        "Fetched {} of {} prices; next refresh at {}",
        updated,
        symbols.len(),
        next_refresh_at(now).format("%Y-%m-%d %H:%M")
    );
    Ok(())
}
