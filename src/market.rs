// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Market-hours arithmetic for the stock price cache. Times are local
//! wall-clock; the session is 09:00 to 16:00 on weekdays.

use crate::models::StockQuote;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};

pub const OPEN_HOUR: u32 = 9;
pub const CLOSE_HOUR: u32 = 16;

fn is_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn is_market_open(now: NaiveDateTime) -> bool {
    is_weekday(now.weekday()) && (OPEN_HOUR..CLOSE_HOUR).contains(&now.hour())
}

/// When the next refresh should run: a day later while the market is open,
/// otherwise the next weekday open.
pub fn next_refresh_at(now: NaiveDateTime) -> NaiveDateTime {
    if is_market_open(now) {
        return now + Duration::hours(24);
    }
    let open = NaiveTime::from_hms_opt(OPEN_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let mut day = now.date();
    if now.time() >= open {
        day = day.succ_opt().unwrap_or(day);
    }
    while !is_weekday(day.weekday()) {
        day = day.succ_opt().unwrap_or(day);
    }
    day.and_time(open)
}

/// A missing quote is always stale.
pub fn is_stale(quote: Option<&StockQuote>, now: NaiveDateTime, max_age_hours: u32) -> bool {
    match quote {
        Some(q) => now - q.fetched_at >= Duration::hours(i64::from(max_age_hours)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn open_only_on_weekday_session() {
        // 2024-03-15 is a Friday
        assert!(is_market_open(at(2024, 3, 15, 9, 0)));
        assert!(is_market_open(at(2024, 3, 15, 15, 59)));
        assert!(!is_market_open(at(2024, 3, 15, 16, 0)));
        assert!(!is_market_open(at(2024, 3, 15, 8, 59)));
        assert!(!is_market_open(at(2024, 3, 16, 12, 0)));
    }

    #[test]
    fn next_refresh_skips_weekend() {
        assert_eq!(next_refresh_at(at(2024, 3, 15, 17, 0)), at(2024, 3, 18, 9, 0));
        assert_eq!(next_refresh_at(at(2024, 3, 16, 10, 0)), at(2024, 3, 18, 9, 0));
        assert_eq!(next_refresh_at(at(2024, 3, 14, 7, 30)), at(2024, 3, 14, 9, 0));
        assert_eq!(next_refresh_at(at(2024, 3, 14, 10, 0)), at(2024, 3, 15, 10, 0));
    }

    #[test]
    fn staleness_uses_max_age() {
        let q = StockQuote {
            symbol: "AAPL".into(),
            price: Decimal::new(18000, 2),
            fetched_at: at(2024, 3, 14, 10, 0),
        };
        assert!(!is_stale(Some(&q), at(2024, 3, 15, 9, 59), 24));
        assert!(is_stale(Some(&q), at(2024, 3, 15, 10, 0), 24));
        assert!(is_stale(None, at(2024, 3, 15, 10, 0), 24));
    }
}
