// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashcast::commands::goals::GoalProgress;
use cashcast::models::Goal;
use cashcast::repo::goals;
use cashcast::db;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn goal(target: i64, current: i64, target_date: Option<NaiveDate>) -> Goal {
    Goal {
        id: 1,
        name: "trip".into(),
        target_amount: Decimal::from(target),
        current_amount: Decimal::from(current),
        target_date,
        category: None,
    }
}

#[test]
fn progress_is_percent_to_two_places() {
    assert_eq!(goal(3000, 1000, None).progress_percent(), "33.33".parse().unwrap());
    assert_eq!(goal(0, 50, None).progress_percent(), Decimal::ZERO);
    assert_eq!(goal(100, 150, None).progress_percent(), Decimal::from(150));
}

#[test]
fn monthly_contribution_spreads_remainder() {
    let today = date(2024, 1, 15);
    // Jan 15 -> Jul 15 is six months
    let g = goal(1200, 0, Some(date(2024, 7, 15)));
    assert_eq!(g.monthly_contribution(today), Some(Decimal::from(200)));
    // a partial month counts as a whole one
    let g = goal(1400, 0, Some(date(2024, 7, 20)));
    assert_eq!(g.monthly_contribution(today), Some(Decimal::from(200)));
    // overdue: everything now
    let g = goal(500, 100, Some(date(2023, 12, 1)));
    assert_eq!(g.monthly_contribution(today), Some(Decimal::from(400)));
    assert_eq!(goal(500, 0, None).monthly_contribution(today), None);
    assert_eq!(
        goal(500, 800, Some(date(2024, 3, 1))).monthly_contribution(today),
        Some(Decimal::ZERO)
    );
}

#[test]
fn contribute_updates_stored_goal() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    goals::add(&conn, "laptop", Decimal::from(2000), Some(date(2024, 12, 1)), Some("tech")).unwrap();
    goals::add(&conn, "rainy day", Decimal::from(5000), None, None).unwrap();
    goals::add(&conn, "bike", Decimal::from(800), Some(date(2024, 6, 1)), None).unwrap();

    let g = goals::contribute(&conn, "laptop", Decimal::from(500)).unwrap();
    assert_eq!(g.progress_percent(), Decimal::from(25));

    let names: Vec<String> = goals::list(&conn).unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["bike", "laptop", "rainy day"]);

    let p = GoalProgress::new(goals::get(&conn, "laptop").unwrap(), date(2024, 6, 1));
    assert_eq!(p.monthly_contribution, Some(Decimal::from(250)));
    assert!(goals::contribute(&conn, "missing", Decimal::ONE).is_err());
    assert!(goals::add(&conn, "neg", Decimal::from(-1), None, None).is_err());
}
