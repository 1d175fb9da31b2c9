// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use spendview::models::Granularity;
use spendview::period::{PeriodNavigator, shift_months, window_bounds};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn daily_window_is_the_anchor() {
    assert_eq!(
        window_bounds(d(2024, 3, 10), Granularity::Daily),
        (d(2024, 3, 10), d(2024, 3, 10))
    );
}

#[test]
fn weekly_window_is_trailing_seven_days() {
    assert_eq!(
        window_bounds(d(2024, 3, 3), Granularity::Weekly),
        (d(2024, 2, 26), d(2024, 3, 3))
    );
}

#[test]
fn monthly_window_ends_at_anchor() {
    assert_eq!(
        window_bounds(d(2024, 3, 10), Granularity::Monthly),
        (d(2024, 3, 1), d(2024, 3, 10))
    );
}

#[test]
fn step_moves_by_month_even_when_daily() {
    let mut nav = PeriodNavigator::new(d(2024, 3, 10), Granularity::Daily);
    nav.step_month(1);
    assert_eq!(nav.anchor, d(2024, 4, 10));
    nav.step_month(-1);
    nav.step_month(-1);
    assert_eq!(nav.anchor, d(2024, 2, 10));
    assert_eq!(nav.bounds(), (d(2024, 2, 10), d(2024, 2, 10)));
}

#[test]
fn step_clamps_to_month_end() {
    assert_eq!(shift_months(d(2024, 1, 31), 1), d(2024, 2, 29));
    assert_eq!(shift_months(d(2024, 3, 31), -1), d(2024, 2, 29));
    assert_eq!(shift_months(d(2024, 12, 15), 1), d(2025, 1, 15));
}

#[test]
fn label_follows_granularity() {
    let nav = PeriodNavigator::new(d(2024, 1, 10), Granularity::Daily);
    assert_eq!(nav.label(), "Wed Jan 10 2024");
    let nav = PeriodNavigator::new(d(2024, 1, 10), Granularity::Monthly);
    assert_eq!(nav.label(), "January 2024");
}
