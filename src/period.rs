// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, Months, NaiveDate};
use tracing::warn;

use crate::models::Granularity;

/// Inclusive `(start, end)` of the window ending at `anchor`.
///
/// Weekly is the trailing seven days, not a calendar week. Monthly runs from
/// the first of the anchor's month up to the anchor itself.
pub fn window_bounds(anchor: NaiveDate, granularity: Granularity) -> (NaiveDate, NaiveDate) {
    let start = match granularity {
        Granularity::Daily => anchor,
        Granularity::Weekly => anchor - Duration::days(6),
        Granularity::Monthly => month_start(anchor),
    };
    (start, anchor)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves `date` by whole calendar months. Days past the end of the target
/// month clamp to its last day.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    };
    shifted.unwrap_or_else(|| {
        warn!(%date, months, "month step out of range, anchor unchanged");
        date
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodNavigator {
    pub anchor: NaiveDate,
    pub granularity: Granularity,
}

impl PeriodNavigator {
    pub fn new(anchor: NaiveDate, granularity: Granularity) -> Self {
        Self {
            anchor,
            granularity,
        }
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        window_bounds(self.anchor, self.granularity)
    }

    /// Always steps by a month, whatever the granularity.
    pub fn step_month(&mut self, direction: i32) {
        self.anchor = shift_months(self.anchor, direction);
    }

    pub fn label(&self) -> String {
        period_label(self.anchor, self.granularity)
    }
}

pub fn period_label(anchor: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => anchor.format("%a %b %d %Y").to_string(),
        Granularity::Weekly => {
            let (start, end) = window_bounds(anchor, granularity);
            format!(
                "{} → {}",
                start.format("%a %b %d %Y"),
                end.format("%a %b %d %Y")
            )
        }
        Granularity::Monthly => anchor.format("%B %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monthly_label_names_month() {
        assert_eq!(period_label(d(2024, 1, 10), Granularity::Monthly), "January 2024");
    }

    #[test]
    fn weekly_label_spans_seven_days() {
        assert_eq!(
            period_label(d(2024, 1, 10), Granularity::Weekly),
            "Thu Jan 04 2024 → Wed Jan 10 2024"
        );
    }
}
