// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over the transaction list: category totals, time buckets
//! and the day-by-day running balance that feed the charts.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{AggregateResult, Granularity, Transaction};
use crate::period::window_bounds;

/// Transactions dated within `[start, end]`.
pub fn filter_by_window(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .collect()
}

/// Selection used by the category charts. Daily and weekly use the exact
/// window; monthly matches on calendar month and year, so days after the
/// anchor still count.
pub fn filter_for_chart(
    transactions: &[Transaction],
    anchor: NaiveDate,
    granularity: Granularity,
) -> Vec<&Transaction> {
    match granularity {
        Granularity::Daily | Granularity::Weekly => {
            let (start, end) = window_bounds(anchor, granularity);
            filter_by_window(transactions, start, end)
        }
        Granularity::Monthly => transactions
            .iter()
            .filter(|t| t.date.year() == anchor.year() && t.date.month() == anchor.month())
            .collect(),
    }
}

/// Expense totals per category, in first-seen order. Income is ignored.
pub fn category_totals<'a, I>(transactions: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out = AggregateResult::default();
    for t in transactions.into_iter().filter(|t| t.is_expense()) {
        out.accumulate(&t.category, t.amount);
    }
    out
}

/// Trend bucket label. The weekly form is a week-of-month index that restarts
/// every month (`2024-3 W2` for March 10th), not an ISO week.
pub fn bucket_key(date: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => date.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => format!(
            "{}-{} W{}",
            date.year(),
            date.month(),
            date.day().div_ceil(7)
        ),
        Granularity::Monthly => format!("{}-{}", date.year(), date.month()),
    }
}

/// Expense totals per time bucket, keyed in first-seen order of the input.
pub fn time_bucket_totals<'a, I>(transactions: I, granularity: Granularity) -> AggregateResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out = AggregateResult::default();
    for t in transactions.into_iter().filter(|t| t.is_expense()) {
        out.accumulate(&bucket_key(t.date, granularity), t.amount);
    }
    out
}

/// One point per calendar day in `[start, end]`, each the cumulative signed
/// balance through that day. Everything dated before `start` seeds the first
/// value.
pub fn running_balance(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> AggregateResult {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let mut balance = saturating_sum(
        sorted
            .iter()
            .filter(|t| t.date < start)
            .map(|t| t.signed_amount()),
    );

    let mut out = AggregateResult::default();
    for day in start.iter_days().take_while(|d| *d <= end) {
        balance = balance.saturating_add(saturating_sum(
            sorted
                .iter()
                .filter(|t| t.date == day)
                .map(|t| t.signed_amount()),
        ));
        out.push(day.format("%Y-%m-%d").to_string(), balance);
    }
    out
}

/// Signed sum over every transaction.
pub fn total_balance(transactions: &[Transaction]) -> Decimal {
    saturating_sum(transactions.iter().map(Transaction::signed_amount))
}

/// Sum that clamps at `Decimal::MAX`/`Decimal::MIN` instead of panicking.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_key_counts_week_of_month() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(bucket_key(d, Granularity::Weekly), "2024-3 W2");
        let first = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(bucket_key(first, Granularity::Weekly), "2024-3 W1");
        let last = NaiveDate::from_ymd_opt(2024, 3, 29).unwrap();
        assert_eq!(bucket_key(last, Granularity::Weekly), "2024-3 W5");
    }

    #[test]
    fn saturating_sum_clamps_at_max() {
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, -Decimal::ONE]), Decimal::MIN);
        assert_eq!(saturating_sum([Decimal::ONE, Decimal::TWO]), Decimal::from(3));
    }

    #[test]
    fn monthly_and_daily_keys() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(bucket_key(d, Granularity::Monthly), "2024-3");
        assert_eq!(bucket_key(d, Granularity::Daily), "2024-03-05");
    }
}
