// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use comfy_table::Table;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::aggregate::saturating_sum;
use crate::models::{AggregateResult, ChartKind};
use crate::utils::{fmt_money, pretty_table};

const BAR_WIDTH: u32 = 30;

/// JSON payload handed to chart front ends.
#[derive(Debug, Serialize)]
pub struct ChartPayload<'a> {
    pub kind: ChartKind,
    pub title: &'a str,
    pub labels: &'a [String],
    pub values: &'a [Decimal],
}

pub fn chart_payload<'a>(
    kind: ChartKind,
    title: &'a str,
    data: &'a AggregateResult,
) -> ChartPayload<'a> {
    ChartPayload {
        kind,
        title,
        labels: &data.labels,
        values: &data.values,
    }
}

/// Text rendition of a chart. Empty series render as an empty table.
pub fn chart_table(kind: ChartKind, title: &str, data: &AggregateResult) -> Table {
    let rows: Vec<Vec<String>> = match kind {
        ChartKind::Pie => {
            let total = saturating_sum(data.values.iter().copied());
            data.iter()
                .map(|(label, value)| {
                    let share = value
                        .checked_div(total)
                        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                        .unwrap_or(Decimal::ZERO);
                    vec![label.to_string(), fmt_money(&value), format!("{:.1}%", share)]
                })
                .collect()
        }
        ChartKind::Bar => {
            let max = data
                .values
                .iter()
                .copied()
                .map(|v| v.abs())
                .max()
                .unwrap_or(Decimal::ZERO);
            data.iter()
                .map(|(label, value)| {
                    vec![label.to_string(), fmt_money(&value), bar(value, max)]
                })
                .collect()
        }
        ChartKind::Line => data
            .iter()
            .map(|(label, value)| vec![label.to_string(), fmt_money(&value)])
            .collect(),
    };
    let headers: Vec<&str> = match kind {
        ChartKind::Pie => vec![title, "Amount", "Share"],
        ChartKind::Bar => vec![title, "Amount", ""],
        ChartKind::Line => vec![title, "Value"],
    };
    pretty_table(&headers, rows)
}

fn bar(value: Decimal, max: Decimal) -> String {
    if max.is_zero() {
        return String::new();
    }
    let cells = value
        .abs()
        .checked_div(max)
        .and_then(|r| r.checked_mul(Decimal::from(BAR_WIDTH)))
        .map(|r| r.round())
        .and_then(|r| r.to_u32())
        .unwrap_or(0);
    "█".repeat(cells as usize)
}
