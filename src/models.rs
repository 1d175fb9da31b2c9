// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl FromStr for TxType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(anyhow!("Invalid type '{}', expected income|expense", other)),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Income => f.write_str("income"),
            TxType::Expense => f.write_str("expense"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub desc: String,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    /// Income counts positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.r#type {
            TxType::Income => self.amount,
            TxType::Expense => -self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TxType::Expense
    }
}

/// Fields supplied by the entry form before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub desc: String,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category: String,
    pub date: NaiveDate,
}

/// Partial edit; `None` leaves the field as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub desc: Option<String>,
    pub amount: Option<Decimal>,
    pub r#type: Option<TxType>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl FromStr for Granularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            other => Err(anyhow!(
                "Invalid granularity '{}', expected daily|weekly|monthly",
                other
            )),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => f.write_str("daily"),
            Granularity::Weekly => f.write_str("weekly"),
            Granularity::Monthly => f.write_str("monthly"),
        }
    }
}

/// Chart-ready series. `labels` and `values` are positionally paired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl AggregateResult {
    pub fn push(&mut self, label: impl Into<String>, value: Decimal) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Adds `value` to the entry for `label`, appending it on first sight.
    /// Totals saturate at the `Decimal` range.
    pub fn accumulate(&mut self, label: &str, value: Decimal) {
        match self.labels.iter().position(|l| l == label) {
            Some(idx) => self.values[idx] = self.values[idx].saturating_add(value),
            None => self.push(label, value),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|idx| self.values[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Pie => f.write_str("pie"),
            ChartKind::Bar => f.write_str("bar"),
            ChartKind::Line => f.write_str("line"),
        }
    }
}
