// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TxType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Income, expense and net for one calendar month (`month` is 1-based).
pub fn summarize(transactions: &[Transaction], month: u32, year: i32) -> MonthSummary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions
        .iter()
        .filter(|t| t.date.month() == month && t.date.year() == year)
    {
        match t.r#type {
            TxType::Income => income = income.saturating_add(t.amount),
            TxType::Expense => expense = expense.saturating_add(t.amount),
        }
    }
    MonthSummary {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

/// Result of checking one edge-triggered alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertCheck {
    /// The alert crossed its threshold on this check.
    pub fired: bool,
    /// Latch value to store for the next check.
    pub shown: bool,
}

/// Fires once when expense goes over a positive budget; re-arms when expense
/// drops back to or under it.
pub fn evaluate_budget_alert(expense: Decimal, budget: Decimal, already_shown: bool) -> AlertCheck {
    if budget > Decimal::ZERO && expense > budget && !already_shown {
        return AlertCheck {
            fired: true,
            shown: true,
        };
    }
    if expense <= budget {
        return AlertCheck {
            fired: false,
            shown: false,
        };
    }
    AlertCheck {
        fired: false,
        shown: already_shown,
    }
}

/// Fires once when balance falls under a non-zero minimum; re-arms when the
/// balance recovers to at least the minimum.
pub fn evaluate_min_balance_alert(
    balance: Decimal,
    min_balance: Decimal,
    already_shown: bool,
) -> AlertCheck {
    if !min_balance.is_zero() && balance < min_balance && !already_shown {
        return AlertCheck {
            fired: true,
            shown: true,
        };
    }
    if balance >= min_balance {
        return AlertCheck {
            fired: false,
            shown: false,
        };
    }
    AlertCheck {
        fired: false,
        shown: already_shown,
    }
}

pub fn budget_message(expense: Decimal, budget: Decimal) -> String {
    format!(
        "Budget exceeded! Expense: ₹{}, Limit: ₹{}",
        expense.normalize(),
        budget.normalize()
    )
}

pub fn min_balance_message(balance: Decimal, min_balance: Decimal) -> String {
    format!(
        "Balance below minimum! Current: ₹{}, Minimum: ₹{}",
        balance.normalize(),
        min_balance.normalize()
    )
}
