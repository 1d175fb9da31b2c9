// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One user's working state: the transaction store, the chart and summary
//! periods, settings and alert latches, bound to the key-value store they are
//! persisted in. Event handlers mutate it; [`Session::render`] reads it.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{
    category_totals, filter_for_chart, running_balance, time_bucket_totals, total_balance,
};
use crate::models::{
    AggregateResult, Granularity, NewTransaction, Notification, TransactionPatch,
};
use crate::period::{PeriodNavigator, period_label, shift_months};
use crate::storage::{
    KEY_BUDGET, KEY_BUDGET_ALERT_SHOWN, KEY_MIN_BALANCE, KEY_MIN_BALANCE_ALERT_SHOWN, KvStore,
    StoreError, load_decimal, load_flag, load_notifications, save_decimal, save_flag,
    save_notifications,
};
use crate::store::TransactionStore;
use crate::summary::{
    MonthSummary, budget_message, evaluate_budget_alert, evaluate_min_balance_alert,
    min_balance_message, summarize,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub budget: Decimal,
    pub min_balance: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChartGranularities {
    pub pie: Granularity,
    pub bar: Granularity,
    pub balance: Granularity,
}

/// Everything a redraw needs, computed from the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub period: String,
    pub pie: AggregateResult,
    pub bar: AggregateResult,
    pub balance: AggregateResult,
    pub summary_month: String,
    pub summary: MonthSummary,
    pub settings: Settings,
    pub total_balance: Decimal,
    pub balance_low: bool,
}

pub struct Session<S: KvStore> {
    kv: S,
    store: TransactionStore,
    navigator: PeriodNavigator,
    charts: ChartGranularities,
    summary_anchor: NaiveDate,
    settings: Settings,
    budget_alert_shown: bool,
    min_balance_alert_shown: bool,
    notifications: Vec<Notification>,
}

impl<S: KvStore> Session<S> {
    /// Loads persisted state; chart and summary periods start at `today`.
    pub fn open(kv: S, today: NaiveDate) -> Self {
        let store = TransactionStore::load(&kv);
        let settings = Settings {
            budget: load_decimal(&kv, KEY_BUDGET),
            min_balance: load_decimal(&kv, KEY_MIN_BALANCE),
        };
        let budget_alert_shown = load_flag(&kv, KEY_BUDGET_ALERT_SHOWN);
        let min_balance_alert_shown = load_flag(&kv, KEY_MIN_BALANCE_ALERT_SHOWN);
        let notifications = load_notifications(&kv);
        Self {
            kv,
            store,
            navigator: PeriodNavigator::new(today, Granularity::Monthly),
            charts: ChartGranularities::default(),
            summary_anchor: today,
            settings,
            budget_alert_shown,
            min_balance_alert_shown,
            notifications,
        }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn navigator(&self) -> &PeriodNavigator {
        &self.navigator
    }

    pub fn summary_anchor(&self) -> NaiveDate {
        self.summary_anchor
    }

    pub fn alert_latches(&self) -> (bool, bool) {
        (self.budget_alert_shown, self.min_balance_alert_shown)
    }

    pub fn add_transaction(&mut self, record: NewTransaction) -> Result<i64, StoreError> {
        let id = self.store.add(record);
        self.store.persist(&self.kv)?;
        Ok(id)
    }

    pub fn update_transaction(
        &mut self,
        id: i64,
        patch: TransactionPatch,
    ) -> Result<bool, StoreError> {
        let found = self.store.update(id, patch);
        self.store.persist(&self.kv)?;
        Ok(found)
    }

    pub fn remove_transaction(&mut self, id: i64) -> Result<bool, StoreError> {
        let found = self.store.remove(id);
        self.store.persist(&self.kv)?;
        Ok(found)
    }

    pub fn set_budget(&mut self, budget: Decimal) -> Result<(), StoreError> {
        self.settings.budget = budget;
        save_decimal(&self.kv, KEY_BUDGET, budget)
    }

    pub fn set_min_balance(&mut self, min_balance: Decimal) -> Result<(), StoreError> {
        self.settings.min_balance = min_balance;
        save_decimal(&self.kv, KEY_MIN_BALANCE, min_balance)
    }

    pub fn set_chart_anchor(&mut self, anchor: NaiveDate) {
        self.navigator.anchor = anchor;
    }

    /// The period label follows the pie chart's granularity.
    pub fn set_chart_granularities(&mut self, charts: ChartGranularities) {
        self.charts = charts;
        self.navigator.granularity = charts.pie;
    }

    pub fn step_charts(&mut self, direction: i32) {
        self.navigator.step_month(direction);
    }

    pub fn set_summary_month(&mut self, anchor: NaiveDate) {
        self.summary_anchor = anchor;
    }

    pub fn step_summary(&mut self, direction: i32) {
        self.summary_anchor = shift_months(self.summary_anchor, direction);
    }

    pub fn summary(&self) -> MonthSummary {
        summarize(
            self.store.all(),
            self.summary_anchor.month(),
            self.summary_anchor.year(),
        )
    }

    pub fn trend(&self, granularity: Granularity) -> AggregateResult {
        time_bucket_totals(self.store.all(), granularity)
    }

    pub fn render(&self) -> Dashboard {
        let all = self.store.all();
        let anchor = self.navigator.anchor;

        let pie = category_totals(filter_for_chart(all, anchor, self.charts.pie));
        let bar = category_totals(filter_for_chart(all, anchor, self.charts.bar));
        let balance_nav = PeriodNavigator::new(anchor, self.charts.balance);
        let (start, end) = balance_nav.bounds();
        let balance = running_balance(all, start, end);

        let total = total_balance(all);
        let min = self.settings.min_balance;
        Dashboard {
            period: self.navigator.label(),
            pie,
            bar,
            balance,
            summary_month: period_label(self.summary_anchor, Granularity::Monthly),
            summary: self.summary(),
            settings: self.settings,
            total_balance: total,
            balance_low: !min.is_zero() && total < min,
        }
    }

    /// Evaluates both alerts for the summary month and returns the messages
    /// that fired. The budget alert only applies when the summary month is
    /// the month of `now`.
    pub fn check_alerts(&mut self, now: NaiveDateTime) -> Result<Vec<String>, StoreError> {
        let summary = self.summary();
        let mut fired = Vec::new();

        let today = now.date();
        if self.summary_anchor.month() == today.month()
            && self.summary_anchor.year() == today.year()
        {
            let check = evaluate_budget_alert(
                summary.expense,
                self.settings.budget,
                self.budget_alert_shown,
            );
            if check.fired {
                fired.push(budget_message(summary.expense, self.settings.budget));
            }
            self.budget_alert_shown = check.shown;
            save_flag(&self.kv, KEY_BUDGET_ALERT_SHOWN, check.shown)?;
        }

        let check = evaluate_min_balance_alert(
            summary.balance,
            self.settings.min_balance,
            self.min_balance_alert_shown,
        );
        if check.fired {
            fired.push(min_balance_message(
                summary.balance,
                self.settings.min_balance,
            ));
        }
        self.min_balance_alert_shown = check.shown;
        save_flag(&self.kv, KEY_MIN_BALANCE_ALERT_SHOWN, check.shown)?;

        for text in &fired {
            info!(alert = %text, "alert fired");
            self.push_notification(text.clone(), now)?;
        }
        Ok(fired)
    }

    /// Newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn push_notification(
        &mut self,
        text: String,
        now: NaiveDateTime,
    ) -> Result<(), StoreError> {
        self.notifications.insert(
            0,
            Notification {
                text,
                time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        );
        save_notifications(&self.kv, &self.notifications)
    }

    /// Returns whether `index` existed.
    pub fn delete_notification(&mut self, index: usize) -> Result<bool, StoreError> {
        if index >= self.notifications.len() {
            debug!(index, "no notification at index");
            return Ok(false);
        }
        self.notifications.remove(index);
        save_notifications(&self.kv, &self.notifications)?;
        Ok(true)
    }
}
