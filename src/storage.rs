// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value persistence.
//!
//! Everything the app remembers lives under a handful of string keys. Reads
//! never fail: a missing key, a backend error or a malformed value all fall
//! back to the empty/zero default. Writes replace the whole value in a single
//! statement.

use std::cell::RefCell;
use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::{Notification, Transaction};

pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_BUDGET: &str = "budget";
pub const KEY_MIN_BALANCE: &str = "minBalance";
pub const KEY_NOTIFICATIONS: &str = "notifications";
pub const KEY_BUDGET_ALERT_SHOWN: &str = "budgetAlertShown";
pub const KEY_MIN_BALANCE_ALERT_SHOWN: &str = "minBalanceAlertShown";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key-value backend failed: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("could not encode value for '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl KvStore for Connection {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v: Option<String> = self
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (k, v) in entries {
            store
                .entries
                .borrow_mut()
                .insert((*k).to_string(), (*v).to_string());
        }
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn read_soft<S: KvStore + ?Sized>(kv: &S, key: &str) -> Option<String> {
    match kv.get(key) {
        Ok(v) => v,
        Err(err) => {
            warn!(key, %err, "failed to read key, using default");
            None
        }
    }
}

/// Loads the transaction list. Records that do not decode are dropped.
pub fn load_transactions<S: KvStore + ?Sized>(kv: &S) -> Vec<Transaction> {
    let Some(raw) = read_soft(kv, KEY_TRANSACTIONS) else {
        return Vec::new();
    };
    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("stored transactions are not a JSON array, starting empty");
            return Vec::new();
        }
        Err(err) => {
            warn!(%err, "stored transactions are not valid JSON, starting empty");
            return Vec::new();
        }
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Transaction>(item) {
            Ok(t) => Some(t),
            Err(err) => {
                warn!(%err, "skipping undecodable transaction record");
                None
            }
        })
        .collect()
}

pub fn save_transactions<S: KvStore + ?Sized>(
    kv: &S,
    transactions: &[Transaction],
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(transactions).map_err(|source| StoreError::Encode {
        key: KEY_TRANSACTIONS,
        source,
    })?;
    kv.set(KEY_TRANSACTIONS, &payload)
}

/// Numeric settings; missing or unparseable values read as zero.
pub fn load_decimal<S: KvStore + ?Sized>(kv: &S, key: &str) -> Decimal {
    read_soft(kv, key)
        .and_then(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(trimmed))
                .map_err(|err| warn!(key, value = trimmed, %err, "malformed number, using 0"))
                .ok()
        })
        .unwrap_or(Decimal::ZERO)
}

pub fn save_decimal<S: KvStore + ?Sized>(
    kv: &S,
    key: &str,
    value: Decimal,
) -> Result<(), StoreError> {
    kv.set(key, &value.normalize().to_string())
}

pub fn load_flag<S: KvStore + ?Sized>(kv: &S, key: &str) -> bool {
    read_soft(kv, key).as_deref() == Some("true")
}

pub fn save_flag<S: KvStore + ?Sized>(kv: &S, key: &str, value: bool) -> Result<(), StoreError> {
    kv.set(key, if value { "true" } else { "false" })
}

pub fn load_notifications<S: KvStore + ?Sized>(kv: &S) -> Vec<Notification> {
    let Some(raw) = read_soft(kv, KEY_NOTIFICATIONS) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(err) => {
            warn!(%err, "stored notifications are malformed, starting empty");
            Vec::new()
        }
    }
}

pub fn save_notifications<S: KvStore + ?Sized>(
    kv: &S,
    notifications: &[Notification],
) -> Result<(), StoreError> {
    let payload =
        serde_json::to_string(notifications).map_err(|source| StoreError::Encode {
            key: KEY_NOTIFICATIONS,
            source,
        })?;
    kv.set(KEY_NOTIFICATIONS, &payload)
}
