// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use tracing::debug;

use crate::models::{NewTransaction, Transaction, TransactionPatch};
use crate::storage::{KvStore, StoreError, load_transactions, save_transactions};

/// In-memory transaction list. Mutations do not persist on their own; callers
/// follow up with [`TransactionStore::persist`].
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    last_id: i64,
}

impl TransactionStore {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let last_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            transactions,
            last_id,
        }
    }

    pub fn load<S: KvStore + ?Sized>(kv: &S) -> Self {
        let store = Self::new(load_transactions(kv));
        debug!(count = store.transactions.len(), "loaded transactions");
        store
    }

    pub fn persist<S: KvStore + ?Sized>(&self, kv: &S) -> Result<(), StoreError> {
        save_transactions(kv, &self.transactions)
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Appends a record with a millisecond-timestamp id, bumped past the last
    /// issued id when two adds land in the same millisecond.
    pub fn add(&mut self, record: NewTransaction) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        self.transactions.push(Transaction {
            id,
            desc: record.desc,
            amount: record.amount,
            r#type: record.r#type,
            category: record.category,
            date: record.date,
        });
        debug!(id, "added transaction");
        id
    }

    /// Returns whether a record matched.
    pub fn update(&mut self, id: i64, patch: TransactionPatch) -> bool {
        let Some(t) = self.transactions.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update ignored, no such transaction");
            return false;
        };
        if let Some(desc) = patch.desc {
            t.desc = desc;
        }
        if let Some(amount) = patch.amount {
            t.amount = amount;
        }
        if let Some(kind) = patch.r#type {
            t.r#type = kind;
        }
        if let Some(category) = patch.category {
            t.category = category;
        }
        if let Some(date) = patch.date {
            t.date = date;
        }
        debug!(id, "updated transaction");
        true
    }

    /// Returns whether a record was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        debug!(id, removed, "remove transaction");
        removed
    }

    /// Newest first, by id.
    pub fn newest_first(&self) -> Vec<&Transaction> {
        let mut out: Vec<&Transaction> = self.transactions.iter().collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }
}
