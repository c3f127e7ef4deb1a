// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiError, BudgetApi};
use crate::models::Transaction;
use crate::rates::{RateTable, to_base};
use crate::store::Store;
use std::sync::Arc;

/// Enrich every transaction with its base-currency amount, keyed by the
/// transaction's own currency (not its account's).
pub fn enrich_transactions(mut transactions: Vec<Transaction>, rates: &RateTable) -> Vec<Transaction> {
    for tx in &mut transactions {
        tx.amount_in_base = to_base(tx.amount, &tx.currency, rates);
    }
    transactions
}

/// Owns the cached transaction collection.
///
/// Same read/write error split as the account ledger. Every successful write
/// additionally fires the invalidation signal so the account ledger re-fetches
/// balances; they are recomputed server-side and must never be simulated
/// locally.
#[derive(Clone)]
pub struct TransactionLedger {
    api: Arc<dyn BudgetApi>,
    rates: Store<RateTable>,
    transactions: Store<Vec<Transaction>>,
    invalidations: Store<u64>,
}

impl TransactionLedger {
    pub fn new(api: Arc<dyn BudgetApi>, rates: Store<RateTable>) -> Self {
        Self {
            api,
            rates,
            transactions: Store::new(Vec::new()),
            invalidations: Store::new(0),
        }
    }

    pub fn transactions(&self) -> &Store<Vec<Transaction>> {
        &self.transactions
    }

    /// Fires once after every successful transaction write.
    pub fn invalidations(&self) -> &Store<u64> {
        &self.invalidations
    }

    /// Reload on every rate-table emission, including the current one.
    pub fn watch_rates(&self) {
        let ledger = self.clone();
        self.rates.subscribe(move |_| ledger.reload());
    }

    /// Fetch the full transaction list, enrich it against the current rate
    /// table, and republish the collection. No aggregate is derived here.
    pub fn reload(&self) {
        match self.api.list_transactions() {
            Ok(fetched) => {
                let rates = self.rates.get();
                self.transactions.set(enrich_transactions(fetched, &rates));
            }
            Err(err) => tracing::warn!(error = %err, "failed to reload transactions"),
        }
    }

    /// Passthrough fetch; does not touch cached state.
    pub fn for_account(&self, name: &str) -> Result<Vec<Transaction>, ApiError> {
        self.api.transactions_for_account(name)
    }

    /// Passthrough fetch by id; does not touch cached state.
    pub fn get(&self, id: i64) -> Result<Transaction, ApiError> {
        self.api.get_transaction(id)
    }

    pub fn create(&self, tx: &Transaction) -> Result<Transaction, ApiError> {
        let created = self.api.create_transaction(tx)?;
        self.invalidate();
        Ok(created)
    }

    pub fn edit(&self, id: i64, tx: &Transaction) -> Result<Transaction, ApiError> {
        let edited = self.api.edit_transaction(id, tx)?;
        self.invalidate();
        Ok(edited)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete_transaction(id)?;
        self.invalidate();
        Ok(())
    }

    pub fn delete_all(&self) -> Result<(), ApiError> {
        self.api.delete_all_transactions()?;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&self) {
        self.reload();
        self.invalidations.set(self.invalidations.get() + 1);
    }
}
