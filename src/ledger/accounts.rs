// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiError, BudgetApi};
use crate::models::Account;
use crate::rates::{RateTable, to_base};
use crate::store::Store;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Enrich every account with its base-currency balance and compute the total
/// over the enriched balances.
pub fn enrich_accounts(mut accounts: Vec<Account>, rates: &RateTable) -> (Vec<Account>, Decimal) {
    for account in &mut accounts {
        account.balance_in_base = to_base(account.balance, &account.currency, rates);
    }
    let total = accounts.iter().map(|a| a.balance_in_base).sum();
    (accounts, total)
}

/// Owns the cached account collection and the derived total balance.
///
/// Reads are soft-fail: a failed reload is logged and the cached collection
/// keeps its previous value. Writes are hard-fail: the error goes back to the
/// caller and the cache is untouched; a successful write always triggers
/// exactly one full reload, never a local patch.
#[derive(Clone)]
pub struct AccountLedger {
    api: Arc<dyn BudgetApi>,
    rates: Store<RateTable>,
    accounts: Store<Vec<Account>>,
    total: Store<Decimal>,
}

impl AccountLedger {
    pub fn new(api: Arc<dyn BudgetApi>, rates: Store<RateTable>) -> Self {
        Self {
            api,
            rates,
            accounts: Store::new(Vec::new()),
            total: Store::new(Decimal::ZERO),
        }
    }

    pub fn accounts(&self) -> &Store<Vec<Account>> {
        &self.accounts
    }

    pub fn total(&self) -> &Store<Decimal> {
        &self.total
    }

    /// Reload on every rate-table emission, including the current one.
    pub fn watch_rates(&self) {
        let ledger = self.clone();
        self.rates.subscribe(move |_| ledger.reload());
    }

    /// Reload whenever `signal` fires. Used for the transaction-mutation
    /// dependency: transaction writes change balances server-side.
    pub fn watch_invalidations(&self, signal: &Store<u64>) {
        let ledger = self.clone();
        signal.subscribe(move |_| ledger.reload());
    }

    /// Fetch the full account list, enrich it against the current rate table,
    /// and republish the collection and the derived total.
    pub fn reload(&self) {
        match self.api.list_accounts() {
            Ok(fetched) => {
                let rates = self.rates.get();
                let (accounts, total) = enrich_accounts(fetched, &rates);
                self.accounts.set(accounts);
                self.total.set(total);
            }
            Err(err) => tracing::warn!(error = %err, "failed to reload accounts"),
        }
    }

    /// Passthrough fetch by name; does not touch cached state.
    pub fn get(&self, name: &str) -> Result<Account, ApiError> {
        self.api.get_account(name)
    }

    pub fn create(&self, account: &Account) -> Result<Account, ApiError> {
        let created = self.api.create_account(account)?;
        self.reload();
        Ok(created)
    }

    pub fn edit(&self, name: &str, account: &Account) -> Result<Account, ApiError> {
        let edited = self.api.edit_account(name, account)?;
        self.reload();
        Ok(edited)
    }

    pub fn delete(&self, name: &str) -> Result<(), ApiError> {
        self.api.delete_account(name)?;
        self.reload();
        Ok(())
    }

    pub fn delete_all(&self) -> Result<(), ApiError> {
        self.api.delete_all_accounts()?;
        self.reload();
        Ok(())
    }
}
