// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod transactions;

pub use accounts::{AccountLedger, enrich_accounts};
pub use transactions::{TransactionLedger, enrich_transactions};

use crate::api::BudgetApi;
use crate::rates::RateProvider;
use std::sync::Arc;

/// The wired synchronization core.
///
/// All cross-component dependencies are declared here, once:
/// - both ledgers reload on every rate-table emission (which also performs
///   their initial load),
/// - the account ledger reloads on every transaction invalidation, since
///   transaction writes change balances server-side. Account writes never
///   invalidate transactions.
pub struct Services {
    pub rates: RateProvider,
    pub accounts: AccountLedger,
    pub transactions: TransactionLedger,
}

impl Services {
    pub fn connect(rates: RateProvider, api: Arc<dyn BudgetApi>) -> Self {
        let accounts = AccountLedger::new(Arc::clone(&api), rates.rates().clone());
        let transactions = TransactionLedger::new(api, rates.rates().clone());
        accounts.watch_rates();
        transactions.watch_rates();
        accounts.watch_invalidations(transactions.invalidations());
        Self {
            rates,
            accounts,
            transactions,
        }
    }
}
