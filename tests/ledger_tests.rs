// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mybudget::api::{ApiError, BudgetApi};
use mybudget::ledger::Services;
use mybudget::models::{Account, Transaction, TransactionType};
use mybudget::prefs::Preferences;
use mybudget::rates::{RateProvider, RateTable};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory backend that counts list fetches and can be told to reject every
/// write with a conflict, the way the real backend reports errors.
#[derive(Default)]
struct FakeBackend {
    accounts: Mutex<Vec<Account>>,
    transactions: Mutex<Vec<Transaction>>,
    account_lists: AtomicUsize,
    transaction_lists: AtomicUsize,
    fail_writes: AtomicBool,
}

impl FakeBackend {
    fn check_writable(&self) -> Result<(), ApiError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApiError::Server {
                status: 409,
                message: "Account already exists.".to_string(),
            });
        }
        Ok(())
    }

    fn account_list_count(&self) -> usize {
        self.account_lists.load(Ordering::SeqCst)
    }

    fn transaction_list_count(&self) -> usize {
        self.transaction_lists.load(Ordering::SeqCst)
    }
}

impl BudgetApi for FakeBackend {
    fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.account_lists.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().clone())
    }

    fn get_account(&self, name: &str) -> Result<Account, ApiError> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: format!("Account {} not found.", name),
            })
    }

    fn create_account(&self, account: &Account) -> Result<Account, ApiError> {
        self.check_writable()?;
        self.accounts.lock().unwrap().push(account.clone());
        Ok(account.clone())
    }

    fn edit_account(&self, name: &str, account: &Account) -> Result<Account, ApiError> {
        self.check_writable()?;
        let mut accounts = self.accounts.lock().unwrap();
        let slot = accounts.iter_mut().find(|a| a.name == name).unwrap();
        *slot = account.clone();
        Ok(account.clone())
    }

    fn delete_account(&self, name: &str) -> Result<(), ApiError> {
        self.check_writable()?;
        self.accounts.lock().unwrap().retain(|a| a.name != name);
        Ok(())
    }

    fn delete_all_accounts(&self) -> Result<(), ApiError> {
        self.check_writable()?;
        self.accounts.lock().unwrap().clear();
        Ok(())
    }

    fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.transaction_lists.fetch_add(1, Ordering::SeqCst);
        Ok(self.transactions.lock().unwrap().clone())
    }

    fn transactions_for_account(&self, name: &str) -> Result<Vec<Transaction>, ApiError> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.account.name == name)
            .cloned()
            .collect())
    }

    fn get_transaction(&self, id: i64) -> Result<Transaction, ApiError> {
        self.transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == Some(id))
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                message: format!("Transaction {} not found.", id),
            })
    }

    fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError> {
        self.check_writable()?;
        let mut transactions = self.transactions.lock().unwrap();
        let mut created = tx.clone();
        created.id = Some(transactions.len() as i64 + 1);
        transactions.push(created.clone());
        Ok(created)
    }

    fn edit_transaction(&self, id: i64, tx: &Transaction) -> Result<Transaction, ApiError> {
        self.check_writable()?;
        let mut transactions = self.transactions.lock().unwrap();
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == Some(id))
            .unwrap();
        *slot = tx.clone();
        Ok(tx.clone())
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.check_writable()?;
        self.transactions
            .lock()
            .unwrap()
            .retain(|t| t.id != Some(id));
        Ok(())
    }

    fn delete_all_transactions(&self) -> Result<(), ApiError> {
        self.check_writable()?;
        self.transactions.lock().unwrap().clear();
        Ok(())
    }
}

fn draft_tx(account: &Account, amount: Decimal, ccy: &str) -> Transaction {
    Transaction {
        id: None,
        description: "groceries".to_string(),
        account: account.clone(),
        amount,
        currency: ccy.to_uppercase(),
        r#type: TransactionType::Debit,
        amount_in_base: Decimal::ZERO,
    }
}

/// Wire the full core against a fake backend. The feed URL points nowhere, so
/// rate emissions are driven by hand through the rates store.
fn connect(backend: Arc<FakeBackend>) -> Services {
    let provider =
        RateProvider::with_feed_url(Preferences::unavailable(), "http://127.0.0.1:9").unwrap();
    Services::connect(provider, backend)
}

fn seeded_backend() -> Arc<FakeBackend> {
    let backend = Arc::new(FakeBackend::default());
    backend
        .accounts
        .lock()
        .unwrap()
        .push(Account::new("Cash", Decimal::from(110), "USD"));
    backend
        .accounts
        .lock()
        .unwrap()
        .push(Account::new("Savings", Decimal::from(50), "GBP"));
    backend
}

#[test]
fn rate_emission_reloads_and_enriches_both_ledgers() {
    let backend = seeded_backend();
    let cash = backend.accounts.lock().unwrap()[0].clone();
    backend
        .transactions
        .lock()
        .unwrap()
        .push(Transaction {
            id: Some(1),
            ..draft_tx(&cash, Decimal::from(22), "USD")
        });
    let services = connect(Arc::clone(&backend));

    services
        .rates
        .rates()
        .set(RateTable::from([("usd".to_string(), 1.1)]));

    let accounts = services.accounts.accounts().get();
    assert_eq!(accounts[0].balance_in_base, Decimal::from(100));
    // GBP has no rate: face value.
    assert_eq!(accounts[1].balance_in_base, Decimal::from(50));
    assert_eq!(services.accounts.total().get(), Decimal::from(150));

    let transactions = services.transactions.transactions().get();
    assert_eq!(transactions[0].amount_in_base, Decimal::from(20));
}

#[test]
fn reloading_twice_with_unchanged_data_is_idempotent() {
    let backend = seeded_backend();
    let services = connect(Arc::clone(&backend));
    services
        .rates
        .rates()
        .set(RateTable::from([("usd".to_string(), 1.1)]));

    let accounts = services.accounts.accounts().get();
    let total = services.accounts.total().get();
    services.accounts.reload();
    assert_eq!(services.accounts.accounts().get(), accounts);
    assert_eq!(services.accounts.total().get(), total);
}

#[test]
fn transaction_write_reloads_both_collections_exactly_once() {
    let backend = seeded_backend();
    let services = connect(Arc::clone(&backend));
    let cash = services.accounts.get("Cash").unwrap();

    let tx_before = backend.transaction_list_count();
    let acct_before = backend.account_list_count();
    services
        .transactions
        .create(&draft_tx(&cash, Decimal::from(5), "USD"))
        .unwrap();
    assert_eq!(backend.transaction_list_count(), tx_before + 1);
    assert_eq!(backend.account_list_count(), acct_before + 1);

    let tx_before = backend.transaction_list_count();
    let acct_before = backend.account_list_count();
    services.transactions.delete(1).unwrap();
    assert_eq!(backend.transaction_list_count(), tx_before + 1);
    assert_eq!(backend.account_list_count(), acct_before + 1);
}

#[test]
fn account_write_never_reloads_transactions() {
    let backend = seeded_backend();
    let services = connect(Arc::clone(&backend));

    let tx_before = backend.transaction_list_count();
    let acct_before = backend.account_list_count();
    services
        .accounts
        .create(&Account::new("New", Decimal::from(1), "EUR"))
        .unwrap();
    services.accounts.delete("New").unwrap();
    assert_eq!(backend.transaction_list_count(), tx_before);
    assert_eq!(backend.account_list_count(), acct_before + 2);
}

#[test]
fn failed_write_surfaces_error_and_leaves_cache_untouched() {
    let backend = seeded_backend();
    let services = connect(Arc::clone(&backend));
    services
        .rates
        .rates()
        .set(RateTable::from([("usd".to_string(), 1.1)]));

    let accounts_before = services.accounts.accounts().get();
    let total_before = services.accounts.total().get();
    let transactions_before = services.transactions.transactions().get();
    let invalidations_before = services.transactions.invalidations().get();
    let acct_lists_before = backend.account_list_count();

    backend.fail_writes.store(true, Ordering::SeqCst);
    let cash = accounts_before[0].clone();

    let err = services
        .accounts
        .create(&Account::new("Dup", Decimal::ZERO, "EUR"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Account already exists.");
    services
        .transactions
        .create(&draft_tx(&cash, Decimal::from(5), "USD"))
        .unwrap_err();

    assert_eq!(services.accounts.accounts().get(), accounts_before);
    assert_eq!(services.accounts.total().get(), total_before);
    assert_eq!(services.transactions.transactions().get(), transactions_before);
    assert_eq!(
        services.transactions.invalidations().get(),
        invalidations_before
    );
    // No reload was triggered either.
    assert_eq!(backend.account_list_count(), acct_lists_before);
}

#[test]
fn passthrough_reads_do_not_touch_cached_state() {
    let backend = seeded_backend();
    let services = connect(Arc::clone(&backend));
    let acct_before = backend.account_list_count();
    let tx_before = backend.transaction_list_count();

    services.accounts.get("Cash").unwrap();
    services.transactions.for_account("Cash").unwrap();
    assert!(services.transactions.get(99).is_err());

    assert_eq!(backend.account_list_count(), acct_before);
    assert_eq!(backend.transaction_list_count(), tx_before);
}
