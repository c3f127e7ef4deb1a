// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Account, Transaction};
use crate::utils::http_client;
use anyhow::Result;
use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status. `message` is the
    /// response body verbatim when it was plain text, or a generic message
    /// when it was a structured payload.
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// The budget backend, keyed the way the REST API is: accounts by name,
/// transactions by backend-assigned id.
pub trait BudgetApi: Send + Sync {
    fn list_accounts(&self) -> Result<Vec<Account>, ApiError>;
    fn get_account(&self, name: &str) -> Result<Account, ApiError>;
    fn create_account(&self, account: &Account) -> Result<Account, ApiError>;
    fn edit_account(&self, name: &str, account: &Account) -> Result<Account, ApiError>;
    fn delete_account(&self, name: &str) -> Result<(), ApiError>;
    fn delete_all_accounts(&self) -> Result<(), ApiError>;

    fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;
    fn transactions_for_account(&self, name: &str) -> Result<Vec<Transaction>, ApiError>;
    fn get_transaction(&self, id: i64) -> Result<Transaction, ApiError>;
    fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError>;
    fn edit_transaction(&self, id: i64, tx: &Transaction) -> Result<Transaction, ApiError>;
    fn delete_transaction(&self, id: i64) -> Result<(), ApiError>;
    fn delete_all_transactions(&self) -> Result<(), ApiError>;
}

pub struct HttpBackend {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn accounts_url(&self) -> String {
        format!("{}/accounts", self.base_url)
    }

    fn account_url(&self, name: &str) -> String {
        format!("{}/accounts/account/{}", self.base_url, name)
    }

    fn transactions_url(&self) -> String {
        format!("{}/transactions", self.base_url)
    }

    fn transaction_url(&self, id: i64) -> String {
        format!("{}/transactions/transaction/{}", self.base_url, id)
    }

    /// Turn a non-success response into [`ApiError::Server`]. The backend
    /// reports validation and conflict errors as plain-text bodies, which are
    /// surfaced verbatim; anything structured gets a generic message.
    fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let structured = serde_json::from_str::<serde_json::Value>(&body)
            .map(|v| v.is_object())
            .unwrap_or(false);
        let message = if structured || body.is_empty() {
            "something went wrong".to_string()
        } else {
            body
        };
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

impl BudgetApi for HttpBackend {
    fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let resp = Self::check(self.client.get(self.accounts_url()).send()?)?;
        Ok(resp.json()?)
    }

    fn get_account(&self, name: &str) -> Result<Account, ApiError> {
        let resp = Self::check(self.client.get(self.account_url(name)).send()?)?;
        Ok(resp.json()?)
    }

    fn create_account(&self, account: &Account) -> Result<Account, ApiError> {
        let resp = Self::check(self.client.post(self.accounts_url()).json(account).send()?)?;
        Ok(resp.json()?)
    }

    fn edit_account(&self, name: &str, account: &Account) -> Result<Account, ApiError> {
        let resp = Self::check(self.client.put(self.account_url(name)).json(account).send()?)?;
        Ok(resp.json()?)
    }

    fn delete_account(&self, name: &str) -> Result<(), ApiError> {
        Self::check(self.client.delete(self.account_url(name)).send()?)?;
        Ok(())
    }

    fn delete_all_accounts(&self) -> Result<(), ApiError> {
        Self::check(self.client.delete(self.accounts_url()).send()?)?;
        Ok(())
    }

    fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let resp = Self::check(self.client.get(self.transactions_url()).send()?)?;
        Ok(resp.json()?)
    }

    fn transactions_for_account(&self, name: &str) -> Result<Vec<Transaction>, ApiError> {
        let url = format!("{}/transactions/{}", self.base_url, name);
        let resp = Self::check(self.client.get(url).send()?)?;
        Ok(resp.json()?)
    }

    fn get_transaction(&self, id: i64) -> Result<Transaction, ApiError> {
        let resp = Self::check(self.client.get(self.transaction_url(id)).send()?)?;
        Ok(resp.json()?)
    }

    fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError> {
        let resp = Self::check(self.client.post(self.transactions_url()).json(tx).send()?)?;
        Ok(resp.json()?)
    }

    fn edit_transaction(&self, id: i64, tx: &Transaction) -> Result<Transaction, ApiError> {
        let resp = Self::check(self.client.put(self.transaction_url(id)).json(tx).send()?)?;
        Ok(resp.json()?)
    }

    fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        Self::check(self.client.delete(self.transaction_url(id)).send()?)?;
        Ok(())
    }

    fn delete_all_transactions(&self) -> Result<(), ApiError> {
        Self::check(self.client.delete(self.transactions_url()).send()?)?;
        Ok(())
    }
}
