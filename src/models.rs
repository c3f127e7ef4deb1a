// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An account as stored by the backend. `name` is the primary key; there is no
/// surrogate id, so edit and delete are keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub balance: Decimal,
    pub currency: String,
    /// Balance expressed in the base currency. Derived locally, never sent.
    #[serde(skip)]
    pub balance_in_base: Decimal,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: Decimal, currency: &str) -> Self {
        Self {
            name: name.into(),
            balance,
            currency: currency.to_uppercase(),
            balance_in_base: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by the backend; absent on create payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub description: String,
    pub account: Account,
    pub amount: Decimal,
    pub currency: String,
    pub r#type: TransactionType,
    /// Amount expressed in the base currency. Derived locally, never sent.
    #[serde(skip)]
    pub amount_in_base: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Credit => write!(f, "CREDIT"),
            TransactionType::Debit => write!(f, "DEBIT"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREDIT" => Ok(TransactionType::Credit),
            "DEBIT" => Ok(TransactionType::Debit),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected credit or debit",
                other
            )),
        }
    }
}
