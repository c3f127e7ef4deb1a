// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Services;
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;

/// The accounts overview: every balance in its native currency and in the
/// base currency, plus the derived total.
pub fn handle(services: &Services) -> Result<()> {
    let base = services.rates.default_currency().get();
    let date = services.rates.rate_date().get();
    let accounts = services.accounts.accounts().get();
    let total = services.accounts.total().get();

    let header = format!("Balance ({})", base);
    let rows: Vec<Vec<String>> = accounts
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                fmt_money(&a.balance, &a.currency),
                fmt_money(&a.balance_in_base, &base),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Name", "Balance", &header], rows));
    if !date.is_empty() {
        println!("Rates as of {}", date);
    }
    println!("Total: {}", fmt_money(&total, &base));
    Ok(())
}
