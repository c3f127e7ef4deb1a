// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Services;
use crate::models::Account;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(services: &Services, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(services, sub)?,
        Some(("get", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let account = services.accounts.get(name)?;
            println!(
                "{} | {} | {}",
                account.name,
                fmt_money(&account.balance, &account.currency),
                account.currency
            );
        }
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
            let account = Account::new(name.clone(), balance, &ccy);
            services.accounts.create(&account)?;
            println!("Added account '{}' ({})", name, ccy);
        }
        Some(("edit", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let mut account = services.accounts.get(name)?;
            if let Some(balance) = sub.get_one::<String>("balance") {
                account.balance = parse_decimal(balance)?;
            }
            if let Some(ccy) = sub.get_one::<String>("currency") {
                account.currency = ccy.to_uppercase();
            }
            services.accounts.edit(name, &account)?;
            println!("Updated account '{}'", name);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            services.accounts.delete(name)?;
            println!("Removed account '{}'", name);
        }
        Some(("clear", _)) => {
            services.accounts.delete_all()?;
            println!("Removed all accounts");
        }
        _ => {}
    }
    Ok(())
}

fn list(services: &Services, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = services.accounts.accounts().get();
    if maybe_print_json(sub.get_flag("json"), &accounts)? {
        return Ok(());
    }
    let base = services.rates.default_currency().get();
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
    let header = format!("Balance ({})", base);
    println!("{}", pretty_table(&["Name", "Balance", &header], rows));
    Ok(())
}
