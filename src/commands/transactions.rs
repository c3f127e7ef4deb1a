// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Services;
use crate::models::{Transaction, TransactionType};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rust_decimal::Decimal;

pub fn handle(services: &Services, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(services, sub)?,
        Some(("for-account", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let transactions = services.transactions.for_account(name)?;
            print_rows(&transactions);
        }
        Some(("get", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let tx = services.transactions.get(id)?;
            print_rows(std::slice::from_ref(&tx));
        }
        Some(("add", sub)) => add(services, sub)?,
        Some(("edit", sub)) => edit(services, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            services.transactions.delete(id)?;
            println!("Removed transaction {}", id);
        }
        Some(("clear", _)) => {
            services.transactions.delete_all()?;
            println!("Removed all transactions");
        }
        _ => {}
    }
    Ok(())
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = parse_decimal(s)?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be positive.");
    }
    Ok(amount)
}

fn add(services: &Services, sub: &clap::ArgMatches) -> Result<()> {
    let account_name = sub.get_one::<String>("account").unwrap();
    let description = sub.get_one::<String>("description").unwrap().clone();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let currency = sub.get_one::<String>("currency").unwrap().to_uppercase();
    let r#type: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;

    let account = services.accounts.get(account_name)?;
    let tx = Transaction {
        id: None,
        description,
        account,
        amount,
        currency,
        r#type,
        amount_in_base: Decimal::ZERO,
    };
    let created = services.transactions.create(&tx)?;
    println!(
        "Recorded {} {} '{}' on '{}'",
        created.r#type,
        fmt_money(&created.amount, &created.currency),
        created.description,
        account_name
    );
    Ok(())
}

fn edit(services: &Services, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut tx = services.transactions.get(id)?;
    if let Some(name) = sub.get_one::<String>("account") {
        tx.account = services.accounts.get(name)?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        tx.description = description.clone();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        tx.amount = parse_amount(amount)?;
    }
    if let Some(ccy) = sub.get_one::<String>("currency") {
        tx.currency = ccy.to_uppercase();
    }
    if let Some(t) = sub.get_one::<String>("type") {
        tx.r#type = t.parse()?;
    }
    services.transactions.edit(id, &tx)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(services: &Services, sub: &clap::ArgMatches) -> Result<()> {
    let transactions = services.transactions.transactions().get();
    if maybe_print_json(sub.get_flag("json"), &transactions)? {
        return Ok(());
    }
    print_rows(&transactions);
    Ok(())
}

fn print_rows(transactions: &[Transaction]) {
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|t| {
            vec![
                t.id.map(|id| id.to_string()).unwrap_or_default(),
                t.description.clone(),
                t.account.name.clone(),
                t.r#type.to_string(),
                fmt_money(&t.amount, &t.currency),
                t.amount_in_base.round_dp(2).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Description", "Account", "Type", "Amount", "In base"],
            rows
        )
    );
}
