// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::DEFAULT_BACKEND_URL;
use clap::{Arg, ArgAction, Command, crate_version, value_parser};

pub fn build_cli() -> Command {
    Command::new("mybudget")
        .version(crate_version!())
        .about("Multi-currency personal budget client")
        .arg(
            Arg::new("backend")
                .long("backend")
                .global(true)
                .value_name("URL")
                .default_value(DEFAULT_BACKEND_URL)
                .help("Base URL of the budget backend"),
        )
        .subcommand(account_cmd())
        .subcommand(tx_cmd())
        .subcommand(currency_cmd())
        .subcommand(Command::new("summary").about("Accounts with base-currency balances and total"))
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print as JSON")
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage accounts")
        .subcommand(Command::new("list").about("List accounts").arg(json_flag()))
        .subcommand(
            Command::new("get")
                .about("Fetch one account")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("add")
                .about("Create an account")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("balance").required(true))
                .arg(Arg::new("currency").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit an account")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("balance").long("balance").value_name("AMOUNT"))
                .arg(Arg::new("currency").long("currency").value_name("CODE")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an account")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(Command::new("clear").about("Delete all accounts"))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Manage transactions")
        .subcommand(Command::new("list").about("List transactions").arg(json_flag()))
        .subcommand(
            Command::new("for-account")
                .about("List transactions of one account")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("get")
                .about("Fetch one transaction")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("account").long("account").short('a').required(true))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .required(true),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("currency").long("currency").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("credit or debit"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit a transaction")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64)))
                .arg(Arg::new("account").long("account").value_name("NAME"))
                .arg(Arg::new("description").long("description").value_name("TEXT"))
                .arg(Arg::new("amount").long("amount").value_name("AMOUNT"))
                .arg(Arg::new("currency").long("currency").value_name("CODE"))
                .arg(Arg::new("type").long("type").value_name("TYPE")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
        .subcommand(Command::new("clear").about("Delete all transactions"))
}

fn currency_cmd() -> Command {
    Command::new("currency")
        .about("Base currency and exchange rates")
        .subcommand(Command::new("list").about("List known currency codes"))
        .subcommand(
            Command::new("set-base")
                .about("Set the base currency")
                .arg(Arg::new("currency").required(true)),
        )
        .subcommand(Command::new("rates").about("Show the active rate table"))
        .subcommand(Command::new("refresh").about("Re-fetch rates for the base currency"))
}
