// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Services;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(services: &Services, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            for code in services.rates.currencies().get() {
                println!("{}", code);
            }
        }
        Some(("set-base", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap();
            services.rates.set_default_currency(ccy);
            // Reports the active value, which is unchanged when preference
            // storage is unavailable.
            println!(
                "Base currency is {}",
                services.rates.default_currency().get()
            );
        }
        Some(("rates", _)) => print_rates(services),
        Some(("refresh", _)) => {
            services.rates.refresh_rates();
            print_rates(services);
        }
        _ => {}
    }
    Ok(())
}

fn print_rates(services: &Services) {
    let base = services.rates.default_currency().get();
    let date = services.rates.rate_date().get();
    let table = services.rates.rates().get();
    let mut rows: Vec<Vec<String>> = table
        .iter()
        .map(|(code, rate)| vec![code.to_uppercase(), rate.to_string()])
        .collect();
    rows.sort();
    println!("Base {} (as of {})", base, date);
    println!("{}", pretty_table(&["Currency", "Rate"], rows));
}
