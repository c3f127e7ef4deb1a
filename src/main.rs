// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::sync::Arc;

use mybudget::api::{BudgetApi, HttpBackend};
use mybudget::ledger::Services;
use mybudget::prefs::Preferences;
use mybudget::rates::RateProvider;
use mybudget::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let matches = cli::build_cli().get_matches();
    let backend_url = matches.get_one::<String>("backend").unwrap();

    let rates = RateProvider::new(Preferences::open())?;
    rates.load_currencies();
    rates.refresh_rates();

    let api: Arc<dyn BudgetApi> = Arc::new(HttpBackend::new(backend_url)?);
    let services = Services::connect(rates, api);

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(&services, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&services, sub)?,
        Some(("currency", sub)) => commands::currency::handle(&services, sub)?,
        Some(("summary", _)) => commands::summary::handle(&services)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
