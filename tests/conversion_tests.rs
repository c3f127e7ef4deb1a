// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use mybudget::ledger::enrich_accounts;
use mybudget::models::Account;
use mybudget::rates::{RateTable, to_base};
use rust_decimal::Decimal;

fn table(entries: &[(&str, f64)]) -> RateTable {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn divides_by_a_usable_rate() {
    // 110 USD at 1.1 USD per EUR -> 100 EUR
    let rates = table(&[("usd", 1.1)]);
    let res = to_base(Decimal::new(110, 0), "USD", &rates);
    assert_eq!(res, Decimal::from(100));
}

#[test]
fn missing_rate_falls_back_to_raw_amount() {
    let rates = RateTable::new();
    let res = to_base(Decimal::new(4250, 2), "GBP", &rates);
    assert_eq!(res, Decimal::new(4250, 2));
}

#[test]
fn unusable_rates_fall_back_to_raw_amount() {
    let amount = Decimal::from(75);
    for rate in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let rates = table(&[("usd", rate)]);
        assert_eq!(to_base(amount, "USD", &rates), amount);
    }
}

#[test]
fn rate_lookup_is_case_insensitive_on_the_currency() {
    let rates = table(&[("usd", 2.0)]);
    assert_eq!(to_base(Decimal::from(10), "usd", &rates), Decimal::from(5));
    assert_eq!(to_base(Decimal::from(10), "USD", &rates), Decimal::from(5));
}

#[test]
fn enrichment_sums_converted_balances() {
    let rates = table(&[("usd", 1.1)]);
    let accounts = vec![
        Account::new("Cash", Decimal::from(110), "USD"),
        // No GBP rate: counted at face value.
        Account::new("Savings", Decimal::from(50), "GBP"),
    ];
    let (enriched, total) = enrich_accounts(accounts, &rates);
    assert_eq!(enriched[0].balance_in_base, Decimal::from(100));
    assert_eq!(enriched[1].balance_in_base, Decimal::from(50));
    assert_eq!(total, Decimal::from(150));
    // Native fields are untouched by enrichment.
    assert_eq!(enriched[0].balance, Decimal::from(110));
    assert_eq!(enriched[0].currency, "USD");
}

#[test]
fn enrichment_is_idempotent() {
    let rates = table(&[("usd", 1.1), ("gbp", 0.85)]);
    let accounts = vec![
        Account::new("Cash", Decimal::from(110), "USD"),
        Account::new("Abroad", Decimal::new(1700, 1), "GBP"),
    ];
    let (once, total_once) = enrich_accounts(accounts, &rates);
    let (twice, total_twice) = enrich_accounts(once.clone(), &rates);
    assert_eq!(once, twice);
    assert_eq!(total_once, total_twice);
}
