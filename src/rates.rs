// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::prefs::Preferences;
use crate::store::Store;
use crate::utils::http_client;
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use std::collections::HashMap;

const FEED_URL: &str = "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1";

/// Conversion factors against the base currency, keyed by lowercase code.
/// Always replaced wholesale, never merged.
pub type RateTable = HashMap<String, f64>;

/// Convert `amount` into the base currency.
///
/// Divides by the table entry for `currency` when that rate exists, is finite
/// and positive, and survives the decimal conversion; otherwise the amount is
/// returned unchanged (a missing or unusable rate means 1:1, not an error).
pub fn to_base(amount: Decimal, currency: &str, rates: &RateTable) -> Decimal {
    match rates.get(&currency.to_lowercase()) {
        Some(&rate) if rate.is_finite() && rate > 0.0 => match Decimal::from_f64(rate) {
            Some(divisor) if !divisor.is_zero() => amount / divisor,
            _ => amount,
        },
        _ => amount,
    }
}

/// `{feed}/currencies/{code}.json` payload: an as-of date plus the rate table
/// nested under the base currency's own (lowercase) code.
#[derive(Debug, Deserialize)]
struct RatePayload {
    date: String,
    #[serde(flatten)]
    tables: HashMap<String, RateTable>,
}

impl RatePayload {
    fn table_for(mut self, base: &str) -> Option<(String, RateTable)> {
        let table = self.tables.remove(&base.to_lowercase())?;
        Some((self.date, table))
    }
}

/// Owns the base-currency selection and the active rate table.
///
/// All four pieces of state are latest-value stores; downstream ledgers
/// subscribe to `rates` and reload on every emission. Read failures are
/// soft: logged, with the previous state either kept (rate table) or replaced
/// by a safe empty default (currency directory). Callers never see them.
pub struct RateProvider {
    client: reqwest::blocking::Client,
    feed_url: String,
    prefs: Preferences,
    currencies: Store<Vec<String>>,
    default_currency: Store<String>,
    rates: Store<RateTable>,
    rate_date: Store<String>,
}

impl RateProvider {
    pub fn new(prefs: Preferences) -> Result<Self> {
        Self::with_feed_url(prefs, FEED_URL)
    }

    pub fn with_feed_url(prefs: Preferences, feed_url: &str) -> Result<Self> {
        let default_currency = prefs.default_currency();
        Ok(Self {
            client: http_client()?,
            feed_url: feed_url.trim_end_matches('/').to_string(),
            prefs,
            currencies: Store::new(Vec::new()),
            default_currency: Store::new(default_currency),
            rates: Store::new(RateTable::new()),
            rate_date: Store::new(String::new()),
        })
    }

    pub fn currencies(&self) -> &Store<Vec<String>> {
        &self.currencies
    }

    pub fn default_currency(&self) -> &Store<String> {
        &self.default_currency
    }

    pub fn rates(&self) -> &Store<RateTable> {
        &self.rates
    }

    pub fn rate_date(&self) -> &Store<String> {
        &self.rate_date
    }

    /// Fetch the currency directory and republish the uppercased code list.
    /// On failure an empty list is published instead.
    pub fn load_currencies(&self) {
        let url = format!("{}/currencies.json", self.feed_url);
        let fetch = || -> Result<Vec<String>, reqwest::Error> {
            let directory: HashMap<String, String> =
                self.client.get(&url).send()?.error_for_status()?.json()?;
            let mut codes: Vec<String> = directory.keys().map(|c| c.to_uppercase()).collect();
            codes.sort();
            Ok(codes)
        };
        match fetch() {
            Ok(codes) => self.currencies.set(codes),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load currency directory");
                self.currencies.set(Vec::new());
            }
        }
    }

    /// Adopt a new base currency: persist it, republish it, then fetch its
    /// rate table.
    ///
    /// When preference storage is unavailable (or the write fails) the whole
    /// operation is a no-op and the previous currency stays active. Kept
    /// as-is from the original client; flagged for product review.
    pub fn set_default_currency(&self, code: &str) {
        if !self.prefs.is_available() {
            return;
        }
        let code = code.to_uppercase();
        if let Err(err) = self.prefs.set_default_currency(&code) {
            tracing::warn!(error = %err, "failed to persist default currency");
            return;
        }
        self.default_currency.set(code);
        self.refresh_rates();
    }

    /// Fetch the rate table for the current base currency and republish the
    /// as-of date and table. On any failure the previous date and table stay
    /// in place; stale rates beat no rates.
    pub fn refresh_rates(&self) {
        let base = self.default_currency.get();
        let url = format!("{}/currencies/{}.json", self.feed_url, base.to_lowercase());
        let fetch = || -> Result<RatePayload, reqwest::Error> {
            self.client.get(&url).send()?.error_for_status()?.json()
        };
        match fetch() {
            Ok(payload) => match payload.table_for(&base) {
                Some((date, table)) => {
                    self.rate_date.set(date);
                    self.rates.set(table);
                }
                None => {
                    tracing::warn!(base = %base, "rate payload missing table for base currency");
                }
            },
            Err(err) => {
                tracing::warn!(base = %base, error = %err, "failed to refresh rates");
            }
        }
    }
}
