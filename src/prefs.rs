// Copyright (c) 2025 MyBudget contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("org.mybudget", "MyBudget", "mybudget"));

/// Currency adopted when no preference has ever been stored.
pub const FALLBACK_CURRENCY: &str = "EUR";

const PREFS_FILE: &str = "preferences.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefData {
    default_currency: Option<String>,
}

/// The single persisted user preference: the default (base) currency code.
///
/// Stored as a small JSON file in the platform data dir. On platforms where no
/// data dir can be resolved the store is *unavailable*: reads fall back to
/// [`FALLBACK_CURRENCY`] and writes fail.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: Option<PathBuf>,
}

impl Preferences {
    /// Resolve the platform preference file, creating its directory.
    pub fn open() -> Self {
        let path = ProjectDirs::from(APP.0, APP.1, APP.2).and_then(|proj| {
            let dir = proj.data_dir();
            fs::create_dir_all(dir).ok()?;
            Some(dir.join(PREFS_FILE))
        });
        Self { path }
    }

    /// A preference store backed by an explicit file. Used by tests.
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// A preference store with no backing storage. Writes are refused.
    pub fn unavailable() -> Self {
        Self { path: None }
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }

    /// The stored default currency, or [`FALLBACK_CURRENCY`] when nothing has
    /// been stored or storage is unavailable.
    pub fn default_currency(&self) -> String {
        self.read()
            .default_currency
            .unwrap_or_else(|| FALLBACK_CURRENCY.to_string())
    }

    pub fn set_default_currency(&self, code: &str) -> Result<()> {
        let Some(path) = &self.path else {
            bail!("preference storage is unavailable");
        };
        let mut data = self.read();
        data.default_currency = Some(code.to_uppercase());
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(path, json).with_context(|| format!("Write preferences to {}", path.display()))
    }

    fn read(&self) -> PrefData {
        let Some(path) = &self.path else {
            return PrefData::default();
        };
        fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }
}
