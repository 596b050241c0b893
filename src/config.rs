//! Runtime configuration.
//!
//! Settings come from an optional JSON file; every field has a default, so an
//! empty object (or no file at all) yields a working demo setup.

use crate::application::engine::DEFAULT_NOTIFY_TIMEOUT;
use crate::domain::account::Account;
use crate::domain::money::{Currency, ExchangeRate};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Rupees per US dollar.
    pub exchange_rate: ExchangeRate,
    /// Currency amounts are shown and entered in at startup.
    pub display_currency: Currency,
    /// Upper bound on a single notifier call.
    pub notify_timeout_ms: u64,
    /// `From` header of written notices.
    pub sender: String,
    pub account: Account,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            exchange_rate: ExchangeRate::default(),
            display_currency: Currency::BASE,
            notify_timeout_ms: DEFAULT_NOTIFY_TIMEOUT.as_millis() as u64,
            sender: "Super-Market <orders@supermarket.example>".to_string(),
            account: Account::default(),
        }
    }
}

impl StoreConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms)
    }
}
