//! Commerce options
//!
//! User-facing switches that change how shops behave, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// User-configurable commerce options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommerceConfig {
    /// Haggle interactively; when false prices are settled at once with a 10% tax
    pub manual_haggle: bool,
    /// Give the home its full nominal capacity
    pub home_expansion: bool,
    /// Keep every shop door locked
    pub ironman_shops: bool,
    /// Notify the diary of purchases
    pub record_buy: bool,
    /// Notify the diary of sales
    pub record_sell: bool,
    /// One-in-N chance that an owner retires when the stock runs out
    pub shuffle_chance: u32,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            manual_haggle: true,
            home_expansion: false,
            ironman_shops: false,
            record_buy: true,
            record_sell: true,
            shuffle_chance: 21,
        }
    }
}

impl CommerceConfig {
    /// Parse options from a JSON document; absent keys keep their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
