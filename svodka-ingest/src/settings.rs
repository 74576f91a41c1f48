//! User watch-lists for the market snapshot on the main page.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Currencies and stock symbols the user wants quoted on the main page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserSettings {
    #[serde(default)]
    pub user_currencies: Vec<String>,
    #[serde(default)]
    pub user_stocks: Vec<String>,
}

pub fn load_user_settings(path: impl AsRef<Path>) -> Result<UserSettings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_user_settings(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_user_settings(raw: &str) -> Result<UserSettings> {
    Ok(serde_json::from_str(raw)?)
}
