use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataSection,
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
    /// Statement export to report over.
    pub operations: PathBuf,
    /// Watch-lists for the market snapshot.
    pub user_settings: PathBuf,
    /// Where the spending report is written.
    pub report_output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiSection {
    pub exchange_api_key: Option<String>,
    pub stocks_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataSection {
                operations: PathBuf::from("data/operations.csv"),
                user_settings: PathBuf::from("data/user_settings.json"),
                report_output: PathBuf::from("reports.json"),
            },
            api: ApiSection::default(),
        }
    }
}

pub fn svodka_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".svodka"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(svodka_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(&Config::default()).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Key for the currency-rate API: environment first, then config.
pub fn exchange_api_key(config: &Config) -> Result<String> {
    if let Ok(key) = std::env::var("EXCHANGE_API_KEY") {
        return Ok(key);
    }
    config.api.exchange_api_key.clone().ok_or_else(|| {
        anyhow!("missing exchange API key; set EXCHANGE_API_KEY or api.exchange_api_key in config.toml")
    })
}

/// Key for the stock-price API: environment first, then config.
pub fn stocks_api_key(config: &Config) -> Result<String> {
    if let Ok(key) = std::env::var("STOCKS_API_KEY") {
        return Ok(key);
    }
    config.api.stocks_api_key.clone().ok_or_else(|| {
        anyhow!("missing stocks API key; set STOCKS_API_KEY or api.stocks_api_key in config.toml")
    })
}
