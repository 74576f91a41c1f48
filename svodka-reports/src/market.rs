//! Market snapshot collaborators: currency rates and stock prices.
//!
//! Both collaborators own their wire formats; callers wanting timeouts or
//! retries wrap these calls themselves.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::round2;

const EXCHANGE_API_URL: &str = "https://api.apilayer.com/exchangerates_data/latest";
const STOCKS_API_URL: &str = "https://financialmodelingprep.com/api/v3/stock/list";

/// RUB price of one unit of a watched currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: f64,
}

/// Latest price of a watched stock symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
}

/// One row of the exchange-wide stock listing.
#[derive(Debug, Clone, Deserialize)]
pub struct StockListing {
    pub symbol: String,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    exchange_api_key: String,
    stocks_api_key: String,
}

impl MarketClient {
    pub fn new(exchange_api_key: impl Into<String>, stocks_api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            exchange_api_key: exchange_api_key.into(),
            stocks_api_key: stocks_api_key.into(),
        }
    }

    /// Latest RUB rate for each currency in the watch-list, in order.
    pub async fn currency_rates(&self, currencies: &[String]) -> Result<Vec<CurrencyRate>> {
        let mut rates = Vec::with_capacity(currencies.len());
        for code in currencies {
            rates.push(CurrencyRate {
                currency: code.clone(),
                rate: self.rub_rate(code).await?,
            });
        }
        Ok(rates)
    }

    /// RUB-equivalent of `amount` units of `currency_code`.
    pub async fn convert(&self, currency_code: &str, amount: f64) -> Result<f64> {
        Ok(round2(self.rub_rate(currency_code).await? * amount))
    }

    async fn rub_rate(&self, code: &str) -> Result<f64> {
        #[derive(Deserialize)]
        struct Resp {
            #[serde(default)]
            rates: HashMap<String, f64>,
        }

        let resp = self
            .http
            .get(EXCHANGE_API_URL)
            .query(&[("symbols", "RUB"), ("base", code)])
            .header("apikey", &self.exchange_api_key)
            .send()
            .await
            .with_context(|| format!("requesting RUB rate for {code}"))?;
        if !resp.status().is_success() {
            bail!("exchange API returned {} for {code}", resp.status());
        }

        let body: Resp = resp
            .json()
            .await
            .with_context(|| format!("decoding exchange API response for {code}"))?;
        let rate = body
            .rates
            .get("RUB")
            .copied()
            .with_context(|| format!("exchange API response for {code} has no RUB rate"))?;
        Ok(round2(rate))
    }

    /// Latest price for each watched symbol, in watch-list order.
    ///
    /// The API serves one exchange-wide listing; symbols it does not carry
    /// are omitted from the snapshot.
    pub async fn stock_prices(&self, symbols: &[String]) -> Result<Vec<StockPrice>> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let listing = self.stock_listing().await?;
        Ok(pick_stock_prices(&listing, symbols))
    }

    /// Latest price for a single symbol.
    pub async fn stock_price(&self, symbol: &str) -> Result<f64> {
        let listing = self.stock_listing().await?;
        let picked = pick_stock_prices(&listing, &[symbol.to_string()]);
        match picked.first() {
            Some(quote) => Ok(quote.price),
            None => bail!("stock listing has no symbol {symbol}"),
        }
    }

    async fn stock_listing(&self) -> Result<Vec<StockListing>> {
        let resp = self
            .http
            .get(STOCKS_API_URL)
            .query(&[("apikey", &self.stocks_api_key)])
            .send()
            .await
            .context("requesting stock listing")?;
        if !resp.status().is_success() {
            bail!("stocks API returned {}", resp.status());
        }
        resp.json().await.context("decoding stock listing")
    }
}

/// Filter the exchange-wide listing down to the watched symbols.
pub fn pick_stock_prices(listing: &[StockListing], symbols: &[String]) -> Vec<StockPrice> {
    symbols
        .iter()
        .filter_map(|symbol| {
            listing.iter().find(|row| &row.symbol == symbol).map(|row| StockPrice {
                stock: symbol.clone(),
                price: row.price,
            })
        })
        .collect()
}
