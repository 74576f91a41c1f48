//! Page assembly: compose loader output, aggregates and market data into
//! the payloads the three views render.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use svodka_core::{greeting, mask_card_number, Transaction, DATETIME_FORMAT};

use crate::analysis::analyze_transactions;
use crate::cashback::profitable_cashback_categories;
use crate::market::{CurrencyRate, StockPrice};
use crate::spending::{spending_by_category, CategoryAggregate};

/// Payload of the main page.
#[derive(Debug, Clone, Serialize)]
pub struct MainPage {
    pub greeting: String,
    pub card: String,
    pub total_spent: f64,
    pub cashback: f64,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

/// A top-spend row as rendered on the main page.
#[derive(Debug, Clone, Serialize)]
pub struct TopTransaction {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Payload of the events page.
#[derive(Debug, Clone, Serialize)]
pub struct EventsPage {
    pub cashback_by_category: BTreeMap<String, f64>,
}

/// Payload of the reports page.
#[derive(Debug, Clone, Serialize)]
pub struct SpendingReport {
    pub category: String,
    pub periods: Vec<CategoryAggregate>,
}

/// Assemble the main page.
///
/// Market data arrives already fetched; this function only composes. An
/// unparseable `current_time` is surfaced as an error, while an invalid card
/// number degrades to its error message inside the payload.
pub fn build_main_page(
    transactions: &[Transaction],
    current_time: &str,
    card_number: &str,
    currency_rates: Vec<CurrencyRate>,
    stock_prices: Vec<StockPrice>,
) -> Result<MainPage> {
    let greeting = greeting(current_time)?.to_string();
    let card = mask_card_number(card_number).unwrap_or_else(|err| err.to_string());

    let summary = analyze_transactions(transactions);
    let top_transactions = summary
        .top_transactions
        .iter()
        .map(|txn| TopTransaction {
            date: txn.operation_date.format(DATETIME_FORMAT).to_string(),
            amount: txn.payment_amount.unwrap_or(0.0),
            category: txn.category.clone().unwrap_or_default(),
            description: txn.description.clone().unwrap_or_default(),
        })
        .collect();

    Ok(MainPage {
        greeting,
        card,
        total_spent: summary.total_spent,
        cashback: summary.cashback,
        top_transactions,
        currency_rates,
        stock_prices,
    })
}

/// Assemble the events page for a month given as page-request strings.
pub fn build_events_page(transactions: &[Transaction], year: &str, month: &str) -> EventsPage {
    EventsPage {
        cashback_by_category: profitable_cashback_categories(transactions, year, month),
    }
}

/// Assemble the trailing-window spending report for one category.
pub fn build_spending_report(
    transactions: &[Transaction],
    category: &str,
    date: Option<&str>,
) -> SpendingReport {
    SpendingReport {
        category: category.to_string(),
        periods: spending_by_category(transactions, category, date),
    }
}
