//! Cashback earned per category over a single month.

use std::collections::BTreeMap;

use chrono::Datelike;
use regex::Regex;
use svodka_core::Transaction;

use crate::round2;

/// Cashback (1 unit per 100 spent) per category for the given month.
///
/// `year` must be a four-digit number and `month` 1-12, both as written in
/// the page request; anything else yields an empty ranking, never an error.
/// Only expenses (negative operation amounts) qualify.
pub fn profitable_cashback_categories(
    transactions: &[Transaction],
    year: &str,
    month: &str,
) -> BTreeMap<String, f64> {
    let Some((target_year, target_month)) = parse_year_month(year, month) else {
        tracing::warn!(year, month, "cashback ranking requested for invalid period");
        return BTreeMap::new();
    };

    let mut spent_by_category: BTreeMap<String, f64> = BTreeMap::new();
    for txn in transactions {
        if txn.operation_date.year() != target_year || txn.operation_date.month() != target_month {
            continue;
        }
        if !txn.is_expense() {
            continue;
        }
        let (Some(category), Some(amount)) = (txn.category.as_deref(), txn.operation_amount)
        else {
            continue;
        };
        *spent_by_category.entry(category.to_string()).or_insert(0.0) += amount.abs();
    }

    spent_by_category
        .into_iter()
        .map(|(category, spent)| (category, round2(spent / 100.0)))
        .collect()
}

fn parse_year_month(year: &str, month: &str) -> Option<(i32, u32)> {
    let four_digits = Regex::new(r"^\d{4}$").ok()?;
    if !four_digits.is_match(year.trim()) {
        return None;
    }
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}
