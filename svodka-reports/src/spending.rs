//! Category spend over a trailing three-month window.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use svodka_core::{Error, Transaction, DATE_FORMAT};

/// Length of the trailing window: three 30-day months. This matches the
/// report the bank ships, which does not subtract calendar months.
pub const TRAILING_WINDOW_DAYS: i64 = 90;

/// Spend in one category for one calendar month inside the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total: f64,
}

/// Monthly spend for `category` over the trailing window ending at `date`
/// ("YYYY.MM.DD"; the current moment when `None`).
///
/// Degrades to an empty result on a malformed `date` — logged, never raised.
pub fn spending_by_category(
    transactions: &[Transaction],
    category: &str,
    date: Option<&str>,
) -> Vec<CategoryAggregate> {
    match resolve_as_of(date) {
        Ok(as_of) => aggregate_window(transactions, category, as_of),
        Err(err) => {
            tracing::error!(%err, category, "spending report failed");
            Vec::new()
        }
    }
}

fn resolve_as_of(date: Option<&str>) -> Result<NaiveDateTime, Error> {
    match date {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| {
                Error::Parse(format!("invalid report date '{raw}', expected {DATE_FORMAT}"))
            }),
        None => Ok(Local::now().naive_local()),
    }
}

fn aggregate_window(
    transactions: &[Transaction],
    category: &str,
    as_of: NaiveDateTime,
) -> Vec<CategoryAggregate> {
    // Back up to the first day of the as-of month, then a flat 90 days.
    let window_start =
        as_of - Duration::days(as_of.day() as i64 - 1) - Duration::days(TRAILING_WINDOW_DAYS);

    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for txn in transactions {
        if txn.operation_date < window_start || txn.operation_date > as_of {
            continue;
        }
        if txn.category.as_deref() != Some(category) {
            continue;
        }
        let Some(amount) = txn.payment_amount else {
            continue;
        };
        let key = (txn.operation_date.year(), txn.operation_date.month());
        *monthly.entry(key).or_insert(0.0) += amount;
    }

    monthly
        .into_iter()
        .filter_map(|((year, month), total)| {
            let month_start = NaiveDate::from_ymd_opt(year, month, 1)?;
            let month_end = month_start.checked_add_months(Months::new(1))?.pred_opt()?;
            Some(CategoryAggregate {
                category: category.to_string(),
                period_start: month_start.max(window_start.date()),
                period_end: month_end.min(as_of.date()),
                total,
            })
        })
        .collect()
}
