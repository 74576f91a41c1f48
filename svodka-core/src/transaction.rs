//! Typed transaction records normalized from a bank statement export.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Outcome of an operation as reported by the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Success,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    /// Any other status string the export uses, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Status {
    pub fn parse(raw: &str) -> Status {
        match raw.trim() {
            "OK" => Status::Success,
            "FAILED" => Status::Failed,
            "CANCELLED" => Status::Cancelled,
            other => Status::Other(other.to_string()),
        }
    }
}

/// Normalized output of the statement loader.
///
/// Cells missing from the export stay `None` rather than being dropped with
/// the row. Amounts are signed; negative means expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub operation_date: NaiveDateTime,
    /// Card number as printed in the export, e.g. "*7197".
    pub card_number: Option<String>,
    pub status: Status,
    /// Amount in the currency the operation was made in.
    pub operation_amount: Option<f64>,
    pub operation_currency: Option<String>,
    /// Amount actually charged, in the payment currency.
    pub payment_amount: Option<f64>,
    pub payment_currency: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl Transaction {
    /// True when the operation amount is a recorded expense.
    pub fn is_expense(&self) -> bool {
        self.operation_amount.is_some_and(|amount| amount < 0.0)
    }
}
