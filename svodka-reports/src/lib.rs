//! svodka-reports: aggregation over normalized transactions, market-data
//! collaborators and page assembly.

pub mod analysis;
pub mod cashback;
pub mod market;
pub mod pages;
pub mod sink;
pub mod spending;

pub use analysis::{analyze_transactions, CardSummary};
pub use cashback::profitable_cashback_categories;
pub use market::{CurrencyRate, MarketClient, StockPrice};
pub use pages::{
    build_events_page, build_main_page, build_spending_report, EventsPage, MainPage,
    SpendingReport,
};
pub use sink::write_report;
pub use spending::{spending_by_category, CategoryAggregate, TRAILING_WINDOW_DAYS};

/// Round to two decimal places, money style.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
