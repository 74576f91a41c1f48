use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use svodka_core::DATETIME_FORMAT;
use svodka_ingest::{load_operations, load_user_settings};
use svodka_reports::{
    build_events_page, build_main_page, build_spending_report, write_report, MarketClient,
};
use tracing_subscriber::EnvFilter;

mod config;

use config::{exchange_api_key, load_config, stocks_api_key};

#[derive(Parser, Debug)]
#[command(name = "svodka", version, about = "Bank statement reporting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config.toml under ~/.svodka
    Init,

    /// Main page: greeting, masked card, spend summary, market snapshot
    MainPage {
        /// Card number to mask and display
        #[arg(long)]
        card: String,

        /// Page timestamp "DD.MM.YYYY HH:MM:SS" (default: now)
        #[arg(long)]
        time: Option<String>,

        /// Statement export (default: from config)
        #[arg(long)]
        operations: Option<PathBuf>,
    },

    /// Events page: best cashback categories for a month
    Events {
        /// Four-digit year, e.g. 2023
        #[arg(long)]
        year: String,

        /// Month number 1-12
        #[arg(long)]
        month: String,

        /// Statement export (default: from config)
        #[arg(long)]
        operations: Option<PathBuf>,
    },

    /// Reports page: category spend over the trailing three months
    Report {
        /// Category exactly as named in the export
        #[arg(long)]
        category: String,

        /// Report date "YYYY.MM.DD" (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Statement export (default: from config)
        #[arg(long)]
        operations: Option<PathBuf>,

        /// Report file (default: from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Init => config::init_config()?,

        Command::MainPage { card, time, operations } => {
            main_page(card, time, operations).await?;
        }

        Command::Events { year, month, operations } => {
            events(&year, &month, operations)?;
        }

        Command::Report { category, date, operations, out } => {
            report(&category, date.as_deref(), operations, out)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

async fn main_page(card: String, time: Option<String>, operations: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let operations = operations.unwrap_or(config.data.operations.clone());
    let transactions = load_operations(operations);

    let settings = load_user_settings(&config.data.user_settings)?;
    let market = MarketClient::new(exchange_api_key(&config)?, stocks_api_key(&config)?);
    let currency_rates = market.currency_rates(&settings.user_currencies).await?;
    let stock_prices = market.stock_prices(&settings.user_stocks).await?;

    let time = time.unwrap_or_else(|| Local::now().format(DATETIME_FORMAT).to_string());
    let page = build_main_page(&transactions, &time, &card, currency_rates, stock_prices)?;
    print_payload(&page)
}

fn events(year: &str, month: &str, operations: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let operations = operations.unwrap_or(config.data.operations);
    let transactions = load_operations(operations);

    let page = build_events_page(&transactions, year, month);
    print_payload(&page)
}

fn report(
    category: &str,
    date: Option<&str>,
    operations: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;
    let operations = operations.unwrap_or(config.data.operations);
    let transactions = load_operations(operations);

    let report = build_spending_report(&transactions, category, date);
    write_report(&report, out.unwrap_or(config.data.report_output))?;
    print_payload(&report)
}

fn print_payload<T: serde::Serialize>(payload: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).context("serializing payload")?
    );
    Ok(())
}
