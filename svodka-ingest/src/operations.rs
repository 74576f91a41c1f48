//! Parse bank statement CSV exports into typed transactions.
//!
//! The export carries a fixed header row:
//! Дата операции,Номер карты,Статус,Сумма операции,Валюта операции,
//! Сумма платежа,Валюта платежа,Категория,Описание

use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use svodka_core::{time, Error, Status, Transaction};

const COL_OPERATION_DATE: &str = "Дата операции";
const COL_CARD_NUMBER: &str = "Номер карты";
const COL_STATUS: &str = "Статус";
const COL_OPERATION_AMOUNT: &str = "Сумма операции";
const COL_OPERATION_CURRENCY: &str = "Валюта операции";
const COL_PAYMENT_AMOUNT: &str = "Сумма платежа";
const COL_PAYMENT_CURRENCY: &str = "Валюта платежа";
const COL_CATEGORY: &str = "Категория";
const COL_DESCRIPTION: &str = "Описание";

/// Load a statement export, degrading to an empty table on any failure.
///
/// Errors are logged, never returned: a report over a broken export renders
/// as a report over no transactions.
pub fn load_operations(path: impl AsRef<Path>) -> Vec<Transaction> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading operations");
    match try_load_operations(path) {
        Ok(transactions) => {
            tracing::info!(count = transactions.len(), "loaded operations");
            transactions
        }
        Err(err) => {
            tracing::error!(path = %path.display(), %err, "failed to load operations");
            Vec::new()
        }
    }
}

/// Open and parse a statement export.
pub fn try_load_operations(path: impl AsRef<Path>) -> Result<Vec<Transaction>, Error> {
    let file = File::open(path.as_ref())?;
    read_operations(file)
}

/// Parse a statement export from any reader.
///
/// A missing required column fails the whole table; a row whose date or
/// amount cell does not parse is skipped with a warning. Empty cells stay
/// `None` on the parsed record.
pub fn read_operations(reader: impl io::Read) -> Result<Vec<Transaction>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| Error::DataFormat(e.to_string()))?
        .clone();
    let columns = Columns::locate(&headers)?;

    let mut out = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| Error::DataFormat(e.to_string()))?;
        match columns.parse_row(&record) {
            Ok(transaction) => out.push(transaction),
            Err(err) => {
                // +2: header row plus 1-based numbering
                tracing::warn!(line = idx + 2, %err, "skipping unparseable row");
            }
        }
    }
    Ok(out)
}

/// Indices of the required columns within the header row.
struct Columns {
    operation_date: usize,
    card_number: usize,
    status: usize,
    operation_amount: usize,
    operation_currency: usize,
    payment_amount: usize,
    payment_currency: usize,
    category: usize,
    description: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Columns, Error> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::DataFormat(format!("missing required column '{name}'")))
        };
        Ok(Columns {
            operation_date: find(COL_OPERATION_DATE)?,
            card_number: find(COL_CARD_NUMBER)?,
            status: find(COL_STATUS)?,
            operation_amount: find(COL_OPERATION_AMOUNT)?,
            operation_currency: find(COL_OPERATION_CURRENCY)?,
            payment_amount: find(COL_PAYMENT_AMOUNT)?,
            payment_currency: find(COL_PAYMENT_CURRENCY)?,
            category: find(COL_CATEGORY)?,
            description: find(COL_DESCRIPTION)?,
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<Transaction, Error> {
        let date_cell = cell(record, self.operation_date)
            .ok_or_else(|| Error::Parse("missing operation date".to_string()))?;
        let operation_date = time::parse_datetime(&date_cell)?;

        let status = cell(record, self.status)
            .map(|raw| Status::parse(&raw))
            .unwrap_or(Status::Other(String::new()));

        Ok(Transaction {
            operation_date,
            card_number: cell(record, self.card_number),
            status,
            operation_amount: cell(record, self.operation_amount)
                .map(|raw| parse_amount(&raw))
                .transpose()?,
            operation_currency: cell(record, self.operation_currency),
            payment_amount: cell(record, self.payment_amount)
                .map(|raw| parse_amount(&raw))
                .transpose()?,
            payment_currency: cell(record, self.payment_currency),
            category: cell(record, self.category),
            description: cell(record, self.description),
        })
    }
}

/// An empty or missing cell is the explicit "absent" sentinel.
fn cell(record: &StringRecord, idx: usize) -> Option<String> {
    match record.get(idx) {
        Some(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
        _ => None,
    }
}

/// Amounts in the export use either "." or "," as the decimal separator and
/// may carry grouping spaces ("1 234,56").
fn parse_amount(raw: &str) -> Result<f64, Error> {
    let cleaned = raw
        .replace('\u{a0}', "")
        .replace(' ', "")
        .replace(',', ".");
    cleaned
        .parse()
        .map_err(|_| Error::Parse(format!("invalid amount '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Дата операции,Номер карты,Статус,Сумма операции,Валюта операции,Сумма платежа,Валюта платежа,Категория,Описание";

    fn sample_csv() -> String {
        format!(
            "{HEADER}\n\
             15.03.2023 10:15:00,*7197,OK,-120.00,RUB,-120.00,RUB,Еда,Кафе\n\
             20.03.2023 14:00:00,*7197,OK,-250.50,RUB,-250.50,RUB,Еда,Ресторан\n\
             25.03.2023 12:30:00,*7197,FAILED,-500.00,RUB,-500.00,RUB,Техника,Гаджеты\n"
        )
    }

    #[test]
    fn test_reads_all_rows() {
        let txns = read_operations(sample_csv().as_bytes()).unwrap();
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].category.as_deref(), Some("Еда"));
        assert_eq!(txns[0].operation_amount, Some(-120.0));
        assert_eq!(txns[1].payment_amount, Some(-250.5));
        assert_eq!(txns[2].status, Status::Failed);
    }

    #[test]
    fn test_dates_use_the_fixed_format() {
        let txns = read_operations(sample_csv().as_bytes()).unwrap();
        assert_eq!(
            txns[0].operation_date,
            chrono::NaiveDate::from_ymd_opt(2023, 3, 15)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_missing_column_is_data_format_error() {
        let csv = "Дата операции,Номер карты,Статус,Сумма операции,Валюта операции,Сумма платежа,Валюта платежа,Категория\n\
                   15.03.2023 10:15:00,*7197,OK,-120.00,RUB,-120.00,RUB,Еда\n";
        let err = read_operations(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat(_)), "got {err:?}");
        assert!(err.to_string().contains("Описание"));
    }

    #[test]
    fn test_empty_cells_become_absent() {
        let csv = format!("{HEADER}\n15.03.2023 10:15:00,,OK,,RUB,-120.00,RUB,,\n");
        let txns = read_operations(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].card_number, None);
        assert_eq!(txns[0].operation_amount, None);
        assert_eq!(txns[0].category, None);
        assert_eq!(txns[0].description, None);
    }

    #[test]
    fn test_unparseable_date_skips_only_that_row() {
        let csv = format!(
            "{HEADER}\n\
             2023-03-15 10:15:00,*7197,OK,-120.00,RUB,-120.00,RUB,Еда,Кафе\n\
             20.03.2023 14:00:00,*7197,OK,-250.00,RUB,-250.00,RUB,Еда,Ресторан\n"
        );
        let txns = read_operations(csv.as_bytes()).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].payment_amount, Some(-250.0));
    }

    #[test]
    fn test_comma_decimal_and_grouping_spaces() {
        let csv = format!("{HEADER}\n15.03.2023 10:15:00,*7197,OK,\"-1 234,56\",RUB,\"-1 234,56\",RUB,Техника,ТВ\n");
        let txns = read_operations(csv.as_bytes()).unwrap();
        assert_eq!(txns[0].operation_amount, Some(-1234.56));
    }

    #[test]
    fn test_unknown_status_kept_verbatim() {
        let csv = format!("{HEADER}\n15.03.2023 10:15:00,*7197,PENDING,-10.00,RUB,-10.00,RUB,Еда,Кафе\n");
        let txns = read_operations(csv.as_bytes()).unwrap();
        assert_eq!(txns[0].status, Status::Other("PENDING".to_string()));
    }

    #[test]
    fn test_load_operations_missing_file_degrades_to_empty() {
        assert!(load_operations("no/such/operations.csv").is_empty());
    }
}
