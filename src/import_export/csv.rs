//! The CSV contract shared with the backend's import and export.
//!
//! Rows have the header `date,amount,description,category,transaction_type`,
//! dates are `YYYY-MM-DD` and the type is `income` or `expense`. The backend
//! also accepts capitalised headers, `Type` for the type column, free text
//! categories and types in any case, so only structural problems are caught
//! here.

use std::str::FromStr;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::{Error, transaction::TransactionType};

/// The file name offered for the sample download.
pub const SAMPLE_FILE_NAME: &str = "sample_transactions.csv";

/// One row of an imported CSV file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvRecord {
    /// Left for the backend to parse, it accepts more than `YYYY-MM-DD`.
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub transaction_type: String,
}

/// The contract column for a header the backend accepts, e.g. "Type" for
/// `transaction_type`. Unknown headers are kept as they are.
fn canonical_column(header: &str) -> &str {
    match header {
        "Date" => "date",
        "Amount" => "amount",
        "Description" => "description",
        "Category" => "category",
        "Type" | "type" | "Transaction Type" => "transaction_type",
        other => other,
    }
}

/// One row of the sample file, kept as text so amounts keep two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleRow {
    pub date: &'static str,
    pub amount: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub transaction_type: &'static str,
}

pub const SAMPLE_ROWS: [SampleRow; 4] = [
    SampleRow {
        date: "2024-01-15",
        amount: "2500.00",
        description: "Monthly Salary",
        category: "Salary",
        transaction_type: "income",
    },
    SampleRow {
        date: "2024-01-16",
        amount: "50.00",
        description: "Groceries",
        category: "Food",
        transaction_type: "expense",
    },
    SampleRow {
        date: "2024-01-17",
        amount: "30.00",
        description: "Gas",
        category: "Transportation",
        transaction_type: "expense",
    },
    SampleRow {
        date: "2024-01-18",
        amount: "1200.00",
        description: "Rent",
        category: "Housing",
        transaction_type: "expense",
    },
];

/// Check that every row of `contents` follows the CSV contract.
///
/// Returns the number of rows, or [Error::InvalidCSV] naming the first bad row.
pub fn validate_csv(contents: &[u8]) -> Result<usize, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents);

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCSV(error.to_string()))?
        .iter()
        .map(canonical_column)
        .collect::<StringRecord>();
    if headers.is_empty() {
        return Err(Error::InvalidCSV("missing header row".to_owned()));
    }
    reader.set_headers(headers);

    let mut rows = 0;
    for (index, record) in reader.deserialize::<CsvRecord>().enumerate() {
        let record = record.map_err(|error| {
            Error::InvalidCSV(format!("row {}: {error}", index + 1))
        })?;

        if !record.amount.is_finite() || record.amount < 0.0 {
            return Err(Error::InvalidCSV(format!(
                "row {}: amount must be a non-negative number",
                index + 1
            )));
        }

        TransactionType::from_str(&record.transaction_type).map_err(|_| {
            Error::InvalidCSV(format!(
                "row {}: \"{}\" is not income or expense",
                index + 1,
                record.transaction_type
            ))
        })?;

        rows += 1;
    }

    Ok(rows)
}

/// The sample file offered next to the import form.
pub fn sample_csv() -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for row in SAMPLE_ROWS {
        writer
            .serialize(row)
            .map_err(|error| Error::InvalidCSV(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::InvalidCSV(error.to_string()))
}
