//! The typed interface to the finance REST API.
//!
//! Handlers talk to the backend only through [FinanceApi], so they can be
//! tested against an in-memory implementation. [ApiGateway] is the HTTP
//! implementation used by the server.

mod gateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::Date;

pub use gateway::ApiGateway;

use crate::{
    Error,
    report::{CategoryReport, MonthlyReport, ReportSummary},
    transaction::{Category, Transaction, TransactionCreate, TransactionId, TransactionType, TransactionUpdate},
};

/// The criteria for listing transactions.
///
/// Only the fields that are `Some` are sent to the backend.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
}

/// An optional, inclusive date range used by the export and summary endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
}

/// The backend's reply to a CSV import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// A human readable summary, e.g. "Successfully imported 4 transactions".
    pub message: String,
}

/// The operations offered by the finance REST API.
///
/// Every call is a single request, failures are returned as [Error] and never
/// retried.
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// List the transactions that match `query`, in the order the backend returns them.
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// Get a single transaction, [Error::NotFound] if there is no transaction with `id`.
    async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Create a transaction and return it with its backend-assigned ID.
    async fn create_transaction(&self, transaction: &TransactionCreate) -> Result<Transaction, Error>;

    /// Apply a partial update to the transaction with `id`.
    async fn update_transaction(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction with `id`.
    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error>;

    /// Upload a CSV file of transactions for the backend to import.
    async fn import_csv(&self, file_name: &str, contents: Vec<u8>) -> Result<ImportResult, Error>;

    /// Download the transactions in `range` as a CSV file.
    async fn export_csv(&self, range: &DateRange) -> Result<Vec<u8>, Error>;

    /// Get the income and expense totals for the transactions in `range`.
    async fn summary(&self, range: &DateRange) -> Result<ReportSummary, Error>;

    /// Get the income and expense totals for each month, oldest first.
    async fn monthly_report(&self) -> Result<Vec<MonthlyReport>, Error>;

    /// Get the totals per category, optionally only for one transaction type.
    async fn category_report(
        &self,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryReport>, Error>;
}
