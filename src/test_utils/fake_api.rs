//! An in-memory stand-in for the finance REST API.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    Error,
    api::{DateRange, FinanceApi, ImportResult, TransactionQuery},
    report::{CategoryReport, MonthlyReport, ReportSummary},
    transaction::{
        Transaction, TransactionCreate, TransactionId, TransactionType, TransactionUpdate,
    },
};

#[derive(Default)]
struct FakeState {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    summary: ReportSummary,
    monthly: Vec<MonthlyReport>,
    categories: Vec<CategoryReport>,
    export: Vec<u8>,
    calls: Vec<String>,
    list_queries: Vec<TransactionQuery>,
    summary_ranges: Vec<DateRange>,
    category_types: Vec<Option<TransactionType>>,
    imports: Vec<(String, Vec<u8>)>,
}

/// Stores transactions in a `Vec` and records every call.
///
/// When built with [FakeFinanceApi::failing] every operation returns
/// [Error::ApiUnavailable], after recording the call.
#[derive(Default)]
pub(crate) struct FakeFinanceApi {
    state: Mutex<FakeState>,
    fail: bool,
}

impl FakeFinanceApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_transactions(self, transactions: Vec<Transaction>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
            state.transactions = transactions;
        }
        self
    }

    pub(crate) fn with_reports(
        self,
        summary: ReportSummary,
        monthly: Vec<MonthlyReport>,
        categories: Vec<CategoryReport>,
    ) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.summary = summary;
            state.monthly = monthly;
            state.categories = categories;
        }
        self
    }

    pub(crate) fn with_export(self, export: &[u8]) -> Self {
        self.state.lock().unwrap().export = export.to_vec();
        self
    }

    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    /// The names of the operations called so far, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn list_queries(&self) -> Vec<TransactionQuery> {
        self.state.lock().unwrap().list_queries.clone()
    }

    pub(crate) fn summary_ranges(&self) -> Vec<DateRange> {
        self.state.lock().unwrap().summary_ranges.clone()
    }

    pub(crate) fn category_types(&self) -> Vec<Option<TransactionType>> {
        self.state.lock().unwrap().category_types.clone()
    }

    pub(crate) fn imports(&self) -> Vec<(String, Vec<u8>)> {
        self.state.lock().unwrap().imports.clone()
    }

    fn record(&self, call: &str) -> Result<std::sync::MutexGuard<'_, FakeState>, Error> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_owned());

        if self.fail {
            Err(Error::ApiUnavailable("connection refused".to_owned()))
        } else {
            Ok(state)
        }
    }
}

fn matches(transaction: &Transaction, query: &TransactionQuery) -> bool {
    query.start_date.is_none_or(|start| transaction.date >= start)
        && query.end_date.is_none_or(|end| transaction.date <= end)
        && query
            .category
            .is_none_or(|category| transaction.category == category.as_str())
        && query
            .transaction_type
            .is_none_or(|transaction_type| transaction.transaction_type == transaction_type)
}

#[async_trait]
impl FinanceApi for FakeFinanceApi {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut state = self.record("list_transactions")?;
        state.list_queries.push(query.clone());

        let skip = query.skip.unwrap_or(0) as usize;
        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);

        Ok(state
            .transactions
            .iter()
            .filter(|transaction| matches(transaction, query))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        let state = self.record("get_transaction")?;

        state
            .transactions
            .iter()
            .find(|transaction| transaction.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn create_transaction(&self, transaction: &TransactionCreate) -> Result<Transaction, Error> {
        let mut state = self.record("create_transaction")?;
        state.next_id += 1;

        let created = Transaction {
            id: state.next_id,
            date: transaction.date,
            amount: transaction.amount,
            description: transaction.description.clone(),
            category: transaction.category.as_str().to_owned(),
            transaction_type: transaction.transaction_type,
            created_at: None,
            updated_at: None,
        };
        state.transactions.push(created.clone());

        Ok(created)
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut state = self.record("update_transaction")?;
        let transaction = state
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
            .ok_or(Error::NotFound)?;

        if let Some(date) = update.date {
            transaction.date = date;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(description) = &update.description {
            transaction.description = description.clone();
        }
        if let Some(category) = update.category {
            transaction.category = category.as_str().to_owned();
        }
        if let Some(transaction_type) = update.transaction_type {
            transaction.transaction_type = transaction_type;
        }

        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let mut state = self.record("delete_transaction")?;
        let count = state.transactions.len();
        state.transactions.retain(|transaction| transaction.id != id);

        if state.transactions.len() == count {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    async fn import_csv(&self, file_name: &str, contents: Vec<u8>) -> Result<ImportResult, Error> {
        let mut state = self.record("import_csv")?;
        let rows = String::from_utf8_lossy(&contents).lines().count().saturating_sub(1);
        state.imports.push((file_name.to_owned(), contents));

        Ok(ImportResult {
            message: format!("Successfully imported {rows} transactions"),
        })
    }

    async fn export_csv(&self, _range: &DateRange) -> Result<Vec<u8>, Error> {
        let state = self.record("export_csv")?;

        Ok(state.export.clone())
    }

    async fn summary(&self, range: &DateRange) -> Result<ReportSummary, Error> {
        let mut state = self.record("summary")?;
        state.summary_ranges.push(*range);

        Ok(state.summary.clone())
    }

    async fn monthly_report(&self) -> Result<Vec<MonthlyReport>, Error> {
        let state = self.record("monthly_report")?;

        Ok(state.monthly.clone())
    }

    async fn category_report(
        &self,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryReport>, Error> {
        let mut state = self.record("category_report")?;
        state.category_types.push(transaction_type);

        Ok(state.categories.clone())
    }
}
