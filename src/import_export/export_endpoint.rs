use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::Response,
};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    api::{DateRange, FinanceApi},
    import_export::csv::{SAMPLE_FILE_NAME, sample_csv},
    platform::download_bytes,
    timezone::today,
    transaction::empty_date_as_none,
};

/// The state needed for exporting transactions.
#[derive(Clone)]
pub struct ExportState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The optional date range from the export form, empty fields mean no bound.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default, deserialize_with = "empty_date_as_none")]
    start_date: Option<Date>,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    end_date: Option<Date>,
}

impl From<ExportQuery> for DateRange {
    fn from(query: ExportQuery) -> Self {
        DateRange {
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

/// Route handler that downloads the transactions in the requested date range as CSV.
///
/// The file is named after today's date in the local timezone, e.g.
/// `transactions_2024-01-31.csv`.
pub async fn export_transactions_endpoint(
    State(state): State<ExportState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, Error> {
    let today = today(&state.local_timezone)?;
    let range = DateRange::from(query);

    let contents = state
        .api
        .export_csv(&range)
        .await
        .inspect_err(|error| tracing::error!("Failed to export CSV: {error}"))?;

    Ok(download_bytes(&format!("transactions_{today}.csv"), contents))
}

/// Route handler that downloads an example CSV file for the import form.
pub async fn get_sample_csv() -> Result<Response, Error> {
    Ok(download_bytes(SAMPLE_FILE_NAME, sample_csv()?))
}
