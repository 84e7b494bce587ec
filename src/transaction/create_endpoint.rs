//! Defines the endpoint for creating a new transaction.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::Response,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::{Form, FormRejection};

use crate::{
    AppState, Error, api::FinanceApi, page_state::PageError, timezone,
};

use super::{
    form::{FormMode, TransactionForm},
    query::TransactionsQuery,
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// Redirects back to the transactions page the form was on, with an error
/// banner if the form was incomplete or the backend rejected it.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Query(query): Query<TransactionsQuery>,
    form: Result<Form<TransactionForm>, FormRejection>,
) -> Response {
    let today = match timezone::today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let result = match form {
        Ok(Form(mut form)) => match form.submit(&FormMode::Add { today }) {
            Ok(transaction) => state
                .api
                .create_transaction(&transaction)
                .await
                .map(|created| tracing::debug!("Created transaction {}", created.id)),
            Err(error) => Err(error),
        },
        Err(rejection) => Err(Error::InvalidFormInput(rejection.to_string())),
    };

    query.after_mutation().redirect_after(result, PageError::Create)
}
