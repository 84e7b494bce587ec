//! Defines the confirmation dialog and endpoint for deleting a transaction.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState,
    api::FinanceApi,
    endpoints::{self, format_endpoint},
    page_state::PageError,
    platform::{Confirm, ConfirmationAnswer, confirmation_dialog},
};

use super::{core::TransactionId, query::TransactionsQuery};

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this transaction?";

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// Ask the user to confirm deleting a transaction.
///
/// Responds with an alert instead if the transaction no longer exists.
pub async fn get_delete_transaction_dialog(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    if let Err(error) = state.api.get_transaction(transaction_id).await {
        tracing::error!("Could not get transaction {transaction_id} to delete: {error}");
        return error.into_alert_response();
    }

    let action_url = query
        .without_error()
        .to_url(&format_endpoint(endpoints::TRANSACTION, transaction_id));

    confirmation_dialog(DELETE_CONFIRMATION, &action_url).into_response()
}

/// A route handler for deleting a transaction once the user has answered the dialog.
///
/// Answering no closes the dialog and leaves everything as it was.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(answer): Query<ConfirmationAnswer>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    if !answer.confirm(DELETE_CONFIRMATION) {
        return Html("").into_response();
    }

    let result = state.api.delete_transaction(transaction_id).await;

    query.redirect_after(result, PageError::Delete)
}
