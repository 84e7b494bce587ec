//! Defines the endpoint for saving an inline edit.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, Query, State},
    response::Response,
};
use axum_extra::extract::{Form, FormRejection};

use crate::{AppState, Error, api::FinanceApi, page_state::PageError};

use super::{
    core::{TransactionId, TransactionUpdate},
    form::{FormMode, TransactionForm},
    query::TransactionsQuery,
};

/// The state needed to edit a transaction.
#[derive(Clone)]
pub struct EditTransactionState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

/// A route handler for updating a transaction, leaves edit mode either way.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<TransactionsQuery>,
    form: Result<Form<TransactionForm>, FormRejection>,
) -> Response {
    let query = query.after_mutation();
    let mode = FormMode::Edit {
        cancel_url: query.page_url(),
    };

    let result = match form {
        Ok(Form(mut form)) => match form.submit(&mode) {
            Ok(transaction) => state
                .api
                .update_transaction(transaction_id, &TransactionUpdate::from(transaction))
                .await
                .map(|_| ()),
            Err(error) => Err(error),
        },
        Err(rejection) => Err(Error::InvalidFormInput(rejection.to_string())),
    };

    query.redirect_after(result, PageError::Update)
}
