#![allow(missing_docs)]

pub(crate) mod fake_api;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

use std::sync::Arc;

use time::macros::date;

use crate::{
    AppState,
    pagination::PaginationConfig,
    transaction::{Transaction, TransactionType},
};

pub(crate) use fake_api::FakeFinanceApi;
pub(crate) use form::{assert_form_input, assert_hx_endpoint, assert_submit_button_text, must_get_form};
pub(crate) use html::{assert_valid_html, element_texts, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect, get_header};

/// App state backed by `api` with UTC as the local timezone and the default page size.
pub(crate) fn test_state(api: Arc<FakeFinanceApi>) -> AppState {
    AppState::new(api, "Etc/UTC", PaginationConfig::default())
}

/// An expense in the Food category.
pub(crate) fn food_transaction(id: i64, description: &str) -> Transaction {
    Transaction {
        id,
        date: date!(2024 - 01 - 16),
        amount: 50.0,
        description: description.to_owned(),
        category: "Food".to_owned(),
        transaction_type: TransactionType::Expense,
        created_at: None,
        updated_at: None,
    }
}
