//! The query string of the transactions page.
//!
//! The page keeps all of its state in the URL: the active filters, the
//! current page, the row being edited and the error from the last mutation.
//! Mutation endpoints receive the same query so they can redirect back to the
//! exact view the user came from.

use std::{fmt::Display, str::FromStr};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::{Deserialize, Deserializer, Serialize, de};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, endpoints, page_state::PageError};

use super::{
    core::{Category, TransactionId, TransactionType},
    filter::FilterCriteria,
    list::ListState,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The URL state of the transactions page.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsQuery {
    #[serde(
        default,
        deserialize_with = "empty_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<Date>,
    #[serde(
        default,
        deserialize_with = "empty_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<Date>,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<TransactionType>,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<u64>,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub edit: Option<TransactionId>,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<PageError>,
}

impl TransactionsQuery {
    pub fn new(filter: &FilterCriteria, list_state: ListState, error: Option<PageError>) -> Self {
        Self {
            start_date: filter.start_date,
            end_date: filter.end_date,
            category: filter.category,
            transaction_type: filter.transaction_type,
            // Page one is the default, leave it out to keep URLs short.
            page: (list_state.current_page > 1).then_some(list_state.current_page),
            edit: list_state.editing_id,
            error,
        }
    }

    pub fn filter(&self) -> FilterCriteria {
        FilterCriteria {
            start_date: self.start_date,
            end_date: self.end_date,
            category: self.category,
            transaction_type: self.transaction_type,
        }
    }

    pub fn list_state(&self) -> ListState {
        ListState {
            editing_id: self.edit,
            current_page: self.page.unwrap_or(1),
        }
    }

    /// The same view with `error` shown in the banner.
    pub fn with_error(self, error: PageError) -> Self {
        Self {
            error: Some(error),
            ..self
        }
    }

    pub fn without_error(self) -> Self {
        Self {
            error: None,
            ..self
        }
    }

    /// The view to go back to after a successful mutation: not editing and no error.
    pub fn after_mutation(self) -> Self {
        Self {
            edit: None,
            error: None,
            ..self
        }
    }

    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_else(|error| {
            tracing::error!("Could not encode transactions query {self:?}: {error}");
            String::new()
        })
    }

    /// The URL of `route` with this query appended, if there is any.
    pub fn to_url(&self, route: &str) -> String {
        let query_string = self.to_query_string();

        if query_string.is_empty() {
            route.to_owned()
        } else {
            format!("{route}?{query_string}")
        }
    }

    /// The URL of the transactions page showing this view.
    pub fn page_url(&self) -> String {
        self.to_url(endpoints::TRANSACTIONS_VIEW)
    }

    /// Send the browser back to this view once a mutation has finished.
    ///
    /// On success the view is reloaded without an error, otherwise `failure`
    /// is shown in the page's error banner.
    pub fn redirect_after(self, result: Result<(), Error>, failure: PageError) -> Response {
        let query = match result {
            Ok(()) => self.without_error(),
            Err(error) => {
                tracing::error!("{failure}: {error}");
                self.with_error(failure)
            }
        };

        (HxRedirect(query.page_url()), StatusCode::SEE_OTHER).into_response()
    }
}

/// Deserialize an optional value, treating an empty string as `None`.
///
/// HTML forms send empty strings for blank inputs, which would otherwise fail
/// to parse as a number or enum.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;

    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Deserialize an optional `YYYY-MM-DD` date, treating an empty string as `None`.
pub(crate) fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Date::parse(value, DATE_FORMAT)
            .map(Some)
            .map_err(de::Error::custom),
    }
}
