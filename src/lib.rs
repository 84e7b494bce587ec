//! Finance Manager is a web app for tracking personal income and expenses.
//!
//! This library serves HTML pages to the browser and talks to a separate REST
//! backend, which owns the stored transactions and the reports computed from
//! them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod charts;
mod dashboard;
mod endpoints;
mod error_pages;
mod format;
mod html;
mod import_export;
mod logging;
mod navigation;
mod page_state;
mod pagination;
mod platform;
mod report;
mod reports;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api::{ApiGateway, FinanceApi};
pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;

use crate::{
    alert::Alert,
    error_pages::{InternalServerError, get_404_not_found_response},
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the finance API could not be sent or no response came back.
    #[error("could not reach the finance API: {0}")]
    ApiUnavailable(String),

    /// The finance API responded with a status code other than 2xx or 404.
    #[error("the finance API responded with status {status}: {body}")]
    ApiStatus {
        /// The HTTP status code of the response.
        status: u16,
        /// The response body, kept for the logs.
        body: String,
    },

    /// The finance API responded with a body that does not match the expected shape.
    #[error("could not decode the finance API response: {0}")]
    InvalidApiResponse(String),

    /// The configured finance API URL could not be parsed.
    #[error("invalid finance API URL \"{0}\"")]
    InvalidApiUrl(String),

    /// A submitted form contained a value that could not be used.
    #[error("invalid form input: {0}")]
    InvalidFormInput(String),

    /// The multipart form could not be read.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a file, or the file was empty.
    #[error("no file was uploaded")]
    MissingFile,

    /// The uploaded file is not a CSV file.
    #[error("File is not a CSV")]
    NotCSV,

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The requested resource was not found.
    ///
    /// For the finance API this is a 404 response, e.g. when a transaction
    /// has already been deleted.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Error::InvalidApiResponse(error.to_string())
        } else if let Some(status) = error.status() {
            Error::ApiStatus {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            Error::ApiUnavailable(error.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::ApiUnavailable(ref reason) => {
                tracing::error!("Could not reach the finance API: {reason}");
                InternalServerError {
                    description: "Could not reach the finance API",
                    fix: "Check that the backend is running and that the API URL is correct.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx requests.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            )
                .into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Transaction not found".to_owned(),
                    details: "Try refreshing the page to see if the transaction has already \
                        been deleted."
                        .to_owned(),
                },
            )
                .into_response(),
            Error::NotCSV => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "File type must be CSV.".to_owned(),
                },
            )
                .into_response(),
            Error::MissingFile => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Please select a file to import".to_owned(),
                },
            )
                .into_response(),
            Error::ApiUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the finance API".to_owned(),
                    details: "Check that the backend is running and try again.".to_owned(),
                },
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more \
                            details."
                            .to_owned(),
                    },
                )
                    .into_response()
            }
        }
    }
}
