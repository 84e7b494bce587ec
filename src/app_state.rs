//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use crate::{api::FinanceApi, pagination::PaginationConfig};

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    /// It is only checked when a page first needs today's date.
    pub fn new(
        api: Arc<dyn FinanceApi>,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            api,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("local_timezone", &self.local_timezone)
            .field("pagination_config", &self.pagination_config)
            .finish_non_exhaustive()
    }
}
