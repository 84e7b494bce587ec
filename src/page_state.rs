//! Page-level data and error state shared by the page controllers.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The failure a page shows in its error banner.
///
/// A failed mutation redirects back to the page with this in the `error`
/// query parameter, so the banner survives the redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageError {
    Load,
    Filter,
    Create,
    Update,
    Delete,
    Dashboard,
    Reports,
}

impl PageError {
    pub fn message(self) -> &'static str {
        match self {
            PageError::Load => "Failed to load transactions",
            PageError::Filter => "Failed to apply filters",
            PageError::Create => "Failed to create transaction",
            PageError::Update => "Failed to update transaction",
            PageError::Delete => "Failed to delete transaction",
            PageError::Dashboard => "Failed to load dashboard data",
            PageError::Reports => "Failed to load reports",
        }
    }
}

impl Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl FromStr for PageError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(PageError::Load),
            "filter" => Ok(PageError::Filter),
            "create" => Ok(PageError::Create),
            "update" => Ok(PageError::Update),
            "delete" => Ok(PageError::Delete),
            "dashboard" => Ok(PageError::Dashboard),
            "reports" => Ok(PageError::Reports),
            other => Err(format!("unknown page error \"{other}\"")),
        }
    }
}

/// The state a page controller owns for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState<T> {
    pub error: Option<String>,
    pub data: T,
}

impl<T: Default> PageState<T> {
    /// Start with empty data and the error carried over from a redirect, if any.
    pub fn new(error: Option<PageError>) -> Self {
        Self {
            error: error.map(|error| error.message().to_owned()),
            data: T::default(),
        }
    }

    /// Store the fetched data, or keep the previous data and show `failure`.
    ///
    /// A successful fetch does not clear an error from an earlier mutation.
    pub fn finish_fetch<E: Display>(&mut self, result: Result<T, E>, failure: PageError) {
        match result {
            Ok(data) => self.data = data,
            Err(error) => {
                tracing::error!("{failure}: {error}");
                self.error = Some(failure.message().to_owned());
            }
        }
    }
}
