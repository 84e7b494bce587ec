//! Alerts for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the page, either
//! into a target element on the page or the shared `#alert-container`.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable message shown after an action completes.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action worked.
    Success {
        /// The headline shown in bold.
        message: String,
        /// Extra information shown below the headline.
        details: String,
    },
    /// The action failed.
    Error {
        /// The headline shown in bold.
        message: String,
        /// How the user might fix the problem.
        details: String,
    },
    /// The action failed and there is nothing more to say than the message.
    ErrorSimple {
        /// The only line shown.
        message: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    pub fn into_markup(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::Success { message, details } => (true, message, Some(details)),
            Alert::Error { message, details } => (false, message, Some(details)),
            Alert::ErrorSimple { message } => (false, message, None),
        };

        let style = if is_success {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        };

        html! {
            div
                role="alert"
                data-alert-kind=(if is_success { "success" } else { "error" })
                class=(style)
            {
                div class="flex-1"
                {
                    span class="font-semibold" { (message) }

                    @if let Some(details) = details.filter(|details| !details.is_empty()) {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold leading-none cursor-pointer"
                    data-dismiss=""
                {
                    "×"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
