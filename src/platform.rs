//! Browser services the pages rely on: asking the user to confirm an action
//! and handing them a file to save.

use axum::{
    http::{
        HeaderValue,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::html::{BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, loading_spinner};

/// Something that can answer a yes/no question put to the user.
pub trait Confirm {
    /// Whether the user agreed to `message`.
    fn confirm(&self, message: &str) -> bool;
}

/// The button the user pressed in a [confirmation_dialog].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConfirmationAnswer {
    #[serde(default)]
    pub answer: Answer,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    #[default]
    No,
}

impl Confirm for ConfirmationAnswer {
    fn confirm(&self, message: &str) -> bool {
        let confirmed = self.answer == Answer::Yes;
        tracing::debug!("\"{message}\" answered {:?}", self.answer);
        confirmed
    }
}

/// A modal asking `message`.
///
/// Both buttons send `hx-delete` to `action_url` with `answer=yes` or
/// `answer=no` added to its query string.
pub fn confirmation_dialog(message: &str, action_url: &str) -> Markup {
    let separator = if action_url.contains('?') { '&' } else { '?' };

    html! {
        div
            id="confirm-dialog"
            role="dialog"
            aria-modal="true"
            class="fixed inset-0 z-50 flex items-center justify-center bg-gray-900/50"
        {
            div class="w-full max-w-sm p-6 rounded-lg shadow-lg bg-white dark:bg-gray-800"
            {
                p class="mb-6 text-gray-900 dark:text-white" { (message) }

                div class="flex justify-end gap-4"
                {
                    button
                        type="button"
                        hx-delete=(format!("{action_url}{separator}answer=no"))
                        hx-target="#dialog"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "No"
                    }

                    button
                        type="button"
                        hx-delete=(format!("{action_url}{separator}answer=yes"))
                        hx-target="#dialog"
                        hx-indicator="#confirm-indicator"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        span id="confirm-indicator" class="htmx-indicator" { (loading_spinner()) }
                        "Yes"
                    }
                }
            }
        }
    }
}

/// Hand `content` to the browser as a file download named `filename`.
pub fn download_bytes(filename: &str, content: Vec<u8>) -> Response {
    let content_type = if filename.ends_with(".csv") {
        "text/csv; charset=utf-8"
    } else {
        "application/octet-stream"
    };

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (CONTENT_DISPOSITION, disposition),
        ],
        content,
    )
        .into_response()
}
