//! The form for adding a transaction and for editing one in place.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
};

use super::{
    core::{Category, Transaction, TransactionCreate, TransactionType},
    query::{empty_date_as_none, empty_string_as_none},
};

/// Whether the form adds a new transaction or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    /// The form is cleared after every submission, `today` is the default date.
    Add { today: Date },
    /// The form keeps its values and offers a link back to `cancel_url`.
    Edit { cancel_url: String },
}

/// The values of the transaction form fields.
///
/// This is both what the form is rendered from and what the browser submits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub transaction_type: TransactionType,
    /// The raw amount input, coerced to a number on submit.
    #[serde(default)]
    pub amount: String,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub date: Option<Date>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: String,
}

impl TransactionForm {
    /// An empty expense of zero dollars dated `today`.
    pub fn new(today: Date) -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            amount: "0".to_owned(),
            date: Some(today),
            category: None,
            description: String::new(),
        }
    }

    /// The form pre-filled from an existing transaction.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type,
            amount: format!("{:.2}", transaction.amount),
            date: Some(transaction.date),
            category: transaction.known_category(),
            description: transaction.description.clone(),
        }
    }

    /// Turn the current values into a transaction.
    ///
    /// In add mode the fields are reset to their defaults whether or not the
    /// values were usable.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidFormInput] if the description, category or date is missing.
    pub fn submit(&mut self, mode: &FormMode) -> Result<TransactionCreate, Error> {
        let result = self.to_transaction();

        if let FormMode::Add { today } = mode {
            *self = Self::new(*today);
        }

        result
    }

    fn to_transaction(&self) -> Result<TransactionCreate, Error> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::InvalidFormInput("description is required".to_owned()));
        }

        let category = self
            .category
            .ok_or_else(|| Error::InvalidFormInput("category is required".to_owned()))?;
        let date = self
            .date
            .ok_or_else(|| Error::InvalidFormInput("date is required".to_owned()))?;

        Ok(TransactionCreate {
            date,
            amount: parse_amount(&self.amount),
            description: description.to_owned(),
            category,
            transaction_type: self.transaction_type,
        })
    }
}

/// Parse a dollar amount, anything that is not a finite, non-negative number is zero.
fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .unwrap_or(0.0)
}

/// Render the form, it submits to `submit_url` with `hx-post` when adding and
/// `hx-put` when editing.
pub fn transaction_form_view(form: &TransactionForm, mode: &FormMode, submit_url: &str) -> Markup {
    let (prefix, cancel_url) = match mode {
        FormMode::Add { .. } => ("add", None),
        FormMode::Edit { cancel_url } => ("edit", Some(cancel_url.as_str())),
    };
    let id = |field: &str| format!("{prefix}-{field}");
    let indicator_id = id("indicator");
    let is_expense = form.transaction_type == TransactionType::Expense;

    html! {
        form
            id=(id("transaction-form"))
            hx-post=[cancel_url.is_none().then_some(submit_url)]
            hx-put=[cancel_url.is_some().then_some(submit_url)]
            hx-indicator=(format!("#{indicator_id}"))
            class="grid grid-cols-1 gap-4 md:grid-cols-2"
        {
            fieldset class="space-y-2 md:col-span-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="transaction_type"
                            id=(id("type-expense"))
                            type="radio"
                            value="expense"
                            checked[is_expense]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id("type-expense")) class=(FORM_RADIO_LABEL_STYLE) { "Expense" }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            name="transaction_type"
                            id=(id("type-income"))
                            type="radio"
                            value="income"
                            checked[!is_expense]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id("type-income")) class=(FORM_RADIO_LABEL_STYLE) { "Income" }
                    }
                }
            }

            div
            {
                label for=(id("amount")) class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id=(id("amount"))
                        type="number"
                        step="0.01"
                        min="0"
                        required
                        value=(form.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for=(id("date")) class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id=(id("date"))
                    type="date"
                    required
                    value=[form.date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for=(id("category")) class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id=(id("category"))
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected[form.category.is_none()] { "Select a category" }

                    @for category in Category::ALL {
                        option value=(category) selected[form.category == Some(category)] { (category) }
                    }
                }
            }

            div
            {
                label for=(id("description")) class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id=(id("description"))
                    type="text"
                    placeholder="Description"
                    required
                    value=(form.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="flex gap-4 items-center md:col-span-2"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id=(indicator_id) class="htmx-indicator" { (loading_spinner()) }

                    @if cancel_url.is_some() {
                        "Update Transaction"
                    } @else {
                        "Add Transaction"
                    }
                }

                @if let Some(cancel_url) = cancel_url {
                    a href=(cancel_url) hx-boost="true" class=(BUTTON_SECONDARY_STYLE) { "Cancel" }
                }
            }
        }
    }
}
