//! The filter panel above the transactions table.
//!
//! Filtering always happens on the backend, the panel only builds the query.

use maud::{Markup, html};
use time::Date;

use crate::{
    api::TransactionQuery,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
};

use super::core::{Category, TransactionType};

/// The candidate criteria for listing transactions, every one is optional.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub category: Option<Category>,
    pub transaction_type: Option<TransactionType>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The backend query for these criteria.
    ///
    /// The whole filtered set is requested so the page count reflects every
    /// matching transaction.
    pub fn to_api_query(self) -> TransactionQuery {
        TransactionQuery {
            skip: None,
            limit: None,
            start_date: self.start_date,
            end_date: self.end_date,
            category: self.category,
            transaction_type: self.transaction_type,
        }
    }
}

/// The filter form.
///
/// Apply submits only the four criteria, so the page and edit target are
/// dropped and the list starts again at page one. Clear links to the
/// unfiltered page.
pub fn filter_panel_view(filter: &FilterCriteria) -> Markup {
    html! {
        form
            id="filter-form"
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            hx-boost="true"
            hx-indicator="#filter-indicator"
            class="grid grid-cols-1 gap-4 md:grid-cols-2 lg:grid-cols-4"
        {
            div
            {
                label for="filter-start-date" class=(FORM_LABEL_STYLE) { "Start Date" }
                input
                    id="filter-start-date"
                    name="start_date"
                    type="date"
                    value=[filter.start_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-end-date" class=(FORM_LABEL_STYLE) { "End Date" }
                input
                    id="filter-end-date"
                    name="end_date"
                    type="date"
                    value=[filter.end_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }
                select id="filter-category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[filter.category.is_none()] { "All Categories" }

                    @for category in Category::ALL {
                        option value=(category) selected[filter.category == Some(category)] { (category) }
                    }
                }
            }

            div
            {
                label for="filter-type" class=(FORM_LABEL_STYLE) { "Type" }
                select id="filter-type" name="transaction_type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[filter.transaction_type.is_none()] { "All Types" }

                    @for transaction_type in TransactionType::ALL {
                        option
                            value=(transaction_type)
                            selected[filter.transaction_type == Some(transaction_type)]
                        {
                            (transaction_type.label())
                        }
                    }
                }
            }

            div class="flex gap-4 items-center md:col-span-2 lg:col-span-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="filter-indicator" class="htmx-indicator" { (loading_spinner()) }
                    "Apply Filters"
                }

                a
                    href=(endpoints::TRANSACTIONS_VIEW)
                    hx-boost="true"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Clear"
                }
            }
        }
    }
}
