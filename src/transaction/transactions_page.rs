//! Defines the route handler for the page that lists, filters, adds and edits transactions.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::FinanceApi,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, card, dollar_input_styles, error_banner},
    navigation::NavBar,
    page_state::{PageError, PageState},
    pagination::PaginationConfig,
    timezone,
};

use super::{
    core::Transaction,
    filter::{FilterCriteria, filter_panel_view},
    form::{FormMode, TransactionForm, transaction_form_view},
    list::{ListState, TransactionList, transaction_list_view},
    query::TransactionsQuery,
};

/// The state needed for the transactions page.
#[derive(Clone)]
pub struct TransactionsViewState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config for paging the transactions table.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Render the transactions page for the view described by the query string.
///
/// The filtered collection is fetched in full on every request, then the
/// page and edit target from the URL are clamped to it.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let today = timezone::today(&state.local_timezone)?;
    let filter = query.filter();
    let failure = if filter.is_empty() {
        PageError::Load
    } else {
        PageError::Filter
    };

    let mut page = PageState::<Vec<Transaction>>::new(query.error);
    let result = state.api.list_transactions(&filter.to_api_query()).await;
    page.finish_fetch(result, failure);

    let list_state = query
        .list_state()
        .clamp(&page.data, state.pagination_config.page_size);

    Ok(transactions_view(TransactionsView {
        page: &page,
        filter: &filter,
        list_state,
        add_form: &TransactionForm::new(today),
        today,
        pagination: &state.pagination_config,
    })
    .into_response())
}

struct TransactionsView<'a> {
    page: &'a PageState<Vec<Transaction>>,
    filter: &'a FilterCriteria,
    list_state: ListState,
    add_form: &'a TransactionForm,
    today: time::Date,
    pagination: &'a PaginationConfig,
}

fn transactions_view(view: TransactionsView<'_>) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    // Adding keeps the filters and page but leaves edit mode.
    let create_url = TransactionsQuery::new(view.filter, view.list_state.finish_edit(), None)
        .to_url(endpoints::TRANSACTIONS_API);
    let list = TransactionList {
        transactions: &view.page.data,
        state: view.list_state,
        filter: view.filter,
        pagination: view.pagination,
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end"
            {
                h1 class="text-xl font-bold" { "Transactions" }
            }

            @if let Some(error) = &view.page.error {
                (error_banner(error))
            }

            (card("Add Transaction", &transaction_form_view(
                view.add_form,
                &FormMode::Add { today: view.today },
                &create_url,
            )))

            (card("Filters", &filter_panel_view(view.filter)))

            (card("Transactions", &transaction_list_view(&list)))
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}
