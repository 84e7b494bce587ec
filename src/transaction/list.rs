//! The paged table of transactions with at most one row being edited.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    format::{format_date, format_signed_amount},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_EDIT_STYLE, CATEGORY_BADGE_STYLE, EXPENSE_BADGE_STYLE,
        INCOME_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
    },
    pagination::{
        PaginationConfig, clamp_page, create_pagination_indicators, page_count, pagination_view,
    },
};

use super::{
    core::{Transaction, TransactionId, TransactionType},
    filter::FilterCriteria,
    form::{FormMode, TransactionForm, transaction_form_view},
    query::TransactionsQuery,
};

const COLUMN_COUNT: usize = 6;

/// Which row is being edited and which page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListState {
    pub editing_id: Option<TransactionId>,
    /// One-based page number.
    pub current_page: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            editing_id: None,
            current_page: 1,
        }
    }
}

impl ListState {
    /// Put the row for `id` in edit mode, replacing any other row being edited.
    pub fn begin_edit(self, id: TransactionId) -> Self {
        Self {
            editing_id: Some(id),
            ..self
        }
    }

    /// Leave edit mode after the inline form is submitted or cancelled.
    pub fn finish_edit(self) -> Self {
        Self {
            editing_id: None,
            ..self
        }
    }

    pub fn go_to(self, page: u64) -> Self {
        Self {
            current_page: page,
            ..self
        }
    }

    /// Fit the state to a freshly fetched collection.
    ///
    /// The page is clamped into `[1, max(page count, 1)]` and edit mode ends
    /// if the row being edited is not on that page.
    pub fn clamp(self, transactions: &[Transaction], page_size: u64) -> Self {
        let current_page = clamp_page(
            self.current_page,
            page_count(transactions.len(), page_size),
        );
        let visible = page_slice(transactions, current_page, page_size);
        let editing_id = self
            .editing_id
            .filter(|id| visible.iter().any(|transaction| transaction.id == *id));

        Self {
            editing_id,
            current_page,
        }
    }

    /// The transactions on the current page.
    pub fn visible<'a>(&self, transactions: &'a [Transaction], page_size: u64) -> &'a [Transaction] {
        page_slice(transactions, self.current_page, page_size)
    }
}

fn page_slice<T>(items: &[T], page: u64, page_size: u64) -> &[T] {
    let page_size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}

/// Everything needed to render the list.
pub struct TransactionList<'a> {
    /// The full filtered collection, not just the visible page.
    pub transactions: &'a [Transaction],
    /// Must already be clamped to `transactions`.
    pub state: ListState,
    pub filter: &'a FilterCriteria,
    pub pagination: &'a PaginationConfig,
}

impl TransactionList<'_> {
    fn url_for(&self, state: ListState) -> String {
        TransactionsQuery::new(self.filter, state, None).page_url()
    }
}

pub fn transaction_list_view(list: &TransactionList<'_>) -> Markup {
    let page_size = list.pagination.page_size;
    let total_pages = page_count(list.transactions.len(), page_size);
    let visible = list.state.visible(list.transactions, page_size);

    html! {
        div id="transaction-list" hx-boost="true" class="relative overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in visible {
                        @if list.state.editing_id == Some(transaction.id) {
                            (edit_row_view(list, transaction))
                        } @else {
                            (row_view(list, transaction))
                        }
                    }

                    @if visible.is_empty() {
                        tr
                        {
                            td
                                colspan=(COLUMN_COUNT)
                                data-empty=""
                                class="px-6 py-4 text-center"
                            {
                                "No transactions found"
                            }
                        }
                    }
                }
            }

            @if total_pages > 1 {
                (pagination_view(
                    &create_pagination_indicators(
                        list.state.current_page,
                        total_pages,
                        list.pagination.max_pages,
                    ),
                    |page| list.url_for(list.state.go_to(page)),
                ))
            }
        }
    }
}

fn row_view(list: &TransactionList<'_>, transaction: &Transaction) -> Markup {
    let (amount_style, type_badge_style) = match transaction.transaction_type {
        TransactionType::Income => ("font-semibold text-green-600 dark:text-green-400", INCOME_BADGE_STYLE),
        TransactionType::Expense => ("font-semibold text-red-600 dark:text-red-400", EXPENSE_BADGE_STYLE),
    };
    let dialog_url = TransactionsQuery::new(list.filter, list.state, None)
        .to_url(&format_endpoint(endpoints::DELETE_TRANSACTION_DIALOG, transaction.id));

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (format_date(transaction.date)) }
            td class=(TABLE_CELL_STYLE) data-description="" { (transaction.description) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) data-category-badge="" { (transaction.category) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(type_badge_style) { (transaction.transaction_type.as_str()) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(amount_style)
                {
                    (format_signed_amount(transaction.amount, transaction.transaction_type))
                }
            }
            td class=(format!("{TABLE_CELL_STYLE} flex gap-4"))
            {
                a
                    href=(list.url_for(list.state.begin_edit(transaction.id)))
                    class=(BUTTON_EDIT_STYLE)
                {
                    "Edit"
                }

                button
                    type="button"
                    hx-get=(dialog_url)
                    hx-target="#dialog"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn edit_row_view(list: &TransactionList<'_>, transaction: &Transaction) -> Markup {
    let after_edit = TransactionsQuery::new(list.filter, list.state.finish_edit(), None);
    let mode = FormMode::Edit {
        cancel_url: after_edit.page_url(),
    };
    let submit_url = after_edit.to_url(&format_endpoint(endpoints::TRANSACTION, transaction.id));

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id) data-editing=""
        {
            td colspan=(COLUMN_COUNT) class=(TABLE_CELL_STYLE)
            {
                (transaction_form_view(&TransactionForm::from_transaction(transaction), &mode, &submit_url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        pagination::{PaginationConfig, page_count},
        transaction::{Transaction, TransactionType, filter::FilterCriteria},
    };

    use super::{ListState, TransactionList, transaction_list_view};

    fn transactions(count: i64) -> Vec<Transaction> {
        (1..=count)
            .map(|id| Transaction {
                id,
                date: date!(2024 - 01 - 15),
                amount: 10.0,
                description: format!("Transaction {id}"),
                category: "Food".to_owned(),
                transaction_type: TransactionType::Expense,
                created_at: None,
                updated_at: None,
            })
            .collect()
    }

    fn render(transactions: &[Transaction], state: ListState) -> Html {
        let pagination = PaginationConfig::default();
        let filter = FilterCriteria::default();
        let list = TransactionList {
            transactions,
            state: state.clamp(transactions, pagination.page_size),
            filter: &filter,
            pagination: &pagination,
        };

        Html::parse_fragment(&transaction_list_view(&list).into_string())
    }

    fn row_ids(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("tr[data-transaction-id]").unwrap())
            .map(|row| row.value().attr("data-transaction-id").unwrap().to_owned())
            .collect()
    }

    #[test]
    fn empty_collection_has_no_rows_or_pager() {
        let html = render(&[], ListState::default());

        assert!(row_ids(&html).is_empty());
        assert!(html.select(&Selector::parse("nav.pagination").unwrap()).next().is_none());
        let empty = html
            .select(&Selector::parse("td[data-empty]").unwrap())
            .next()
            .expect("No empty message");
        assert_eq!(empty.text().collect::<String>(), "No transactions found");
    }

    #[test]
    fn single_page_has_no_pager() {
        let html = render(&transactions(10), ListState::default());

        assert_eq!(row_ids(&html).len(), 10);
        assert!(html.select(&Selector::parse("nav.pagination").unwrap()).next().is_none());
    }

    #[test]
    fn counts_pages_of_filtered_set() {
        assert_eq!(page_count(25, 10), 3);
    }

    #[test]
    fn out_of_range_page_is_clamped_to_last() {
        let all = transactions(25);

        let state = ListState::default().go_to(4).clamp(&all, 10);

        assert_eq!(state.current_page, 3);
        assert_eq!(state.visible(&all, 10).len(), 5);
    }

    #[test]
    fn zero_page_is_clamped_to_first() {
        let state = ListState::default().go_to(0).clamp(&transactions(5), 10);

        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn shows_requested_page() {
        let html = render(&transactions(25), ListState::default().go_to(2));

        let ids = row_ids(&html);
        assert_eq!(ids.first().map(String::as_str), Some("11"));
        assert_eq!(ids.last().map(String::as_str), Some("20"));
    }

    #[test]
    fn editing_another_row_replaces_target() {
        let all = transactions(3);

        let state = ListState::default().begin_edit(1).begin_edit(2);
        let html = render(&all, state);

        let editing = html
            .select(&Selector::parse("tr[data-editing]").unwrap())
            .map(|row| row.value().attr("data-transaction-id").unwrap().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(editing, ["2"]);
    }

    #[test]
    fn edit_row_spans_all_columns() {
        let html = render(&transactions(1), ListState::default().begin_edit(1));

        let cell = html
            .select(&Selector::parse("tr[data-editing] td").unwrap())
            .next()
            .expect("No edit row");
        assert_eq!(cell.value().attr("colspan"), Some("6"));
        assert!(cell.text().collect::<String>().contains("Update Transaction"));
    }

    #[test]
    fn finishing_edit_clears_target() {
        let state = ListState::default().begin_edit(5).finish_edit();

        assert_eq!(state.editing_id, None);
    }

    #[test]
    fn edit_target_off_page_is_dropped() {
        let all = transactions(15);

        let state = ListState::default().begin_edit(12).clamp(&all, 10);

        assert_eq!(state.editing_id, None);
    }

    #[test]
    fn deleted_edit_target_is_dropped() {
        let state = ListState::default().begin_edit(99).clamp(&transactions(3), 10);

        assert_eq!(state.editing_id, None);
    }

    #[test]
    fn rows_show_formatted_values() {
        let mut all = transactions(1);
        all[0].amount = 3000.0;
        all[0].transaction_type = TransactionType::Income;
        all[0].category = "Salary".to_owned();

        let html = render(&all, ListState::default());

        let text = html
            .select(&Selector::parse("tr[data-transaction-id]").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert!(text.contains("Jan 15, 2024"));
        assert!(text.contains("Salary"));
        assert!(text.contains("income"));
        assert!(text.contains("+$3,000.00"));
    }

    #[test]
    fn action_links_carry_list_state() {
        let html = render(&transactions(25), ListState::default().go_to(2));

        let edit = html
            .select(&Selector::parse("tr[data-transaction-id='11'] a").unwrap())
            .next()
            .unwrap();
        assert_eq!(edit.value().attr("href"), Some("/transactions?page=2&edit=11"));

        let delete = html
            .select(&Selector::parse("tr[data-transaction-id='11'] button[hx-get]").unwrap())
            .next()
            .unwrap();
        assert_eq!(
            delete.value().attr("hx-get"),
            Some("/transactions/11/delete?page=2")
        );
    }

    #[test]
    fn pager_links_keep_filters() {
        let pagination = PaginationConfig::default();
        let filter = FilterCriteria {
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        };
        let all = transactions(25);
        let list = TransactionList {
            transactions: &all,
            state: ListState::default(),
            filter: &filter,
            pagination: &pagination,
        };

        let html = Html::parse_fragment(&transaction_list_view(&list).into_string());

        let next = html
            .select(&Selector::parse("nav.pagination a[role=button]").unwrap())
            .find(|link| link.text().collect::<String>() == "Next")
            .expect("No next link");
        assert_eq!(
            next.value().attr("href"),
            Some("/transactions?transaction_type=expense&page=2")
        );
    }
}
