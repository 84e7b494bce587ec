//! Category breakdown tables shown under the category charts.

use maud::{Markup, html};

use crate::{
    format::format_currency,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE},
    report::CategoryReport,
    transaction::TransactionType,
};

/// A table with one row per category, totals coloured by `transaction_type`.
pub(super) fn category_table(
    categories: &[CategoryReport],
    transaction_type: TransactionType,
) -> Markup {
    let total_style = match transaction_type {
        TransactionType::Income => "text-green-600 dark:text-green-400",
        TransactionType::Expense => "text-red-600 dark:text-red-400",
    };

    html! {
        div class="relative overflow-x-auto mt-4"
        {
            table
                class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                data-category-table=(transaction_type.as_str())
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Count" }
                    }
                }

                tbody
                {
                    @for category in categories {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (category.category) }
                            td class=(format!("{TABLE_CELL_STYLE} font-medium {total_style}"))
                            {
                                (format_currency(category.total))
                            }
                            td class=(TABLE_CELL_STYLE) { (category.count) }
                        }
                    }

                    @if categories.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="3" class=(TABLE_CELL_STYLE) data-empty=""
                            {
                                "No data"
                            }
                        }
                    }
                }
            }
        }
    }
}
