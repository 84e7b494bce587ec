//! The summary cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{format::format_currency, html::CARD_STYLE, report::ReportSummary};

const INCOME_TEXT_STYLE: &str = "text-green-600 dark:text-green-400";
const EXPENSE_TEXT_STYLE: &str = "text-red-600 dark:text-red-400";

fn summary_card(title: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div class=(format!("{CARD_STYLE} p-6")) data-summary-card=(title)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            p class=(format!("mt-2 text-3xl font-bold {value_style}")) { (value) }
        }
    }
}

/// Total income, total expenses, net balance and the number of transactions.
///
/// The net balance is green when it is zero or positive and red otherwise.
pub(super) fn summary_cards_view(summary: &ReportSummary) -> Markup {
    let net_style = if summary.net_balance >= 0.0 {
        INCOME_TEXT_STYLE
    } else {
        EXPENSE_TEXT_STYLE
    };

    html! {
        section class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-4"
        {
            (summary_card("Total Income", &format_currency(summary.total_income), INCOME_TEXT_STYLE))
            (summary_card("Total Expenses", &format_currency(summary.total_expense), EXPENSE_TEXT_STYLE))
            (summary_card("Net Balance", &format_currency(summary.net_balance), net_style))
            (summary_card("Transactions", &summary.transaction_count.to_string(), ""))
        }
    }
}
