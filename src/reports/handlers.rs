//! HTTP handler for the reports page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::FinanceApi,
    charts::{ChartView, category_chart, chart_container, charts_script, monthly_overview_chart},
    endpoints,
    html::{ECHARTS_SCRIPT, HeadElement, PAGE_CONTAINER_STYLE, base, card, error_banner},
    navigation::NavBar,
    page_state::{PageError, PageState},
    report::{CategoryReport, MonthlyReport},
    reports::tables::category_table,
    transaction::TransactionType,
};

/// The state needed for displaying the reports page.
#[derive(Clone)]
pub struct ReportsState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct ReportsData {
    monthly: Vec<MonthlyReport>,
    income_categories: Vec<CategoryReport>,
    expense_categories: Vec<CategoryReport>,
}

async fn fetch_reports(api: &dyn FinanceApi) -> Result<ReportsData, Error> {
    let (monthly, income_categories, expense_categories) = tokio::try_join!(
        api.monthly_report(),
        api.category_report(Some(TransactionType::Income)),
        api.category_report(Some(TransactionType::Expense)),
    )?;

    Ok(ReportsData {
        monthly,
        income_categories,
        expense_categories,
    })
}

/// Display the monthly overview and the income and expense breakdowns by category.
pub async fn get_reports_page(State(state): State<ReportsState>) -> Response {
    let mut page = PageState::<ReportsData>::new(None);
    let result = fetch_reports(state.api.as_ref()).await;
    page.finish_fetch(result, PageError::Reports);

    reports_view(&page).into_response()
}

fn reports_view(page: &PageState<ReportsData>) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let data = &page.data;
    let charts = [
        ChartView::new("monthly-overview-chart", &monthly_overview_chart(&data.monthly)),
        ChartView::new(
            "income-category-chart",
            &category_chart("Income by Category", &data.income_categories),
        ),
        ChartView::new(
            "expense-category-chart",
            &category_chart("Expenses by Category", &data.expense_categories),
        ),
    ];

    let income_section = html! {
        (chart_container(&charts[1]))
        (category_table(&data.income_categories, TransactionType::Income))
    };
    let expense_section = html! {
        (chart_container(&charts[2]))
        (category_table(&data.expense_categories, TransactionType::Expense))
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold" { "Reports" }

            @if let Some(error) = &page.error {
                (error_banner(error))
            }

            (card("Monthly Overview", &chart_container(&charts[0])))

            div class="grid grid-cols-1 gap-4 lg:grid-cols-2"
            {
                (card("Income by Category", &income_section))
                (card("Expenses by Category", &expense_section))
            }
        }
    };

    base(
        "Reports",
        &[
            HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
            charts_script(&charts),
        ],
        &content,
    )
}
