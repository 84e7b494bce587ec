//! Dashboard HTTP handler and view rendering.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    api::{DateRange, FinanceApi},
    charts::{ChartView, category_chart, chart_container, charts_script, monthly_trend_chart},
    dashboard::cards::summary_cards_view,
    endpoints,
    html::{ECHARTS_SCRIPT, HeadElement, PAGE_CONTAINER_STYLE, base, card, error_banner},
    navigation::NavBar,
    page_state::{PageError, PageState},
    report::{CategoryReport, MonthlyReport, ReportSummary, most_recent_months, top_categories},
    transaction::TransactionType,
};

/// The number of months shown in the trend chart.
const TREND_MONTHS: usize = 6;
/// The number of categories shown in the pie chart.
const TOP_CATEGORIES: usize = 5;

/// The state needed for displaying the dashboard page.
#[derive(Clone)]
pub struct DashboardState {
    /// The client for the finance REST API.
    pub api: Arc<dyn FinanceApi>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct DashboardData {
    summary: ReportSummary,
    monthly: Vec<MonthlyReport>,
    categories: Vec<CategoryReport>,
}

async fn fetch_dashboard_data(api: &dyn FinanceApi) -> Result<DashboardData, Error> {
    let all_time = DateRange::default();
    let (summary, monthly, categories) = tokio::try_join!(
        api.summary(&all_time),
        api.monthly_report(),
        api.category_report(Some(TransactionType::Expense)),
    )?;

    Ok(DashboardData {
        summary,
        monthly,
        categories,
    })
}

/// Display the summary cards, the recent monthly trend and the top expense categories.
///
/// The three reports are fetched concurrently, if any of them fails the page
/// shows zeroes and an error banner.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let mut page = PageState::<DashboardData>::new(None);
    let result = fetch_dashboard_data(state.api.as_ref()).await;
    page.finish_fetch(result, PageError::Dashboard);

    dashboard_view(&page).into_response()
}

fn dashboard_view(page: &PageState<DashboardData>) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let data = &page.data;
    let charts = [
        ChartView::new(
            "monthly-trend-chart",
            &monthly_trend_chart(most_recent_months(&data.monthly, TREND_MONTHS)),
        ),
        ChartView::new(
            "top-categories-chart",
            &category_chart(
                "Top Expense Categories",
                top_categories(&data.categories, TOP_CATEGORIES),
            ),
        ),
    ];

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold" { "Dashboard" }

            @if let Some(error) = &page.error {
                (error_banner(error))
            }

            (summary_cards_view(&data.summary))

            div class="grid grid-cols-1 gap-4 xl:grid-cols-3"
            {
                div class="xl:col-span-2"
                {
                    (card("Monthly Income vs Expenses", &chart_container(&charts[0])))
                }

                (card("Top Expense Categories", &chart_container(&charts[1])))
            }
        }
    };

    base(
        "Dashboard",
        &[
            HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
            charts_script(&charts),
        ],
        &content,
    )
}
