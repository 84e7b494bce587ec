//! Chart generation and rendering for the dashboard and reports pages.
//!
//! Charts are built as ECharts options with charming, serialised to JSON and
//! initialised by a small script once the page has loaded.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, ItemStyle,
        JsFunction, Tooltip, Trigger,
    },
    series::{bar::Bar, pie::Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    report::{CategoryReport, MonthlyReport},
};

const INCOME_COLOUR: &str = "#16a34a";
const EXPENSE_COLOUR: &str = "#dc2626";
const NET_COLOUR: &str = "#2563eb";

/// A chart with its HTML container ID and ECharts configuration.
pub struct ChartView {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl ChartView {
    pub fn new(id: &'static str, chart: &Chart) -> Self {
        Self {
            id,
            options: chart.to_string(),
        }
    }
}

/// Renders the HTML container for a single chart.
pub fn chart_container(chart: &ChartView) -> Markup {
    html!(
        div
            id=(chart.id)
            data-chart=""
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Chart options carry user text such as category names, which must not end
/// the surrounding `<script>` element.
fn escape_for_script(options: &str) -> String {
    options.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Generates JavaScript initialization code for `charts`.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub fn charts_script(charts: &[ChartView]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_for_script(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

fn month_labels(months: &[MonthlyReport]) -> Vec<String> {
    months.iter().map(|month| month.month.clone()).collect()
}

fn money_bar(name: &str, colour: &str, values: Vec<f64>) -> Bar {
    Bar::new()
        .name(name)
        .item_style(ItemStyle::new().color(colour))
        .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
        .data(values)
}

fn monthly_chart(title: &str, subtitle: &str, months: &[MonthlyReport]) -> Chart {
    Chart::new()
        .title(Title::new().text(title).subtext(subtitle))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%").right("4%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(month_labels(months)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(money_bar(
            "Income",
            INCOME_COLOUR,
            months.iter().map(|month| month.income).collect(),
        ))
        .series(money_bar(
            "Expense",
            EXPENSE_COLOUR,
            months.iter().map(|month| month.expense).collect(),
        ))
}

/// Income and expense bars for each of `months`.
pub fn monthly_trend_chart(months: &[MonthlyReport]) -> Chart {
    monthly_chart("Monthly Trend", "Most recent months", months)
}

/// Income, expense and net bars for each of `months`.
pub fn monthly_overview_chart(months: &[MonthlyReport]) -> Chart {
    monthly_chart("Monthly Overview", "Income, expenses and net by month", months).series(
        money_bar(
            "Net",
            NET_COLOUR,
            months.iter().map(|month| month.net).collect(),
        ),
    )
}

/// A doughnut chart of the category totals, in the order given.
pub fn category_chart(title: &str, categories: &[CategoryReport]) -> Chart {
    let data = categories
        .iter()
        .map(|category| (category.total, category.category.as_str()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
