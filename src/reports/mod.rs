//! Reports module
//!
//! Monthly income, expense and net totals plus the income and expense
//! breakdowns by category, each as a chart and a table.

mod handlers;
mod tables;

pub use handlers::get_reports_page;
