//! Dashboard module
//!
//! Provides an overview page with summary cards, the recent monthly trend and
//! the largest expense categories.

mod cards;
mod handlers;

pub use handlers::get_dashboard_page;
