//! Import and export of transactions as CSV files.
//!
//! Uploads are checked against the CSV contract before they are forwarded to
//! the backend, and exports are streamed back to the browser as downloads.

mod csv;
mod export_endpoint;
mod import_endpoint;
mod page;

pub use export_endpoint::{export_transactions_endpoint, get_sample_csv};
pub use import_endpoint::import_transactions_endpoint;
pub use page::get_import_export_page;
