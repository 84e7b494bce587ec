//! Transaction management for the finance app.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the payloads sent to the backend
//! - The transactions page with its filter panel, add form and paged table
//! - The endpoints that create, update and delete transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod filter;
mod form;
mod list;
mod query;
mod transactions_page;

pub use core::{
    Category, Transaction, TransactionCreate, TransactionId, TransactionType, TransactionUpdate,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{delete_transaction_endpoint, get_delete_transaction_dialog};
pub use edit_endpoint::edit_transaction_endpoint;
pub(crate) use query::empty_date_as_none;
pub use transactions_page::get_transactions_page;
