//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its receipt and the filter criteria
//! - The `TransactionStore` trait and its SQLite implementation
//! - The REST route handlers and the multipart form they read

mod core;
mod create_endpoint;
mod delete_endpoint;
mod filter;
mod filter_endpoint;
mod form;
mod list_endpoint;
mod receipt_endpoint;
mod sqlite;
mod store;
mod update_endpoint;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{
    DEFAULT_RECEIPT_MIME_TYPE, Kind, NewTransaction, ParseKindError, Receipt, ReceiptUpdate,
    Transaction, TransactionUpdate,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use filter::{FilterCriteria, TransactionFilter};
pub use filter_endpoint::filter_transactions_endpoint;
pub use list_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
pub use receipt_endpoint::get_receipt_endpoint;
pub use sqlite::{SQLiteTransactionStore, create_transaction_table, register_sql_functions};
pub use store::TransactionStore;
pub use update_endpoint::update_transaction_endpoint;
