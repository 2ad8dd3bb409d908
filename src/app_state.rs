//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    transaction::{SQLiteTransactionStore, TransactionStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T = SQLiteTransactionStore>
where
    T: TransactionStore + Clone + Send + Sync,
{
    /// The store for managing [transactions](crate::Transaction) and their receipts.
    pub transaction_store: T,
}

impl AppState {
    /// Create a new [AppState] backed by a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            transaction_store: SQLiteTransactionStore::new(connection),
        })
    }
}

impl<T> AppState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    /// Create a new [AppState] from an existing store.
    pub fn with_store(transaction_store: T) -> Self {
        Self { transaction_store }
    }
}

/// The state needed by the transaction route handlers.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    /// The store for managing [transactions](crate::Transaction) and their receipts.
    pub transaction_store: T,
}

impl<T> FromRef<AppState<T>> for TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}
