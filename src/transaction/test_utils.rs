//! Helpers shared by the transaction tests.

use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState, Error, build_router,
    database_id::TransactionId,
    db::initialize,
    transaction::{
        NewTransaction, Receipt, SQLiteTransactionStore, Transaction, TransactionFilter,
        TransactionStore, TransactionUpdate,
    },
};

pub(crate) fn must_create_test_store() -> SQLiteTransactionStore {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&connection).expect("could not initialize test DB");

    SQLiteTransactionStore::new(Arc::new(Mutex::new(connection)))
}

/// Create a test server with the full router over a fresh in-memory database.
pub(crate) fn must_create_test_server() -> (TestServer, SQLiteTransactionStore) {
    let store = must_create_test_store();
    let app = build_router(AppState::with_store(store.clone()));
    let server = TestServer::new(app);

    (server, store)
}

/// A store whose every operation fails as if the database had gone away.
#[derive(Debug, Clone)]
pub(crate) struct BrokenStore;

impl BrokenStore {
    fn error() -> Error {
        Error::SqlError(rusqlite::Error::InvalidQuery)
    }
}

impl TransactionStore for BrokenStore {
    fn create(&self, _transaction: NewTransaction) -> Result<Transaction, Error> {
        Err(Self::error())
    }

    fn get(&self, _id: TransactionId) -> Result<Transaction, Error> {
        Err(Self::error())
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        Err(Self::error())
    }

    fn filter(&self, _filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        Err(Self::error())
    }

    fn get_receipt(&self, _id: TransactionId) -> Result<Receipt, Error> {
        Err(Self::error())
    }

    fn update(&self, _id: TransactionId, _update: TransactionUpdate) -> Result<(), Error> {
        Err(Self::error())
    }

    fn delete(&self, _id: TransactionId) -> Result<(), Error> {
        Err(Self::error())
    }
}

pub(crate) fn must_create_broken_test_server() -> TestServer {
    let app = build_router(AppState::with_store(BrokenStore));

    TestServer::new(app)
}
