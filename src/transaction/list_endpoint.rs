//! Route handlers for reading transactions.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    app_state::TransactionState,
    database_id::TransactionId,
    transaction::{Transaction, TransactionStore},
};

/// A route handler that lists every transaction, newest first.
pub async fn get_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.get_all().map(Json)
}

/// A route handler for getting a transaction by its ID.
///
/// Responds with 404 if the transaction does not exist.
pub async fn get_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.get(transaction_id).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rust_decimal::Decimal;

    use crate::{
        endpoints::{self, format_endpoint},
        transaction::{
            Kind, Transaction, TransactionStore,
            test_utils::{must_create_broken_test_server, must_create_test_server},
        },
    };

    #[tokio::test]
    async fn lists_all_transactions() {
        let (server, store) = must_create_test_server();
        let rent = store
            .create(Transaction::build("Rent", Decimal::from(500), "USD", "Alquiler", Kind::Expense))
            .unwrap();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Transaction>>(), vec![rent]);
    }

    #[tokio::test]
    async fn lists_nothing_for_empty_store() {
        let (server, _) = must_create_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        assert!(response.json::<Vec<Transaction>>().is_empty());
    }

    #[tokio::test]
    async fn gets_transaction_by_id() {
        let (server, store) = must_create_test_server();
        let rent = store
            .create(Transaction::build("Rent", Decimal::from(500), "USD", "Alquiler", Kind::Expense))
            .unwrap();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, rent.id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Transaction>(), rent);
    }

    #[tokio::test]
    async fn get_missing_transaction_is_not_found() {
        let (server, _) = must_create_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, 42))
            .await;

        response.assert_status_not_found();
        assert!(response.as_bytes().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_internal_server_error() {
        let server = must_create_broken_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
