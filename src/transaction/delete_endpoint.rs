//! Route handler for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    Error, app_state::TransactionState, database_id::TransactionId, transaction::TransactionStore,
};

/// A route handler for deleting a transaction and its receipt.
///
/// Responds with 204 on success and 404 if the transaction does not exist.
pub async fn delete_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    state.transaction_store.delete(transaction_id)?;
    tracing::info!("Deleted transaction {transaction_id}");

    Ok(StatusCode::NO_CONTENT)
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
    async fn deletes_transaction() {
        let (server, store) = must_create_test_server();
        let rent = store
            .create(Transaction::build("Rent", Decimal::from(500), "USD", "Alquiler", Kind::Expense))
            .unwrap();
        let endpoint = format_endpoint(endpoints::TRANSACTION, rent.id);

        server
            .delete(&endpoint)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server.get(&endpoint).await.assert_status_not_found();
        server.delete(&endpoint).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn storage_failure_is_internal_server_error() {
        let server = must_create_broken_test_server();

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, 1))
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
