//! Application router configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::get,
};

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    transaction::{
        TransactionStore, create_transaction_endpoint, delete_transaction_endpoint,
        filter_transactions_endpoint, get_receipt_endpoint, get_transaction_endpoint,
        get_transactions_endpoint, update_transaction_endpoint,
    },
};

/// The maximum size in bytes of a request body, which bounds the size of an
/// uploaded receipt.
pub const RECEIPT_SIZE_LIMIT: usize = 10 * 1024 * 1024;

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint::<T>).post(create_transaction_endpoint::<T>),
        )
        // Static segments take priority over the `{transaction_id}` capture,
        // so this never reaches the single transaction handlers.
        .route(
            endpoints::FILTER_TRANSACTIONS,
            get(filter_transactions_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<T>)
                .put(update_transaction_endpoint::<T>)
                .delete(delete_transaction_endpoint::<T>),
        )
        .route(
            endpoints::TRANSACTION_RECEIPT,
            get(get_receipt_endpoint::<T>),
        )
        .fallback(get_404_not_found)
        .layer(DefaultBodyLimit::max(RECEIPT_SIZE_LIMIT))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};

    use crate::{endpoints, transaction::test_utils::must_create_test_server};

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _) = must_create_test_server();

        server.get("/coffee").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let (server, _) = must_create_test_server();

        server
            .get("/transactions/rent")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_receipt_is_rejected() {
        let (server, _) = must_create_test_server();
        let form = MultipartForm::new()
            .add_text("description", "Rent")
            .add_text("amount", "500")
            .add_text("currency", "USD")
            .add_text("category", "Alquiler")
            .add_text("kind", "Gasto")
            .add_part(
                "receipt",
                Part::bytes(vec![0; super::RECEIPT_SIZE_LIMIT + 1]).file_name("huge.bin"),
            );

        let response = server.post(endpoints::TRANSACTIONS).multipart(form).await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }
}
