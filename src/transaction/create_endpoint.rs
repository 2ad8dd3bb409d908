//! Route handler for creating a transaction from a multipart form.

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::{
    Error,
    app_state::TransactionState,
    transaction::{Transaction, TransactionStore, form::TransactionForm},
};

/// A route handler for creating a new transaction, with an optional receipt file.
///
/// Responds with the stored transaction, or with 400 and the errors for each
/// invalid field.
pub async fn create_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    mut multipart: Multipart,
) -> Result<Json<Transaction>, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let new_transaction = TransactionForm::from_multipart(&mut multipart)
        .await?
        .into_new_transaction()?;

    let transaction = state.transaction_store.create(new_transaction)?;
    tracing::info!("Created transaction {}", transaction.id);

    Ok(Json(transaction))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        ValidationErrorBody,
        endpoints::{self, format_endpoint},
        transaction::{
            Kind, Transaction, TransactionStore,
            test_utils::{must_create_broken_test_server, must_create_test_server},
        },
    };

    fn rent_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("description", "Rent")
            .add_text("amount", "500")
            .add_text("currency", "USD")
            .add_text("category", "Alquiler")
            .add_text("kind", "Gasto")
    }

    #[tokio::test]
    async fn created_transaction_can_be_fetched_and_has_no_receipt() {
        let (server, _) = must_create_test_server();

        let response = server.post(endpoints::TRANSACTIONS).multipart(rent_form()).await;

        response.assert_status_ok();
        let created = response.json::<Transaction>();
        assert!(created.id > 0);
        assert_eq!(created.description, "Rent");
        assert_eq!(created.amount, Decimal::from(500));
        assert_eq!(created.currency, "USD");
        assert_eq!(created.category, "Alquiler");
        assert_eq!(created.kind, Kind::Expense);
        assert!(!created.has_receipt);

        let fetched = server
            .get(&format_endpoint(endpoints::TRANSACTION, created.id))
            .await
            .json::<Transaction>();
        assert_eq!(fetched, created);

        server
            .get(&format_endpoint(endpoints::TRANSACTION_RECEIPT, created.id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn stores_uploaded_receipt() {
        let (server, store) = must_create_test_server();
        let form = rent_form().add_part(
            "receipt",
            Part::bytes(b"paid in full".to_vec())
                .file_name("rent.txt")
                .mime_type("text/plain"),
        );

        let created = server
            .post(endpoints::TRANSACTIONS)
            .multipart(form)
            .await
            .json::<Transaction>();

        assert!(created.has_receipt);
        assert_eq!(created.receipt_mime_type.as_deref(), Some("text/plain"));
        let receipt = store.get_receipt(created.id).unwrap();
        assert_eq!(receipt.data, b"paid in full");
    }

    #[tokio::test]
    async fn uses_submitted_timestamp() {
        let (server, _) = must_create_test_server();
        let form = rent_form().add_text("timestamp", "2025-03-01T08:15:00Z");

        let created = server
            .post(endpoints::TRANSACTIONS)
            .multipart(form)
            .await
            .json::<Transaction>();

        assert_eq!(created.timestamp, datetime!(2025-03-01 08:15:00 UTC));
    }

    #[tokio::test]
    async fn invalid_form_reports_field_errors() {
        let (server, store) = must_create_test_server();
        let form = MultipartForm::new()
            .add_text("description", "Rent")
            .add_text("amount", "five hundred")
            .add_text("currency", "USD")
            .add_text("kind", "Gasto");

        let response = server.post(endpoints::TRANSACTIONS).multipart(form).await;

        response.assert_status_bad_request();
        let body = response.json::<ValidationErrorBody>();
        assert_eq!(body.title, "One or more validation errors occurred.");
        assert!(body.errors.contains_key("amount"));
        assert!(body.errors.contains_key("category"));
        assert!(store.get_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_multipart_body_is_rejected() {
        let (server, _) = must_create_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .text("description=Rent")
            .await;

        assert!(response.status_code().is_client_error());
    }

    #[tokio::test]
    async fn storage_failure_is_internal_server_error() {
        let server = must_create_broken_test_server();

        let response = server.post(endpoints::TRANSACTIONS).multipart(rent_form()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
