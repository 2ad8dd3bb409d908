//! Route handler for editing a transaction.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use crate::{
    Error,
    app_state::TransactionState,
    database_id::TransactionId,
    transaction::{TransactionStore, form::TransactionForm},
};

/// A route handler for overwriting the fields of a transaction.
///
/// The form is validated before the transaction is looked up, so an invalid
/// form for a missing transaction responds with 400 rather than 404.
pub async fn update_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<TransactionId>,
    mut multipart: Multipart,
) -> Result<StatusCode, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let update = TransactionForm::from_multipart(&mut multipart)
        .await?
        .into_transaction_update()?;

    state.transaction_store.update(transaction_id, update)?;
    tracing::info!("Updated transaction {transaction_id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        endpoints::{self, format_endpoint},
        transaction::{
            Kind, Receipt, Transaction, TransactionStore, test_utils::must_create_test_server,
        },
    };

    fn salary_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("description", "Salary")
            .add_text("amount", "2500.50")
            .add_text("currency", "eur")
            .add_text("category", "Saldo")
            .add_text("kind", "Ingreso")
    }

    fn must_create_rent(store: &impl TransactionStore) -> Transaction {
        store
            .create(
                Transaction::build("Rent", Decimal::from(500), "USD", "Alquiler", Kind::Expense)
                    .timestamp(datetime!(2025-01-01 10:00:00 UTC))
                    .receipt(Some(Receipt::new(vec![1, 2, 3], Some("image/png")))),
            )
            .unwrap()
    }

    #[tokio::test]
    async fn overwrites_fields_and_keeps_receipt() {
        let (server, store) = must_create_test_server();
        let rent = must_create_rent(&store);

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, rent.id))
            .multipart(salary_form())
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.as_bytes().is_empty());
        let updated = store.get(rent.id).unwrap();
        assert_eq!(updated.description, "Salary");
        assert_eq!(updated.amount, Decimal::new(250050, 2));
        assert_eq!(updated.currency, "EUR");
        assert_eq!(updated.kind, Kind::Income);
        assert_eq!(updated.timestamp, rent.timestamp);
        assert!(updated.has_receipt);
    }

    #[tokio::test]
    async fn replaces_receipt_when_flag_is_set() {
        let (server, store) = must_create_test_server();
        let rent = must_create_rent(&store);
        let form = salary_form().add_text("replace_receipt", "true").add_part(
            "receipt",
            Part::bytes(b"%PDF-1.7".to_vec())
                .file_name("payslip.pdf")
                .mime_type("application/pdf"),
        );

        server
            .put(&format_endpoint(endpoints::TRANSACTION, rent.id))
            .multipart(form)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let receipt = store.get_receipt(rent.id).unwrap();
        assert_eq!(receipt, Receipt::new(b"%PDF-1.7".to_vec(), Some("application/pdf")));
    }

    #[tokio::test]
    async fn clears_receipt_when_flag_is_set_without_file() {
        let (server, store) = must_create_test_server();
        let rent = must_create_rent(&store);

        server
            .put(&format_endpoint(endpoints::TRANSACTION, rent.id))
            .multipart(salary_form().add_text("replace_receipt", "true"))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let updated = store.get(rent.id).unwrap();
        assert!(!updated.has_receipt);
        assert_eq!(updated.receipt_mime_type, None);
        server
            .get(&format_endpoint(endpoints::TRANSACTION_RECEIPT, rent.id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let (server, _) = must_create_test_server();

        server
            .put(&format_endpoint(endpoints::TRANSACTION, 99))
            .multipart(salary_form())
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_before_lookup() {
        let (server, _) = must_create_test_server();
        let form = MultipartForm::new().add_text("description", "Salary");

        server
            .put(&format_endpoint(endpoints::TRANSACTION, 99))
            .multipart(form)
            .await
            .assert_status_bad_request();
    }
}
