//! Route handler for downloading the receipt attached to a transaction.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    Error, app_state::TransactionState, database_id::TransactionId, transaction::TransactionStore,
};

/// A route handler that responds with the raw receipt file of a transaction.
///
/// The response carries the stored MIME type and offers the file as a
/// download named after the transaction ID. Responds with 404 if the
/// transaction does not exist or has no receipt.
pub async fn get_receipt_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error>
where
    T: TransactionStore + Clone + Send + Sync,
{
    let receipt = state.transaction_store.get_receipt(transaction_id)?;

    Ok((
        [
            (header::CONTENT_TYPE, receipt.mime_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"receipt_{transaction_id}\""),
            ),
        ],
        receipt.data,
    )
        .into_response())
}
