//! Route handler for searching transactions.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    app_state::TransactionState,
    transaction::{FilterCriteria, TransactionFilter, TransactionStore},
};

/// A route handler that returns the transactions matching the query criteria.
///
/// Responds with 400 if `from` is later than `to`. Storage failures respond
/// with 500 and the diagnostic message of the failure.
pub async fn filter_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Query(criteria): Query<FilterCriteria>,
) -> Response
where
    T: TransactionStore + Clone + Send + Sync,
{
    let filter = match TransactionFilter::try_from(criteria) {
        Ok(filter) => filter,
        Err(error) => return error.into_response(),
    };

    match state.transaction_store.filter(&filter) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_server_error_response("Error filtering transactions"),
    }
}
