//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use [format_endpoint].

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to get, update or delete a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route to search transactions by their attributes.
pub const FILTER_TRANSACTIONS: &str = "/transactions/filter";
/// The route to download the receipt attached to a transaction.
pub const TRANSACTION_RECEIPT: &str = "/transactions/{transaction_id}/receipt";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with the next right brace.
/// For example, in the endpoint path '/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter. Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}
