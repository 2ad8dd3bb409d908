//! Tallybook is a small web app for tracking personal income and expenses.
//!
//! This library provides:
//! - a REST API for managing transactions and their receipt attachments,
//! - a headless client for that API, including the debounced live search
//!   and the view-model of the transactions widget,
//! - the geometry of the draggable, resizable widget panels.

#![warn(missing_docs)]

use std::{collections::BTreeMap, net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
pub mod client;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod routing;
mod timestamp;
mod transaction;
pub mod widget;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use endpoints::format_endpoint;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::{RECEIPT_SIZE_LIMIT, build_router};
pub use transaction::{
    DEFAULT_RECEIPT_MIME_TYPE, FilterCriteria, Kind, NewTransaction, ParseKindError, Receipt,
    ReceiptUpdate, SQLiteTransactionStore, Transaction, TransactionFilter, TransactionStore,
    TransactionUpdate,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// Validation messages keyed by the name of the offending form field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The start of a date range was later than its end.
    #[error("the start date cannot be later than the end date")]
    InvalidDateRange,

    /// A create or update form failed validation.
    ///
    /// Holds the error messages for each invalid field so that the client can
    /// show them to the user.
    #[error("the submitted form is invalid: {0:?}")]
    Validation(FieldErrors),

    /// The multipart form could not be read.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The body of a client error response that carries a single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    /// A human readable description of the problem.
    pub message: String,
}

/// The body of a validation error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    /// A summary of the problem.
    pub title: String,
    /// The error messages for each invalid field.
    pub errors: FieldErrors,
}

/// The body of an internal server error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerErrorBody {
    /// A summary of what the server was trying to do.
    pub message: String,
    /// The diagnostic message of the underlying error.
    pub detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody {
                    message: "The start date cannot be later than the end date.".to_owned(),
                }),
            )
                .into_response(),
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    title: "One or more validation errors occurred.".to_owned(),
                    errors,
                }),
            )
                .into_response(),
            Error::MultipartError(message) => {
                (StatusCode::BAD_REQUEST, Json(MessageBody { message })).into_response()
            }
            Error::NotFound => StatusCode::NOT_FOUND.into_response(),
            error => error.into_server_error_response("An unexpected error occurred"),
        }
    }
}

impl Error {
    /// Respond with a 500 status whose body pairs `message` with the
    /// diagnostic text of this error.
    fn into_server_error_response(self, message: &str) -> Response {
        tracing::error!("{message}: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ServerErrorBody {
                message: message.to_owned(),
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, FieldErrors};

    #[test]
    fn not_found_has_no_body() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("content-type").is_none());
    }

    #[test]
    fn validation_is_bad_request() {
        let mut errors = FieldErrors::new();
        errors.insert("amount".to_owned(), vec!["Amount is required.".to_owned()]);

        let response = Error::Validation(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
