//! The errors returned by the transactions API client.

use crate::FieldErrors;

/// The errors that may occur when calling the transactions API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The filter criteria could not be encoded as a query string.
    #[error("could not encode filter criteria: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),

    /// The transaction or receipt does not exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The server rejected a form because of invalid fields.
    #[error("{title}")]
    Validation {
        /// A summary of the problem.
        title: String,
        /// The error messages for each invalid field.
        errors: FieldErrors,
    },

    /// The server rejected the request with a message, e.g. a reversed date range.
    #[error("the request was rejected: {0}")]
    Rejected(String),

    /// The server failed to handle the request.
    #[error("server error: {message}: {detail}")]
    Server {
        /// A summary of what the server was trying to do.
        message: String,
        /// The diagnostic message of the failure.
        detail: String,
    },
}

impl ClientError {
    /// The text to show the user in a blocking alert.
    ///
    /// A message from the server is shown as is. Field errors are listed one
    /// per line. Anything else shows `fallback`.
    pub fn alert_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            ClientError::Validation { errors, .. } if !errors.is_empty() => errors
                .values()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
            _ => fallback.to_owned(),
        }
    }
}
