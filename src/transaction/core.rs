//! Defines the core data models for transactions and their receipts.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{database_id::TransactionId, timestamp::truncate_to_seconds};

/// The MIME type reported for a receipt when none was recorded.
pub const DEFAULT_RECEIPT_MIME_TYPE: &str = "application/octet-stream";

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Money was earned.
    #[serde(rename = "Ingreso", alias = "income", alias = "Income")]
    Income,
    /// Money was spent.
    #[serde(rename = "Gasto", alias = "expense", alias = "Expense")]
    Expense,
}

impl Kind {
    /// All the kinds, in the order they are offered to the user.
    pub const ALL: [Kind; 2] = [Kind::Income, Kind::Expense];

    /// The name of the kind as it is stored and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "Ingreso",
            Kind::Expense => "Gasto",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a string does not name a [Kind].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a transaction kind, expected Ingreso or Gasto")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingreso" | "income" => Ok(Kind::Income),
            "gasto" | "expense" => Ok(Kind::Expense),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

/// A file attached to a transaction as proof of payment, e.g. a photo or PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The raw bytes of the file, stored unchanged.
    pub data: Vec<u8>,
    /// The MIME type of the file, e.g. "image/png".
    pub mime_type: String,
}

impl Receipt {
    /// Create a receipt, recording [DEFAULT_RECEIPT_MIME_TYPE] if `mime_type` is missing or blank.
    pub fn new(data: Vec<u8>, mime_type: Option<&str>) -> Self {
        let mime_type = match mime_type.map(str::trim) {
            Some(mime_type) if !mime_type.is_empty() => mime_type.to_owned(),
            _ => DEFAULT_RECEIPT_MIME_TYPE.to_owned(),
        };

        Self { data, mime_type }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The receipt itself is not part of this model, fetch it separately with
/// [TransactionStore::get_receipt](crate::TransactionStore::get_receipt).
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: Decimal,
    /// The currency code of `amount`, e.g. "USD".
    pub currency: String,
    /// The category of the transaction, e.g. "Alquiler".
    pub category: String,
    /// Whether the money was earned or spent.
    pub kind: Kind,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Whether a receipt is attached to the transaction.
    pub has_receipt: bool,
    /// The MIME type of the attached receipt.
    pub receipt_mime_type: Option<String>,
}

impl Transaction {
    /// Create a new transaction dated now, without a receipt.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        description: &str,
        amount: Decimal,
        currency: &str,
        category: &str,
        kind: Kind,
    ) -> NewTransaction {
        NewTransaction {
            description: description.to_owned(),
            amount,
            currency: currency.to_owned(),
            category: category.to_owned(),
            kind,
            timestamp: truncate_to_seconds(OffsetDateTime::now_utc()),
            receipt: None,
        }
    }
}

/// A transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: Decimal,
    /// The currency code of `amount`.
    pub currency: String,
    /// The category of the transaction.
    pub category: String,
    /// Whether the money was earned or spent.
    pub kind: Kind,
    /// When the transaction happened. Defaults to the time it was built.
    pub timestamp: OffsetDateTime,
    /// The optional receipt to store with the transaction.
    pub receipt: Option<Receipt>,
}

impl NewTransaction {
    /// Set when the transaction happened.
    pub fn timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = truncate_to_seconds(timestamp);
        self
    }

    /// Attach a receipt to the transaction.
    pub fn receipt(mut self, receipt: Option<Receipt>) -> Self {
        self.receipt = receipt;
        self
    }
}

/// What to do with the stored receipt when a transaction is updated.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReceiptUpdate {
    /// Leave the stored receipt as it is.
    #[default]
    Keep,
    /// Store this receipt in place of the current one, if any.
    Replace(Receipt),
    /// Remove the stored receipt.
    Clear,
}

/// The new field values for an existing transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionUpdate {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: Decimal,
    /// The currency code of `amount`.
    pub currency: String,
    /// The category of the transaction.
    pub category: String,
    /// Whether the money was earned or spent.
    pub kind: Kind,
    /// When the transaction happened, `None` keeps the stored timestamp.
    pub timestamp: Option<OffsetDateTime>,
    /// What to do with the stored receipt.
    pub receipt: ReceiptUpdate,
}
