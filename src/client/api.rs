//! The operations the widget needs from the transactions API.

use std::future::Future;

use crate::{
    FilterCriteria, Receipt, Transaction, TransactionId, client::ClientError,
};

/// A file picked by the user to attach as a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    /// The name of the file on the user's machine.
    pub file_name: String,
    /// The MIME type of the file, e.g. "application/pdf".
    pub mime_type: String,
    /// The contents of the file.
    pub data: Vec<u8>,
}

/// The fields submitted to create or update a transaction.
///
/// Values are sent as entered, the server validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    /// What the transaction was for.
    pub description: String,
    /// The amount as entered, e.g. "12.50".
    pub amount: String,
    /// The currency code, e.g. "USD".
    pub currency: String,
    /// One of the [CATEGORIES](crate::client::CATEGORIES).
    pub category: String,
    /// "Ingreso" or "Gasto".
    pub kind: String,
    /// When the transaction happened, omitted to use the current time (create)
    /// or keep the stored time (update).
    pub timestamp: Option<String>,
    /// The receipt file to upload.
    pub receipt: Option<ReceiptFile>,
}

/// The transactions API as seen by the widget.
///
/// [TransactionClient](crate::client::TransactionClient) implements it over
/// HTTP, tests can swap in a fake.
pub trait TransactionApi: Clone + Send + Sync + 'static {
    /// Fetch every transaction, newest first.
    fn list(&self) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send;

    /// Fetch the transactions matching `criteria`.
    fn filter(
        &self,
        criteria: FilterCriteria,
    ) -> impl Future<Output = Result<Vec<Transaction>, ClientError>> + Send;

    /// Fetch a single transaction.
    fn get(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<Transaction, ClientError>> + Send;

    /// Create a transaction from `draft`.
    fn create(
        &self,
        draft: TransactionDraft,
    ) -> impl Future<Output = Result<Transaction, ClientError>> + Send;

    /// Overwrite the transaction `id` with `draft`.
    ///
    /// When `replace_receipt` is set, the stored receipt is replaced by the
    /// draft's receipt, or removed if the draft has none.
    fn update(
        &self,
        id: TransactionId,
        draft: TransactionDraft,
        replace_receipt: bool,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Delete the transaction `id`.
    fn delete(&self, id: TransactionId) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Download the receipt of the transaction `id`.
    fn receipt(&self, id: TransactionId)
    -> impl Future<Output = Result<Receipt, ClientError>> + Send;
}
