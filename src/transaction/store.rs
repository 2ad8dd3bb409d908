//! Defines the transaction store trait.

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Receipt, Transaction, TransactionFilter, TransactionUpdate},
};

/// Handles the creation, retrieval, update and deletion of transactions and
/// their receipts.
///
/// Each call is an independent operation, implementers do not need to
/// coordinate between calls beyond what the underlying storage provides.
pub trait TransactionStore {
    /// Store a new transaction, assigning it an ID.
    ///
    /// # Errors
    /// Returns an error if the transaction could not be stored.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve every stored transaction.
    ///
    /// # Errors
    /// Returns an error if the transactions could not be read.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions that match all the criteria set in `filter`.
    ///
    /// # Errors
    /// Returns an error if the transactions could not be read.
    fn filter(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the receipt attached to the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist or has no receipt.
    fn get_receipt(&self, id: TransactionId) -> Result<Receipt, Error>;

    /// Overwrite the fields of the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn update(&self, id: TransactionId, update: TransactionUpdate) -> Result<(), Error>;

    /// Remove the transaction `id` along with its receipt.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;
}
