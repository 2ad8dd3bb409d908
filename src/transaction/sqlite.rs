//! Implements a SQLite backed transaction store.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{
    Connection, Row,
    functions::{Context, FunctionFlags},
    params, params_from_iter,
    types::{Type, Value},
};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{
        DEFAULT_RECEIPT_MIME_TYPE, Kind, NewTransaction, Receipt, ReceiptUpdate, Transaction,
        TransactionFilter, TransactionStore, TransactionUpdate,
    },
};

/// Lowercases text with Unicode rules, unlike SQLite's built-in `lower`.
const CASEFOLD: &str = "casefold";

/// The columns read by [map_transaction_row], in order.
const TRANSACTION_COLUMNS: &str = "id, description, amount, currency, category, kind, timestamp, \
    receipt IS NOT NULL, receipt_mime_type";

/// Stores transactions and their receipts in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The transaction table and SQL functions must already exist, see
    /// [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let (receipt, receipt_mime_type) = match transaction.receipt {
            Some(receipt) => (Some(receipt.data), Some(receipt.mime_type)),
            None => (None, None),
        };

        let transaction = self
            .lock()?
            .prepare(&format!(
                "INSERT INTO \"transaction\" \
                 (description, amount, currency, category, kind, timestamp, receipt, receipt_mime_type) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.description,
                    transaction.amount.to_string(),
                    transaction.currency,
                    transaction.category,
                    transaction.kind.as_str(),
                    transaction.timestamp.unix_timestamp(),
                    receipt,
                    receipt_mime_type,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.filter(&TransactionFilter::default())
    }

    fn filter(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        if let Some(description) = &filter.description {
            query_parameters.push(Value::Text(contains_pattern(&description.to_lowercase())));
            where_clause_parts.push(format!(
                "{CASEFOLD}(description) LIKE ?{} ESCAPE '\\'",
                query_parameters.len()
            ));
        }

        if let Some(kind) = &filter.kind {
            query_parameters.push(Value::Text(kind.clone()));
            where_clause_parts.push(format!("kind = ?{}", query_parameters.len()));
        }

        if let Some(category) = &filter.category {
            query_parameters.push(Value::Text(category.clone()));
            where_clause_parts.push(format!("category = ?{}", query_parameters.len()));
        }

        if let Some(from) = filter.from {
            query_parameters.push(Value::Integer(from.unix_timestamp()));
            where_clause_parts.push(format!("timestamp >= ?{}", query_parameters.len()));
        }

        if let Some(to) = filter.to {
            query_parameters.push(Value::Integer(to.unix_timestamp()));
            where_clause_parts.push(format!("timestamp <= ?{}", query_parameters.len()));
        }

        if let Some(mime_type) = &filter.mime_type {
            query_parameters.push(Value::Text(contains_pattern(mime_type)));
            where_clause_parts.push(format!(
                "receipt_mime_type LIKE ?{} ESCAPE '\\'",
                query_parameters.len()
            ));
        }

        let mut query_string = format!("SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"");

        if !where_clause_parts.is_empty() {
            query_string.push_str(" WHERE ");
            query_string.push_str(&where_clause_parts.join(" AND "));
        }

        // Newest first, then by ID to keep the order stable after updates.
        query_string.push_str(" ORDER BY timestamp DESC, id DESC");

        self.lock()?
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::from))
            .collect()
    }

    fn get_receipt(&self, id: TransactionId) -> Result<Receipt, Error> {
        let (data, mime_type): (Option<Vec<u8>>, Option<String>) = self
            .lock()?
            .query_row(
                "SELECT receipt, receipt_mime_type FROM \"transaction\" WHERE id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;

        let data = data.ok_or(Error::NotFound)?;
        let mime_type = mime_type.unwrap_or_else(|| DEFAULT_RECEIPT_MIME_TYPE.to_owned());

        Ok(Receipt { data, mime_type })
    }

    fn update(&self, id: TransactionId, update: TransactionUpdate) -> Result<(), Error> {
        let mut query_parameters = vec![
            Value::Text(update.description),
            Value::Text(update.amount.to_string()),
            Value::Text(update.currency),
            Value::Text(update.category),
            Value::Text(update.kind.as_str().to_owned()),
            update
                .timestamp
                .map_or(Value::Null, |timestamp| Value::Integer(timestamp.unix_timestamp())),
        ];

        let receipt_assignment = match update.receipt {
            ReceiptUpdate::Keep => "",
            ReceiptUpdate::Replace(receipt) => {
                query_parameters.push(Value::Blob(receipt.data));
                query_parameters.push(Value::Text(receipt.mime_type));
                ", receipt = ?8, receipt_mime_type = ?9"
            }
            ReceiptUpdate::Clear => ", receipt = NULL, receipt_mime_type = NULL",
        };

        // The ID is always the seventh parameter, the receipt parameters follow it.
        query_parameters.insert(6, Value::Integer(id));

        let rows_affected = self.lock()?.execute(
            &format!(
                "UPDATE \"transaction\" SET \
                    description = ?1, \
                    amount = ?2, \
                    currency = ?3, \
                    category = ?4, \
                    kind = ?5, \
                    timestamp = COALESCE(?6, timestamp)\
                    {receipt_assignment} \
                WHERE id = ?7"
            ),
            params_from_iter(query_parameters.iter()),
        )?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }

    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}

/// Build a `LIKE` pattern that matches any text containing `needle`.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                currency TEXT NOT NULL,
                category TEXT NOT NULL,
                kind TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                receipt BLOB,
                receipt_mime_type TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_timestamp ON \"transaction\"(timestamp);",
        (),
    )?;

    Ok(())
}

/// Register the SQL functions the store queries rely on.
///
/// Functions live on the connection, not in the database file, so this must
/// be called for every new connection.
///
/// # Errors
/// Returns an error if SQLite rejects the function.
pub fn register_sql_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        CASEFOLD,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context: &Context<'_>| {
            let text = context.get::<Option<String>>(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}

/// Map a database row selected with [TRANSACTION_COLUMNS] to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get::<_, String>(2)?;
    let amount = Decimal::from_str(&amount)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;
    let currency = row.get(3)?;
    let category = row.get(4)?;
    let kind = row.get::<_, String>(5)?;
    let kind = Kind::from_str(&kind)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error)))?;
    let timestamp = OffsetDateTime::from_unix_timestamp(row.get(6)?).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(6, Type::Integer, Box::new(error))
    })?;
    let has_receipt = row.get(7)?;
    let receipt_mime_type = row.get(8)?;

    Ok(Transaction {
        id,
        description,
        amount,
        currency,
        category,
        kind,
        timestamp,
        has_receipt,
        receipt_mime_type,
    })
}

// ============================================================================
// TESTS
// ============================================================================
