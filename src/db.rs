//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    transaction::{create_transaction_table, register_sql_functions},
};

/// Create the tables for the domain models if they do not exist yet and
/// register the SQL functions used by the stores.
///
/// The tables are created inside a single exclusive SQL transaction so that a
/// partially initialised database is never left behind.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_sql_functions(connection)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
