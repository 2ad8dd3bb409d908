use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use tallybook_rs::{
    Kind, Receipt, SQLiteTransactionStore, Transaction, TransactionStore, initialize_db,
};

/// A utility for creating a test database for the REST API server of tallybook_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
    let now = OffsetDateTime::now_utc();

    println!("Creating test transactions...");

    let samples = [
        ("Salary", Decimal::new(350_000, 2), "Saldo", Kind::Income, 30),
        ("Rent", Decimal::from(500), "Alquiler", Kind::Expense, 28),
        ("Bus pass", Decimal::new(4_250, 2), "Boletos", Kind::Expense, 20),
        ("Haircut", Decimal::from(25), "Peluquería", Kind::Expense, 14),
        ("Gym membership", Decimal::from(40), "Gimnasio", Kind::Expense, 10),
        ("Streaming subscription", Decimal::new(1_299, 2), "Streaming", Kind::Expense, 5),
        ("Dinner out", Decimal::new(6_480, 2), "Pareja", Kind::Expense, 2),
    ];

    for (description, amount, category, kind, days_ago) in samples {
        store.create(
            Transaction::build(description, amount, "USD", category, kind)
                .timestamp(now - Duration::days(days_ago)),
        )?;
    }

    store.create(
        Transaction::build(
            "Printer ink",
            Decimal::new(3_199, 2),
            "USD",
            "Consumibles",
            Kind::Expense,
        )
        .timestamp(now - Duration::days(1))
        .receipt(Some(Receipt::new(
            b"Office Supplies Co.\nPrinter ink x2    31.99\nTotal             31.99\n".to_vec(),
            Some("text/plain"),
        ))),
    )?;

    println!("Success!");

    Ok(())
}
