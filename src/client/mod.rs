//! A headless client for the transactions API.
//!
//! [TransactionClient] talks to the REST server over HTTP. On top of it,
//! [TransactionsWidget] holds the state of the transactions widget: the list,
//! the create/edit form, the receipt viewer and the live search, which runs
//! through a [SearchPipeline].

mod api;
mod error;
mod http;
mod receipt_viewer;
mod search;
mod transactions_widget;

pub use api::{ReceiptFile, TransactionApi, TransactionDraft};
pub use error::ClientError;
pub use http::{ClientConfig, TransactionClient};
pub use receipt_viewer::{ReceiptKind, ReceiptView};
pub use search::{SearchOutcome, SearchPipeline};
pub use transactions_widget::{CATEGORIES, SubmitOutcome, TransactionFormState, TransactionsWidget};
