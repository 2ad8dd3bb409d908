//! The state of the transactions widget and the actions the user can take on it.

use std::time::Duration;

use tokio::time::Instant;

use crate::{
    FilterCriteria, Transaction, TransactionId,
    client::{
        ClientConfig, ClientError, ReceiptFile, ReceiptView, SearchOutcome, SearchPipeline,
        TransactionApi, TransactionDraft,
    },
    timestamp::{format_local_minutes, local_minutes_to_rfc3339},
    widget::{Panel, PanelConfig},
};

/// The categories offered in the form and the filter panel.
pub const CATEGORIES: [&str; 9] = [
    "Alquiler",
    "Boletos",
    "Peluquería",
    "Gimnasio",
    "Streaming",
    "Saldo",
    "Consumibles",
    "Pareja",
    "Imprevistos",
];

const CREATE_FAILED: &str = "Could not create the transaction. Check the fields.";
const UPDATE_FAILED: &str = "Could not update the transaction. Check the fields.";

/// The values entered in the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFormState {
    /// What the transaction was for.
    pub description: String,
    /// The amount as typed.
    pub amount: String,
    /// The currency code.
    pub currency: String,
    /// One of [CATEGORIES].
    pub category: String,
    /// "Ingreso" or "Gasto".
    pub kind: String,
    /// Whether `timestamp` is sent. Otherwise the server picks the time.
    pub use_custom_date: bool,
    /// The local date and time as `YYYY-MM-DDTHH:MM`, sent with the local offset.
    pub timestamp: String,
    /// Whether `receipt` is sent.
    pub attach_receipt: bool,
    /// The file picked to upload as the receipt.
    pub receipt: Option<ReceiptFile>,
}

impl TransactionFormState {
    fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            description: self.description.clone(),
            amount: self.amount.clone(),
            currency: self.currency.clone(),
            category: self.category.clone(),
            kind: self.kind.clone(),
            timestamp: self.use_custom_date.then(|| {
                local_minutes_to_rfc3339(&self.timestamp).unwrap_or_else(|| self.timestamp.clone())
            }),
            receipt: self
                .attach_receipt
                .then(|| self.receipt.clone())
                .flatten(),
        }
    }
}

/// What happened when the form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in progress, nothing was sent.
    Ignored,
    /// The transaction was saved, the form closed and the list reloaded.
    Saved,
    /// The transaction was not saved, show this message to the user.
    Failed(String),
}

/// The transactions widget: a panel listing transactions, with a
/// create/edit form, a receipt viewer and a live search.
///
/// List and search failures are logged and leave the current list on screen.
#[derive(Debug)]
pub struct TransactionsWidget<A: TransactionApi> {
    api: A,
    panel: Panel,
    transactions: Vec<Transaction>,
    form: TransactionFormState,
    show_form: bool,
    editing_id: Option<TransactionId>,
    has_existing_receipt: bool,
    remove_receipt: bool,
    receipt_view: Option<ReceiptView>,
    show_search: bool,
    filters: FilterCriteria,
    processing: bool,
    search: SearchPipeline,
    scroll_reset_delay: Duration,
    scroll_to_top_at: Option<Instant>,
}

impl<A: TransactionApi> TransactionsWidget<A> {
    /// Create an empty widget. Call [TransactionsWidget::load] to fill the list.
    ///
    /// Must be called inside a tokio runtime, the live search runs as a
    /// background task.
    pub fn new(api: A, config: &ClientConfig, panel_config: PanelConfig) -> Self {
        let search = SearchPipeline::new(api.clone(), config.search_debounce);

        Self {
            api,
            panel: Panel::new(panel_config),
            transactions: Vec::new(),
            form: TransactionFormState::default(),
            show_form: false,
            editing_id: None,
            has_existing_receipt: false,
            remove_receipt: false,
            receipt_view: None,
            show_search: false,
            filters: FilterCriteria::default(),
            processing: false,
            search,
            scroll_reset_delay: config.scroll_reset_delay,
            scroll_to_top_at: None,
        }
    }

    /// The panel the widget is shown in.
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// The panel the widget is shown in, for dragging and resizing.
    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// The transactions currently listed.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The values in the create/edit form.
    pub fn form(&self) -> &TransactionFormState {
        &self.form
    }

    /// The values in the create/edit form, for editing.
    pub fn form_mut(&mut self) -> &mut TransactionFormState {
        &mut self.form
    }

    /// Whether the create/edit form is showing.
    pub fn is_form_shown(&self) -> bool {
        self.show_form
    }

    /// The transaction being edited, if any.
    pub fn editing_id(&self) -> Option<TransactionId> {
        self.editing_id
    }

    /// Whether the transaction being edited already has a receipt.
    pub fn has_existing_receipt(&self) -> bool {
        self.has_existing_receipt
    }

    /// Whether the stored receipt will be replaced or removed on save.
    pub fn replaces_receipt(&self) -> bool {
        self.remove_receipt || self.form.to_draft().receipt.is_some()
    }

    /// The receipt being viewed, if any.
    pub fn receipt_view(&self) -> Option<&ReceiptView> {
        self.receipt_view.as_ref()
    }

    /// Whether the search panel is showing.
    pub fn is_search_shown(&self) -> bool {
        self.show_search
    }

    /// The criteria in the search panel.
    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Whether a submission is in progress.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Replace the list with every transaction.
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(transactions) => self.replace_transactions(transactions),
            Err(error) => tracing::error!("Could not load transactions: {error}"),
        }
    }

    fn replace_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.scroll_to_top_at = Some(Instant::now() + self.scroll_reset_delay);
    }

    /// Whether the list is due to scroll back to the top.
    ///
    /// The scroll is scheduled a short delay after the list is replaced so
    /// that the new rows are rendered first. Returns true once per replacement.
    pub fn take_scroll_to_top(&mut self) -> bool {
        match self.scroll_to_top_at {
            Some(due) if due <= Instant::now() => {
                self.scroll_to_top_at = None;
                true
            }
            _ => false,
        }
    }

    /// Open an empty form for a new transaction.
    pub fn show_form(&mut self) {
        self.form = TransactionFormState::default();
        self.show_form = true;
    }

    /// Close the form, discarding its values.
    pub fn cancel(&mut self) {
        self.editing_id = None;
        self.show_form = false;
        self.form = TransactionFormState::default();
    }

    /// Pick the file to upload as the receipt, or clear the selection.
    pub fn select_receipt(&mut self, file: Option<ReceiptFile>) {
        self.form.attach_receipt = file.is_some();
        self.form.receipt = file;
    }

    /// Mark the stored receipt of the transaction being edited for removal.
    pub fn remove_receipt(&mut self) {
        self.remove_receipt = true;
    }

    /// Open the form filled in with `transaction` for editing.
    pub fn edit(&mut self, transaction: &Transaction) {
        self.show_form = true;
        self.form = TransactionFormState {
            description: transaction.description.clone(),
            amount: transaction.amount.to_string(),
            currency: transaction.currency.clone(),
            category: transaction.category.clone(),
            kind: transaction.kind.to_string(),
            timestamp: format_local_minutes(transaction.timestamp),
            ..Default::default()
        };
        self.editing_id = Some(transaction.id);
        self.has_existing_receipt = transaction.has_receipt;
        self.remove_receipt = false;
    }

    /// Create or update the transaction in the form.
    ///
    /// Submitting again while a submission is in progress does nothing.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.processing {
            return SubmitOutcome::Ignored;
        }
        self.processing = true;

        let draft = self.form.to_draft();
        let result = match self.editing_id {
            Some(id) => {
                let replace_receipt = self.remove_receipt || draft.receipt.is_some();
                self.api
                    .update(id, draft, replace_receipt)
                    .await
                    .map_err(|error| (error, UPDATE_FAILED))
            }
            None => self
                .api
                .create(draft)
                .await
                .map(|_| ())
                .map_err(|error| (error, CREATE_FAILED)),
        };

        self.processing = false;

        match result {
            Ok(()) => {
                self.show_form = false;
                self.editing_id = None;
                self.has_existing_receipt = false;
                self.remove_receipt = false;
                self.form = TransactionFormState::default();
                self.load().await;
                SubmitOutcome::Saved
            }
            Err((error, fallback)) => {
                tracing::error!("Could not save transaction: {error}");
                SubmitOutcome::Failed(error.alert_message(fallback))
            }
        }
    }

    /// Delete the transaction `id` and reload the list.
    ///
    /// The caller is expected to have asked the user for confirmation.
    ///
    /// # Errors
    /// Returns the error from the API if the transaction could not be deleted.
    pub async fn delete(&mut self, id: TransactionId) -> Result<(), ClientError> {
        if let Err(error) = self.api.delete(id).await {
            tracing::error!("Could not delete transaction {id}: {error}");
            return Err(error);
        }

        self.load().await;
        Ok(())
    }

    /// Download the receipt of the transaction `id` and open it in the viewer.
    ///
    /// `over_form` shows the viewer on top of the form.
    pub async fn view_receipt(&mut self, id: TransactionId, over_form: bool) {
        match self.api.receipt(id).await {
            Ok(receipt) => self.receipt_view = Some(ReceiptView::new(receipt, over_form)),
            Err(error) => tracing::error!("Could not get receipt of transaction {id}: {error}"),
        }
    }

    /// Close the receipt viewer.
    pub fn close_receipt(&mut self) {
        self.receipt_view = None;
    }

    /// Open the search panel, unless the form or the receipt viewer is showing.
    ///
    /// Returns whether the search panel is showing.
    pub fn show_search(&mut self) -> bool {
        if !self.show_search && !self.show_form && self.receipt_view.is_none() {
            self.show_search = true;
        }

        self.show_search
    }

    /// Close the search panel, clearing the filters.
    pub async fn close_search(&mut self) {
        self.show_search = false;
        self.clear_filters().await;
    }

    /// Clear the filters and list every transaction again.
    pub async fn clear_filters(&mut self) {
        self.filters = FilterCriteria::default();
        self.search.reset();
        self.load().await;
    }

    /// Set the search criteria. The search runs once they stop changing.
    pub fn set_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters.clone();
        self.search.search(filters);
    }

    /// Wait for the next search to finish and show its results.
    ///
    /// Returns whether the list was replaced, or `None` if the search
    /// pipeline has stopped.
    pub async fn next_search_result(&mut self) -> Option<bool> {
        let outcome = self.search.next_outcome().await?;

        Some(self.apply_search_outcome(outcome))
    }

    /// Show the results of a search if it is the most recent one.
    ///
    /// Returns whether the list was replaced.
    pub fn apply_search_outcome(&mut self, outcome: SearchOutcome) -> bool {
        if !self.search.is_latest(&outcome) {
            tracing::debug!("Ignoring outdated search {}", outcome.generation);
            return false;
        }

        match outcome.result {
            Ok(transactions) => {
                self.replace_transactions(transactions);
                true
            }
            Err(error) => {
                tracing::error!("Error in live search: {error}");
                false
            }
        }
    }
}
