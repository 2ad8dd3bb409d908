//! The debounced live search behind the filter panel.
//!
//! Criteria edits are written to a single-slot `watch` channel. A background
//! task waits for the criteria to stay unchanged for the debounce period,
//! then sends one search with the latest criteria. Each search is numbered
//! with a generation, and starting a search aborts the one in flight, so only
//! the result of the latest search is ever delivered.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::{
    FilterCriteria, Transaction,
    client::{ClientError, TransactionApi},
};

/// The result of one search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The generation of the search that produced this outcome.
    pub generation: u64,
    /// The matching transactions, or why the search failed.
    pub result: Result<Vec<Transaction>, ClientError>,
}

/// Runs searches in the background as the criteria change.
///
/// Must be created inside a tokio runtime. The background task stops when the
/// pipeline is dropped.
#[derive(Debug)]
pub struct SearchPipeline {
    criteria: watch::Sender<Option<FilterCriteria>>,
    generation: Arc<AtomicU64>,
    outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    task: JoinHandle<()>,
}

impl SearchPipeline {
    /// Start the background task that searches through `api`.
    pub fn new<A: TransactionApi>(api: A, debounce: Duration) -> Self {
        let (criteria_sender, criteria_receiver) = watch::channel(None);
        let (outcome_sender, outcome_receiver) = mpsc::unbounded_channel();
        let generation = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(run_searches(
            api,
            debounce,
            criteria_receiver,
            outcome_sender,
            generation.clone(),
        ));

        Self {
            criteria: criteria_sender,
            generation,
            outcomes: outcome_receiver,
            task,
        }
    }

    /// Queue a search for `criteria`, replacing any criteria still waiting
    /// out the debounce period.
    pub fn search(&self, criteria: FilterCriteria) {
        self.criteria.send_replace(Some(criteria));
    }

    /// Drop any queued criteria and any search in flight.
    ///
    /// Outcomes of searches started before the reset are never delivered.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.criteria.send_replace(None);
    }

    /// The generation of the most recent search or reset.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether `outcome` came from the most recent search.
    pub fn is_latest(&self, outcome: &SearchOutcome) -> bool {
        outcome.generation == self.latest_generation()
    }

    /// Wait for the next search outcome.
    ///
    /// Returns `None` if the background task has stopped.
    pub async fn next_outcome(&mut self) -> Option<SearchOutcome> {
        self.outcomes.recv().await
    }
}

impl Drop for SearchPipeline {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_searches<A: TransactionApi>(
    api: A,
    debounce: Duration,
    mut criteria: watch::Receiver<Option<FilterCriteria>>,
    outcomes: mpsc::UnboundedSender<SearchOutcome>,
    generation: Arc<AtomicU64>,
) {
    let mut in_flight: Option<JoinHandle<()>> = None;

    while criteria.changed().await.is_ok() {
        // Each edit restarts the quiet period.
        loop {
            tokio::select! {
                _ = tokio::time::sleep(debounce) => break,
                changed = criteria.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        if let Some(search) = in_flight.take() {
            search.abort();
        }

        let Some(latest) = criteria.borrow_and_update().clone() else {
            tracing::debug!("Search criteria were reset, skipping search");
            continue;
        };

        let search_generation = generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Starting search {search_generation} for {latest:?}");

        let api = api.clone();
        let outcomes = outcomes.clone();
        let generation = generation.clone();

        in_flight = Some(tokio::spawn(async move {
            let result = api.filter(latest).await;

            if generation.load(Ordering::SeqCst) != search_generation {
                tracing::debug!("Discarding stale result of search {search_generation}");
                return;
            }

            if outcomes
                .send(SearchOutcome {
                    generation: search_generation,
                    result,
                })
                .is_err()
            {
                tracing::debug!("Search pipeline closed before search {search_generation} finished");
            }
        }));
    }

    if let Some(search) = in_flight {
        search.abort();
    }
}
