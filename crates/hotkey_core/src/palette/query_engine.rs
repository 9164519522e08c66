//! Debounced query engine over the record store.
//!
//! # Responsibility
//! - Own search text and status filter for one surface.
//! - Coalesce rapid edits into one fetch per quiet period.
//! - Refetch with the settled query whenever the store reports a change.
//! - Publish the ordered result list.
//!
//! # Invariants
//! - Every debounce restart and every issued fetch bumps the generation;
//!   only a result carrying the latest generation is applied.
//! - A failed fetch publishes an empty list; the engine never retries.
//! - Single-threaded: callbacks only mark work, `tick` performs it.

use crate::config::PaletteConfig;
use crate::model::todo::{Todo, TodoId, TodoStatus};
use crate::palette::clock::Clock;
use crate::palette::observable::{Observable, ObserverId};
use crate::search::predicate::{StatusFilter, TodoPredicate, WhitespaceQuery};
use crate::store::{ChangeSubscription, StoreError, StoreResult, TodoStore};
use log::{debug, error};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Read-only projection of a todo for one query execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: TodoId,
    pub title: String,
    pub content: Option<String>,
    pub status: TodoStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Todo> for SearchResult {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            content: todo.content,
            status: todo.status,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Fetch handed to a host that runs the store call elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub predicate: TodoPredicate,
}

/// Result of offering a fetch result to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Results were published.
    Applied { count: usize },
    /// The fetch failed; an empty list was published.
    Failed,
    /// A newer generation exists; the result was dropped.
    Stale,
}

impl ApplyOutcome {
    /// Whether the published result list changed.
    pub fn published(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct QueryInputs {
    search_text: String,
    status_filter: StatusFilter,
}

impl QueryInputs {
    fn predicate(&self, whitespace: WhitespaceQuery) -> TodoPredicate {
        TodoPredicate::build(&self.search_text, self.status_filter, whitespace)
    }
}

/// Search/filter pipeline for one surface.
pub struct QueryEngine<S: TodoStore> {
    store: Rc<S>,
    clock: Rc<dyn Clock>,
    config: PaletteConfig,
    pending: QueryInputs,
    settled: QueryInputs,
    deadline: Option<Instant>,
    generation: u64,
    store_revision: Rc<Cell<u64>>,
    seen_revision: u64,
    store_subscription: ChangeSubscription,
    results: Observable<Vec<SearchResult>>,
    last_error: Option<StoreError>,
}

impl<S: TodoStore> QueryEngine<S> {
    /// Creates an engine with an empty query and runs the initial fetch.
    pub fn new(store: Rc<S>, clock: Rc<dyn Clock>, config: PaletteConfig) -> Self {
        let store_revision = Rc::new(Cell::new(0_u64));
        let revision = Rc::clone(&store_revision);
        let store_subscription =
            store.on_change(Box::new(move || revision.set(revision.get() + 1)));

        let mut engine = Self {
            store,
            clock,
            config,
            pending: QueryInputs::default(),
            settled: QueryInputs::default(),
            deadline: None,
            generation: 0,
            store_revision,
            seen_revision: 0,
            store_subscription,
            results: Observable::new(Vec::new()),
            last_error: None,
        };
        let request = engine.issue_request();
        engine.execute(request);
        engine
    }

    /// Latest search text, including edits still waiting on the debounce.
    pub fn search_text(&self) -> &str {
        self.pending.search_text.as_str()
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.pending.status_filter
    }

    /// Search text of the query that produced the current results.
    pub fn settled_search_text(&self) -> &str {
        self.settled.search_text.as_str()
    }

    pub fn results(&self) -> &[SearchResult] {
        self.results.get()
    }

    pub fn subscribe_results(&self, handler: impl Fn(&Vec<SearchResult>) + 'static) -> ObserverId {
        self.results.subscribe(handler)
    }

    pub fn unsubscribe_results(&self, id: ObserverId) -> bool {
        self.results.unsubscribe(id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_debouncing(&self) -> bool {
        self.deadline.is_some()
    }

    /// Failure of the most recent applied fetch, if it failed.
    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    pub fn store(&self) -> &Rc<S> {
        &self.store
    }

    /// Updates the search text and restarts the debounce when the edit
    /// changes the predicate the pending query builds.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let before = self.pending.predicate(self.config.whitespace_query);
        self.pending.search_text = text.into();
        if self.pending.predicate(self.config.whitespace_query) != before {
            self.restart_debounce();
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        if self.pending.status_filter == filter {
            return;
        }
        self.pending.status_filter = filter;
        self.restart_debounce();
    }

    /// Clears the search text through the normal debounce path.
    pub fn reset_search(&mut self) {
        self.set_search_text(String::new());
    }

    /// Settles the pending query and fetches now, bypassing the debounce.
    pub fn flush(&mut self) -> ApplyOutcome {
        self.deadline = None;
        let request = self.settle();
        self.execute(request)
    }

    /// Runs due work: a fired debounce or a pending store change.
    ///
    /// Returns `None` when nothing was due.
    pub fn tick(&mut self) -> Option<ApplyOutcome> {
        let request = self.poll_due()?;
        Some(self.execute(request))
    }

    /// Hands out the due fetch without running it.
    ///
    /// Hosts that run the store call on a worker pass the result back through
    /// [`QueryEngine::apply_fetch`] on this thread.
    pub fn poll_due(&mut self) -> Option<FetchRequest> {
        if let Some(deadline) = self.deadline {
            if self.clock.now() >= deadline {
                self.deadline = None;
                return Some(self.settle());
            }
        }

        if self.store_revision.get() != self.seen_revision {
            return Some(self.issue_request());
        }

        None
    }

    /// Applies a fetch result if `generation` is still the latest.
    pub fn apply_fetch(&mut self, generation: u64, result: StoreResult<Vec<Todo>>) -> ApplyOutcome {
        if generation != self.generation {
            debug!(
                "event=palette_fetch module=palette status=stale generation={generation} latest={}",
                self.generation
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(todos) => {
                let results = todos.into_iter().map(SearchResult::from).collect::<Vec<_>>();
                let count = results.len();
                self.last_error = None;
                self.results.set(results);
                ApplyOutcome::Applied { count }
            }
            Err(err) => {
                error!(
                    "event=palette_fetch module=palette status=error generation={generation} error_code=store_fetch_failed error={err}"
                );
                self.last_error = Some(err);
                self.results.set(Vec::new());
                ApplyOutcome::Failed
            }
        }
    }

    fn restart_debounce(&mut self) {
        self.generation += 1;
        self.deadline = Some(self.clock.now() + self.config.debounce());
    }

    fn settle(&mut self) -> FetchRequest {
        self.settled = self.pending.clone();
        self.issue_request()
    }

    fn issue_request(&mut self) -> FetchRequest {
        self.generation += 1;
        self.seen_revision = self.store_revision.get();
        FetchRequest {
            generation: self.generation,
            predicate: self.settled.predicate(self.config.whitespace_query),
        }
    }

    fn execute(&mut self, request: FetchRequest) -> ApplyOutcome {
        let started_at = Instant::now();
        let result = self.store.fetch(&request.predicate);
        let outcome = self.apply_fetch(request.generation, result);
        if let ApplyOutcome::Applied { count } = outcome {
            debug!(
                "event=palette_fetch module=palette status=ok generation={} count={count} duration_ms={}",
                request.generation,
                started_at.elapsed().as_millis()
            );
        }
        outcome
    }
}

impl<S: TodoStore> Drop for QueryEngine<S> {
    fn drop(&mut self) {
        self.store.remove_change_observer(self.store_subscription);
    }
}
