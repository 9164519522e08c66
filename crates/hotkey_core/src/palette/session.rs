//! Query engine paired with the selection it drives.
//!
//! Every path that replaces the result list reconciles the selection before
//! returning, so callers never observe a stale pointer.

use crate::config::PaletteConfig;
use crate::model::todo::{Todo, TodoId};
use crate::palette::bus::SelectionBus;
use crate::palette::clock::Clock;
use crate::palette::query_engine::{ApplyOutcome, FetchRequest, QueryEngine, SearchResult};
use crate::palette::selection::{MoveDirection, PaletteSignal, SelectionController};
use crate::search::highlight::{segments, Segment};
use crate::search::predicate::StatusFilter;
use crate::store::{StoreResult, TodoStore};
use std::rc::Rc;

/// Result list and selection owned by one surface.
pub struct SearchSession<S: TodoStore> {
    engine: QueryEngine<S>,
    selection: SelectionController,
}

impl<S: TodoStore> SearchSession<S> {
    pub fn new(store: Rc<S>, clock: Rc<dyn Clock>, config: PaletteConfig) -> Self {
        let engine = QueryEngine::new(store, clock, config);
        let mut selection = SelectionController::new();
        selection.reconcile(engine.results());
        Self { engine, selection }
    }

    pub fn engine(&self) -> &QueryEngine<S> {
        &self.engine
    }

    pub fn results(&self) -> &[SearchResult] {
        self.engine.results()
    }

    pub fn selected(&self) -> Option<TodoId> {
        self.selection.selected()
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        let id = self.selection.selected()?;
        self.results().iter().find(|result| result.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.results().iter().any(|result| result.id == id)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.engine.set_search_text(text);
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.engine.set_status_filter(filter);
    }

    pub fn reset_search(&mut self) {
        self.engine.reset_search();
    }

    /// Runs due engine work. Returns whether the result list was replaced.
    pub fn tick(&mut self) -> bool {
        match self.engine.tick() {
            Some(outcome) => self.after_apply(outcome),
            None => false,
        }
    }

    pub fn flush(&mut self) -> bool {
        let outcome = self.engine.flush();
        self.after_apply(outcome)
    }

    pub fn poll_due(&mut self) -> Option<FetchRequest> {
        self.engine.poll_due()
    }

    pub fn apply_fetch(&mut self, generation: u64, result: StoreResult<Vec<Todo>>) -> ApplyOutcome {
        let outcome = self.engine.apply_fetch(generation, result);
        self.after_apply(outcome);
        outcome
    }

    pub fn move_selection(&mut self, direction: MoveDirection) {
        self.selection.move_selection(direction, self.engine.results());
    }

    pub fn select(&mut self, id: TodoId) -> bool {
        self.selection.select(id, self.engine.results())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn confirm(&mut self, bus: &SelectionBus) -> PaletteSignal {
        self.selection.confirm(self.engine.results(), bus)
    }

    pub fn cancel(&self) -> PaletteSignal {
        self.selection.cancel()
    }

    /// Highlight segments of `text` for the query behind the current results.
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        segments(text, self.engine.settled_search_text())
    }

    fn after_apply(&mut self, outcome: ApplyOutcome) -> bool {
        if !outcome.published() {
            return false;
        }
        self.selection.reconcile(self.engine.results());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::SearchSession;
    use crate::config::PaletteConfig;
    use crate::model::todo::Todo;
    use crate::palette::clock::ManualClock;
    use crate::store::{SqliteTodoStore, TodoStore};
    use std::rc::Rc;

    #[test]
    fn highlight_follows_settled_query_not_pending_text() {
        let store = Rc::new(SqliteTodoStore::open_in_memory().unwrap());
        store.create(&Todo::new("Plan launch")).unwrap();
        let clock = Rc::new(ManualClock::new());
        let mut session = SearchSession::new(store, clock.clone(), PaletteConfig::default());

        session.set_search_text("launch");
        assert_eq!(session.highlight("Plan launch").len(), 1);

        clock.advance(PaletteConfig::default().debounce());
        assert!(session.tick());
        let segments = session.highlight("Plan launch");
        assert_eq!(segments.len(), 2);
        assert!(segments[1].is_match);
    }

    #[test]
    fn selected_result_tracks_the_selection() {
        let store = Rc::new(SqliteTodoStore::open_in_memory().unwrap());
        let id = store.create(&Todo::new("Only row")).unwrap();
        let clock = Rc::new(ManualClock::new());
        let mut session = SearchSession::new(store, clock, PaletteConfig::default());

        assert_eq!(session.selected_result().map(|result| result.id), Some(id));
        assert!(session.contains(id));
        session.clear_selection();
        assert!(session.selected_result().is_none());
    }
}
