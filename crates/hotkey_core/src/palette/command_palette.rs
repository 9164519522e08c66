//! Command palette view model.
//!
//! # Responsibility
//! - Map palette keys onto the search session.
//! - Publish confirmed selections on the shared bus.
//! - Classify the empty state and footer hint shown by the renderer.

use crate::config::PaletteConfig;
use crate::model::todo::TodoId;
use crate::palette::bus::SelectionBus;
use crate::palette::clock::Clock;
use crate::palette::query_engine::SearchResult;
use crate::palette::selection::{MoveDirection, PaletteSignal};
use crate::palette::session::SearchSession;
use crate::search::highlight::Segment;
use crate::search::predicate::{StatusFilter, TodoPredicate};
use crate::store::TodoStore;
use log::warn;
use std::rc::Rc;

const HINT_NAVIGATE: &str = "Use the arrow keys to highlight a todo";
const HINT_OPEN: &str = "Press \u{21B5} to open details";

/// Keys the palette search field intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Which placeholder the results area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The store holds no todos at all.
    NoTodos,
    /// Todos exist but none pass the current query.
    NoMatches,
    Results,
}

/// Palette surface state.
pub struct CommandPalette<S: TodoStore> {
    session: SearchSession<S>,
    bus: Rc<SelectionBus>,
}

impl<S: TodoStore> CommandPalette<S> {
    pub fn new(
        store: Rc<S>,
        clock: Rc<dyn Clock>,
        config: PaletteConfig,
        bus: Rc<SelectionBus>,
    ) -> Self {
        Self {
            session: SearchSession::new(store, clock, config),
            bus,
        }
    }

    pub fn session(&self) -> &SearchSession<S> {
        &self.session
    }

    pub fn results(&self) -> &[SearchResult] {
        self.session.results()
    }

    pub fn highlighted(&self) -> Option<TodoId> {
        self.session.selected()
    }

    pub fn search_text(&self) -> &str {
        self.session.engine().search_text()
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.session.engine().status_filter()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.session.set_search_text(text);
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.session.set_status_filter(filter);
    }

    /// Clear button in the search field.
    pub fn clear_query(&mut self) {
        self.session.reset_search();
    }

    /// Drives debounce and store refreshes. Returns whether results changed.
    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    /// Runs the pending query now, skipping the quiet period.
    pub fn flush(&mut self) -> bool {
        self.session.flush()
    }

    pub fn handle_key(&mut self, key: PaletteKey) -> PaletteSignal {
        match key {
            PaletteKey::Up => {
                self.session.move_selection(MoveDirection::Up);
                PaletteSignal::Stay
            }
            PaletteKey::Down => {
                self.session.move_selection(MoveDirection::Down);
                PaletteSignal::Stay
            }
            PaletteKey::Enter => self.session.confirm(&self.bus),
            PaletteKey::Escape => self.session.cancel(),
        }
    }

    /// Pointer hover highlights a row.
    pub fn hover(&mut self, id: TodoId) {
        self.session.select(id);
    }

    /// Clicking a row highlights and confirms it.
    pub fn click(&mut self, id: TodoId) -> PaletteSignal {
        if !self.session.select(id) {
            return PaletteSignal::Stay;
        }
        self.session.confirm(&self.bus)
    }

    pub fn title_segments<'a>(&self, result: &'a SearchResult) -> Vec<Segment<'a>> {
        self.session.highlight(&result.title)
    }

    pub fn content_segments<'a>(&self, result: &'a SearchResult) -> Option<Vec<Segment<'a>>> {
        result
            .content
            .as_deref()
            .filter(|content| !content.is_empty())
            .map(|content| self.session.highlight(content))
    }

    pub fn footer_hint(&self) -> &'static str {
        if self.highlighted().is_some() {
            HINT_OPEN
        } else {
            HINT_NAVIGATE
        }
    }

    /// Classifies the results area. Looks at the store only when the list is empty.
    pub fn empty_state(&self) -> EmptyState {
        if !self.results().is_empty() {
            return EmptyState::Results;
        }

        match self
            .session
            .engine()
            .store()
            .fetch(&TodoPredicate::everything())
        {
            Ok(all) if all.is_empty() => EmptyState::NoTodos,
            Ok(_) => EmptyState::NoMatches,
            Err(err) => {
                warn!("event=palette_empty_state module=palette status=error error={err}");
                EmptyState::NoMatches
            }
        }
    }
}
