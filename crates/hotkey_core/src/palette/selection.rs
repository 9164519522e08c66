//! Highlight/selection pointer into an ordered result list.
//!
//! # Invariants
//! - After `reconcile`, the selection is `None` or an id present in the list.
//! - Navigation clamps at both ends; there is no wraparound.
//! - A pointer found stale on entry is logged and treated as no selection.

use crate::model::todo::TodoId;
use crate::palette::bus::SelectionBus;
use crate::palette::query_engine::SearchResult;
use log::{debug, error};

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// What the palette surface should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSignal {
    Stay,
    Dismiss,
}

/// Owns the selected id for one surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<TodoId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<TodoId> {
        self.selected
    }

    /// Repairs the pointer after the result list was replaced.
    ///
    /// Keeps the previous id when still listed, else falls back to the first
    /// result, else clears.
    pub fn reconcile(&mut self, results: &[SearchResult]) {
        if index_of(results, self.selected).is_none() {
            self.selected = results.first().map(|result| result.id);
        }
        debug_assert!(self.is_consistent_with(results));
    }

    pub fn move_down(&mut self, results: &[SearchResult]) {
        self.move_selection(MoveDirection::Down, results);
    }

    pub fn move_up(&mut self, results: &[SearchResult]) {
        self.move_selection(MoveDirection::Up, results);
    }

    /// Moves one step, clamped. With no selection, lands on the edge the
    /// direction points at first: `Down` on the first row, `Up` on the last.
    pub fn move_selection(&mut self, direction: MoveDirection, results: &[SearchResult]) {
        let Some(last) = results.len().checked_sub(1) else {
            return;
        };

        let next = match (self.current_index(results), direction) {
            (Some(index), MoveDirection::Down) => (index + 1).min(last),
            (Some(index), MoveDirection::Up) => index.saturating_sub(1),
            (None, MoveDirection::Down) => 0,
            (None, MoveDirection::Up) => last,
        };
        self.selected = Some(results[next].id);
        debug_assert!(self.is_consistent_with(results));
    }

    /// Selects `id` when it is listed. Returns whether `id` is listed, so
    /// re-selecting the current row also returns `true`.
    pub fn select(&mut self, id: TodoId, results: &[SearchResult]) -> bool {
        if index_of(results, Some(id)).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Confirms the highlighted row, defaulting to the first one.
    ///
    /// Publishes the chosen id on `bus` and asks the palette to close. An
    /// empty list is a no-op and keeps the palette open.
    pub fn confirm(&mut self, results: &[SearchResult], bus: &SelectionBus) -> PaletteSignal {
        let chosen = match self.current_index(results) {
            Some(index) => results[index].id,
            None => match results.first() {
                Some(first) => first.id,
                None => return PaletteSignal::Stay,
            },
        };

        self.selected = Some(chosen);
        debug!("event=selection_confirm module=selection status=ok todo_id={chosen}");
        bus.publish(chosen);
        PaletteSignal::Dismiss
    }

    /// Closes the palette without publishing.
    pub fn cancel(&self) -> PaletteSignal {
        PaletteSignal::Dismiss
    }

    pub fn is_consistent_with(&self, results: &[SearchResult]) -> bool {
        match self.selected {
            None => true,
            Some(_) => index_of(results, self.selected).is_some(),
        }
    }

    fn current_index(&mut self, results: &[SearchResult]) -> Option<usize> {
        let index = index_of(results, self.selected);
        if index.is_none() {
            if let Some(stale) = self.selected.take() {
                error!(
                    "event=selection_repair module=selection status=error error_code=stale_selection todo_id={stale}"
                );
            }
        }
        index
    }
}

fn index_of(results: &[SearchResult], id: Option<TodoId>) -> Option<usize> {
    let id = id?;
    results.iter().position(|result| result.id == id)
}
