//! Main window todo list view model.
//!
//! # Responsibility
//! - Own the list's own search session, separate from the palette's.
//! - Adopt selections requested over the bus when the todo is listed.
//! - Route quick capture and row edits through `TodoService`.
//!
//! # Invariants
//! - A bus request for an unlisted todo is ignored; the list never changes
//!   its own filter to reveal it.
//! - Edits of todos that vanished meanwhile are silent no-ops.

use crate::config::PaletteConfig;
use crate::model::todo::{TodoId, TodoStatus};
use crate::palette::bus::{BusSubscription, SelectionBus};
use crate::palette::clock::Clock;
use crate::palette::query_engine::SearchResult;
use crate::palette::selection::MoveDirection;
use crate::palette::session::SearchSession;
use crate::search::predicate::StatusFilter;
use crate::service::todo_service::TodoService;
use crate::store::{StoreError, StoreResult, TodoStore};
use log::{debug, error, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Main list surface state.
pub struct TodoListSurface<S: TodoStore> {
    session: SearchSession<S>,
    service: TodoService<S>,
    pub quick_capture_title: String,
    pub quick_capture_content: String,
    focus_request: Option<TodoId>,
}

impl<S: TodoStore + 'static> TodoListSurface<S> {
    /// Subscribes `surface` to selection requests on `bus`.
    ///
    /// The caller releases the returned handle with `SelectionBus::unsubscribe`
    /// when the surface is torn down.
    pub fn attach(surface: &Rc<RefCell<Self>>, bus: &SelectionBus) -> BusSubscription {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(surface);
        bus.subscribe(move |id| {
            let Some(surface) = weak.upgrade() else {
                return;
            };
            match surface.try_borrow_mut() {
                Ok(mut surface) => {
                    surface.handle_selection_request(id);
                }
                Err(_) => warn!(
                    "event=selection_request module=todo_list status=error error_code=surface_busy todo_id={id}"
                ),
            };
        })
    }
}

impl<S: TodoStore> TodoListSurface<S> {
    pub fn new(store: Rc<S>, clock: Rc<dyn Clock>, config: PaletteConfig) -> Self {
        Self {
            session: SearchSession::new(Rc::clone(&store), clock, config),
            service: TodoService::new(store),
            quick_capture_title: String::new(),
            quick_capture_content: String::new(),
            focus_request: None,
        }
    }

    pub fn session(&self) -> &SearchSession<S> {
        &self.session
    }

    pub fn results(&self) -> &[SearchResult] {
        self.session.results()
    }

    pub fn selected(&self) -> Option<TodoId> {
        self.session.selected()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.session.set_search_text(text);
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.session.set_status_filter(filter);
    }

    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    pub fn move_selection(&mut self, direction: MoveDirection) {
        self.session.move_selection(direction);
    }

    /// Row click. Unlisted ids leave the selection untouched.
    pub fn select(&mut self, id: TodoId) -> bool {
        self.session.select(id)
    }

    /// Reacts to a bus request: select and ask for focus if `id` is listed.
    pub fn handle_selection_request(&mut self, id: TodoId) -> bool {
        if !self.session.select(id) {
            debug!("event=selection_request module=todo_list status=ignored todo_id={id}");
            return false;
        }
        self.focus_request = Some(id);
        true
    }

    /// Takes the pending keyboard-focus request, if any.
    pub fn take_focus_request(&mut self) -> Option<TodoId> {
        self.focus_request.take()
    }

    /// Creates a todo from the quick-capture fields and selects it.
    ///
    /// Blank titles are ignored and leave the fields untouched.
    pub fn submit_quick_capture(&mut self) -> Option<TodoId> {
        let content = self.quick_capture_content.clone();
        let created = self
            .service
            .create_todo(&self.quick_capture_title, Some(content.as_str()));
        let id = match created {
            Ok(Some(id)) => id,
            Ok(None) => return None,
            Err(err) => {
                error!("event=todo_create module=todo_list status=error error={err}");
                return None;
            }
        };

        self.quick_capture_title.clear();
        self.quick_capture_content.clear();
        self.session.tick();
        self.session.select(id);
        Some(id)
    }

    pub fn rename(&mut self, id: TodoId, title: &str) {
        let outcome = self.service.rename(id, title);
        self.finish_edit("todo_rename", id, outcome);
    }

    pub fn edit_content(&mut self, id: TodoId, content: Option<&str>) {
        let outcome = self.service.edit_content(id, content);
        self.finish_edit("todo_edit_content", id, outcome);
    }

    pub fn toggle_completion(&mut self, id: TodoId) -> Option<TodoStatus> {
        let outcome = self.service.toggle_completion(id);
        let next = outcome.as_ref().ok().copied();
        self.finish_edit("todo_toggle", id, outcome);
        next
    }

    pub fn toggle_selected(&mut self) -> Option<TodoStatus> {
        let id = self.selected()?;
        self.toggle_completion(id)
    }

    pub fn delete(&mut self, id: TodoId) {
        let outcome = self.service.delete(id);
        if outcome.is_ok() && self.selected() == Some(id) {
            self.session.clear_selection();
        }
        self.finish_edit("todo_delete", id, outcome);
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected() {
            self.delete(id);
        }
    }

    fn finish_edit<T>(&mut self, event: &str, id: TodoId, outcome: StoreResult<T>) {
        match outcome {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                debug!("event={event} module=todo_list status=ignored todo_id={id}");
            }
            Err(err) => {
                error!("event={event} module=todo_list status=error todo_id={id} error={err}");
            }
        }
        self.session.tick();
    }
}
