//! Core of the hotkey todo palette.
//! Owns the todo store, the live search/selection engine and the surface view models.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
mod notify;
pub mod palette;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{ConfigError, PaletteConfig};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget, LoggingError,
};
pub use model::todo::{Todo, TodoId, TodoStatus, TodoValidationError};
pub use palette::bus::{BusSubscription, SelectionBus};
pub use palette::clock::{Clock, ManualClock, SystemClock};
pub use palette::command_palette::{CommandPalette, EmptyState, PaletteKey};
pub use palette::observable::{Observable, ObserverId};
pub use palette::query_engine::{ApplyOutcome, FetchRequest, QueryEngine, SearchResult};
pub use palette::selection::{MoveDirection, PaletteSignal, SelectionController};
pub use palette::session::SearchSession;
pub use palette::todo_list::TodoListSurface;
pub use repo::todo_repo::{
    RepoError, RepoResult, SqliteTodoRepository, TodoListQuery, TodoRepository,
};
pub use search::highlight::{segments, Segment};
pub use search::predicate::{StatusFilter, TextFilter, TodoPredicate, WhitespaceQuery};
pub use service::todo_service::{seed_sample_todos, TodoService};
pub use store::{ChangeSubscription, SqliteTodoStore, StoreError, StoreResult, TodoStore};
