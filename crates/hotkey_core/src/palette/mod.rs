//! Live search, selection and cross-surface propagation.
//!
//! # Responsibility
//! - Debounce query input and refetch from the store (`query_engine`).
//! - Keep a stable selection pointer into the results (`selection`).
//! - Broadcast confirmed selections between surfaces (`bus`).
//! - Provide view models for the palette and the main list.
//!
//! # Invariants
//! - All state here is single-threaded; store callbacks only mark work and
//!   `tick` performs it on the owning thread.

pub mod bus;
pub mod clock;
pub mod command_palette;
pub mod observable;
pub mod query_engine;
pub mod selection;
pub mod session;
pub mod todo_list;
