//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for todos.
//! - Isolate SQLite query details from the store and engine.
//!
//! # Invariants
//! - Repository writes must enforce `Todo::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod todo_repo;
