//! Domain model for todo records and their read-only projections.
//!
//! # Responsibility
//! - Define the canonical todo record owned by the record store.
//! - Keep identity, lifecycle timestamps and status in one shape.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId` that is never reused.
//! - Deletion is a soft-delete tombstone, so deleted ids stay reserved.

pub mod todo;
