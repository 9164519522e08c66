//! Todo use-case services.
//!
//! # Responsibility
//! - Normalize user input before it reaches the store.
//! - Keep surfaces decoupled from storage details.

pub mod todo_service;
