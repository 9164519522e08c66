//! Text matching, query predicates and highlight segmentation.
//!
//! # Responsibility
//! - Fold text for case- and diacritic-insensitive comparison.
//! - Compose status and free-text constraints into one fetch predicate.
//! - Split record text into matched/unmatched segments for rendering.
//!
//! # Invariants
//! - Predicate matching and highlighting share one matcher, so a record that
//!   passes the text filter always has at least one highlighted segment.

pub mod fold;
pub mod highlight;
pub mod predicate;
