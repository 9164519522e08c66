//! Status filter and composed fetch predicate.
//!
//! # Responsibility
//! - Map the user-facing status filter onto todo status sets.
//! - Compose status and free-text constraints with logical AND.
//!
//! # Invariants
//! - Absent constraints are omitted; an all/empty query is unconditional.
//! - Text constraints test `title` OR `content`.

use crate::model::todo::{Todo, TodoStatus};
use crate::search::fold::TextMatcher;
use serde::{Deserialize, Serialize};

const OPEN_STATUSES: &[TodoStatus] = &[TodoStatus::Pending, TodoStatus::InProgress];
const DONE_STATUSES: &[TodoStatus] = &[TodoStatus::Completed, TodoStatus::Archived];

/// Status segment selected in the palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    /// Pending or in progress.
    Open,
    /// Completed or archived.
    Done,
}

impl StatusFilter {
    pub const ALL_CASES: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Open, StatusFilter::Done];

    pub fn title(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Open => "Open",
            Self::Done => "Done",
        }
    }

    /// Status set admitted by this filter, or `None` for no restriction.
    pub fn statuses(self) -> Option<&'static [TodoStatus]> {
        match self {
            Self::All => None,
            Self::Open => Some(OPEN_STATUSES),
            Self::Done => Some(DONE_STATUSES),
        }
    }

    pub fn admits(self, status: TodoStatus) -> bool {
        self.statuses()
            .map_or(true, |statuses| statuses.contains(&status))
    }
}

/// How search text made only of whitespace is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceQuery {
    /// No text constraint; every record passes the text test.
    #[default]
    MatchAll,
    /// No record passes the text test.
    MatchNone,
}

/// Free-text part of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFilter {
    Any,
    Contains(TextMatcher),
    Nothing,
}

/// Composed fetch predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPredicate {
    pub statuses: Option<Vec<TodoStatus>>,
    pub text: TextFilter,
}

impl Default for TodoPredicate {
    fn default() -> Self {
        Self::everything()
    }
}

impl TodoPredicate {
    /// Unconditional predicate.
    pub fn everything() -> Self {
        Self {
            statuses: None,
            text: TextFilter::Any,
        }
    }

    /// Builds the predicate for one settled search text and filter pair.
    pub fn build(search_text: &str, filter: StatusFilter, whitespace: WhitespaceQuery) -> Self {
        let text = match TextMatcher::new(search_text) {
            Some(matcher) => TextFilter::Contains(matcher),
            None if !search_text.is_empty() && whitespace == WhitespaceQuery::MatchNone => {
                TextFilter::Nothing
            }
            None => TextFilter::Any,
        };

        Self {
            statuses: filter.statuses().map(<[TodoStatus]>::to_vec),
            text,
        }
    }

    pub fn is_unconditional(&self) -> bool {
        self.statuses.is_none() && self.text == TextFilter::Any
    }

    pub fn admits_status(&self, status: TodoStatus) -> bool {
        self.statuses
            .as_ref()
            .map_or(true, |statuses| statuses.contains(&status))
    }

    pub fn admits_text(&self, todo: &Todo) -> bool {
        match &self.text {
            TextFilter::Any => true,
            TextFilter::Nothing => false,
            TextFilter::Contains(matcher) => {
                matcher.is_match(&todo.title)
                    || todo
                        .content
                        .as_deref()
                        .is_some_and(|content| matcher.is_match(content))
            }
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.admits_status(todo.status) && self.admits_text(todo)
    }
}
