//! The snapshot the controller publishes after every change.
//!
//! Views only ever read an `AppState`; the controller replaces it wholesale.
//! Counts and the filtered list are derived on demand rather than stored.

use std::fmt;

use crate::types::{Filter, Todo};

/// The fixed set of messages the error banner can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    LoadFailed,
    EmptyTitle,
    AddFailed,
    DeleteFailed,
    UpdateFailed,
}

impl ErrorMessage {
    pub fn text(self) -> &'static str {
        match self {
            ErrorMessage::LoadFailed => "Unable to load todos",
            ErrorMessage::EmptyTitle => "Title should not be empty",
            ErrorMessage::AddFailed => "Unable to add a todo",
            ErrorMessage::DeleteFailed => "Unable to delete a todo",
            ErrorMessage::UpdateFailed => "Unable to update a todo",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Authoritative list in server order.
    pub todos: Vec<Todo>,
    /// Item shown while a create request is in flight.
    pub placeholder: Option<Todo>,
    pub filter: Filter,
    pub error: Option<ErrorMessage>,
    pub busy: bool,
}

impl AppState {
    /// Items matching the active filter, in list order.
    pub fn visible(&self) -> impl Iterator<Item = &Todo> + '_ {
        let filter = self.filter;
        self.todos.iter().filter(move |todo| filter.matches(todo))
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// False for an empty list.
    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.completed)
    }

    pub fn any_completed(&self) -> bool {
        self.todos.iter().any(|todo| todo.completed)
    }
}
