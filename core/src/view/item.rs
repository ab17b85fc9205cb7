//! Per-item view model: checkbox, title editing, delete, busy overlay.
//!
//! Requests are split the same way the HTTP client splits them: a `begin_*`
//! call decides whether to ask the controller for anything, and the matching
//! `finish_*` call applies the outcome. While a rename is in flight a second
//! submit (typically the blur that follows Enter) yields nothing.

use std::collections::HashMap;

use crate::state::AppState;
use crate::types::{Todo, TodoId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

/// A title change the controller should apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub id: TodoId,
    /// Trimmed. Empty means the todo should be deleted.
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct ItemEditor {
    id: TodoId,
    saved_title: String,
    completed: bool,
    draft: String,
    mode: Mode,
    loading: bool,
    pending_title: Option<String>,
    focus_requested: bool,
}

impl ItemEditor {
    pub fn new(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            saved_title: todo.title.clone(),
            completed: todo.completed,
            draft: todo.title.clone(),
            mode: Mode::Viewing,
            loading: false,
            pending_title: None,
            focus_requested: false,
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    /// Title shown while viewing.
    pub fn title(&self) -> &str {
        &self.saved_title
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// The placeholder is always covered by the overlay.
    pub fn is_busy(&self) -> bool {
        self.id == 0 || self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_title.is_some()
    }

    /// Picks up the latest server copy of the todo.
    pub fn sync(&mut self, todo: &Todo) {
        if todo.title != self.saved_title {
            self.saved_title = todo.title.clone();
            if !self.is_editing() {
                self.draft = todo.title.clone();
            }
        }
        self.completed = todo.completed;
    }

    pub fn double_click(&mut self) {
        match self.mode {
            Mode::Viewing => {
                self.mode = Mode::Editing;
                self.draft = self.saved_title.clone();
                self.focus_requested = true;
            }
            Mode::Editing => self.mode = Mode::Viewing,
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if self.is_editing() {
            self.draft = text.into();
        }
    }

    /// Enter in the edit field.
    pub fn submit(&mut self) -> Option<RenameRequest> {
        if !self.is_editing() || self.is_submitting() {
            return None;
        }

        let title = self.draft.trim().to_string();
        if title == self.saved_title {
            self.mode = Mode::Viewing;
            return None;
        }

        self.loading = true;
        self.pending_title = Some(title.clone());
        Some(RenameRequest { id: self.id, title })
    }

    pub fn blur(&mut self) -> Option<RenameRequest> {
        self.submit()
    }

    /// On failure the field stays open with the draft intact.
    pub fn finish_rename(&mut self, success: bool) {
        self.loading = false;
        let requested = self.pending_title.take();
        if success {
            if let Some(title) = requested {
                self.saved_title = title.clone();
                self.draft = title;
            }
            self.mode = Mode::Viewing;
        }
    }

    /// Leaves editing without saving.
    pub fn escape(&mut self) {
        if !self.is_editing() {
            return;
        }
        self.mode = Mode::Viewing;
        self.draft = self.saved_title.clone();
        self.loading = false;
        self.pending_title = None;
    }

    pub fn begin_delete(&mut self) -> TodoId {
        self.loading = true;
        self.id
    }

    /// A successful delete removes the item, so only failure clears the
    /// overlay.
    pub fn finish_delete(&mut self, success: bool) {
        if !success {
            self.loading = false;
        }
    }

    /// Returns the completion state to request.
    pub fn begin_toggle(&mut self) -> (TodoId, bool) {
        self.loading = true;
        (self.id, !self.completed)
    }

    pub fn finish_toggle(&mut self) {
        self.loading = false;
    }

    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}

/// One editor per persisted todo, kept in step with the controller's list.
#[derive(Debug, Clone, Default)]
pub struct EditorSet {
    editors: HashMap<TodoId, ItemEditor>,
}

impl EditorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds editors for new todos, drops those for removed ones and
    /// refreshes the rest.
    pub fn sync(&mut self, state: &AppState) {
        self.editors
            .retain(|id, _| state.todos.iter().any(|todo| todo.id == *id));
        for todo in &state.todos {
            self.editors
                .entry(todo.id)
                .and_modify(|editor| editor.sync(todo))
                .or_insert_with(|| ItemEditor::new(todo));
        }
    }

    pub fn get(&self, id: TodoId) -> Option<&ItemEditor> {
        self.editors.get(&id)
    }

    pub fn get_mut(&mut self, id: TodoId) -> Option<&mut ItemEditor> {
        self.editors.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}
