//! View model for the new-todo input.

/// What the form hands to the controller on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A trimmed, non-empty title.
    Title(String),
    /// The input was empty or whitespace only.
    Empty,
}

impl Submission {
    pub fn from_input(raw: &str) -> Self {
        match raw.trim() {
            "" => Submission::Empty,
            title => Submission::Title(title.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTodoForm {
    input: String,
    disabled: bool,
    focus_requested: bool,
}

impl NewTodoForm {
    pub fn new() -> Self {
        Self {
            focus_requested: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Replaces the input text. Ignored while disabled.
    pub fn set_value(&mut self, text: impl Into<String>) {
        if !self.disabled {
            self.input = text.into();
        }
    }

    pub fn submit(&mut self) -> Submission {
        self.focus_requested = true;
        Submission::from_input(&self.input)
    }

    /// The input is cleared only when the todo was created.
    pub fn finish(&mut self, created: bool) {
        if created {
            self.input.clear();
        }
        self.focus_requested = true;
    }

    /// Mirrors the controller's busy flag. Regains focus when it drops.
    pub fn sync_busy(&mut self, busy: bool) {
        if self.disabled && !busy {
            self.focus_requested = true;
        }
        self.disabled = busy;
    }

    /// Returns whether focus was requested since the last call.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }
}
