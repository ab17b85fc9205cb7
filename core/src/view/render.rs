//! Plain-text projection of the header, list, footer and error banner.

use std::fmt::Write;

use crate::state::AppState;
use crate::types::{Filter, Todo};
use crate::view::form::NewTodoForm;
use crate::view::item::{EditorSet, ItemEditor};

pub const NEW_TODO_PROMPT: &str = "What needs to be done?";
pub const SETUP_WARNING: &str =
    "Please set TODO_OWNER_ID (or pass --owner-id) to a non-zero user id to use the todo list.";

pub fn render(state: &AppState, form: &NewTodoForm, editors: &EditorSet) -> String {
    let mut out = String::from("todos\n");
    out.push_str(&header(state, form));
    out.push('\n');

    // The list, its pending row and the footer exist only once something is saved.
    if !state.todos.is_empty() {
        for todo in state.visible() {
            out.push_str(&item(todo, editors.get(todo.id)));
            out.push('\n');
        }
        if let Some(placeholder) = &state.placeholder {
            out.push_str(&item(placeholder, None));
            out.push('\n');
        }
        out.push_str(&footer(state));
        out.push('\n');
    }
    if let Some(error) = state.error {
        let _ = writeln!(out, "! {error}");
    }
    out
}

pub fn render_setup_warning() -> String {
    format!("{SETUP_WARNING}\n")
}

/// Toggle-all marker (only with a non-empty list) followed by the input.
pub fn header(state: &AppState, form: &NewTodoForm) -> String {
    let toggle = match (state.todos.is_empty(), state.all_completed()) {
        (true, _) => "   ",
        (false, true) => "[v]",
        (false, false) => "[ ]",
    };
    let input = if form.value().is_empty() {
        NEW_TODO_PROMPT
    } else {
        form.value()
    };
    let busy = if form.is_disabled() { " ..." } else { "" };
    format!("{toggle} > {input}{busy}")
}

pub fn item(todo: &Todo, editor: Option<&ItemEditor>) -> String {
    let check = if todo.completed { "[x]" } else { "[ ]" };
    let id = if todo.is_placeholder() {
        "-".to_string()
    } else {
        todo.id.to_string()
    };
    let (title, busy) = match editor {
        Some(editor) if editor.is_editing() => (format!("> {}", editor.draft()), editor.is_busy()),
        Some(editor) => (editor.title().to_string(), editor.is_busy()),
        None => (todo.title.clone(), todo.is_placeholder()),
    };
    let overlay = if busy { " ..." } else { "" };
    format!("{check} {id:>4}  {title}{overlay}")
}

pub fn footer(state: &AppState) -> String {
    let filters: Vec<String> = Filter::ALL
        .iter()
        .map(|&filter| {
            if filter == state.filter {
                format!("[{}]", filter.label())
            } else {
                filter.label().to_string()
            }
        })
        .collect();
    let clear = if state.any_completed() {
        "Clear completed"
    } else {
        "(Clear completed)"
    };
    format!(
        "{} items left  {}  {clear}",
        state.active_count(),
        filters.join(" ")
    )
}
