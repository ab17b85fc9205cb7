//! View models and the glue that connects them to the controller.
//!
//! The view models hold only transient UI state. The helpers here run one
//! user interaction end to end: ask the view model what to send, call the
//! controller, feed the outcome back.

pub mod form;
pub mod item;
pub mod render;

use crate::controller::TodoApp;
use crate::types::TodoId;

use form::NewTodoForm;
use item::EditorSet;

/// Submits the new-todo form. Returns whether a todo was created.
pub async fn submit_form(app: &mut TodoApp, form: &mut NewTodoForm) -> bool {
    let submission = form.submit();
    form.sync_busy(true);
    let created = app.submit_new_todo(submission).await;
    form.sync_busy(app.snapshot().busy);
    form.finish(created);
    created
}

/// Commits the title being edited. `None` when nothing was sent.
pub async fn commit_title(app: &mut TodoApp, editors: &mut EditorSet, id: TodoId) -> Option<bool> {
    let request = editors.get_mut(id)?.submit()?;
    let saved = app.rename_todo(request.id, &request.title).await;
    if let Some(editor) = editors.get_mut(id) {
        editor.finish_rename(saved);
    }
    editors.sync(&app.snapshot());
    Some(saved)
}

/// Flips one todo's checkbox. `None` when the todo has no editor.
pub async fn toggle_item(app: &mut TodoApp, editors: &mut EditorSet, id: TodoId) -> Option<()> {
    let (id, completed) = editors.get_mut(id)?.begin_toggle();
    app.set_completed(id, completed).await;
    if let Some(editor) = editors.get_mut(id) {
        editor.finish_toggle();
    }
    editors.sync(&app.snapshot());
    Some(())
}

/// Deletes one todo from its editor. `None` when the todo has no editor.
pub async fn delete_item(app: &mut TodoApp, editors: &mut EditorSet, id: TodoId) -> Option<bool> {
    let id = editors.get_mut(id)?.begin_delete();
    let deleted = app.delete_todo(id).await;
    if let Some(editor) = editors.get_mut(id) {
        editor.finish_delete(deleted);
    }
    editors.sync(&app.snapshot());
    Some(deleted)
}
