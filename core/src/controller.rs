//! Application controller: owns the authoritative todo list and reconciles
//! it with server responses.
//!
//! # Design
//! - State lives in a `watch` channel. Every change derives the next list
//!   from the previous one and publishes it, so views always see a complete
//!   snapshot and never a half-applied merge.
//! - Mutating operations take `&mut self`, which serializes them; the busy
//!   flag is still published and is lowered by a drop guard on every exit
//!   path.
//! - Bulk operations fan out on a `JoinSet` and merge each outcome back by
//!   item id. One failing request never cancels the others.
//! - Failures never surface as `Err`. They become an `ErrorMessage` in the
//!   snapshot, which clears itself after `error_timeout`.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

use crate::api::TodoApi;
use crate::config::{Config, DEFAULT_ERROR_TIMEOUT};
use crate::state::{AppState, ErrorMessage};
use crate::types::{Filter, NewTodo, Todo, TodoId, TodoPatch};
use crate::view::form::Submission;

pub struct TodoApp {
    api: Arc<dyn TodoApi>,
    owner_id: u64,
    state: Arc<watch::Sender<AppState>>,
    error_timeout: Duration,
    error_timer: Option<JoinHandle<()>>,
    error_generation: Arc<AtomicU64>,
}

/// Raises the busy flag on creation and lowers it when dropped.
struct BusyGuard {
    state: Arc<watch::Sender<AppState>>,
}

impl BusyGuard {
    fn engage(state: &Arc<watch::Sender<AppState>>) -> Self {
        state.send_modify(|s| s.busy = true);
        Self {
            state: Arc::clone(state),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.busy = false);
    }
}

impl TodoApp {
    /// Builds an idle controller for `owner_id`. Hosts normally go through
    /// [`TodoApp::start`], which checks that an owner is configured.
    ///
    /// Panics in debug builds when `owner_id` is 0.
    pub fn new(api: Arc<dyn TodoApi>, owner_id: u64) -> Self {
        debug_assert!(owner_id != 0, "owner id 0 means no owner is configured");
        let (state, _) = watch::channel(AppState::default());
        Self {
            api,
            owner_id,
            state: Arc::new(state),
            error_timeout: DEFAULT_ERROR_TIMEOUT,
            error_timer: None,
            error_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_error_timeout(mut self, timeout: Duration) -> Self {
        self.error_timeout = timeout;
        self
    }

    /// Builds the controller and loads the list. Returns `None` without
    /// touching the API when no owner is configured.
    pub async fn start(api: Arc<dyn TodoApi>, config: &Config) -> Option<Self> {
        let Some(owner_id) = config.owner_id else {
            tracing::warn!("no owner id configured, todo list disabled");
            return None;
        };
        let mut app = Self::new(api, owner_id).with_error_timeout(config.error_timeout);
        app.load().await;
        Some(app)
    }

    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub async fn load(&mut self) {
        self.dismiss_error();

        match self.api.list(self.owner_id).await {
            Ok(todos) => {
                tracing::info!(owner_id = self.owner_id, count = todos.len(), "loaded todos");
                self.state.send_modify(|s| s.todos = todos);
            }
            Err(err) => {
                tracing::warn!(%err, owner_id = self.owner_id, "failed to load todos");
                self.show_error(ErrorMessage::LoadFailed);
            }
        }
    }

    pub async fn add_todo(&mut self, title: &str) -> bool {
        self.submit_new_todo(Submission::from_input(title)).await
    }

    /// Creates a todo from a form submission. Returns whether the form
    /// should clear its input.
    pub async fn submit_new_todo(&mut self, submission: Submission) -> bool {
        let _busy = BusyGuard::engage(&self.state);

        let title = match submission {
            Submission::Title(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => {
                self.show_error(ErrorMessage::EmptyTitle);
                return false;
            }
        };

        let placeholder = Todo::placeholder(title.clone(), self.owner_id);
        self.state.send_modify(|s| s.placeholder = Some(placeholder));

        let input = NewTodo {
            title,
            owner_id: self.owner_id,
            completed: false,
        };
        match self.api.create(input).await {
            Ok(created) => {
                tracing::debug!(id = created.id, "created todo");
                self.state.send_modify(|s| {
                    s.placeholder = None;
                    s.todos.push(created);
                });
                true
            }
            Err(err) => {
                tracing::warn!(%err, "failed to create todo");
                self.state.send_modify(|s| s.placeholder = None);
                self.show_error(ErrorMessage::AddFailed);
                false
            }
        }
    }

    pub async fn delete_todo(&mut self, id: TodoId) -> bool {
        let _busy = BusyGuard::engage(&self.state);

        match self.api.remove(id).await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.todos = s.todos.iter().filter(|todo| todo.id != id).cloned().collect();
                });
                true
            }
            Err(err) => {
                tracing::warn!(%err, id, "failed to delete todo");
                self.show_error(ErrorMessage::DeleteFailed);
                false
            }
        }
    }

    pub async fn set_completed(&mut self, id: TodoId, completed: bool) {
        let _busy = BusyGuard::engage(&self.state);

        match self.api.update(id, TodoPatch::completed(completed)).await {
            Ok(updated) => self.replace_by_id(updated),
            Err(err) => {
                tracing::warn!(%err, id, completed, "failed to update todo");
                self.show_error(ErrorMessage::UpdateFailed);
            }
        }
    }

    /// An empty (after trimming) title deletes the todo instead.
    pub async fn rename_todo(&mut self, id: TodoId, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return self.delete_todo(id).await;
        }

        let _busy = BusyGuard::engage(&self.state);

        match self.api.update(id, TodoPatch::title(title)).await {
            Ok(updated) => {
                self.replace_by_id(updated);
                true
            }
            Err(err) => {
                tracing::warn!(%err, id, "failed to rename todo");
                self.show_error(ErrorMessage::UpdateFailed);
                false
            }
        }
    }

    /// Deletes every completed todo concurrently. Todos whose delete fails
    /// stay in the list.
    pub async fn clear_completed(&mut self) {
        let _busy = BusyGuard::engage(&self.state);

        let targets: Vec<TodoId> = self
            .state
            .borrow()
            .todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id)
            .collect();

        let mut tasks = JoinSet::new();
        for id in targets {
            let api = Arc::clone(&self.api);
            tasks.spawn(async move { (id, api.remove(id).await) });
        }

        let mut removed = HashSet::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(()))) => {
                    removed.insert(id);
                }
                Ok((id, Err(err))) => {
                    tracing::warn!(%err, id, "failed to delete completed todo");
                    self.show_error(ErrorMessage::DeleteFailed);
                }
                Err(err) => {
                    tracing::warn!(%err, "delete task did not finish");
                    self.show_error(ErrorMessage::DeleteFailed);
                }
            }
        }

        self.state.send_modify(|s| {
            s.todos = s
                .todos
                .iter()
                .filter(|todo| !removed.contains(&todo.id))
                .cloned()
                .collect();
        });
    }

    /// Marks everything completed, or everything active when all todos are
    /// already completed. Only todos whose state changes are sent.
    pub async fn toggle_all(&mut self) {
        let _busy = BusyGuard::engage(&self.state);

        let (targets, completed): (Vec<TodoId>, bool) = {
            let state = self.state.borrow();
            if state.all_completed() {
                (state.todos.iter().map(|todo| todo.id).collect(), false)
            } else {
                let open = state.todos.iter().filter(|todo| !todo.completed);
                (open.map(|todo| todo.id).collect(), true)
            }
        };

        let mut tasks = JoinSet::new();
        for id in targets {
            let api = Arc::clone(&self.api);
            tasks.spawn(async move { (id, api.update(id, TodoPatch::completed(completed)).await) });
        }

        let mut updated: HashMap<TodoId, Todo> = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(todo))) => {
                    updated.insert(todo.id, todo);
                }
                Ok((id, Err(err))) => {
                    tracing::warn!(%err, id, completed, "failed to toggle todo");
                    self.show_error(ErrorMessage::UpdateFailed);
                }
                Err(err) => {
                    tracing::warn!(%err, "toggle task did not finish");
                    self.show_error(ErrorMessage::UpdateFailed);
                }
            }
        }

        self.state.send_modify(|s| {
            s.todos = s
                .todos
                .iter()
                .map(|todo| updated.get(&todo.id).unwrap_or(todo).clone())
                .collect();
        });
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.state.send_if_modified(|s| {
            let changed = s.filter != filter;
            s.filter = filter;
            changed
        });
    }

    pub fn dismiss_error(&mut self) {
        if let Some(timer) = self.error_timer.take() {
            timer.abort();
        }
        self.error_generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Shows `message`, replacing any current one, and restarts the
    /// auto-dismiss timer.
    fn show_error(&mut self, message: ErrorMessage) {
        if let Some(timer) = self.error_timer.take() {
            timer.abort();
        }
        let generation = self.error_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.error = Some(message));

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.error_generation);
        let timeout = self.error_timeout;
        self.error_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            state.send_if_modified(|s| {
                // A newer error owns the banner now.
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                s.error.take().is_some()
            });
        }));
    }

    fn replace_by_id(&self, updated: Todo) {
        self.state.send_modify(|s| {
            s.todos = s
                .todos
                .iter()
                .map(|todo| {
                    if todo.id == updated.id {
                        updated.clone()
                    } else {
                        todo.clone()
                    }
                })
                .collect();
        });
    }
}

impl Drop for TodoApp {
    fn drop(&mut self) {
        if let Some(timer) = self.error_timer.take() {
            timer.abort();
        }
    }
}
