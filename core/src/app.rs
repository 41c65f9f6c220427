//! Mutation flows over the todo collection, and the view presentation renders.
//!
//! # Design
//! `TodoApp` is a cheap handle around shared state: the collection, the filter
//! mode and the error banner. Every flow follows the same shape: call the
//! service, apply the outcome to the collection in one locked step, turn a
//! failure into exactly one banner message, and hand a typed `FlowError` back
//! to the caller. Locks are never held across an `.await`.
//!
//! Bulk flows spawn one task per item and wait for every task to settle before
//! inspecting results, so one failure neither cancels nor rolls back the rest.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::{JoinError, JoinHandle};

use crate::config::Config;
use crate::error::{ErrorMessage, FlowError};
use crate::filter::FilterMode;
use crate::lock;
use crate::notice::Notice;
use crate::service::{RemoteTodoService, TodoService};
use crate::state::TodoState;
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Everything presentation needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView {
    /// Todos passing the current filter, in collection order.
    pub todos: Vec<Todo>,
    /// The pending create, rendered after the list and always as loading.
    pub temp_todo: Option<Todo>,
    pub filter: FilterMode,
    pub total: usize,
    pub active_count: usize,
    pub completed_count: usize,
    pub all_completed: bool,
    pub error: Option<ErrorMessage>,
}

impl TodoView {
    /// Banner text; empty when there is no error.
    pub fn error_text(&self) -> String {
        self.error.map(|e| e.to_string()).unwrap_or_default()
    }
}

/// What an inline edit submission ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The trimmed title matched the current one; nothing was sent.
    Unchanged,
    Renamed(Todo),
    /// The title was blank, so the todo was deleted instead.
    Deleted,
}

struct Inner<S> {
    service: S,
    user_id: u64,
    state: Mutex<TodoState>,
    filter: Mutex<FilterMode>,
    notice: Notice,
}

pub struct TodoApp<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for TodoApp<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl TodoApp<RemoteTodoService> {
    /// App talking to the service configured in `config`.
    pub fn connect(config: &Config) -> Self {
        Self::new(RemoteTodoService::new(&config.api_url), config.user_id)
    }
}

impl<S> TodoApp<S> {
    pub fn new(service: S, user_id: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                service,
                user_id,
                state: Mutex::new(TodoState::default()),
                filter: Mutex::new(FilterMode::default()),
                notice: Notice::default(),
            }),
        }
    }

    pub fn view(&self) -> TodoView {
        let filter = self.filter();
        let state = self.state();
        let counts = state.counts();
        TodoView {
            todos: state.visible(filter),
            temp_todo: state.temp_todo().cloned(),
            filter,
            total: counts.total(),
            active_count: counts.active,
            completed_count: counts.completed,
            all_completed: counts.all_completed(),
            error: self.inner.notice.current(),
        }
    }

    /// Copy of the full, unfiltered collection state.
    pub fn snapshot(&self) -> TodoState {
        self.state().clone()
    }

    pub fn filter(&self) -> FilterMode {
        *lock(&self.inner.filter)
    }

    pub fn set_filter(&self, mode: FilterMode) {
        *lock(&self.inner.filter) = mode;
    }

    pub fn error(&self) -> Option<ErrorMessage> {
        self.inner.notice.current()
    }

    pub fn dismiss_error(&self) {
        self.inner.notice.clear();
    }

    fn state(&self) -> MutexGuard<'_, TodoState> {
        lock(&self.inner.state)
    }

    fn fail(&self, message: ErrorMessage) {
        self.inner.notice.show(message);
    }
}

impl<S: TodoService + 'static> TodoApp<S> {
    /// Fetch the user's todos and replace the collection with them.
    pub async fn load(&self) -> Result<(), FlowError> {
        let user_id = self.inner.user_id;
        match self.inner.service.fetch_todos(user_id).await {
            Ok(todos) => {
                tracing::debug!(user_id, count = todos.len(), "todos loaded");
                self.state().replace_all(todos);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to load todos");
                self.fail(ErrorMessage::Load);
                Err(e.into())
            }
        }
    }

    /// Create a todo from `title`, showing a placeholder while the request is
    /// in flight.
    pub async fn add(&self, title: &str) -> Result<Todo, FlowError> {
        let title = title.trim();
        if title.is_empty() {
            self.fail(ErrorMessage::EmptyTitle);
            return Err(FlowError::EmptyTitle);
        }

        let user_id = self.inner.user_id;
        self.state().set_temp_todo(Some(Todo::placeholder(user_id, title)));
        let _placeholder = PlaceholderGuard(&self.inner.state);

        let input = CreateTodo {
            user_id,
            title: title.to_string(),
            completed: false,
        };
        match self.inner.service.create_todo(input).await {
            Ok(todo) => {
                tracing::debug!(id = todo.id, "todo added");
                self.state().append(todo.clone());
                self.inner.notice.clear();
                Ok(todo)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to add todo");
                self.fail(ErrorMessage::Add);
                Err(e.into())
            }
        }
    }

    /// Send a partial update and swap in the record the server returns.
    ///
    /// Leaves the item's loading flag alone; see `set_completed` and `rename`
    /// for the caller-side wrappers that manage it.
    pub async fn update(&self, id: u64, changes: UpdateTodo) -> Result<Todo, FlowError> {
        match self.inner.service.update_todo(id, changes).await {
            Ok(todo) => {
                self.state().replace(todo.clone());
                Ok(todo)
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to update todo");
                self.fail(ErrorMessage::Update);
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: u64) -> Result<(), FlowError> {
        match self.inner.service.delete_todo(id).await {
            Ok(()) => {
                self.state().remove(id);
                self.inner.notice.clear();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to delete todo");
                self.fail(ErrorMessage::Delete);
                Err(e.into())
            }
        }
    }

    /// Checkbox intent: update `completed` with the item marked loading.
    pub async fn set_completed(&self, id: u64, completed: bool) -> Result<Todo, FlowError> {
        self.while_loading(id, self.update(id, UpdateTodo::completed(completed)))
            .await
    }

    /// Destroy-button intent: delete with the item marked loading.
    pub async fn delete_item(&self, id: u64) -> Result<(), FlowError> {
        self.while_loading(id, self.delete(id)).await
    }

    /// Inline edit submission. A blank title deletes the todo; an unchanged
    /// one sends nothing.
    pub async fn rename(&self, id: u64, title: &str) -> Result<EditOutcome, FlowError> {
        let title = title.trim();
        if title.is_empty() {
            self.delete_item(id).await?;
            return Ok(EditOutcome::Deleted);
        }

        let unchanged = self.state().get(id).is_some_and(|t| t.title == title);
        if unchanged {
            return Ok(EditOutcome::Unchanged);
        }

        let todo = self
            .while_loading(id, self.update(id, UpdateTodo::title(title)))
            .await?;
        Ok(EditOutcome::Renamed(todo))
    }

    /// Complete everything if anything is pending, otherwise reactivate
    /// everything.
    ///
    /// Items whose own request failed still end up showing the target value.
    pub async fn toggle_all(&self) -> Result<(), FlowError> {
        let (target, ids) = {
            let mut state = self.state();
            if state.is_empty() {
                return Ok(());
            }
            let target = state.counts().active > 0;
            (target, state.mark_for_toggle(target))
        };
        tracing::debug!(target, count = ids.len(), "toggling all todos");

        let handles: Vec<_> = ids
            .iter()
            .map(|&id| {
                let app = self.clone();
                tokio::spawn(async move { app.update(id, UpdateTodo::completed(target)).await })
            })
            .collect();

        let mut failed = 0;
        for outcome in settle_all(handles).await {
            match outcome {
                Ok(Ok(_)) => {}
                Ok(Err(_)) => failed += 1,
                Err(e) => {
                    tracing::error!(error = %e, "toggle-all task did not settle");
                    self.state().clear_loading();
                    self.fail(ErrorMessage::BulkUpdate);
                    return Err(FlowError::Interrupted(e.to_string()));
                }
            }
        }

        if failed > 0 {
            tracing::warn!(failed, attempted = ids.len(), "some todos could not be updated");
            self.fail(ErrorMessage::PartialUpdate);
        }
        self.state().settle_toggle(&ids, target);

        if failed > 0 {
            return Err(FlowError::Partial {
                failed,
                attempted: ids.len(),
            });
        }
        Ok(())
    }

    /// Delete every completed todo; the ones that fail stay in the list.
    pub async fn clear_completed(&self) -> Result<(), FlowError> {
        let ids = self.state().completed_ids();
        if ids.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = ids.len(), "clearing completed todos");

        let handles: Vec<_> = ids
            .iter()
            .map(|&id| {
                let app = self.clone();
                tokio::spawn(async move { app.delete(id).await })
            })
            .collect();

        let failed = settle_all(handles)
            .await
            .into_iter()
            .filter(|outcome| !matches!(outcome, Ok(Ok(()))))
            .count();

        if failed > 0 {
            tracing::warn!(failed, attempted = ids.len(), "some todos could not be deleted");
            self.fail(ErrorMessage::PartialDelete);
            return Err(FlowError::Partial {
                failed,
                attempted: ids.len(),
            });
        }
        Ok(())
    }

    async fn while_loading<T>(&self, id: u64, flow: impl Future<Output = T>) -> T {
        let _loading = LoadingGuard::new(&self.inner.state, id);
        flow.await
    }
}

/// Wait for every task to finish, in order, keeping each outcome.
async fn settle_all<T>(handles: Vec<JoinHandle<T>>) -> Vec<Result<T, JoinError>> {
    let mut settled = Vec::with_capacity(handles.len());
    for handle in handles {
        settled.push(handle.await);
    }
    settled
}

/// Marks one item loading for as long as it lives.
struct LoadingGuard<'a> {
    state: &'a Mutex<TodoState>,
    id: u64,
}

impl<'a> LoadingGuard<'a> {
    fn new(state: &'a Mutex<TodoState>, id: u64) -> Self {
        lock(state).set_loading(id, true);
        Self { state, id }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).set_loading(self.id, false);
    }
}

/// Removes the pending-create placeholder on drop.
struct PlaceholderGuard<'a>(&'a Mutex<TodoState>);

impl Drop for PlaceholderGuard<'_> {
    fn drop(&mut self) {
        lock(self.0).set_temp_todo(None);
    }
}
