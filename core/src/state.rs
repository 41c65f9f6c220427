//! The in-memory todo collection and the pending-create placeholder.
//!
//! Plain data: every method is synchronous and applies one mutation
//! atomically. `TodoApp` owns a `TodoState` behind a mutex and is the only
//! writer.

use crate::filter::{self, Counts, FilterMode};
use crate::types::Todo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    todos: Vec<Todo>,
    temp_todo: Option<Todo>,
}

impl TodoState {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let mut state = Self::default();
        state.replace_all(todos);
        state
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn temp_todo(&self) -> Option<&Todo> {
        self.temp_todo.as_ref()
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.todos)
    }

    pub fn visible(&self, mode: FilterMode) -> Vec<Todo> {
        filter::visible(&self.todos, mode)
    }

    /// Replace the collection. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos.clear();
        for todo in todos {
            if self.get(todo.id).is_none() {
                self.todos.push(todo);
            }
        }
    }

    pub fn set_temp_todo(&mut self, todo: Option<Todo>) {
        self.temp_todo = todo;
    }

    /// Append a persisted record. An existing entry with the same id is
    /// replaced in place instead.
    pub fn append(&mut self, todo: Todo) {
        if !self.replace(todo.clone()) {
            self.todos.push(todo);
        }
    }

    /// Swap in the canonical record for `todo.id`. Returns false if no entry
    /// has that id.
    pub fn replace(&mut self, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<Todo> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        Some(self.todos.remove(index))
    }

    pub fn set_loading(&mut self, id: u64, loading: bool) {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.loading = loading;
        }
    }

    pub fn clear_loading(&mut self) {
        for todo in &mut self.todos {
            todo.loading = false;
        }
    }

    pub fn completed_ids(&self) -> Vec<u64> {
        self.todos.iter().filter(|t| t.completed).map(|t| t.id).collect()
    }

    /// Ids of every todo whose `completed` differs from `target`, each marked
    /// loading.
    pub fn mark_for_toggle(&mut self, target: bool) -> Vec<u64> {
        self.todos
            .iter_mut()
            .filter(|t| t.completed != target)
            .map(|t| {
                t.loading = true;
                t.id
            })
            .collect()
    }

    /// Force `completed = target` on `ids` and clear loading everywhere.
    pub fn settle_toggle(&mut self, ids: &[u64], target: bool) {
        for todo in &mut self.todos {
            if ids.contains(&todo.id) {
                todo.completed = target;
            }
            todo.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            user_id: 1,
            title: title.to_string(),
            completed,
            loading: false,
        }
    }

    #[test]
    fn replace_all_keeps_first_of_duplicate_ids() {
        let state = TodoState::with_todos(vec![
            todo(1, "a", false),
            todo(1, "dup", true),
            todo(2, "b", false),
        ]);
        assert_eq!(state.len(), 2);
        assert_eq!(state.get(1).map(|t| t.title.as_str()), Some("a"));
    }

    #[test]
    fn replace_swaps_record_by_id() {
        let mut state = TodoState::with_todos(vec![todo(1, "a", false), todo(2, "b", false)]);
        assert!(state.replace(todo(2, "B", true)));
        assert!(!state.replace(todo(9, "missing", true)));
        assert_eq!(state.todos()[1], todo(2, "B", true));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn remove_returns_removed_record() {
        let mut state = TodoState::with_todos(vec![todo(1, "a", false), todo(2, "b", true)]);
        assert_eq!(state.remove(1).map(|t| t.id), Some(1));
        assert_eq!(state.remove(1), None);
        assert_eq!(state.completed_ids(), vec![2]);
    }

    #[test]
    fn placeholder_is_kept_out_of_counts() {
        let mut state = TodoState::with_todos(vec![todo(1, "a", true)]);
        state.set_temp_todo(Some(Todo::placeholder(1, "pending")));
        assert_eq!(state.counts().total(), 1);
        assert_eq!(state.visible(FilterMode::All).len(), 1);
        assert!(state.temp_todo().is_some());
    }

    #[test]
    fn toggle_marks_only_differing_items() {
        let mut state = TodoState::with_todos(vec![todo(1, "a", false), todo(2, "b", true)]);
        let ids = state.mark_for_toggle(true);
        assert_eq!(ids, vec![1]);
        assert!(state.get(1).is_some_and(|t| t.loading));
        assert!(state.get(2).is_some_and(|t| !t.loading));

        state.settle_toggle(&ids, true);
        assert!(state.todos().iter().all(|t| t.completed && !t.loading));
    }
}
