//! Domain types for the todo service.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch schema drift between the two crates. `Todo` also
//! carries the client-only `loading` flag, which is skipped on the wire.

use serde::{Deserialize, Serialize};

/// Id the pending placeholder carries until the server assigns a real one.
pub const PLACEHOLDER_ID: u64 = 0;

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
    /// Set while a mutation for this item is in flight. Never persisted.
    #[serde(skip)]
    pub loading: bool,
}

impl Todo {
    /// The record shown while a create request is outstanding.
    pub fn placeholder(user_id: u64, title: &str) -> Self {
        Self {
            id: PLACEHOLDER_ID,
            user_id,
            title: title.to_string(),
            completed: false,
            loading: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for an existing todo. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_is_never_serialized() {
        let todo = Todo {
            id: 1,
            user_id: 2,
            title: "x".to_string(),
            completed: false,
            loading: true,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert!(json.get("loading").is_none());
        assert_eq!(json["userId"], 2);
    }

    #[test]
    fn loading_defaults_to_false_on_deserialize() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":4,"userId":1,"title":"t","completed":true}"#).unwrap();
        assert!(!todo.loading);
        assert!(todo.completed);
    }

    #[test]
    fn placeholder_is_loading_with_reserved_id() {
        let todo = Todo::placeholder(9, "draft");
        assert!(todo.is_placeholder());
        assert!(todo.loading);
        assert!(!todo.completed);
        assert_eq!(todo.user_id, 9);
    }

    #[test]
    fn partial_update_omits_absent_fields() {
        let json = serde_json::to_value(UpdateTodo::completed(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }
}
