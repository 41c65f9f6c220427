//! State orchestration for a todo list backed by a remote CRUD service.
//!
//! # Overview
//! `TodoApp` owns the todo collection, the pending-create placeholder, the
//! filter mode and a self-dismissing error banner. Presentation reads a
//! `TodoView` and raises intents (add, update, delete, toggle-all,
//! clear-completed); each intent runs a flow against a `TodoService`.
//!
//! # Design
//! - `TodoClient` is a stateless codec: `build_*` produces plain-data
//!   requests, `parse_*` consumes plain-data responses. A `Transport`
//!   executes the round-trip in between, so only one type touches the network.
//! - Flows turn every service failure into one banner message and re-signal a
//!   `FlowError`; bulk flows count those to decide on a summary message.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod notice;
pub mod service;
pub mod state;
pub mod transport;
pub mod types;

pub use app::{EditOutcome, TodoApp, TodoView};
pub use client::TodoClient;
pub use config::{Config, ConfigError};
pub use error::{ApiError, ErrorMessage, FlowError};
pub use filter::{Counts, FilterMode, UnknownFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notice::{Notice, DISMISS_AFTER};
pub use service::{RemoteTodoService, TodoService};
pub use state::TodoState;
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTodo, Todo, UpdateTodo, PLACEHOLDER_ID};

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
