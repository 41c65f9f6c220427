//! The remote todo service as seen by the mutation flows.

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// CRUD operations the flows depend on. Create and update return the
/// canonical persisted record.
#[async_trait]
pub trait TodoService: Send + Sync {
    async fn fetch_todos(&self, user_id: u64) -> Result<Vec<Todo>, ApiError>;

    async fn create_todo(&self, input: CreateTodo) -> Result<Todo, ApiError>;

    async fn update_todo(&self, id: u64, input: UpdateTodo) -> Result<Todo, ApiError>;

    async fn delete_todo(&self, id: u64) -> Result<(), ApiError>;
}

#[async_trait]
impl<S: TodoService + ?Sized> TodoService for Arc<S> {
    async fn fetch_todos(&self, user_id: u64) -> Result<Vec<Todo>, ApiError> {
        (**self).fetch_todos(user_id).await
    }

    async fn create_todo(&self, input: CreateTodo) -> Result<Todo, ApiError> {
        (**self).create_todo(input).await
    }

    async fn update_todo(&self, id: u64, input: UpdateTodo) -> Result<Todo, ApiError> {
        (**self).update_todo(id, input).await
    }

    async fn delete_todo(&self, id: u64) -> Result<(), ApiError> {
        (**self).delete_todo(id).await
    }
}

/// `TodoService` over HTTP: `TodoClient` encodes, `T` executes.
#[derive(Debug, Clone)]
pub struct RemoteTodoService<T = ReqwestTransport> {
    client: TodoClient,
    transport: T,
}

impl RemoteTodoService<ReqwestTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, ReqwestTransport::new())
    }
}

impl<T: Transport> RemoteTodoService<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }
}

#[async_trait]
impl<T: Transport> TodoService for RemoteTodoService<T> {
    async fn fetch_todos(&self, user_id: u64) -> Result<Vec<Todo>, ApiError> {
        let req = self.client.build_list_todos(user_id);
        self.client.parse_list_todos(self.transport.execute(req).await?)
    }

    async fn create_todo(&self, input: CreateTodo) -> Result<Todo, ApiError> {
        let req = self.client.build_create_todo(&input)?;
        self.client.parse_create_todo(self.transport.execute(req).await?)
    }

    async fn update_todo(&self, id: u64, input: UpdateTodo) -> Result<Todo, ApiError> {
        let req = self.client.build_update_todo(id, &input)?;
        self.client.parse_update_todo(self.transport.execute(req).await?)
    }

    async fn delete_todo(&self, id: u64) -> Result<(), ApiError> {
        let req = self.client.build_delete_todo(id);
        self.client.parse_delete_todo(self.transport.execute(req).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Records every request and answers with a fixed response.
    struct Recorded {
        requests: Mutex<Vec<HttpRequest>>,
        status: u16,
        body: &'static str,
    }

    impl Recorded {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                status,
                body,
            }
        }
    }

    #[async_trait]
    impl Transport for Recorded {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::TransportError("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn update_goes_through_client_and_transport() {
        let service = RemoteTodoService::with_transport(
            "http://api.test/",
            Recorded::new(200, r#"{"id":3,"userId":1,"title":"t","completed":true}"#),
        );

        let todo = service.update_todo(3, UpdateTodo::completed(true)).await.unwrap();
        assert!(todo.completed);

        let requests = service.transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Patch);
        assert_eq!(requests[0].path, "http://api.test/todos/3");
    }

    #[tokio::test]
    async fn status_errors_surface_as_api_errors() {
        let service = RemoteTodoService::with_transport("http://api.test", Recorded::new(404, ""));
        assert_eq!(service.delete_todo(1).await, Err(ApiError::NotFound));
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let service = RemoteTodoService::with_transport("http://api.test", Unreachable);
        let err = service.fetch_todos(1).await.unwrap_err();
        assert!(matches!(err, ApiError::TransportError(_)));
    }
}
