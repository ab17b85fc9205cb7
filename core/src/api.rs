//! The four remote operations the controller depends on.
//!
//! `TodoApi` is what the controller talks to. `HttpTodoApi` implements it by
//! pairing the stateless `TodoClient` with a `Transport`; tests substitute
//! their own implementation.

use async_trait::async_trait;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{NewTodo, Todo, TodoId, TodoPatch};

#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self, owner_id: u64) -> Result<Vec<Todo>, ApiError>;
    async fn create(&self, input: NewTodo) -> Result<Todo, ApiError>;
    async fn remove(&self, id: TodoId) -> Result<(), ApiError>;
    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpTodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> HttpTodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }
}

#[async_trait]
impl<T: Transport> TodoApi for HttpTodoApi<T> {
    async fn list(&self, owner_id: u64) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos(owner_id);
        let response = self.transport.execute(request).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, input: NewTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(&input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn remove(&self, id: TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_todo(response)
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, &patch)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }
}
