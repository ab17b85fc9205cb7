//! Client core for the todo list application.
//!
//! # Overview
//! Talks to a REST todo service and keeps a local, optimistic copy of one
//! owner's list. The controller (`TodoApp`) owns that copy; the view models
//! under `view` hold per-widget UI state and render to plain text.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces a request as data,
//!   `parse_*` consumes a response. `Transport` does the I/O in between and
//!   `HttpTodoApi` ties the two together behind the `TodoApi` trait.
//! - `TodoApp` publishes `AppState` snapshots over a `watch` channel. Filtered
//!   lists and counts are derived from the snapshot, never stored.
//! - Failures become banner messages in the snapshot instead of errors, and
//!   leave affected items as they were.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod transport;
pub mod types;
pub mod view;

pub use api::{HttpTodoApi, TodoApi};
pub use client::TodoClient;
pub use config::Config;
pub use controller::TodoApp;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{AppState, ErrorMessage};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Filter, NewTodo, Todo, TodoId, TodoPatch, PLACEHOLDER_ID};
