//! HTTP protocol implementation.
//!
//! This module answers exactly one HTTP/1.1 request per connection and then
//! closes it. There is no keep-alive, no chunked encoding and no
//! `Content-Length`: the end of the body is signalled by closing the stream.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine driving the other modules
//! - **`parser`**: Reads the request head line by line and extracts the GET path
//! - **`request`**: Request representation
//! - **`mime`**: Content type classification from the path suffix
//! - **`target`**: Resolves the requested path to an open file, once
//! - **`response`**: Status codes and the response head
//! - **`template`**: Placeholder substitution for HTML bodies
//! - **`writer`**: Writes the head and streams one of the three body kinds
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read lines until the blank line
//!        └──────┬──────┘
//!               │ Request (or nothing)
//!               ▼
//!        ┌──────────────────┐
//!        │    Resolving     │ ← Open and stat the file once
//!        └──────┬───────────┘
//!               │ FileTarget
//!               ▼
//!        ┌──────────────────┐
//!        │     Writing      │ ← Head, then templated / binary / 404 body
//!        └──────┬───────────┘
//!               │ Flushed and shut down
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webworker::config::StaticFilesConfig;
//! use webworker::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let files = Arc::new(StaticFilesConfig::default());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let files = files.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, files);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod target;
pub mod template;
pub mod writer;
