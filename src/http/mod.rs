//! HTTP protocol implementation.
//!
//! A deliberately small subset of HTTP/1.1: one request line per
//! connection, no request headers or bodies, no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: drives one request-response cycle over a client stream
//! - **`parser`**: splits the request line into method and path
//! - **`request`**: the parsed request line
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read the request line
//!        └──────┬──────┘
//!               │ Request parsed ──────────────┐ empty / malformed
//!               ▼                              │
//!        ┌──────────────────┐                  │
//!        │   Processing     │ ← Route the path │
//!        └──────┬───────────┘                  │
//!               │ Response ready               │
//!               ▼                              │
//!        ┌──────────────────┐                  │
//!        │    Writing       │ ← Send and flush │
//!        └──────┬───────────┘                  │
//!               ▼                              │
//!        ┌──────────────────┐                  │
//!        │     Closed       │ ←────────────────┘
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use harbor::http::connection::Connection;
//! use harbor::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new("public"));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
