//! Harbor - minimal concurrent HTTP/1.1 static file server
//!
//! Serves a welcome page at `/`, files from a static root directory, and a
//! 404 page for everything else. One request per connection.

pub mod config;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
