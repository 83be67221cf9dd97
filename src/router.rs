//! Request routing
//!
//! Decides between the welcome page, a static file, and the 404 page.
//!
//! Request paths are appended to the static root verbatim. There is no
//! normalization, so `..` segments and absolute-looking paths reach the
//! filesystem unchanged: only run this server against a root whose
//! surroundings are safe to expose.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::http::mime::content_type_for;
use crate::http::response::Response;

/// Routes request paths against a static file root.
#[derive(Debug, Clone)]
pub struct Router {
    static_root: String,
}

impl Router {
    pub fn new(static_root: impl Into<String>) -> Self {
        Self {
            static_root: static_root.into(),
        }
    }

    /// Builds the candidate file path by plain concatenation of root and path.
    ///
    /// Trailing slashes are dropped as long as something remains past the
    /// root, so `/index.html/` names the file `index.html`. Nothing else is
    /// rewritten.
    ///
    /// # Example
    ///
    /// ```
    /// # use harbor::router::Router;
    /// # use std::path::PathBuf;
    /// let router = Router::new("public");
    /// assert_eq!(router.resolve("/css/site.css"), PathBuf::from("public/css/site.css"));
    /// assert_eq!(router.resolve("/about.html/"), PathBuf::from("public/about.html"));
    /// ```
    pub fn resolve(&self, path: &str) -> PathBuf {
        let joined = format!("{}{}", self.static_root, path);
        let trimmed = joined.trim_end_matches('/');

        if trimmed.len() > self.static_root.len() {
            PathBuf::from(trimmed)
        } else {
            PathBuf::from(joined)
        }
    }

    /// Produces the response for a request path.
    ///
    /// Missing files and directories yield a 404. An error is only returned
    /// when a file exists but cannot be read.
    pub async fn route(&self, path: &str) -> anyhow::Result<Response> {
        if path == "/" {
            return Ok(Response::welcome());
        }

        let candidate = self.resolve(path);

        match tokio::fs::metadata(&candidate).await {
            Ok(meta) if meta.is_file() => self.serve_file(&candidate).await,
            Ok(_) => {
                tracing::debug!(path = %candidate.display(), "Not a regular file");
                Ok(Response::not_found())
            }
            Err(e) => {
                tracing::debug!(path = %candidate.display(), error = %e, "No such file");
                Ok(Response::not_found())
            }
        }
    }

    async fn serve_file(&self, file: &Path) -> anyhow::Result<Response> {
        // Read to the end so Content-Length matches what is actually sent.
        let contents = tokio::fs::read(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?;

        let name = file
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        Ok(Response::file(content_type_for(&name), contents))
    }
}
