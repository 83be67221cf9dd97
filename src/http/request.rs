/// A request extracted from the first line of a connection.
///
/// Only the request line is ever read. Headers and bodies sent by the
/// client are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method token (e.g. "GET"). Logged, never used for routing.
    pub method: String,
    /// Raw request target, used verbatim for routing.
    pub path: String,
    /// Protocol version token, if the client sent one.
    pub version: Option<String>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}
