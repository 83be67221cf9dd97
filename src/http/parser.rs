use crate::http::request::Request;

/// Longest request line accepted, in bytes, including its terminator.
pub const MAX_REQUEST_LINE: usize = 8 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The client closed the stream or sent a blank line.
    Empty,
    /// The line has fewer than two tokens.
    MissingPath,
    /// No line terminator within `MAX_REQUEST_LINE` bytes.
    TooLong,
}

/// Parses a raw request line into a [`Request`].
///
/// The line may still carry its `\n` or `\r\n` terminator. Bytes are decoded
/// lossily, then split on ASCII space; empty tokens are skipped.
pub fn parse_request_line(raw: &[u8]) -> Result<Request, ParseError> {
    let line = String::from_utf8_lossy(strip_line_ending(raw));

    let mut parts = line.split(' ').filter(|part| !part.is_empty());

    let method = parts.next().ok_or(ParseError::Empty)?;
    let path = parts.next().ok_or(ParseError::MissingPath)?;

    let mut request = Request::new(method, path);
    if let Some(version) = parts.next() {
        request = request.with_version(version);
    }

    Ok(request)
}

/// Removes a trailing `\n`, `\r\n` or lone `\r`.
pub fn strip_line_ending(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}
