//! Content type detection based on file name suffixes.

/// Fallback content type when no known suffix matches.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Known suffixes, checked in order. First match wins.
const CONTENT_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".css", "text/css"),
    (".js", "application/javascript"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
];

/// Returns the MIME type for a file name.
///
/// Matching is a case-sensitive suffix comparison, so `photo.PNG` falls
/// through to [`DEFAULT_CONTENT_TYPE`].
///
/// # Example
///
/// ```
/// # use harbor::http::mime::content_type_for;
/// assert_eq!(content_type_for("style.css"), "text/css");
/// assert_eq!(content_type_for("notes.txt"), "text/plain");
/// ```
pub fn content_type_for(file_name: &str) -> &'static str {
    CONTENT_TYPES
        .iter()
        .find(|(suffix, _)| file_name.ends_with(suffix))
        .map(|(_, content_type)| *content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
