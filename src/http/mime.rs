//! MIME type detection based on file extensions.

/// Content type used for any extension without a table entry.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Maps a file extension (without the leading dot) to a MIME type.
///
/// Lookup ignores ASCII case.
///
/// # Example
///
/// ```
/// # use webserver::http::mime::content_type;
/// assert_eq!(content_type("css"), "text/css");
/// assert_eq!(content_type("HTML"), "text/html");
/// assert_eq!(content_type("exe"), "application/octet-stream");
/// ```
pub fn content_type(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
