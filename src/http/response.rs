use std::path::Path;

/// File inside the web root used as the body of every error response.
pub const ERROR_PAGE: &str = "error.html";

/// Body used when the web root has no error page.
pub const FALLBACK_ERROR_BODY: &str = "<html><body><h1>Error</h1><p>The request could not be served.</p></body></html>";

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): File served
/// - `Forbidden` (403): Extension not in the allow-list, or path outside the root
/// - `NotFound` (404): No such file
/// - `MethodNotAllowed` (405): Method other than GET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// A complete, fully buffered HTTP response.
///
/// The only headers ever sent are `Content-Type` and `Content-Length`; the
/// length is always derived from `body` when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Value of the Content-Type header
    pub content_type: String,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Creates a 200 OK response carrying file contents.
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok, content_type, body)
    }

    /// Creates an HTML error response with the given body.
    pub fn error(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, "text/html", body)
    }

    /// Byte length of the body, as sent in Content-Length.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

/// Renders the generic error page for `status`.
///
/// Every non-200 status gets the same page: `error.html` from the web root
/// if it can be read, otherwise a fixed one-line fragment.
pub async fn error_page(root: &Path, status: StatusCode) -> Response {
    let body = match tokio::fs::read(root.join(ERROR_PAGE)).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("No error page in {}: {}", root.display(), e);
            FALLBACK_ERROR_BODY.as_bytes().to_vec()
        }
    };

    Response::error(status, body)
}
