/// HTTP request methods.
///
/// Only GET is served. Every other token in the method position is kept so
/// it can be rejected with 405 Method Not Allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// Any other token, kept verbatim (POST, HEAD, lowercase `get`, ...)
    Other(String),
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive, so `get` is not `GET`.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::Other(s) => s,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as read off the wire: the first two tokens of the request line.
///
/// Anything after the target (the HTTP version, headers, a body) is never
/// looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target as sent (e.g., "/index.html")
    pub target: String,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}
