use crate::http::request::{Method, Request};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty request line")]
    Empty,
    #[error("request line has no target: {0:?}")]
    MissingTarget(String),
}

/// Parses a single request line into method and target.
///
/// The line is split on single spaces with no further cleanup, so
/// `"GET  /a.html"` yields an empty target. The trailing line terminator,
/// if any, is ignored.
pub fn parse_request_line(line: &str) -> Result<Request, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parts = line.split(' ');

    // split always yields at least one item for a non-empty line
    let method = parts.next().ok_or(ParseError::Empty)?;
    let target = parts
        .next()
        .ok_or_else(|| ParseError::MissingTarget(line.to_string()))?;

    Ok(Request::new(Method::parse(method), target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = parse_request_line("GET /index.html HTTP/1.1\r\n").unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.target, "/index.html");
    }

    #[test]
    fn single_token_is_malformed() {
        let result = parse_request_line("GET\r\n");

        assert!(matches!(result, Err(ParseError::MissingTarget(_))));
    }
}
