use webserver::http::parser::{ParseError, parse_request_line};
use webserver::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = parse_request_line("GET / HTTP/1.1").unwrap();

    assert_eq!(req.method, Method::GET);
    assert_eq!(req.target, "/");
}

#[test]
fn test_parse_ignores_version_and_rest() {
    let req = parse_request_line("GET /style.css HTTP/9.9 trailing junk").unwrap();

    assert_eq!(req.method, Method::GET);
    assert_eq!(req.target, "/style.css");
}

#[test]
fn test_parse_without_version() {
    let req = parse_request_line("GET /app.js").unwrap();

    assert_eq!(req.target, "/app.js");
}

#[test]
fn test_parse_strips_line_terminators() {
    let crlf = parse_request_line("GET /a.html\r\n").unwrap();
    let lf = parse_request_line("GET /a.html\n").unwrap();

    assert_eq!(crlf.target, "/a.html");
    assert_eq!(lf.target, "/a.html");
}

#[test]
fn test_parse_empty_line() {
    assert_eq!(parse_request_line(""), Err(ParseError::Empty));
    assert_eq!(parse_request_line("\r\n"), Err(ParseError::Empty));
}

#[test]
fn test_parse_single_token() {
    let result = parse_request_line("GET");

    assert!(matches!(result, Err(ParseError::MissingTarget(_))));
}

#[test]
fn test_parse_double_space_yields_empty_target() {
    // naive single-space split: the empty token is the target
    let req = parse_request_line("GET  /index.html HTTP/1.1").unwrap();

    assert_eq!(req.method, Method::GET);
    assert_eq!(req.target, "");
}

#[test]
fn test_parse_trailing_space_yields_empty_target() {
    let req = parse_request_line("GET ").unwrap();

    assert_eq!(req.target, "");
}

#[test]
fn test_parse_leading_space_yields_empty_method() {
    let req = parse_request_line(" /index.html").unwrap();

    assert_eq!(req.method, Method::Other(String::new()));
    assert!(!req.is_get());
}

#[test]
fn test_parse_tab_is_not_a_separator() {
    let result = parse_request_line("GET\t/index.html");

    assert!(matches!(result, Err(ParseError::MissingTarget(_))));
}

#[test]
fn test_parse_keeps_unknown_methods() {
    let req = parse_request_line("BREW /pot.html HTTP/1.1").unwrap();

    assert_eq!(req.method, Method::Other("BREW".to_string()));
    assert_eq!(req.target, "/pot.html");
}
