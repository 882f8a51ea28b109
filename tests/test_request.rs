use webserver::http::request::{Method, Request};

#[test]
fn test_method_parse_get() {
    assert_eq!(Method::parse("GET"), Method::GET);
    assert_eq!(Method::GET.as_str(), "GET");
}

#[test]
fn test_method_parse_keeps_other_tokens() {
    for token in ["POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH", "BREW", ""] {
        let method = Method::parse(token);
        assert_eq!(method, Method::Other(token.to_string()));
        assert_eq!(method.as_str(), token);
    }
}

#[test]
fn test_method_parse_is_case_sensitive() {
    assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    assert_eq!(Method::parse("Get"), Method::Other("Get".to_string()));
}

#[test]
fn test_method_display() {
    assert_eq!(Method::GET.to_string(), "GET");
    assert_eq!(Method::Other("BREW".to_string()).to_string(), "BREW");
}

#[test]
fn test_request_is_get() {
    assert!(Request::new(Method::GET, "/").is_get());
    assert!(!Request::new(Method::parse("POST"), "/").is_get());
    assert!(!Request::new(Method::Other("get".to_string()), "/").is_get());
}
