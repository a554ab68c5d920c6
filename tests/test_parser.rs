use switchboard::http::parser::RequestParser;
use switchboard::http::request::Method;

fn feed_all(parser: &mut RequestParser, bytes: &[u8]) {
    for &b in bytes {
        parser.feed(b);
    }
}

#[test]
fn test_parse_simple_get_request() {
    let mut parser = RequestParser::new();
    feed_all(
        &mut parser,
        b"GET /index.html HTTP/1.1\nHost: example.com\n\n",
    );

    assert!(parser.is_complete());
    let request = parser.into_request();
    assert_eq!(request.method(), Some(Method::GET));
    assert_eq!(request.path(), Some("/index.html"));
    assert_eq!(request.header("host"), Some("example.com"));
    assert!(request.is_complete());
}

#[test]
fn test_parse_crlf_line_endings() {
    let mut parser = RequestParser::new();
    feed_all(
        &mut parser,
        b"POST /api HTTP/1.1\r\nContent-Type: text/plain\r\n\r\n",
    );

    assert!(parser.is_complete());
    let request = parser.into_request();
    assert_eq!(request.method(), Some(Method::POST));
    assert_eq!(request.path(), Some("/api"));
    assert_eq!(request.header("content-type"), Some("text/plain"));
}

#[test]
fn test_parse_all_methods() {
    let methods = vec![
        ("HEAD", Method::HEAD),
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("TRACE", Method::TRACE),
        ("OPTIONS", Method::OPTIONS),
        ("CONNECT", Method::CONNECT),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let mut parser = RequestParser::new();
        let req = format!("{} /resource HTTP/1.1\n\n", method_str);
        feed_all(&mut parser, req.as_bytes());

        let request = parser.into_request();
        assert_eq!(request.method(), Some(expected_method));
        assert_eq!(request.path(), Some("/resource"));
    }
}

#[test]
fn test_header_names_lowercased_and_values_trimmed() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET / HTTP/1.1\nX-Custom-Header:   hello   \n\n");

    let request = parser.into_request();
    assert_eq!(request.header("x-custom-header"), Some("hello"));
    assert!(request.headers().contains_key("x-custom-header"));
}

#[test]
fn test_duplicate_header_last_occurrence_wins() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET / HTTP/1.1\nX-Tag: first\nX-Tag: second\n\n");

    let request = parser.into_request();
    assert_eq!(request.header("x-tag"), Some("second"));
}

#[test]
fn test_request_without_headers_completes() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET / HTTP/1.1\n\n");

    assert!(parser.is_complete());
    let request = parser.into_request();
    assert_eq!(request.method(), Some(Method::GET));
    assert!(request.headers().is_empty());
}

#[test]
fn test_not_complete_without_blank_line() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET / HTTP/1.1\nHost: example.com\n");

    assert!(!parser.is_complete());
    // Best-effort values are visible before completion.
    assert_eq!(parser.request().method(), Some(Method::GET));
    assert_eq!(parser.request().path(), Some("/"));
}

#[test]
fn test_range_header_sets_offsets() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /file HTTP/1.1\nRange: 10-20\n\n");

    let request = parser.into_request();
    assert!(request.is_partial_request());
    assert_eq!(request.start_offset(), 10);
    assert_eq!(request.end_offset(), 20);
}

#[test]
fn test_range_header_with_bytes_prefix() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /file HTTP/1.1\nRange: bytes=10-20\n\n");

    let request = parser.into_request();
    assert!(request.is_partial_request());
    assert_eq!(request.start_offset(), 10);
    assert_eq!(request.end_offset(), 20);
}

#[test]
fn test_range_open_ended_sides_default_to_zero() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /file HTTP/1.1\nRange: 5-\n\n");
    let request = parser.into_request();
    assert!(request.is_partial_request());
    assert_eq!(request.start_offset(), 5);
    assert_eq!(request.end_offset(), 0);

    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /file HTTP/1.1\nRange: -7\n\n");
    let request = parser.into_request();
    assert!(request.is_partial_request());
    assert_eq!(request.start_offset(), 0);
    assert_eq!(request.end_offset(), 7);
}

#[test]
fn test_range_header_without_dash_still_marks_partial() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /file HTTP/1.1\nRange: everything\n\n");

    let request = parser.into_request();
    assert!(request.is_partial_request());
    assert_eq!(request.start_offset(), 0);
    assert_eq!(request.end_offset(), 0);
}

#[test]
fn test_no_range_header_is_not_partial() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET / HTTP/1.1\nHost: example.com\n\n");

    let request = parser.into_request();
    assert!(!request.is_partial_request());
    assert_eq!(request.start_offset(), 0);
    assert_eq!(request.end_offset(), 0);
}

#[test]
fn test_nul_bytes_are_ignored() {
    let mut parser = RequestParser::new();
    for &b in b"GET / HTTP/1.1\n\n" {
        parser.feed(0);
        parser.feed(b);
    }

    assert!(parser.is_complete());
    let request = parser.into_request();
    assert_eq!(request.raw_bytes(), b"GET / HTTP/1.1\n\n");
}

#[test]
fn test_raw_bytes_retained_verbatim() {
    let input = b"PUT /upload HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let mut parser = RequestParser::new();
    feed_all(&mut parser, input);

    assert_eq!(parser.into_request().raw_bytes(), input);
}

#[test]
fn test_feeds_after_completion_do_not_mutate() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET / HTTP/1.1\nHost: a\n\n");
    assert!(parser.is_complete());

    let raw_len = parser.request().raw_bytes().len();
    feed_all(&mut parser, b"X-Late: header\nbody bytes");

    let request = parser.into_request();
    assert_eq!(request.raw_bytes().len(), raw_len);
    assert_eq!(request.header("x-late"), None);
    assert_eq!(request.header("host"), Some("a"));
}

#[test]
fn test_first_request_line_wins() {
    let mut parser = RequestParser::new();
    feed_all(
        &mut parser,
        b"GET /first HTTP/1.1\nPOST /second HTTP/1.1\n\n",
    );

    let request = parser.into_request();
    assert_eq!(request.method(), Some(Method::GET));
    assert_eq!(request.path(), Some("/first"));
}

#[test]
fn test_malformed_lines_silently_ignored() {
    let mut parser = RequestParser::new();
    feed_all(
        &mut parser,
        b"GET / HTTP/1.1\nthis line matches nothing\nHost: example.com\n\n",
    );

    assert!(parser.is_complete());
    let request = parser.into_request();
    assert_eq!(request.method(), Some(Method::GET));
    assert_eq!(request.header("host"), Some("example.com"));
    assert_eq!(request.headers().len(), 1);
}

#[test]
fn test_request_line_with_colon_also_recorded_as_header() {
    // The request-line and header shapes are both tested on every line.
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /a:b HTTP/1.1\n\n");

    let request = parser.into_request();
    assert_eq!(request.method(), Some(Method::GET));
    assert_eq!(request.path(), Some("/a:b"));
    assert_eq!(request.header("get /a"), Some("b HTTP/1.1"));
}

#[test]
fn test_path_runs_to_last_space() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /with space HTTP/1.1\n\n");

    let request = parser.into_request();
    assert_eq!(request.path(), Some("/with space"));
}

#[test]
fn test_accessors_idempotent_between_feeds() {
    let mut parser = RequestParser::new();
    feed_all(&mut parser, b"GET /stable HTTP/1.1\nHost: example.com\n");

    let first = (
        parser.request().method(),
        parser.request().path().map(str::to_string),
        parser.request().raw_bytes().to_vec(),
    );
    let second = (
        parser.request().method(),
        parser.request().path().map(str::to_string),
        parser.request().raw_bytes().to_vec(),
    );
    assert_eq!(first, second);
}
