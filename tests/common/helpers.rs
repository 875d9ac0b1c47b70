use repartee::Http;

// Common test constants
pub const TEST_TOKEN: &str = "secret-token";
pub const TEST_USER_AGENT: &str = "repartee-test-agent";
pub const JSON_BODY: &str = r#"{"a":1,"tags":["x","y"],"nested":{"b":2}}"#;

/// An empty query parameter list for dispatches without a query string.
pub fn no_query() -> &'static [(&'static str, &'static str)] {
    &[]
}

/// Starts a mock HTTP server for dispatch tests.
pub async fn mock_server() -> mockito::ServerGuard {
    mockito::Server::new_async().await
}

/// Creates an instance pointed at the given mock server.
pub fn test_http(server: &mockito::ServerGuard) -> Http {
    Http::create(server.url())
}

/// Reads a configured header value back out of an instance.
pub fn header_value<'a>(http: &'a Http, key: &str) -> Option<&'a str> {
    http.options().headers.get(key).map(String::as_str)
}

/// Asserts that a header is configured with the expected value.
pub fn assert_header(http: &Http, key: &str, expected: &str) {
    assert_eq!(
        header_value(http, key),
        Some(expected),
        "header mismatch for key: {}",
        key
    );
}
