//! Tests for the configuration builder.
//!
//! This file contains all tests for option accumulation, including tests for:
//! - Default option values
//! - Header merging and overrides
//! - Body-encoding mode switching

use repartee::{BodyMode, Http};

use std::time::Duration;

mod common;
use common::helpers::*;

#[test]
fn test_default_options() {
    let http = Http::new();
    let options = http.options();

    assert!(!options.debug);
    assert!(options.verify);
    assert_eq!(options.timeout, Duration::from_secs(10));
    assert_eq!(options.base_url, None);
    assert_eq!(options.max_redirects, 5);
    assert_eq!(options.body_mode, BodyMode::Json);
    assert_header(&http, "accept", "application/json");
    assert_header(&http, "content-type", "application/json");
}

#[test]
fn test_create_sets_base_url() {
    let http = Http::create("https://api.example.com");
    assert_eq!(
        http.options().base_url.as_deref(),
        Some("https://api.example.com")
    );
}

#[test]
fn test_base_url_none_disables_prefixing() {
    let http = Http::create("https://api.example.com").base_url(None::<&str>);
    assert_eq!(http.options().base_url, None);
}

#[test]
fn test_headers_merge_overlay() {
    // B's keys win on conflict, A's non-conflicting keys survive.
    let http = Http::new()
        .headers([("x-one", "a"), ("x-two", "a")])
        .headers([("x-two", "b"), ("x-three", "b")]);

    assert_header(&http, "x-one", "a");
    assert_header(&http, "x-two", "b");
    assert_header(&http, "x-three", "b");
}

#[test]
fn test_headers_merge_is_case_insensitive() {
    let http = Http::new()
        .headers([("X-Custom", "one")])
        .headers([("x-custom", "two")]);

    assert_header(&http, "x-custom", "two");
}

#[test]
fn test_bearer_token() {
    let http = Http::new().bearer("abc");
    assert_header(&http, "authorization", "Bearer abc");
}

#[test]
fn test_raw_authorization() {
    let http = Http::new().authorization("Basic aGk6MTIzNDU2Cg==");
    assert_header(&http, "authorization", "Basic aGk6MTIzNDU2Cg==");
}

#[test]
fn test_single_header_overrides() {
    let http = Http::new().header("x-client", "one").header("x-client", "two");
    assert_header(&http, "x-client", "two");
}

#[test]
fn test_accept_and_content_type_json() {
    let http = Http::new()
        .header("accept", "text/plain")
        .header("content-type", "text/plain")
        .accept_json()
        .content_type_json();

    assert_header(&http, "accept", "application/json");
    assert_header(&http, "content-type", "application/json");
}

#[test]
fn test_timeout() {
    let http = Http::new().timeout(Duration::from_secs(30));
    assert_eq!(http.options().timeout, Duration::from_secs(30));
}

#[test]
fn test_body_mode_toggles_both_ways() {
    let http = Http::new().as_form();
    assert_eq!(http.options().body_mode, BodyMode::Form);

    let http = http.as_json();
    assert_eq!(http.options().body_mode, BodyMode::Json);
}

#[test]
fn test_without_verify() {
    let http = Http::new().without_verify();
    assert!(!http.options().verify);
}

#[test]
fn test_debug_flag() {
    let http = Http::new().debug(true);
    assert!(http.options().debug);
}

#[test]
fn test_max_redirects() {
    let http = Http::new().max_redirects(0);
    assert_eq!(http.options().max_redirects, 0);
}

#[test]
fn test_configure_registers_tweaks() {
    let http = Http::new()
        .configure(|builder| builder.user_agent(TEST_USER_AGENT))
        .configure(|builder| builder.no_proxy());

    assert_eq!(http.options().tweaks.len(), 2);
    // The tweaked configuration must still produce a valid client.
    assert!(http.client().is_ok());
}

#[test]
fn test_no_response_before_dispatch() {
    let http = Http::new();
    assert!(http.response().is_none());
}

#[test]
fn test_http_debug_format() {
    let http = Http::new().configure(|builder| builder);
    let debug_str = format!("{:?}", http);

    assert!(debug_str.contains("Http"));
    assert!(debug_str.contains("options"));
    assert!(debug_str.contains("tweaks"));
}
