// Tests for the navigation model

use skitter_core::navigation::{Method, Request, Response};
use std::collections::HashMap;
use url::Url;

fn response_at(url: &str, depth: usize) -> Response {
    Response {
        url: Url::parse(url).expect("test URL is valid"),
        root_hostname: "example.com".to_string(),
        depth,
        status_code: 200,
        content_type: Some("text/html".to_string()),
        body: String::new(),
    }
}

fn post_request(url: &str, body: &str) -> Request {
    Request {
        method: Method::Post,
        url: url.to_string(),
        body: body.to_string(),
        depth: 0,
        headers: HashMap::new(),
        tag: String::new(),
        attribute: String::new(),
        root_hostname: "x".to_string(),
        source: String::new(),
    }
}

// ============================================================================
// Request URL Tests
// ============================================================================

#[test]
fn test_request_url_get() {
    let url = Url::parse("http://x/y").unwrap();
    let request = Request::seed(&url);
    assert_eq!(request.request_url(), "http://x/y");
}

#[test]
fn test_request_url_post_appends_body() {
    let request = post_request("http://x/y", "a=1");
    assert_eq!(request.request_url(), "http://x/y:a=1");
}

// ============================================================================
// Dedup Key Tests
// ============================================================================

#[test]
fn test_dedup_key_distinguishes_post_bodies() {
    let first = post_request("http://x/y", "a=1");
    let second = post_request("http://x/y", "a=2");
    assert_ne!(first.dedup_key(), second.dedup_key());
}

#[test]
fn test_dedup_key_distinguishes_methods() {
    let get = Request::seed(&Url::parse("http://x/y").unwrap());
    let post = post_request("http://x/y", "");
    assert_ne!(get.dedup_key(), post.dedup_key());
}

#[test]
fn test_dedup_key_equal_for_identical_gets() {
    let url = Url::parse("http://x/y").unwrap();
    assert_eq!(Request::seed(&url).dedup_key(), Request::seed(&url).dedup_key());
}

// ============================================================================
// Seed Construction Tests
// ============================================================================

#[test]
fn test_seed_starts_at_depth_zero() {
    let url = Url::parse("https://example.com/start").unwrap();
    let seed = Request::seed(&url);
    assert_eq!(seed.depth, 0);
    assert_eq!(seed.method, Method::Get);
    assert_eq!(seed.root_hostname, "example.com");
    assert!(seed.tag.is_empty());
    assert!(seed.attribute.is_empty());
}

// ============================================================================
// Child Derivation Tests
// ============================================================================

#[test]
fn test_child_propagates_depth_without_incrementing() {
    let response = response_at("http://example.com/app/", 3);
    let child = Request::from_response("/z", "body", "a", "href", &response).unwrap();
    assert_eq!(child.depth, 3);
    assert_eq!(child.url, "http://example.com/z");
}

#[test]
fn test_child_carries_provenance_and_root() {
    let response = response_at("http://example.com/app/", 1);
    let child = Request::from_response("/z.php", "body", "a", "href", &response).unwrap();
    assert_eq!(child.method, Method::Get);
    assert_eq!(child.source, "body");
    assert_eq!(child.tag, "a");
    assert_eq!(child.attribute, "href");
    assert_eq!(child.root_hostname, "example.com");
    assert!(child.body.is_empty());
}

#[test]
fn test_child_resolves_dot_relative_path() {
    let response = response_at("http://example.com/app/", 1);
    let child = Request::from_response("./admin", "html", "a", "href", &response).unwrap();
    assert_eq!(child.url, "http://example.com/app/admin");
}

#[test]
fn test_child_absolute_path_passes_through() {
    let response = response_at("http://example.com/app/", 1);
    let child =
        Request::from_response("https://sub.example.com/x", "html", "a", "href", &response)
            .unwrap();
    assert_eq!(child.url, "https://sub.example.com/x");
}

#[test]
fn test_child_fragment_only_path_is_dropped() {
    let response = response_at("http://example.com/app/", 1);
    assert!(Request::from_response("#top", "html", "a", "href", &response).is_none());
}

// ============================================================================
// Response Tests
// ============================================================================

#[test]
fn test_absolute_url_strips_fragment() {
    let response = response_at("http://example.com/app/", 1);
    assert_eq!(
        response.absolute_url("page#section"),
        Some("http://example.com/app/page".to_string())
    );
}

#[test]
fn test_absolute_url_empty_path_is_dropped() {
    let response = response_at("http://example.com/app/", 1);
    assert!(response.absolute_url("").is_none());
    assert!(response.absolute_url("   ").is_none());
}

#[test]
fn test_is_html_by_content_type() {
    let mut response = response_at("http://example.com/", 1);
    assert!(response.is_html());
    response.content_type = Some("application/json".to_string());
    assert!(!response.is_html());
    response.content_type = None;
    assert!(!response.is_html());
}

#[test]
fn test_is_javascript_by_content_type_or_path() {
    let mut response = response_at("http://example.com/app.js", 1);
    response.content_type = None;
    assert!(response.is_javascript());

    let mut response = response_at("http://example.com/bundle", 1);
    response.content_type = Some("application/javascript".to_string());
    assert!(response.is_javascript());

    response.content_type = Some("text/plain".to_string());
    assert!(!response.is_javascript());
}
