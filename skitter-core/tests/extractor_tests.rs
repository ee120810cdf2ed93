// Tests for the endpoint extraction engine

use skitter_core::extractor::{
    BodyExtractor, EndpointExtractor, ScriptExtractor, extract_body_endpoints,
    extract_relative_endpoints,
};

// ============================================================================
// Page Body Extraction Tests
// ============================================================================

#[test]
fn test_body_dot_relative_path() {
    let endpoints = extract_body_endpoints("go to ./admin/panel.php now");
    assert_eq!(endpoints, vec!["./admin/panel.php"]);
}

#[test]
fn test_body_parent_relative_path() {
    let endpoints = extract_body_endpoints("see ../static/main.css here");
    assert_eq!(endpoints, vec!["../static/main.css"]);
}

#[test]
fn test_body_absolute_url() {
    let endpoints =
        extract_body_endpoints(r#"<a href="https://example.com/admin/login">Admin</a>"#);
    assert_eq!(endpoints, vec!["https://example.com/admin/login"]);
}

#[test]
fn test_body_root_relative_with_extension() {
    let endpoints = extract_body_endpoints(r#"<script src="/assets/app.js"></script>"#);
    assert_eq!(endpoints, vec!["/assets/app.js"]);
}

#[test]
fn test_body_root_relative_without_extension_ignored() {
    // Root-relative paths only match when they end in a known extension.
    let endpoints = extract_body_endpoints(r#"<a href="/about">About</a>"#);
    assert!(endpoints.is_empty());
}

#[test]
fn test_body_dedup_keeps_first_occurrence() {
    let endpoints =
        extract_body_endpoints("see ./a.php and ./a.php again, then ./b.html");
    assert_eq!(endpoints, vec!["./a.php", "./b.html"]);
}

#[test]
fn test_body_order_matches_occurrence_order() {
    let endpoints = extract_body_endpoints(
        "start /first.php then https://example.com/x/y then ../second.html end",
    );
    assert_eq!(
        endpoints,
        vec!["/first.php", "https://example.com/x/y", "../second.html"]
    );
}

#[test]
fn test_body_no_endpoints() {
    let endpoints = extract_body_endpoints("plain text with no endpoints here");
    assert!(endpoints.is_empty());
}

#[test]
fn test_body_empty_input() {
    assert!(extract_body_endpoints("").is_empty());
}

#[test]
fn test_body_extension_variants() {
    let endpoints =
        extract_body_endpoints("x /data/feed.json y /pages/index.html z /run/task.do w");
    assert_eq!(
        endpoints,
        vec!["/data/feed.json", "/pages/index.html", "/run/task.do"]
    );
}

#[test]
fn test_body_repeated_calls_are_independent() {
    // The seen set lives only within one call.
    assert_eq!(extract_body_endpoints("./a.php"), vec!["./a.php"]);
    assert_eq!(extract_body_endpoints("./a.php"), vec!["./a.php"]);
}

// ============================================================================
// Relative/Script Extraction Tests
// ============================================================================

#[test]
fn test_relative_quoted_api_route() {
    let endpoints = extract_relative_endpoints("fetch('/api/v1/users')");
    assert_eq!(endpoints, vec!["/api/v1/users"]);
}

#[test]
fn test_relative_requires_delimiters() {
    // No quotes or whitespace around the path, so nothing fires.
    let endpoints = extract_relative_endpoints("config=/api/v1/users;next");
    assert!(endpoints.is_empty());
}

#[test]
fn test_relative_script_file_with_query() {
    let endpoints = extract_relative_endpoints(r#"var s = "./app.js?v=12";"#);
    assert_eq!(endpoints, vec!["./app.js?v=12"]);
}

#[test]
fn test_relative_absolute_url() {
    let endpoints =
        extract_relative_endpoints("src: 'https://cdn.example.com/lib/jquery.min.js'");
    assert_eq!(endpoints, vec!["https://cdn.example.com/lib/jquery.min.js"]);
}

#[test]
fn test_relative_whitespace_delimited() {
    let endpoints = extract_relative_endpoints("GET /api/v2/items HTTP/1.1");
    assert_eq!(endpoints, vec!["/api/v2/items"]);
}

#[test]
fn test_relative_dedup_keeps_first_occurrence() {
    let endpoints =
        extract_relative_endpoints("'/api/users' and '/api/users' and '/api/orders'");
    assert_eq!(endpoints, vec!["/api/users", "/api/orders"]);
}

#[test]
fn test_relative_no_endpoints() {
    assert!(extract_relative_endpoints("let x = 1 + 2;").is_empty());
}

#[test]
fn test_relative_empty_input() {
    assert!(extract_relative_endpoints("").is_empty());
}

// ============================================================================
// Extractor Strategy Tests
// ============================================================================

#[test]
fn test_body_extractor_delegates() {
    let text = "see ./a.php and ./b.html";
    assert_eq!(BodyExtractor.extract(text), extract_body_endpoints(text));
}

#[test]
fn test_script_extractor_delegates() {
    let text = "fetch('/api/v1/users')";
    assert_eq!(
        ScriptExtractor.extract(text),
        extract_relative_endpoints(text)
    );
}

#[test]
fn test_extractors_are_independent() {
    // The body pass does not require delimiters; the script pass does.
    let text = "config=./tracked.php;";
    assert_eq!(BodyExtractor.extract(text), vec!["./tracked.php"]);
    assert!(ScriptExtractor.extract(text).is_empty());
}
