use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Matches endpoint-shaped strings in page bodies: dot-relative paths,
/// absolute http(s) URLs followed by a path segment, and root-relative
/// paths ending in a known web content extension.
static PAGE_BODY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"((?:(?:[\.]{1,2}/[A-Za-z0-9-_/\\?&@\.?=]+)|https?://[A-Za-z0-9_\-\.]+([\.]{0,2})?/[A-Za-z0-9-_/\\?&@\.?=]+|(/[A-Za-z0-9-_/\\?&@\.]+\.(aspx?|action|cfm|cgi|do|pl|css|x?html?|js(p|on)?|pdf|php5?|py|rss))))"#,
    )
    .expect("page body pattern is valid")
});

/// Matches endpoint-shaped strings delimited by quotes or whitespace, the
/// way they occur as string literals in script content. The last
/// alternative catches extension-less multi-segment paths (API routes)
/// whose final segment has at least three characters.
static RELATIVE_ENDPOINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:"|'|\s)(((https?://[A-Za-z0-9_\-\.]+(:\d{1,5})?)+([\.]{1,2})?/[A-Za-z0-9/\-_\.\\]+([\?|#][^"']+)?)|((\.{1,2}/)?[a-zA-Z0-9\-_/\\]+\.(aspx?|js(on|p)?|html|php5?|html|action|do)([\?|#][^"']+)?)|((\.{0,2}/)[a-zA-Z0-9\-_/\\]+(/|\\)[a-zA-Z0-9\-_]{3,}([\?|#][^"|']+)?))(?:"|'|\s)"#,
    )
    .expect("relative endpoint pattern is valid")
});

/// Extracts candidate endpoints from a page body, in order of first
/// occurrence, duplicates dropped. No normalization or resolution is
/// performed; that is downstream work for the navigation model.
pub fn extract_body_endpoints(data: &str) -> Vec<String> {
    collect_matches(&PAGE_BODY_PATTERN, data)
}

/// Extracts candidate endpoints from script content. Matches must be
/// delimited by quotes or whitespace on both sides, so only
/// string-literal-like occurrences fire.
pub fn extract_relative_endpoints(data: &str) -> Vec<String> {
    collect_matches(&RELATIVE_ENDPOINT_PATTERN, data)
}

// The canonical endpoint string is capture group 1: the full endpoint
// without surrounding delimiters.
fn collect_matches(pattern: &Regex, data: &str) -> Vec<String> {
    let mut matches = Vec::new();
    let mut unique = HashSet::new();
    for captures in pattern.captures_iter(data) {
        let Some(endpoint) = captures.get(1) else {
            continue;
        };
        if unique.insert(endpoint.as_str()) {
            matches.push(endpoint.as_str().to_string());
        }
    }
    matches
}

/// Extraction strategy over raw text. Both built-in extractors are
/// pattern-based; a parser-based strategy can replace either without
/// touching callers.
pub trait EndpointExtractor {
    fn extract(&self, data: &str) -> Vec<String>;
}

/// Pass tuned for generic page bodies.
pub struct BodyExtractor;

impl EndpointExtractor for BodyExtractor {
    fn extract(&self, data: &str) -> Vec<String> {
        extract_body_endpoints(data)
    }
}

/// Pass tuned for relative and script-embedded endpoints.
pub struct ScriptExtractor;

impl EndpointExtractor for ScriptExtractor {
    fn extract(&self, data: &str) -> Vec<String> {
        extract_relative_endpoints(data)
    }
}
