use scraper::{Html, Selector};
use skitter_core::extractor::{extract_body_endpoints, extract_relative_endpoints};
use skitter_core::navigation::{Request, Response};
use tracing::debug;

/// Tag/attribute pairs the HTML pass walks for navigable links.
const LINK_SOURCES: &[(&str, &str)] = &[
    ("a", "href"),
    ("link", "href"),
    ("script", "src"),
    ("img", "src"),
    ("iframe", "src"),
    ("form", "action"),
];

/// Derives child requests from a navigation response.
///
/// HTML responses get a tag/attribute pass and the page-body pattern
/// pass; javascript responses get the relative-endpoint pass when
/// enabled. Unresolvable paths drop out. Deduplication happens at the
/// frontier, not here.
pub fn parse_response(response: &Response, scrape_js: bool) -> Vec<Request> {
    let mut requests = Vec::new();

    if response.is_html() {
        let document = Html::parse_document(&response.body);
        for (tag, attribute) in LINK_SOURCES {
            let Ok(selector) = Selector::parse(&format!("{tag}[{attribute}]")) else {
                continue;
            };
            for element in document.select(&selector) {
                let Some(path) = element.value().attr(attribute) else {
                    continue;
                };
                if let Some(request) =
                    Request::from_response(path, "html", tag, attribute, response)
                {
                    requests.push(request);
                }
            }
        }
        for endpoint in extract_body_endpoints(&response.body) {
            if let Some(request) = Request::from_response(&endpoint, "body", "", "", response) {
                requests.push(request);
            }
        }
    } else if scrape_js && response.is_javascript() {
        for endpoint in extract_relative_endpoints(&response.body) {
            if let Some(request) = Request::from_response(&endpoint, "js", "", "", response) {
                requests.push(request);
            }
        }
    }

    debug!("derived {} requests from {}", requests.len(), response.url);
    requests
}
