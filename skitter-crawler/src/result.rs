use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skitter_core::navigation::{Method, Request};
use std::time::Duration;

/// One visited endpoint, emitted in visit order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub timestamp: DateTime<Utc>,
    pub method: Method,
    pub url: String,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub response_time: Duration,
    /// Depth of the request that produced this result.
    pub depth: usize,
    /// Extraction pass that discovered the URL, empty for seeds.
    pub source: String,
    pub tag: String,
    pub attribute: String,
}

impl CrawlResult {
    /// Starts a result record from the request about to be dispatched;
    /// response fields are filled in once the fetch completes.
    pub fn from_request(request: &Request) -> Self {
        CrawlResult {
            timestamp: Utc::now(),
            method: request.method,
            url: request.url.clone(),
            status_code: 0,
            content_type: None,
            content_length: None,
            response_time: Duration::from_secs(0),
            depth: request.depth,
            source: request.source.clone(),
            tag: request.tag.clone(),
            attribute: request.attribute.clone(),
        }
    }
}
