use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// HTTP method of a navigation request. Only methods the crawler can
/// actually dispatch are representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A single crawl action: fetch `url` with `method`, `depth` hops below
/// the seed that started the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Request body, empty unless `method` is POST.
    pub body: String,
    pub depth: usize,
    pub headers: HashMap<String, String>,
    /// HTML tag the link was discovered in, empty for non-HTML provenance.
    pub tag: String,
    /// HTML attribute the link was discovered in, empty for non-HTML provenance.
    pub attribute: String,
    /// Hostname of the seed this request descends from.
    pub root_hostname: String,
    /// Extraction pass that produced this request ("html", "body", "js").
    pub source: String,
}

impl Request {
    /// Builds the depth-0 request a crawl session starts from.
    pub fn seed(url: &Url) -> Request {
        Request {
            method: Method::Get,
            url: url.to_string(),
            body: String::new(),
            depth: 0,
            headers: HashMap::new(),
            tag: String::new(),
            attribute: String::new(),
            root_hostname: url.host_str().unwrap_or_default().to_string(),
            source: String::new(),
        }
    }

    /// Derives a child request from a path discovered in `response`.
    ///
    /// Children are always GET. Depth and root hostname are copied from
    /// the response as-is; depth accounting happens where the response is
    /// built. Returns `None` when the path cannot be resolved against the
    /// response URL.
    pub fn from_response(
        path: &str,
        source: &str,
        tag: &str,
        attribute: &str,
        response: &Response,
    ) -> Option<Request> {
        let url = response.absolute_url(path)?;
        Some(Request {
            method: Method::Get,
            url,
            body: String::new(),
            depth: response.depth,
            headers: HashMap::new(),
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            root_hostname: response.root_hostname.clone(),
            source: source.to_string(),
        })
    }

    /// Canonical display string for this request. For POST the body is
    /// appended after a separator so requests differing only in body stay
    /// distinguishable in logs.
    pub fn request_url(&self) -> String {
        match self.method {
            Method::Get => self.url.clone(),
            Method::Post => format!("{}:{}", self.url, self.body),
        }
    }

    /// Identity key for frontier deduplication: `(method, url)` for GET,
    /// `(method, url, body)` for POST.
    pub fn dedup_key(&self) -> String {
        match self.method {
            Method::Get => format!("{} {}", self.method, self.url),
            Method::Post => format!("{} {} {}", self.method, self.url, self.body),
        }
    }
}

/// The navigated side of a crawl step, consumed when deriving children.
///
/// `depth` is the depth of the request that produced this response plus
/// one, set by the crawl engine when the response is built.
#[derive(Debug, Clone)]
pub struct Response {
    /// Effective URL after redirects, fragment stripped.
    pub url: Url,
    pub root_hostname: String,
    pub depth: usize,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl Response {
    /// Resolves a discovered path against this response's effective URL.
    /// Absolute inputs pass through unchanged; fragments are dropped.
    pub fn absolute_url(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() || path.starts_with('#') {
            return None;
        }
        let mut resolved = self.url.join(path).ok()?;
        resolved.set_fragment(None);
        Some(resolved.to_string())
    }

    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains("text/html"))
    }

    pub fn is_javascript(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.contains("javascript"))
            || self.url.path().ends_with(".js")
    }
}
