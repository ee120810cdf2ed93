/// Crawl configuration shared by the engine and the orchestrator.
///
/// The orchestrator reads only `parallelism`; everything else flows
/// opaquely to the crawl engine.
#[derive(Debug, Clone)]
pub struct Options {
    /// Seed URLs to crawl.
    pub urls: Vec<String>,
    /// Maximum navigation depth below a seed.
    pub max_depth: usize,
    /// Maximum duration of one crawl session in seconds, 0 for unbounded.
    pub crawl_duration: u64,
    /// Time to wait for each request, in seconds.
    pub timeout: u64,
    /// Times a failed request is retried before giving up.
    pub retries: usize,
    /// Optional http/socks5 proxy for all requests.
    pub proxy: Option<String>,
    /// Extra "Name: value" headers sent with every request.
    pub custom_headers: Vec<String>,
    /// Concurrent fetch workers within one crawl session.
    pub concurrency: usize,
    /// Seed inputs processed concurrently.
    pub parallelism: usize,
    /// Delay between requests on each fetch worker, in seconds.
    pub delay: u64,
    /// Run the relative-endpoint pass over javascript responses.
    pub scrape_js_responses: bool,
    /// Response bodies are truncated beyond this many bytes.
    pub max_response_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            urls: Vec::new(),
            max_depth: 2,
            crawl_duration: 0,
            timeout: 10,
            retries: 1,
            proxy: None,
            custom_headers: Vec::new(),
            concurrency: 10,
            parallelism: 10,
            delay: 0,
            scrape_js_responses: true,
            max_response_size: 2 * 1024 * 1024,
        }
    }
}
