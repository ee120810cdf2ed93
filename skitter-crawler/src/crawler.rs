use crate::error::{CrawlError, Result};
use crate::parser;
use crate::result::CrawlResult;
use futures::future::join_all;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use skitter_core::navigation::{Method, Request, Response};
use skitter_core::options::Options;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

pub type ResultCallback = Arc<dyn Fn(CrawlResult) + Send + Sync>;

/// State shared by the fetch workers of one crawl session.
struct SessionState {
    frontier: Mutex<VecDeque<Request>>,
    visited: Mutex<HashSet<String>>,
    results: Mutex<Vec<CrawlResult>>,
    in_flight: AtomicUsize,
}

/// Crawls one input at a time to the configured depth and duration
/// bounds. The underlying client and shutdown token are shared, so one
/// `Crawler` serves any number of concurrent sessions.
pub struct Crawler {
    client: Client,
    options: Arc<Options>,
    shutdown: CancellationToken,
    result_callback: Option<ResultCallback>,
}

impl Crawler {
    /// Builds the shared HTTP client from the crawl options. An invalid
    /// proxy or header line is a construction error.
    pub fn new(options: &Options) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("skitter/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(options.timeout))
            .connect_timeout(Duration::from_secs((options.timeout / 2).max(1)))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .default_headers(Self::build_custom_headers(&options.custom_headers)?);
        if let Some(proxy) = &options.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }
        Ok(Self {
            client: builder.build()?,
            options: Arc::new(options.clone()),
            shutdown: CancellationToken::new(),
            result_callback: None,
        })
    }

    /// Streams each result as it is produced, on top of the vec returned
    /// by [`crawl`](Self::crawl).
    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    /// Signals every session to stop pulling work and aborts in-flight
    /// fetches. Crawls are resumable by re-running with the same seeds,
    /// so fast shutdown wins over a graceful drain.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Crawls a single input until its frontier is exhausted or a bound
    /// is hit. An invalid or unreachable seed fails the session; fetch
    /// errors on derived requests only produce warnings.
    pub async fn crawl(&self, input: &str) -> Result<Vec<CrawlResult>> {
        let seed_url =
            Url::parse(input).map_err(|_| CrawlError::InvalidUrl(input.to_string()))?;
        if !matches!(seed_url.scheme(), "http" | "https") || seed_url.host_str().is_none() {
            return Err(CrawlError::InvalidUrl(input.to_string()));
        }
        let seed = Request::seed(&seed_url);
        let root_hostname = seed.root_hostname.clone();
        debug!("starting crawl of {} at depth {}", seed.url, self.options.max_depth);

        let deadline = (self.options.crawl_duration > 0)
            .then(|| Instant::now() + Duration::from_secs(self.options.crawl_duration));

        let state = Arc::new(SessionState {
            frontier: Mutex::new(VecDeque::new()),
            visited: Mutex::new(HashSet::from([seed.dedup_key()])),
            results: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
        });

        // The entry point is fetched inline so an unreachable seed fails
        // the whole session instead of silently draining an empty frontier.
        tokio::select! {
            _ = self.shutdown.cancelled() => return Ok(Vec::new()),
            outcome = Self::process_request(
                &self.client,
                &self.options,
                &self.result_callback,
                &state,
                &root_hostname,
                &seed,
            ) => outcome?,
        }

        let workers = self.options.concurrency.max(1);
        let mut handles = Vec::new();
        for worker_id in 0..workers {
            handles.push(tokio::spawn(Self::worker(
                self.client.clone(),
                self.options.clone(),
                state.clone(),
                self.shutdown.clone(),
                self.result_callback.clone(),
                root_hostname.clone(),
                deadline,
                worker_id,
            )));
        }
        join_all(handles).await;

        let results = state.results.lock().await.clone();
        info!("crawl of {} finished with {} results", input, results.len());
        Ok(results)
    }

    #[allow(clippy::too_many_arguments)]
    async fn worker(
        client: Client,
        options: Arc<Options>,
        state: Arc<SessionState>,
        shutdown: CancellationToken,
        callback: Option<ResultCallback>,
        root_hostname: String,
        deadline: Option<Instant>,
        worker_id: usize,
    ) {
        debug!("worker {} started", worker_id);
        loop {
            if shutdown.is_cancelled() {
                break;
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                debug!("worker {} hit the crawl deadline", worker_id);
                break;
            }

            // in_flight is bumped under the frontier lock so an idle
            // worker never sees empty-and-nothing-running while a sibling
            // is between popping and enqueueing children.
            let next = {
                let mut frontier = state.frontier.lock().await;
                let next = frontier.pop_front();
                if next.is_some() {
                    state.in_flight.fetch_add(1, Ordering::SeqCst);
                } else if state.in_flight.load(Ordering::SeqCst) == 0 {
                    break;
                }
                next
            };
            let Some(request) = next else {
                tokio::time::sleep(Duration::from_millis(20)).await;
                continue;
            };

            tokio::select! {
                _ = shutdown.cancelled() => {
                    state.in_flight.fetch_sub(1, Ordering::SeqCst);
                    break;
                }
                outcome = Self::process_request(
                    &client,
                    &options,
                    &callback,
                    &state,
                    &root_hostname,
                    &request,
                ) => {
                    if let Err(err) = outcome {
                        warn!("crawl error for {}: {}", request.url, err);
                    }
                    state.in_flight.fetch_sub(1, Ordering::SeqCst);
                }
            }

            if options.delay > 0 {
                tokio::time::sleep(Duration::from_secs(options.delay)).await;
            }
        }
        debug!("worker {} finished", worker_id);
    }

    /// Fetches one request, records its result, and enqueues in-scope,
    /// unseen children within the depth bound.
    async fn process_request(
        client: &Client,
        options: &Options,
        callback: &Option<ResultCallback>,
        state: &SessionState,
        root_hostname: &str,
        request: &Request,
    ) -> Result<()> {
        let (result, response) = Self::visit(client, options, request).await?;
        if let Some(callback) = callback {
            callback(result.clone());
        }
        state.results.lock().await.push(result);

        for child in parser::parse_response(&response, options.scrape_js_responses) {
            if child.depth > options.max_depth {
                continue;
            }
            if !Self::in_scope(&child.url, root_hostname) {
                continue;
            }
            let mut visited = state.visited.lock().await;
            if visited.insert(child.dedup_key()) {
                state.frontier.lock().await.push_back(child);
            }
        }
        Ok(())
    }

    /// Dispatches a request and shapes the reply into a result record and
    /// a navigation response. The response depth is the request depth
    /// plus one; this is the only place depth accounting happens.
    async fn visit(
        client: &Client,
        options: &Options,
        request: &Request,
    ) -> Result<(CrawlResult, Response)> {
        let url =
            Url::parse(&request.url).map_err(|_| CrawlError::InvalidUrl(request.url.clone()))?;
        debug!("fetching {}", request.request_url());

        let started = Instant::now();
        let reply = Self::send_with_retries(client, options, request, &url).await?;
        let response_time = started.elapsed();

        let status_code = reply.status().as_u16();
        let content_type = reply
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let mut final_url = reply.url().clone();
        final_url.set_fragment(None);

        let bytes = reply.bytes().await?;
        let read = bytes.len().min(options.max_response_size);
        let body = String::from_utf8_lossy(&bytes[..read]).into_owned();

        let mut result = CrawlResult::from_request(request);
        result.status_code = status_code;
        result.content_type = content_type.clone();
        result.content_length = Some(bytes.len() as u64);
        result.response_time = response_time;

        let response = Response {
            url: final_url,
            root_hostname: request.root_hostname.clone(),
            depth: request.depth + 1,
            status_code,
            content_type,
            body,
        };
        Ok((result, response))
    }

    async fn send_with_retries(
        client: &Client,
        options: &Options,
        request: &Request,
        url: &Url,
    ) -> Result<reqwest::Response> {
        let mut attempt = 0;
        loop {
            let mut builder = match request.method {
                Method::Get => client.get(url.clone()),
                Method::Post => client.post(url.clone()).body(request.body.clone()),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match builder.send().await {
                Ok(reply) => return Ok(reply),
                Err(err) if attempt < options.retries => {
                    attempt += 1;
                    debug!(
                        "retrying {} ({}/{}): {}",
                        request.url, attempt, options.retries, err
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Children stay on the root hostname or one of its subdomains.
    fn in_scope(url: &str, root_hostname: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        match parsed.host_str() {
            Some(host) => host == root_hostname || host.ends_with(&format!(".{root_hostname}")),
            None => false,
        }
    }

    fn build_custom_headers(custom_headers: &[String]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for header in custom_headers {
            let (name, value) = header
                .split_once(':')
                .ok_or_else(|| CrawlError::InvalidHeader(header.clone()))?;
            let name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|_| CrawlError::InvalidHeader(header.clone()))?;
            let value = HeaderValue::from_str(value.trim())
                .map_err(|_| CrawlError::InvalidHeader(header.clone()))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
