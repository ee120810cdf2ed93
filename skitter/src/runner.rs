use anyhow::{Context, bail};
use skitter_core::options::Options;
use skitter_crawler::crawler::Crawler;
use skitter_crawler::error::{CrawlError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use url::Url;

/// Fans seed inputs out to bounded concurrent crawl sessions.
pub struct Runner {
    options: Options,
    crawler: Arc<Crawler>,
}

impl Runner {
    pub fn new(options: Options, crawler: Crawler) -> Self {
        Runner {
            options,
            crawler: Arc::new(crawler),
        }
    }

    /// Runs one crawl session per input, at most `parallelism` at a time.
    /// A failing session is logged and does not abort the batch; the only
    /// error surfaced to the caller is an empty input set.
    pub async fn execute_crawling(&self) -> Result<()> {
        let inputs = self.parse_inputs();
        if inputs.is_empty() {
            return Err(CrawlError::NoInput);
        }

        let semaphore = Arc::new(Semaphore::new(self.options.parallelism.max(1)));
        let mut sessions = JoinSet::new();
        for input in inputs {
            if self.crawler.is_cancelled() {
                break;
            }
            // Blocks dispatch, not running sessions, once the budget is
            // used; the permit rides into the task and releases on drop
            // whatever the session's outcome.
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let crawler = self.crawler.clone();
            sessions.spawn(async move {
                let _permit = permit;
                info!("starting crawl of {}", input);
                if let Err(err) = crawler.crawl(&input).await {
                    warn!("could not crawl {}: {}", input, err);
                }
            });
        }
        while let Some(joined) = sessions.join_next().await {
            if let Err(err) = joined {
                warn!("crawl session aborted: {}", err);
            }
        }
        Ok(())
    }

    /// Releases the shared crawler; in-flight sessions stop pulling work.
    pub fn close(&self) {
        self.crawler.close();
    }

    /// Trims and dedups the configured inputs, preserving first-seen order.
    fn parse_inputs(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.options
            .urls
            .iter()
            .map(|input| input.trim().to_string())
            .filter(|input| !input.is_empty())
            .filter(|input| seen.insert(input.clone()))
            .collect()
    }
}

/// Resolves the seed list from either the URL flags or a list file.
pub fn load_urls_from_source(
    urls: Vec<String>,
    list: Option<&PathBuf>,
) -> anyhow::Result<Vec<String>> {
    match list {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            load_urls_from_file(Path::new(&expanded))
        }
        None => Ok(urls),
    }
}

/// Loads and parses URLs from a newline-delimited file.
pub fn load_urls_from_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read url list {}", path.display()))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_url_line)
        .collect();

    if urls.is_empty() {
        bail!("no valid URLs found in {}", path.display());
    }
    Ok(urls)
}

/// Parses a single line as a URL, trying an http:// prefix for bare hosts.
pub fn parse_url_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    warn!("skipping invalid URL {:?}", line);
    None
}
