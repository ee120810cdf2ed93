use crate::CLAP_STYLING;
use clap::{ArgMatches, Command, arg};
use skitter_core::options::Options;

pub fn command_argument_builder() -> Command {
    Command::new("skitter")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("skitter")
        .styles(CLAP_STYLING)
        .about("Skitter is a fast crawler focused on mapping the endpoints of web applications.")
        .arg(
            arg!(-u --url <URL> "Target URL to crawl, repeatable")
                .required(false)
                .action(clap::ArgAction::Append)
                .conflicts_with("list"),
        )
        .arg(
            arg!(-l --list <PATH> "Path to a newline-delimited file of URLs to crawl")
                .required(false)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-d --depth <DEPTH> "Maximum depth to crawl")
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            arg!(--"crawl-duration" <SECONDS> "Maximum duration to crawl each target for, 0 for unbounded")
                .required(false)
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            arg!(--timeout <SECONDS> "Time to wait for each request")
                .required(false)
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(--retries <NUM> "Number of times to retry a failed request")
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(arg!(--proxy <URL> "http/socks5 proxy to use").required(false))
        .arg(
            arg!(-H --header <HEADER> "Custom header/cookie to include in every request, repeatable")
                .required(false)
                .action(clap::ArgAction::Append),
        )
        .arg(
            arg!(-c --concurrency <NUM> "Number of concurrent fetchers per target")
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(-p --parallelism <NUM> "Number of targets to process concurrently")
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(--delay <SECONDS> "Delay between requests on each fetcher")
                .required(false)
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            arg!(--"no-js" "Disable endpoint extraction from javascript responses")
                .required(false)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"max-response-size" <BYTES> "Maximum response body size to read")
                .required(false)
                .value_parser(clap::value_parser!(usize))
                .default_value("2097152"),
        )
        .arg(arg!(-q --quiet "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --verbose "Display verbose output").required(false))
}

/// Maps parsed flags onto crawl options. Seed URLs come from `--url`
/// here; `--list` files are merged in by the caller.
pub fn options_from_matches(matches: &ArgMatches) -> Options {
    Options {
        urls: matches
            .get_many::<String>("url")
            .map(|urls| urls.cloned().collect())
            .unwrap_or_default(),
        max_depth: *matches.get_one::<usize>("depth").unwrap(),
        crawl_duration: *matches.get_one::<u64>("crawl-duration").unwrap(),
        timeout: *matches.get_one::<u64>("timeout").unwrap(),
        retries: *matches.get_one::<usize>("retries").unwrap(),
        proxy: matches.get_one::<String>("proxy").cloned(),
        custom_headers: matches
            .get_many::<String>("header")
            .map(|headers| headers.cloned().collect())
            .unwrap_or_default(),
        concurrency: *matches.get_one::<usize>("concurrency").unwrap(),
        parallelism: *matches.get_one::<usize>("parallelism").unwrap(),
        delay: *matches.get_one::<u64>("delay").unwrap(),
        scrape_js_responses: !matches.get_flag("no-js"),
        max_response_size: *matches.get_one::<usize>("max-response-size").unwrap(),
    }
}
