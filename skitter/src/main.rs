use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use skitter::commands;
use skitter::runner::{Runner, load_urls_from_source};
use skitter_core::print_banner;
use skitter_crawler::crawler::{Crawler, ResultCallback};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let matches = commands::command_argument_builder().get_matches();
    let quiet = matches.get_flag("quiet");
    let verbose = matches.get_flag("verbose");

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if !quiet {
        print_banner();
    }

    let mut options = commands::options_from_matches(&matches);
    options.urls = match load_urls_from_source(
        options.urls.clone(),
        matches.get_one::<PathBuf>("list"),
    ) {
        Ok(urls) => urls,
        Err(err) => {
            error!("could not load inputs: {:#}", err);
            std::process::exit(2);
        }
    };

    // Discovered endpoints print through the spinner so the two output
    // streams do not clobber each other.
    let spinner = Arc::new(if quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("starting crawl...");
        spinner
    });

    let found = Arc::new(AtomicUsize::new(0));
    let callback: ResultCallback = if quiet {
        let found = found.clone();
        Arc::new(move |result| {
            found.fetch_add(1, Ordering::Relaxed);
            println!("{}", result.url);
        })
    } else {
        let spinner = spinner.clone();
        let found = found.clone();
        Arc::new(move |result| {
            let count = found.fetch_add(1, Ordering::Relaxed) + 1;
            spinner.println(result.url);
            spinner.set_message(format!("crawling... {} endpoints found", count));
        })
    };

    let crawler = match Crawler::new(&options) {
        Ok(crawler) => crawler.with_result_callback(callback),
        Err(err) => {
            error!("could not create crawler: {}", err);
            std::process::exit(1);
        }
    };

    let runner = Arc::new(Runner::new(options, crawler));

    // One-shot close handler: release the shared crawler and leave
    // promptly rather than draining in-flight sessions.
    let handle = runner.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl+c pressed, shutting down");
            handle.close();
            std::process::exit(0);
        }
    });

    let started = Instant::now();
    if let Err(err) = runner.execute_crawling().await {
        spinner.finish_and_clear();
        error!("could not execute crawling: {}", err);
        std::process::exit(1);
    }
    spinner.finish_and_clear();

    if !quiet {
        println!(
            "\n{} {} endpoints discovered in {:.1?}",
            "✓".green().bold(),
            found.load(Ordering::Relaxed),
            started.elapsed()
        );
    }
}
