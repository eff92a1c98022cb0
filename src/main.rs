// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, level from RUST_LOG, default "info")
// 2. Parse command-line arguments using clap (a missing seed URL stops us
//    right here, before anything is crawled)
// 3. Create the output file and the HTTP fetcher
// 4. Crawl until the seed's whole link tree is done, or Ctrl-C
// 5. Print a summary and exit with the proper code
//
// Exit codes:
//   0   = crawl finished
//   1   = fatal error (output file couldn't be written, client setup failed)
//   2   = bad command line (clap)
//   130 = interrupted
// =============================================================================

mod cli;
mod crawl;
mod error;
mod output;
mod page;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use crawl::{CrawlSummary, Crawler};
use output::FileSink;
use page::HttpFetcher;
use std::future::Future;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only carries the summary
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let sink = FileSink::create(&cli.output).await?;
    info!(seed = %cli.seed_url, output = %sink.path().display(), "starting crawl");

    let fetcher = HttpFetcher::new(cli.fetch_timeout()).context("could not set up the HTTP client")?;
    let crawler = Crawler::new(fetcher, sink, cli.crawl_config());

    tokio::select! {
        result = crawler.run(&cli.seed_url) => {
            let summary = result?;
            print_summary(&summary, cli.json)?;
            Ok(0)
        }
        _ = until_interrupted(tokio::signal::ctrl_c()) => {
            warn!("interrupted, links found so far are in {}", cli.output.display());
            print_summary(&crawler.summary(), cli.json)?;
            Ok(EXIT_INTERRUPTED)
        }
    }
}

// Resolves when the user presses Ctrl-C. If the handler can't be installed
// the crawl just runs to completion instead of being reported as interrupted.
async fn until_interrupted<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "cannot listen for Ctrl-C, the crawl can only end by finishing");
        std::future::pending::<()>().await;
    }
}

fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   🔗 Links discovered: {}", summary.links_discovered);
        println!("   📄 Pages fetched:    {}", summary.pages_fetched);
        println!("   ❌ Fetch failures:   {}", summary.fetch_failures);
        println!("   ⏭️  Unfetchable:      {}", summary.unfetchable);
        println!("   📝 Records written:  {}", summary.records_written);
        println!("   ⏱️  Elapsed:          {:.2?}", summary.elapsed);
    }
    Ok(())
}
