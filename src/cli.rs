// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is also our configuration layer: every option can be passed as a
// flag or through a LINK_HARVESTER_* environment variable, and the parsed
// result is turned into the plain config values the rest of the program
// uses.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Option<T>: For settings that are off unless given
// =============================================================================

use crate::crawl::{CrawlConfig, DEFAULT_BATCH_SIZE};
use crate::output::DEFAULT_OUTPUT_FILE;
use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version = "0.1.0",
    about = "Recursively crawl a website and record every link found",
    long_about = "link-harvester fetches the seed page, collects every <a>, <link> and <script> \
                  reference on it, records the ones it hasn't seen before, and crawls those in \
                  turn until no new references turn up."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    ///
    /// This is a positional argument (required). Without it the program
    /// exits before crawling anything.
    pub seed_url: String,

    /// File that receives every discovered link, one per line
    ///
    /// Any existing content is wiped when the crawl starts.
    #[arg(long, short, env = "LINK_HARVESTER_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// How many links found on one page are crawled at the same time
    ///
    /// The next group only starts once the previous one (and everything it
    /// discovered) is completely done.
    #[arg(
        long,
        short,
        env = "LINK_HARVESTER_BATCH_SIZE",
        default_value_t = DEFAULT_BATCH_SIZE,
        value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize)
    )]
    pub batch_size: usize,

    /// Per-request timeout in seconds (0 = no timeout)
    #[arg(long, env = "LINK_HARVESTER_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Cap on requests in flight across the whole crawl (default: no cap)
    #[arg(
        long,
        env = "LINK_HARVESTER_MAX_CONCURRENCY",
        value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize)
    )]
    pub max_concurrency: Option<usize>,

    /// Print the final summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            batch_size: self.batch_size,
            max_concurrency: self.max_concurrency,
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::{CommandFactory, FromArgMatches};

    // Parses with every LINK_HARVESTER_* lookup switched off, so variables
    // set in the surrounding shell can't leak into the results
    fn parse<const N: usize>(args: [&str; N]) -> Result<Cli, clap::Error> {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(args)?;
        Cli::from_arg_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let cli = parse(["link-harvester", "https://example.com"]).unwrap();
        assert_eq!(cli.seed_url, "https://example.com");
        assert_eq!(cli.output, PathBuf::from("urls.txt"));
        assert_eq!(cli.crawl_config(), CrawlConfig::default());
        assert_eq!(cli.fetch_timeout(), Some(Duration::from_secs(30)));
        assert!(!cli.json);
    }

    #[test]
    fn test_missing_seed_is_rejected() {
        let err = parse(["link-harvester"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("SEED_URL"));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let result = parse(["link-harvester", "https://example.com", "--batch-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_max_concurrency_is_rejected() {
        let result = parse(["link-harvester", "https://example.com", "--max-concurrency", "0"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_env_lookup_can_be_disabled() {
        let command = Cli::command().mut_args(|arg| arg.env(None::<&'static str>));
        assert!(command.get_arguments().all(|arg| arg.get_env().is_none()));
        assert!(Cli::command()
            .get_arguments()
            .any(|arg| arg.get_env() == Some(std::ffi::OsStr::new("LINK_HARVESTER_BATCH_SIZE"))));
    }

    #[test]
    fn test_overrides() {
        let cli = parse([
            "link-harvester",
            "https://example.com",
            "--output",
            "out.txt",
            "--batch-size",
            "2",
            "--timeout",
            "0",
            "--max-concurrency",
            "8",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert_eq!(
            cli.crawl_config(),
            CrawlConfig {
                batch_size: 2,
                max_concurrency: Some(8),
            }
        );
        assert_eq!(cli.fetch_timeout(), None);
        assert!(cli.json);
    }
}
