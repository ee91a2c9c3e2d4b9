use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl a link graph file
    Crawl {
        /// Link graph, one `<url> <link>...` line per page
        graph: PathBuf,

        /// URL to start from
        root: String,

        #[arg(short = 'd', long, default_value_t = 2)]
        /// Pages at this depth or deeper are not fetched
        max_depth: usize,

        #[arg(long)]
        /// Follow links outside the root URL
        allow_outside: bool,

        #[arg(long)]
        /// Abort on the first unreachable page
        fail_fast: bool,
    },
    /// Print sampled delays without crawling
    Sample {
        #[arg(short, long, default_value_t = 10)]
        /// Number of delays to draw
        count: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Delays block the thread
    Blocking,
    /// Delays suspend only the waiting page
    Cooperative,
}

/// Recursive crawler that waits a random interval before every page
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'm', long, default_value_t = 1.0)]
    /// Minimum delay between pages, seconds
    pub min_delay: f64,

    #[arg(short = 'M', long, default_value_t = 3.0)]
    /// Maximum delay between pages, seconds
    pub max_delay: f64,

    #[arg(short, long)]
    /// Seed for reproducible delays
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Mode::Cooperative)]
    /// How delays are waited out
    pub mode: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["paced-crawl", "crawl", "site.txt", "https://s/"]);
        assert_eq!((args.min_delay, args.max_delay), (1.0, 3.0));
        assert!(matches!(args.mode, Mode::Cooperative));
        assert!(matches!(
            args.command,
            Commands::Crawl { max_depth: 2, allow_outside: false, fail_fast: false, .. }
        ));
    }

    #[test]
    fn test_global_options() {
        let args = Args::parse_from([
            "paced-crawl", "-m", "0.5", "-M", "0.5", "--seed", "9", "--mode", "blocking", "sample",
        ]);
        assert_eq!(args.seed, Some(9));
        assert!(matches!(args.mode, Mode::Blocking));
        assert!(matches!(args.command, Commands::Sample { count: 10 }));
    }
}
