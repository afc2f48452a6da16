//! Command-line argument parsing for nico_fetcher
//!
//! Defines the CLI structure using clap derive macros: target selection,
//! output placement, extraction toggles, and parameter status inspection.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::constants::workers;

/// nico_fetcher - Download the Niconico open dataset distribution
#[derive(Parser, Debug)]
#[command(
    name = "nico_fetcher",
    version,
    about = "Download dataset files from the nico-opendata distribution",
    long_about = "Downloads the manifests of the nico-opendata distribution and fetches every file
they list, optionally extracting zip archives into per-category directories."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request parameter file path (default: ./.env)
    #[arg(long, global = true, value_name = "FILE")]
    pub params: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download selected catalog targets
    Download(DownloadArgs),

    /// List the available catalog targets
    Targets,

    /// Inspect request parameter status
    Auth(AuthArgs),
}

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Download every catalog target
    #[arg(short, long)]
    pub all: bool,

    /// Specific targets to download (group/subkind form)
    #[arg(short, long, value_name = "NAME", num_args = 1..)]
    pub target: Vec<String>,

    /// Base output directory; each target lands in <OUTPUT>/<group>/<subkind>/
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output: PathBuf,

    /// Extract zip archives into the target directory (default)
    #[arg(long, visible_alias = "extract", overrides_with = "no_unzip")]
    pub unzip: bool,

    /// Keep zip archives as files instead of extracting them
    #[arg(long = "no-unzip", visible_alias = "no-extract", overrides_with = "unzip")]
    pub no_unzip: bool,

    /// Number of concurrent file fetches per target
    #[arg(short = 'w', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Maximum number of files to download per target (for testing)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for parameter inspection
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Parameter inspection actions
#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Show request parameter status
    Status,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl DownloadArgs {
    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if !self.all && self.target.is_empty() {
            return Err(
                "Nothing selected. Use --all or --target <NAME>... (see 'targets')".to_string(),
            );
        }

        if self.workers == Some(0) {
            return Err("Number of workers must be greater than 0".to_string());
        }

        if let Some(w) = self.workers {
            if w > workers::MAX_WORKER_COUNT {
                return Err(format!(
                    "Number of workers must be at most {}",
                    workers::MAX_WORKER_COUNT
                ));
            }
        }

        Ok(())
    }

    /// Whether zip archives should be extracted
    ///
    /// Extraction is on by default; `--no-unzip` turns it off, and the flag
    /// given last wins when both appear.
    pub fn extract(&self) -> bool {
        !self.no_unzip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn download_args(cli: Cli) -> DownloadArgs {
        match cli.command {
            Commands::Download(args) => args,
            other => panic!("expected download command, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_requires_selection() {
        let args = download_args(parse(&["nico_fetcher", "download", "--all"]));
        assert!(args.validate().is_ok());

        let args = download_args(parse(&["nico_fetcher", "download"]));
        assert!(args.validate().is_err());

        let args = download_args(parse(&[
            "nico_fetcher",
            "download",
            "--target",
            "seiga/meta_data",
        ]));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_workers() {
        let args = download_args(parse(&[
            "nico_fetcher",
            "download",
            "--all",
            "--workers",
            "0",
        ]));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_extraction_defaults_on() {
        let args = download_args(parse(&["nico_fetcher", "download", "--all"]));
        assert!(args.extract());
    }

    #[test]
    fn test_no_unzip_disables_extraction() {
        let args = download_args(parse(&["nico_fetcher", "download", "--all", "--no-unzip"]));
        assert!(!args.extract());

        let args = download_args(parse(&["nico_fetcher", "download", "--all", "--no-extract"]));
        assert!(!args.extract());
    }

    #[test]
    fn test_last_extraction_flag_wins() {
        let args = download_args(parse(&[
            "nico_fetcher",
            "download",
            "--all",
            "--no-unzip",
            "--unzip",
        ]));
        assert!(args.extract());
    }

    #[test]
    fn test_multiple_targets() {
        let args = download_args(parse(&[
            "nico_fetcher",
            "download",
            "--target",
            "seiga/meta_data",
            "common/tag_list",
        ]));
        assert_eq!(args.target.len(), 2);
    }

    #[test]
    fn test_log_level() {
        let quiet = parse(&["nico_fetcher", "--quiet", "targets"]);
        assert_eq!(quiet.log_level(), tracing::Level::ERROR);

        let verbose = parse(&["nico_fetcher", "--verbose", "targets"]);
        assert_eq!(verbose.log_level(), tracing::Level::INFO);

        let default = parse(&["nico_fetcher", "targets"]);
        assert_eq!(default.log_level(), tracing::Level::WARN);
    }
}
