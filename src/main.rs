//! nico_fetcher CLI application
//!
//! Command-line interface for downloading the Niconico open dataset
//! distribution, with concurrent fetches, archive extraction, and progress
//! reporting.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use nico_fetcher::cli::{handle_auth, handle_download, handle_targets, Cli, Commands};
use nico_fetcher::config::AppConfig;
use nico_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration once; handlers share it
    let config = AppConfig::load(cli.global.config.as_deref())?;

    // Initialize logging based on verbosity and configuration
    init_logging(&cli, &config);

    info!("nico_fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    // Execute the appropriate command
    match cli.command {
        Commands::Download(args) => {
            info!("Executing download command");
            handle_download(&cli.global, &config, args).await
        }
        Commands::Targets => handle_targets(),
        Commands::Auth(args) => handle_auth(&cli.global, &args),
    }
}

/// Initialize logging from the CLI verbosity flags, falling back to the
/// configured level when no flag is given
fn init_logging(cli: &Cli, config: &AppConfig) {
    let has_flag = cli.global.quiet || cli.global.verbose || cli.global.very_verbose;
    let level = if has_flag {
        cli.log_level().to_string().to_lowercase()
    } else {
        config.logging.level.clone()
    };

    // The level was validated when the configuration loaded
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("nico_fetcher={}", level).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();
}
