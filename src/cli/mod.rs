//! Command-line interface components
//!
//! CLI-specific code for nico_fetcher: argument parsing, command handlers,
//! and progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{AuthAction, AuthArgs, Cli, Commands, DownloadArgs, GlobalArgs};
pub use commands::{handle_auth, handle_download, handle_targets};
pub use progress::{spawn_display, ProgressDisplay};
