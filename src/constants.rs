//! Application constants for nico_fetcher
//!
//! Centralizes the constants used throughout the application, organized by
//! functional domain.

use std::time::Duration;

/// Distribution origin and catalog paths
pub mod origin {
    /// Base URL of the open dataset distribution
    pub const BASE_URL: &str = "https://nico-opendata.jp";
}

/// Request parameter file handling
pub mod params {
    /// Default parameter file name, looked up in the working directory
    pub const DEFAULT_FILE_NAME: &str = ".env";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// User agent sent with every request
    pub const USER_AGENT: &str = "nico-fetcher/0.1.0 (Dataset Research Tool)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Rate limiting and retry configuration
pub mod limits {
    /// Default rate limit for distribution requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;

    /// Maximum retry attempts for failed requests
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 1000;
}

/// File placement constants
pub mod files {
    /// Extension that marks a remote file as an extractable archive
    pub const ARCHIVE_EXTENSION: &str = "zip";
}

/// Worker and concurrency configuration
pub mod workers {
    /// Default number of concurrent file fetches per category
    pub const DEFAULT_WORKER_COUNT: usize = 4;

    /// Maximum recommended concurrent fetches
    pub const MAX_WORKER_COUNT: usize = 16;
}

/// Logging constants
pub mod logging {
    /// Default log level when no verbosity flag is given
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use files::ARCHIVE_EXTENSION;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use limits::{DEFAULT_RATE_LIMIT_RPS, MAX_RETRIES, RETRY_BASE_DELAY_MS};
pub use origin::BASE_URL;
pub use params::DEFAULT_FILE_NAME as PARAMS_FILE_NAME;
pub use workers::DEFAULT_WORKER_COUNT;
