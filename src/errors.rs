//! Error types for nico_fetcher
//!
//! Defines the error types for all components of the application. Errors are
//! designed to be actionable and carry enough context for user feedback.

use std::path::PathBuf;

use thiserror::Error;

/// Request parameter loading errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Parameter file could not be parsed
    #[error("Failed to parse parameter file {path}")]
    ParamsFile {
        path: PathBuf,
        #[source]
        source: dotenv::Error,
    },

    /// I/O error reading the parameter file
    #[error("Failed to read parameter file")]
    Io(#[from] std::io::Error),
}

/// Download and HTTP client errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error: HTTP {status} for {url}")]
    ServerError { status: u16, url: String },

    /// Rate limit exceeded after retries
    #[error("Rate limit exceeded. Server kept responding with HTTP 429")]
    RateLimitExceeded,

    /// Server overloaded after retries
    #[error("Server overloaded. Server kept responding with HTTP 503")]
    ServerOverloaded,

    /// Maximum retries exceeded
    #[error("Maximum retry attempts ({max_retries}) exceeded for {url}")]
    MaxRetriesExceeded { max_retries: u32, url: String },

    /// Invalid URL built from origin and remote path
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Response body was not valid UTF-8 where text was expected
    #[error("Response body for {url} is not valid UTF-8 text")]
    NotText { url: String },

    /// I/O error during file placement
    #[error("File I/O error")]
    Io(#[from] std::io::Error),
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Archive could not be opened or read
    #[error("Failed to read zip archive")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error writing extracted entries
    #[error("Failed to write extracted entry")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Parameter loading error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Extraction error
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("{message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Download(DownloadError::Http(_))
                | AppError::Download(DownloadError::RateLimitExceeded)
                | AppError::Download(DownloadError::ServerOverloaded)
                | AppError::Download(DownloadError::MaxRetriesExceeded { .. })
        )
    }

    /// Get error category for logging and the end-of-run summary
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "params",
            AppError::Download(_) => "download",
            AppError::Extract(_) => "extract",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Parameter loading result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Extraction result type alias
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
