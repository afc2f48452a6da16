//! HTTP client for the dataset distribution
//!
//! The client owns the origin URL, the signed query string, and the
//! rate-limited HTTP handler. Every remote path the catalog or a manifest
//! names is resolved against the origin with the signed query appended.
//!
//! The module is organized into:
//! - `config`: client configuration and reqwest client building
//! - `http`: rate-limited GET with bounded retry

use std::num::NonZeroU32;

use url::Url;

use crate::app::signer::SignedParams;
use crate::errors::{ConfigError, DownloadError, DownloadResult, Result};

pub mod config;
pub mod http;

pub use config::ClientConfig;

use http::HttpHandler;

/// Client for the open dataset distribution
#[derive(Debug)]
pub struct OpendataClient {
    http: HttpHandler,
    origin: Url,
    params: SignedParams,
}

impl OpendataClient {
    /// Creates a client with the default configuration
    pub fn new(params: SignedParams) -> Result<Self> {
        Self::with_config(ClientConfig::default(), params)
    }

    /// Creates a client with a custom configuration
    ///
    /// # Errors
    ///
    /// Fails when the configured origin is not a valid URL, when the rate
    /// limit is zero, or when the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig, params: SignedParams) -> Result<Self> {
        let origin = Url::parse(&config.origin).map_err(|e| DownloadError::InvalidUrl {
            url: config.origin.clone(),
            error: e.to_string(),
        })?;

        let rate_limit =
            NonZeroU32::new(config.rate_limit_rps).ok_or_else(|| ConfigError::InvalidValue {
                field: "client.rate_limit_rps".to_string(),
                value: "0".to_string(),
                reason: "rate limit must be at least 1 request per second".to_string(),
            })?;

        let client = config.build_http_client()?;
        let http = HttpHandler::new(client, rate_limit);

        tracing::debug!("Created distribution client for {}", origin);

        Ok(Self {
            http,
            origin,
            params,
        })
    }

    /// Resolve a remote path against the origin, appending the signed query
    pub fn url_for(&self, path: &str) -> DownloadResult<Url> {
        let mut url = self
            .origin
            .join(path)
            .map_err(|e| DownloadError::InvalidUrl {
                url: format!("{}{}", self.origin, path),
                error: e.to_string(),
            })?;

        if !self.params.is_empty() {
            url.set_query(Some(self.params.as_str()));
        }

        Ok(url)
    }

    /// Fetch a remote path as UTF-8 text
    pub async fn get_text(&self, path: &str) -> DownloadResult<String> {
        let url = self.url_for(path)?;
        let response = self.http.get(&url).await?;
        let bytes = response.bytes().await?;

        String::from_utf8(bytes.to_vec()).map_err(|_| DownloadError::NotText {
            url: url.to_string(),
        })
    }

    /// Fetch a remote path as raw bytes
    pub async fn get_bytes(&self, path: &str) -> DownloadResult<Vec<u8>> {
        let url = self.url_for(path)?;
        let response = self.http.get(&url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// The distribution origin this client talks to
    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed(raw: &[(&str, &str)]) -> SignedParams {
        let pairs: Vec<(String, String)> = raw
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SignedParams::new(&pairs)
    }

    #[test]
    fn test_url_for_appends_signed_query() {
        let client = OpendataClient::new(signed(&[("sig", "abc")])).unwrap();
        let url = client.url_for("/distribution/tags/list.txt").unwrap();

        assert_eq!(
            url.as_str(),
            "https://nico-opendata.jp/distribution/tags/list.txt?sig=abc"
        );
    }

    #[test]
    fn test_url_for_without_params_has_no_query() {
        let client = OpendataClient::new(SignedParams::empty()).unwrap();
        let url = client.url_for("/distribution/tags/list.txt").unwrap();

        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let config = ClientConfig {
            origin: "not a url".to_string(),
            ..Default::default()
        };

        assert!(OpendataClient::with_config(config, SignedParams::empty()).is_err());
    }

    #[test]
    fn test_zero_rate_limit_is_rejected() {
        let config = ClientConfig {
            rate_limit_rps: 0,
            ..Default::default()
        };

        let result = OpendataClient::with_config(config, SignedParams::empty());
        assert!(result.is_err());
    }

    #[test]
    fn test_origin_accessor() {
        let client = OpendataClient::new(SignedParams::empty()).unwrap();
        assert_eq!(client.origin().host_str(), Some("nico-opendata.jp"));
    }
}
