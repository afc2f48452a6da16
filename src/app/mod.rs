//! Core application logic for nico_fetcher
//!
//! Contains the manifest catalog, the request signer, the distribution HTTP
//! client, and the per-category batch fetcher.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nico_fetcher::app::{BatchFetcher, OpendataClient, SignedParams};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = SignedParams::new(&[("sig".to_string(), "abc".to_string())]);
//! let client = OpendataClient::new(params)?;
//!
//! let count = BatchFetcher::new(&client)
//!     .download("/distribution/tags/list.txt", Path::new("./out/common/tag_list"), true)
//!     .await?;
//! println!("Processed {} file(s)", count);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod fetcher;
pub mod signer;

// Re-export main public API
pub use catalog::{flatten, flattened_catalog, select, CatalogEntries, CatalogNode, CATALOG};
pub use client::{ClientConfig, OpendataClient};
pub use fetcher::{parse_manifest, BatchFetcher, FetchEvent, FileAction};
pub use signer::SignedParams;
