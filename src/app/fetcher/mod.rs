//! Per-category batch download orchestration
//!
//! Given one catalog entry's manifest path and an output directory, the
//! fetcher retrieves the manifest, fetches every listed file with a bounded
//! number of requests in flight, and places each file sequentially in
//! manifest order. Placement means extraction into the output directory for
//! zip archives (when extraction is enabled) or a verbatim write under the
//! file's base name otherwise.
//!
//! Keeping placement sequential while fetches overlap preserves the manifest
//! ordering of progress events and guarantees a single writer per
//! destination path.

use std::path::Path;

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::client::OpendataClient;
use crate::constants::{files, workers};
use crate::errors::{AppError, DownloadError, Result};

pub mod extract;

/// Progress notification emitted while a category downloads
#[derive(Debug, Clone)]
pub enum FetchEvent {
    /// Manifest fetched and parsed; the category will process this many files
    ManifestLoaded { file_count: usize },
    /// One remote file fully fetched and placed
    FileCompleted {
        remote_path: String,
        action: FileAction,
    },
}

/// How a completed file was placed on disk
#[derive(Debug, Clone)]
pub enum FileAction {
    /// Archive unpacked into the output directory
    Extracted { entries: usize },
    /// File written verbatim under its base name
    Written { bytes: u64 },
}

/// Fetched file content awaiting placement
enum Payload {
    Archive(Vec<u8>),
    Text(String),
}

/// Batch downloader for one category at a time
#[derive(Debug)]
pub struct BatchFetcher<'a> {
    client: &'a OpendataClient,
    workers: usize,
    limit: Option<usize>,
    events: Option<UnboundedSender<FetchEvent>>,
}

impl<'a> BatchFetcher<'a> {
    /// Creates a fetcher with the default fan-out
    pub fn new(client: &'a OpendataClient) -> Self {
        Self {
            client,
            workers: workers::DEFAULT_WORKER_COUNT,
            limit: None,
            events: None,
        }
    }

    /// Set the number of concurrent file fetches (minimum 1)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Cap the number of files processed per category
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Attach a progress event channel
    pub fn with_events(mut self, sender: UnboundedSender<FetchEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Download one category: fetch its manifest, then every listed file
    ///
    /// Returns the number of files processed. A manifest with no entries is a
    /// successful no-op. The first fetch, write, or extraction failure aborts
    /// the remaining files of this category.
    pub async fn download(
        &self,
        manifest_path: &str,
        output_dir: &Path,
        extract_archives: bool,
    ) -> Result<usize> {
        tokio::fs::create_dir_all(output_dir).await?;
        let output_dir = tokio::fs::canonicalize(output_dir).await?;

        let body = self.client.get_text(manifest_path).await?;
        let mut file_list = parse_manifest(&body);
        if let Some(limit) = self.limit {
            file_list.truncate(limit);
        }

        tracing::info!(
            "Manifest {} lists {} file(s)",
            manifest_path,
            file_list.len()
        );
        self.emit(FetchEvent::ManifestLoaded {
            file_count: file_list.len(),
        });

        if file_list.is_empty() {
            return Ok(0);
        }

        // Fetches overlap up to the worker budget; `buffered` yields results
        // in manifest order so placement below stays sequential and ordered.
        // Archives are always fetched as raw bytes so that disabling
        // extraction still writes them byte-exact.
        let mut completed = stream::iter(file_list.into_iter().map(|path| {
            let client = self.client;
            async move {
                let payload = if is_archive(&path) {
                    Payload::Archive(client.get_bytes(&path).await?)
                } else {
                    Payload::Text(client.get_text(&path).await?)
                };
                Ok::<(String, Payload), DownloadError>((path, payload))
            }
        }))
        .buffered(self.workers);

        let mut count = 0;
        while let Some(fetched) = completed.next().await {
            let (path, payload) = fetched?;
            let action = self
                .place(&path, payload, &output_dir, extract_archives)
                .await?;
            count += 1;
            self.emit(FetchEvent::FileCompleted {
                remote_path: path,
                action,
            });
        }

        Ok(count)
    }

    /// Place one fetched payload under the output directory
    async fn place(
        &self,
        remote_path: &str,
        payload: Payload,
        output_dir: &Path,
        extract_archives: bool,
    ) -> Result<FileAction> {
        match payload {
            Payload::Archive(data) if extract_archives => {
                let dest = output_dir.to_path_buf();
                let entries = tokio::task::spawn_blocking(move || {
                    extract::extract_archive(data, &dest)
                })
                .await
                .map_err(|e| AppError::generic(format!("Extraction task failed: {}", e)))??;

                tracing::debug!("Extracted {} into {}", remote_path, output_dir.display());
                Ok(FileAction::Extracted { entries })
            }
            Payload::Archive(data) => {
                let dest = output_dir.join(file_name(remote_path));
                let bytes = data.len() as u64;
                tokio::fs::write(&dest, data)
                    .await
                    .map_err(DownloadError::Io)?;

                tracing::debug!("Wrote {} ({} bytes)", dest.display(), bytes);
                Ok(FileAction::Written { bytes })
            }
            Payload::Text(text) => {
                let dest = output_dir.join(file_name(remote_path));
                let bytes = text.len() as u64;
                tokio::fs::write(&dest, text)
                    .await
                    .map_err(DownloadError::Io)?;

                tracing::debug!("Wrote {} ({} bytes)", dest.display(), bytes);
                Ok(FileAction::Written { bytes })
            }
        }
    }

    fn emit(&self, event: FetchEvent) {
        if let Some(sender) = &self.events {
            // A dropped receiver only means nobody is displaying progress
            let _ = sender.send(event);
        }
    }
}

/// Parse a manifest body into its ordered list of remote file paths
///
/// Lines are split on `\n` with a trailing `\r` stripped; blank lines are
/// dropped.
pub fn parse_manifest(body: &str) -> Vec<String> {
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Base name of a remote file path (last `/` segment)
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of a remote file path, if its base name has one
pub fn extension(path: &str) -> Option<&str> {
    file_name(path).rsplit_once('.').map(|(_, ext)| ext)
}

/// Whether the remote path names an extractable archive
///
/// The match is exact: the distribution names its archives with a lowercase
/// `zip` extension.
pub fn is_archive(path: &str) -> bool {
    extension(path) == Some(files::ARCHIVE_EXTENSION)
}
