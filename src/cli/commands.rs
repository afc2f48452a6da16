//! Command handlers for the nico_fetcher CLI
//!
//! Coordinates between CLI arguments and the core application: target
//! selection, per-category downloads with failure isolation, and the
//! end-of-run summary.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::app::{
    catalog, BatchFetcher, CatalogEntries, OpendataClient, SignedParams,
};
use crate::auth::{get_params_status, load_params, params_file_path};
use crate::cli::progress::spawn_display;
use crate::cli::{AuthAction, AuthArgs, DownloadArgs, GlobalArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Outcome of one category download
type CategoryOutcome = (String, Result<usize>);

/// Handle the download command
///
/// Resolves the selected catalog targets, then downloads each category in
/// selection order. Categories are isolated: a failing category is recorded
/// and the remaining ones still run. Any failure makes the command return an
/// error after the summary, so the process exits non-zero.
pub async fn handle_download(
    global: &GlobalArgs,
    config: &AppConfig,
    args: DownloadArgs,
) -> Result<()> {
    let start = Instant::now();

    args.validate().map_err(AppError::generic)?;

    let params_path = params_file_path(global.params.as_deref());
    let params = if params_path.exists() {
        load_params(&params_path)?
    } else {
        warn!(
            "No parameter file at {} - requests will be unsigned and may be rejected",
            params_path.display()
        );
        if !global.quiet {
            println!(
                "Warning: no parameter file at {}. Requests go out unsigned.",
                params_path.display()
            );
        }
        Vec::new()
    };

    let client = OpendataClient::with_config(config.client_config(), SignedParams::new(&params))?;

    let selected = select_targets(&args)?;
    let workers = args.workers.unwrap_or(config.fetcher.workers);
    let extract = args.extract();

    info!(
        "Downloading {} target(s) with {} worker(s), extract={}",
        selected.len(),
        workers,
        extract
    );

    let mut outcomes: Vec<CategoryOutcome> = Vec::new();
    for (key, manifest_path) in selected {
        let output_dir = args.output.join(&key);
        if !global.quiet {
            println!("==> {}", key);
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        let display = spawn_display(receiver, global.quiet);

        let result = BatchFetcher::new(&client)
            .with_workers(workers)
            .with_limit(args.limit)
            .with_events(sender)
            .download(&manifest_path, &output_dir, extract)
            .await;

        // The fetcher (and its event sender) is gone; let the display drain
        let _ = display.await;

        match &result {
            Ok(count) => info!("Target '{}' complete: {} file(s)", key, count),
            Err(e) => error!("Target '{}' failed ({}): {}", key, e.category(), e),
        }
        outcomes.push((key, result));
    }

    print_summary(&outcomes, start.elapsed(), global.quiet);

    let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        return Err(AppError::generic(format!(
            "{} of {} target(s) failed",
            failed,
            outcomes.len()
        )));
    }
    Ok(())
}

/// Resolve the download selection against the flattened catalog
///
/// `--all` wins over `--target`. Unknown target names are reported with a
/// warning and skipped; a selection that matches nothing is an error.
fn select_targets(args: &DownloadArgs) -> Result<CatalogEntries> {
    let entries = catalog::flattened_catalog();

    if args.all {
        return Ok(entries);
    }

    for name in &args.target {
        if !entries.iter().any(|(key, _)| key == name) {
            warn!("Unknown target '{}' - run 'nico_fetcher targets' to list names", name);
        }
    }

    let selected = catalog::select(&entries, &args.target);
    if selected.is_empty() {
        return Err(AppError::generic(
            "None of the requested targets exist. Run 'nico_fetcher targets' to list names",
        ));
    }
    Ok(selected)
}

/// Print the end-of-run summary
fn print_summary(outcomes: &[CategoryOutcome], elapsed: Duration, quiet: bool) {
    if quiet {
        return;
    }

    let succeeded = outcomes.iter().filter(|(_, r)| r.is_ok()).count();
    let failed = outcomes.len() - succeeded;

    println!();
    println!(
        "Summary: {} target(s) succeeded, {} failed in {:.1}s",
        succeeded,
        failed,
        elapsed.as_secs_f64()
    );
    for (key, result) in outcomes {
        match result {
            Ok(count) => println!("  {:<24} {} file(s)", key, count),
            Err(e) => println!("  {:<24} FAILED: {}", key, e),
        }
    }
}

/// Handle the targets command: list every flattened catalog entry
pub fn handle_targets() -> Result<()> {
    println!("Available targets:");
    for (key, manifest_path) in catalog::flattened_catalog() {
        println!("  {:<24} {}", key, manifest_path);
    }
    Ok(())
}

/// Handle the auth command
pub fn handle_auth(global: &GlobalArgs, args: &AuthArgs) -> Result<()> {
    match args.action {
        AuthAction::Status => {
            let path = params_file_path(global.params.as_deref());
            let status = get_params_status(&path);
            println!("{}", status.status_message());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    fn base_args() -> DownloadArgs {
        DownloadArgs {
            all: false,
            target: Vec::new(),
            output: PathBuf::from("."),
            unzip: false,
            no_unzip: false,
            workers: None,
            limit: None,
        }
    }

    #[test]
    fn test_select_targets_all_takes_everything() {
        let args = DownloadArgs {
            all: true,
            target: vec!["seiga/meta_data".to_string()],
            ..base_args()
        };

        let selected = select_targets(&args).unwrap();
        assert_eq!(selected.len(), catalog::flattened_catalog().len());
    }

    #[test]
    fn test_select_targets_by_name() {
        let args = DownloadArgs {
            target: vec!["seiga/meta_data".to_string(), "common/tag_list".to_string()],
            ..base_args()
        };

        let selected = select_targets(&args).unwrap();
        let keys: Vec<&str> = selected.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["common/tag_list", "seiga/meta_data"]);
    }

    #[test]
    fn test_select_targets_skips_unknown_names() {
        let args = DownloadArgs {
            target: vec!["common/tag_list".to_string(), "bogus/entry".to_string()],
            ..base_args()
        };

        let selected = select_targets(&args).unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn test_select_targets_with_only_unknown_names_fails() {
        let args = DownloadArgs {
            target: vec!["bogus/entry".to_string()],
            ..base_args()
        };

        assert!(select_targets(&args).is_err());
    }

    #[test]
    fn test_handle_targets_lists_catalog() {
        assert!(handle_targets().is_ok());
    }
}
