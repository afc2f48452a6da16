//! Progress display for download operations
//!
//! Consumes the fetcher's progress events and renders one line per completed
//! file, with an indicatif bar on top when stdout is a terminal. In quiet
//! mode events are drained silently so the fetcher never blocks on an
//! unread channel.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::app::{FetchEvent, FileAction};

/// Event-driven progress renderer for one category
#[derive(Debug)]
pub struct ProgressDisplay {
    bar: Option<ProgressBar>,
    enabled: bool,
    quiet: bool,
}

impl ProgressDisplay {
    /// Create a display; the bar is enabled only on a terminal and outside
    /// quiet mode
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: None,
            enabled: !quiet && atty::is(atty::Stream::Stdout),
            quiet,
        }
    }

    /// Render one fetcher event
    pub fn handle_event(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::ManifestLoaded { file_count } => {
                if self.enabled && file_count > 0 {
                    let bar = ProgressBar::new(file_count as u64);
                    bar.set_style(
                        ProgressStyle::default_bar()
                            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                            .unwrap()
                            .progress_chars("=>-"),
                    );
                    self.bar = Some(bar);
                }
            }
            FetchEvent::FileCompleted {
                remote_path,
                action,
            } => {
                let line = completion_line(&remote_path, &action);
                match &self.bar {
                    Some(bar) => {
                        bar.println(&line);
                        bar.inc(1);
                    }
                    None if !self.quiet => println!("{}", line),
                    None => {}
                }
            }
        }
    }

    /// Clear the bar once the category is done
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Progress line for one completed file
fn completion_line(remote_path: &str, action: &FileAction) -> String {
    match action {
        FileAction::Extracted { entries } => {
            format!("Downloaded: {} (extracted {} entries)", remote_path, entries)
        }
        FileAction::Written { .. } => format!("Downloaded: {}", remote_path),
    }
}

/// Drain fetcher events on a background task until the channel closes
pub fn spawn_display(mut receiver: UnboundedReceiver<FetchEvent>, quiet: bool) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut display = ProgressDisplay::new(quiet);
        while let Some(event) = receiver.recv().await {
            display.handle_event(event);
        }
        display.finish();
    })
}
