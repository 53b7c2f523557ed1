use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Creates a watcher for the organisation dataset file and returns a
/// receiver for change events. The watcher must be kept alive for events
/// to be received.
///
/// Editors and atomic writers usually replace the file (write a temp file
/// next to it, then rename) rather than writing in place, so we watch the
/// parent directory and filter to events on files whose name starts with
/// the dataset filename (this also catches swap files like `org.json~`).
pub fn watch_file(path: &str) -> Result<(RecommendedWatcher, Receiver<()>)> {
    let (tx, rx) = mpsc::channel();

    let filename = Path::new(path)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            // Access events (open/close/read) fire from any process that
            // merely reads the file; only content changes matter here.
            if matches!(event.kind, EventKind::Access(_)) {
                return;
            }

            let relevant = event.paths.iter().any(|p| {
                p.file_name()
                    .map(|f| f.to_string_lossy().starts_with(&*filename))
                    .unwrap_or(false)
            });
            if relevant {
                let _ = tx.send(());
            }
        }
    })
    .context("failed to create file watcher")?;

    let path = Path::new(path);
    let watch_path = path.parent().unwrap_or(path);
    watcher
        .watch(watch_path, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", watch_path.display()))?;

    Ok((watcher, rx))
}

/// Waits for a change event with timeout.
/// Returns true if an event was received, false on timeout.
pub fn wait_for_change(rx: &Receiver<()>, timeout: Duration) -> bool {
    rx.recv_timeout(timeout).is_ok()
}

/// Drains any pending events from the receiver.
pub fn drain_events(rx: &Receiver<()>) {
    while rx.try_recv().is_ok() {}
}
