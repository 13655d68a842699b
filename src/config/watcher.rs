//! Route file watching for hot reload.
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by writing a temporary file and renaming it over the original
//! keep triggering reloads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_routes;
use crate::routing::route::Route;

/// Watches a route file and sends a freshly built tree after each valid change.
pub struct ConfigWatcher {
    path: PathBuf,
    routes_tx: mpsc::UnboundedSender<Route<String>>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for rebuilt route trees.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Route<String>>) {
        let (routes_tx, routes_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            routes_tx,
        };
        (watcher, routes_rx)
    }

    /// Start watching. Events arrive on notify's thread; keep the returned
    /// handle alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, routes_tx } = self;
        let dir = watch_dir(&path).to_path_buf();
        let target = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, &target) => reload(&target, &routes_tx),
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Route file watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, dir = ?dir, "Route file watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// True for a create or modify event on the watched file.
fn touches(event: &Event, target: &Path) -> bool {
    let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == target.file_name())
}

fn reload(path: &Path, routes_tx: &mpsc::UnboundedSender<Route<String>>) {
    match load_routes(path) {
        Ok(routes) => {
            tracing::info!(path = ?path, "Route file changed, rebuilt route tree");
            if routes_tx.send(routes).is_err() {
                tracing::debug!("Route receiver dropped, ignoring update");
            }
        }
        // Partial writes land here too; the next event retries
        Err(e) => tracing::warn!(path = ?path, error = %e, "Rejected route file, keeping current routes"),
    }
}
