use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use anyhow::{Result, Context};
use crate::diff::Side;
use crate::events::AppEvent;

/// Watches the two compared files and reports which side changed.
///
/// The parent directories are watched rather than the files themselves so
/// that editors which save by replacing the file are still noticed.
pub struct InputWatcher {
    _watcher: RecommendedWatcher,
    event_rx: Receiver<AppEvent>,
}

#[derive(Debug, Clone)]
struct WatchedInputs {
    left: PathBuf,
    right: PathBuf,
}

impl WatchedInputs {
    fn side_of(&self, path: &Path) -> Option<Side> {
        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if resolved == self.left {
            Some(Side::Left)
        } else if resolved == self.right {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl InputWatcher {
    pub fn new<P: AsRef<Path>>(left: P, right: P) -> Result<Self> {
        let inputs = WatchedInputs {
            left: canonical(left.as_ref())?,
            right: canonical(right.as_ref())?,
        };

        let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
        let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

        // Create the notify watcher
        let mut watcher = notify::recommended_watcher(tx)
            .context("Failed to create file system watcher")?;

        let mut dirs: Vec<&Path> = [&inputs.left, &inputs.right]
            .into_iter()
            .filter_map(|path| path.parent())
            .collect();
        dirs.dedup();
        for dir in dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to start watching {}", dir.display()))?;
        }

        // Spawn background thread to process notify events
        thread::spawn(move || {
            while let Ok(result) = rx.recv() {
                match result {
                    Ok(event) => {
                        if !matches!(
                            event.kind,
                            notify::EventKind::Create(_) | notify::EventKind::Modify(_)
                        ) {
                            continue;
                        }

                        for path in &event.paths {
                            let Some(side) = inputs.side_of(path) else {
                                continue;
                            };
                            tracing::debug!(?side, path = %path.display(), "input changed");
                            let change = AppEvent::InputChanged { side, path: path.clone() };
                            if event_tx.send(change).is_err() {
                                return; // Receiver dropped, exit thread
                            }
                        }
                    }
                    Err(err) => {
                        tracing::error!("File watcher error: {}", err);
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_rx,
        })
    }

    pub fn try_recv(&self) -> Result<AppEvent, std::sync::mpsc::TryRecvError> {
        self.event_rx.try_recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, std::sync::mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))
}
