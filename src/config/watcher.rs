// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for hot-reload of the source settings.
//!
//! Watches the settings file and the folders holding lyrics files. A
//! change to the settings file produces a freshly parsed configuration;
//! a change to any lyrics file asks the owner to reload the library.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::debug;

use super::SourceSettings;
use crate::lyrics::LibrarySource;

/// Events emitted by the config watcher
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    /// Settings file was modified and successfully reloaded
    Reloaded(Box<SourceSettings>),
    /// Settings file was modified but failed to parse
    Error(String),
    /// A lyrics file was created, modified or deleted
    LyricsChanged(PathBuf),
}

/// Settings watcher with debouncing and validation
pub struct ConfigWatcher {
    watcher: RecommendedWatcher,
    event_receiver: Receiver<ConfigEvent>,
    settings_path: PathBuf,
    lyrics_dirs: Vec<PathBuf>,
}

impl ConfigWatcher {
    /// Create a watcher for a settings file
    ///
    /// The directory holding the file is watched (editors often replace
    /// files rather than write them in place).
    ///
    /// # Arguments
    /// * `settings_path` - Settings file to watch
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 500)
    pub fn new<P: AsRef<Path>>(settings_path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let settings_path = settings_path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(500));

        let settings_name = settings_path
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| anyhow!("Settings path has no file name: {:?}", settings_path))?;

        let (event_tx, event_rx): (Sender<ConfigEvent>, Receiver<ConfigEvent>) = mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        let settings_dir = watch_dir_of(&settings_path);
        watcher
            .watch(&settings_dir, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", settings_dir, e))?;

        let reload_path = settings_path.clone();
        std::thread::spawn(move || {
            debounce_loop(notify_rx, event_tx, settings_name, reload_path, debounce_duration)
        });

        Ok(Self {
            watcher,
            event_receiver: event_rx,
            settings_path,
            lyrics_dirs: Vec::new(),
        })
    }

    /// Watch the folders the given settings load lyrics from, replacing
    /// any previously watched lyrics folders
    pub fn watch_lyrics(&mut self, settings: &SourceSettings) -> Result<()> {
        for dir in self.lyrics_dirs.drain(..) {
            let _ = self.watcher.unwatch(&dir);
        }

        let mut dirs: Vec<PathBuf> = match settings.library_source() {
            LibrarySource::Folder(dir) if !dir.as_os_str().is_empty() => vec![dir],
            LibrarySource::Folder(_) => Vec::new(),
            LibrarySource::Files(files) => files.iter().map(|f| watch_dir_of(f)).collect(),
        };
        dirs.sort();
        dirs.dedup();

        let settings_dir = watch_dir_of(&self.settings_path);
        for dir in dirs {
            if dir == settings_dir || !dir.is_dir() {
                continue;
            }
            self.watcher
                .watch(&dir, RecursiveMode::NonRecursive)
                .map_err(|e| anyhow!("Failed to watch path {:?}: {}", dir, e))?;
            self.lyrics_dirs.push(dir);
        }

        Ok(())
    }

    /// Try to receive the next config event (non-blocking)
    pub fn try_recv(&self) -> Option<ConfigEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending config events
    pub fn recv_all(&self) -> Vec<ConfigEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Get the settings file being watched
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Lyrics folders currently watched (besides the settings folder)
    pub fn lyrics_dirs(&self) -> &[PathBuf] {
        &self.lyrics_dirs
    }
}

fn watch_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn debounce_loop(
    notify_rx: Receiver<Event>,
    event_tx: Sender<ConfigEvent>,
    settings_name: OsString,
    settings_path: PathBuf,
    debounce_duration: Duration,
) {
    let mut last_event_time: Option<Instant> = None;
    let mut pending_paths: Vec<PathBuf> = Vec::new();

    loop {
        match notify_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(event) => {
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    for path in event.paths {
                        if !pending_paths.contains(&path) {
                            pending_paths.push(path);
                        }
                    }
                    last_event_time = Some(Instant::now());
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                let Some(last_time) = last_event_time else {
                    continue;
                };
                if last_time.elapsed() < debounce_duration {
                    continue;
                }

                let mut settings_changed = false;
                for path in pending_paths.drain(..) {
                    if path.file_name() == Some(settings_name.as_os_str()) {
                        settings_changed = true;
                    } else {
                        let _ = event_tx.send(ConfigEvent::LyricsChanged(path));
                    }
                }

                if settings_changed {
                    let event = match SourceSettings::load(&settings_path) {
                        Ok(settings) => ConfigEvent::Reloaded(Box::new(settings)),
                        Err(e) => ConfigEvent::Error(format!("{:#}", e)),
                    };
                    debug!(path = ?settings_path, "Settings file changed");
                    let _ = event_tx.send(event);
                }
                last_event_time = None;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                // Watcher was dropped, exit thread
                break;
            }
        }
    }
}
