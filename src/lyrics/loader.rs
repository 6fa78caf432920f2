// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Library loading from a lyrics folder or an explicit file list.
//!
//! Loading is forgiving: unreadable files and files without any non-empty
//! line are skipped, never reported to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{Library, Song};
use crate::error::{LyricsError, Result};

/// Extension of lyrics files picked up in folder mode
pub const LYRICS_EXTENSION: &str = "txt";

/// Where the songs of a library come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// Every `.txt` file directly inside a folder, by name ignoring case
    Folder(PathBuf),
    /// An explicit, ordered list of files
    Files(Vec<PathBuf>),
}

impl Default for LibrarySource {
    fn default() -> Self {
        LibrarySource::Files(Vec::new())
    }
}

/// Build a library from its source
pub fn load_library(source: &LibrarySource) -> Library {
    let library = match source {
        LibrarySource::Folder(dir) => load_paths(folder_entries(dir)),
        LibrarySource::Files(files) => load_paths(files),
    };

    info!(
        songs = library.len(),
        lines = library.total_lines(),
        "Loaded lyrics library"
    );
    library
}

/// Load songs from paths in the given order, skipping anything unusable
pub fn load_paths<I, P>(paths: I) -> Library
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut library = Library::new();

    for path in paths {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            continue;
        }

        match read_song(path) {
            Ok(Some(song)) => library.push(song),
            Ok(None) => debug!(?path, "Skipping lyrics file without text"),
            Err(e) => debug!(?path, error = %e, "Skipping unreadable lyrics file"),
        }
    }

    library
}

/// Read one lyrics file.
///
/// Returns `Ok(None)` when the file has no non-empty line. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_song(path: &Path) -> Result<Option<Song>> {
    let bytes = fs::read(path).map_err(|source| LyricsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    Ok(Song::from_text(song_name(path), &text))
}

/// Display name of a lyrics file: its file name up to the first dot
pub fn song_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split_once('.') {
        Some((base, _)) => base.to_string(),
        None => file_name,
    }
}

/// List the lyrics files directly inside a folder, sorted by file name
/// ignoring case.
///
/// Only regular files with a `.txt` extension (any case) are returned. An
/// unreadable folder yields no entries.
pub fn folder_entries(dir: &Path) -> Vec<PathBuf> {
    if dir.as_os_str().is_empty() {
        return Vec::new();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(?dir, error = %e, "Cannot read lyrics folder");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_lyrics_file(path))
        .collect();

    paths.sort_by_cached_key(|path| {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        (name.to_lowercase(), name)
    });
    paths
}

/// Whether a path has the lyrics file extension
pub fn is_lyrics_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(LYRICS_EXTENSION))
        .unwrap_or(false)
}
