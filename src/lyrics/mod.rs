// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Lyrics data model.
//!
//! A [`Library`] is an ordered list of [`Song`]s, each an ordered list of
//! non-empty text lines. The library is rebuilt in full whenever the source
//! configuration changes; a [`Cursor`] points at the line on screen.

pub mod cursor;
pub mod loader;

pub use cursor::Cursor;
pub use loader::{folder_entries, load_library, load_paths, read_song, LibrarySource};

/// One song: a display name and its non-empty, trimmed lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    name: String,
    lines: Vec<String>,
}

impl Song {
    /// Create a song from raw lines.
    ///
    /// Lines are trimmed and empty ones dropped. Returns `None` when nothing
    /// is left, since a song without lines is never part of a library.
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(Self {
                name: name.into(),
                lines,
            })
        }
    }

    /// Parse a song from the contents of a lyrics file
    pub fn from_text(name: impl Into<String>, text: &str) -> Option<Self> {
        Self::new(name, text.lines())
    }

    /// Song display name (file stem)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All lines of the song
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines (always at least one)
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by index
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

/// Ordered collection of loaded songs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    songs: Vec<Song>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a song
    pub fn push(&mut self, song: Song) {
        self.songs.push(song);
    }

    /// All songs in load order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether no song was loaded
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Get a song by index
    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// Line count of a song, zero when the index is out of range
    pub fn song_len(&self, index: usize) -> usize {
        self.songs.get(index).map_or(0, Song::len)
    }

    /// Sum of all line counts
    pub fn total_lines(&self) -> usize {
        self.songs.iter().map(Song::len).sum()
    }

    /// The line a cursor points at, if the cursor is valid
    pub fn line_at(&self, cursor: Cursor) -> Option<&str> {
        self.songs.get(cursor.song)?.line(cursor.line)
    }
}

impl FromIterator<Song> for Library {
    fn from_iter<T: IntoIterator<Item = Song>>(iter: T) -> Self {
        Self {
            songs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_trims_and_filters() {
        let song = Song::new("a", ["  first ", "", "   ", "second\t"]).unwrap();
        assert_eq!(song.name(), "a");
        assert_eq!(song.lines(), &["first".to_string(), "second".to_string()]);
        assert_eq!(song.len(), 2);
    }

    #[test]
    fn test_empty_song_rejected() {
        assert!(Song::new("empty", ["", "  ", "\t"]).is_none());
        assert!(Song::from_text("empty", "\n\r\n  \n").is_none());
    }

    #[test]
    fn test_song_from_text_line_endings() {
        let song = Song::from_text("crlf", "one\r\ntwo\n\nthree").unwrap();
        assert_eq!(song.lines(), &["one", "two", "three"]);
    }

    #[test]
    fn test_library_lookup() {
        let library: Library = [
            Song::new("a", ["x", "y"]).unwrap(),
            Song::new("b", ["z"]).unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(library.len(), 2);
        assert_eq!(library.total_lines(), 3);
        assert_eq!(library.song_len(0), 2);
        assert_eq!(library.song_len(5), 0);
        assert_eq!(library.line_at(Cursor::new(0, 1)), Some("y"));
        assert_eq!(library.line_at(Cursor::new(1, 0)), Some("z"));
        assert_eq!(library.line_at(Cursor::new(1, 1)), None);
        assert_eq!(library.line_at(Cursor::new(2, 0)), None);
    }
}
