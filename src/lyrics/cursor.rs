// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song/line cursor with wraparound navigation.

use super::Library;

/// Position of the displayed line: (song index, line index), both zero-based.
///
/// Only meaningful relative to a non-empty [`Library`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    /// Index of the current song
    pub song: usize,
    /// Index of the current line within the song
    pub line: usize,
}

impl Cursor {
    /// First line of the first song
    pub const START: Cursor = Cursor { song: 0, line: 0 };

    /// Create a cursor
    pub fn new(song: usize, line: usize) -> Self {
        Self { song, line }
    }

    /// Whether the cursor points at an existing line
    pub fn is_valid(&self, library: &Library) -> bool {
        self.line < library.song_len(self.song)
    }

    /// Advance by one line.
    ///
    /// Crossing the end of a song moves to the first line of the next song;
    /// passing the last song wraps to the first. No-op on an empty library.
    pub fn next(self, library: &Library) -> Cursor {
        if library.is_empty() {
            return self;
        }

        let line = self.line + 1;
        if line < library.song_len(self.song) {
            return Cursor::new(self.song, line);
        }

        let song = self.song + 1;
        if song >= library.len() {
            Cursor::START
        } else {
            Cursor::new(song, 0)
        }
    }

    /// Step back by one line.
    ///
    /// Before the first line of a song, moves to the last line of the
    /// previous song, wrapping from the first song to the last. No-op on an
    /// empty library.
    pub fn previous(self, library: &Library) -> Cursor {
        if library.is_empty() {
            return self;
        }

        if self.line > 0 {
            return Cursor::new(self.song, self.line - 1);
        }

        let song = if self.song == 0 {
            library.len() - 1
        } else {
            (self.song - 1).min(library.len() - 1)
        };
        Cursor::new(song, library.song_len(song).saturating_sub(1))
    }

    /// Flat index of the line across the whole library (0-based)
    pub fn position(&self, library: &Library) -> usize {
        let before: usize = library
            .songs()
            .iter()
            .take(self.song)
            .map(|song| song.len())
            .sum();
        before + self.line
    }
}
