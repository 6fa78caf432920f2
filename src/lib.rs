// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Lyrics source: steps through song lyrics one line at a time and hands
//! the current line, styled, to a text renderer.
//!
//! - [`lyrics`]: songs, the library loader and the cursor
//! - [`source`]: the source component, renderer settings projection and
//!   property sheet
//! - [`config`]: settings files and hot reload
//! - [`control`] and [`ui`]: the terminal preview host

pub mod config;
pub mod control;
pub mod error;
pub mod lyrics;
pub mod source;
pub mod ui;

pub use config::SourceSettings;
pub use error::{LyricsError, Result};
pub use lyrics::{Cursor, Library, Song};
pub use source::{LyricsSource, Renderer, TextSettings};
