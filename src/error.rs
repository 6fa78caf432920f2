// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the lyrics source.
//!
//! These errors never reach the host: the source absorbs them at its
//! boundary and falls back to "no content".

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading lyrics or background content
#[derive(Debug, Error)]
pub enum LyricsError {
    /// A lyrics file or folder could not be read
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A background image could not be opened or its header decoded
    #[error("failed to load background image {path:?}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl LyricsError {
    /// Path the failed operation was working on
    pub fn path(&self) -> &std::path::Path {
        match self {
            LyricsError::Io { path, .. } | LyricsError::Image { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, LyricsError>;
