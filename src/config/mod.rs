// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration of a lyrics source.
//!
//! [`SourceSettings`] is the record the host hands to the source on every
//! update. Field names are the host's settings keys, so a settings file
//! reads the same as the host's saved scene data. Files are YAML, or TOML
//! when the extension is `.toml`.

pub mod watcher;

pub use watcher::{ConfigEvent, ConfigWatcher};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::lyrics::{loader::is_lyrics_file, LibrarySource};
use crate::source::properties::{FONT_WEIGHT_NORMAL, keys};
use crate::source::projection::{HorizontalAlign, VerticalAlign, DEFAULT_FONT_FACE};

/// Settings of one lyrics source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceSettings {
    /// Background image; absent or empty means no background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_file: Option<PathBuf>,
    /// Load every `.txt` file of `lyrics_folder` instead of `lyrics_files`
    #[serde(default)]
    pub use_folder: bool,
    /// Folder scanned in folder mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics_folder: Option<PathBuf>,
    /// Files loaded, in order, when not in folder mode
    #[serde(default)]
    pub lyrics_files: Vec<PathBuf>,
    /// Horizontal text alignment
    #[serde(default)]
    pub h_align: HorizontalAlign,
    /// Vertical text alignment
    #[serde(default = "default_v_align")]
    pub v_align: VerticalAlign,
    /// Text box width in pixels
    #[serde(default = "default_text_width")]
    pub text_width: i64,
    /// Text box height in pixels
    #[serde(default = "default_text_height")]
    pub text_height: i64,
    /// Font face
    #[serde(default = "default_font_name")]
    pub font_name: String,
    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: i64,
    /// Font weight (400 normal, 700 bold)
    #[serde(default = "default_font_weight")]
    pub font_weight: u32,
    /// Text color, host color format
    #[serde(default = "default_text_color")]
    pub text_color: u32,
    /// Draw an outline around the glyphs
    #[serde(default = "default_outline")]
    pub outline: bool,
    /// Outline thickness
    #[serde(default = "default_outline_size")]
    pub outline_size: i64,
    /// Outline color
    #[serde(default = "default_outline_color")]
    pub outline_color: u32,
    /// Draw a drop shadow
    #[serde(default)]
    pub shadow: bool,
    /// Shadow offset along x
    #[serde(default = "default_shadow_offset")]
    pub shadow_offset_x: i64,
    /// Shadow offset along y
    #[serde(default = "default_shadow_offset")]
    pub shadow_offset_y: i64,
    /// Shadow color
    #[serde(default = "default_shadow_color")]
    pub shadow_color: u32,
}

fn default_v_align() -> VerticalAlign {
    VerticalAlign::Bottom
}
fn default_text_width() -> i64 {
    800
}
fn default_text_height() -> i64 {
    200
}
fn default_font_name() -> String {
    DEFAULT_FONT_FACE.to_string()
}
fn default_font_size() -> i64 {
    48
}
fn default_font_weight() -> u32 {
    FONT_WEIGHT_NORMAL
}
fn default_text_color() -> u32 {
    0xFFFF_FFFF
}
fn default_outline() -> bool {
    true
}
fn default_outline_size() -> i64 {
    2
}
fn default_outline_color() -> u32 {
    0xFF00_0000
}
fn default_shadow_offset() -> i64 {
    4
}
fn default_shadow_color() -> u32 {
    0x8000_0000
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            background_file: None,
            use_folder: false,
            lyrics_folder: None,
            lyrics_files: Vec::new(),
            h_align: HorizontalAlign::Center,
            v_align: default_v_align(),
            text_width: default_text_width(),
            text_height: default_text_height(),
            font_name: default_font_name(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            text_color: default_text_color(),
            outline: default_outline(),
            outline_size: default_outline_size(),
            outline_color: default_outline_color(),
            shadow: false,
            shadow_offset_x: default_shadow_offset(),
            shadow_offset_y: default_shadow_offset(),
            shadow_color: default_shadow_color(),
        }
    }
}

/// On-disk format of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but `.toml` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl SourceSettings {
    /// Load settings from a file.
    ///
    /// Relative paths inside the file are resolved against the file's
    /// directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        let settings = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => Self::from_yaml(&contents),
            ConfigFormat::Toml => Self::from_toml(&contents),
        }
        .with_context(|| format!("Invalid settings file: {:?}", path))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(settings.resolve_relative(base))
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML settings")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML settings")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize settings to TOML")
    }

    /// Save settings to a file, in the format its extension selects
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => self.to_yaml()?,
            ConfigFormat::Toml => self.to_toml()?,
        };
        fs::write(path, text).with_context(|| format!("Failed to write settings file: {:?}", path))
    }

    /// Make relative paths absolute against `base`
    pub fn resolve_relative(mut self, base: &Path) -> Self {
        let resolve = |path: &mut PathBuf| {
            if !path.as_os_str().is_empty() && path.is_relative() {
                *path = base.join(&*path);
            }
        };

        if let Some(path) = self.background_file.as_mut() {
            resolve(path);
        }
        if let Some(path) = self.lyrics_folder.as_mut() {
            resolve(path);
        }
        for path in &mut self.lyrics_files {
            resolve(path);
        }
        self
    }

    /// Background image path, if one is configured
    pub fn background_path(&self) -> Option<&Path> {
        self.background_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Where the library is loaded from, per the folder-mode flag
    pub fn library_source(&self) -> LibrarySource {
        if self.use_folder {
            LibrarySource::Folder(self.lyrics_folder.clone().unwrap_or_default())
        } else {
            LibrarySource::Files(self.lyrics_files.clone())
        }
    }

    /// Whether a change to `path` can change the loaded library: any
    /// `.txt` file, or any file named in the explicit list
    pub fn affects_library(&self, path: &Path) -> bool {
        is_lyrics_file(path) || self.lyrics_files.iter().any(|file| file == path)
    }

    /// Result of the "select folder" dialog: switches to folder mode
    pub fn select_folder(&mut self, dir: impl Into<PathBuf>) {
        self.lyrics_folder = Some(dir.into());
        self.use_folder = true;
    }

    /// Result of the "select files" dialog: switches to file-list mode.
    ///
    /// An empty selection is a cancelled dialog and changes nothing.
    pub fn select_files<I, P>(&mut self, files: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let files: Vec<PathBuf> = files.into_iter().map(Into::into).collect();
        if files.is_empty() {
            return false;
        }
        self.lyrics_files = files;
        self.use_folder = false;
        true
    }

    /// Settings key of every field, in declaration order
    pub fn keys() -> [&'static str; 19] {
        [
            keys::BACKGROUND_FILE,
            keys::USE_FOLDER,
            keys::LYRICS_FOLDER,
            keys::LYRICS_FILES,
            keys::H_ALIGN,
            keys::V_ALIGN,
            keys::TEXT_WIDTH,
            keys::TEXT_HEIGHT,
            keys::FONT_NAME,
            keys::FONT_SIZE,
            keys::FONT_WEIGHT,
            keys::TEXT_COLOR,
            keys::OUTLINE,
            keys::OUTLINE_SIZE,
            keys::OUTLINE_COLOR,
            keys::SHADOW,
            keys::SHADOW_OFFSET_X,
            keys::SHADOW_OFFSET_Y,
            keys::SHADOW_COLOR,
        ]
    }
}
