// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The lyrics source component.
//!
//! [`LyricsSource`] is what a host instantiates and drives: it is created
//! from settings, updated when the settings change, asked to render and
//! for its size, and receives three hotkeys. Drawing is delegated to a
//! [`Renderer`] the source owns for its whole lifetime.

pub mod projection;
pub mod properties;

pub use projection::{
    project, shadow_distance, Alignment, FontSettings, HorizontalAlign, TextSettings, TextStyle,
    VerticalAlign,
};
pub use properties::{Properties, Property, PropertyKind};

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::SourceSettings;
use crate::error::{LyricsError, Result};
use crate::lyrics::{load_library, Cursor, Library, Song};

/// Host identifier of the source type
pub const SOURCE_ID: &str = "lyrics_source";
/// Display name of the source type
pub const SOURCE_NAME: &str = "Lyrics";

/// Natural size used when there is no background image
pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

pub const HOTKEY_NEXT: &str = "lyrics.next";
pub const HOTKEY_PREVIOUS: &str = "lyrics.prev";
pub const HOTKEY_TOGGLE: &str = "lyrics.toggle";

/// Navigation commands of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Show the next line
    Next,
    /// Show the previous line
    Previous,
    /// Show or hide the text
    ToggleVisible,
}

/// A hotkey the source registers with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub id: &'static str,
    pub description: &'static str,
    pub command: Command,
}

/// All hotkeys, in registration order
pub static HOTKEYS: [Hotkey; 3] = [
    Hotkey {
        id: HOTKEY_NEXT,
        description: "Next Lyric",
        command: Command::Next,
    },
    Hotkey {
        id: HOTKEY_PREVIOUS,
        description: "Previous Lyric",
        command: Command::Previous,
    },
    Hotkey {
        id: HOTKEY_TOGGLE,
        description: "Show/Hide Lyrics",
        command: Command::ToggleVisible,
    },
];

impl Command {
    /// Hotkey bound to this command
    pub fn hotkey(&self) -> &'static Hotkey {
        match self {
            Command::Next => &HOTKEYS[0],
            Command::Previous => &HOTKEYS[1],
            Command::ToggleVisible => &HOTKEYS[2],
        }
    }
}

/// A loaded background image; only its natural size matters to the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Loads background images
pub trait BackgroundLoader: Send {
    /// Open an image and report its natural size
    fn load(&self, path: &Path) -> Result<Background>;
}

/// Background loader reading image headers with the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageBackgroundLoader;

impl BackgroundLoader for ImageBackgroundLoader {
    fn load(&self, path: &Path) -> Result<Background> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| LyricsError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Background {
            path: path.to_path_buf(),
            width,
            height,
        })
    }
}

/// Text renderer owned by the source.
///
/// The source only ever pushes complete settings records; the renderer
/// keeps whatever state it needs to draw them.
pub trait Renderer: Send {
    /// Surface the host renders into
    type Target;

    /// Apply a new settings record
    fn update(&mut self, settings: &TextSettings);

    /// Draw the background image under the text
    fn draw_background(&mut self, _target: &mut Self::Target, _background: &Background) {}

    /// Draw the text
    fn draw_text(&mut self, target: &mut Self::Target);
}

/// A lyrics source instance
pub struct LyricsSource<R: Renderer, B: BackgroundLoader = ImageBackgroundLoader> {
    renderer: R,
    background_loader: B,
    background_file: Option<PathBuf>,
    background: Option<Background>,
    style: TextStyle,
    library: Library,
    cursor: Cursor,
    visible: bool,
}

impl<R: Renderer> LyricsSource<R> {
    /// Create a source reading backgrounds with the `image` crate
    pub fn new(settings: &SourceSettings, renderer: R) -> Self {
        Self::create(settings, renderer, ImageBackgroundLoader)
    }
}

impl<R: Renderer, B: BackgroundLoader> LyricsSource<R, B> {
    /// Create a source and apply its initial settings
    pub fn create(settings: &SourceSettings, renderer: R, background_loader: B) -> Self {
        let mut source = Self {
            renderer,
            background_loader,
            background_file: None,
            background: None,
            style: TextStyle::default(),
            library: Library::new(),
            cursor: Cursor::START,
            visible: true,
        };
        source.update(settings);
        source
    }

    /// Display name of the source type
    pub fn name() -> &'static str {
        SOURCE_NAME
    }

    /// Default settings
    pub fn defaults() -> SourceSettings {
        SourceSettings::default()
    }

    /// Property sheet for the given settings
    pub fn properties(settings: &SourceSettings) -> Properties {
        Properties::for_source(settings.use_folder)
    }

    /// Hotkeys to register with the host
    pub fn hotkeys() -> &'static [Hotkey] {
        &HOTKEYS
    }

    /// Apply new settings.
    ///
    /// The library is always rebuilt and the cursor returns to the first
    /// line; the visibility flag is kept.
    pub fn update(&mut self, settings: &SourceSettings) {
        self.update_background(settings.background_path());
        self.style = TextStyle::from_settings(settings);

        self.library = load_library(&settings.library_source());
        self.cursor = Cursor::START;

        self.push_settings();
    }

    /// Reload the library from the same settings source, e.g. after a
    /// lyrics file changed on disk
    pub fn reload(&mut self, settings: &SourceSettings) {
        info!("Reloading lyrics");
        self.update(settings);
    }

    fn update_background(&mut self, path: Option<&Path>) {
        if self.background_file.as_deref() == path {
            return;
        }

        self.background = None;
        self.background_file = path.map(Path::to_path_buf);

        if let Some(path) = path {
            match self.background_loader.load(path) {
                Ok(background) => {
                    debug!(
                        ?path,
                        width = background.width,
                        height = background.height,
                        "Loaded background"
                    );
                    self.background = Some(background);
                }
                Err(e) => warn!(?path, error = %e, "Background image unavailable"),
            }
        }
    }

    /// Run a navigation command
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::ToggleVisible => self.toggle_visible(),
        }
    }

    /// Show the next line
    pub fn next(&mut self) {
        if self.library.is_empty() {
            return;
        }
        self.cursor = self.cursor.next(&self.library);
        debug!(song = self.cursor.song, line = self.cursor.line, "Next lyric");
        self.push_settings();
    }

    /// Show the previous line
    pub fn previous(&mut self) {
        if self.library.is_empty() {
            return;
        }
        self.cursor = self.cursor.previous(&self.library);
        debug!(song = self.cursor.song, line = self.cursor.line, "Previous lyric");
        self.push_settings();
    }

    /// Show or hide the text
    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
        debug!(visible = self.visible, "Toggled lyrics");
        self.push_settings();
    }

    /// Host hotkey callback. Only presses trigger; returns whether the id
    /// belongs to this source.
    pub fn trigger_hotkey(&mut self, id: &str, pressed: bool) -> bool {
        let Some(hotkey) = HOTKEYS.iter().find(|h| h.id == id) else {
            return false;
        };
        if pressed {
            self.execute(hotkey.command);
        }
        true
    }

    /// Draw the background, then the text
    pub fn render(&mut self, target: &mut R::Target) {
        if let Some(background) = &self.background {
            self.renderer.draw_background(target, background);
        }
        self.renderer.draw_text(target);
    }

    /// Natural width
    pub fn width(&self) -> u32 {
        self.background.as_ref().map_or(DEFAULT_WIDTH, |b| b.width)
    }

    /// Natural height
    pub fn height(&self) -> u32 {
        self.background.as_ref().map_or(DEFAULT_HEIGHT, |b| b.height)
    }

    /// Current renderer settings
    pub fn projection(&self) -> TextSettings {
        project(&self.library, self.cursor, self.visible, &self.style)
    }

    fn push_settings(&mut self) {
        let settings = self.projection();
        self.renderer.update(&settings);
    }

    /// Text currently on screen
    pub fn current_text(&self) -> &str {
        projection::displayed_text(&self.library, self.cursor, self.visible)
    }

    /// Song under the cursor
    pub fn current_song(&self) -> Option<&Song> {
        self.library.get(self.cursor.song)
    }

    /// Name of the song under the cursor
    pub fn current_song_name(&self) -> Option<&str> {
        self.current_song().map(Song::name)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
