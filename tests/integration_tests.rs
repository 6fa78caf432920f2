// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for the lyrics source
//!
//! These tests drive the public API the way a host would: settings file in,
//! hotkeys and updates, renderer settings out.

use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};

use lyrics_source::config::SourceSettings;
use lyrics_source::lyrics::{load_library, Cursor};
use lyrics_source::source::{
    properties::keys, Alignment, ImageBackgroundLoader, LyricsSource, Renderer, TextSettings,
    HOTKEY_NEXT, HOTKEY_PREVIOUS, HOTKEY_TOGGLE,
};

/// Renderer that records every settings record and draw call
#[derive(Default)]
struct RecordingRenderer {
    updates: Vec<TextSettings>,
}

impl RecordingRenderer {
    fn last(&self) -> &TextSettings {
        self.updates.last().expect("renderer never updated")
    }
}

impl Renderer for RecordingRenderer {
    type Target = Vec<String>;

    fn update(&mut self, settings: &TextSettings) {
        self.updates.push(settings.clone());
    }

    fn draw_text(&mut self, target: &mut Vec<String>) {
        let text = self.last().text.clone();
        target.push(text);
    }
}

fn write_song(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

/// Folder with three songs and a settings file listing them in order
fn worship_set() -> (TempDir, SourceSettings) {
    let dir = tempdir().unwrap();
    let songs = dir.path().join("songs");
    fs::create_dir(&songs).unwrap();

    write_song(&songs, "01 Opening.txt", "Come thou fount\nOf every blessing\n");
    write_song(&songs, "02 Middle.txt", "\n  Be thou my vision  \n\n");
    write_song(&songs, "03 Closing.txt", "Amazing grace\nHow sweet\nThe sound\n");
    write_song(&songs, "notes.md", "not lyrics");

    let settings_path = dir.path().join("source.yaml");
    fs::write(
        &settings_path,
        "lyrics_folder: songs
lyrics_files:
  - songs/01 Opening.txt
  - songs/02 Middle.txt
  - songs/03 Closing.txt
h_align: 0
v_align: 0
shadow: true
shadow_offset_x: 3
shadow_offset_y: 4
",
    )
    .unwrap();

    let settings = SourceSettings::load(&settings_path).unwrap();
    (dir, settings)
}

type Source = LyricsSource<RecordingRenderer, ImageBackgroundLoader>;

fn source(settings: &SourceSettings) -> Source {
    Source::new(settings, RecordingRenderer::default())
}

#[test]
fn test_settings_file_to_first_line() {
    let (_dir, settings) = worship_set();
    let source = source(&settings);

    let library = source.library();
    let names: Vec<&str> = library.songs().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["01 Opening", "02 Middle", "03 Closing"]);
    assert_eq!(library.total_lines(), 6);

    let pushed = source.renderer().last();
    assert_eq!(pushed.text, "Come thou fount");
    assert_eq!(pushed.align, Alignment::TopLeft);
    assert!(pushed.drop_shadow);
    assert_eq!(pushed.shadow_distance, 5);
    assert!(pushed.wrap);
    assert!(pushed.extents);
}

#[test]
fn test_full_cycle_through_hotkeys() {
    let (_dir, settings) = worship_set();
    let mut source = source(&settings);

    let mut seen = vec![source.current_text().to_string()];
    for _ in 0..6 {
        assert!(source.trigger_hotkey(HOTKEY_NEXT, true));
        seen.push(source.current_text().to_string());
    }

    assert_eq!(
        seen,
        vec![
            "Come thou fount",
            "Of every blessing",
            "Be thou my vision",
            "Amazing grace",
            "How sweet",
            "The sound",
            "Come thou fount",
        ]
    );
    assert_eq!(source.cursor(), Cursor::START);
}

#[test]
fn test_previous_from_start_wraps_to_last_line() {
    let (_dir, settings) = worship_set();
    let mut source = source(&settings);

    source.trigger_hotkey(HOTKEY_PREVIOUS, true);
    assert_eq!(source.cursor(), Cursor::new(2, 2));
    assert_eq!(source.renderer().last().text, "The sound");

    source.trigger_hotkey(HOTKEY_NEXT, true);
    assert_eq!(source.cursor(), Cursor::START);
}

#[test]
fn test_release_is_ignored() {
    let (_dir, settings) = worship_set();
    let mut source = source(&settings);
    let updates = source.renderer().updates.len();

    assert!(source.trigger_hotkey(HOTKEY_NEXT, false));
    assert_eq!(source.cursor(), Cursor::START);
    assert_eq!(source.renderer().updates.len(), updates);
    assert!(!source.trigger_hotkey("obs.unrelated", true));
}

#[test]
fn test_toggle_blanks_and_restores() {
    let (_dir, settings) = worship_set();
    let mut source = source(&settings);
    source.next();

    source.trigger_hotkey(HOTKEY_TOGGLE, true);
    assert_eq!(source.renderer().last().text, "");

    // Navigation while hidden moves the cursor but keeps the text blank
    source.next();
    assert_eq!(source.renderer().last().text, "");

    source.trigger_hotkey(HOTKEY_TOGGLE, true);
    assert_eq!(source.renderer().last().text, "Be thou my vision");
}

#[test]
fn test_update_resets_cursor_and_keeps_visibility() {
    let (dir, mut settings) = worship_set();
    let mut source = source(&settings);
    source.next();
    source.next();
    source.toggle_visible();

    write_song(&dir.path().join("songs"), "01 Opening.txt", "Prelude line\n");
    settings.font_size = 72;
    source.update(&settings);

    assert_eq!(source.cursor(), Cursor::START);
    assert_eq!(source.library().total_lines(), 5);
    assert!(!source.is_visible());

    let pushed = source.renderer().last();
    assert_eq!(pushed.font.size, 72);
    assert_eq!(pushed.text, "");

    source.toggle_visible();
    assert_eq!(source.renderer().last().text, "Prelude line");
}

#[test]
fn test_folder_mode_loads_only_lyrics_files() {
    let (_dir, mut settings) = worship_set();
    settings.use_folder = true;

    let library = load_library(&settings.library_source());
    let names: Vec<&str> = library.songs().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["01 Opening", "02 Middle", "03 Closing"]);
    assert_eq!(library.total_lines(), 6);
}

#[test]
fn test_folder_mode_plays_songs_in_name_order() {
    let dir = tempdir().unwrap();
    for name in ["03 Closing", "01 Opening", "04 Send", "02 Middle", "05 End"] {
        write_song(dir.path(), &format!("{}.txt", name), name);
    }

    let mut settings = SourceSettings::default();
    settings.select_folder(dir.path());
    let mut source = source(&settings);

    let mut shown = vec![source.current_text().to_string()];
    for _ in 0..4 {
        source.next();
        shown.push(source.current_text().to_string());
    }
    assert_eq!(
        shown,
        vec!["01 Opening", "02 Middle", "03 Closing", "04 Send", "05 End"]
    );
}

#[test]
fn test_explicit_file_list_keeps_order() {
    let (dir, mut settings) = worship_set();
    let songs = dir.path().join("songs");

    assert!(settings.select_files([
        songs.join("03 Closing.txt"),
        songs.join("missing.txt"),
        songs.join("01 Opening.txt"),
    ]));
    assert!(!settings.use_folder);

    let library = load_library(&settings.library_source());
    let names: Vec<&str> = library.songs().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["03 Closing", "01 Opening"]);
}

#[test]
fn test_empty_library_renders_nothing() {
    let dir = tempdir().unwrap();
    let mut settings = SourceSettings::default();
    settings.select_folder(dir.path());

    let mut source = source(&settings);
    source.next();
    source.previous();
    assert_eq!(source.cursor(), Cursor::START);
    assert_eq!(source.renderer().last().text, "");

    let mut frame = Vec::new();
    source.render(&mut frame);
    assert_eq!(frame, vec![String::new()]);
    assert_eq!((source.width(), source.height()), (1920, 1080));
}

#[test]
fn test_settings_round_trip_through_toml() {
    let (dir, settings) = worship_set();
    let toml_path = dir.path().join("source.toml");
    settings.save(&toml_path).unwrap();

    let loaded = SourceSettings::load(&toml_path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_property_sheet_tracks_folder_mode() {
    let (_dir, mut settings) = worship_set();

    let sheet = Source::properties(&settings);
    assert!(!sheet.get(keys::FOLDER_BUTTON).unwrap().visible);
    assert!(sheet.get(keys::FILES_BUTTON).unwrap().visible);

    settings.use_folder = true;
    let sheet = Source::properties(&settings);
    assert!(sheet.get(keys::FOLDER_BUTTON).unwrap().visible);
    assert!(!sheet.get(keys::FILES_BUTTON).unwrap().visible);
}
