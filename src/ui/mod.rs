// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal preview for the lyrics source.
//!
//! Provides a ratatui-based terminal interface showing the current song and
//! line, the source output at terminal scale, and the upcoming line.

mod stage;

pub use stage::{obs_color, wrap_words, StageFrame, TerminalRenderer};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::control::{ControlAction, KeyboardController};
use crate::source::{BackgroundLoader, LyricsSource, Renderer};

/// Help overlay entry: shortcut keys and what they do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub keys: String,
    pub description: String,
}

/// Help overlay section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub title: String,
    pub entries: Vec<HelpEntry>,
}

/// UI state of the preview
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Help text visible
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
    /// Help overlay contents
    pub help: Vec<HelpSection>,
}

impl UiState {
    /// Create state with help built from the keyboard bindings
    pub fn with_help(keyboard: &KeyboardController) -> Self {
        Self {
            help: help_sections(keyboard),
            ..Default::default()
        }
    }

    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }
}

/// Group the bindings into help sections, one entry per action
pub fn help_sections(keyboard: &KeyboardController) -> Vec<HelpSection> {
    let grouped = keyboard.bindings_by_category();
    let mut titles: Vec<&String> = grouped.keys().collect();
    // Lyrics before UI
    titles.sort();

    titles
        .into_iter()
        .map(|title| {
            let mut actions: Vec<(ControlAction, &str)> = Vec::new();
            for binding in &grouped[title] {
                if !actions.iter().any(|(action, _)| *action == binding.action) {
                    actions.push((binding.action, binding.description.as_str()));
                }
            }
            actions.sort_by_key(|(action, _)| action_order(*action));

            let entries = actions
                .into_iter()
                .map(|(action, description)| HelpEntry {
                    keys: keyboard.shortcuts_for(action).join("/"),
                    description: description.to_string(),
                })
                .collect();

            HelpSection {
                title: title.clone(),
                entries,
            }
        })
        .collect()
}

fn action_order(action: ControlAction) -> u8 {
    match action {
        ControlAction::NextLine => 0,
        ControlAction::PreviousLine => 1,
        ControlAction::ToggleVisible => 2,
        ControlAction::Reload => 3,
        ControlAction::ToggleHelp => 4,
        ControlAction::Quit => 5,
    }
}

/// Where the source stands, for the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    /// Current song name
    pub song: Option<String>,
    /// Song number (1-indexed)
    pub song_number: usize,
    /// Number of songs
    pub song_count: usize,
    /// Line number within the song (1-indexed)
    pub line_number: usize,
    /// Lines in the current song
    pub song_lines: usize,
    /// Line number across the whole library (1-indexed)
    pub position: usize,
    /// Lines in the whole library
    pub total_lines: usize,
    /// Whether the text is shown
    pub visible: bool,
    /// Line that `Next` would show
    pub upcoming: Option<String>,
}

impl SourceStatus {
    /// Capture the status of a source
    pub fn of<R: Renderer, B: BackgroundLoader>(source: &LyricsSource<R, B>) -> Self {
        let library = source.library();
        let cursor = source.cursor();
        let loaded = !library.is_empty();

        Self {
            song: source.current_song_name().map(str::to_string),
            song_number: if loaded { cursor.song + 1 } else { 0 },
            song_count: library.len(),
            line_number: if loaded { cursor.line + 1 } else { 0 },
            song_lines: library.song_len(cursor.song),
            position: if loaded { cursor.position(library) + 1 } else { 0 },
            total_lines: library.total_lines(),
            visible: source.is_visible(),
            upcoming: if loaded {
                library.line_at(cursor.next(library)).map(str::to_string)
            } else {
                None
            },
        }
    }
}

/// Terminal UI application
pub struct App {
    /// UI state
    state: UiState,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Create a new app
    pub fn new(state: UiState) -> io::Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            state,
            terminal,
            frame_rate: 30,
            running: true,
        })
    }

    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Poll for events with timeout
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw<B: BackgroundLoader>(
        &mut self,
        source: &mut LyricsSource<TerminalRenderer, B>,
    ) -> io::Result<()> {
        self.state.clear_expired_status();
        let state = &self.state;
        self.terminal.draw(|frame| draw_preview(frame, state, source))?;
        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Draw the whole preview into a frame
pub fn draw_preview<B: BackgroundLoader>(
    frame: &mut Frame,
    state: &UiState,
    source: &mut LyricsSource<TerminalRenderer, B>,
) {
    let area = frame.area();
    let status = SourceStatus::of(source);

    // Main layout: header, stage, upcoming line, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Stage
            Constraint::Length(3), // Upcoming
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], &status);
    render_stage(frame, chunks[1], source);
    render_upcoming(frame, chunks[2], &status);
    render_status_bar(frame, chunks[3], state);

    if state.show_help {
        render_help_overlay(frame, area, &state.help);
    }
}

/// Render header section
fn render_header(frame: &mut Frame, area: Rect, status: &SourceStatus) {
    let block = Block::default().borders(Borders::ALL).title(" Lyrics ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(11), // Visibility
            Constraint::Length(12), // Song
            Constraint::Length(13), // Line
            Constraint::Length(14), // Set
            Constraint::Min(0),     // Name
        ])
        .split(inner);

    let visibility = if status.visible {
        Span::styled("● LIVE", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("○ HIDDEN", Style::default().fg(Color::Yellow))
    };
    frame.render_widget(Paragraph::new(visibility), chunks[0]);

    let song = format!("Song {}/{}", status.song_number, status.song_count);
    frame.render_widget(
        Paragraph::new(song).style(Style::default().fg(Color::Cyan)),
        chunks[1],
    );

    let line = format!("Line {}/{}", status.line_number, status.song_lines);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        chunks[2],
    );

    let set = format!("Set {}/{}", status.position, status.total_lines);
    frame.render_widget(
        Paragraph::new(set).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    let name = match &status.song {
        Some(name) => Span::styled(name.clone(), Style::default().fg(Color::White)),
        None => Span::styled("No lyrics loaded", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(name), chunks[4]);
}

/// Render the source output
fn render_stage<B: BackgroundLoader>(
    frame: &mut Frame,
    area: Rect,
    source: &mut LyricsSource<TerminalRenderer, B>,
) {
    let title = format!(" Stage {}x{} ", source.width(), source.height());
    let block = Block::default().borders(Borders::ALL).title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut stage = StageFrame::new(inner, source.width(), source.height());
    source.render(&mut stage);
    frame.buffer_mut().merge(&stage.buffer);
}

/// Render the line `Next` would show
fn render_upcoming(frame: &mut Frame, area: Rect, status: &SourceStatus) {
    let block = Block::default().borders(Borders::ALL).title(" Next ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = status.upcoming.as_deref().unwrap_or("");
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &UiState) {
    let text = if let Some(ref msg) = state.status_message {
        Span::styled(msg, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " →/Space: Next | ←: Previous | v: Show/Hide | r: Reload | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, help: &[HelpSection]) {
    let rows: usize = help.iter().map(|s| s.entries.len() + 2).sum();

    // Calculate centered area
    let width = 64.min(area.width.saturating_sub(4));
    let height = (rows as u16 + 1).min(area.height.saturating_sub(4));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let mut lines = Vec::new();
    for (i, section) in help.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            section.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for entry in &section.entries {
            lines.push(Line::from(format!("  {:<36} {}", entry.keys, entry.description)));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceSettings;
    use ratatui::backend::TestBackend;
    use std::fs;
    use tempfile::tempdir;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn sample_source() -> (tempfile::TempDir, LyricsSource<TerminalRenderer>) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hymn.txt"), "Amazing grace\nHow sweet the sound\n").unwrap();

        let mut settings = SourceSettings::default();
        settings.select_folder(dir.path());
        let source = LyricsSource::new(&settings, TerminalRenderer::new());
        (dir, source)
    }

    #[test]
    fn test_ui_state_status() {
        let mut state = UiState::default();
        assert!(state.status_message.is_none());

        state.set_status("Test message");
        assert_eq!(state.status_message, Some("Test message".to_string()));

        state.clear_expired_status();
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_help_sections() {
        let help = help_sections(&KeyboardController::with_defaults());
        let titles: Vec<&str> = help.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Lyrics", "UI"]);

        let lyrics = &help[0];
        assert_eq!(lyrics.entries.len(), 4);
        assert_eq!(lyrics.entries[0].description, "Next line");
        assert_eq!(lyrics.entries[2].keys, "B/V");
    }

    #[test]
    fn test_source_status() {
        let (_dir, mut source) = sample_source();

        let status = SourceStatus::of(&source);
        assert_eq!(status.song.as_deref(), Some("hymn"));
        assert_eq!((status.song_number, status.song_count), (1, 1));
        assert_eq!((status.line_number, status.song_lines), (1, 2));
        assert_eq!(status.upcoming.as_deref(), Some("How sweet the sound"));

        source.next();
        source.toggle_visible();
        let status = SourceStatus::of(&source);
        assert_eq!(status.line_number, 2);
        assert_eq!((status.position, status.total_lines), (2, 2));
        assert!(!status.visible);
        assert_eq!(status.upcoming.as_deref(), Some("Amazing grace"));
    }

    #[test]
    fn test_source_status_counts_across_songs() {
        let (dir, _) = sample_source();
        fs::write(dir.path().join("psalm.txt"), "The Lord is my shepherd
").unwrap();
        let mut settings = SourceSettings::default();
        settings.select_folder(dir.path());
        let mut source = LyricsSource::new(&settings, TerminalRenderer::new());

        source.next();
        source.next();
        let status = SourceStatus::of(&source);
        assert_eq!(status.song.as_deref(), Some("psalm"));
        assert_eq!((status.line_number, status.song_lines), (1, 1));
        assert_eq!((status.position, status.total_lines), (3, 3));
    }

    #[test]
    fn test_source_status_empty_library() {
        let source = LyricsSource::new(&SourceSettings::default(), TerminalRenderer::new());
        let status = SourceStatus::of(&source);
        assert_eq!(status.song, None);
        assert_eq!((status.song_number, status.line_number), (0, 0));
        assert_eq!((status.position, status.total_lines), (0, 0));
        assert_eq!(status.upcoming, None);
    }

    #[test]
    fn test_draw_preview() {
        let (_dir, mut source) = sample_source();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut state = UiState::with_help(&KeyboardController::with_defaults());

        terminal
            .draw(|frame| draw_preview(frame, &state, &mut source))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("hymn"));
        assert!(text.contains("Line 1/2"));
        assert!(text.contains("Set 1/2"));
        assert!(text.contains("Amazing grace"));
        assert!(text.contains("How sweet the sound"));

        state.show_help = true;
        terminal
            .draw(|frame| draw_preview(frame, &state, &mut source))
            .unwrap();
        assert!(screen(&terminal).contains("Help"));
    }
}
