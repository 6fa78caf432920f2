// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal text renderer for the preview stage.
//!
//! Draws the source at terminal scale: the text box sits at the top-left
//! of the stage with its extents scaled from source pixels to cells, and
//! the text is wrapped and aligned inside it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::source::{Background, HorizontalAlign, Renderer, TextSettings, VerticalAlign};

/// Weight at and above which text is drawn bold
const BOLD_WEIGHT: u32 = 700;

/// Stage fill when a background image is set
const BACKGROUND_FILL: Color = Color::Rgb(28, 30, 38);

/// Render target of the terminal preview
#[derive(Debug, Clone)]
pub struct StageFrame {
    /// Cells of the stage area
    pub buffer: Buffer,
    /// Source width in pixels
    pub source_width: u32,
    /// Source height in pixels
    pub source_height: u32,
}

impl StageFrame {
    /// Create an empty stage covering `area`
    pub fn new(area: Rect, source_width: u32, source_height: u32) -> Self {
        Self {
            buffer: Buffer::empty(area),
            source_width,
            source_height,
        }
    }

    /// Stage area in cells
    pub fn area(&self) -> Rect {
        self.buffer.area
    }

    /// Scale a source-pixel box to cells, clamped to the stage
    pub fn scale(&self, width: u32, height: u32) -> (u16, u16) {
        let area = self.area();
        (
            scale_axis(width, self.source_width, area.width),
            scale_axis(height, self.source_height, area.height),
        )
    }
}

fn scale_axis(pixels: u32, source: u32, cells: u16) -> u16 {
    if source == 0 {
        return cells;
    }
    let scaled = (pixels as u64 * cells as u64) / source as u64;
    scaled.clamp(1, cells.max(1) as u64) as u16
}

/// Renderer that keeps the latest settings record and draws it into a
/// [`StageFrame`]
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    settings: Option<TextSettings>,
    updates: usize,
}

impl TerminalRenderer {
    /// Create a renderer with no settings yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of settings records received
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl Renderer for TerminalRenderer {
    type Target = StageFrame;

    fn update(&mut self, settings: &TextSettings) {
        self.settings = Some(settings.clone());
        self.updates += 1;
    }

    fn draw_background(&mut self, target: &mut StageFrame, background: &Background) {
        let area = target.area();
        target.buffer.set_style(area, Style::default().bg(BACKGROUND_FILL));

        if area.height == 0 {
            return;
        }
        let name = background
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let label = format!("{} {}x{}", name, background.width, background.height);
        let len = label.chars().count().min(area.width as usize) as u16;
        target.buffer.set_stringn(
            area.right() - len,
            area.bottom() - 1,
            &label,
            len as usize,
            Style::default().fg(Color::DarkGray).bg(BACKGROUND_FILL),
        );
    }

    fn draw_text(&mut self, target: &mut StageFrame) {
        let Some(settings) = &self.settings else {
            return;
        };
        let area = target.area();
        if settings.text.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let (cols, rows) = if settings.extents {
            target.scale(settings.extents_width, settings.extents_height)
        } else {
            (area.width, area.height)
        };
        let text_box = Rect::new(area.x, area.y, cols, rows);

        let lines = if settings.wrap {
            wrap_words(&settings.text, cols as usize)
        } else {
            settings.text.lines().map(str::to_string).collect()
        };
        let placed = place_lines(&lines, text_box, settings);

        let mut style = Style::default().fg(obs_color(settings.color));
        if settings.font.style >= BOLD_WEIGHT {
            style = style.add_modifier(Modifier::BOLD);
        }
        if settings.outline && settings.outline_size > 0 {
            style = style.bg(obs_color(settings.outline_color));
        }

        if settings.drop_shadow && settings.shadow_distance > 0 {
            let shadow = Style::default().fg(obs_color(settings.shadow_color));
            for (x, y, line) in &placed {
                let (sx, sy) = (x + 1, y + 1);
                if sx < text_box.right() && sy < text_box.bottom() {
                    let width = (text_box.right() - sx) as usize;
                    target.buffer.set_stringn(sx, sy, line, width, shadow);
                }
            }
        }

        for (x, y, line) in &placed {
            let width = (text_box.right() - x) as usize;
            target.buffer.set_stringn(*x, *y, line, width, style);
        }
    }
}

/// Position each line inside `text_box` according to the alignment,
/// dropping lines that do not fit vertically
fn place_lines<'a>(
    lines: &'a [String],
    text_box: Rect,
    settings: &TextSettings,
) -> Vec<(u16, u16, &'a str)> {
    let shown = lines.len().min(text_box.height as usize);
    let free_rows = text_box.height - shown as u16;
    let top = text_box.y
        + match settings.align.vertical() {
            VerticalAlign::Top => 0,
            VerticalAlign::Center => free_rows / 2,
            VerticalAlign::Bottom => free_rows,
        };

    lines
        .iter()
        .take(shown)
        .enumerate()
        .map(|(row, line)| {
            let len = line.chars().count().min(text_box.width as usize) as u16;
            let free = text_box.width - len;
            let x = text_box.x
                + match settings.align.horizontal() {
                    HorizontalAlign::Left => 0,
                    HorizontalAlign::Center => free / 2,
                    HorizontalAlign::Right => free,
                };
            (x, top + row as u16, line.as_str())
        })
        .collect()
}

/// Greedy word wrap to `width` columns; words longer than a line are split
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}

/// Convert a host color (0xAABBGGRR) to a terminal color; alpha is ignored
pub fn obs_color(color: u32) -> Color {
    Color::Rgb(
        (color & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        ((color >> 16) & 0xFF) as u8,
    )
}
