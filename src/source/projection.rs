// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Projection of the source state onto the text renderer's settings.
//!
//! The renderer is a host text source; it receives one flat
//! [`TextSettings`] record and owns everything about drawing it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SourceSettings;
use crate::lyrics::{Cursor, Library};

/// Font face used when the configured one is empty
pub const DEFAULT_FONT_FACE: &str = "Arial";

/// Raw axis value as found in a settings file: host index or name
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Index(i64),
    Name(String),
}

/// Horizontal placement of the text inside its box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "AxisValue")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAlign {
    /// All values in host list order
    pub const ALL: [HorizontalAlign; 3] = [Self::Left, Self::Center, Self::Right];

    /// Host list index (Left 0, Center 1, Right 2)
    pub fn index(&self) -> i64 {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    /// Parse a host list index
    pub fn from_index(index: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.index() == index)
    }

    /// Label shown in the property sheet
    pub fn label(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

impl TryFrom<AxisValue> for HorizontalAlign {
    type Error = String;

    fn try_from(value: AxisValue) -> Result<Self, Self::Error> {
        match value {
            // Unknown host indices fall back to center.
            AxisValue::Index(i) => Ok(Self::from_index(i).unwrap_or_default()),
            AxisValue::Name(name) => match name.to_ascii_lowercase().as_str() {
                "left" => Ok(Self::Left),
                "center" | "centre" => Ok(Self::Center),
                "right" => Ok(Self::Right),
                _ => Err(format!("unknown horizontal alignment: {}", name)),
            },
        }
    }
}

/// Vertical placement of the text inside its box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "AxisValue")]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalAlign {
    /// All values in host list order
    pub const ALL: [VerticalAlign; 3] = [Self::Top, Self::Center, Self::Bottom];

    /// Host list index (Top 0, Center 1, Bottom 2)
    pub fn index(&self) -> i64 {
        match self {
            Self::Top => 0,
            Self::Center => 1,
            Self::Bottom => 2,
        }
    }

    /// Parse a host list index
    pub fn from_index(index: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.index() == index)
    }

    /// Label shown in the property sheet
    pub fn label(&self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Center => "Center",
            Self::Bottom => "Bottom",
        }
    }
}

impl TryFrom<AxisValue> for VerticalAlign {
    type Error = String;

    fn try_from(value: AxisValue) -> Result<Self, Self::Error> {
        match value {
            AxisValue::Index(i) => Ok(Self::from_index(i).unwrap_or_default()),
            AxisValue::Name(name) => match name.to_ascii_lowercase().as_str() {
                "top" => Ok(Self::Top),
                "center" | "centre" => Ok(Self::Center),
                "bottom" => Ok(Self::Bottom),
                _ => Err(format!("unknown vertical alignment: {}", name)),
            },
        }
    }
}

/// One of the nine alignment states understood by the text renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    /// Combine the two axes
    pub fn from_axes(h: HorizontalAlign, v: VerticalAlign) -> Self {
        use HorizontalAlign as H;
        use VerticalAlign as V;

        match (h, v) {
            (H::Left, V::Top) => Alignment::TopLeft,
            (H::Center, V::Top) => Alignment::TopCenter,
            (H::Right, V::Top) => Alignment::TopRight,
            (H::Left, V::Center) => Alignment::CenterLeft,
            (H::Center, V::Center) => Alignment::Center,
            (H::Right, V::Center) => Alignment::CenterRight,
            (H::Left, V::Bottom) => Alignment::BottomLeft,
            (H::Center, V::Bottom) => Alignment::BottomCenter,
            (H::Right, V::Bottom) => Alignment::BottomRight,
        }
    }

    /// Horizontal component
    pub fn horizontal(&self) -> HorizontalAlign {
        match self {
            Alignment::TopLeft | Alignment::CenterLeft | Alignment::BottomLeft => {
                HorizontalAlign::Left
            }
            Alignment::TopCenter | Alignment::Center | Alignment::BottomCenter => {
                HorizontalAlign::Center
            }
            Alignment::TopRight | Alignment::CenterRight | Alignment::BottomRight => {
                HorizontalAlign::Right
            }
        }
    }

    /// Vertical component
    pub fn vertical(&self) -> VerticalAlign {
        match self {
            Alignment::TopLeft | Alignment::TopCenter | Alignment::TopRight => VerticalAlign::Top,
            Alignment::CenterLeft | Alignment::Center | Alignment::CenterRight => {
                VerticalAlign::Center
            }
            Alignment::BottomLeft | Alignment::BottomCenter | Alignment::BottomRight => {
                VerticalAlign::Bottom
            }
        }
    }

    /// Renderer name of the alignment
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::TopLeft => "top_left",
            Alignment::TopCenter => "top_center",
            Alignment::TopRight => "top_right",
            Alignment::CenterLeft => "center_left",
            Alignment::Center => "center",
            Alignment::CenterRight => "center_right",
            Alignment::BottomLeft => "bottom_left",
            Alignment::BottomCenter => "bottom_center",
            Alignment::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font block of the renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSettings {
    pub face: String,
    pub size: u32,
    /// Font weight (400 normal, 700 bold)
    pub style: u32,
}

/// Flat settings record pushed to the text renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSettings {
    pub text: String,
    pub font: FontSettings,
    pub color: u32,
    pub outline: bool,
    pub outline_size: u32,
    pub outline_color: u32,
    pub drop_shadow: bool,
    pub shadow_distance: u32,
    pub shadow_color: u32,
    pub align: Alignment,
    pub wrap: bool,
    pub extents_width: u32,
    pub extents_height: u32,
    pub extents: bool,
}

/// Style part of the source configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub font_name: String,
    pub font_size: u32,
    pub font_weight: u32,
    pub text_color: u32,
    pub outline_enabled: bool,
    pub outline_size: u32,
    pub outline_color: u32,
    pub shadow_enabled: bool,
    pub shadow_offset_x: i32,
    pub shadow_offset_y: i32,
    pub shadow_color: u32,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub text_width: u32,
    pub text_height: u32,
}

impl TextStyle {
    /// Extract the style from a configuration. Numbers pass through as
    /// given; negative sizes saturate at 0.
    pub fn from_settings(settings: &SourceSettings) -> Self {
        let font_name = if settings.font_name.trim().is_empty() {
            DEFAULT_FONT_FACE.to_string()
        } else {
            settings.font_name.clone()
        };

        Self {
            font_name,
            font_size: to_u32(settings.font_size),
            font_weight: settings.font_weight,
            text_color: settings.text_color,
            outline_enabled: settings.outline,
            outline_size: to_u32(settings.outline_size),
            outline_color: settings.outline_color,
            shadow_enabled: settings.shadow,
            shadow_offset_x: to_i32(settings.shadow_offset_x),
            shadow_offset_y: to_i32(settings.shadow_offset_y),
            shadow_color: settings.shadow_color,
            h_align: settings.h_align,
            v_align: settings.v_align,
            text_width: to_u32(settings.text_width),
            text_height: to_u32(settings.text_height),
        }
    }

    /// Alignment state for the renderer
    pub fn alignment(&self) -> Alignment {
        Alignment::from_axes(self.h_align, self.v_align)
    }

    /// Single shadow distance for the renderer.
    ///
    /// The renderer's shadow has one distance, not an x/y offset, so the
    /// offset collapses to its length. Direction is lost.
    pub fn shadow_distance(&self) -> u32 {
        shadow_distance(self.shadow_offset_x, self.shadow_offset_y)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::from_settings(&SourceSettings::default())
    }
}

fn to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Euclidean length of a shadow offset, truncated
pub fn shadow_distance(offset_x: i32, offset_y: i32) -> u32 {
    (offset_x as f64).hypot(offset_y as f64) as u32
}

/// Text on screen: the line under the cursor, or nothing when hidden or
/// when the cursor does not point at a line
pub fn displayed_text(library: &Library, cursor: Cursor, visible: bool) -> &str {
    if !visible {
        return "";
    }
    library.line_at(cursor).unwrap_or("")
}

/// Build the renderer settings for the current state
pub fn project(
    library: &Library,
    cursor: Cursor,
    visible: bool,
    style: &TextStyle,
) -> TextSettings {
    TextSettings {
        text: displayed_text(library, cursor, visible).to_string(),
        font: FontSettings {
            face: style.font_name.clone(),
            size: style.font_size,
            style: style.font_weight,
        },
        color: style.text_color,
        outline: style.outline_enabled,
        outline_size: style.outline_size,
        outline_color: style.outline_color,
        drop_shadow: style.shadow_enabled,
        shadow_distance: style.shadow_distance(),
        shadow_color: style.shadow_color,
        align: style.alignment(),
        wrap: true,
        extents_width: style.text_width,
        extents_height: style.text_height,
        extents: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::Song;

    fn sample_library() -> Library {
        [
            Song::new("first", ["a", "b"]).unwrap(),
            Song::new("second", ["c"]).unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_alignment_table() {
        use HorizontalAlign as H;
        use VerticalAlign as V;

        let expected = [
            (H::Left, V::Top, "top_left"),
            (H::Center, V::Top, "top_center"),
            (H::Right, V::Top, "top_right"),
            (H::Left, V::Center, "center_left"),
            (H::Center, V::Center, "center"),
            (H::Right, V::Center, "center_right"),
            (H::Left, V::Bottom, "bottom_left"),
            (H::Center, V::Bottom, "bottom_center"),
            (H::Right, V::Bottom, "bottom_right"),
        ];

        for (h, v, name) in expected {
            let align = Alignment::from_axes(h, v);
            assert_eq!(align.as_str(), name);
            assert_eq!(align.horizontal(), h);
            assert_eq!(align.vertical(), v);
        }
    }

    #[test]
    fn test_right_top_is_top_right() {
        let align = Alignment::from_axes(HorizontalAlign::Right, VerticalAlign::Top);
        assert_eq!(align, Alignment::TopRight);
        assert_eq!(align.to_string(), "top_right");
    }

    #[test]
    fn test_axis_index_round_trip() {
        for h in HorizontalAlign::ALL {
            assert_eq!(HorizontalAlign::from_index(h.index()), Some(h));
        }
        for v in VerticalAlign::ALL {
            assert_eq!(VerticalAlign::from_index(v.index()), Some(v));
        }
        assert_eq!(HorizontalAlign::from_index(7), None);
    }

    #[test]
    fn test_shadow_distance() {
        assert_eq!(shadow_distance(3, 4), 5);
        assert_eq!(shadow_distance(-3, 4), 5);
        assert_eq!(shadow_distance(0, 0), 0);
        // sqrt(32) = 5.65..., truncated
        assert_eq!(shadow_distance(4, 4), 5);
    }

    #[test]
    fn test_displayed_text() {
        let library = sample_library();
        assert_eq!(displayed_text(&library, Cursor::new(0, 1), true), "b");
        assert_eq!(displayed_text(&library, Cursor::new(0, 1), false), "");
        assert_eq!(displayed_text(&library, Cursor::new(1, 3), true), "");
        assert_eq!(displayed_text(&library, Cursor::new(4, 0), true), "");
    }

    #[test]
    fn test_empty_library_shows_nothing() {
        let library = Library::new();
        for visible in [true, false] {
            let settings = project(&library, Cursor::START, visible, &TextStyle::default());
            assert_eq!(settings.text, "");
        }
    }

    #[test]
    fn test_project_passes_style_through() {
        let style = TextStyle {
            font_name: "Georgia".to_string(),
            font_size: 64,
            font_weight: 700,
            text_color: 0xFF00FF00,
            outline_enabled: true,
            outline_size: 3,
            outline_color: 0xFF0000FF,
            shadow_enabled: true,
            shadow_offset_x: 3,
            shadow_offset_y: 4,
            shadow_color: 0x80000000,
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Bottom,
            text_width: 1200,
            text_height: 300,
        };

        let settings = project(&sample_library(), Cursor::START, true, &style);

        assert_eq!(settings.text, "a");
        assert_eq!(settings.font.face, "Georgia");
        assert_eq!(settings.font.size, 64);
        assert_eq!(settings.font.style, 700);
        assert_eq!(settings.color, 0xFF00FF00);
        assert!(settings.outline);
        assert_eq!(settings.outline_size, 3);
        assert_eq!(settings.outline_color, 0xFF0000FF);
        assert!(settings.drop_shadow);
        assert_eq!(settings.shadow_distance, 5);
        assert_eq!(settings.shadow_color, 0x80000000);
        assert_eq!(settings.align, Alignment::BottomLeft);
        assert!(settings.wrap);
        assert!(settings.extents);
        assert_eq!(settings.extents_width, 1200);
        assert_eq!(settings.extents_height, 300);
    }

    #[test]
    fn test_style_passes_numbers_through() {
        let settings = SourceSettings {
            font_name: "  ".to_string(),
            font_size: 300,
            text_width: 5000,
            text_height: 10_000,
            outline_size: 0,
            shadow_offset_x: 60,
            shadow_offset_y: 80,
            ..SourceSettings::default()
        };

        let style = TextStyle::from_settings(&settings);
        assert_eq!(style.font_name, DEFAULT_FONT_FACE);
        assert_eq!(style.font_size, 300);
        assert_eq!(style.text_width, 5000);
        assert_eq!(style.text_height, 10_000);
        assert_eq!(style.outline_size, 0);
        assert_eq!(style.shadow_distance(), 100);

        let projected = project(&sample_library(), Cursor::START, true, &style);
        assert_eq!(
            (projected.extents_width, projected.font.size, projected.shadow_distance),
            (5000, 300, 100)
        );
    }

    #[test]
    fn test_style_saturates_out_of_range_numbers() {
        let settings = SourceSettings {
            text_width: -5,
            font_size: i64::MAX,
            shadow_offset_x: -400,
            shadow_offset_y: i64::MIN,
            ..SourceSettings::default()
        };

        let style = TextStyle::from_settings(&settings);
        assert_eq!(style.text_width, 0);
        assert_eq!(style.font_size, u32::MAX);
        assert_eq!(style.shadow_offset_x, -400);
        assert_eq!(style.shadow_offset_y, i32::MIN);
    }

    #[test]
    fn test_alignment_serializes_as_renderer_name() {
        let yaml = serde_yaml::to_string(&Alignment::BottomCenter).unwrap();
        assert_eq!(yaml.trim(), "bottom_center");
    }
}
