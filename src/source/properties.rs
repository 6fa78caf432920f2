// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Property sheet of the lyrics source.
//!
//! Describes the settings UI the host builds for the source: one entry per
//! settings key, with its widget kind, range and visibility.

use std::fmt;
use std::ops::RangeInclusive;

use super::projection::{HorizontalAlign, VerticalAlign};

/// Settings keys shared by the property sheet and the configuration file
pub mod keys {
    pub const BACKGROUND_FILE: &str = "background_file";
    pub const USE_FOLDER: &str = "use_folder";
    pub const LYRICS_FOLDER: &str = "lyrics_folder";
    pub const LYRICS_FILES: &str = "lyrics_files";
    pub const FOLDER_BUTTON: &str = "folder_button";
    pub const FILES_BUTTON: &str = "files_button";
    pub const H_ALIGN: &str = "h_align";
    pub const V_ALIGN: &str = "v_align";
    pub const TEXT_WIDTH: &str = "text_width";
    pub const TEXT_HEIGHT: &str = "text_height";
    pub const FONT_NAME: &str = "font_name";
    pub const FONT_SIZE: &str = "font_size";
    pub const FONT_WEIGHT: &str = "font_weight";
    pub const TEXT_COLOR: &str = "text_color";
    pub const OUTLINE: &str = "outline";
    pub const OUTLINE_SIZE: &str = "outline_size";
    pub const OUTLINE_COLOR: &str = "outline_color";
    pub const SHADOW: &str = "shadow";
    pub const SHADOW_OFFSET_X: &str = "shadow_offset_x";
    pub const SHADOW_OFFSET_Y: &str = "shadow_offset_y";
    pub const SHADOW_COLOR: &str = "shadow_color";
}

pub const TEXT_WIDTH_RANGE: RangeInclusive<i64> = 100..=3840;
pub const TEXT_HEIGHT_RANGE: RangeInclusive<i64> = 50..=2160;
pub const FONT_SIZE_RANGE: RangeInclusive<i64> = 8..=200;
pub const OUTLINE_SIZE_RANGE: RangeInclusive<i64> = 1..=20;
pub const SHADOW_OFFSET_RANGE: RangeInclusive<i64> = -50..=50;

/// Font weights offered by the weight list
pub const FONT_WEIGHT_NORMAL: u32 = 400;
pub const FONT_WEIGHT_BOLD: u32 = 700;

/// File dialog filter for the background image
pub const IMAGE_FILTER: &str = "Image Files (*.png *.jpg *.jpeg *.gif *.bmp);;All Files (*)";

/// One entry of a list property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOption {
    pub label: &'static str,
    pub value: i64,
}

/// Widget kind of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// File path chooser with a dialog filter
    Path { filter: &'static str },
    /// Checkbox
    Bool,
    /// Push button; the host runs the matching dialog
    Button,
    /// Integer combo box
    List(Vec<ListOption>),
    /// Integer spinner
    Int { min: i64, max: i64, step: i64 },
    /// Font picker
    Font,
    /// Color picker
    Color,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Path { .. } => f.write_str("path"),
            PropertyKind::Bool => f.write_str("bool"),
            PropertyKind::Button => f.write_str("button"),
            PropertyKind::List(options) => {
                let labels: Vec<String> = options
                    .iter()
                    .map(|o| format!("{}={}", o.label, o.value))
                    .collect();
                write!(f, "list [{}]", labels.join(", "))
            }
            PropertyKind::Int { min, max, step } => write!(f, "int {}..{} step {}", min, max, step),
            PropertyKind::Font => f.write_str("font"),
            PropertyKind::Color => f.write_str("color"),
        }
    }
}

/// One property of the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: PropertyKind,
    pub visible: bool,
}

impl Property {
    fn new(key: &'static str, label: &'static str, kind: PropertyKind) -> Self {
        Self {
            key,
            label,
            kind,
            visible: true,
        }
    }

    fn int(key: &'static str, label: &'static str, range: RangeInclusive<i64>, step: i64) -> Self {
        Self::new(
            key,
            label,
            PropertyKind::Int {
                min: *range.start(),
                max: *range.end(),
                step,
            },
        )
    }
}

/// The full property sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    props: Vec<Property>,
}

impl Properties {
    /// Build the sheet for the current folder-mode flag
    pub fn for_source(use_folder: bool) -> Self {
        let h_options = HorizontalAlign::ALL
            .iter()
            .map(|h| ListOption {
                label: h.label(),
                value: h.index(),
            })
            .collect();
        let v_options = VerticalAlign::ALL
            .iter()
            .map(|v| ListOption {
                label: v.label(),
                value: v.index(),
            })
            .collect();

        let props = vec![
            Property::new(
                keys::BACKGROUND_FILE,
                "Background Image",
                PropertyKind::Path {
                    filter: IMAGE_FILTER,
                },
            ),
            Property::new(keys::USE_FOLDER, "Use Folder", PropertyKind::Bool),
            Property::new(keys::FOLDER_BUTTON, "Select Lyrics Folder", PropertyKind::Button),
            Property::new(keys::FILES_BUTTON, "Select Lyrics Files", PropertyKind::Button),
            Property::new(keys::H_ALIGN, "Horizontal Alignment", PropertyKind::List(h_options)),
            Property::new(keys::V_ALIGN, "Vertical Alignment", PropertyKind::List(v_options)),
            Property::int(keys::TEXT_WIDTH, "Text Width", TEXT_WIDTH_RANGE, 10),
            Property::int(keys::TEXT_HEIGHT, "Text Height", TEXT_HEIGHT_RANGE, 10),
            Property::new(keys::FONT_NAME, "Font", PropertyKind::Font),
            Property::int(keys::FONT_SIZE, "Font Size", FONT_SIZE_RANGE, 1),
            Property::new(
                keys::FONT_WEIGHT,
                "Font Weight",
                PropertyKind::List(vec![
                    ListOption {
                        label: "Normal",
                        value: FONT_WEIGHT_NORMAL as i64,
                    },
                    ListOption {
                        label: "Bold",
                        value: FONT_WEIGHT_BOLD as i64,
                    },
                ]),
            ),
            Property::new(keys::TEXT_COLOR, "Text Color", PropertyKind::Color),
            Property::new(keys::OUTLINE, "Enable Outline", PropertyKind::Bool),
            Property::int(keys::OUTLINE_SIZE, "Outline Size", OUTLINE_SIZE_RANGE, 1),
            Property::new(keys::OUTLINE_COLOR, "Outline Color", PropertyKind::Color),
            Property::new(keys::SHADOW, "Enable Shadow", PropertyKind::Bool),
            Property::int(keys::SHADOW_OFFSET_X, "Shadow Offset X", SHADOW_OFFSET_RANGE, 1),
            Property::int(keys::SHADOW_OFFSET_Y, "Shadow Offset Y", SHADOW_OFFSET_RANGE, 1),
            Property::new(keys::SHADOW_COLOR, "Shadow Color", PropertyKind::Color),
        ];

        let mut properties = Self { props };
        properties.apply_use_folder(use_folder);
        properties
    }

    /// React to the folder-mode checkbox: only the matching selection
    /// button is shown. Returns true since the sheet must be refreshed.
    pub fn apply_use_folder(&mut self, use_folder: bool) -> bool {
        if let Some(button) = self.get_mut(keys::FOLDER_BUTTON) {
            button.visible = use_folder;
        }
        if let Some(button) = self.get_mut(keys::FILES_BUTTON) {
            button.visible = !use_folder;
        }
        true
    }

    /// Look up a property by key
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.key == key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.props.iter_mut().find(|p| p.key == key)
    }

    /// Iterate in display order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.props.iter()
    }

    /// Only the properties currently shown
    pub fn visible(&self) -> impl Iterator<Item = &Property> {
        self.props.iter().filter(|p| p.visible)
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Whether the sheet is empty
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}
