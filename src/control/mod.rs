// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control system for keyboard input of the preview host.
//!
//! Each navigation action stands in for one of the source's host hotkeys.

pub mod keyboard;

pub use keyboard::{format_shortcut, KeyBinding, KeyboardController, Shortcut};

use crate::source::Command;

/// Action that can be triggered by controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    // Lyrics
    /// Show the next line
    NextLine,
    /// Show the previous line
    PreviousLine,
    /// Show or hide the text
    ToggleVisible,
    /// Reload settings and lyrics from disk
    Reload,

    // UI
    /// Toggle help display
    ToggleHelp,
    /// Quit application
    Quit,
}

impl ControlAction {
    /// Source command for navigation actions
    pub fn command(&self) -> Option<Command> {
        match self {
            ControlAction::NextLine => Some(Command::Next),
            ControlAction::PreviousLine => Some(Command::Previous),
            ControlAction::ToggleVisible => Some(Command::ToggleVisible),
            _ => None,
        }
    }

    /// Host hotkey id the action emulates
    pub fn hotkey_id(&self) -> Option<&'static str> {
        self.command().map(|command| command.hotkey().id)
    }
}
