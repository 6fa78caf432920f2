// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard shortcut handling.
//!
//! Provides configurable keyboard bindings for lyrics navigation and the
//! preview UI.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::ControlAction;

/// A keyboard shortcut definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a shortcut with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Create a shortcut with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Create a shortcut with Shift modifier
    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// A keyboard binding (shortcut to action)
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// The shortcut
    pub shortcut: Shortcut,
    /// The action to perform
    pub action: ControlAction,
    /// Description for help display
    pub description: String,
    /// Category for grouping in help
    pub category: String,
}

impl KeyBinding {
    /// Create a new key binding
    pub fn new(shortcut: Shortcut, action: ControlAction, description: impl Into<String>) -> Self {
        Self {
            shortcut,
            action,
            description: description.into(),
            category: "General".to_string(),
        }
    }

    /// Set the category
    pub fn category(mut self, cat: impl Into<String>) -> Self {
        self.category = cat.into();
        self
    }
}

/// Keyboard controller with configurable bindings
pub struct KeyboardController {
    bindings: HashMap<Shortcut, KeyBinding>,
}

impl KeyboardController {
    /// Create an empty keyboard controller
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a keyboard controller with default bindings
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.add_default_bindings();
        controller
    }

    /// Add default keyboard bindings
    fn add_default_bindings(&mut self) {
        // Lyrics: presenter remotes send PageDown/PageUp, so bind those too
        let next_keys = [
            (KeyCode::Right, "Next line"),
            (KeyCode::Down, "Next line"),
            (KeyCode::Char(' '), "Next line"),
            (KeyCode::PageDown, "Next line"),
            (KeyCode::Char('n'), "Next line"),
        ];
        for (code, description) in next_keys {
            self.add(
                KeyBinding::new(Shortcut::key(code), ControlAction::NextLine, description)
                    .category("Lyrics"),
            );
        }

        let previous_keys = [
            (KeyCode::Left, "Previous line"),
            (KeyCode::Up, "Previous line"),
            (KeyCode::Backspace, "Previous line"),
            (KeyCode::PageUp, "Previous line"),
            (KeyCode::Char('p'), "Previous line"),
        ];
        for (code, description) in previous_keys {
            self.add(
                KeyBinding::new(Shortcut::key(code), ControlAction::PreviousLine, description)
                    .category("Lyrics"),
            );
        }

        self.add(
            KeyBinding::new(
                Shortcut::key(KeyCode::Char('v')),
                ControlAction::ToggleVisible,
                "Show/Hide lyrics",
            )
            .category("Lyrics"),
        );

        self.add(
            KeyBinding::new(
                Shortcut::key(KeyCode::Char('b')),
                ControlAction::ToggleVisible,
                "Show/Hide lyrics",
            )
            .category("Lyrics"),
        );

        self.add(
            KeyBinding::new(
                Shortcut::key(KeyCode::Char('r')),
                ControlAction::Reload,
                "Reload settings and lyrics",
            )
            .category("Lyrics"),
        );

        // UI
        self.add(
            KeyBinding::new(
                Shortcut::key(KeyCode::Char('?')),
                ControlAction::ToggleHelp,
                "Toggle Help",
            )
            .category("UI"),
        );

        self.add(
            KeyBinding::new(
                Shortcut::key(KeyCode::Char('h')),
                ControlAction::ToggleHelp,
                "Toggle Help",
            )
            .category("UI"),
        );

        self.add(
            KeyBinding::new(Shortcut::key(KeyCode::Char('q')), ControlAction::Quit, "Quit")
                .category("UI"),
        );

        self.add(
            KeyBinding::new(Shortcut::key(KeyCode::Esc), ControlAction::Quit, "Quit")
                .category("UI"),
        );

        self.add(
            KeyBinding::new(Shortcut::ctrl(KeyCode::Char('c')), ControlAction::Quit, "Quit")
                .category("UI"),
        );
    }

    /// Add a key binding
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.insert(binding.shortcut.clone(), binding);
    }

    /// Remove a key binding
    pub fn remove(&mut self, shortcut: &Shortcut) -> Option<KeyBinding> {
        self.bindings.remove(shortcut)
    }

    /// Get action for a key event
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<&ControlAction> {
        let shortcut = Shortcut::new(code, modifiers);
        self.bindings.get(&shortcut).map(|b| &b.action)
    }

    /// Process a key event and return the action.
    ///
    /// Terminals report Shift on shifted characters inconsistently, so a
    /// character key with only Shift held also matches its plain binding.
    pub fn process_key(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<ControlAction> {
        if let Some(action) = self.get_action(code, modifiers) {
            return Some(*action);
        }

        match code {
            KeyCode::Char(_) if modifiers == KeyModifiers::SHIFT => {
                self.get_action(code, KeyModifiers::NONE).copied()
            }
            _ => None,
        }
    }

    /// Get bindings grouped by category
    pub fn bindings_by_category(&self) -> HashMap<String, Vec<&KeyBinding>> {
        let mut grouped: HashMap<String, Vec<&KeyBinding>> = HashMap::new();

        for binding in self.bindings.values() {
            grouped
                .entry(binding.category.clone())
                .or_default()
                .push(binding);
        }

        grouped
    }

    /// Shortcuts bound to an action, formatted and sorted for display
    pub fn shortcuts_for(&self, action: ControlAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .values()
            .filter(|b| b.action == action)
            .map(|b| format_shortcut(&b.shortcut))
            .collect();
        keys.sort();
        keys
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Format a shortcut for display
pub fn format_shortcut(shortcut: &Shortcut) -> String {
    let mut parts = Vec::new();

    if shortcut.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if shortcut.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if shortcut.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }

    let key = match shortcut.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        _ => "?".to_string(),
    };

    parts.push(&key);
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_creation() {
        let s = Shortcut::key(KeyCode::Char('a'));
        assert_eq!(s.code, KeyCode::Char('a'));
        assert_eq!(s.modifiers, KeyModifiers::NONE);

        let s = Shortcut::ctrl(KeyCode::Char('c'));
        assert_eq!(s.modifiers, KeyModifiers::CONTROL);

        let s = Shortcut::shift(KeyCode::Up);
        assert_eq!(s.modifiers, KeyModifiers::SHIFT);
    }

    #[test]
    fn test_keyboard_controller_defaults() {
        let controller = KeyboardController::with_defaults();

        for code in [KeyCode::Right, KeyCode::Char(' '), KeyCode::PageDown] {
            let action = controller.get_action(code, KeyModifiers::NONE);
            assert_eq!(action, Some(&ControlAction::NextLine));
        }
        for code in [KeyCode::Left, KeyCode::Backspace, KeyCode::PageUp] {
            let action = controller.get_action(code, KeyModifiers::NONE);
            assert_eq!(action, Some(&ControlAction::PreviousLine));
        }

        let action = controller.get_action(KeyCode::Char('v'), KeyModifiers::NONE);
        assert_eq!(action, Some(&ControlAction::ToggleVisible));

        let action = controller.get_action(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action, Some(&ControlAction::Quit));
    }

    #[test]
    fn test_add_remove_binding() {
        let mut controller = KeyboardController::new();

        let binding = KeyBinding::new(
            Shortcut::key(KeyCode::Enter),
            ControlAction::NextLine,
            "Custom Next",
        );

        controller.add(binding);
        assert!(controller.get_action(KeyCode::Enter, KeyModifiers::NONE).is_some());

        controller.remove(&Shortcut::key(KeyCode::Enter));
        assert!(controller.get_action(KeyCode::Enter, KeyModifiers::NONE).is_none());
    }

    #[test]
    fn test_format_shortcut() {
        let s = Shortcut::key(KeyCode::Char(' '));
        assert_eq!(format_shortcut(&s), "Space");

        let s = Shortcut::ctrl(KeyCode::Char('c'));
        assert_eq!(format_shortcut(&s), "Ctrl+C");

        let s = Shortcut::shift(KeyCode::Up);
        assert_eq!(format_shortcut(&s), "Shift+↑");

        let s = Shortcut::key(KeyCode::PageDown);
        assert_eq!(format_shortcut(&s), "PageDown");
    }

    #[test]
    fn test_bindings_by_category() {
        let controller = KeyboardController::with_defaults();
        let grouped = controller.bindings_by_category();

        assert!(grouped.contains_key("Lyrics"));
        assert!(grouped.contains_key("UI"));
        assert_eq!(grouped["Lyrics"].len(), 13);
    }

    #[test]
    fn test_process_key() {
        let controller = KeyboardController::with_defaults();

        let action = controller.process_key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(action, Some(ControlAction::NextLine));

        // '?' usually arrives with Shift held
        let action = controller.process_key(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(action, Some(ControlAction::ToggleHelp));

        let action = controller.process_key(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(action, None);
    }

    #[test]
    fn test_shortcuts_for() {
        let controller = KeyboardController::with_defaults();
        assert_eq!(controller.shortcuts_for(ControlAction::ToggleVisible), vec!["B", "V"]);
        assert_eq!(
            controller.shortcuts_for(ControlAction::Quit),
            vec!["Ctrl+C", "Esc", "Q"]
        );
    }
}
