//! Local UI chrome state (theme, add-form draft).
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of the record store so the controller
//! only has to reason about tasks.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Color scheme applied as `data-theme` on the document root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value written to storage and to the `data-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored preference. Anything other than `light`/`dark` is
    /// treated as "no preference".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Glyph for the toggle button: shows the theme a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

/// UI state for the add form and import control.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Current contents of the add-task input.
    pub draft: String,
    /// Bumped to reset the hidden file input after each import.
    pub import_seq: u64,
}
