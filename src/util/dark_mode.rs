//! Theme application and system preference lookup.
//!
//! Applies a `data-theme` attribute to the `<html>` element. The stored
//! preference is owned by the controller; this module only talks to the DOM.
//!
//! TRADE-OFFS
//! ==========
//! Outside a browser both functions are deterministic no-ops so state tests
//! never depend on the host environment.

use crate::state::ui::Theme;

/// Theme implied by `prefers-color-scheme`, or `None` when unknown.
pub fn system_preference() -> Option<Theme> {
    #[cfg(feature = "csr")]
    {
        let window = web_sys::window()?;
        let dark = window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches());
        Some(if dark { Theme::Dark } else { Theme::Light })
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Set the `data-theme` attribute on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "csr")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let _ = el.set_attribute("data-theme", theme.as_str());
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = theme;
    }
}

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod tests;
