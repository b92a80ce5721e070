//! Theme and mode chrome.
//!
//! Dark mode is a `dark` class on `<html>`; the active catalog is a
//! `data-mode` attribute on `<body>` plus the `active` class on its brand
//! button. The theme is persisted next to the tracker state.

use crate::dom::{self, Elements};
use crate::state;
use st_types::{Mode, Theme};

pub fn apply_theme(theme: Theme) {
    if let Some(root) = gloo_utils::document().document_element() {
        dom::toggle_class(&root, "dark", theme == Theme::Dark);
    }
    if let Some(icon) = dom::query("#themeToggle i") {
        let class = match theme {
            Theme::Dark => "fas fa-moon",
            Theme::Light => "fas fa-sun",
        };
        let _ = icon.set_attribute("class", class);
    }
}

/// Flip light/dark, apply it and remember it.
pub fn toggle_theme() {
    let result = state::with_mut(|s| {
        s.theme = s.theme.toggled();
        apply_theme(s.theme);
        s.tracker.store().save_theme(s.theme)
    });
    if let Some(Err(err)) = result {
        gloo_console::warn!(format!("{err:#}"));
    }
}

pub fn apply_mode(els: &Elements, mode: Mode) {
    let _ = els.body.set_attribute("data-mode", mode.as_str());
    dom::toggle_class(&els.brand_java, "active", mode == Mode::Java);
    dom::toggle_class(&els.brand_db, "active", mode == Mode::Db);
}
