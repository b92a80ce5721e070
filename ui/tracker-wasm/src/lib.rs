//! Study Tracker WASM Frontend
//!
//! Pure Rust + WASM browser UI over `st-core`. Each concern lives in its own
//! module: DOM bindings, content fetches, rendering, the notes modal, event
//! dispatch, theme chrome and confetti.

pub mod api;
pub mod dom;
pub mod effects;
pub mod events;
pub mod modal;
pub mod render;
pub mod state;
pub mod theme;

use st_core::{DetailModal, Tracker};
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Load content, restore state, render, then wire events.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    dom::set_text(&els.header_title, "Loading Knowledge Base...");

    // All three documents or nothing; no partial dashboard
    let content = match st_content::load(&api::BrowserSource::default()).await {
        Ok(content) => content,
        Err(err) => {
            gloo_console::error!("Error loading data:", err.to_string());
            dom::set_text(&els.header_title, "Error Loading Data");
            dom::set_text(
                &els.header_subtitle,
                "Please ensure java.json and db.json exist",
            );
            return Ok(());
        }
    };

    let tracker = Tracker::new(content, state::LocalStore, effects::ConfettiEffects);
    let theme = tracker.store().load_theme();
    state::install(state::AppState {
        tracker,
        modal: DetailModal::default(),
        theme,
    });

    theme::apply_theme(theme);
    render::init_dashboard(&els);
    events::bind_events(&els);

    Ok(())
}
