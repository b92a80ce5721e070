//! Event binding.
//!
//! Listeners sit on static containers; clicks on re-rendered children are
//! dispatched through their `data-section`, `data-topic`, `data-notes` and
//! `data-copy` attributes.

use crate::dom::{self, Elements};
use crate::effects::FADE_MS;
use crate::modal;
use crate::render;
use crate::state;
use crate::theme;
use gloo_timers::callback::Timeout;
use st_core::{BlockId, Origin, TopicId};
use st_types::Mode;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach a handler for `$event` that receives the raw event.
macro_rules! on_event {
    ($el:expr, $event:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::Event)>);
        $el.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())
            .unwrap_throw();
        cb.forget();
    }};
}

/// Helper: attach a click handler that receives the `MouseEvent`.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap_throw();
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after the first render.
pub fn bind_events(els: &Elements) {
    // ── Navigation ──
    {
        let els2 = els.clone();
        on_click!(els.nav_container, move |e: web_sys::MouseEvent| {
            let Some(item) = dom::closest_target(&e, "[data-section]") else {
                return;
            };
            let index = item
                .get_attribute("data-section")
                .and_then(|v| v.parse::<usize>().ok());
            if let Some(index) = index {
                switch_tab(&els2, index);
            }
        });
    }

    // ── Topic grid ──
    {
        let els2 = els.clone();
        on_click!(els.content_area, move |e: web_sys::MouseEvent| {
            if let Some(btn) = dom::closest_target(&e, "[data-notes]") {
                e.stop_propagation();
                if let Some(id) = topic_id(&btn, "data-notes") {
                    modal::open(&els2, id);
                }
                return;
            }
            let Some(card) = dom::closest_target(&e, "[data-topic]") else {
                return;
            };
            if dom::has_text_selection() {
                return;
            }
            if let Some(id) = topic_id(&card, "data-topic") {
                toggle_topic(&els2, id, &e);
            }
        });
    }

    // ── Search ──
    {
        let els2 = els.clone();
        on_event!(els.search_input, "input", move |_: web_sys::Event| {
            let term = els2.search_input.value();
            state::with_mut(|s| s.tracker.set_search(term));
            render::refresh_content(&els2);
        });
    }

    // ── Mode switch ──
    for (btn, mode) in [(&els.brand_java, Mode::Java), (&els.brand_db, Mode::Db)] {
        let els2 = els.clone();
        on_click!(btn, move |_: web_sys::MouseEvent| {
            switch_mode(&els2, mode);
        });
    }

    // ── Chrome ──
    on_click!(els.theme_toggle, move |_: web_sys::MouseEvent| {
        theme::toggle_theme();
    });
    {
        let sidebar = els.sidebar.clone();
        on_click!(els.sidebar_toggle, move |_: web_sys::MouseEvent| {
            dom::flip_class(&sidebar, "closed");
        });
    }

    // ── Notes modal ──
    {
        let els2 = els.clone();
        on_event!(els.note_modal, "click", move |e: web_sys::Event| {
            modal::on_modal_click(&els2, &e);
        });
    }
    on_click!(els.modal_body, move |e: web_sys::MouseEvent| {
        let block = dom::closest_target(&e, "[data-copy]")
            .and_then(|btn| btn.get_attribute("data-copy"))
            .and_then(|v| v.parse::<usize>().ok());
        if let Some(block) = block {
            modal::copy_block(BlockId(block));
        }
    });
}

fn topic_id(el: &web_sys::Element, attr: &str) -> Option<TopicId> {
    el.get_attribute(attr)?.parse().ok()
}

fn switch_tab(els: &Elements, index: usize) {
    let result = state::with_mut(|s| s.tracker.set_active_tab(index));
    if let Some(Err(err)) = result {
        gloo_console::warn!(err.to_string());
        return;
    }
    els.search_input.set_value("");
    render::refresh(els);
    render::collapse_sidebar_if_narrow(els);
}

fn toggle_topic(els: &Elements, id: TopicId, e: &web_sys::MouseEvent) {
    let (width, height) = dom::viewport();
    let pointer = Origin::from_pointer(f64::from(e.client_x()), f64::from(e.client_y()), width, height);

    let result = state::with_mut(|s| {
        let title = id.resolve(s.tracker.active_catalog())?.title.clone();
        Some(s.tracker.toggle_topic(&title, pointer))
    })
    .flatten();

    if let Some(Err(err)) = result {
        gloo_console::error!(err.to_string());
    }
    render::refresh(els);
}

/// Fade out, rebuild the whole dashboard for `mode`, fade back in.
fn switch_mode(els: &Elements, mode: Mode) {
    match state::with_mut(|s| s.tracker.set_mode(mode)) {
        Some(Ok(true)) => {}
        Some(Err(err)) => {
            gloo_console::error!(err.to_string());
            return;
        }
        _ => return,
    }

    let style = els.body.style();
    let _ = style.set_property("opacity", "0");
    let els2 = els.clone();
    Timeout::new(FADE_MS, move || {
        render::init_dashboard(&els2);
        let _ = els2.body.style().set_property("opacity", "1");
    })
    .forget();
}
