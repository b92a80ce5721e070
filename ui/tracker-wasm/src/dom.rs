//! DOM element bindings.
//!
//! All static elements are resolved once at startup. Cards, nav entries and
//! modal blocks are re-created on every render and reached through event
//! delegation instead.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    gloo_utils::document()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn flip_class(el: &Element, cls: &str) {
    let _ = el.class_list().toggle(cls);
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn closest_target(event: &web_sys::Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()?
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn viewport() -> (f64, f64) {
    let w = window();
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// True while the user has text selected (a drag-select must not toggle a card).
pub fn has_text_selection() -> bool {
    window()
        .get_selection()
        .ok()
        .flatten()
        .map(|s| s.to_string().length() > 0)
        .unwrap_or(false)
}

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ── Elements struct ──

/// Static page elements. Clone-friendly (JS objects are reference-counted).
#[derive(Clone)]
pub struct Elements {
    // Layout
    pub body: HtmlElement,
    pub sidebar: Element,
    pub sidebar_toggle: HtmlElement,

    // Header
    pub header_title: Element,
    pub header_subtitle: Element,
    pub mastery_percent: Element,
    pub mastery_bar: HtmlElement,

    // Mode / theme
    pub brand_java: HtmlElement,
    pub brand_db: HtmlElement,
    pub theme_toggle: HtmlElement,

    // Navigation + content
    pub nav_container: Element,
    pub search_input: HtmlInputElement,
    pub content_area: Element,

    // Notes modal
    pub note_modal: Element,
    pub modal_title: Element,
    pub modal_body: HtmlElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after the document has loaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            body: doc()
                .body()
                .ok_or_else(|| JsValue::from_str("missing <body>"))?,
            sidebar: query("aside").ok_or_else(|| JsValue::from_str("missing <aside>"))?,
            sidebar_toggle: get_html!("sidebarToggle"),

            header_title: get_el!("headerTitle"),
            header_subtitle: get_el!("headerSubtitle"),
            mastery_percent: get_el!("masteryPercent"),
            mastery_bar: get_html!("masteryBar"),

            brand_java: get_html!("brand-java"),
            brand_db: get_html!("brand-db"),
            theme_toggle: get_html!("themeToggle"),

            nav_container: get_el!("navContainer"),
            search_input: get_input!("searchInput"),
            content_area: get_el!("contentArea"),

            note_modal: get_el!("noteModal"),
            modal_title: get_el!("modalTitle"),
            modal_body: get_html!("modalBody"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_attribute_quotes() {
        assert_eq!(
            escape(r#"Class "Loading" & 'Linking' <init>"#),
            "Class &quot;Loading&quot; &amp; &#39;Linking&#39; &lt;init&gt;"
        );
    }
}
