//! Notes modal: DOM rendering, dismissal and copy-to-clipboard.

use crate::dom::{self, Elements};
use crate::state;
use st_core::modal::{self, BlockView, ModalBody, ModalView};
use st_core::render::TopicId;
use st_core::{BlockId, DismissTarget};
use std::fmt::Write;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    fn clipboard_write_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

pub fn modal_html(view: &ModalView) -> String {
    let blocks = match &view.body {
        ModalBody::NoNotes => {
            return format!(r#"<p class="modal-text">{}</p>"#, modal::NO_NOTES_MESSAGE);
        }
        ModalBody::Blocks(blocks) => blocks,
    };

    let mut html = String::new();
    for block in blocks {
        match block {
            BlockView::Text { html: content } => {
                let _ = write!(html, r#"<div class="modal-text">{content}</div>"#);
            }
            BlockView::Code {
                id,
                language,
                highlighted,
                ..
            } => {
                let _ = write!(
                    html,
                    r#"<div class="gemini-code-container"><div class="code-header"><span class="code-lang">{}</span><button class="copy-btn" data-copy="{}"><i class="fas fa-copy"></i> Copy code</button></div><div class="code-scroll"><pre class="code-content" id="{id}">{highlighted}</pre></div></div>"#,
                    dom::escape(language),
                    id.0,
                );
            }
            BlockView::Gallery { images, caption } => {
                html.push_str(r#"<div class="modal-images">"#);
                for image in images {
                    let _ = write!(
                        html,
                        r#"<img src="{}" class="modal-img" alt="{}"{}>"#,
                        dom::escape(&image.src),
                        image.alt,
                        if image.lazy { r#" loading="lazy""# } else { "" },
                    );
                }
                if let Some(caption) = caption {
                    let _ = write!(
                        html,
                        r#"<p class="modal-text modal-caption">{}</p>"#,
                        dom::escape(caption)
                    );
                }
                html.push_str("</div>");
            }
        }
    }
    html
}

/// Open the modal for the topic behind `id`.
pub fn open(els: &Elements, id: TopicId) {
    let view = state::with_mut(|s| {
        let title = id.resolve(s.tracker.active_catalog())?.title.clone();
        Some(s.modal.open(s.tracker.content().details(), &title))
    })
    .flatten();
    let Some(view) = view else {
        return;
    };

    dom::set_text(&els.modal_title, &view.title);
    dom::set_inner_html(&els.modal_body, &modal_html(&view));
    dom::add_class(&els.note_modal, "active");
    els.modal_body.set_scroll_top(0);
}

/// Close if the click landed on the backdrop or a close control.
pub fn on_modal_click(els: &Elements, event: &web_sys::Event) {
    let backdrop: &web_sys::EventTarget = els.note_modal.as_ref();
    let on_backdrop = event.target().is_some_and(|t| &t == backdrop);
    let target = if on_backdrop {
        DismissTarget::Backdrop
    } else if dom::closest_target(event, ".modal-close").is_some() {
        DismissTarget::CloseControl
    } else {
        DismissTarget::Body
    };

    if state::with_mut(|s| s.modal.close(target)) == Some(true) {
        dom::remove_class(&els.note_modal, "active");
    }
}

/// Copy the raw text of code block `block` and confirm to the user.
pub fn copy_block(block: BlockId) {
    let text = state::with(|s| {
        s.modal
            .copy_text(s.tracker.content().details(), block)
            .map(str::to_owned)
    })
    .flatten();
    let Some(text) = text else {
        return;
    };

    let promise = match clipboard_write_text(&text) {
        Ok(p) => p,
        Err(err) => {
            gloo_console::error!("clipboard unavailable:", err);
            return;
        }
    };
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => {
                let _ = dom::window().alert_with_message(modal::COPIED_MESSAGE);
            }
            Err(err) => gloo_console::error!("copy failed:", err),
        }
    });
}
