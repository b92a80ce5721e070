use crate::highlight;
use st_types::{Block, DetailStore};
use std::fmt;

pub const NO_NOTES_MESSAGE: &str = "No formatted notes available.";
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

/// Index of a block within one topic's notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub src: String,
    pub alt: &'static str,
    pub lazy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockView {
    /// Pre-formatted markup, emitted as-is.
    Text { html: String },
    Code {
        id: BlockId,
        language: String,
        highlighted: String,
        raw: String,
    },
    Gallery {
        images: Vec<ImageView>,
        caption: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    NoNotes,
    Blocks(Vec<BlockView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub body: ModalBody,
}

pub fn render_block(id: BlockId, block: &Block) -> BlockView {
    match block {
        Block::Text { content } => BlockView::Text {
            html: content.clone(),
        },
        Block::Code { content, language } => BlockView::Code {
            id,
            language: language.clone(),
            highlighted: highlight::highlight(content),
            raw: content.clone(),
        },
        Block::Gallery { urls, caption } => BlockView::Gallery {
            images: urls
                .iter()
                .map(|src| ImageView {
                    src: src.clone(),
                    alt: "Topic Diagram",
                    lazy: true,
                })
                .collect(),
            caption: caption.clone().filter(|c| !c.is_empty()),
        },
    }
}

pub fn render_modal(details: &DetailStore, title: &str) -> ModalView {
    let body = match details.blocks(title) {
        Some(blocks) => ModalBody::Blocks(
            blocks
                .iter()
                .enumerate()
                .map(|(idx, block)| render_block(BlockId(idx), block))
                .collect(),
        ),
        None => ModalBody::NoNotes,
    };
    ModalView {
        title: title.to_owned(),
        body,
    }
}

/// Raw text of a code block, unescaped and unhighlighted.
pub fn copy_text<'a>(details: &'a DetailStore, title: &str, block: BlockId) -> Option<&'a str> {
    match details.blocks(title)?.get(block.0)? {
        Block::Code { content, .. } => Some(content.as_str()),
        _ => None,
    }
}

/// What a dismiss click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTarget {
    Backdrop,
    CloseControl,
    Body,
}

#[derive(Debug, Default, Clone)]
pub struct DetailModal {
    open: Option<String>,
}

impl DetailModal {
    pub fn open(&mut self, details: &DetailStore, title: &str) -> ModalView {
        self.open = Some(title.to_owned());
        render_modal(details, title)
    }

    /// Clicks inside the body never dismiss. Returns whether the modal closed.
    pub fn close(&mut self, target: DismissTarget) -> bool {
        if target == DismissTarget::Body || self.open.is_none() {
            return false;
        }
        self.open = None;
        true
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn copy_text<'a>(&self, details: &'a DetailStore, block: BlockId) -> Option<&'a str> {
        copy_text(details, self.current()?, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_types::TopicDetail;
    use std::collections::HashMap;

    fn details() -> DetailStore {
        let mut map = HashMap::new();
        map.insert(
            "GC".to_owned(),
            TopicDetail {
                blocks: vec![
                    Block::Text {
                        content: "<p>Mark &amp; sweep</p>".to_owned(),
                    },
                    Block::Code {
                        content: "if (a < b) return \"done\";".to_owned(),
                        language: "java".to_owned(),
                    },
                    Block::Gallery {
                        urls: vec!["img/heap.png".to_owned(), "img/gen.png".to_owned()],
                        caption: Some(String::new()),
                    },
                ],
            },
        );
        map.insert("Empty".to_owned(), TopicDetail::default());
        DetailStore(map)
    }

    #[test]
    fn missing_or_empty_notes_show_the_fallback() {
        assert_eq!(render_modal(&details(), "Nope").body, ModalBody::NoNotes);
        assert_eq!(render_modal(&details(), "Empty").body, ModalBody::NoNotes);
    }

    #[test]
    fn blocks_render_in_order_by_kind() {
        let view = render_modal(&details(), "GC");
        let ModalBody::Blocks(blocks) = view.body else {
            panic!("expected blocks");
        };

        assert_eq!(
            blocks[0],
            BlockView::Text {
                html: "<p>Mark &amp; sweep</p>".to_owned()
            }
        );
        match &blocks[1] {
            BlockView::Code {
                id,
                language,
                highlighted,
                raw,
            } => {
                assert_eq!(id.to_string(), "code-1");
                assert_eq!(language, "java");
                assert!(highlighted.contains("a &lt; b"));
                assert!(highlighted.contains(r#"<span class="code-string">"done"</span>"#));
                assert_eq!(raw, "if (a < b) return \"done\";");
            }
            other => panic!("unexpected block {other:?}"),
        }
        match &blocks[2] {
            BlockView::Gallery { images, caption } => {
                assert_eq!(images.len(), 2);
                assert!(images.iter().all(|i| i.lazy));
                assert_eq!(images[1].src, "img/gen.png");
                assert_eq!(caption, &None);
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn copy_returns_raw_code_only() {
        let details = details();
        assert_eq!(copy_text(&details, "GC", BlockId(1)), Some("if (a < b) return \"done\";"));
        assert_eq!(copy_text(&details, "GC", BlockId(0)), None);
        assert_eq!(copy_text(&details, "GC", BlockId(9)), None);
    }

    #[test]
    fn only_backdrop_or_close_control_dismiss() {
        let details = details();
        let mut modal = DetailModal::default();
        assert!(!modal.close(DismissTarget::Backdrop));

        modal.open(&details, "GC");
        assert!(!modal.close(DismissTarget::Body));
        assert!(modal.is_open());
        assert_eq!(modal.copy_text(&details, BlockId(1)), Some("if (a < b) return \"done\";"));

        assert!(modal.close(DismissTarget::Backdrop));
        assert!(!modal.is_open());

        modal.open(&details, "Empty");
        assert!(modal.close(DismissTarget::CloseControl));
        assert_eq!(modal.copy_text(&details, BlockId(1)), None);
    }
}
