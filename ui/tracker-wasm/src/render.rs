//! DOM projection of the dashboard view model.
//!
//! Every mutation ends in [`refresh`], which replaces the navigation, the
//! topic grid and the mastery meter wholesale. Interpolated text is escaped;
//! handlers find their target through `data-*` attributes, never through
//! titles embedded in markup.

use crate::dom::{self, Elements};
use crate::state;
use crate::theme;
use st_core::render::{self, ContentBody, ContentView, NavEntry, TopicCard};
use std::fmt::Write;

pub fn nav_html(nav: &[NavEntry]) -> String {
    let mut html = String::new();
    for entry in nav {
        let _ = write!(
            html,
            r#"<div class="nav-item{}" data-section="{}"><span>{}</span><span class="progress-pill">{}%</span></div>"#,
            if entry.is_active { " active" } else { "" },
            entry.index,
            dom::escape(&entry.title),
            entry.percent,
        );
    }
    html
}

fn card_html(card: &TopicCard, html: &mut String) {
    let id = card.id.to_string();
    let stars = match card.stars() {
        2 => r#"<div class="star-badge high"><i class="fas fa-star"></i> <i class="fas fa-star"></i></div>"#,
        1 => r#"<div class="star-badge medium"><i class="fas fa-star"></i></div>"#,
        _ => "",
    };
    let actions = if card.has_notes {
        format!(
            r#"<div class="card-actions"><div class="btn-action" data-notes="{id}" title="Read Notes"><i class="fas fa-file-lines"></i></div></div>"#
        )
    } else {
        String::new()
    };
    let note = match &card.note {
        Some(note) => format!(
            r#"<div class="card-note-row"><div class="topic-note"><i class="fas fa-comment-dots"></i><span>{}</span></div></div>"#,
            dom::escape(note)
        ),
        None => String::new(),
    };

    let _ = write!(
        html,
        r#"<div id="{id}" class="topic-card{} prio-{}" data-topic="{id}">{stars}<div class="card-top-row"><div class="card-title-group"><div class="checkbox"></div><span class="topic-text">{}</span></div>{actions}</div>{note}</div>"#,
        if card.completed { " completed" } else { "" },
        card.priority.as_str(),
        dom::escape(&card.title),
    );
}

pub fn content_html(view: &ContentView) -> String {
    let groups = match &view.body {
        ContentBody::NoResults => {
            return r#"<div class="empty-state"><h3>No vibes found.</h3><p>Try searching for something else.</p></div>"#
                .to_owned();
        }
        ContentBody::Groups(groups) => groups,
    };

    let mut html = String::new();
    for group in groups {
        let _ = write!(
            html,
            r#"<div class="group-section"><div class="group-title">{}</div><div class="topic-grid">"#,
            dom::escape(&group.name)
        );
        for card in &group.topics {
            card_html(card, &mut html);
        }
        html.push_str("</div></div>");
    }
    html
}

fn paint_mastery(els: &Elements, mastery: u8) {
    dom::set_text(&els.mastery_percent, &format!("{mastery}%"));
    let _ = els
        .mastery_bar
        .style()
        .set_property("width", &format!("{mastery}%"));
}

fn paint_content(els: &Elements, content: Option<&ContentView>) {
    match content {
        Some(view) => {
            dom::set_text(&els.header_title, &view.title);
            dom::set_text(&els.header_subtitle, &view.subtitle);
            dom::set_inner_html(&els.content_area, &content_html(view));
        }
        None => dom::set_inner_html(&els.content_area, ""),
    }
}

/// Re-render navigation, grid and mastery from current state.
pub fn refresh(els: &Elements) {
    let Some(view) = state::with(|s| render::render_dashboard(&s.tracker)) else {
        return;
    };
    dom::set_inner_html(&els.nav_container, &nav_html(&view.nav));
    paint_content(els, view.content.as_ref());
    paint_mastery(els, view.mastery);
}

/// Re-render only the grid (live search).
pub fn refresh_content(els: &Elements) {
    let content = state::with(|s| {
        let t = &s.tracker;
        render::render_content(
            t.active_catalog(),
            t.active_state(),
            t.content().details(),
            t.search(),
        )
    });
    if let Some(content) = content {
        paint_content(els, content.as_ref());
    }
}

pub fn collapse_sidebar_if_narrow(els: &Elements) {
    let (width, _) = dom::viewport();
    if render::collapse_nav_for(width) {
        dom::add_class(&els.sidebar, "closed");
    }
}

/// Full dashboard (re)initialisation: mode chrome, responsive nav, render.
pub fn init_dashboard(els: &Elements) {
    let Some(mode) = state::with(|s| s.tracker.active_mode()) else {
        return;
    };
    theme::apply_mode(els, mode);
    collapse_sidebar_if_narrow(els);
    els.search_input.set_value("");
    refresh(els);
}
