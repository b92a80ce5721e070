//! Declarative view model for the navigation list and the topic grid.
//!
//! The frontend replaces its DOM wholesale from these values after every
//! mutation; nothing here touches the page.

use crate::effects::EffectsPort;
use crate::stats;
use crate::tracker::Tracker;
use st_storage::KeyValueStore;
use st_types::{Catalog, DetailStore, Mode, PersistedState, Priority, Topic};
use std::fmt;
use std::str::FromStr;

/// Viewports at or below this width start with the navigation collapsed.
pub const NARROW_VIEWPORT_PX: f64 = 768.0;

pub fn collapse_nav_for(viewport_width: f64) -> bool {
    viewport_width <= NARROW_VIEWPORT_PX
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub index: usize,
    pub title: String,
    pub percent: u8,
    pub is_active: bool,
}

pub fn render_nav(catalog: &Catalog, state: &PersistedState) -> Vec<NavEntry> {
    catalog
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| NavEntry {
            index,
            title: section.title.clone(),
            percent: stats::section_percent(section, &state.completed),
            is_active: index == state.active_tab,
        })
        .collect()
}

/// Position of a topic in its catalog. Used as the dispatch key in place of
/// the title, which may contain any character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicId {
    pub section: usize,
    pub group: usize,
    pub topic: usize,
}

impl TopicId {
    pub fn resolve(self, catalog: &Catalog) -> Option<&Topic> {
        catalog
            .section(self.section)?
            .groups
            .get(self.group)?
            .topics
            .get(self.topic)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "topic-{}-{}-{}", self.section, self.group, self.topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTopicId(pub String);

impl fmt::Display for InvalidTopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid topic id '{}'", self.0)
    }
}

impl std::error::Error for InvalidTopicId {}

impl FromStr for TopicId {
    type Err = InvalidTopicId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTopicId(s.to_owned());
        let rest = s.strip_prefix("topic-").ok_or_else(invalid)?;
        let mut parts = rest.split('-').map(str::parse::<usize>);
        let mut next = || parts.next().and_then(Result::ok).ok_or_else(invalid);
        let id = TopicId {
            section: next()?,
            group: next()?,
            topic: next()?,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCard {
    pub id: TopicId,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub note: Option<String>,
    pub has_notes: bool,
}

impl TopicCard {
    /// Two for high priority, one for medium.
    pub fn stars(&self) -> u8 {
        self.priority.stars()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub name: String,
    pub topics: Vec<TopicCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    Groups(Vec<GroupView>),
    NoResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentView {
    pub title: String,
    pub subtitle: String,
    pub body: ContentBody,
}

/// Topic grid for the active section, filtered by `search`
/// (case-insensitive substring of the title). `None` when the active tab does
/// not name a section.
pub fn render_content(
    catalog: &Catalog,
    state: &PersistedState,
    details: &DetailStore,
    search: &str,
) -> Option<ContentView> {
    let section_idx = state.active_tab;
    let section = catalog.section(section_idx)?;
    let needle = search.to_lowercase();

    let groups: Vec<GroupView> = section
        .groups
        .iter()
        .enumerate()
        .filter_map(|(group_idx, group)| {
            let topics: Vec<TopicCard> = group
                .topics
                .iter()
                .enumerate()
                .filter(|(_, topic)| topic.title.to_lowercase().contains(&needle))
                .map(|(topic_idx, topic)| TopicCard {
                    id: TopicId {
                        section: section_idx,
                        group: group_idx,
                        topic: topic_idx,
                    },
                    title: topic.title.clone(),
                    completed: state.completed.contains(&topic.title),
                    priority: topic.priority,
                    note: topic.note.clone(),
                    has_notes: details.has_notes(&topic.title),
                })
                .collect();
            (!topics.is_empty()).then(|| GroupView {
                name: group.name.clone(),
                topics,
            })
        })
        .collect();

    let body = if groups.is_empty() {
        ContentBody::NoResults
    } else {
        ContentBody::Groups(groups)
    };

    Some(ContentView {
        title: section.title.clone(),
        subtitle: section.subtitle.clone(),
        body,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub mode: Mode,
    pub mastery: u8,
    pub nav: Vec<NavEntry>,
    pub content: Option<ContentView>,
}

pub fn render_dashboard<S, E>(tracker: &Tracker<S, E>) -> DashboardView
where
    S: KeyValueStore,
    E: EffectsPort,
{
    let catalog = tracker.active_catalog();
    let state = tracker.active_state();
    DashboardView {
        mode: tracker.active_mode(),
        mastery: tracker.global_percent(),
        nav: render_nav(catalog, state),
        content: render_content(catalog, state, tracker.content().details(), tracker.search()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_types::{Block, Group, Section, TopicDetail};

    fn catalog() -> Catalog {
        Catalog(vec![
            Section {
                title: "Core".to_owned(),
                subtitle: "The language".to_owned(),
                groups: vec![
                    Group {
                        name: "Memory".to_owned(),
                        topics: vec![
                            Topic::new("Garbage Collection")
                                .with_priority(Priority::High)
                                .with_note("G1 vs ZGC"),
                            Topic::new("Heap").with_priority(Priority::Medium),
                        ],
                    },
                    Group {
                        name: "Runtime".to_owned(),
                        topics: vec![Topic::new("JIT"), Topic::new("Class \"Loading\"")],
                    },
                ],
            },
            Section {
                title: "Concurrency".to_owned(),
                subtitle: String::new(),
                groups: vec![Group {
                    name: "Threads".to_owned(),
                    topics: vec![Topic::new("Virtual Threads")],
                }],
            },
        ])
    }

    fn details() -> DetailStore {
        let mut map = std::collections::HashMap::new();
        map.insert(
            "Heap".to_owned(),
            TopicDetail {
                blocks: vec![Block::Text {
                    content: "young/old".to_owned(),
                }],
            },
        );
        map.insert("JIT".to_owned(), TopicDetail::default());
        DetailStore(map)
    }

    fn cards(view: &ContentView) -> Vec<&TopicCard> {
        match &view.body {
            ContentBody::Groups(groups) => groups.iter().flat_map(|g| g.topics.iter()).collect(),
            ContentBody::NoResults => Vec::new(),
        }
    }

    #[test]
    fn nav_lists_every_section_with_progress() {
        let state = PersistedState {
            active_tab: 1,
            completed: ["Heap", "Virtual Threads"].into_iter().collect(),
        };

        let nav = render_nav(&catalog(), &state);
        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].percent, 25);
        assert!(!nav[0].is_active);
        assert_eq!(nav[1].percent, 100);
        assert!(nav[1].is_active);
    }

    #[test]
    fn content_exposes_card_attributes() {
        let state = PersistedState {
            active_tab: 0,
            completed: ["Heap"].into_iter().collect(),
        };

        let view = render_content(&catalog(), &state, &details(), "").unwrap();
        assert_eq!(view.title, "Core");
        assert_eq!(view.subtitle, "The language");

        let cards = cards(&view);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].stars(), 2);
        assert_eq!(cards[0].note.as_deref(), Some("G1 vs ZGC"));
        assert!(!cards[0].has_notes);
        assert!(cards[1].completed);
        assert_eq!(cards[1].stars(), 1);
        assert!(cards[1].has_notes);
        assert!(!cards[2].has_notes, "empty block list means no notes");
        assert_eq!(cards[3].id, TopicId { section: 0, group: 1, topic: 1 });
    }

    #[test]
    fn search_is_case_insensitive_and_drops_empty_groups() {
        let view = render_content(&catalog(), &PersistedState::default(), &details(), "hEAp").unwrap();

        let ContentBody::Groups(groups) = view.body else {
            panic!("expected matches");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Memory");
        assert_eq!(groups[0].topics.len(), 1);
        assert_eq!(groups[0].topics[0].title, "Heap");
    }

    #[test]
    fn search_never_crosses_sections() {
        let view = render_content(&catalog(), &PersistedState::default(), &details(), "virtual").unwrap();
        assert_eq!(view.body, ContentBody::NoResults);
    }

    #[test]
    fn stale_tab_renders_nothing() {
        let state = PersistedState {
            active_tab: 7,
            ..PersistedState::default()
        };
        assert!(render_content(&catalog(), &state, &details(), "").is_none());
        assert!(render_nav(&catalog(), &state).iter().all(|e| !e.is_active));
        assert!(render_content(&Catalog::default(), &PersistedState::default(), &details(), "").is_none());
    }

    #[test]
    fn topic_ids_round_trip_and_resolve() {
        let id = TopicId { section: 0, group: 1, topic: 1 };
        assert_eq!(id.to_string(), "topic-0-1-1");
        assert_eq!("topic-0-1-1".parse::<TopicId>(), Ok(id));
        assert_eq!(id.resolve(&catalog()).unwrap().title, "Class \"Loading\"");

        assert!("topic-0-1".parse::<TopicId>().is_err());
        assert!("topic-0-1-1-4".parse::<TopicId>().is_err());
        assert!("card-0-1-1".parse::<TopicId>().is_err());
        assert!(TopicId { section: 3, group: 0, topic: 0 }.resolve(&catalog()).is_none());
    }

    #[test]
    fn dashboard_follows_the_active_mode() -> anyhow::Result<()> {
        use crate::effects::NoEffects;
        use st_content::ContentStore;
        use st_storage::InMemoryStore;

        let db = Catalog(vec![Section {
            title: "SQL".to_owned(),
            subtitle: "Queries".to_owned(),
            groups: vec![Group {
                name: "Basics".to_owned(),
                topics: vec![Topic::new("JOIN"), Topic::new("INDEX"), Topic::new("VIEW")],
            }],
        }]);
        let content = ContentStore::new(catalog(), db, details());
        let mut tracker = Tracker::new(content, InMemoryStore::default(), NoEffects);

        tracker.toggle_completed("Heap")?;
        tracker.set_search("zzz");
        assert!(tracker.set_mode(Mode::Db)?);
        tracker.toggle_completed("JOIN")?;

        let view = render_dashboard(&tracker);
        assert_eq!(view.mode, Mode::Db);
        assert_eq!(view.mastery, 33);
        assert_eq!(view.mastery, tracker.global_percent());
        assert_eq!(view.nav.len(), 1);
        assert_eq!(view.nav[0].title, "SQL");
        assert_eq!(view.nav[0].percent, 33);
        let content = view.content.expect("active section");
        assert_eq!(content.title, "SQL");
        assert_eq!(cards(&content).len(), 3, "mode switch clears the search");

        tracker.set_mode(Mode::Java)?;
        let view = render_dashboard(&tracker);
        assert_eq!(view.mode, Mode::Java);
        assert_eq!(view.mastery, 20);
        assert_eq!(view.nav.len(), 2);
        assert_eq!(view.content.map(|c| c.title).as_deref(), Some("Core"));
        Ok(())
    }

    #[test]
    fn narrow_viewports_collapse_the_nav() {
        assert!(collapse_nav_for(768.0));
        assert!(collapse_nav_for(375.0));
        assert!(!collapse_nav_for(1024.0));
    }
}
