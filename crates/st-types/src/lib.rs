use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

// ── Mode ──

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    #[serde(rename = "JAVA")]
    Java,
    #[serde(rename = "DB")]
    Db,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Java, Mode::Db];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Java => "JAVA",
            Mode::Db => "DB",
        }
    }

    /// Accent used by celebrations and the mode badge.
    pub fn accent_color(self) -> &'static str {
        match self {
            Mode::Java => "#f97316",
            Mode::Db => "#0d9488",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Mode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JAVA" => Ok(Mode::Java),
            "DB" => Ok(Mode::Db),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

// ── Theme ──

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

// ── Catalog ──

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    #[default]
    None,
}

impl Priority {
    /// Anything other than `high`/`medium` falls back to `None`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::None,
        }
    }

    pub fn stars(self) -> u8 {
        match self {
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::None => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::None => "none",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTopic {
    Bare(String),
    Record {
        title: String,
        #[serde(default)]
        priority: Option<String>,
        #[serde(default)]
        note: Option<String>,
    },
}

/// A trackable item. On the wire it is either a bare title or a record; both
/// shapes end up here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawTopic")]
pub struct Topic {
    pub title: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Topic {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::None,
            note: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.is_empty() { None } else { Some(note) };
        self
    }
}

impl From<RawTopic> for Topic {
    fn from(raw: RawTopic) -> Self {
        match raw {
            RawTopic::Bare(title) => Topic::new(title),
            RawTopic::Record {
                title,
                priority,
                note,
            } => Topic {
                title,
                priority: priority
                    .as_deref()
                    .map(Priority::from_label)
                    .unwrap_or_default(),
                note: note.filter(|n| !n.is_empty()),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Section {
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.groups.iter().flat_map(|g| g.topics.iter())
    }

    pub fn topic_count(&self) -> usize {
        self.groups.iter().map(|g| g.topics.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog(pub Vec<Section>);

impl Catalog {
    pub fn sections(&self) -> &[Section] {
        &self.0
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.0.iter().flat_map(Section::topics)
    }

    pub fn topic_count(&self) -> usize {
        self.0.iter().map(Section::topic_count).sum()
    }
}

// ── Details ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text {
        content: String,
    },
    Code {
        content: String,
        #[serde(default)]
        language: String,
    },
    Gallery {
        #[serde(default)]
        urls: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicDetail {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DetailStore(pub HashMap<String, TopicDetail>);

impl DetailStore {
    /// Blocks for `title`, or `None` when there is nothing to show.
    pub fn blocks(&self, title: &str) -> Option<&[Block]> {
        self.0
            .get(title)
            .map(|d| d.blocks.as_slice())
            .filter(|blocks| !blocks.is_empty())
    }

    pub fn has_notes(&self, title: &str) -> bool {
        self.blocks(title).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Persisted state ──

/// Titles marked done. Stored as `{ "title": true }`; `false` entries are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedSet(BTreeSet<String>);

impl CompletedSet {
    pub fn contains(&self, title: &str) -> bool {
        self.0.contains(title)
    }

    /// Flip membership and return whether `title` was present before.
    pub fn toggle(&mut self, title: &str) -> bool {
        let was = self.0.remove(title);
        if !was {
            self.0.insert(title.to_owned());
        }
        was
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CompletedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Serialize for CompletedSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for title in &self.0 {
            map.serialize_entry(title, &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompletedSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(title, done)| done.then_some(title))
                .collect(),
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedState {
    #[serde(rename = "activeTab", default)]
    pub active_tab: usize,
    #[serde(default)]
    pub completed: CompletedSet,
}
