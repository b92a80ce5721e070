use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use st_types::{Catalog, DetailStore, Mode};
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

/// One of the three static documents the tracker is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    JavaCatalog,
    DbCatalog,
    Details,
}

impl Resource {
    /// Path relative to the site root.
    pub fn path(self) -> &'static str {
        match self {
            Resource::JavaCatalog => "data/java.json",
            Resource::DbCatalog => "data/db.json",
            Resource::Details => "data/details.json",
        }
    }

    pub fn catalog_for(mode: Mode) -> Self {
        match mode {
            Mode::Java => Resource::JavaCatalog,
            Mode::Db => Resource::DbCatalog,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where the raw documents come from (browser fetch, filesystem, memory).
#[async_trait(?Send)]
pub trait ContentSource {
    async fn fetch_text(&self, resource: Resource) -> Result<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch {resource}: {cause:#}")]
    Fetch {
        resource: Resource,
        cause: anyhow::Error,
    },
    #[error("failed to parse {resource}: {source}")]
    Parse {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn resource(&self) -> Resource {
        match self {
            LoadError::Fetch { resource, .. } | LoadError::Parse { resource, .. } => *resource,
        }
    }
}

/// Both catalogs plus the shared notes lookup. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    java: Catalog,
    db: Catalog,
    details: DetailStore,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogSummary {
    pub sections: usize,
    pub topics: usize,
    pub duplicate_titles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContentSummary {
    pub java: CatalogSummary,
    pub db: CatalogSummary,
    pub details: usize,
}

impl ContentStore {
    pub fn new(java: Catalog, db: Catalog, details: DetailStore) -> Self {
        Self { java, db, details }
    }

    pub fn catalog(&self, mode: Mode) -> &Catalog {
        match mode {
            Mode::Java => &self.java,
            Mode::Db => &self.db,
        }
    }

    pub fn details(&self) -> &DetailStore {
        &self.details
    }

    /// Titles that occur more than once in the catalog for `mode`. Such topics
    /// share one completion flag and one notes entry.
    pub fn duplicate_titles(&self, mode: Mode) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for topic in self.catalog(mode).topics() {
            *counts.entry(topic.title.as_str()).or_default() += 1;
        }
        let mut dups: Vec<String> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(title, _)| title.to_owned())
            .collect();
        dups.sort();
        dups
    }

    pub fn summary(&self) -> ContentSummary {
        let catalog_summary = |mode: Mode| {
            let catalog = self.catalog(mode);
            CatalogSummary {
                sections: catalog.len(),
                topics: catalog.topic_count(),
                duplicate_titles: self.duplicate_titles(mode),
            }
        };
        ContentSummary {
            java: catalog_summary(Mode::Java),
            db: catalog_summary(Mode::Db),
            details: self.details.len(),
        }
    }
}

/// Fetch all three documents concurrently, then parse. Any failure fails the
/// whole load.
pub async fn load<C>(source: &C) -> Result<ContentStore, LoadError>
where
    C: ContentSource + ?Sized,
{
    let (java_raw, db_raw, details_raw) = tokio::try_join!(
        fetch(source, Resource::JavaCatalog),
        fetch(source, Resource::DbCatalog),
        fetch(source, Resource::Details),
    )?;

    let store = ContentStore::new(
        parse(Resource::JavaCatalog, &java_raw)?,
        parse(Resource::DbCatalog, &db_raw)?,
        parse(Resource::Details, &details_raw)?,
    );

    for mode in Mode::ALL {
        let dups = store.duplicate_titles(mode);
        if !dups.is_empty() {
            warn!(
                "{} catalog has duplicate topic titles sharing one completion entry: {}",
                mode,
                dups.join(", ")
            );
        }
    }

    info!(
        java_topics = store.java.topic_count(),
        db_topics = store.db.topic_count(),
        details = store.details.len(),
        "content loaded"
    );

    Ok(store)
}

async fn fetch<C>(source: &C, resource: Resource) -> Result<String, LoadError>
where
    C: ContentSource + ?Sized,
{
    source
        .fetch_text(resource)
        .await
        .map_err(|cause| LoadError::Fetch { resource, cause })
}

fn parse<T: DeserializeOwned>(resource: Resource, raw: &str) -> Result<T, LoadError> {
    serde_json::from_str(raw).map_err(|source| LoadError::Parse { resource, source })
}

/// In-memory documents, keyed by resource.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<Resource, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: Resource, text: impl Into<String>) -> Self {
        self.documents.insert(resource, text.into());
        self
    }
}

#[async_trait(?Send)]
impl ContentSource for StaticSource {
    async fn fetch_text(&self, resource: Resource) -> Result<String> {
        self.documents
            .get(&resource)
            .cloned()
            .ok_or_else(|| anyhow!("{resource} not found"))
    }
}
