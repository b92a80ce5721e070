use crate::effects::{Celebration, CelebrationTier, EffectsPort, Origin};
use crate::stats::{self, CatalogStats};
use st_content::ContentStore;
use st_storage::{KeyValueStore, TrackerStore};
use st_types::{Catalog, Mode, PersistedState, Section};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("section {index} out of range for {mode} catalog with {sections} sections")]
    TabOutOfRange {
        mode: Mode,
        index: usize,
        sections: usize,
    },
    #[error("unknown topic '{title}' in {mode} catalog")]
    UnknownTopic { mode: Mode, title: String },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Mode/state manager: both catalogs, both persisted states and the selector
/// between them, held in one place.
pub struct Tracker<S, E> {
    content: ContentStore,
    store: TrackerStore<S>,
    effects: E,
    mode: Mode,
    java: PersistedState,
    db: PersistedState,
    search: String,
}

impl<S, E> Tracker<S, E>
where
    S: KeyValueStore,
    E: EffectsPort,
{
    /// Restore mode and both states from `store`; anything missing starts at
    /// its default.
    pub fn new(content: ContentStore, store: S, effects: E) -> Self {
        let store = TrackerStore::new(store);
        let mode = store.load_mode();
        let java = store.load_state(Mode::Java);
        let db = store.load_state(Mode::Db);
        Self {
            content,
            store,
            effects,
            mode,
            java,
            db,
            search: String::new(),
        }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn store(&self) -> &TrackerStore<S> {
        &self.store
    }

    pub fn active_mode(&self) -> Mode {
        self.mode
    }

    pub fn active_catalog(&self) -> &Catalog {
        self.content.catalog(self.mode)
    }

    pub fn active_state(&self) -> &PersistedState {
        self.state_for(self.mode)
    }

    pub fn state_for(&self, mode: Mode) -> &PersistedState {
        match mode {
            Mode::Java => &self.java,
            Mode::Db => &self.db,
        }
    }

    fn active_state_mut(&mut self) -> &mut PersistedState {
        match self.mode {
            Mode::Java => &mut self.java,
            Mode::Db => &mut self.db,
        }
    }

    /// Section under the active tab, `None` if the stored index is stale.
    pub fn active_section(&self) -> Option<&Section> {
        self.active_catalog().section(self.active_state().active_tab)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn is_completed(&self, title: &str) -> bool {
        self.active_state().completed.contains(title)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::compute(self.active_catalog(), &self.active_state().completed)
    }

    pub fn global_percent(&self) -> u8 {
        stats::global_percent(self.active_catalog(), &self.active_state().completed)
    }

    /// Switch catalogs. Returns `false` without side effects when `mode` is
    /// already active; otherwise the caller must rebuild the whole dashboard.
    pub fn set_mode(&mut self, mode: Mode) -> Result<bool, TrackerError> {
        if mode == self.mode {
            return Ok(false);
        }
        self.store.save_mode(mode)?;
        self.mode = mode;
        self.search.clear();
        debug!("switched to {} catalog", mode);
        self.effects.mode_switched(mode);
        Ok(true)
    }

    /// Select a section of the active catalog. Clears the search term.
    pub fn set_active_tab(&mut self, index: usize) -> Result<(), TrackerError> {
        let sections = self.active_catalog().len();
        if index >= sections {
            return Err(TrackerError::TabOutOfRange {
                mode: self.mode,
                index,
                sections,
            });
        }
        self.active_state_mut().active_tab = index;
        self.search.clear();
        self.persist_active()
    }

    /// Flip `title` in the active completed set and return its previous value.
    pub fn toggle_completed(&mut self, title: &str) -> Result<bool, TrackerError> {
        if !self.active_catalog().topics().any(|t| t.title == title) {
            return Err(TrackerError::UnknownTopic {
                mode: self.mode,
                title: title.to_owned(),
            });
        }
        let was_completed = self.active_state_mut().completed.toggle(title);
        self.persist_active()?;
        debug!(completed = !was_completed, "toggled '{}'", title);
        Ok(was_completed)
    }

    /// Toggle `title` and, if it just became complete, fire the matching
    /// celebration. Un-marking never celebrates.
    pub fn toggle_topic(
        &mut self,
        title: &str,
        pointer: Origin,
    ) -> Result<Option<Celebration>, TrackerError> {
        if self.toggle_completed(title)? {
            return Ok(None);
        }
        let celebration = self.celebration_at(pointer);
        self.effects.celebrate(&celebration);
        Ok(Some(celebration))
    }

    fn celebration_at(&self, pointer: Origin) -> Celebration {
        let completed = &self.active_state().completed;
        let section_done = self
            .active_section()
            .is_some_and(|s| stats::section_complete(s, completed));
        Celebration {
            tier: CelebrationTier::evaluate(self.global_percent(), section_done),
            color: self.mode.accent_color(),
            origin: pointer,
        }
    }

    fn persist_active(&self) -> Result<(), TrackerError> {
        self.store.save_state(self.mode, self.active_state())?;
        Ok(())
    }
}
