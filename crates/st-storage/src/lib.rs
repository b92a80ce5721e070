use anyhow::{Context, Result, anyhow};
use st_types::{Mode, PersistedState, Theme};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Durable string key-value storage. Writes are synchronous and complete
/// before returning.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| anyhow!("in-memory store lock poisoned"))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Tracker persistence on top of a [`KeyValueStore`]. Each mode's state lives
/// under its own key so the two catalogs never share completion data.
pub struct TrackerStore<S> {
    inner: S,
}

impl<S: KeyValueStore> TrackerStore<S> {
    pub const MODE_KEY: &'static str = "app_mode";
    pub const THEME_KEY: &'static str = "app_theme";

    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn key_for_state(mode: Mode) -> &'static str {
        match mode {
            Mode::Java => "java_master_state",
            Mode::Db => "db_master_state",
        }
    }

    /// Stored mode, or `JAVA` when absent or unreadable.
    pub fn load_mode(&self) -> Mode {
        match self.inner.get(Self::MODE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
                warn!("ignoring stored mode: {}", err);
                Mode::default()
            }),
            Ok(None) => Mode::default(),
            Err(err) => {
                warn!("failed to read stored mode: {}", err);
                Mode::default()
            }
        }
    }

    pub fn save_mode(&self, mode: Mode) -> Result<()> {
        self.inner
            .set(Self::MODE_KEY, mode.as_str())
            .context("failed to persist mode")
    }

    /// Stored state for `mode`; a missing or corrupt entry yields the default.
    pub fn load_state(&self, mode: Mode) -> PersistedState {
        let key = Self::key_for_state(mode);
        let raw = match self.inner.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedState::default(),
            Err(err) => {
                warn!("failed to read {}: {}", key, err);
                return PersistedState::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("discarding corrupt {}: {}", key, err);
            PersistedState::default()
        })
    }

    pub fn save_state(&self, mode: Mode, state: &PersistedState) -> Result<()> {
        let key = Self::key_for_state(mode);
        let value = serde_json::to_string(state)?;
        self.inner
            .set(key, &value)
            .with_context(|| format!("failed to persist {key}"))
    }

    pub fn load_theme(&self) -> Theme {
        match self.inner.get(Self::THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("failed to read stored theme: {}", err);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.inner
            .set(Self::THEME_KEY, theme.as_str())
            .context("failed to persist theme")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(anyhow!("storage disabled"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn state_round_trips_per_mode() -> Result<()> {
        let store = TrackerStore::new(InMemoryStore::default());
        let state = PersistedState {
            active_tab: 3,
            completed: ["GC", "JIT"].into_iter().collect(),
        };

        store.save_state(Mode::Java, &state)?;

        assert_eq!(store.load_state(Mode::Java), state);
        assert_eq!(store.load_state(Mode::Db), PersistedState::default());
        Ok(())
    }

    #[test]
    fn state_uses_legacy_key_layout() -> Result<()> {
        let backing = InMemoryStore::default();
        let store = TrackerStore::new(&backing);
        store.save_state(
            Mode::Db,
            &PersistedState {
                active_tab: 1,
                completed: ["Joins"].into_iter().collect(),
            },
        )?;
        store.save_mode(Mode::Db)?;

        assert_eq!(
            backing.get("db_master_state")?.as_deref(),
            Some(r#"{"activeTab":1,"completed":{"Joins":true}}"#)
        );
        assert_eq!(backing.get("app_mode")?.as_deref(), Some("DB"));
        Ok(())
    }

    #[test]
    fn corrupt_or_unknown_values_fall_back_to_defaults() {
        let store = TrackerStore::new(InMemoryStore::with_entries([
            ("java_master_state", "{not json"),
            ("db_master_state", r#"{"activeTab":-1,"completed":{}}"#),
            ("app_mode", "PYTHON"),
            ("app_theme", "sepia"),
        ]));

        assert_eq!(store.load_state(Mode::Java), PersistedState::default());
        assert_eq!(store.load_state(Mode::Db), PersistedState::default());
        assert_eq!(store.load_mode(), Mode::Java);
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn read_failures_default_and_write_failures_propagate() {
        let store = TrackerStore::new(FailingStore);

        assert_eq!(store.load_mode(), Mode::Java);
        assert_eq!(store.load_state(Mode::Db), PersistedState::default());

        let err = store.save_theme(Theme::Dark).unwrap_err();
        assert!(err.to_string().contains("theme"));
    }

    #[test]
    fn theme_round_trips() -> Result<()> {
        let backing = InMemoryStore::default();
        let store = TrackerStore::new(&backing);
        assert_eq!(store.load_theme(), Theme::Light);

        store.save_theme(Theme::Dark)?;

        assert_eq!(store.load_theme(), Theme::Dark);
        assert_eq!(backing.get("app_theme")?.as_deref(), Some("dark"));
        Ok(())
    }
}
