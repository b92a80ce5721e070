//! Global application state.
//!
//! Uses a `RefCell`-wrapped `thread_local!` singleton (WASM is
//! single-threaded). It is empty until the content has loaded; accessors
//! return `None` before that.

use crate::effects::ConfettiEffects;
use anyhow::{Result, anyhow};
use gloo_storage::{LocalStorage, Storage};
use st_core::{DetailModal, Tracker};
use st_storage::KeyValueStore;
use st_types::Theme;
use std::cell::RefCell;
use wasm_bindgen::JsValue;

pub type AppTracker = Tracker<LocalStore, ConfettiEffects>;

pub struct AppState {
    pub tracker: AppTracker,
    pub modal: DetailModal,
    pub theme: Theme,
}

// ── Thread-local singleton ──

thread_local! {
    static STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

pub fn install(state: AppState) {
    STATE.with(|s| *s.borrow_mut() = Some(state));
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| s.borrow().as_ref().map(f))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| s.borrow_mut().as_mut().map(f))
}

// ── localStorage ──

fn js_err(err: JsValue) -> anyhow::Error {
    anyhow!("localStorage error: {:?}", err)
}

/// `window.localStorage` as a [`KeyValueStore`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(js_err)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw().set_item(key, value).map_err(js_err)
    }
}
