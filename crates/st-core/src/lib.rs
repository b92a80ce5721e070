//! Study tracker core: mode/state manager, completion stats, the render view
//! model, the notes modal and the celebration port. Platform-free; the browser
//! frontend and tests drive it through [`Tracker`].

pub mod effects;
pub mod highlight;
pub mod modal;
pub mod render;
pub mod stats;
pub mod tracker;

pub use effects::{Celebration, CelebrationTier, EffectsPort, NoEffects, Origin};
pub use modal::{BlockId, DetailModal, DismissTarget, ModalView};
pub use render::{DashboardView, TopicId, render_dashboard};
pub use stats::CatalogStats;
pub use tracker::{Tracker, TrackerError};
