//! Celebration port.
//!
//! The core decides *which* celebration applies; an [`EffectsPort`]
//! implementation decides what it looks like.

use st_types::Mode;
use std::rc::Rc;

/// A point on screen as fractions of the viewport, `0.0..=1.0` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    pub const CENTER: Origin = Origin { x: 0.5, y: 0.5 };

    /// Normalize a pointer position against the viewport size.
    pub fn from_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::CENTER;
        }
        Self {
            x: (client_x / width).clamp(0.0, 1.0),
            y: (client_y / height).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationTier {
    /// Whole catalog done.
    Extreme,
    /// Active section done.
    SectionComplete,
    Small,
}

impl CelebrationTier {
    /// Highest tier wins: global completion, then section completion.
    pub fn evaluate(global_percent: u8, section_complete: bool) -> Self {
        if global_percent == 100 {
            CelebrationTier::Extreme
        } else if section_complete {
            CelebrationTier::SectionComplete
        } else {
            CelebrationTier::Small
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    pub tier: CelebrationTier,
    pub color: &'static str,
    /// Pointer position of the triggering click. Only `Small` is anchored to it.
    pub origin: Origin,
}

pub trait EffectsPort {
    fn celebrate(&self, celebration: &Celebration);
    fn mode_switched(&self, mode: Mode);
}

impl<T: EffectsPort + ?Sized> EffectsPort for &T {
    fn celebrate(&self, celebration: &Celebration) {
        (**self).celebrate(celebration)
    }

    fn mode_switched(&self, mode: Mode) {
        (**self).mode_switched(mode)
    }
}

impl<T: EffectsPort + ?Sized> EffectsPort for Rc<T> {
    fn celebrate(&self, celebration: &Celebration) {
        (**self).celebrate(celebration)
    }

    fn mode_switched(&self, mode: Mode) {
        (**self).mode_switched(mode)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl EffectsPort for NoEffects {
    fn celebrate(&self, _celebration: &Celebration) {}

    fn mode_switched(&self, _mode: Mode) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_completion_outranks_section_completion() {
        assert_eq!(CelebrationTier::evaluate(100, true), CelebrationTier::Extreme);
        assert_eq!(CelebrationTier::evaluate(100, false), CelebrationTier::Extreme);
        assert_eq!(CelebrationTier::evaluate(60, true), CelebrationTier::SectionComplete);
        assert_eq!(CelebrationTier::evaluate(99, false), CelebrationTier::Small);
    }

    #[test]
    fn pointer_is_normalized_to_the_viewport() {
        let origin = Origin::from_pointer(200.0, 150.0, 800.0, 600.0);
        assert_eq!(origin, Origin { x: 0.25, y: 0.25 });
        assert_eq!(Origin::from_pointer(10.0, 10.0, 0.0, 600.0), Origin::CENTER);
        assert_eq!(Origin::from_pointer(900.0, -5.0, 800.0, 600.0), Origin { x: 1.0, y: 0.0 });
    }
}
