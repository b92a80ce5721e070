//! Confetti adapter for the celebration port.
//!
//! Calls the page's global `confetti(options)` function. If the library is
//! missing the bursts are skipped and a console warning is logged.

use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use st_core::{Celebration, CelebrationTier, EffectsPort, Origin};
use st_types::Mode;
use wasm_bindgen::prelude::*;

pub const FADE_MS: u32 = 250;

const SECTION_BURST_MS: f64 = 1_000.0;
const SECTION_FRAME_MS: u32 = 16;
const EXTREME_MS: f64 = 8_000.0;
const EXTREME_TICK_MS: u32 = 250;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = confetti, catch)]
    fn confetti_js(options: &JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Debug, Clone, Default, Serialize)]
struct Point {
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
}

impl From<Origin> for Point {
    fn from(o: Origin) -> Self {
        Point {
            x: Some(o.x),
            y: Some(o.y),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Burst {
    particle_count: f64,
    spread: f64,
    origin: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gravity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scalar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disable_for_reduced_motion: Option<bool>,
}

fn fire(burst: &Burst) {
    let options = match serde_wasm_bindgen::to_value(burst) {
        Ok(v) => v,
        Err(err) => {
            gloo_console::warn!("confetti options:", err.to_string());
            return;
        }
    };
    if let Err(err) = confetti_js(&options) {
        gloo_console::warn!("confetti unavailable:", err);
    }
}

fn random_in(min: f64, max: f64) -> f64 {
    js_sys::Math::random() * (max - min) + min
}

fn small(color: &str, origin: Origin) -> Burst {
    Burst {
        particle_count: 40.0,
        spread: 60.0,
        origin: origin.into(),
        colors: vec![color.to_owned(), "#ffffff".to_owned()],
        disable_for_reduced_motion: Some(true),
        gravity: Some(1.2),
        scalar: Some(0.7),
        ..Burst::default()
    }
}

fn side_cannon(color: &str, accent: &str, count: f64, spread: f64, left: bool, y: Option<f64>) -> Burst {
    Burst {
        particle_count: count,
        spread,
        angle: Some(if left { 60.0 } else { 120.0 }),
        origin: Point {
            x: Some(if left { 0.0 } else { 1.0 }),
            y,
        },
        colors: vec![color.to_owned(), accent.to_owned()],
        ..Burst::default()
    }
}

/// Two-sided bursts every animation frame for one second.
async fn section_complete(color: &'static str) {
    let end = js_sys::Date::now() + SECTION_BURST_MS;
    loop {
        fire(&side_cannon(color, "#22c55e", 5.0, 55.0, true, Some(0.8)));
        fire(&side_cannon(color, "#22c55e", 5.0, 55.0, false, Some(0.8)));
        if js_sys::Date::now() >= end {
            break;
        }
        TimeoutFuture::new(SECTION_FRAME_MS).await;
    }
}

/// Eight seconds of decaying random bursts from both sides plus side cannons.
async fn extreme(color: &'static str) {
    let end = js_sys::Date::now() + EXTREME_MS;
    loop {
        TimeoutFuture::new(EXTREME_TICK_MS).await;
        let time_left = end - js_sys::Date::now();
        if time_left <= 0.0 {
            break;
        }
        let particle_count = 50.0 * (time_left / EXTREME_MS);
        for (min, max) in [(0.1, 0.3), (0.7, 0.9)] {
            fire(&Burst {
                particle_count,
                spread: 360.0,
                start_velocity: Some(30.0),
                ticks: Some(60),
                z_index: Some(0),
                origin: Point {
                    x: Some(random_in(min, max)),
                    y: Some(js_sys::Math::random() - 0.2),
                },
                ..Burst::default()
            });
        }
        fire(&side_cannon(color, "#ffffff", 10.0, 80.0, true, None));
        fire(&side_cannon(color, "#ffffff", 10.0, 80.0, false, None));
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConfettiEffects;

impl EffectsPort for ConfettiEffects {
    fn celebrate(&self, celebration: &Celebration) {
        let color = celebration.color;
        match celebration.tier {
            CelebrationTier::Extreme => wasm_bindgen_futures::spawn_local(extreme(color)),
            CelebrationTier::SectionComplete => {
                wasm_bindgen_futures::spawn_local(section_complete(color))
            }
            CelebrationTier::Small => fire(&small(color, celebration.origin)),
        }
    }

    /// Lands as the dashboard fades back in.
    fn mode_switched(&self, mode: Mode) {
        let color = mode.accent_color();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(FADE_MS).await;
            fire(&Burst {
                particle_count: 60.0,
                spread: 70.0,
                origin: Origin { x: 0.1, y: 0.1 }.into(),
                colors: vec![color.to_owned()],
                ..Burst::default()
            });
        });
    }
}
