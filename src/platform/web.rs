//! Browser-facing runner handle
//!
//! The page owns rendering, HUD and audio. It forwards key presses and
//! animation-frame timing here and reads back JSON snapshots and events.

use wasm_bindgen::prelude::*;

use super::{command_for_key, now_ms};
use crate::persistence::LocalStorageStore;
use crate::session::Session;
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebRunner {
    session: Session<LocalStorageStore>,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebRunner {
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Ignoring tuning: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };
        WebRunner {
            session: Session::open(LocalStorageStore, tuning),
            last_time: None,
        }
    }

    /// Start or restart a run
    pub fn start(&mut self) {
        self.last_time = None;
        self.session.restart(now_ms());
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.session.autopilot = enabled;
    }

    /// Forward a key press. Returns true if the key is bound.
    pub fn key(&mut self, key: &str) -> bool {
        match command_for_key(key) {
            Some(command) => {
                self.session.handle(command, now_ms());
                true
            }
            None => false,
        }
    }

    /// Advance one animation frame (`time` from requestAnimationFrame, ms).
    /// Returns the frame's events as JSON.
    pub fn frame(&mut self, time: f64) -> String {
        let dt = match self.last_time {
            Some(last) => ((time - last) / 1000.0).clamp(0.0, 0.1) as f32,
            None => 0.0,
        };
        self.last_time = Some(time);
        let events = self.session.frame(now_ms(), dt);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Current state as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot(now_ms())).unwrap_or_else(|_| "{}".to_string())
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Neon Runner core loaded");
}
