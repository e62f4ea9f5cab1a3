//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Keyboard mapping
//! - The browser-facing runner handle (wasm32)

use crate::Millis;
use crate::sim::Command;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Current wall-clock time in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> Millis {
    js_sys::Date::now()
}

/// Current wall-clock time in milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> Millis {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Map a keyboard key (DOM `KeyboardEvent.key` naming) to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
        "ArrowUp" | "w" | "W" | " " => Some(Command::Jump),
        "ArrowDown" | "s" | "S" => Some(Command::SlideOrDrop),
        _ => None,
    }
}
