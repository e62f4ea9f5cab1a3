//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Track contents derived from segment index only
//! - Time supplied by the caller, never read from the platform
//! - Stable iteration order (arena order)
//! - No rendering, audio or platform dependencies

pub mod chase;
pub mod collision;
pub mod effects;
pub mod lane;
pub mod player;
pub mod state;
pub mod tick;
pub mod timers;
pub mod track;

pub use chase::{Chase, StumbleOutcome};
pub use collision::{Interaction, MagnetReach, classify, magnet_pull, magnet_reach};
pub use effects::{ActiveEffects, PowerUpKind};
pub use lane::Lane;
pub use player::{Player, SlideOrDrop};
pub use state::{EndCause, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{Command, TickInput, TimedCommand, apply_command, autopilot, tick};
pub use timers::{TimerTask, Timers};
pub use track::{
    ItemKind, ItemRef, ObstacleKind, Segment, Track, TrackItem, generate_segment, items_digest,
    segment_seed,
};
