//! Neon Runner - An endless three-lane runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track generation, physics, collisions, session state)
//! - `session`: Session controller wiring the simulation to a best-score store
//! - `tuning`: Data-driven game balance
//! - `persistence`: Best-score key-value stores
//! - `platform`: Browser/native platform abstraction

pub mod highscore;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscore::BestScore;
pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Wall-clock instant in milliseconds (same scale as `Date.now()`)
pub type Millis = f64;

/// Game configuration constants
pub mod consts {
    /// Lateral distance between lane centres
    pub const LANE_WIDTH: f32 = 2.5;

    /// Forward speed (units/s)
    pub const PLAYER_SPEED_INITIAL: f32 = 12.0;
    pub const PLAYER_SPEED_MAX: f32 = 35.0;
    /// Speed gained at every checkpoint
    pub const SPEED_INCREMENT: f32 = 0.5;
    /// Distance between speed checkpoints
    pub const SPEED_CHECKPOINT: f32 = 100.0;

    /// Vertical motion
    pub const JUMP_FORCE: f32 = 12.0;
    /// Jump impulse while the speed boost is active
    pub const JUMP_FORCE_BOOSTED: f32 = 18.0;
    pub const GRAVITY: f32 = -35.0;
    /// Gravity after a fast-drop request in the air
    pub const FAST_DROP_GRAVITY: f32 = -100.0;
    /// Lateral smoothing rate toward the target lane (1/s)
    pub const LATERAL_RESPONSE: f32 = 12.0;

    /// Track layout
    pub const SEGMENT_LENGTH: f32 = 20.0;
    /// Segments kept ahead of the player
    pub const VISIBLE_SEGMENTS: u32 = 12;
    /// Segments kept behind the player before culling
    pub const TRAILING_SEGMENTS: u32 = 2;
    /// Segments at the start of the run that never hold items
    pub const WARMUP_SEGMENTS: u32 = 2;
    /// Segment-level pruning margin for collision checks
    pub const SEGMENT_PROXIMITY: f32 = 10.0;

    /// Item geometry
    pub const OBSTACLE_SIZE: f32 = 1.8;
    pub const COLLECT_RADIUS: f32 = 1.5;
    pub const OBSTACLE_WINDOW: f32 = 1.0;
    /// Coins above this height are jumped over
    pub const COIN_MAX_HEIGHT: f32 = 2.0;
    /// Height that clears a barrier
    pub const BARRIER_CLEARANCE: f32 = 0.8;

    /// Magnet field
    pub const MAGNET_RANGE: f32 = 10.0;
    pub const MAGNET_CAPTURE_RADIUS: f32 = 3.0;
    /// Coin pull rate toward the player (1/s)
    pub const MAGNET_PULL_RATE: f32 = 5.0;

    /// Timed effects (ms)
    pub const POWERUP_DURATION_MS: f64 = 10_000.0;
    pub const SLIDE_DURATION_MS: f64 = 800.0;
    pub const CHASE_CLEAR_MS: f64 = 5_000.0;

    /// Points per coin
    pub const COIN_VALUE: u64 = 10;

    /// Pursuer follow distances
    pub const CHASE_DISTANCE: f32 = 2.5;
    pub const FOLLOW_BASE_DISTANCE: f32 = 3.0;
    pub const FOLLOW_DISTANCE_PER_SPEED: f32 = 2.0;
    /// Pursuer is not drawn at or beyond this distance
    pub const FOLLOW_VISIBILITY_CUTOFF: f32 = 12.0;
}

/// Index of the segment containing longitudinal position `z` (clamped at 0)
#[inline]
pub fn segment_index_at(z: f32) -> u32 {
    let index = (-z / consts::SEGMENT_LENGTH).floor();
    if index <= 0.0 { 0 } else { index as u32 }
}

/// Longitudinal start of a segment (the edge nearest the origin)
#[inline]
pub fn segment_start_z(index: u32) -> f32 {
    -(index as f32) * consts::SEGMENT_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_index_at() {
        assert_eq!(segment_index_at(0.0), 0);
        assert_eq!(segment_index_at(5.0), 0);
        assert_eq!(segment_index_at(-19.9), 0);
        assert_eq!(segment_index_at(-20.0), 1);
        assert_eq!(segment_index_at(-105.0), 5);
    }

    #[test]
    fn test_segment_start_z() {
        assert_eq!(segment_start_z(0), 0.0);
        assert_eq!(segment_start_z(5), -100.0);
    }
}
