//! Player/item interaction classification
//!
//! Pure functions: classification never mutates the item. The caller applies
//! the outcome (score, effects, pursuer escalation, game over).

use glam::Vec2;

use super::lane::Lane;
use super::track::{ItemKind, ObstacleKind, TrackItem};
use crate::consts::*;

/// Outcome of the player touching an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    None,
    /// Lethal hit
    Crash,
    /// Glancing hit, escalates the chase
    Stumble,
    /// Coin or power-up picked up
    Collect,
}

/// Classify the interaction between the player and one item
///
/// Lane matching uses the discrete lane, never the interpolated x position.
pub fn classify(player_z: f32, player_lane: Lane, player_y: f32, item: &TrackItem) -> Interaction {
    if item.collected {
        return Interaction::None;
    }

    let z_diff = (player_z - item.z).abs();
    let lane_match = player_lane == item.lane;

    match item.kind {
        ItemKind::Coin => {
            if z_diff < COLLECT_RADIUS && lane_match && player_y < COIN_MAX_HEIGHT {
                Interaction::Collect
            } else {
                Interaction::None
            }
        }
        ItemKind::PowerUp(_) => {
            if z_diff < COLLECT_RADIUS && lane_match {
                Interaction::Collect
            } else {
                Interaction::None
            }
        }
        ItemKind::Obstacle(kind) => {
            if z_diff >= OBSTACLE_WINDOW || !lane_match {
                return Interaction::None;
            }
            match kind {
                ObstacleKind::Train => Interaction::Crash,
                ObstacleKind::Barrier if player_y > BARRIER_CLEARANCE => Interaction::None,
                ObstacleKind::Barrier => Interaction::Crash,
                ObstacleKind::Signal => Interaction::Stumble,
                ObstacleKind::Block if player_y > OBSTACLE_SIZE => Interaction::None,
                ObstacleKind::Block => Interaction::Crash,
            }
        }
    }
}

/// How the magnet field affects a coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnetReach {
    OutOfRange,
    /// Ahead and in range: drift toward the player
    Attract,
    /// Ahead and close enough to collect
    Capture,
}

/// Magnet rule, independent of lane and height
///
/// Positions are (x, z) on the ground plane.
pub fn magnet_reach(player: Vec2, coin: Vec2, range: f32, capture_radius: f32) -> MagnetReach {
    let dist = player.distance(coin);
    if coin.y >= player.y {
        MagnetReach::OutOfRange
    } else if dist < capture_radius {
        MagnetReach::Capture
    } else if dist < range {
        MagnetReach::Attract
    } else {
        MagnetReach::OutOfRange
    }
}

/// Move a pulled coin toward the player
pub fn magnet_pull(coin: Vec2, player: Vec2, pull_rate: f32, dt: f32) -> Vec2 {
    coin.lerp(player, (pull_rate * dt).min(1.0))
}
