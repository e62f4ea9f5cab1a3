//! Player kinematics
//!
//! Stances: running on the ground, airborne after a jump, or sliding. The
//! slide ends from a deferred timer (see `timers`), not from frame counting.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lane::Lane;
use crate::tuning::Tuning;

/// Result of a slide-or-drop command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOrDrop {
    /// Airborne: gravity switched to fast-drop for the rest of the fall
    FastDrop,
    /// Grounded: slide started, caller must schedule its end
    Slide,
    Ignored,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// World position (x lateral, y height, z longitudinal)
    pub pos: Vec3,
    /// Discrete target lane; collision uses this, not `pos.x`
    pub lane: Lane,
    pub vel_y: f32,
    pub airborne: bool,
    pub sliding: bool,
    pub fast_drop: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            lane: Lane::Center,
            vel_y: 0.0,
            airborne: false,
            sliding: false,
            fast_drop: false,
        }
    }
}

impl Player {
    /// Shift one lane left. Returns true if the lane changed.
    pub fn move_left(&mut self) -> bool {
        let next = self.lane.left();
        let changed = next != self.lane;
        self.lane = next;
        changed
    }

    /// Shift one lane right. Returns true if the lane changed.
    pub fn move_right(&mut self) -> bool {
        let next = self.lane.right();
        let changed = next != self.lane;
        self.lane = next;
        changed
    }

    /// Jump with the given impulse (only from the ground and not mid-slide)
    pub fn try_jump(&mut self, impulse: f32) -> bool {
        if self.airborne || self.sliding {
            return false;
        }
        self.vel_y = impulse;
        self.airborne = true;
        true
    }

    pub fn slide_or_drop(&mut self) -> SlideOrDrop {
        if self.airborne {
            self.fast_drop = true;
            SlideOrDrop::FastDrop
        } else if !self.sliding {
            self.sliding = true;
            SlideOrDrop::Slide
        } else {
            SlideOrDrop::Ignored
        }
    }

    pub fn end_slide(&mut self) {
        self.sliding = false;
    }

    /// Advance one frame. Returns true when the player lands this frame.
    pub fn integrate(&mut self, dt: f32, speed: f32, tuning: &Tuning) -> bool {
        self.pos.z -= speed * dt;

        // Critically damped approach to the lane centre
        let target_x = self.lane.world_x(tuning.lane_width);
        let blend = 1.0 - (-tuning.lateral_response * dt).exp();
        self.pos.x += (target_x - self.pos.x) * blend;

        let gravity = if self.airborne && self.fast_drop {
            tuning.fast_drop_gravity
        } else {
            tuning.gravity
        };

        let new_y = self.pos.y + self.vel_y * dt;
        let new_vel = self.vel_y + gravity * dt;

        // Only a falling player lands
        if self.vel_y <= 0.0 && new_y <= 0.0 {
            let landed = self.airborne;
            self.pos.y = 0.0;
            self.vel_y = 0.0;
            self.airborne = false;
            self.fast_drop = false;
            landed
        } else {
            self.pos.y = new_y;
            self.vel_y = new_vel;
            false
        }
    }

    /// Distance run from the origin
    pub fn distance(&self) -> f32 {
        -self.pos.z
    }

    /// Body lean while changing lanes (presentation hint)
    pub fn tilt(&self, lane_width: f32) -> f32 {
        (self.pos.x - self.lane.world_x(lane_width)) * 0.15
    }
}
