//! Pursuer state machine
//!
//! Idle until the runner stumbles. A stumble while idle starts a close chase
//! that clears itself after a delay; a stumble while chasing is a catch.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Result of a stumble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StumbleOutcome {
    /// Chase started; schedule a clear carrying `token`
    Chasing { token: u32 },
    /// Second stumble during a chase
    Caught,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chase {
    chasing: bool,
    /// Identifies the latest chase; older clear deadlines no longer match
    token: u32,
}

impl Chase {
    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    pub fn stumble(&mut self) -> StumbleOutcome {
        if self.chasing {
            StumbleOutcome::Caught
        } else {
            self.chasing = true;
            self.token = self.token.wrapping_add(1);
            StumbleOutcome::Chasing { token: self.token }
        }
    }

    /// Auto-clear. Returns true if the chase actually ended.
    pub fn clear(&mut self, token: u32) -> bool {
        if self.chasing && token == self.token {
            self.chasing = false;
            true
        } else {
            false
        }
    }

    /// Back to idle, superseding any pending clear
    pub fn reset(&mut self) {
        self.chasing = false;
        self.token = self.token.wrapping_add(1);
    }

    /// Distance the pursuer trails behind the runner
    pub fn follow_distance(&self, speed: f32, tuning: &Tuning) -> f32 {
        if self.chasing {
            tuning.chase_distance
        } else {
            tuning.follow_base_distance
                + (speed - tuning.speed_initial) * tuning.follow_distance_per_speed
        }
    }

    /// Follow distance, or None when the pursuer is too far back to draw
    pub fn visible_distance(&self, speed: f32, tuning: &Tuning) -> Option<f32> {
        let distance = self.follow_distance(speed, tuning);
        (distance < tuning.follow_visibility_cutoff).then_some(distance)
    }
}
