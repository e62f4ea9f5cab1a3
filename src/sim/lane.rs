//! The three discrete lanes of the track

use serde::{Deserialize, Serialize};

/// A lane, ordered left to right
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Signed lane offset (-1, 0, 1)
    #[inline]
    pub fn offset(self) -> i8 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    /// Lateral world position of the lane centre
    #[inline]
    pub fn world_x(self, lane_width: f32) -> f32 {
        self.offset() as f32 * lane_width
    }

    /// One lane to the left, stopping at the edge
    pub fn left(self) -> Self {
        match self {
            Lane::Right => Lane::Center,
            _ => Lane::Left,
        }
    }

    /// One lane to the right, stopping at the edge
    pub fn right(self) -> Self {
        match self {
            Lane::Left => Lane::Center,
            _ => Lane::Right,
        }
    }

    /// One lane to the right, wrapping from the rightmost lane to the leftmost
    pub fn wrapped_right(self) -> Self {
        match self {
            Lane::Left => Lane::Center,
            Lane::Center => Lane::Right,
            Lane::Right => Lane::Left,
        }
    }

    /// Map a uniform roll in [0, 1) onto a lane
    pub fn from_roll(roll: f32) -> Self {
        match (roll * 3.0).floor() as i32 {
            i32::MIN..=0 => Lane::Left,
            1 => Lane::Center,
            _ => Lane::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_and_world_x() {
        assert_eq!(Lane::Left.offset(), -1);
        assert_eq!(Lane::Center.offset(), 0);
        assert_eq!(Lane::Right.offset(), 1);
        assert_eq!(Lane::Right.world_x(2.5), 2.5);
        assert_eq!(Lane::Left.world_x(2.5), -2.5);
    }

    #[test]
    fn test_clamped_moves() {
        assert_eq!(Lane::Left.left(), Lane::Left);
        assert_eq!(Lane::Center.left(), Lane::Left);
        assert_eq!(Lane::Right.right(), Lane::Right);
        assert_eq!(Lane::Center.right(), Lane::Right);
    }

    #[test]
    fn test_wrapped_right_never_returns_same_lane() {
        for lane in Lane::ALL {
            assert_ne!(lane.wrapped_right(), lane);
        }
        assert_eq!(Lane::Right.wrapped_right(), Lane::Left);
    }

    #[test]
    fn test_from_roll() {
        assert_eq!(Lane::from_roll(0.0), Lane::Left);
        assert_eq!(Lane::from_roll(0.34), Lane::Center);
        assert_eq!(Lane::from_roll(0.99), Lane::Right);
    }
}
