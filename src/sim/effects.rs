//! Timed power-up effects
//!
//! Each effect stores an absolute expiry instant. Collecting the same
//! power-up again overwrites the expiry, it never adds to it.

use serde::{Deserialize, Serialize};

use crate::Millis;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Pulls nearby coins in and collects them
    Magnet,
    /// Higher jumps ("super sneakers")
    SpeedBoost,
}

/// Active power-up effects, keyed by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    magnet: Option<Millis>,
    speed_boost: Option<Millis>,
}

impl ActiveEffects {
    fn slot(&self, kind: PowerUpKind) -> Option<Millis> {
        match kind {
            PowerUpKind::Magnet => self.magnet,
            PowerUpKind::SpeedBoost => self.speed_boost,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut Option<Millis> {
        match kind {
            PowerUpKind::Magnet => &mut self.magnet,
            PowerUpKind::SpeedBoost => &mut self.speed_boost,
        }
    }

    /// Start (or refresh) an effect so it expires `duration_ms` after `now`
    pub fn activate(&mut self, kind: PowerUpKind, now: Millis, duration_ms: Millis) {
        *self.slot_mut(kind) = Some(now + duration_ms);
    }

    /// Expiry instant, if the effect was ever activated
    pub fn expiry(&self, kind: PowerUpKind) -> Option<Millis> {
        self.slot(kind)
    }

    pub fn is_active(&self, kind: PowerUpKind, now: Millis) -> bool {
        self.slot(kind).is_some_and(|expiry| expiry > now)
    }

    /// Whole seconds left, rounded up (0 when inactive)
    pub fn remaining_secs(&self, kind: PowerUpKind, now: Millis) -> u32 {
        match self.slot(kind) {
            Some(expiry) if expiry > now => ((expiry - now) / 1000.0).ceil() as u32,
            _ => 0,
        }
    }

    /// Drop expired entries
    pub fn prune(&mut self, now: Millis) {
        for kind in [PowerUpKind::Magnet, PowerUpKind::SpeedBoost] {
            let slot = self.slot_mut(kind);
            if slot.is_some_and(|expiry| expiry <= now) {
                *slot = None;
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_and_expiry() {
        let mut effects = ActiveEffects::default();
        assert!(!effects.is_active(PowerUpKind::Magnet, 0.0));

        effects.activate(PowerUpKind::Magnet, 1_000.0, 10_000.0);
        assert!(effects.is_active(PowerUpKind::Magnet, 1_000.0));
        assert!(effects.is_active(PowerUpKind::Magnet, 10_999.0));
        // Expiry instant itself is no longer active
        assert!(!effects.is_active(PowerUpKind::Magnet, 11_000.0));
        assert!(!effects.is_active(PowerUpKind::SpeedBoost, 1_000.0));
    }

    #[test]
    fn test_refresh_does_not_stack() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::SpeedBoost, 0.0, 10_000.0);
        effects.activate(PowerUpKind::SpeedBoost, 4_000.0, 10_000.0);
        assert_eq!(effects.expiry(PowerUpKind::SpeedBoost), Some(14_000.0));
    }

    #[test]
    fn test_remaining_secs_rounds_up() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Magnet, 0.0, 10_000.0);
        assert_eq!(effects.remaining_secs(PowerUpKind::Magnet, 0.0), 10);
        assert_eq!(effects.remaining_secs(PowerUpKind::Magnet, 9_001.0), 1);
        assert_eq!(effects.remaining_secs(PowerUpKind::Magnet, 10_000.0), 0);
        assert_eq!(effects.remaining_secs(PowerUpKind::Magnet, 50_000.0), 0);
    }

    #[test]
    fn test_prune() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Magnet, 0.0, 1_000.0);
        effects.activate(PowerUpKind::SpeedBoost, 0.0, 5_000.0);
        effects.prune(2_000.0);
        assert_eq!(effects.expiry(PowerUpKind::Magnet), None);
        assert_eq!(effects.expiry(PowerUpKind::SpeedBoost), Some(5_000.0));
    }
}
