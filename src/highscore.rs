//! Best score tracking
//!
//! A single integer, read once at startup and written at the end of every run.

use crate::persistence::ScoreStore;

/// Storage key for the best score
pub const STORAGE_KEY: &str = "neon-runner-highscore";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// Load from the store. Missing or unreadable values start at zero.
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.load(STORAGE_KEY) {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                Self { value }
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score ({}), starting at 0", e);
                Self::default()
            }
        }
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Fold a finished run in. Returns true on a new best.
    pub fn record(&mut self, score: u64) -> bool {
        let improved = self.qualifies(score);
        self.value = self.value.max(score);
        improved
    }

    /// Write the current value. Failures are logged, never fatal.
    pub fn save(&self, store: &mut impl ScoreStore) {
        match store.save(STORAGE_KEY, self.value) {
            Ok(()) => log::debug!("Best score {} saved", self.value),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<u64>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn save(&mut self, _key: &str, _value: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_load_defaults_to_zero() {
        assert_eq!(BestScore::load(&MemoryStore::new()).value, 0);
        assert_eq!(BestScore::load(&BrokenStore).value, 0);
    }

    #[test]
    fn test_record_keeps_max() {
        let mut best = BestScore { value: 100 };
        assert!(!best.record(80));
        assert_eq!(best.value, 100);
        assert!(best.record(150));
        assert_eq!(best.value, 150);
        assert!(!best.record(150));
    }

    #[test]
    fn test_save_round_trip_and_broken_store() {
        let mut store = MemoryStore::new();
        BestScore { value: 70 }.save(&mut store);
        assert_eq!(BestScore::load(&store).value, 70);

        // Does not panic
        BestScore { value: 70 }.save(&mut BrokenStore);
    }
}
