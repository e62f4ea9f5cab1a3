//! Deferred timers outside the frame tick
//!
//! Tasks carry the epoch they were scheduled in. Starting, restarting or
//! ending a run bumps the epoch; older tasks are discarded when they come due
//! instead of being cancelled up front.

use serde::{Deserialize, Serialize};

use crate::Millis;

/// Work to run when a timer comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    /// Slide duration elapsed
    EndSlide,
    /// Chase auto-clear; `token` must still match the chase
    ClearChase { token: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    due: Millis,
    epoch: u32,
    task: TimerTask,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    epoch: u32,
    pending: Vec<Scheduled>,
}

impl Timers {
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn schedule(&mut self, due: Millis, task: TimerTask) {
        self.pending.push(Scheduled {
            due,
            epoch: self.epoch,
            task,
        });
    }

    /// Make every outstanding task stale
    pub fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Remove tasks due at or before `now`, returning the live ones in due order
    pub fn take_due(&mut self, now: Millis) -> Vec<TimerTask> {
        let mut due = Vec::new();
        self.pending.retain(|s| {
            if s.due <= now {
                due.push(s.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due.total_cmp(&b.due));

        let epoch = self.epoch;
        due.into_iter()
            .filter(|s| {
                let live = s.epoch == epoch;
                if !live {
                    log::trace!("Dropping stale {:?} from epoch {}", s.task, s.epoch);
                }
                live
            })
            .map(|s| s.task)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_in_due_order() {
        let mut timers = Timers::default();
        timers.schedule(500.0, TimerTask::ClearChase { token: 1 });
        timers.schedule(200.0, TimerTask::EndSlide);
        timers.schedule(900.0, TimerTask::EndSlide);

        assert!(timers.take_due(100.0).is_empty());
        assert_eq!(
            timers.take_due(600.0),
            vec![TimerTask::EndSlide, TimerTask::ClearChase { token: 1 }]
        );
        assert_eq!(timers.pending_len(), 1);
        assert_eq!(timers.take_due(900.0), vec![TimerTask::EndSlide]);
        assert_eq!(timers.pending_len(), 0);
    }

    #[test]
    fn test_invalidated_tasks_are_dropped() {
        let mut timers = Timers::default();
        timers.schedule(100.0, TimerTask::EndSlide);
        timers.invalidate();
        timers.schedule(150.0, TimerTask::ClearChase { token: 7 });

        assert_eq!(timers.take_due(1_000.0), vec![TimerTask::ClearChase { token: 7 }]);
        assert_eq!(timers.pending_len(), 0);
    }
}
