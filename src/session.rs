//! Session controller
//!
//! Owns the game state and the best-score store. Input commands are buffered
//! as they arrive and handed to the simulation on the next frame.

use crate::Millis;
use crate::highscore::BestScore;
use crate::persistence::ScoreStore;
use crate::sim::{Command, GameEvent, GameState, Snapshot, TickInput, TimedCommand, tick};
use crate::tuning::Tuning;

pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
    best: BestScore,
    pending: Vec<TimedCommand>,
    /// Demo mode
    pub autopilot: bool,
}

impl<S: ScoreStore> Session<S> {
    /// Open a session, reading the best score once
    pub fn open(store: S, tuning: Tuning) -> Self {
        let best = BestScore::load(&store);
        Self {
            state: GameState::new(tuning, best.value),
            store,
            best,
            pending: Vec::new(),
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn best(&self) -> u64 {
        self.best.value
    }

    pub fn start(&mut self, now: Millis) {
        self.pending.clear();
        self.state.start(now);
    }

    pub fn restart(&mut self, now: Millis) {
        self.pending.clear();
        self.state.restart(now);
    }

    /// Buffer a player command for the next frame
    pub fn handle(&mut self, command: Command, at: Millis) {
        if self.state.is_running() {
            self.pending.push(TimedCommand { command, at });
        }
    }

    /// Run one frame and return the events it produced
    pub fn frame(&mut self, now: Millis, dt: f32) -> Vec<GameEvent> {
        let input = TickInput {
            now,
            commands: std::mem::take(&mut self.pending),
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input, dt);

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver { score, .. } = event {
                if self.best.record(*score) {
                    log::info!("New best score: {}", score);
                }
                self.best.save(&mut self.store);
            }
        }
        events
    }

    pub fn snapshot(&self, now: Millis) -> Snapshot {
        self.state.snapshot(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::STORAGE_KEY;
    use crate::persistence::MemoryStore;
    use crate::sim::{EndCause, GamePhase, Lane};

    #[test]
    fn test_best_score_persisted_on_game_over() {
        let store = MemoryStore::with_value(STORAGE_KEY, 30);
        let mut session = Session::open(store, Tuning::default());
        assert_eq!(session.best(), 30);

        session.start(0.0);
        session.state.add_score(50);
        session.state.terminate(EndCause::Crash);
        let events = session.frame(16.0, 0.016);

        assert!(matches!(events.last(), Some(GameEvent::GameOver { new_best: true, .. })));
        assert_eq!(session.best(), 50);
        assert_eq!(session.store().load(STORAGE_KEY).unwrap(), Some(50));

        // Restart clears the score but keeps the best
        session.restart(1_000.0);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().best, 50);
        assert_eq!(session.snapshot(1_000.0).best, 50);
    }

    #[test]
    fn test_lower_score_keeps_previous_best() {
        let store = MemoryStore::with_value(STORAGE_KEY, 900);
        let mut session = Session::open(store, Tuning::default());
        session.start(0.0);
        session.state.add_score(20);
        session.state.terminate(EndCause::Caught);
        session.frame(16.0, 0.016);
        assert_eq!(session.best(), 900);
        assert_eq!(session.store().load(STORAGE_KEY).unwrap(), Some(900));
    }

    #[test]
    fn test_commands_are_buffered_until_frame() {
        let mut session = Session::open(MemoryStore::new(), Tuning::default());
        session.handle(Command::MoveLeft, 0.0);
        session.start(0.0);
        session.handle(Command::MoveRight, 5.0);
        assert_eq!(session.state().player.lane, Lane::Center);

        let events = session.frame(16.0, 0.016);
        assert_eq!(session.state().player.lane, Lane::Right);
        assert!(events.contains(&GameEvent::LaneChanged { lane: Lane::Right }));
    }

    #[test]
    fn test_autopilot_session_runs() {
        let mut session = Session::open(MemoryStore::new(), Tuning::default());
        session.autopilot = true;
        session.start(0.0);
        let dt = 1.0 / 60.0;
        let mut now = 0.0;
        for _ in 0..600 {
            now += 1000.0 / 60.0;
            session.frame(now, dt);
            if session.state().phase != GamePhase::Running {
                break;
            }
        }
        assert!(session.state().player.distance() > 0.0);
        assert!(session.state().speed >= session.state().tuning.speed_initial);
    }
}
