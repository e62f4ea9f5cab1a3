//! Game state and core simulation types
//!
//! One owned context for a run: session status, score, speed, player, track,
//! effects, pursuer and pending timers. Nothing lives in globals.

use serde::{Deserialize, Serialize};

use super::chase::Chase;
use super::effects::{ActiveEffects, PowerUpKind};
use super::lane::Lane;
use super::player::Player;
use super::timers::Timers;
use super::track::{ItemRef, Track};
use crate::Millis;
use crate::tuning::Tuning;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first run
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run over
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Hit a lethal obstacle
    Crash,
    /// Stumbled again while being chased
    Caught,
}

/// Discrete gameplay events for sound/VFX consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    LaneChanged { lane: Lane },
    Jumped { boosted: bool },
    Slid,
    FastDrop,
    Landed,
    CoinCollected { item: ItemRef, magnet: bool },
    PowerUpCollected { kind: PowerUpKind },
    Stumbled,
    ChaseEnded,
    SpeedUp { speed: f32 },
    GameOver {
        cause: EndCause,
        score: u64,
        best: u64,
        new_best: bool,
    },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    /// Best score across sessions
    pub best: u64,
    pub speed: f32,
    /// Speed checkpoints already applied this run
    pub checkpoints: u32,
    /// Coins picked up this run
    pub coins: u32,
    pub player: Player,
    pub track: Track,
    pub effects: ActiveEffects,
    pub chase: Chase,
    pub timers: Timers,
    pub tuning: Tuning,
    /// Latest instant seen by the simulation
    pub now: Millis,
    /// Events not yet drained by the caller
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(tuning: Tuning, best: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            best,
            speed: tuning.speed_initial,
            checkpoints: 0,
            coins: 0,
            player: Player::default(),
            track: Track::new(),
            effects: ActiveEffects::default(),
            chase: Chase::default(),
            timers: Timers::default(),
            tuning,
            now: 0.0,
            events: Vec::new(),
        }
    }

    /// Begin a fresh run (also used for restart)
    pub fn start(&mut self, now: Millis) {
        self.timers.invalidate();
        self.phase = GamePhase::Running;
        self.score = 0;
        self.speed = self.tuning.speed_initial;
        self.checkpoints = 0;
        self.coins = 0;
        self.player = Player::default();
        self.track.reset();
        self.track.sync(self.player.pos.z);
        self.effects.clear();
        self.chase.reset();
        self.now = now;
        log::info!("Run started (best {})", self.best);
        self.events.push(GameEvent::Started);
    }

    pub fn restart(&mut self, now: Millis) {
        self.start(now);
    }

    /// End the run. No-op unless running.
    pub fn terminate(&mut self, cause: EndCause) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Ended;
        self.timers.invalidate();
        let new_best = self.score > self.best;
        self.best = self.best.max(self.score);
        log::info!(
            "Run ended by {:?}: score {}, best {}, distance {:.0}",
            cause,
            self.score,
            self.best,
            self.player.distance()
        );
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
            best: self.best,
            new_best,
        });
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn add_score(&mut self, amount: u64) {
        self.score += amount;
    }

    /// Apply every speed checkpoint crossed so far
    pub fn apply_checkpoints(&mut self) {
        let reached = (self.player.distance() / self.tuning.speed_checkpoint).floor() as u32;
        while self.checkpoints < reached {
            self.checkpoints += 1;
            let next = (self.speed + self.tuning.speed_increment).min(self.tuning.speed_max);
            if next > self.speed {
                self.speed = next;
                log::debug!("Checkpoint {}: speed {:.1}", self.checkpoints, self.speed);
                self.events.push(GameEvent::SpeedUp { speed: self.speed });
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for presentation
    pub fn snapshot(&self, now: Millis) -> Snapshot {
        let lane_width = self.tuning.lane_width;
        Snapshot {
            phase: self.phase,
            score: self.score,
            best: self.best,
            speed: self.speed,
            x: self.player.pos.x,
            y: self.player.pos.y,
            z: self.player.pos.z,
            lane: self.player.lane,
            airborne: self.player.airborne,
            sliding: self.player.sliding,
            tilt: self.player.tilt(lane_width),
            magnet_secs: self.effects.remaining_secs(PowerUpKind::Magnet, now),
            speed_boost_secs: self.effects.remaining_secs(PowerUpKind::SpeedBoost, now),
            chasing: self.chase.is_chasing(),
            follow_distance: self.chase.visible_distance(self.speed, &self.tuning),
        }
    }
}

/// State exposed to renderers, HUD and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub best: u64,
    pub speed: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub lane: Lane,
    pub airborne: bool,
    pub sliding: bool,
    pub tilt: f32,
    pub magnet_secs: u32,
    pub speed_boost_secs: u32,
    pub chasing: bool,
    /// Pursuer distance behind the runner; None when out of sight
    pub follow_distance: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_resets_run_but_keeps_best() {
        let mut state = GameState::new(Tuning::default(), 40);
        assert_eq!(state.phase, GamePhase::Idle);

        state.start(0.0);
        state.add_score(70);
        state.speed = 20.0;
        state.terminate(EndCause::Crash);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.best, 70);

        state.restart(1_000.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, state.tuning.speed_initial);
        assert_eq!(state.best, 70);
    }

    #[test]
    fn test_terminate_keeps_higher_previous_best() {
        let mut state = GameState::new(Tuning::default(), 500);
        state.start(0.0);
        state.add_score(30);
        state.drain_events();
        state.terminate(EndCause::Caught);
        assert_eq!(state.best, 500);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                cause: EndCause::Caught,
                score: 30,
                best: 500,
                new_best: false,
            }]
        );

        // Ending twice does nothing
        state.terminate(EndCause::Crash);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_checkpoints_raise_speed_up_to_max() {
        let mut state = GameState::new(Tuning::default(), 0);
        state.start(0.0);
        state.player.pos.z = -99.0;
        state.apply_checkpoints();
        assert_eq!(state.speed, 12.0);

        state.player.pos.z = -250.0;
        state.apply_checkpoints();
        assert_eq!(state.speed, 13.0);
        assert_eq!(state.checkpoints, 2);

        state.player.pos.z = -100_000.0;
        state.apply_checkpoints();
        assert_eq!(state.speed, state.tuning.speed_max);
    }

    #[test]
    fn test_snapshot_reports_effects_and_pursuer() {
        let mut state = GameState::new(Tuning::default(), 0);
        state.start(0.0);
        state.effects.activate(PowerUpKind::Magnet, 0.0, 10_000.0);
        let snap = state.snapshot(2_500.0);
        assert_eq!(snap.magnet_secs, 8);
        assert_eq!(snap.speed_boost_secs, 0);
        assert!(!snap.chasing);
        assert_eq!(snap.follow_distance, Some(3.0));
        assert!(serde_json::to_string(&snap).is_ok());
    }
}
