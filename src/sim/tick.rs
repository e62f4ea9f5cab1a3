//! Per-frame simulation tick
//!
//! Order within one tick:
//! 1. Buffered commands, in timestamp order
//! 2. Kinematics, speed checkpoints, track window
//! 3. Magnet pull and item interactions
//! 4. Deferred timers due at or before `now`
//!
//! A stumble resolved in step 3 therefore always beats a chase auto-clear
//! that comes due in the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::chase::StumbleOutcome;
use super::collision::{Interaction, MagnetReach, classify, magnet_pull, magnet_reach};
use super::effects::PowerUpKind;
use super::lane::Lane;
use super::player::SlideOrDrop;
use super::state::{EndCause, GameEvent, GameState};
use super::timers::TimerTask;
use super::track::{ItemKind, ItemRef, ObstacleKind};
use crate::Millis;

/// Player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    /// Slide on the ground, fast-drop in the air
    SlideOrDrop,
}

/// A command stamped with the wall-clock instant it was issued
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedCommand {
    pub command: Command,
    pub at: Millis,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock instant of this frame
    pub now: Millis,
    /// Commands buffered since the previous tick
    pub commands: Vec<TimedCommand>,
    /// Demo mode - the autopilot plays
    pub autopilot: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.is_running() {
        return;
    }
    state.now = input.now;

    let mut commands = input.commands.clone();
    if input.autopilot {
        commands.extend(autopilot(state).into_iter().map(|command| TimedCommand {
            command,
            at: input.now,
        }));
    }
    commands.sort_by(|a, b| a.at.total_cmp(&b.at));
    for cmd in &commands {
        apply_command(state, cmd.command, cmd.at);
    }

    if state.player.integrate(dt, state.speed, &state.tuning) {
        state.events.push(GameEvent::Landed);
    }
    state.apply_checkpoints();
    state.track.sync(state.player.pos.z);

    resolve_interactions(state, dt);

    if state.is_running() {
        fire_timers(state, input.now);
        state.effects.prune(input.now);
    }
}

/// Apply one player command issued at `at`
pub fn apply_command(state: &mut GameState, command: Command, at: Millis) {
    if !state.is_running() {
        return;
    }
    match command {
        Command::MoveLeft => {
            if state.player.move_left() {
                state.events.push(GameEvent::LaneChanged {
                    lane: state.player.lane,
                });
            }
        }
        Command::MoveRight => {
            if state.player.move_right() {
                state.events.push(GameEvent::LaneChanged {
                    lane: state.player.lane,
                });
            }
        }
        Command::Jump => {
            let boosted = state.effects.is_active(PowerUpKind::SpeedBoost, at);
            let impulse = if boosted {
                state.tuning.jump_force_boosted
            } else {
                state.tuning.jump_force
            };
            if state.player.try_jump(impulse) {
                state.events.push(GameEvent::Jumped { boosted });
            }
        }
        Command::SlideOrDrop => {
            let was_dropping = state.player.fast_drop;
            match state.player.slide_or_drop() {
                SlideOrDrop::FastDrop if !was_dropping => state.events.push(GameEvent::FastDrop),
                SlideOrDrop::Slide => {
                    state
                        .timers
                        .schedule(at + state.tuning.slide_duration_ms, TimerTask::EndSlide);
                    state.events.push(GameEvent::Slid);
                }
                _ => {}
            }
        }
    }
}

fn resolve_interactions(state: &mut GameState, dt: f32) {
    let now = state.now;
    let lane_width = state.tuning.lane_width;
    let (z, lane, y) = (state.player.pos.z, state.player.lane, state.player.pos.y);
    let magnet = state.effects.is_active(PowerUpKind::Magnet, now);
    let player_ground = Vec2::new(lane.world_x(lane_width), z);

    for r in state.track.live_items_near(z) {
        let Some(item) = state.track.item(r).cloned() else {
            continue;
        };

        if magnet && item.kind == ItemKind::Coin {
            if let Some(pos) = state.track.coin_position(r, lane_width) {
                match magnet_reach(
                    player_ground,
                    pos,
                    state.tuning.magnet_range,
                    state.tuning.magnet_capture_radius,
                ) {
                    MagnetReach::Capture => {
                        if state.track.collect(r) {
                            collect_coin(state, r, true);
                        }
                        continue;
                    }
                    MagnetReach::Attract => {
                        let pulled =
                            magnet_pull(pos, player_ground, state.tuning.magnet_pull_rate, dt);
                        state.track.set_pull(r, pulled);
                    }
                    MagnetReach::OutOfRange => {}
                }
            }
        }

        match classify(z, lane, y, &item) {
            Interaction::None => {}
            Interaction::Crash => {
                state.terminate(EndCause::Crash);
                return;
            }
            Interaction::Stumble => {
                // Consumed so the same obstacle cannot trip the runner twice
                state.track.collect(r);
                stumble(state, now);
                if !state.is_running() {
                    return;
                }
            }
            Interaction::Collect => {
                if !state.track.collect(r) {
                    continue;
                }
                match item.kind {
                    ItemKind::Coin => collect_coin(state, r, false),
                    ItemKind::PowerUp(kind) => {
                        state
                            .effects
                            .activate(kind, now, state.tuning.powerup_duration_ms);
                        log::debug!("Power-up {:?} active", kind);
                        state.events.push(GameEvent::PowerUpCollected { kind });
                    }
                    ItemKind::Obstacle(_) => {}
                }
            }
        }
    }
}

fn collect_coin(state: &mut GameState, item: ItemRef, magnet: bool) {
    state.add_score(state.tuning.coin_value);
    state.coins += 1;
    state.events.push(GameEvent::CoinCollected { item, magnet });
}

/// Escalate the pursuer after a glancing hit
pub fn stumble(state: &mut GameState, now: Millis) {
    state.events.push(GameEvent::Stumbled);
    match state.chase.stumble() {
        StumbleOutcome::Chasing { token } => {
            log::debug!("Stumbled: chase {} started", token);
            state
                .timers
                .schedule(now + state.tuning.chase_clear_ms, TimerTask::ClearChase { token });
        }
        StumbleOutcome::Caught => state.terminate(EndCause::Caught),
    }
}

fn fire_timers(state: &mut GameState, now: Millis) {
    for task in state.timers.take_due(now) {
        match task {
            TimerTask::EndSlide => state.player.end_slide(),
            TimerTask::ClearChase { token } => {
                if state.chase.clear(token) {
                    log::debug!("Chase {} cleared", token);
                    state.events.push(GameEvent::ChaseEnded);
                }
            }
        }
    }
}

/// Distance ahead at which the autopilot reacts
fn lookahead(speed: f32) -> f32 {
    speed * 0.25 + 2.0
}

fn lane_hazard(state: &GameState, lane: Lane, range: f32) -> Option<(f32, ObstacleKind)> {
    let z = state.player.pos.z;
    state
        .track
        .segments()
        .flat_map(|s| s.items())
        .filter(|i| !i.collected && i.lane == lane)
        .filter_map(|i| match i.kind {
            ItemKind::Obstacle(kind) => Some((z - i.z, kind)),
            _ => None,
        })
        .filter(|(dist, _)| *dist > -1.0 && *dist < range)
        .min_by(|a, b| a.0.total_cmp(&b.0))
}

/// Demo-mode driver: jump barriers, sidestep everything else
pub fn autopilot(state: &GameState) -> Vec<Command> {
    let player = &state.player;
    let range = lookahead(state.speed);
    let Some((_, kind)) = lane_hazard(state, player.lane, range) else {
        return Vec::new();
    };

    if kind == ObstacleKind::Barrier {
        if !player.airborne && !player.sliding {
            return vec![Command::Jump];
        }
        return Vec::new();
    }

    let clear = |lane: Lane| lane != player.lane && lane_hazard(state, lane, range * 1.5).is_none();
    if clear(player.lane.left()) {
        vec![Command::MoveLeft]
    } else if clear(player.lane.right()) {
        vec![Command::MoveRight]
    } else {
        Vec::new()
    }
}
