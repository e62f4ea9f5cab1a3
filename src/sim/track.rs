//! Procedural track: deterministic segment generation and the segment arena
//!
//! The track is an endless run of fixed-length segments. A segment's items are
//! a pure function of its index, so segments can be dropped once the player is
//! past them and regenerated identically at any time.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::PowerUpKind;
use super::lane::Lane;
use crate::consts::*;
use crate::{segment_index_at, segment_start_z};

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Plain crate, cleared only by a jump higher than its size
    Block,
    /// Low barrier, jumpable
    Barrier,
    /// Signal post, a glancing hit that trips the runner
    Signal,
    /// Oncoming train, always lethal
    Train,
}

/// What a track item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Obstacle(ObstacleKind),
    Coin,
    PowerUp(PowerUpKind),
}

/// A single obstacle or pickup on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackItem {
    pub kind: ItemKind,
    pub lane: Lane,
    /// Longitudinal position
    pub z: f32,
    /// Set once when the item is consumed; never cleared
    pub collected: bool,
}

impl TrackItem {
    pub fn new(kind: ItemKind, lane: Lane, z: f32) -> Self {
        Self {
            kind,
            lane,
            z,
            collected: false,
        }
    }

    /// Static (x, z) position on the ground plane
    pub fn ground_position(&self, lane_width: f32) -> Vec2 {
        Vec2::new(self.lane.world_x(lane_width), self.z)
    }
}

/// Stable address of an item inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub segment: u32,
    pub slot: u8,
}

// Generation constants
const SEED_MULTIPLIER: u64 = 1337;
const SLOT_SEED_STRIDE: u64 = 100;
const TRAIN_CHANCE: f32 = 0.7;
const TRAIN_OFFSET: f32 = 10.0;
const SLOT_OFFSETS: [f32; 3] = [0.2, 0.5, 0.8];
const OBSTACLE_ROLL: f32 = 0.4;
const PICKUP_ROLL: f32 = 0.2;
const POWERUP_CHANCE: f32 = 0.9;
const MAGNET_ROLL: f32 = 0.5;
const TRAIN_SUBKIND_ROLL: f32 = 0.9;
const SIGNAL_SUBKIND_ROLL: f32 = 0.8;

// Sub-seed offsets within a slot
const OFFSET_OBSTACLE_LANE: u64 = 1;
const OFFSET_OBSTACLE_KIND: u64 = 2;
const OFFSET_PICKUP_LANE: u64 = 4;
const OFFSET_POWERUP_CHANCE: u64 = 9;
const OFFSET_POWERUP_KIND: u64 = 10;

/// Uniform roll in [0, 1) fully determined by `seed`
fn roll(seed: u64) -> f32 {
    Pcg32::seed_from_u64(seed).random::<f32>()
}

/// Base seed for a segment
#[inline]
pub fn segment_seed(index: u32) -> u64 {
    index as u64 * SEED_MULTIPLIER
}

/// Generate the items for one segment
///
/// Pure: the same index always produces the same items in the same order.
pub fn generate_segment(index: u32) -> Vec<TrackItem> {
    let mut items = Vec::new();
    if index <= WARMUP_SEGMENTS {
        return items;
    }

    let seed = segment_seed(index);
    let start_z = segment_start_z(index);

    // Long-range train, warned well in advance
    if roll(seed) > TRAIN_CHANCE {
        let lane = Lane::from_roll(roll(seed + 1));
        items.push(TrackItem::new(
            ItemKind::Obstacle(ObstacleKind::Train),
            lane,
            start_z - TRAIN_OFFSET,
        ));
    }

    for (slot, rel) in SLOT_OFFSETS.iter().enumerate() {
        let z = start_z - rel * SEGMENT_LENGTH;
        let sub_seed = seed + slot as u64 * SLOT_SEED_STRIDE;
        let type_roll = roll(sub_seed);

        if type_roll > OBSTACLE_ROLL {
            let lane = Lane::from_roll(roll(sub_seed + OFFSET_OBSTACLE_LANE));
            let kind = obstacle_kind(roll(sub_seed + OFFSET_OBSTACLE_KIND));
            items.push(TrackItem::new(ItemKind::Obstacle(kind), lane, z));
            // Reward coin beside the hazard
            items.push(TrackItem::new(ItemKind::Coin, lane.wrapped_right(), z));
        } else if type_roll > PICKUP_ROLL {
            let lane = Lane::from_roll(roll(sub_seed + OFFSET_PICKUP_LANE));
            if roll(sub_seed + OFFSET_POWERUP_CHANCE) > POWERUP_CHANCE {
                let kind = if roll(sub_seed + OFFSET_POWERUP_KIND) > MAGNET_ROLL {
                    PowerUpKind::Magnet
                } else {
                    PowerUpKind::SpeedBoost
                };
                items.push(TrackItem::new(ItemKind::PowerUp(kind), lane, z));
            } else {
                items.push(TrackItem::new(ItemKind::Coin, lane, z));
            }
        }
    }

    items
}

fn obstacle_kind(roll: f32) -> ObstacleKind {
    if roll > TRAIN_SUBKIND_ROLL {
        ObstacleKind::Train
    } else if roll > SIGNAL_SUBKIND_ROLL {
        ObstacleKind::Signal
    } else {
        ObstacleKind::Barrier
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl ItemKind {
    /// Stable one-byte tag used by the digest
    fn tag(self) -> u8 {
        match self {
            ItemKind::Obstacle(ObstacleKind::Block) => 0,
            ItemKind::Obstacle(ObstacleKind::Barrier) => 1,
            ItemKind::Obstacle(ObstacleKind::Signal) => 2,
            ItemKind::Obstacle(ObstacleKind::Train) => 3,
            ItemKind::Coin => 4,
            ItemKind::PowerUp(PowerUpKind::Magnet) => 5,
            ItemKind::PowerUp(PowerUpKind::SpeedBoost) => 6,
        }
    }
}

/// Digest of a generated item list (kind, lane and exact z bits)
///
/// FNV-1a over a fixed byte layout, so the value is stable across builds.
pub fn items_digest(items: &[TrackItem]) -> u64 {
    let mut hash = FNV_OFFSET;
    for item in items {
        let bytes = [item.kind.tag(), item.lane as u8]
            .into_iter()
            .chain(item.z.to_bits().to_le_bytes());
        for byte in bytes {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

/// A generated stretch of track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub index: u32,
    items: Box<[TrackItem]>,
}

impl Segment {
    pub fn generate(index: u32) -> Self {
        Self {
            index,
            items: generate_segment(index).into_boxed_slice(),
        }
    }

    pub fn items(&self) -> &[TrackItem] {
        &self.items
    }

    pub fn start_z(&self) -> f32 {
        segment_start_z(self.index)
    }

    pub fn end_z(&self) -> f32 {
        segment_start_z(self.index + 1)
    }

    /// Whether the player is close enough for this segment's items to matter
    pub fn is_near(&self, player_z: f32) -> bool {
        player_z < self.start_z() + SEGMENT_PROXIMITY && player_z > self.end_z() - SEGMENT_PROXIMITY
    }
}

/// Arena of cached segments around the player
///
/// Holds a contiguous, ascending run of segment indices. Items are addressed
/// by [`ItemRef`] and their `collected` flag is flipped in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    segments: VecDeque<Segment>,
    /// Current (x, z) of coins being pulled in by the magnet
    #[serde(skip)]
    pulls: BTreeMap<ItemRef, Vec2>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached segment
    pub fn reset(&mut self) {
        self.segments.clear();
        self.pulls.clear();
    }

    /// Generate segments entering the window and cull the ones left behind
    pub fn sync(&mut self, player_z: f32) {
        let current = segment_index_at(player_z);
        let first = current.saturating_sub(TRAILING_SEGMENTS);
        let end = current + VISIBLE_SEGMENTS;

        while self.segments.front().is_some_and(|s| s.index < first) {
            self.segments.pop_front();
        }
        self.pulls.retain(|r, _| r.segment >= first);

        let mut next = self.segments.back().map_or(first, |s| s.index + 1);
        while next < end {
            self.segments.push_back(Segment::generate(next));
            next += 1;
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn segment(&self, index: u32) -> Option<&Segment> {
        let first = self.segments.front()?.index;
        let offset = index.checked_sub(first)? as usize;
        self.segments.get(offset)
    }

    fn segment_mut(&mut self, index: u32) -> Option<&mut Segment> {
        let first = self.segments.front()?.index;
        let offset = index.checked_sub(first)? as usize;
        self.segments.get_mut(offset)
    }

    pub fn item(&self, r: ItemRef) -> Option<&TrackItem> {
        self.segment(r.segment)?.items.get(r.slot as usize)
    }

    /// Mark an item consumed. Returns false if it already was (or is gone).
    pub fn collect(&mut self, r: ItemRef) -> bool {
        self.pulls.remove(&r);
        match self
            .segment_mut(r.segment)
            .and_then(|s| s.items.get_mut(r.slot as usize))
        {
            Some(item) if !item.collected => {
                item.collected = true;
                true
            }
            _ => false,
        }
    }

    /// Uncollected items in segments near the player, in arena order
    pub fn live_items_near(&self, player_z: f32) -> Vec<ItemRef> {
        let mut refs = Vec::new();
        for segment in self.segments.iter().filter(|s| s.is_near(player_z)) {
            for (slot, item) in segment.items.iter().enumerate() {
                if !item.collected {
                    refs.push(ItemRef {
                        segment: segment.index,
                        slot: slot as u8,
                    });
                }
            }
        }
        refs
    }

    /// Current (x, z) of an uncollected coin, following any magnet pull
    pub fn coin_position(&self, r: ItemRef, lane_width: f32) -> Option<Vec2> {
        let item = self.item(r)?;
        if item.collected || item.kind != ItemKind::Coin {
            return None;
        }
        Some(
            self.pulls
                .get(&r)
                .copied()
                .unwrap_or_else(|| item.ground_position(lane_width)),
        )
    }

    pub fn set_pull(&mut self, r: ItemRef, pos: Vec2) {
        self.pulls.insert(r, pos);
    }
}
