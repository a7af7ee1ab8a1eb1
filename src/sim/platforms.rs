//! Platform pool
//!
//! A fixed number of platforms is created at level start. Platforms that
//! scroll off the bottom are recycled to one gap above the current highest
//! platform instead of being reallocated, so the pool never grows.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::lane::Lane;
use crate::consts::START_LANE;
use crate::tuning::Tuning;

/// A platform the player can stand on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Horizontal centre (always the lane's x)
    pub x: f32,
    /// Top surface height, grows as the world scrolls down
    pub y: f32,
    pub lane: Lane,
    pub active: bool,
}

impl Platform {
    pub fn new(lane: Lane, y: f32, tuning: &Tuning) -> Self {
        Self {
            x: lane.x(tuning),
            y,
            lane,
            active: true,
        }
    }

    /// Whether this platform sits in `lane` (within horizontal tolerance)
    #[inline]
    pub fn in_lane(&self, lane: Lane, tuning: &Tuning) -> bool {
        (self.x - lane.x(tuning)).abs() < tuning.lane_match_tolerance
    }
}

/// Bounded pool of platforms, in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformPool {
    platforms: Vec<Platform>,
    capacity: usize,
    /// Lane of the most recent spawn or recycle (never repeated back to back)
    last_spawn_lane: Lane,
}

impl PlatformPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            platforms: Vec::with_capacity(capacity),
            capacity,
            last_spawn_lane: Lane::new(START_LANE),
        }
    }

    /// Pool holding exactly `platforms` (scripted layouts)
    pub fn from_platforms(platforms: Vec<Platform>) -> Self {
        let last_spawn_lane = platforms.last().map_or(Lane::new(START_LANE), |p| p.lane);
        Self {
            capacity: platforms.len(),
            platforms,
            last_spawn_lane,
        }
    }

    /// Pool sized for the level described by `tuning`
    pub fn for_tuning(tuning: &Tuning) -> Self {
        Self::with_capacity(tuning.platform_count())
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last_spawn_lane(&self) -> Lane {
        self.last_spawn_lane
    }

    /// Lay out a fresh level. Returns the index of the platform under the
    /// player's start position, if one was created there.
    pub fn init_level(&mut self, rng: &mut impl Rng, tuning: &Tuning) -> Option<usize> {
        self.platforms.clear();

        let start_lane = Lane::new(START_LANE);
        let start = self.push(Platform::new(start_lane, tuning.player_start_y, tuning));
        self.last_spawn_lane = start_lane;

        for i in 1..tuning.platform_count() {
            let y = tuning.player_start_y - i as f32 * tuning.platform_gap;
            let lane = self.next_lane(rng);
            self.push(Platform::new(lane, y, tuning));
        }

        log::debug!("Level initialized with {} platforms", self.platforms.len());

        start.filter(|&i| self.platforms[i].y == tuning.player_start_y)
    }

    /// Scroll every active platform down. Returns the indices of platforms
    /// that went past the recycle line and were moved back to the top.
    pub fn advance(
        &mut self,
        dt: f32,
        scroll_speed: f32,
        rng: &mut impl Rng,
        tuning: &Tuning,
    ) -> Vec<usize> {
        for platform in self.platforms.iter_mut().filter(|p| p.active) {
            platform.y += scroll_speed * dt;
        }

        // Recycle after everything has moved so spacing is measured post-scroll
        let recycled: Vec<usize> = self
            .platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active && p.y > tuning.recycle_line())
            .map(|(i, _)| i)
            .collect();
        for &i in &recycled {
            self.recycle(i, rng, tuning);
        }
        recycled
    }

    /// Move a platform to one gap above the highest other active platform,
    /// in a lane different from the previous spawn.
    pub fn recycle(&mut self, index: usize, rng: &mut impl Rng, tuning: &Tuning) {
        if index >= self.platforms.len() {
            return;
        }

        let lane = self.next_lane(rng);
        self.platforms[index].active = false;

        // Empty pool (apart from this one) falls back to the top of the screen
        let min_y = self
            .platforms
            .iter()
            .enumerate()
            .filter(|(i, p)| *i != index && p.active)
            .map(|(_, p)| p.y)
            .fold(None, |acc: Option<f32>, y| Some(acc.map_or(y, |m| m.min(y))))
            .unwrap_or(0.0);

        let platform = &mut self.platforms[index];
        platform.lane = lane;
        platform.x = lane.x(tuning);
        platform.y = min_y - tuning.platform_gap;
        platform.active = true;

        log::debug!("Recycled platform {} to lane {} at y={:.1}", index, lane.index(), platform.y);
    }

    /// Nearest active platform in `lane` strictly above `player_y` and closer
    /// than `max_distance`. Ties go to the first platform in pool order.
    pub fn find_landing(
        &self,
        lane: Lane,
        player_y: f32,
        max_distance: f32,
        tuning: &Tuning,
    ) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, platform) in self.platforms.iter().enumerate() {
            if !platform.active || !platform.in_lane(lane, tuning) || platform.y >= player_y {
                continue;
            }
            let dist = player_y - platform.y;
            if dist < max_distance && best.is_none_or(|(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Pick a lane uniformly from the two that differ from the last spawn
    fn next_lane(&mut self, rng: &mut impl Rng) -> Lane {
        let choices = Lane::others(self.last_spawn_lane);
        let lane = choices[rng.random_range(0..choices.len())];
        self.last_spawn_lane = lane;
        lane
    }

    fn push(&mut self, platform: Platform) -> Option<usize> {
        if self.platforms.len() >= self.capacity {
            log::warn!("Platform pool full ({}), dropping spawn", self.capacity);
            return None;
        }
        self.platforms.push(platform);
        Some(self.platforms.len() - 1)
    }
}
