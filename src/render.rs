//! Sprite boundary
//!
//! The simulation knows nothing about drawing. A frontend implements
//! `SpriteSink` (create, move, show/hide, destroy) and `SceneSync` keeps one
//! sprite per platform plus one for the player in step with the game state.

use glam::Vec2;

use crate::sim::GameState;

/// Opaque handle for a sprite owned by the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// What a sprite looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKey {
    /// Rounded 30x50 player capsule, anchored at bottom-centre
    Capsule,
    /// Rounded 100x20 platform
    Platform,
}

/// Drawing backend
pub trait SpriteSink {
    fn create(&mut self, pos: Vec2, key: VisualKey) -> SpriteId;
    fn set_position(&mut self, id: SpriteId, pos: Vec2);
    fn set_scale(&mut self, id: SpriteId, scale: Vec2);
    fn set_visible(&mut self, id: SpriteId, visible: bool);
    fn destroy(&mut self, id: SpriteId);
}

/// Mirrors a `GameState` into a `SpriteSink`
#[derive(Debug, Default)]
pub struct SceneSync {
    player: Option<SpriteId>,
    platforms: Vec<SpriteId>,
    /// Run the sprites were built for
    run: Option<u32>,
}

impl SceneSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update sprites to match `state`. A new run throws away every sprite
    /// from the old one first.
    pub fn sync(&mut self, sink: &mut impl SpriteSink, state: &GameState) {
        if self.run != Some(state.run) {
            self.clear(sink);
            self.run = Some(state.run);
        }

        for (i, platform) in state.platforms.platforms().iter().enumerate() {
            let pos = Vec2::new(platform.x, platform.y);
            let id = match self.platforms.get(i) {
                Some(&id) => id,
                None => {
                    let id = sink.create(pos, VisualKey::Platform);
                    self.platforms.push(id);
                    id
                }
            };
            sink.set_position(id, pos);
            sink.set_visible(id, platform.active);
        }

        let pos = state.player.pos;
        let id = *self
            .player
            .get_or_insert_with(|| sink.create(pos, VisualKey::Capsule));
        sink.set_position(id, pos);
        sink.set_scale(id, state.player.scale);
    }

    /// Destroy every sprite this scene created
    pub fn clear(&mut self, sink: &mut impl SpriteSink) {
        for id in self.platforms.drain(..).chain(self.player.take()) {
            sink.destroy(id);
        }
        self.run = None;
    }

    #[cfg(test)]
    pub(crate) fn sprite_count(&self) -> usize {
        self.platforms.len() + usize::from(self.player.is_some())
    }
}
