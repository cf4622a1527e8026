//! Biome change events.
//!
//! [`OnBiomeChanged`] is emitted when a player character crosses into another
//! biome. Events are collected into a [`BiomeEventBuffer`] that is
//! double-buffered per frame.

use std::sync::Arc;

use bevy_ecs::prelude::*;

use crate::biome::Biome;

/// Emitted when a player character moves from one biome into another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnBiomeChanged {
    /// The character that moved.
    pub entity: Entity,
    /// Biome of the block it left.
    pub old_biome: Arc<Biome>,
    /// Biome of the block it entered.
    pub new_biome: Arc<Biome>,
}

/// Double-buffered storage for [`OnBiomeChanged`] events.
///
/// Events sent in the current frame are readable in the current and next
/// frame. Call [`swap`](BiomeEventBuffer::swap) once per frame.
#[derive(Resource, Debug, Default)]
pub struct BiomeEventBuffer {
    prev: Vec<OnBiomeChanged>,
    current: Vec<OnBiomeChanged>,
}

impl BiomeEventBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an event for this frame.
    pub fn send(&mut self, event: OnBiomeChanged) {
        tracing::debug!(
            entity = ?event.entity,
            old = %event.old_biome.id(),
            new = %event.new_biome.id(),
            "biome changed"
        );
        self.current.push(event);
    }

    /// All readable events (previous frame, then current frame).
    pub fn read(&self) -> impl Iterator<Item = &OnBiomeChanged> {
        self.prev.iter().chain(self.current.iter())
    }

    /// Number of readable events.
    pub fn len(&self) -> usize {
        self.prev.len() + self.current.len()
    }

    /// Returns `true` if there are no readable events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances the frame: previous events are dropped, current become previous.
    pub fn swap(&mut self) {
        self.prev.clear();
        std::mem::swap(&mut self.prev, &mut self.current);
    }

    /// Drops all events.
    pub fn clear(&mut self) {
        self.prev.clear();
        self.current.clear();
    }
}
