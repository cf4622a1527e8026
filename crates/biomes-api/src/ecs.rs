//! ECS wiring: resources, the player marker, and the boundary-crossing system.
//!
//! The host pushes movement and spawn notifications into [`BiomeInbox`];
//! [`biome_change_system`] drains it once per frame, emitting
//! [`OnBiomeChanged`] events and updating the metrics overlay.

use bevy_ecs::prelude::*;
use biomes_config::BiomesConfig;
use biomes_world::WorldStorage;
use glam::Vec3;

use crate::detector::BiomeChangeDetector;
use crate::events::{BiomeEventBuffer, OnBiomeChanged};
use crate::metrics::BiomesMetricsMode;
use crate::registry::BiomeRegistry;

/// Marker for entities whose biome is tracked.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerCharacter;

/// An entity finished a movement at `position` after moving by `delta`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityMoved {
    /// The moving entity.
    pub entity: Entity,
    /// Position after the move.
    pub position: Vec3,
    /// Displacement of the move.
    pub delta: Vec3,
}

/// An entity appeared in the world at `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSpawned {
    /// The spawned entity.
    pub entity: Entity,
    /// Spawn position.
    pub position: Vec3,
}

/// A notification waiting in the [`BiomeInbox`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BiomeNotification {
    /// See [`EntityMoved`].
    Moved(EntityMoved),
    /// See [`PlayerSpawned`].
    Spawned(PlayerSpawned),
}

/// Host-to-module notification queue, drained by [`biome_change_system`].
#[derive(Resource, Debug, Default)]
pub struct BiomeInbox {
    pending: Vec<BiomeNotification>,
}

impl BiomeInbox {
    /// Queues a movement notification.
    pub fn push_moved(&mut self, entity: Entity, position: Vec3, delta: Vec3) {
        self.pending.push(BiomeNotification::Moved(EntityMoved {
            entity,
            position,
            delta,
        }));
    }

    /// Queues a spawn notification.
    pub fn push_spawned(&mut self, entity: Entity, position: Vec3) {
        self.pending
            .push(BiomeNotification::Spawned(PlayerSpawned { entity, position }));
    }

    /// Removes and returns all queued notifications in arrival order.
    pub fn take(&mut self) -> Vec<BiomeNotification> {
        std::mem::take(&mut self.pending)
    }

    /// Number of queued notifications.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Inserts every resource [`biome_change_system`] needs.
pub fn register_biome_resources(
    world: &mut World,
    registry: BiomeRegistry,
    storage: WorldStorage,
    config: &BiomesConfig,
) {
    tracing::info!(
        "Biome tracking ready: {} biomes, missing-biome policy {:?}",
        registry.len(),
        config.missing_biome_policy
    );
    world.insert_resource(registry);
    world.insert_resource(storage);
    world.insert_resource(BiomeChangeDetector::new(config.missing_biome_policy));
    world.insert_resource(BiomeInbox::default());
    world.insert_resource(BiomeEventBuffer::new());
    world.insert_resource(BiomesMetricsMode::new(config.metrics_overlay));
}

/// Drains [`BiomeInbox`], ignoring entities without [`PlayerCharacter`].
///
/// Failed lookups are logged and the notification is dropped.
pub fn biome_change_system(
    registry: Res<BiomeRegistry>,
    storage: Res<WorldStorage>,
    detector: Res<BiomeChangeDetector>,
    mut inbox: ResMut<BiomeInbox>,
    players: Query<(), With<PlayerCharacter>>,
    mut events: ResMut<BiomeEventBuffer>,
    mut metrics: ResMut<BiomesMetricsMode>,
) {
    for notification in inbox.take() {
        match notification {
            BiomeNotification::Moved(moved) => {
                if !players.contains(moved.entity) {
                    continue;
                }
                match detector.check_moved(&registry, &*storage, moved.position, moved.delta) {
                    Ok(Some(change)) => {
                        metrics.set_biome(change.new.id().to_string());
                        events.send(OnBiomeChanged {
                            entity: moved.entity,
                            old_biome: change.old,
                            new_biome: change.new,
                        });
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("Dropped movement of {:?}: {}", moved.entity, e);
                    }
                }
            }
            BiomeNotification::Spawned(spawned) => {
                if !players.contains(spawned.entity) {
                    continue;
                }
                match detector.biome_at_spawn(&registry, &*storage, spawned.position) {
                    Ok(Some(biome)) => metrics.set_biome(biome.id().to_string()),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("Dropped spawn of {:?}: {}", spawned.entity, e);
                    }
                }
            }
        }
    }
}
