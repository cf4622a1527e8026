//! Detects biome boundary crossings from entity movement.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use biomes_config::MissingBiomePolicy;
use biomes_world::{ExtraDataStore, block_pos};
use glam::{IVec3, Vec3};

use crate::biome::Biome;
use crate::error::BiomeError;
use crate::registry::BiomeRegistry;

/// A crossing from one biome into another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeChange {
    /// Biome of the block the entity left.
    pub old: Arc<Biome>,
    /// Biome of the block the entity entered.
    pub new: Arc<Biome>,
}

/// Compares the biomes at the start and end of a movement.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct BiomeChangeDetector {
    policy: MissingBiomePolicy,
}

impl BiomeChangeDetector {
    /// Creates a detector with the given missing-biome policy.
    pub fn new(policy: MissingBiomePolicy) -> Self {
        Self { policy }
    }

    /// Policy applied when only one end of a movement has biome data.
    pub fn policy(&self) -> MissingBiomePolicy {
        self.policy
    }

    /// Checks a movement that ended at `position` after moving by `delta`.
    ///
    /// Both ends are floored to block coordinates; movement within one block
    /// never reports a change.
    pub fn check_moved<S: ExtraDataStore + ?Sized>(
        &self,
        registry: &BiomeRegistry,
        store: &S,
        position: Vec3,
        delta: Vec3,
    ) -> Result<Option<BiomeChange>, BiomeError> {
        self.check_blocks(
            registry,
            store,
            block_pos(position - delta),
            block_pos(position),
        )
    }

    /// Checks a move from block `old_pos` to block `new_pos`.
    ///
    /// # Errors
    ///
    /// Propagates lookup errors. Returns [`BiomeError::MissingBiome`] under
    /// [`MissingBiomePolicy::Strict`] when only one block has a biome.
    pub fn check_blocks<S: ExtraDataStore + ?Sized>(
        &self,
        registry: &BiomeRegistry,
        store: &S,
        old_pos: IVec3,
        new_pos: IVec3,
    ) -> Result<Option<BiomeChange>, BiomeError> {
        if old_pos == new_pos {
            return Ok(None);
        }

        let old = registry.get_biome(store, old_pos)?;
        let new = registry.get_biome(store, new_pos)?;
        match (old, new) {
            (Some(old), Some(new)) if old.hash() != new.hash() => {
                Ok(Some(BiomeChange { old, new }))
            }
            (Some(_), Some(_)) | (None, None) => Ok(None),
            (old, _) => {
                let missing = if old.is_none() { old_pos } else { new_pos };
                match self.policy {
                    MissingBiomePolicy::Warn => {
                        tracing::warn!("Missing biome information for {}", missing);
                        Ok(None)
                    }
                    MissingBiomePolicy::Strict => Err(BiomeError::MissingBiome { pos: missing }),
                }
            }
        }
    }

    /// Biome of the block an entity spawned in, if any.
    pub fn biome_at_spawn<S: ExtraDataStore + ?Sized>(
        &self,
        registry: &BiomeRegistry,
        store: &S,
        position: Vec3,
    ) -> Result<Option<Arc<Biome>>, BiomeError> {
        registry.get_biome(store, block_pos(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biomes_world::{ChunkAddress, ExtraDataSlotRegistry, WorldStorage};

    struct Fixture {
        registry: BiomeRegistry,
        world: WorldStorage,
        desert: Arc<Biome>,
        forest: Arc<Biome>,
    }

    fn fixture() -> Fixture {
        let mut slots = ExtraDataSlotRegistry::new();
        let mut registry = BiomeRegistry::install(&mut slots, "BiomesAPI.biomeHash").unwrap();
        let desert = registry
            .register(Biome::builder("core:desert", "Desert").build().unwrap())
            .unwrap();
        let forest = registry
            .register(Biome::builder("core:forest", "Forest").build().unwrap())
            .unwrap();
        let mut world = WorldStorage::new(slots);
        world.ensure_loaded(ChunkAddress::new(0, 0, 0));
        registry.set_biome(&mut world, &desert, IVec3::new(0, 0, 0)).unwrap();
        registry.set_biome(&mut world, &desert, IVec3::new(1, 0, 0)).unwrap();
        registry.set_biome(&mut world, &forest, IVec3::new(2, 0, 0)).unwrap();
        Fixture {
            registry,
            world,
            desert,
            forest,
        }
    }

    #[test]
    fn test_crossing_reports_change() {
        let f = fixture();
        let detector = BiomeChangeDetector::default();
        let change = detector
            .check_moved(
                &f.registry,
                &f.world,
                Vec3::new(2.2, 0.5, 0.5),
                Vec3::new(0.6, 0.0, 0.0),
            )
            .unwrap()
            .unwrap();
        assert_eq!(change.old, f.desert);
        assert_eq!(change.new, f.forest);
    }

    #[test]
    fn test_same_biome_no_change() {
        let f = fixture();
        let detector = BiomeChangeDetector::default();
        let change = detector
            .check_blocks(&f.registry, &f.world, IVec3::new(0, 0, 0), IVec3::new(1, 0, 0))
            .unwrap();
        assert!(change.is_none());
    }

    #[test]
    fn test_within_block_no_change() {
        let f = fixture();
        let detector = BiomeChangeDetector::new(MissingBiomePolicy::Strict);
        let change = detector
            .check_moved(
                &f.registry,
                &f.world,
                Vec3::new(2.9, 0.5, 0.5),
                Vec3::new(0.5, 0.0, 0.0),
            )
            .unwrap();
        assert!(change.is_none());
    }

    #[test]
    fn test_both_missing_no_change() {
        let f = fixture();
        let detector = BiomeChangeDetector::new(MissingBiomePolicy::Strict);
        let change = detector
            .check_blocks(&f.registry, &f.world, IVec3::new(5, 0, 0), IVec3::new(6, 0, 0))
            .unwrap();
        assert!(change.is_none());
    }

    #[test]
    fn test_missing_biome_warn_policy_skips() {
        let f = fixture();
        let detector = BiomeChangeDetector::default();
        assert_eq!(detector.policy(), MissingBiomePolicy::Warn);
        let change = detector
            .check_blocks(&f.registry, &f.world, IVec3::new(2, 0, 0), IVec3::new(3, 0, 0))
            .unwrap();
        assert!(change.is_none());
    }

    #[test]
    fn test_missing_biome_strict_policy_errors() {
        let f = fixture();
        let detector = BiomeChangeDetector::new(MissingBiomePolicy::Strict);
        let result =
            detector.check_blocks(&f.registry, &f.world, IVec3::new(2, 0, 0), IVec3::new(3, 0, 0));
        assert_eq!(
            result.unwrap_err(),
            BiomeError::MissingBiome {
                pos: IVec3::new(3, 0, 0)
            }
        );

        let result =
            detector.check_blocks(&f.registry, &f.world, IVec3::new(3, 0, 0), IVec3::new(2, 0, 0));
        assert_eq!(
            result.unwrap_err(),
            BiomeError::MissingBiome {
                pos: IVec3::new(3, 0, 0)
            }
        );
    }

    #[test]
    fn test_negative_positions_floor() {
        let f = fixture();
        let detector = BiomeChangeDetector::new(MissingBiomePolicy::Strict);
        // From (-0.5) to (0.2): block -1 lies in an unloaded chunk, block 0 is desert.
        let result = detector.check_moved(
            &f.registry,
            &f.world,
            Vec3::new(0.2, 0.5, 0.5),
            Vec3::new(0.7, 0.0, 0.0),
        );
        assert_eq!(
            result.unwrap_err(),
            BiomeError::MissingBiome {
                pos: IVec3::new(-1, 0, 0)
            }
        );
    }

    #[test]
    fn test_biome_at_spawn() {
        let f = fixture();
        let detector = BiomeChangeDetector::default();
        let biome = detector
            .biome_at_spawn(&f.registry, &f.world, Vec3::new(2.5, 0.1, 0.9))
            .unwrap();
        assert_eq!(biome, Some(f.forest.clone()));
        let none = detector
            .biome_at_spawn(&f.registry, &f.world, Vec3::new(10.0, 0.0, 0.0))
            .unwrap();
        assert!(none.is_none());
    }
}
