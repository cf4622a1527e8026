//! Biome registry: maps [`BiomeHash`] to [`Biome`] and reads/writes per-block assignments.
//!
//! The registry is built once per session. Registration is append-only; once
//! the session runs, it is only read. Assignments themselves live in the host
//! world's extra-data slot, never in the registry.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use biomes_world::{
    ChunkExtraData, ChunkView, ExtraDataSlotDef, ExtraDataSlotId, ExtraDataSlotRegistry,
    ExtraDataStore,
};
use glam::IVec3;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;

use crate::biome::{Biome, BiomeHash};
use crate::error::BiomeError;

/// Width of the extra-data slot holding biome hashes.
pub const BIOME_HASH_BITS: u8 = 16;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Registered biomes, in registration order, with O(1) lookup by hash.
#[derive(Resource, Debug)]
pub struct BiomeRegistry {
    slot: ExtraDataSlotId,
    biomes: Vec<Arc<Biome>>,
    by_hash: FxHashMap<BiomeHash, usize>,
}

impl BiomeRegistry {
    /// Registers the 16-bit biome slot named `slot_name` and returns an empty
    /// registry bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::Slot`] if the slot cannot be registered (e.g. the
    /// name is already taken).
    pub fn install(
        slots: &mut ExtraDataSlotRegistry,
        slot_name: &str,
    ) -> Result<Self, BiomeError> {
        let slot = slots.register(ExtraDataSlotDef::new(slot_name, BIOME_HASH_BITS))?;
        Ok(Self::with_slot(slot))
    }

    /// Creates an empty registry using an already registered slot.
    pub fn with_slot(slot: ExtraDataSlotId) -> Self {
        Self {
            slot,
            biomes: Vec::new(),
            by_hash: FxHashMap::default(),
        }
    }

    /// Slot biome hashes are stored in.
    pub fn slot(&self) -> ExtraDataSlotId {
        self.slot
    }

    /// Registers a biome and returns the shared descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::DuplicateHash`] naming both biomes if another
    /// biome already uses the same hash; the registry is left unchanged.
    pub fn register(&mut self, biome: impl Into<Arc<Biome>>) -> Result<Arc<Biome>, BiomeError> {
        let biome = biome.into();
        let hash = biome.hash();
        if let Some(&idx) = self.by_hash.get(&hash) {
            return Err(BiomeError::DuplicateHash {
                hash,
                existing: self.biomes[idx].id().to_string(),
                incoming: biome.id().to_string(),
            });
        }

        self.by_hash.insert(hash, self.biomes.len());
        self.biomes.push(Arc::clone(&biome));
        tracing::info!("Registered biome {} with hash {}", biome.id(), hash);
        Ok(biome)
    }

    /// Returns the biome registered under `hash`.
    pub fn get(&self, hash: BiomeHash) -> Option<&Arc<Biome>> {
        self.by_hash.get(&hash).map(|&idx| &self.biomes[idx])
    }

    /// Returns `true` if a biome is registered under `hash`.
    pub fn contains(&self, hash: BiomeHash) -> bool {
        self.by_hash.contains_key(&hash)
    }

    /// Returns `true` if this exact descriptor (same id and hash) is registered.
    pub fn is_registered(&self, biome: &Biome) -> bool {
        self.get(biome.hash()).is_some_and(|b| **b == *biome)
    }

    /// Biome assigned to the block at `pos`.
    ///
    /// Returns `Ok(None)` if the block has no biome (e.g. its chunk is not
    /// generated yet).
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::UnregisteredHash`] if the block holds a hash no
    /// registered biome has.
    pub fn get_biome<S: ExtraDataStore + ?Sized>(
        &self,
        store: &S,
        pos: IVec3,
    ) -> Result<Option<Arc<Biome>>, BiomeError> {
        self.resolve(BiomeHash(store.get_extra_data(self.slot, pos)), pos)
    }

    /// Biome at a view-relative position. Same contract as [`get_biome`](Self::get_biome).
    pub fn get_biome_in_view<S: ExtraDataStore + ?Sized>(
        &self,
        view: &ChunkView<'_, S>,
        rel: IVec3,
    ) -> Result<Option<Arc<Biome>>, BiomeError> {
        let hash = BiomeHash(view.get_extra_data(self.slot, rel));
        self.resolve(hash, view.to_world(rel))
    }

    /// Assigns `biome` to the block at `pos`, replacing any previous assignment.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::UnregisteredBiome`] if `biome` was never
    /// registered, and [`BiomeError::Storage`] if the block's chunk is not
    /// loaded.
    ///
    /// # Panics
    ///
    /// Assigning an unregistered biome panics in debug builds.
    pub fn set_biome<S: ExtraDataStore + ?Sized>(
        &self,
        store: &mut S,
        biome: &Biome,
        pos: IVec3,
    ) -> Result<(), BiomeError> {
        self.ensure_registered(biome)?;
        store.set_extra_data(self.slot, pos, biome.hash().0)?;
        Ok(())
    }

    /// Assigns `biome` to a block addressed relative to `chunk`.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::UnregisteredBiome`] if `biome` was never registered;
    /// debug builds panic instead.
    pub fn set_biome_in_chunk(
        &self,
        chunk: &mut ChunkExtraData,
        biome: &Biome,
        (x, y, z): (u8, u8, u8),
    ) -> Result<(), BiomeError> {
        self.ensure_registered(biome)?;
        chunk.set(self.slot, x, y, z, biome.hash().0);
        Ok(())
    }

    /// All registered biomes accepted by `filter`, in registration order.
    pub fn registered_biomes(&self, filter: impl Fn(&Biome) -> bool) -> Vec<Arc<Biome>> {
        self.biomes
            .iter()
            .filter(|&biome| filter(&**biome))
            .cloned()
            .collect()
    }

    /// All registered biomes defined by `module` (case-insensitive).
    pub fn biomes_from_module(&self, module: &str) -> Vec<Arc<Biome>> {
        self.registered_biomes(|biome| biome.id().module().eq_ignore_ascii_case(module))
    }

    /// Iterates over all registered biomes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Biome>> {
        self.biomes.iter()
    }

    /// Number of registered biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Returns `true` if no biome is registered.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    fn resolve(&self, hash: BiomeHash, pos: IVec3) -> Result<Option<Arc<Biome>>, BiomeError> {
        if hash.is_none() {
            return Ok(None);
        }
        match self.get(hash) {
            Some(biome) => Ok(Some(Arc::clone(biome))),
            None => Err(BiomeError::UnregisteredHash { hash, pos }),
        }
    }

    fn ensure_registered(&self, biome: &Biome) -> Result<(), BiomeError> {
        if self.is_registered(biome) {
            return Ok(());
        }
        tracing::error!(
            biome = %biome.id(),
            hash = %biome.hash(),
            "rejected assignment of a biome that was never registered"
        );
        if cfg!(debug_assertions) {
            panic!(
                "biome {} (hash {}) was never registered",
                biome.id(),
                biome.hash()
            );
        }
        Err(BiomeError::UnregisteredBiome {
            id: biome.id().to_string(),
            hash: biome.hash(),
        })
    }
}

// ---------------------------------------------------------------------------
// SharedBiomeRegistry
// ---------------------------------------------------------------------------

/// Cloneable handle to a [`BiomeRegistry`] behind a read-write lock, for hosts
/// that generate terrain on worker threads.
///
/// Registration takes the write lock; lookups take the read lock.
#[derive(Clone, Debug)]
pub struct SharedBiomeRegistry(Arc<RwLock<BiomeRegistry>>);

impl SharedBiomeRegistry {
    /// Wraps a registry.
    pub fn new(registry: BiomeRegistry) -> Self {
        Self(Arc::new(RwLock::new(registry)))
    }

    /// Shared read access.
    pub fn read(&self) -> RwLockReadGuard<'_, BiomeRegistry> {
        self.0.read()
    }

    /// Exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, BiomeRegistry> {
        self.0.write()
    }

    /// See [`BiomeRegistry::register`].
    pub fn register(&self, biome: impl Into<Arc<Biome>>) -> Result<Arc<Biome>, BiomeError> {
        self.write().register(biome)
    }

    /// See [`BiomeRegistry::get_biome`].
    pub fn get_biome<S: ExtraDataStore + ?Sized>(
        &self,
        store: &S,
        pos: IVec3,
    ) -> Result<Option<Arc<Biome>>, BiomeError> {
        self.read().get_biome(store, pos)
    }

    /// See [`BiomeRegistry::set_biome`].
    pub fn set_biome<S: ExtraDataStore + ?Sized>(
        &self,
        store: &mut S,
        biome: &Biome,
        pos: IVec3,
    ) -> Result<(), BiomeError> {
        self.read().set_biome(store, biome, pos)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
