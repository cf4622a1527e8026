//! World-coordinate access to extra data.
//!
//! [`ExtraDataStore`] is the seam modules program against; [`WorldStorage`]
//! is the in-memory implementation backed by a [`ChunkManager`].

use bevy_ecs::prelude::*;
use glam::IVec3;
use thiserror::Error;

use crate::chunk::ChunkExtraData;
use crate::chunk_manager::{ChunkAddress, ChunkManager};
use crate::coords::{chunk_address_of, local_pos_of};
use crate::slots::{ExtraDataSlotId, ExtraDataSlotRegistry};
use crate::view::ChunkView;

/// Errors raised by extra-data writes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The chunk containing the target block is not loaded.
    #[error("chunk {0} is not loaded")]
    ChunkNotLoaded(ChunkAddress),
    /// The slot ID was never registered.
    #[error("unknown extra-data slot {0}")]
    UnknownSlot(u16),
}

/// Per-block extra-data access in world block coordinates.
pub trait ExtraDataStore {
    /// Reads the value of `slot` at `pos`.
    ///
    /// Blocks in unloaded chunks, and slots never written, read as 0.
    fn get_extra_data(&self, slot: ExtraDataSlotId, pos: IVec3) -> u16;

    /// Writes `value` into `slot` at `pos`, truncated to the slot's width.
    fn set_extra_data(
        &mut self,
        slot: ExtraDataSlotId,
        pos: IVec3,
        value: u16,
    ) -> Result<(), WorldError>;
}

/// In-memory extra-data storage for all loaded chunks.
///
/// The slot layout is fixed when the storage is created: register every slot
/// on the [`ExtraDataSlotRegistry`] first.
#[derive(Resource, Debug)]
pub struct WorldStorage {
    slots: ExtraDataSlotRegistry,
    chunks: ChunkManager,
}

impl WorldStorage {
    /// Creates storage with no loaded chunks using the given slot layout.
    pub fn new(slots: ExtraDataSlotRegistry) -> Self {
        Self {
            slots,
            chunks: ChunkManager::new(),
        }
    }

    /// Loaded chunks.
    pub fn chunks(&self) -> &ChunkManager {
        &self.chunks
    }

    /// Loads an empty chunk at `addr` unless one is already loaded.
    pub fn ensure_loaded(&mut self, addr: ChunkAddress) -> &mut ChunkExtraData {
        self.chunks.get_or_load(addr)
    }

    /// Returns a read-only view whose origin is the `(0, 0, 0)` block of `addr`.
    pub fn view(&self, addr: ChunkAddress) -> ChunkView<'_, Self> {
        ChunkView::for_chunk(self, addr)
    }
}

impl ExtraDataStore for WorldStorage {
    fn get_extra_data(&self, slot: ExtraDataSlotId, pos: IVec3) -> u16 {
        let Some(chunk) = self.chunks.get_chunk(&chunk_address_of(pos)) else {
            return 0;
        };
        let (x, y, z) = local_pos_of(pos);
        chunk.get(slot, x, y, z)
    }

    fn set_extra_data(
        &mut self,
        slot: ExtraDataSlotId,
        pos: IVec3,
        value: u16,
    ) -> Result<(), WorldError> {
        let mask = self
            .slots
            .get(slot)
            .ok_or(WorldError::UnknownSlot(slot.0))?
            .value_mask();
        let addr = chunk_address_of(pos);
        let chunk = self
            .chunks
            .get_chunk_mut(&addr)
            .ok_or(WorldError::ChunkNotLoaded(addr))?;
        let (x, y, z) = local_pos_of(pos);
        chunk.set(slot, x, y, z, value & mask);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::ExtraDataSlotDef;

    fn storage() -> (WorldStorage, ExtraDataSlotId, ExtraDataSlotId) {
        let mut slots = ExtraDataSlotRegistry::new();
        let wide = slots.register(ExtraDataSlotDef::new("Test.wide", 16)).unwrap();
        let narrow = slots.register(ExtraDataSlotDef::new("Test.narrow", 4)).unwrap();
        (WorldStorage::new(slots), wide, narrow)
    }

    #[test]
    fn test_unloaded_chunk_reads_zero() {
        let (world, wide, _) = storage();
        assert_eq!(world.get_extra_data(wide, IVec3::new(100, 5, -7)), 0);
    }

    #[test]
    fn test_write_to_unloaded_chunk_fails() {
        let (mut world, wide, _) = storage();
        let result = world.set_extra_data(wide, IVec3::new(-1, 0, 0), 5);
        assert_eq!(
            result,
            Err(WorldError::ChunkNotLoaded(ChunkAddress::new(-1, 0, 0)))
        );
    }

    #[test]
    fn test_write_then_read_across_chunks() {
        let (mut world, wide, _) = storage();
        world.ensure_loaded(ChunkAddress::new(0, 0, 0));
        world.ensure_loaded(ChunkAddress::new(-1, 0, 0));

        world.set_extra_data(wide, IVec3::new(0, 0, 0), 1000).unwrap();
        world.set_extra_data(wide, IVec3::new(-1, 0, 0), 2000).unwrap();

        assert_eq!(world.get_extra_data(wide, IVec3::new(0, 0, 0)), 1000);
        assert_eq!(world.get_extra_data(wide, IVec3::new(-1, 0, 0)), 2000);
        assert_eq!(world.get_extra_data(wide, IVec3::new(1, 0, 0)), 0);
    }

    #[test]
    fn test_value_truncated_to_slot_width() {
        let (mut world, _, narrow) = storage();
        world.ensure_loaded(ChunkAddress::new(0, 0, 0));
        world.set_extra_data(narrow, IVec3::new(1, 1, 1), 0x1F).unwrap();
        assert_eq!(world.get_extra_data(narrow, IVec3::new(1, 1, 1)), 0x0F);
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let (mut world, _, _) = storage();
        world.ensure_loaded(ChunkAddress::new(0, 0, 0));
        let result = world.set_extra_data(ExtraDataSlotId(9), IVec3::ZERO, 1);
        assert_eq!(result, Err(WorldError::UnknownSlot(9)));
    }

    #[test]
    fn test_ensure_loaded_keeps_existing_data() {
        let (mut world, wide, _) = storage();
        let addr = ChunkAddress::new(0, 0, 0);
        world.ensure_loaded(addr);
        world.set_extra_data(wide, IVec3::new(3, 3, 3), 7).unwrap();
        world.ensure_loaded(addr);
        assert_eq!(world.get_extra_data(wide, IVec3::new(3, 3, 3)), 7);
    }
}
