//! Read-only window onto extra data addressed relative to an origin block.
//!
//! World generators typically work chunk by chunk; a [`ChunkView`] lets them
//! read with chunk-relative coordinates while still reaching into neighbours.

use glam::IVec3;

use crate::chunk_manager::ChunkAddress;
use crate::coords::chunk_origin;
use crate::slots::ExtraDataSlotId;
use crate::store::ExtraDataStore;

/// Origin-relative view over an [`ExtraDataStore`].
pub struct ChunkView<'a, S: ExtraDataStore + ?Sized> {
    store: &'a S,
    origin: IVec3,
}

impl<'a, S: ExtraDataStore + ?Sized> ChunkView<'a, S> {
    /// Creates a view whose relative `(0, 0, 0)` is the world block `origin`.
    pub fn new(store: &'a S, origin: IVec3) -> Self {
        Self { store, origin }
    }

    /// Creates a view anchored at the first block of chunk `addr`.
    pub fn for_chunk(store: &'a S, addr: ChunkAddress) -> Self {
        Self::new(store, chunk_origin(addr))
    }

    /// World position of the view's relative origin.
    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    /// Converts a view-relative position to world coordinates, wrapping at
    /// the `i32` range.
    pub fn to_world(&self, rel: IVec3) -> IVec3 {
        self.origin.wrapping_add(rel)
    }

    /// Reads `slot` at a view-relative position. Positions outside the
    /// anchoring chunk resolve into neighbouring chunks.
    pub fn get_extra_data(&self, slot: ExtraDataSlotId, rel: IVec3) -> u16 {
        self.store.get_extra_data(slot, self.to_world(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{ExtraDataSlotDef, ExtraDataSlotRegistry};
    use crate::store::WorldStorage;

    #[test]
    fn test_view_reads_relative_to_chunk() {
        let mut slots = ExtraDataSlotRegistry::new();
        let slot = slots.register(ExtraDataSlotDef::new("Test.v", 16)).unwrap();
        let mut world = WorldStorage::new(slots);
        let addr = ChunkAddress::new(1, 0, -1);
        world.ensure_loaded(addr);
        world.ensure_loaded(ChunkAddress::new(2, 0, -1));

        world
            .set_extra_data(slot, IVec3::new(32 + 4, 2, -32 + 6), 11)
            .unwrap();
        world.set_extra_data(slot, IVec3::new(64, 0, -32), 12).unwrap();

        let view = world.view(addr);
        assert_eq!(view.origin(), IVec3::new(32, 0, -32));
        assert_eq!(view.get_extra_data(slot, IVec3::new(4, 2, 6)), 11);
        // Reaches into the +X neighbour.
        assert_eq!(view.get_extra_data(slot, IVec3::new(32, 0, 0)), 12);
    }

    #[test]
    fn test_far_view_does_not_overflow() {
        let mut slots = ExtraDataSlotRegistry::new();
        let slot = slots.register(ExtraDataSlotDef::new("Test.v", 16)).unwrap();
        let world = WorldStorage::new(slots);
        let view = world.view(ChunkAddress::new(i32::MAX / 16, 0, 0));
        let edge = view.to_world(IVec3::new(i32::MAX, 0, 0));
        assert_eq!(edge.x, view.origin().x.wrapping_add(i32::MAX));
        assert_eq!(view.get_extra_data(slot, IVec3::new(31, 0, 0)), 0);
    }
}
