//! Per-chunk extra-data storage with bounds-checked access.
//!
//! [`ChunkExtraData`] keeps one `u16` per block for every registered slot.
//! A slot's layer is only allocated on its first write, so chunks that never
//! receive a value for a slot read back zero without spending memory.

use crate::slots::ExtraDataSlotId;

/// Number of blocks along each axis of a chunk.
pub const CHUNK_SIZE: usize = 32;

/// Total number of blocks in a chunk (32³).
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Extra data for every block of one chunk.
///
/// Coordinates are `u8` values in `[0, 32)`. Out-of-bounds reads return 0,
/// and out-of-bounds writes are ignored with a warning log.
#[derive(Clone, Debug, Default)]
pub struct ChunkExtraData {
    /// Indexed by `ExtraDataSlotId.0`; `None` until the slot is first written.
    layers: Vec<Option<Box<[u16]>>>,
}

impl ChunkExtraData {
    /// Creates a chunk with every slot reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `slot` at `(x, y, z)`.
    ///
    /// Returns 0 if the slot was never written in this chunk or any coordinate
    /// is out of bounds (`>= 32`).
    pub fn get(&self, slot: ExtraDataSlotId, x: u8, y: u8, z: u8) -> u16 {
        if !Self::in_bounds(x, y, z) {
            tracing::warn!("ChunkExtraData::get out of bounds: ({}, {}, {})", x, y, z);
            return 0;
        }
        match self.layers.get(slot.0 as usize) {
            Some(Some(layer)) => layer[Self::index(x, y, z)],
            _ => 0,
        }
    }

    /// Sets the value of `slot` at `(x, y, z)`.
    ///
    /// No-op with a warning log if any coordinate is out of bounds (`>= 32`).
    pub fn set(&mut self, slot: ExtraDataSlotId, x: u8, y: u8, z: u8, value: u16) {
        if !Self::in_bounds(x, y, z) {
            tracing::warn!("ChunkExtraData::set out of bounds: ({}, {}, {})", x, y, z);
            return;
        }
        let layer = self.layer_mut(slot);
        layer[Self::index(x, y, z)] = value;
    }

    /// Returns `true` if `slot` has been written at least once in this chunk.
    pub fn has_layer(&self, slot: ExtraDataSlotId) -> bool {
        matches!(self.layers.get(slot.0 as usize), Some(Some(_)))
    }

    fn layer_mut(&mut self, slot: ExtraDataSlotId) -> &mut [u16] {
        let idx = slot.0 as usize;
        if self.layers.len() <= idx {
            self.layers.resize_with(idx + 1, || None);
        }
        self.layers[idx].get_or_insert_with(|| vec![0; CHUNK_VOLUME].into_boxed_slice())
    }

    fn index(x: u8, y: u8, z: u8) -> usize {
        x as usize + z as usize * CHUNK_SIZE + y as usize * CHUNK_SIZE * CHUNK_SIZE
    }

    fn in_bounds(x: u8, y: u8, z: u8) -> bool {
        (x as usize) < CHUNK_SIZE && (y as usize) < CHUNK_SIZE && (z as usize) < CHUNK_SIZE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SLOT_A: ExtraDataSlotId = ExtraDataSlotId(0);
    const SLOT_B: ExtraDataSlotId = ExtraDataSlotId(3);

    #[test]
    fn test_empty_chunk_reads_zero() {
        let chunk = ChunkExtraData::new();
        assert_eq!(chunk.get(SLOT_A, 0, 0, 0), 0);
        assert_eq!(chunk.get(SLOT_B, 31, 31, 31), 0);
        assert!(!chunk.has_layer(SLOT_A));
    }

    #[test]
    fn test_set_then_get() {
        let mut chunk = ChunkExtraData::new();
        chunk.set(SLOT_A, 5, 10, 20, 7814);
        assert_eq!(chunk.get(SLOT_A, 5, 10, 20), 7814);
        assert_eq!(chunk.get(SLOT_A, 4, 10, 20), 0);
        assert_eq!(chunk.get(SLOT_A, 5, 11, 20), 0);
        // Other slots are independent.
        assert_eq!(chunk.get(SLOT_B, 5, 10, 20), 0);
    }

    #[test]
    fn test_layers_allocated_lazily() {
        let mut chunk = ChunkExtraData::new();
        chunk.set(SLOT_B, 1, 1, 1, 9);
        assert!(chunk.has_layer(SLOT_B));
        assert!(!chunk.has_layer(SLOT_A));
        assert!(!chunk.has_layer(ExtraDataSlotId(1)));
    }

    #[test]
    fn test_set_out_of_bounds_no_panic() {
        let mut chunk = ChunkExtraData::new();
        chunk.set(SLOT_A, 32, 0, 0, 1);
        chunk.set(SLOT_A, 0, 255, 0, 1);
        assert_eq!(chunk.get(SLOT_A, 32, 0, 0), 0);
        assert!(!chunk.has_layer(SLOT_A));
    }
}
