//! Owner of all loaded chunks' extra data, keyed by [`ChunkAddress`].
//!
//! Uses an [`FxHashMap`](rustc_hash::FxHashMap) for fast hashing of small
//! fixed-size keys.

use rustc_hash::FxHashMap;

use crate::chunk::ChunkExtraData;

/// Chunk-grid position of a chunk (world block coordinates divided by 32).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkAddress {
    /// Chunk-grid X coordinate.
    pub x: i32,
    /// Chunk-grid Y coordinate.
    pub y: i32,
    /// Chunk-grid Z coordinate.
    pub z: i32,
}

impl ChunkAddress {
    /// Creates a new chunk address.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for ChunkAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Owns all currently loaded chunks.
#[derive(Debug, Default)]
pub struct ChunkManager {
    chunks: FxHashMap<ChunkAddress, ChunkExtraData>,
}

impl ChunkManager {
    /// Creates an empty chunk manager with no loaded chunks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chunk at `addr`, loading an empty one first if needed.
    pub fn get_or_load(&mut self, addr: ChunkAddress) -> &mut ChunkExtraData {
        self.chunks.entry(addr).or_default()
    }

    /// Immutable access to a loaded chunk.
    pub fn get_chunk(&self, addr: &ChunkAddress) -> Option<&ChunkExtraData> {
        self.chunks.get(addr)
    }

    /// Mutable access to a loaded chunk.
    pub fn get_chunk_mut(&mut self, addr: &ChunkAddress) -> Option<&mut ChunkExtraData> {
        self.chunks.get_mut(addr)
    }

    /// Returns `true` if a chunk is loaded at `addr`.
    pub fn is_loaded(&self, addr: &ChunkAddress) -> bool {
        self.chunks.contains_key(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::ExtraDataSlotId;

    #[test]
    fn test_get_or_load_creates_once() {
        let mut mgr = ChunkManager::new();
        let addr = ChunkAddress::new(1, -2, 3);
        assert!(!mgr.is_loaded(&addr));

        mgr.get_or_load(addr).set(ExtraDataSlotId(0), 1, 2, 3, 99);
        assert!(mgr.is_loaded(&addr));
        assert_eq!(mgr.get_or_load(addr).get(ExtraDataSlotId(0), 1, 2, 3), 99);
        assert!(mgr.get_chunk(&ChunkAddress::new(2, -2, 3)).is_none());
    }

    #[test]
    fn test_get_chunk_mut_only_for_loaded() {
        let mut mgr = ChunkManager::new();
        let addr = ChunkAddress::new(0, 0, 0);
        assert!(mgr.get_chunk_mut(&addr).is_none());
        mgr.get_or_load(addr);
        mgr.get_chunk_mut(&addr)
            .unwrap()
            .set(ExtraDataSlotId(1), 0, 0, 0, 5);
        assert_eq!(mgr.get_chunk(&addr).unwrap().get(ExtraDataSlotId(1), 0, 0, 0), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(ChunkAddress::new(1, -2, 3).to_string(), "[1, -2, 3]");
    }
}
