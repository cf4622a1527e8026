//! Conversions between continuous world positions, block positions, and chunk-local positions.

use glam::{IVec3, Vec3};

use crate::chunk::CHUNK_SIZE;
use crate::chunk_manager::ChunkAddress;

const SIZE: i32 = CHUNK_SIZE as i32;

/// Returns the block containing a continuous world position (floor rounding).
pub fn block_pos(position: Vec3) -> IVec3 {
    position.floor().as_ivec3()
}

/// Returns the address of the chunk containing a block.
pub fn chunk_address_of(pos: IVec3) -> ChunkAddress {
    ChunkAddress::new(
        pos.x.div_euclid(SIZE),
        pos.y.div_euclid(SIZE),
        pos.z.div_euclid(SIZE),
    )
}

/// Returns a block's position inside its chunk, each component in `[0, 32)`.
pub fn local_pos_of(pos: IVec3) -> (u8, u8, u8) {
    (
        pos.x.rem_euclid(SIZE) as u8,
        pos.y.rem_euclid(SIZE) as u8,
        pos.z.rem_euclid(SIZE) as u8,
    )
}

/// Returns the world position of a chunk's `(0, 0, 0)` block.
///
/// Addresses whose blocks lie outside the `i32` range wrap around.
pub fn chunk_origin(addr: ChunkAddress) -> IVec3 {
    IVec3::new(addr.x, addr.y, addr.z).wrapping_mul(IVec3::splat(SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_pos_floors_negative() {
        assert_eq!(block_pos(Vec3::new(0.5, 1.99, -0.01)), IVec3::new(0, 1, -1));
        assert_eq!(block_pos(Vec3::new(-1.0, -1.5, 2.0)), IVec3::new(-1, -2, 2));
    }

    #[test]
    fn test_chunk_address_of() {
        assert_eq!(chunk_address_of(IVec3::new(0, 0, 0)), ChunkAddress::new(0, 0, 0));
        assert_eq!(chunk_address_of(IVec3::new(31, 32, 33)), ChunkAddress::new(0, 1, 1));
        assert_eq!(chunk_address_of(IVec3::new(-1, -32, -33)), ChunkAddress::new(-1, -1, -2));
    }

    #[test]
    fn test_local_pos_of() {
        assert_eq!(local_pos_of(IVec3::new(0, 33, 31)), (0, 1, 31));
        assert_eq!(local_pos_of(IVec3::new(-1, -32, -33)), (31, 0, 31));
    }

    #[test]
    fn test_origin_and_local_reassemble_position() {
        for pos in [IVec3::new(-70, 5, 129), IVec3::new(63, -64, 0)] {
            let (lx, ly, lz) = local_pos_of(pos);
            let rebuilt = chunk_origin(chunk_address_of(pos))
                + IVec3::new(lx as i32, ly as i32, lz as i32);
            assert_eq!(rebuilt, pos);
        }
    }

    #[test]
    fn test_chunk_origin_far_address_wraps() {
        let origin = chunk_origin(ChunkAddress::new(i32::MAX / 16, 0, i32::MIN));
        assert_eq!(origin.x, (i32::MAX / 16).wrapping_mul(32));
        assert_eq!(origin.z, 0);
    }
}
