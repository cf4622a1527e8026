//! Biome registry error types.

use biomes_world::{SlotError, WorldError};
use glam::IVec3;
use thiserror::Error;

use crate::biome::BiomeHash;

/// Errors raised while defining, registering, or looking up biomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BiomeError {
    /// The identifier is not of the form `module:name`.
    #[error("invalid biome id {0:?}: expected `module:name`")]
    InvalidId(String),

    /// The biome's hash is 0, which is reserved for "no biome".
    #[error("biome {id} hashes to 0; give it an explicit non-zero hash")]
    ZeroHash {
        /// Identifier of the offending biome.
        id: String,
    },

    /// Two biomes share a hash. Fatal at startup.
    #[error("cannot register biome {incoming}: hash {hash} is already used by {existing}")]
    DuplicateHash {
        /// The colliding hash.
        hash: BiomeHash,
        /// Identifier of the biome registered first.
        existing: String,
        /// Identifier of the biome being registered.
        incoming: String,
    },

    /// A block holds a hash no registered biome has: the module defining it is
    /// missing or the stored data is corrupt.
    #[error("block {pos} holds biome hash {hash}, which is not registered")]
    UnregisteredHash {
        /// Hash read from the block.
        hash: BiomeHash,
        /// Block position.
        pos: IVec3,
    },

    /// A biome was assigned to a block without being registered first.
    #[error("biome {id} (hash {hash}) is not registered")]
    UnregisteredBiome {
        /// Identifier of the biome.
        id: String,
        /// Its hash.
        hash: BiomeHash,
    },

    /// One end of a movement has biome data and the other does not.
    #[error("missing biome information for {pos}")]
    MissingBiome {
        /// Block without biome data.
        pos: IVec3,
    },

    /// Registering the biome extra-data slot failed.
    #[error(transparent)]
    Slot(#[from] SlotError),

    /// Writing biome data to the world failed.
    #[error(transparent)]
    Storage(#[from] WorldError),
}
