//! Biome metadata for voxel worlds.
//!
//! Biomes are registered once per session in a [`BiomeRegistry`] and assigned
//! to blocks through a 16-bit extra-data slot holding each biome's
//! [`BiomeHash`]. Player movement across an assignment boundary produces an
//! [`OnBiomeChanged`] event; the registry also feeds the debug metrics overlay
//! and the grass/foliage colour lookup.

mod biome;
mod color;
mod detector;
mod ecs;
mod error;
mod events;
mod metrics;
mod registry;

pub use biome::{
    Biome, BiomeBuilder, BiomeHash, BiomeId, BlockSelector, BlockUri, DEFAULT_SNOW_HEIGHT,
    DEFAULT_SOIL_BLOCK, DEFAULT_SOIL_DEPTH, DEFAULT_SOLID_BLOCK, DEFAULT_SURFACE_BLOCK,
};
pub use color::{BiomeColorProvider, ColorLut, LutError, WHITE};
pub use detector::{BiomeChange, BiomeChangeDetector};
pub use ecs::{
    BiomeInbox, BiomeNotification, EntityMoved, PlayerCharacter, PlayerSpawned, biome_change_system,
    register_biome_resources,
};
pub use error::BiomeError;
pub use events::{BiomeEventBuffer, OnBiomeChanged};
pub use metrics::BiomesMetricsMode;
pub use registry::{BIOME_HASH_BITS, BiomeRegistry, SharedBiomeRegistry};
