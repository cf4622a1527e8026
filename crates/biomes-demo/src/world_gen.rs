//! Sample biomes and a striped test world for the demo.

use std::sync::Arc;

use biomes_api::{Biome, BiomeError, BiomeRegistry, BlockUri};
use biomes_world::{CHUNK_SIZE, ChunkAddress, WorldStorage};

/// Width of each biome stripe along X, in blocks.
pub const STRIPE_WIDTH: i32 = 24;

/// Chunks along X that receive biome data. One more chunk past the end is
/// loaded but left empty, like a chunk still generating.
pub const CHUNKS_X: std::ops::Range<i32> = -2..2;

/// The four biomes the demo registers.
pub fn sample_biomes() -> Result<Vec<Biome>, BiomeError> {
    Ok(vec![
        Biome::builder("CoreWorlds:Grassland", "Grassland")
            .temperature(0.6)
            .humidity(0.5)
            .build()?,
        Biome::builder("CoreWorlds:Desert", "Desert")
            .temperature(0.95)
            .humidity(0.05)
            .surface_block("CoreAssets:Sand")
            .soil_block("CoreAssets:Sand")
            .soil_depth(8)
            .build()?,
        Biome::builder("CoreWorlds:Forest", "Forest")
            .temperature(0.7)
            .humidity(0.8)
            .build()?,
        Biome::builder("CoreWorlds:Tundra", "Tundra")
            .temperature(0.1)
            .humidity(0.3)
            .surface_block_with(|pos| {
                if pos.y > 40 {
                    BlockUri::new("CoreAssets:Snow")
                } else {
                    BlockUri::new("CoreAssets:Grass")
                }
            })
            .high_altitude_snow(64)
            .build()?,
    ])
}

/// Registers every sample biome. A hash collision aborts startup.
pub fn register_all(registry: &mut BiomeRegistry) -> Result<Vec<Arc<Biome>>, BiomeError> {
    sample_biomes()?
        .into_iter()
        .map(|biome| registry.register(biome))
        .collect()
}

/// Biome of the stripe containing world column `x`.
pub fn stripe_biome(biomes: &[Arc<Biome>], x: i32) -> &Arc<Biome> {
    let stripe = x.div_euclid(STRIPE_WIDTH).rem_euclid(biomes.len() as i32);
    &biomes[stripe as usize]
}

/// Loads a row of chunks along X and stripes the bottom layers with biomes.
pub fn populate(
    registry: &BiomeRegistry,
    storage: &mut WorldStorage,
    biomes: &[Arc<Biome>],
) -> Result<(), BiomeError> {
    for cx in CHUNKS_X {
        let addr = ChunkAddress::new(cx, 0, 0);
        let chunk = storage.ensure_loaded(addr);
        for lx in 0..CHUNK_SIZE {
            let biome = stripe_biome(biomes, cx * CHUNK_SIZE as i32 + lx as i32);
            for y in 0..4u8 {
                for lz in 0..CHUNK_SIZE {
                    registry.set_biome_in_chunk(chunk, biome, (lx as u8, y, lz as u8))?;
                }
            }
        }
    }
    storage.ensure_loaded(ChunkAddress::new(CHUNKS_X.end, 0, 0));

    tracing::info!(
        "Populated {} chunks with {} biomes",
        CHUNKS_X.len(),
        biomes.len()
    );
    Ok(())
}
