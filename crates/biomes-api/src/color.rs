//! Grass and foliage colour lookup by biome climate.
//!
//! A lookup table is an RGBA image indexed by temperature along X and by
//! `humidity * temperature` along Y, both reversed so that hot and wet sits at
//! the origin.

use std::path::Path;

use bevy_ecs::prelude::*;
use biomes_config::ColorConfig;
use biomes_world::ExtraDataStore;
use glam::IVec3;
use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::error::BiomeError;
use crate::registry::BiomeRegistry;

/// Colour returned for blocks without a biome.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

const GRADIENT_SIZE: u32 = 256;

/// Errors raised while loading a lookup table.
#[derive(Debug, Error)]
pub enum LutError {
    /// Failed to load an image file.
    #[error("image load error: {0}")]
    ImageLoad(#[from] image::ImageError),

    /// The image has no pixels.
    #[error("lookup table {0} is empty")]
    Empty(String),
}

// ---------------------------------------------------------------------------
// ColorLut
// ---------------------------------------------------------------------------

/// 2D colour lookup table.
#[derive(Debug, Clone)]
pub struct ColorLut {
    image: RgbaImage,
}

impl ColorLut {
    /// Wraps an in-memory image.
    pub fn from_image(image: RgbaImage) -> Result<Self, LutError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(LutError::Empty("<memory>".to_string()));
        }
        Ok(Self { image })
    }

    /// Loads a lookup table from an image file.
    pub fn load(path: &Path) -> Result<Self, LutError> {
        let image = image::open(path)?.to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(LutError::Empty(path.display().to_string()));
        }
        tracing::debug!(
            "Loaded colour lookup table {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    /// Built-in grass gradient: yellow-brown when hot and dry, deep green when
    /// hot and wet, blue-green when cold.
    pub fn grass_gradient() -> Self {
        Self::gradient([191, 183, 85], [71, 205, 51], [128, 180, 151])
    }

    /// Built-in foliage gradient, darker than grass.
    pub fn foliage_gradient() -> Self {
        Self::gradient([174, 164, 42], [26, 191, 0], [96, 161, 123])
    }

    /// Interpolates between a hot-dry, a hot-wet and a cold corner colour.
    fn gradient(dry: [u8; 3], wet: [u8; 3], cold: [u8; 3]) -> Self {
        let max = (GRADIENT_SIZE - 1) as f32;
        let image = RgbaImage::from_fn(GRADIENT_SIZE, GRADIENT_SIZE, |x, y| {
            let coldness = x as f32 / max;
            let dryness = y as f32 / max;
            let mut rgb = [0u8; 3];
            for (i, channel) in rgb.iter_mut().enumerate() {
                let warm = lerp(wet[i], dry[i], dryness);
                *channel = lerp_f(warm, cold[i] as f32, coldness).round() as u8;
            }
            Rgba([rgb[0], rgb[1], rgb[2], 255])
        });
        Self { image }
    }

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Colour for the given climate; inputs are clamped to `[0, 1]`.
    pub fn sample(&self, temperature: f32, humidity: f32) -> Rgba<u8> {
        let t = temperature.clamp(0.0, 1.0);
        let h = humidity.clamp(0.0, 1.0);
        let (w, ht) = self.image.dimensions();
        let x = ((1.0 - t) * (w - 1) as f32) as u32;
        let y = ((1.0 - h * t) * (ht - 1) as f32) as u32;
        *self.image.get_pixel(x.min(w - 1), y.min(ht - 1))
    }
}

fn lerp(a: u8, b: u8, t: f32) -> f32 {
    lerp_f(a as f32, b as f32, t)
}

fn lerp_f(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ---------------------------------------------------------------------------
// BiomeColorProvider
// ---------------------------------------------------------------------------

/// Looks up grass and foliage colours for blocks from their biome's climate.
#[derive(Resource, Debug, Clone)]
pub struct BiomeColorProvider {
    grass: ColorLut,
    foliage: ColorLut,
}

impl BiomeColorProvider {
    /// Creates a provider from two lookup tables.
    pub fn new(grass: ColorLut, foliage: ColorLut) -> Self {
        Self { grass, foliage }
    }

    /// Loads the configured lookup tables, falling back to the built-in
    /// gradients for paths left unset.
    pub fn from_config(config: &ColorConfig) -> Result<Self, LutError> {
        let grass = match &config.grass_lut {
            Some(path) => ColorLut::load(path)?,
            None => ColorLut::grass_gradient(),
        };
        let foliage = match &config.foliage_lut {
            Some(path) => ColorLut::load(path)?,
            None => ColorLut::foliage_gradient(),
        };
        Ok(Self::new(grass, foliage))
    }

    /// Grass colour at `pos`; white if the block has no biome.
    pub fn color_lut<S: ExtraDataStore + ?Sized>(
        &self,
        registry: &BiomeRegistry,
        store: &S,
        pos: IVec3,
    ) -> Result<Rgba<u8>, BiomeError> {
        Self::lookup(&self.grass, registry, store, pos)
    }

    /// Foliage colour at `pos`; white if the block has no biome.
    pub fn foliage_lut<S: ExtraDataStore + ?Sized>(
        &self,
        registry: &BiomeRegistry,
        store: &S,
        pos: IVec3,
    ) -> Result<Rgba<u8>, BiomeError> {
        Self::lookup(&self.foliage, registry, store, pos)
    }

    fn lookup<S: ExtraDataStore + ?Sized>(
        lut: &ColorLut,
        registry: &BiomeRegistry,
        store: &S,
        pos: IVec3,
    ) -> Result<Rgba<u8>, BiomeError> {
        Ok(registry
            .get_biome(store, pos)?
            .map_or(WHITE, |biome| lut.sample(biome.temperature(), biome.humidity())))
    }
}
