//! Biome descriptor, identifier, and hash.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use glam::IVec3;

use crate::error::BiomeError;

/// Block placed on the surface when a biome does not choose one.
pub const DEFAULT_SURFACE_BLOCK: &str = "CoreAssets:Grass";
/// Block placed below the surface when a biome does not choose one.
pub const DEFAULT_SOIL_BLOCK: &str = "CoreAssets:Dirt";
/// Block filling everything below the soil when a biome does not choose one.
pub const DEFAULT_SOLID_BLOCK: &str = "CoreAssets:stone";
/// Default number of soil blocks below the surface block.
pub const DEFAULT_SOIL_DEPTH: u32 = 32;
/// Default altitude above sea level where high-altitude snow starts.
pub const DEFAULT_SNOW_HEIGHT: i32 = 96;

// ---------------------------------------------------------------------------
// BiomeId
// ---------------------------------------------------------------------------

/// Module-qualified biome identifier of the form `module:name`.
///
/// Identifiers compare case-insensitively; the original spelling is kept for
/// display.
#[derive(Clone, Debug)]
pub struct BiomeId {
    raw: String,
    normalized: String,
    separator: usize,
}

impl BiomeId {
    /// Parses a `module:name` identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::InvalidId`] unless the string has exactly one `:`
    /// with a non-empty, whitespace-free part on each side.
    pub fn parse(raw: &str) -> Result<Self, BiomeError> {
        let invalid = || BiomeError::InvalidId(raw.to_string());
        let (module, name) = raw.split_once(':').ok_or_else(invalid)?;
        if module.is_empty()
            || name.is_empty()
            || name.contains(':')
            || raw.chars().any(char::is_whitespace)
        {
            return Err(invalid());
        }
        Ok(Self {
            raw: raw.to_string(),
            normalized: raw.to_lowercase(),
            separator: module.len(),
        })
    }

    /// Module the biome comes from.
    pub fn module(&self) -> &str {
        &self.raw[..self.separator]
    }

    /// Biome name within its module.
    pub fn name(&self) -> &str {
        &self.raw[self.separator + 1..]
    }

    /// The identifier as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercase form used for comparison and hashing.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl PartialEq for BiomeId {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for BiomeId {}

impl std::hash::Hash for BiomeId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl FromStr for BiomeId {
    type Err = BiomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ---------------------------------------------------------------------------
// BiomeHash
// ---------------------------------------------------------------------------

/// 16-bit key stored per block to record its biome. `0` means "no biome".
///
/// Saved worlds store this value rather than the identifier, so the hash
/// function must never change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeHash(pub u16);

impl BiomeHash {
    /// Reserved value for blocks without an assigned biome.
    pub const NONE: BiomeHash = BiomeHash(0);

    /// Hash of an identifier: `h = h * 31 + unit` over the UTF-16 code units
    /// of the lowercase identifier, seeded at 0 and wrapping at 16 bits.
    pub fn of_str(id: &str) -> Self {
        let hash = id
            .to_lowercase()
            .encode_utf16()
            .fold(0u16, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit));
        Self(hash)
    }

    /// Hash of a parsed identifier.
    pub fn of(id: &BiomeId) -> Self {
        Self::of_str(id.normalized())
    }

    /// Returns `true` for [`BiomeHash::NONE`].
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for BiomeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// Block URI of the form `Module:block`, resolved by the host's block manager.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockUri(String);

impl BlockUri {
    /// Creates a block URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Chooses a block for a world position.
pub type BlockSelector = Arc<dyn Fn(IVec3) -> BlockUri + Send + Sync>;

fn constant_block(uri: &'static str) -> BlockSelector {
    Arc::new(move |_| BlockUri::new(uri))
}

// ---------------------------------------------------------------------------
// Biome
// ---------------------------------------------------------------------------

/// Descriptor of one biome: identity, climate, and block choices.
///
/// Built with [`Biome::builder`]. The registry only looks at the id and hash;
/// the remaining attributes are read by world generation and rendering.
#[derive(Clone)]
pub struct Biome {
    id: BiomeId,
    display_name: String,
    hash: BiomeHash,
    temperature: f32,
    humidity: f32,
    surface_block: BlockSelector,
    soil_block: BlockSelector,
    solid_block: BlockSelector,
    soil_depth: u32,
    high_altitude_snow: bool,
    snow_height: i32,
}

impl Biome {
    /// Starts building a biome with the given `module:name` id and display name.
    pub fn builder(id: impl Into<String>, display_name: impl Into<String>) -> BiomeBuilder {
        BiomeBuilder {
            id: id.into(),
            display_name: display_name.into(),
            hash: None,
            temperature: 0.5,
            humidity: 0.5,
            surface_block: None,
            soil_block: None,
            solid_block: None,
            soil_depth: DEFAULT_SOIL_DEPTH,
            high_altitude_snow: false,
            snow_height: DEFAULT_SNOW_HEIGHT,
        }
    }

    /// Module-qualified identifier.
    pub fn id(&self) -> &BiomeId {
        &self.id
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Non-zero hash stored per block.
    pub fn hash(&self) -> BiomeHash {
        self.hash
    }

    /// Temperature in `[0, 1]`.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Humidity in `[0, 1]`.
    pub fn humidity(&self) -> f32 {
        self.humidity
    }

    /// Block forming the top layer at `pos`.
    pub fn surface_block(&self, pos: IVec3) -> BlockUri {
        (self.surface_block)(pos)
    }

    /// Block used for the [`soil_depth`](Self::soil_depth) layers below the surface.
    pub fn soil_block(&self, pos: IVec3) -> BlockUri {
        (self.soil_block)(pos)
    }

    /// Block filling everything below the soil.
    pub fn solid_block(&self, pos: IVec3) -> BlockUri {
        (self.solid_block)(pos)
    }

    /// Number of soil blocks directly below the surface block.
    pub fn soil_depth(&self) -> u32 {
        self.soil_depth
    }

    /// Whether surface blocks above [`snow_height`](Self::snow_height) become snow.
    pub fn has_high_altitude_snow(&self) -> bool {
        self.high_altitude_snow
    }

    /// Minimum altitude above sea level for snow.
    pub fn snow_height(&self) -> i32 {
        self.snow_height
    }
}

impl PartialEq for Biome {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.id == other.id
    }
}

impl Eq for Biome {}

impl fmt::Debug for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Biome")
            .field("id", &self.id.as_str())
            .field("display_name", &self.display_name)
            .field("hash", &self.hash)
            .field("temperature", &self.temperature)
            .field("humidity", &self.humidity)
            .field("soil_depth", &self.soil_depth)
            .field("high_altitude_snow", &self.high_altitude_snow)
            .field("snow_height", &self.snow_height)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Biome`]; every attribute not set keeps its default.
pub struct BiomeBuilder {
    id: String,
    display_name: String,
    hash: Option<BiomeHash>,
    temperature: f32,
    humidity: f32,
    surface_block: Option<BlockSelector>,
    soil_block: Option<BlockSelector>,
    solid_block: Option<BlockSelector>,
    soil_depth: u32,
    high_altitude_snow: bool,
    snow_height: i32,
}

impl BiomeBuilder {
    /// Overrides the hash derived from the id.
    ///
    /// Use a constant per biome when the derived hash collides or is zero.
    pub fn with_hash(mut self, hash: u16) -> Self {
        self.hash = Some(BiomeHash(hash));
        self
    }

    /// Temperature, clamped to `[0, 1]`.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Humidity, clamped to `[0, 1]`.
    pub fn humidity(mut self, humidity: f32) -> Self {
        self.humidity = humidity;
        self
    }

    /// Fixed surface block.
    pub fn surface_block(self, uri: impl Into<String>) -> Self {
        let uri = BlockUri::new(uri);
        self.surface_block_with(move |_| uri.clone())
    }

    /// Position-dependent surface block.
    pub fn surface_block_with(
        mut self,
        select: impl Fn(IVec3) -> BlockUri + Send + Sync + 'static,
    ) -> Self {
        self.surface_block = Some(Arc::new(select));
        self
    }

    /// Fixed soil block.
    pub fn soil_block(self, uri: impl Into<String>) -> Self {
        let uri = BlockUri::new(uri);
        self.soil_block_with(move |_| uri.clone())
    }

    /// Position-dependent soil block.
    pub fn soil_block_with(
        mut self,
        select: impl Fn(IVec3) -> BlockUri + Send + Sync + 'static,
    ) -> Self {
        self.soil_block = Some(Arc::new(select));
        self
    }

    /// Fixed solid block.
    pub fn solid_block(self, uri: impl Into<String>) -> Self {
        let uri = BlockUri::new(uri);
        self.solid_block_with(move |_| uri.clone())
    }

    /// Position-dependent solid block.
    pub fn solid_block_with(
        mut self,
        select: impl Fn(IVec3) -> BlockUri + Send + Sync + 'static,
    ) -> Self {
        self.solid_block = Some(Arc::new(select));
        self
    }

    /// Number of soil blocks below the surface.
    pub fn soil_depth(mut self, depth: u32) -> Self {
        self.soil_depth = depth;
        self
    }

    /// Enables snow above `height` blocks over sea level.
    pub fn high_altitude_snow(mut self, height: i32) -> Self {
        self.high_altitude_snow = true;
        self.snow_height = height;
        self
    }

    /// Validates the id and hash and produces the descriptor.
    ///
    /// # Errors
    ///
    /// [`BiomeError::InvalidId`] for a malformed id, [`BiomeError::ZeroHash`]
    /// if the final hash is 0.
    pub fn build(self) -> Result<Biome, BiomeError> {
        let id = BiomeId::parse(&self.id)?;
        let hash = self.hash.unwrap_or_else(|| BiomeHash::of(&id));
        if hash.is_none() {
            return Err(BiomeError::ZeroHash { id: self.id });
        }
        Ok(Biome {
            id,
            display_name: self.display_name,
            hash,
            temperature: self.temperature.clamp(0.0, 1.0),
            humidity: self.humidity.clamp(0.0, 1.0),
            surface_block: self
                .surface_block
                .unwrap_or_else(|| constant_block(DEFAULT_SURFACE_BLOCK)),
            soil_block: self
                .soil_block
                .unwrap_or_else(|| constant_block(DEFAULT_SOIL_BLOCK)),
            solid_block: self
                .solid_block
                .unwrap_or_else(|| constant_block(DEFAULT_SOLID_BLOCK)),
            soil_depth: self.soil_depth,
            high_altitude_snow: self.high_altitude_snow,
            snow_height: self.snow_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_hash() {
        assert_eq!(BiomeHash::of_str("core:grassland"), BiomeHash(7814));
        assert_eq!(BiomeHash::of_str("core:desert"), BiomeHash(28752));
        assert_eq!(BiomeHash::of_str("core:forest"), BiomeHash(39000));
    }

    #[test]
    fn test_hash_is_deterministic_and_case_insensitive() {
        let a = BiomeHash::of_str("core:grassland");
        let b = BiomeHash::of_str("core:grassland");
        let upper = BiomeHash::of_str("CORE:Grassland");
        assert_eq!(a, b);
        assert_eq!(a, upper);
        assert!(!a.is_none());
    }

    #[test]
    fn test_id_parts() {
        let id = BiomeId::parse("CoreWorlds:Snowy_Peaks").unwrap();
        assert_eq!(id.module(), "CoreWorlds");
        assert_eq!(id.name(), "Snowy_Peaks");
        assert_eq!(id.normalized(), "coreworlds:snowy_peaks");
        assert_eq!(id.to_string(), "CoreWorlds:Snowy_Peaks");
        assert_eq!(id, BiomeId::parse("coreworlds:snowy_peaks").unwrap());
    }

    #[test]
    fn test_invalid_ids_rejected() {
        for raw in ["grassland", ":grassland", "core:", "core:grass:land", "core:grass land"] {
            assert_eq!(
                BiomeId::parse(raw),
                Err(BiomeError::InvalidId(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_builder_defaults() {
        let biome = Biome::builder("core:plains", "Plains").build().unwrap();
        let pos = IVec3::new(1, 2, 3);
        assert_eq!(biome.hash(), BiomeHash::of_str("core:plains"));
        assert_eq!(biome.temperature(), 0.5);
        assert_eq!(biome.humidity(), 0.5);
        assert_eq!(biome.surface_block(pos).as_str(), DEFAULT_SURFACE_BLOCK);
        assert_eq!(biome.soil_block(pos).as_str(), DEFAULT_SOIL_BLOCK);
        assert_eq!(biome.solid_block(pos).as_str(), DEFAULT_SOLID_BLOCK);
        assert_eq!(biome.soil_depth(), DEFAULT_SOIL_DEPTH);
        assert!(!biome.has_high_altitude_snow());
        assert_eq!(biome.snow_height(), DEFAULT_SNOW_HEIGHT);
    }

    #[test]
    fn test_builder_overrides() {
        let biome = Biome::builder("core:mountains", "Mountains")
            .temperature(1.7)
            .humidity(-0.2)
            .soil_depth(4)
            .surface_block_with(|pos| {
                if pos.y > 120 {
                    BlockUri::new("CoreAssets:Snow")
                } else {
                    BlockUri::new("CoreAssets:Gravel")
                }
            })
            .solid_block("CoreAssets:Granite")
            .high_altitude_snow(110)
            .build()
            .unwrap();

        assert_eq!(biome.temperature(), 1.0);
        assert_eq!(biome.humidity(), 0.0);
        assert_eq!(biome.soil_depth(), 4);
        assert_eq!(biome.surface_block(IVec3::new(0, 130, 0)).as_str(), "CoreAssets:Snow");
        assert_eq!(biome.surface_block(IVec3::new(0, 10, 0)).as_str(), "CoreAssets:Gravel");
        assert_eq!(biome.solid_block(IVec3::ZERO).as_str(), "CoreAssets:Granite");
        assert!(biome.has_high_altitude_snow());
        assert_eq!(biome.snow_height(), 110);
    }

    #[test]
    fn test_zero_hash_requires_override() {
        assert!(BiomeHash::of_str("test:feib").is_none());
        let result = Biome::builder("test:feib", "Zero").build();
        assert_eq!(
            result.unwrap_err(),
            BiomeError::ZeroHash {
                id: "test:feib".to_string()
            }
        );

        let biome = Biome::builder("test:feib", "Zero").with_hash(4242).build().unwrap();
        assert_eq!(biome.hash(), BiomeHash(4242));
    }

    #[test]
    fn test_explicit_zero_hash_rejected() {
        let result = Biome::builder("core:desert", "Desert").with_hash(0).build();
        assert!(matches!(result, Err(BiomeError::ZeroHash { .. })));
    }
}
