//! Extra-data slot registry: maps slot names to compact [`ExtraDataSlotId`] values.
//!
//! Slots are registered once while modules load, before any chunk is created.
//! Every registered slot gets one value per block in every chunk.

use rustc_hash::FxHashMap;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Index of a registered extra-data slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtraDataSlotId(pub u16);

/// Description of a registered slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtraDataSlotDef {
    /// Unique slot name, conventionally `Module.field` (e.g. "BiomesAPI.biomeHash").
    pub name: String,
    /// Width of each stored value in bits: 4, 8 or 16.
    pub bit_size: u8,
}

impl ExtraDataSlotDef {
    /// Creates a slot description.
    pub fn new(name: impl Into<String>, bit_size: u8) -> Self {
        Self {
            name: name.into(),
            bit_size,
        }
    }

    /// Mask applied to values written into this slot.
    pub fn value_mask(&self) -> u16 {
        if self.bit_size >= 16 {
            u16::MAX
        } else {
            (1u16 << self.bit_size) - 1
        }
    }
}

/// Errors that can occur during slot registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    /// A slot with the same name has already been registered.
    #[error("duplicate extra-data slot name: {0}")]
    DuplicateName(String),
    /// The requested width is not one of 4, 8 or 16 bits.
    #[error("unsupported extra-data slot width {bit_size} for {name} (expected 4, 8 or 16)")]
    UnsupportedBitSize {
        /// Slot name.
        name: String,
        /// Requested width.
        bit_size: u8,
    },
    /// All slots have been consumed.
    #[error("extra-data slot registry is full (max 256 slots)")]
    RegistryFull,
}

/// Maximum number of extra-data slots.
pub const MAX_SLOTS: usize = 256;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`ExtraDataSlotId`] → [`ExtraDataSlotDef`] with O(1) lookup by index
/// and by name.
#[derive(Clone, Debug, Default)]
pub struct ExtraDataSlotRegistry {
    /// Dense array where `index == ExtraDataSlotId.0`.
    slots: Vec<ExtraDataSlotDef>,
    name_to_id: FxHashMap<String, ExtraDataSlotId>,
}

impl ExtraDataSlotRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new slot and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::DuplicateName`] if the name is taken,
    /// [`SlotError::UnsupportedBitSize`] for widths other than 4, 8 or 16, and
    /// [`SlotError::RegistryFull`] once [`MAX_SLOTS`] slots exist.
    pub fn register(&mut self, def: ExtraDataSlotDef) -> Result<ExtraDataSlotId, SlotError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(SlotError::DuplicateName(def.name));
        }
        if !matches!(def.bit_size, 4 | 8 | 16) {
            return Err(SlotError::UnsupportedBitSize {
                name: def.name,
                bit_size: def.bit_size,
            });
        }
        if self.slots.len() >= MAX_SLOTS {
            return Err(SlotError::RegistryFull);
        }

        let id = ExtraDataSlotId(self.slots.len() as u16);
        tracing::debug!(slot = %def.name, bits = def.bit_size, id = id.0, "registered extra-data slot");
        self.name_to_id.insert(def.name.clone(), id);
        self.slots.push(def);
        Ok(id)
    }

    /// Returns the definition for a given ID, or `None` if it was never registered.
    pub fn get(&self, id: ExtraDataSlotId) -> Option<&ExtraDataSlotDef> {
        self.slots.get(id.0 as usize)
    }

    /// Returns the ID of a named slot, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<ExtraDataSlotId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the number of registered slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
