//! Host-side per-block extra data: named slots, chunk storage, and world lookups.
//!
//! Extra data is a fixed-width value per block and per slot, kept next to the
//! voxel data of each chunk. Modules register the slots they need once at load
//! time and address them afterwards through [`ExtraDataSlotId`].

pub mod chunk;
pub mod chunk_manager;
pub mod coords;
pub mod slots;
pub mod store;
pub mod view;

pub use chunk::{CHUNK_SIZE, CHUNK_VOLUME, ChunkExtraData};
pub use chunk_manager::{ChunkAddress, ChunkManager};
pub use coords::{block_pos, chunk_address_of, chunk_origin, local_pos_of};
pub use slots::{ExtraDataSlotDef, ExtraDataSlotId, ExtraDataSlotRegistry, SlotError};
pub use store::{ExtraDataStore, WorldError, WorldStorage};
pub use view::ChunkView;
