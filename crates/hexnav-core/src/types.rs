//! Core type aliases used throughout the crate.

/// Dense tile index (`y * width + x`), stable for the lifetime of a map.
pub type TileId = u32;

/// Passable area identifier. Ids start at 1 and are dense per rebuild.
pub type AreaId = u32;

/// Unique identifier for a unit.
pub type UnitId = u64;
