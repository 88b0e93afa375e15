//! Hexnav Core Library
//!
//! Spatial reasoning for turn-based strategy games played on a hex grid:
//! directed per-edge movement costs, turn-aware A* for units with a
//! per-turn action point budget, and a coarse graph of passable areas for
//! "can this region reach that one" questions.
//!
//! # Design Principles
//!
//! - **Read-only searches**: nothing here moves units or edits the map
//!   behind the caller's back
//! - **No route is not an error**: unreachable targets and unknown ids
//!   come back as `None` or an empty list
//! - **Costs cannot go stale**: terrain edits go through the [`Map`], which
//!   drops the affected cached costs
//! - **One search, one queue**: search state lives on the stack of each
//!   call, so a shared `&Map` can serve searches on several threads
//!
//! # Example
//!
//! ```
//! use hexnav_core::{find_path, AreaGraph, Map, PathConfig, Unit};
//!
//! let map = Map::from_rows(&[
//!     ". . . W W . .",
//!     " . . . W W . .",
//! ])
//! .unwrap();
//!
//! let unit = Unit::new(1, 0, 1.0);
//! let path = find_path(&map, &unit, 2, &PathConfig::default()).unwrap();
//! assert_eq!(path.turns, vec![vec![0, 1], vec![2]]);
//!
//! let graph = AreaGraph::from_map(&map);
//! assert_eq!(graph.find_path(1, 3), Some(vec![1, 2, 3]));
//! ```

// Core modules
pub mod hex;
pub mod map;
pub mod terrain;
pub mod types;

// Search
pub mod areas;
pub mod pathfinding;
pub mod priority_queue;
pub mod unit;

// Configuration
pub mod settings;

// Re-exports for convenience
pub use areas::{AreaConnection, AreaGraph};
pub use hex::{euclidean_distance, hex_distance, Direction, HexCoord};
pub use map::{AreaKind, Map, MapError, PassableArea, Tile};
pub use pathfinding::{
    find_path, find_path_from, find_reachable, is_valid_path, path_cost, PathConfig, PathResult,
};
pub use priority_queue::PriorityQueue;
pub use settings::{EngineSettings, SettingsError};
pub use terrain::{LandForm, MovementRules, Passability, SeaLevel, Terrain, IMPASSABLE};
pub use types::*;
pub use unit::{Actor, MoveKind, Unit};
