//! Actors that move over the map, and how they classify a single step.
//!
//! The engine reads actor state but never changes it. Callers apply a
//! returned path one turn segment at a time.

use crate::map::Map;
use crate::types::{TileId, UnitId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What stepping from one tile onto a neighbour would mean for an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// The step is not legal.
    Blocked,
    /// Ordinary movement.
    #[default]
    Move,
    /// The target is held by an enemy. Only allowed as the final step.
    Attack,
}

/// Movement state the pathfinder consumes.
pub trait Actor {
    /// Tile the actor currently stands on.
    fn tile(&self) -> TileId;

    /// Action points granted at the start of every turn. Must be positive.
    fn action_points(&self) -> f64;

    /// Action points left in the current turn.
    fn action_points_left(&self) -> f64;

    /// Classify a step from `from` to `to`.
    ///
    /// The pathfinder also calls this once with the start and the final
    /// destination, and gives up when that returns [`MoveKind::Blocked`].
    fn move_kind(&self, _map: &Map, _from: TileId, _to: TileId) -> MoveKind {
        MoveKind::Move
    }
}

/// A land unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub tile: TileId,
    /// Per-turn budget from the unit's definition.
    pub action_points: f64,
    pub action_points_left: f64,
    /// Military units may attack; others are blocked by enemies.
    pub military: bool,
    /// Tiles the unit can see enemy units or cities on.
    pub hostile_tiles: HashSet<TileId>,
}

impl Unit {
    /// Create a unit with a full budget and no known enemies.
    pub fn new(id: UnitId, tile: TileId, action_points: f64) -> Self {
        Self {
            id,
            tile,
            action_points,
            action_points_left: action_points,
            military: true,
            hostile_tiles: HashSet::new(),
        }
    }

    /// Restore the budget at the start of a turn.
    pub fn reset_action_points(&mut self) {
        self.action_points_left = self.action_points;
    }
}

impl Actor for Unit {
    fn tile(&self) -> TileId {
        self.tile
    }

    fn action_points(&self) -> f64 {
        self.action_points
    }

    fn action_points_left(&self) -> f64 {
        self.action_points_left
    }

    fn move_kind(&self, map: &Map, from: TileId, to: TileId) -> MoveKind {
        let from_area = map.tile(from).and_then(|t| t.area());
        let to_area = map.tile(to).and_then(|t| t.area());

        // Land units never leave their landmass
        match (from_area, to_area) {
            (Some(a), Some(b)) if a == b => {}
            _ => return MoveKind::Blocked,
        }

        if self.hostile_tiles.contains(&to) {
            return if self.military {
                MoveKind::Attack
            } else {
                MoveKind::Blocked
            };
        }

        MoveKind::Move
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_has_full_budget() {
        let mut unit = Unit::new(1, 0, 2.0);
        assert_eq!(unit.action_points_left(), 2.0);

        unit.action_points_left = 0.5;
        unit.reset_action_points();
        assert_eq!(unit.action_points_left, 2.0);
    }

    #[test]
    fn test_move_within_area() {
        let map = Map::new(4, 4);
        let unit = Unit::new(1, 0, 1.0);
        assert_eq!(unit.move_kind(&map, 0, 1), MoveKind::Move);
    }

    #[test]
    fn test_blocked_across_areas() {
        let map = Map::from_rows(&[". W .", ". W ."]).unwrap();
        let unit = Unit::new(1, 0, 1.0);
        assert_eq!(unit.move_kind(&map, 0, 1), MoveKind::Blocked);
        assert_eq!(unit.move_kind(&map, 0, 2), MoveKind::Blocked);
    }

    #[test]
    fn test_blocked_onto_mountains() {
        let map = Map::from_rows(&[". M"]).unwrap();
        let unit = Unit::new(1, 0, 1.0);
        assert_eq!(unit.move_kind(&map, 0, 1), MoveKind::Blocked);
    }

    #[test]
    fn test_hostile_tile() {
        let map = Map::new(4, 4);
        let mut unit = Unit::new(1, 0, 1.0);
        unit.hostile_tiles.insert(1);
        assert_eq!(unit.move_kind(&map, 0, 1), MoveKind::Attack);

        unit.military = false;
        assert_eq!(unit.move_kind(&map, 0, 1), MoveKind::Blocked);
    }

    #[test]
    fn test_default_move_kind() {
        struct Scout;
        impl Actor for Scout {
            fn tile(&self) -> TileId {
                0
            }
            fn action_points(&self) -> f64 {
                1.0
            }
            fn action_points_left(&self) -> f64 {
                1.0
            }
        }

        let map = Map::from_rows(&[". M"]).unwrap();
        assert_eq!(Scout.move_kind(&map, 0, 1), MoveKind::Move);
    }
}
