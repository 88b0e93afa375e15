//! Terrain classification and the directed movement cost model.

use crate::hex::Direction;
use serde::{Deserialize, Serialize};

/// Cost of an edge that cannot be entered.
pub const IMPASSABLE: f64 = f64::INFINITY;

/// Elevation class of a land tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandForm {
    #[default]
    Plains,
    Hills,
    Mountains,
}

/// Water depth of a tile. `None` means the tile is land.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeaLevel {
    #[default]
    None,
    Shallow,
    Deep,
}

/// Passability class used by the passable-area flood fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Passability {
    Land,
    Water,
    Impassable,
}

/// Everything about a tile that influences movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terrain {
    pub land_form: LandForm,
    pub sea_level: SeaLevel,
    pub forest: bool,
    pub wetlands: bool,
    pub road: bool,
    /// Which edges have rivers, indexed by [`Direction::index`].
    pub river_edges: [bool; 6],
}

impl Terrain {
    /// Open land.
    pub const fn plains() -> Self {
        Self {
            land_form: LandForm::Plains,
            sea_level: SeaLevel::None,
            forest: false,
            wetlands: false,
            road: false,
            river_edges: [false; 6],
        }
    }

    pub const fn hills() -> Self {
        Self {
            land_form: LandForm::Hills,
            ..Self::plains()
        }
    }

    pub const fn mountains() -> Self {
        Self {
            land_form: LandForm::Mountains,
            ..Self::plains()
        }
    }

    pub const fn water(sea_level: SeaLevel) -> Self {
        Self {
            sea_level,
            ..Self::plains()
        }
    }

    /// Check if this is a water tile (any depth).
    pub const fn is_water(&self) -> bool {
        !matches!(self.sea_level, SeaLevel::None)
    }

    pub const fn is_mountains(&self) -> bool {
        matches!(self.land_form, LandForm::Mountains)
    }

    /// Check if this tile has a river on any edge.
    pub fn has_river(&self) -> bool {
        self.river_edges.iter().any(|&e| e)
    }

    pub fn has_river_towards(&self, direction: Direction) -> bool {
        self.river_edges[direction.index()]
    }

    /// Mountains belong to no passable area; otherwise land or water.
    pub const fn passability(&self) -> Passability {
        if self.is_mountains() {
            Passability::Impassable
        } else if self.is_water() {
            Passability::Water
        } else {
            Passability::Land
        }
    }
}

/// Tunable constants of the movement cost model.
///
/// The defaults give: hills 2, fording a river 3, travelling along a river
/// 0.5, plain 1, roads divide by 3, water and mountains impassable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementRules {
    pub hills_cost: f64,
    /// Cost when the source tile has a river on the edge being crossed.
    pub river_crossing_cost: f64,
    /// Cost when both tiles have a river but the crossed edge has none.
    pub river_travel_cost: f64,
    pub road_divisor: f64,
    /// Applied when the target has a forest. 1.0 disables the modifier.
    pub forest_multiplier: f64,
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            hills_cost: 2.0,
            river_crossing_cost: 3.0,
            river_travel_cost: 0.5,
            road_divisor: 3.0,
            forest_multiplier: 1.0,
        }
    }
}

impl MovementRules {
    /// Directed cost of moving from `from` into its neighbour `to` across
    /// the `direction` edge of `from`.
    ///
    /// The result is not symmetric: the river crossing rule depends on the
    /// source tile's edge.
    pub fn edge_cost(&self, from: &Terrain, to: &Terrain, direction: Direction) -> f64 {
        let mut cost = if to.is_water() || to.is_mountains() {
            IMPASSABLE
        } else if to.land_form == LandForm::Hills {
            self.hills_cost
        } else if from.has_river_towards(direction) {
            self.river_crossing_cost
        } else if from.has_river() && to.has_river() {
            self.river_travel_cost
        } else {
            1.0
        };

        if to.road {
            cost /= self.road_divisor;
        }
        if to.forest {
            cost *= self.forest_multiplier;
        }

        cost
    }

    /// Cheapest finite edge cost these rules can produce.
    pub fn min_edge_cost(&self) -> f64 {
        let base = self
            .river_travel_cost
            .min(self.hills_cost)
            .min(self.river_crossing_cost)
            .min(1.0);
        base.min(base / self.road_divisor) * self.forest_multiplier.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_river(mut terrain: Terrain, direction: Direction) -> Terrain {
        terrain.river_edges[direction.index()] = true;
        terrain
    }

    #[test]
    fn test_plain_cost() {
        let rules = MovementRules::default();
        let cost = rules.edge_cost(&Terrain::plains(), &Terrain::plains(), Direction::East);
        assert_eq!(cost, 1.0);
    }

    #[test]
    fn test_water_and_mountains_impassable() {
        let rules = MovementRules::default();
        let land = Terrain::plains();
        assert_eq!(
            rules.edge_cost(&land, &Terrain::water(SeaLevel::Shallow), Direction::East),
            IMPASSABLE
        );
        assert_eq!(
            rules.edge_cost(&land, &Terrain::water(SeaLevel::Deep), Direction::East),
            IMPASSABLE
        );
        assert_eq!(
            rules.edge_cost(&land, &Terrain::mountains(), Direction::East),
            IMPASSABLE
        );
    }

    #[test]
    fn test_road_keeps_impassable() {
        let rules = MovementRules::default();
        let mut mountain = Terrain::mountains();
        mountain.road = true;
        let cost = rules.edge_cost(&Terrain::plains(), &mountain, Direction::West);
        assert!(cost.is_infinite());
    }

    #[test]
    fn test_hills_cost_beats_river_rules() {
        let rules = MovementRules::default();
        let from = with_river(Terrain::plains(), Direction::East);
        let to = with_river(Terrain::hills(), Direction::West);
        assert_eq!(rules.edge_cost(&from, &to, Direction::East), 2.0);
    }

    #[test]
    fn test_river_crossing_is_directional() {
        let rules = MovementRules::default();
        let a = with_river(Terrain::plains(), Direction::East);
        let b = Terrain::plains();

        // a has the river on the crossed edge, b has no river at all
        assert_eq!(rules.edge_cost(&a, &b, Direction::East), 3.0);
        assert_eq!(rules.edge_cost(&b, &a, Direction::West), 1.0);
    }

    #[test]
    fn test_river_travel() {
        let rules = MovementRules::default();
        let a = with_river(Terrain::plains(), Direction::NorthEast);
        let b = with_river(Terrain::plains(), Direction::NorthWest);
        assert_eq!(rules.edge_cost(&a, &b, Direction::East), 0.5);
    }

    #[test]
    fn test_road_divides() {
        let rules = MovementRules::default();
        let mut hills = Terrain::hills();
        hills.road = true;
        let cost = rules.edge_cost(&Terrain::plains(), &hills, Direction::SouthEast);
        assert!((cost - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_forest_multiplier_off_by_default() {
        let mut forest = Terrain::plains();
        forest.forest = true;
        let rules = MovementRules::default();
        assert_eq!(rules.edge_cost(&Terrain::plains(), &forest, Direction::East), 1.0);

        let doubled = MovementRules {
            forest_multiplier: 2.0,
            ..Default::default()
        };
        assert_eq!(doubled.edge_cost(&Terrain::plains(), &forest, Direction::East), 2.0);
    }

    #[test]
    fn test_min_edge_cost() {
        let rules = MovementRules::default();
        assert!((rules.min_edge_cost() - 0.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_passability() {
        assert_eq!(Terrain::plains().passability(), Passability::Land);
        assert_eq!(Terrain::hills().passability(), Passability::Land);
        assert_eq!(Terrain::mountains().passability(), Passability::Impassable);
        assert_eq!(
            Terrain::water(SeaLevel::Deep).passability(),
            Passability::Water
        );
    }

    #[test]
    fn test_terrain_serialization() {
        let terrain = with_river(Terrain::hills(), Direction::SouthWest);
        let json = serde_json::to_string(&terrain).unwrap();
        let restored: Terrain = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, terrain);
    }
}
