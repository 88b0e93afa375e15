//! Game map: the tile arena, cached movement costs, and passable areas.
//!
//! # Cost cache
//!
//! Each tile caches the directed cost to each of its neighbours. The cache
//! is filled lazily on first read and dropped by every terrain edit that goes
//! through [`Map::set_terrain`] or [`Map::update_terrain`], for the edited
//! tile and for all of its neighbours. Terrain is not reachable mutably any
//! other way, so a read never observes a stale cost.
//!
//! # Passable areas
//!
//! Areas are *not* rebuilt implicitly. After an edit that turns land into
//! water, raises a mountain, and so on, [`Map::areas_stale`] reports `true`
//! and the caller must run [`Map::rebuild_areas`] (and rebuild any
//! [`AreaGraph`](crate::areas::AreaGraph)) before relying on area data.

use crate::hex::{hex_distance, Direction, HexCoord};
use crate::terrain::{MovementRules, Passability, SeaLevel, Terrain};
use crate::types::{AreaId, TileId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from building or editing a map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("tile {0} does not exist")]
    UnknownTile(TileId),
    #[error("coordinate {0} is outside the map")]
    OutOfBounds(HexCoord),
    #[error("unknown map symbol '{symbol}' at {coord}")]
    UnknownSymbol { symbol: char, coord: HexCoord },
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("map has no tiles")]
    EmptyMap,
}

/// Which kind of movement connects the tiles of an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaKind {
    Land,
    Water,
}

/// A maximal set of tiles reachable from each other by land, or by water.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassableArea {
    pub id: AreaId,
    pub kind: AreaKind,
    /// Member tiles in flood-fill order.
    pub tiles: Vec<TileId>,
}

impl PassableArea {
    /// Number of tiles in the area.
    pub fn size(&self) -> usize {
        self.tiles.len()
    }
}

/// A single tile on the map.
#[derive(Clone, Debug)]
pub struct Tile {
    pub id: TileId,
    pub coord: HexCoord,
    terrain: Terrain,
    /// In-bounds neighbours, in direction order.
    neighbors: Vec<(Direction, TileId)>,
    area: Option<AreaId>,
    /// Costs parallel to `neighbors`, filled on first read.
    costs: OnceLock<Vec<f64>>,
}

impl Tile {
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Passable area membership. `None` for mountains, or before areas are built.
    pub fn area(&self) -> Option<AreaId> {
        self.area
    }

    pub fn neighbors(&self) -> impl Iterator<Item = TileId> + '_ {
        self.neighbors.iter().map(|&(_, id)| id)
    }

    /// True for tiles with fewer than six neighbours.
    pub fn is_map_edge(&self) -> bool {
        self.neighbors.len() != 6
    }

    fn invalidate_costs(&mut self) {
        self.costs.take();
    }
}

/// The game map containing all tiles.
#[derive(Clone, Debug)]
pub struct Map {
    width: u32,
    height: u32,
    /// Indexed by tile id.
    tiles: Vec<Tile>,
    /// Indexed by `area id - 1`.
    areas: Vec<PassableArea>,
    rules: MovementRules,
    areas_stale: bool,
}

impl Map {
    /// Create a map of plains with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Terrain::plains())
    }

    /// Create a map filled with a single terrain.
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(Tile {
                    id: tiles.len() as TileId,
                    coord: HexCoord::new(x, y),
                    terrain,
                    neighbors: Vec::new(),
                    area: None,
                    costs: OnceLock::new(),
                });
            }
        }

        let mut map = Self {
            width,
            height,
            tiles,
            areas: Vec::new(),
            rules: MovementRules::default(),
            areas_stale: true,
        };
        map.link_neighbors();
        map.rebuild_areas();
        map
    }

    /// Build a map from ASCII rows, one character per tile, whitespace ignored.
    ///
    /// `.` plains, `h` hills, `M` mountains, `W` shallow water, `D` deep
    /// water, `f` forest, `s` wetlands, `=` road.
    ///
    /// ```
    /// use hexnav_core::map::Map;
    ///
    /// let map = Map::from_rows(&[
    ///     ". . W W . .",
    ///     " . . W W . .",
    ///     ". . W W . .",
    /// ])
    /// .unwrap();
    /// assert_eq!(map.areas().len(), 3);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|row| row.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();

        let width = parsed.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MapError::EmptyMap);
        }

        let mut map = Self::new(width as u32, parsed.len() as u32);
        for (y, row) in parsed.iter().enumerate() {
            if row.len() != width {
                return Err(MapError::RaggedRows {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &symbol) in row.iter().enumerate() {
                let coord = HexCoord::new(x as i32, y as i32);
                let terrain = terrain_for_symbol(symbol)
                    .ok_or(MapError::UnknownSymbol { symbol, coord })?;
                map.tiles[y * width + x].terrain = terrain;
            }
        }

        map.rebuild_areas();
        Ok(map)
    }

    /// Map width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Count total tiles in the map.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Get a tile by id.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    /// Get a tile at the given coordinate.
    pub fn get(&self, coord: &HexCoord) -> Option<&Tile> {
        self.tile_id(coord).and_then(|id| self.tile(id))
    }

    /// Tile id at a coordinate, if in bounds.
    pub fn tile_id(&self, coord: &HexCoord) -> Option<TileId> {
        coord
            .in_bounds(self.width, self.height)
            .then(|| coord.y as u32 * self.width + coord.x as u32)
    }

    /// Iterate over all tiles in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// In-bounds neighbours of a tile. Empty for unknown ids.
    pub fn neighbors(&self, id: TileId) -> impl Iterator<Item = TileId> + '_ {
        self.tile(id).into_iter().flat_map(Tile::neighbors)
    }

    /// Check whether two tiles share an edge.
    pub fn are_neighbors(&self, a: TileId, b: TileId) -> bool {
        self.neighbors(a).any(|n| n == b)
    }

    /// Hex distance between two tiles, `None` for unknown ids.
    pub fn hex_distance(&self, a: TileId, b: TileId) -> Option<u32> {
        Some(hex_distance(&self.tile(a)?.coord, &self.tile(b)?.coord))
    }

    /// Current movement rules.
    pub fn rules(&self) -> &MovementRules {
        &self.rules
    }

    /// Replace the movement rules, invalidating every cached cost.
    pub fn set_rules(&mut self, rules: MovementRules) {
        self.rules = rules;
        for tile in &mut self.tiles {
            tile.invalidate_costs();
        }
    }

    /// Directed cost of stepping from `from` into `to`.
    ///
    /// `None` when the tiles are not neighbours; impassable edges are
    /// [`IMPASSABLE`](crate::terrain::IMPASSABLE).
    pub fn movement_cost(&self, from: TileId, to: TileId) -> Option<f64> {
        let tile = self.tile(from)?;
        let index = tile.neighbors.iter().position(|&(_, n)| n == to)?;
        Some(self.costs(tile)[index])
    }

    /// Neighbours of a tile together with the directed cost to enter each.
    pub fn neighbor_costs(&self, id: TileId) -> impl Iterator<Item = (TileId, f64)> + '_ {
        self.tile(id).into_iter().flat_map(move |tile| {
            tile.neighbors
                .iter()
                .zip(self.costs(tile).iter())
                .map(|(&(_, n), &cost)| (n, cost))
        })
    }

    fn costs<'a>(&'a self, tile: &'a Tile) -> &'a [f64] {
        tile.costs.get_or_init(|| {
            tracing::trace!(tile = tile.id, "computing movement costs");
            tile.neighbors
                .iter()
                .map(|&(dir, n)| {
                    self.rules
                        .edge_cost(&tile.terrain, &self.tiles[n as usize].terrain, dir)
                })
                .collect()
        })
    }

    /// Replace the terrain of a tile.
    pub fn set_terrain(&mut self, id: TileId, terrain: Terrain) -> Result<(), MapError> {
        self.update_terrain(id, |t| *t = terrain)
    }

    /// Edit the terrain of a tile in place.
    ///
    /// Drops the cached costs of the tile and its neighbours, and marks the
    /// passable areas stale if the tile changed passability class.
    pub fn update_terrain(
        &mut self,
        id: TileId,
        edit: impl FnOnce(&mut Terrain),
    ) -> Result<(), MapError> {
        let tile = self
            .tiles
            .get_mut(id as usize)
            .ok_or(MapError::UnknownTile(id))?;

        let before = tile.terrain.passability();
        edit(&mut tile.terrain);
        if tile.terrain.passability() != before {
            self.areas_stale = true;
        }

        tile.invalidate_costs();
        let neighbors: Vec<TileId> = tile.neighbors().collect();
        for n in neighbors {
            self.tiles[n as usize].invalidate_costs();
        }
        Ok(())
    }

    /// Same as [`Map::set_terrain`], addressed by coordinate.
    pub fn set_terrain_at(&mut self, coord: &HexCoord, terrain: Terrain) -> Result<(), MapError> {
        let id = self.tile_id(coord).ok_or(MapError::OutOfBounds(*coord))?;
        self.set_terrain(id, terrain)
    }

    /// All passable areas, ordered by id.
    pub fn areas(&self) -> &[PassableArea] {
        &self.areas
    }

    /// Look up an area by id.
    pub fn area(&self, id: AreaId) -> Option<&PassableArea> {
        let index = id.checked_sub(1)?;
        self.areas.get(index as usize)
    }

    /// Area of a tile, `None` for mountains or unknown tiles.
    pub fn area_of(&self, id: TileId) -> Option<&PassableArea> {
        self.tile(id)?.area.and_then(|a| self.area(a))
    }

    /// Whether a terrain edit since the last rebuild may have split or
    /// merged areas.
    pub fn areas_stale(&self) -> bool {
        self.areas_stale
    }

    /// Total number of tiles in land areas.
    pub fn total_land_area(&self) -> usize {
        self.areas
            .iter()
            .filter(|a| a.kind == AreaKind::Land)
            .map(PassableArea::size)
            .sum()
    }

    /// Recompute passable areas with a breadth-first flood fill.
    ///
    /// Mountains get no area. Two neighbours share an area when both are
    /// land or both are water.
    pub fn rebuild_areas(&mut self) {
        self.areas.clear();
        for tile in &mut self.tiles {
            tile.area = None;
        }

        let mut queue = VecDeque::new();
        for start in 0..self.tiles.len() {
            if self.tiles[start].area.is_some() {
                continue;
            }
            let kind = match self.tiles[start].terrain.passability() {
                Passability::Land => AreaKind::Land,
                Passability::Water => AreaKind::Water,
                Passability::Impassable => continue,
            };

            let area_id = self.areas.len() as AreaId + 1;
            let mut members = Vec::new();
            self.tiles[start].area = Some(area_id);
            queue.push_back(start as TileId);

            while let Some(current) = queue.pop_front() {
                members.push(current);
                let class = self.tiles[current as usize].terrain.passability();
                for i in 0..self.tiles[current as usize].neighbors.len() {
                    let (_, n) = self.tiles[current as usize].neighbors[i];
                    let neighbor = &mut self.tiles[n as usize];
                    if neighbor.area.is_none() && neighbor.terrain.passability() == class {
                        neighbor.area = Some(area_id);
                        queue.push_back(n);
                    }
                }
            }

            self.areas.push(PassableArea {
                id: area_id,
                kind,
                tiles: members,
            });
        }

        self.areas_stale = false;
        tracing::debug!(
            areas = self.areas.len(),
            land_tiles = self.total_land_area(),
            "rebuilt passable areas"
        );
    }

    fn link_neighbors(&mut self) {
        for index in 0..self.tiles.len() {
            let coord = self.tiles[index].coord;
            let neighbors = Direction::ALL
                .into_iter()
                .filter_map(|dir| self.tile_id(&coord.neighbor(dir)).map(|n| (dir, n)))
                .collect();
            self.tiles[index].neighbors = neighbors;
        }
    }
}

fn terrain_for_symbol(symbol: char) -> Option<Terrain> {
    let terrain = match symbol {
        '.' => Terrain::plains(),
        'h' => Terrain::hills(),
        'M' => Terrain::mountains(),
        'W' => Terrain::water(SeaLevel::Shallow),
        'D' => Terrain::water(SeaLevel::Deep),
        'f' => Terrain {
            forest: true,
            ..Terrain::plains()
        },
        's' => Terrain {
            wetlands: true,
            ..Terrain::plains()
        },
        '=' => Terrain {
            road: true,
            ..Terrain::plains()
        },
        _ => return None,
    };
    Some(terrain)
}
