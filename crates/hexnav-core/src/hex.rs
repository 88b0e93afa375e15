//! Hex coordinate system for the game map.
//!
//! Tiles are addressed with offset `(x, y)` coordinates, rows indexed by `y`.
//! Odd rows sit half a hex to the left of even rows, which makes the axial
//! conversion `q = x - (y + (y mod 2)) / 2`, `r = y` exact: every neighbour
//! returned by [`HexCoord::neighbors`] is at [`hex_distance`] 1.

use serde::{Deserialize, Serialize};

/// One of the six edges of a hex, clockwise from northeast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in clockwise order starting from northeast.
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Index of this direction (0-5), used for per-edge arrays.
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The direction pointing back across the same edge.
    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// Offset hex coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct HexCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Row-major ordering, same as tile ids
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl HexCoord {
    /// Create a new hex coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate across the given edge (may be out of bounds).
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        // Even rows are shifted half a hex right of odd rows
        let shift = if self.y.rem_euclid(2) == 0 { 1 } else { 0 };

        match direction {
            Direction::NorthEast => HexCoord::new(self.x + shift, self.y - 1),
            Direction::East => HexCoord::new(self.x + 1, self.y),
            Direction::SouthEast => HexCoord::new(self.x + shift, self.y + 1),
            Direction::SouthWest => HexCoord::new(self.x + shift - 1, self.y + 1),
            Direction::West => HexCoord::new(self.x - 1, self.y),
            Direction::NorthWest => HexCoord::new(self.x + shift - 1, self.y - 1),
        }
    }

    /// Get all 6 neighbouring hexes in clockwise order starting from northeast.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    /// Direction from this hex to an adjacent one, or `None` if not adjacent.
    pub fn direction_to(&self, other: &HexCoord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(d) == *other)
    }

    /// Convert to axial `(q, r)` coordinates.
    pub fn to_axial(&self) -> (i32, i32) {
        let q = self.x - (self.y + self.y.rem_euclid(2)).div_euclid(2);
        (q, self.y)
    }

    /// Check if this coordinate is within bounds of a rectangular map.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Minimum number of hex steps between two cells, ignoring terrain.
///
/// Symmetric and zero for identical cells. Used as the A* heuristic.
pub fn hex_distance(a: &HexCoord, b: &HexCoord) -> u32 {
    let (aq, ar) = a.to_axial();
    let (bq, br) = b.to_axial();
    let dq = bq - aq;
    let dr = br - ar;

    dq.abs().max(dr.abs()).max((dq + dr).abs()) as u32
}

/// Plain Cartesian distance on the offset coordinates.
///
/// Only meant for map generation helpers; the search never uses it.
pub fn euclidean_distance(a: &HexCoord, b: &HexCoord) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let coord = HexCoord::new(3, 5);
        assert_eq!(coord.x, 3);
        assert_eq!(coord.y, 5);
    }

    #[test]
    fn test_distance_same_hex() {
        let coord = HexCoord::new(5, 5);
        assert_eq!(hex_distance(&coord, &coord), 0);
        assert_eq!(euclidean_distance(&coord, &coord), 0.0);
    }

    #[test]
    fn test_distance_neighbors_even_and_odd_rows() {
        for coord in [HexCoord::new(5, 4), HexCoord::new(5, 5), HexCoord::new(0, 0)] {
            for neighbor in coord.neighbors() {
                assert_eq!(
                    hex_distance(&coord, &neighbor),
                    1,
                    "{} -> {} should be one step",
                    coord,
                    neighbor
                );
            }
        }
    }

    #[test]
    fn test_distance_along_row() {
        assert_eq!(hex_distance(&HexCoord::new(5, 5), &HexCoord::new(8, 5)), 3);
        assert_eq!(hex_distance(&HexCoord::new(0, 0), &HexCoord::new(0, 4)), 4);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = HexCoord::new(2, 3);
        let b = HexCoord::new(7, 6);
        assert_eq!(hex_distance(&a, &b), hex_distance(&b, &a));
        assert_eq!(euclidean_distance(&a, &b), euclidean_distance(&b, &a));
    }

    #[test]
    fn test_axial_conversion() {
        assert_eq!(HexCoord::new(0, 0).to_axial(), (0, 0));
        assert_eq!(HexCoord::new(0, 1).to_axial(), (-1, 1));
        assert_eq!(HexCoord::new(3, 4).to_axial(), (1, 4));
    }

    #[test]
    fn test_direction_to_and_opposite() {
        let coord = HexCoord::new(4, 3);
        for dir in Direction::ALL {
            let neighbor = coord.neighbor(dir);
            assert_eq!(coord.direction_to(&neighbor), Some(dir));
            assert_eq!(neighbor.neighbor(dir.opposite()), coord);
        }
        assert_eq!(coord.direction_to(&HexCoord::new(9, 9)), None);
    }

    #[test]
    fn test_in_bounds() {
        let coord = HexCoord::new(5, 5);
        assert!(coord.in_bounds(10, 10));
        assert!(!coord.in_bounds(5, 5));
        assert!(!HexCoord::new(-1, 0).in_bounds(10, 10));
    }

    #[test]
    fn test_euclidean() {
        let d = euclidean_distance(&HexCoord::new(0, 0), &HexCoord::new(3, 4));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let coord = HexCoord::new(3, 7);
        assert_eq!(format!("{}", coord), "(3, 7)");
    }
}
