//! Connectivity between passable areas.
//!
//! A coarse graph whose nodes are [`PassableArea`](crate::map::PassableArea)s
//! and whose edges join areas with at least one pair of adjacent tiles.
//! It answers "can this landmass reach that one, and through what" without
//! a tile-level search.
//!
//! The graph is a snapshot. After the map's areas are rebuilt, rebuild the
//! graph too; it is never patched incrementally.

use crate::map::Map;
use crate::priority_queue::PriorityQueue;
use crate::types::AreaId;
use std::collections::{HashMap, HashSet};

/// Edge to a neighbouring area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaConnection {
    pub area: AreaId,
    pub distance: u32,
}

/// Undirected graph of passable areas.
#[derive(Clone, Debug, Default)]
pub struct AreaGraph {
    connections: HashMap<AreaId, Vec<AreaConnection>>,
}

impl AreaGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the map's current areas.
    pub fn from_map(map: &Map) -> Self {
        let mut graph = Self::new();
        graph.build_from_map(map);
        graph
    }

    /// Discard everything and rebuild from the map's current areas.
    ///
    /// Each pair of touching areas gets one connection of distance 1 in
    /// both directions, however many tile pairs touch.
    pub fn build_from_map(&mut self, map: &Map) {
        self.connections.clear();
        for area in map.areas() {
            self.connections.insert(area.id, Vec::new());
        }

        let mut seen: HashSet<(AreaId, AreaId)> = HashSet::new();
        for tile in map.iter() {
            let Some(from) = tile.area() else {
                continue;
            };

            for neighbor in tile.neighbors() {
                let Some(to) = map.tile(neighbor).and_then(|t| t.area()) else {
                    continue;
                };
                if to == from || !seen.insert((from.min(to), from.max(to))) {
                    continue;
                }

                self.connect(from, to, 1);
                self.connect(to, from, 1);
            }
        }

        tracing::debug!(
            areas = self.connections.len(),
            connections = seen.len(),
            "built area graph"
        );
    }

    fn connect(&mut self, from: AreaId, to: AreaId, distance: u32) {
        self.connections
            .entry(from)
            .or_default()
            .push(AreaConnection { area: to, distance });
    }

    /// Number of areas in the graph.
    pub fn area_count(&self) -> usize {
        self.connections.len()
    }

    pub fn contains(&self, area: AreaId) -> bool {
        self.connections.contains_key(&area)
    }

    /// Outgoing connections of an area. Empty for unknown ids.
    pub fn connections(&self, area: AreaId) -> &[AreaConnection] {
        self.connections
            .get(&area)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Areas directly connected to `area`, in no particular order.
    pub fn connected_areas(&self, area: AreaId) -> Vec<AreaId> {
        self.connections(area).iter().map(|c| c.area).collect()
    }

    /// Number of direct connections of an area.
    pub fn connection_count(&self, area: AreaId) -> usize {
        self.connections(area).len()
    }

    /// Check if two areas touch.
    pub fn are_directly_connected(&self, a: AreaId, b: AreaId) -> bool {
        self.connections(a).iter().any(|c| c.area == b)
    }

    /// Shortest chain of areas from `from` to `to`, both included.
    ///
    /// `Some(vec![from])` when the ids are equal. `None` when either id is
    /// unknown or the areas are not connected.
    pub fn find_path(&self, from: AreaId, to: AreaId) -> Option<Vec<AreaId>> {
        if from == to {
            return Some(vec![from]);
        }
        if !self.contains(from) || !self.contains(to) {
            return None;
        }

        let mut distances: HashMap<AreaId, u32> = HashMap::new();
        let mut previous: HashMap<AreaId, AreaId> = HashMap::new();
        let mut visited: HashSet<AreaId> = HashSet::new();
        let mut queue = PriorityQueue::new();

        distances.insert(from, 0);
        queue.push(from, 0u32);

        while let Some(current) = queue.pop() {
            if current == to {
                let mut path = vec![to];
                let mut step = to;
                while let Some(&prev) = previous.get(&step) {
                    path.push(prev);
                    step = prev;
                }
                path.reverse();
                return Some(path);
            }

            if !visited.insert(current) {
                continue;
            }

            let current_distance = distances[&current];
            for connection in self.connections(current) {
                if visited.contains(&connection.area) {
                    continue;
                }

                let distance = current_distance + connection.distance;
                if distances
                    .get(&connection.area)
                    .map_or(true, |&known| distance < known)
                {
                    distances.insert(connection.area, distance);
                    previous.insert(connection.area, current);
                    queue.push(connection.area, distance);
                }
            }
        }

        None
    }

    /// Every area within `max_distance` of `from`, including `from`.
    ///
    /// Areas come out in non-decreasing distance order. Empty for an
    /// unknown id.
    pub fn find_areas_within_distance(&self, from: AreaId, max_distance: u32) -> Vec<AreaId> {
        if !self.contains(from) {
            return Vec::new();
        }

        let mut result = Vec::new();
        let mut distances: HashMap<AreaId, u32> = HashMap::new();
        let mut visited: HashSet<AreaId> = HashSet::new();
        let mut queue = PriorityQueue::new();

        distances.insert(from, 0);
        queue.push(from, 0u32);

        while let Some(current) = queue.pop() {
            if !visited.insert(current) {
                continue;
            }
            result.push(current);

            let current_distance = distances[&current];
            for connection in self.connections(current) {
                if visited.contains(&connection.area) {
                    continue;
                }

                let distance = current_distance + connection.distance;
                if distance > max_distance {
                    continue;
                }
                if distances
                    .get(&connection.area)
                    .map_or(true, |&known| distance < known)
                {
                    distances.insert(connection.area, distance);
                    queue.push(connection.area, distance);
                }
            }
        }

        result
    }
}
