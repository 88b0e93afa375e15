//! Turn-aware A* pathfinding on the hex grid.
//!
//! Costs are accumulated in *turns*: every raw edge cost is multiplied by
//! `1 / action_points`. A step that uses up the last action points of a turn
//! always costs exactly one turn, and the next step starts a new turn with
//! a full budget. A step may be taken as long as any action points remain,
//! even when its raw cost is higher.
//!
//! Results are only as fresh as the map's terrain. Edits made through
//! [`Map::set_terrain`] keep costs correct; area-based move checks
//! additionally need [`Map::rebuild_areas`] after passability changes.

use crate::map::Map;
use crate::priority_queue::PriorityQueue;
use crate::terrain::MovementRules;
use crate::types::TileId;
use crate::unit::{Actor, MoveKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Action points at or below this are treated as spent.
const EXHAUSTED: f64 = 1e-9;

/// Result of a pathfinding operation.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Tiles grouped by the turn they are entered in, earliest first.
    /// The first segment starts with the start tile.
    pub turns: Vec<Vec<TileId>>,
    /// Accumulated cost in turns.
    pub total_cost: f64,
}

impl PathResult {
    /// Final tile of the path.
    pub fn destination(&self) -> Option<TileId> {
        self.turns.last().and_then(|turn| turn.last()).copied()
    }

    /// Number of turn segments.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Number of steps, not counting the start tile.
    pub fn move_count(&self) -> usize {
        self.tiles().count().saturating_sub(1)
    }

    /// All tiles from start to destination.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.turns.iter().flatten().copied()
    }
}

/// Configuration for pathfinding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Multiplier on `hex_distance * turn_cost`. Values at or below the
    /// cheapest edge cost make the heuristic admissible.
    pub heuristic_scale: f64,
    /// Raw cost multiplier for an attacking final step.
    pub attack_cost_multiplier: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            heuristic_scale: 1.0,
            attack_cost_multiplier: 3.0,
        }
    }
}

impl PathConfig {
    /// A configuration whose heuristic never overestimates under `rules`,
    /// for actors with at least one action point per turn.
    pub fn admissible_for(rules: &MovementRules) -> Self {
        Self {
            heuristic_scale: rules.min_edge_cost().min(1.0),
            ..Default::default()
        }
    }
}

/// Per-tile bookkeeping: the turn the tile is entered in, action points
/// left on arrival, and where we came from.
#[derive(Clone, Copy, Debug)]
struct Arrival {
    turn: u32,
    action_points_left: f64,
    parent: Option<TileId>,
}

/// Find the cheapest route from the actor's tile to `destination`.
///
/// Returns `None` when the destination is the actor's tile, when it cannot
/// be reached, or when the actor rules out the destination.
pub fn find_path<A: Actor + ?Sized>(
    map: &Map,
    actor: &A,
    destination: TileId,
    config: &PathConfig,
) -> Option<PathResult> {
    find_path_from(map, actor, actor.tile(), destination, config)
}

/// Like [`find_path`], but starting from an arbitrary tile with the actor's
/// current action points.
pub fn find_path_from<A: Actor + ?Sized>(
    map: &Map,
    actor: &A,
    start: TileId,
    destination: TileId,
    config: &PathConfig,
) -> Option<PathResult> {
    if start == destination || map.tile(start).is_none() || map.tile(destination).is_none() {
        return None;
    }

    if actor.move_kind(map, start, destination) == MoveKind::Blocked {
        tracing::debug!(start, destination, "destination ruled out by move check");
        return None;
    }

    let action_points = actor.action_points();
    if !(action_points.is_finite() && action_points > 0.0) {
        tracing::warn!(action_points, "actor has no usable movement budget");
        return None;
    }

    let turn_cost = 1.0 / action_points;
    let heuristic = |tile: TileId| {
        let steps = map.hex_distance(tile, destination).unwrap_or(0);
        f64::from(steps) * turn_cost * config.heuristic_scale
    };

    let mut open = PriorityQueue::new();
    let mut visited: HashSet<TileId> = HashSet::new();
    let mut arrivals: HashMap<TileId, Arrival> = HashMap::new();
    let mut costs: HashMap<TileId, f64> = HashMap::new();

    open.push(start, heuristic(start));
    costs.insert(start, 0.0);
    arrivals.insert(
        start,
        Arrival {
            turn: 0,
            action_points_left: actor.action_points_left(),
            parent: None,
        },
    );

    while let Some(current) = open.pop() {
        if !visited.insert(current) {
            continue;
        }

        if current == destination {
            let result = reconstruct_path(&arrivals, destination, costs[&destination]);
            tracing::debug!(
                start,
                destination,
                expanded = visited.len(),
                turns = result.turn_count(),
                "path found"
            );
            return Some(result);
        }

        let arrival = arrivals[&current];
        let (turn, action_points_left) = if arrival.action_points_left <= EXHAUSTED {
            (arrival.turn + 1, action_points)
        } else {
            (arrival.turn, arrival.action_points_left)
        };
        let current_cost = costs[&current];

        for (neighbor, edge_cost) in map.neighbor_costs(current) {
            if visited.contains(&neighbor) || !edge_cost.is_finite() {
                continue;
            }

            let raw_cost = match actor.move_kind(map, current, neighbor) {
                MoveKind::Blocked => continue,
                MoveKind::Attack if neighbor != destination => continue,
                MoveKind::Attack => edge_cost * config.attack_cost_multiplier,
                MoveKind::Move => edge_cost,
            };

            let left = (action_points_left - raw_cost).max(0.0);
            let step_cost = if left <= EXHAUSTED {
                1.0
            } else {
                raw_cost * turn_cost
            };

            let tentative = current_cost + step_cost;
            if costs.get(&neighbor).map_or(true, |&known| tentative < known) {
                costs.insert(neighbor, tentative);
                arrivals.insert(
                    neighbor,
                    Arrival {
                        turn,
                        action_points_left: left,
                        parent: Some(current),
                    },
                );
                open.push(neighbor, tentative + heuristic(neighbor));
            }
        }
    }

    tracing::debug!(start, destination, expanded = visited.len(), "no path");
    None
}

/// Walk parents back from the destination and split the route by turn.
fn reconstruct_path(
    arrivals: &HashMap<TileId, Arrival>,
    destination: TileId,
    total_cost: f64,
) -> PathResult {
    let mut steps = Vec::new();
    let mut current = Some(destination);
    while let Some(tile) = current {
        let Some(arrival) = arrivals.get(&tile) else {
            break;
        };
        steps.push((tile, arrival.turn));
        current = arrival.parent;
    }
    steps.reverse();

    let mut turns: Vec<Vec<TileId>> = Vec::new();
    let mut last_turn = None;
    for (tile, turn) in steps {
        match turns.last_mut() {
            Some(segment) if last_turn == Some(turn) => segment.push(tile),
            _ => turns.push(vec![tile]),
        }
        last_turn = Some(turn);
    }

    PathResult { turns, total_cost }
}

/// Tiles the actor can still enter this turn, with the action points left
/// on arrival.
///
/// The actor's own tile is included. Attack steps are not expanded.
pub fn find_reachable<A: Actor + ?Sized>(map: &Map, actor: &A) -> HashMap<TileId, f64> {
    let start = actor.tile();
    let mut reachable = HashMap::new();
    if map.tile(start).is_none() {
        return reachable;
    }

    let budget = actor.action_points_left().max(0.0);
    let mut spent: HashMap<TileId, f64> = HashMap::new();
    let mut frontier = PriorityQueue::new();
    let mut settled: HashSet<TileId> = HashSet::new();

    spent.insert(start, 0.0);
    frontier.push(start, 0.0);

    while let Some(current) = frontier.pop() {
        if !settled.insert(current) {
            continue;
        }

        let current_spent = spent[&current];
        let left = (budget - current_spent).max(0.0);
        reachable.insert(current, left);
        if left <= EXHAUSTED {
            continue;
        }

        for (neighbor, edge_cost) in map.neighbor_costs(current) {
            if settled.contains(&neighbor) || !edge_cost.is_finite() {
                continue;
            }
            if actor.move_kind(map, current, neighbor) != MoveKind::Move {
                continue;
            }

            let total = current_spent + edge_cost;
            if spent.get(&neighbor).map_or(true, |&known| total < known) {
                spent.insert(neighbor, total);
                frontier.push(neighbor, total);
            }
        }
    }

    reachable
}

/// Sum of raw edge costs along a path.
///
/// `None` if two consecutive tiles are not neighbours or an edge is
/// impassable.
pub fn path_cost(map: &Map, path: &[TileId]) -> Option<f64> {
    let mut total = 0.0;
    for window in path.windows(2) {
        let cost = map.movement_cost(window[0], window[1])?;
        if !cost.is_finite() {
            return None;
        }
        total += cost;
    }
    Some(total)
}

/// Check if a path is valid (all steps between neighbours and passable).
pub fn is_valid_path(map: &Map, path: &[TileId]) -> bool {
    path.iter().all(|&id| map.tile(id).is_some()) && path_cost(map, path).is_some()
}
