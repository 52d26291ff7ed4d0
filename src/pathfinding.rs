//! Shortest-path search over the free cells of a board.
//!
//! The search is a plain breadth-first search over the 4-neighbourhood. Only walls block it;
//! the hunter and the enemies are not obstacles. It is deterministic: neighbours are always
//! explored in [`Direction::ALL`] order and the first predecessor to discover a cell wins.

use std::collections::{hash_map::Entry, HashMap, VecDeque};

use crate::{
    board::Terrain,
    model::{Coordinate, Direction},
};

/// Finds a minimal-length path from `start` to `goal`, both ends included.
///
/// When `goal` cannot be reached the result is the single-element path `[goal]`, and when
/// `start == goal` it is `[start]`. Callers treat any path shorter than two cells as "no move
/// available".
#[must_use]
pub fn shortest_path(terrain: &Terrain, start: Coordinate, goal: Coordinate) -> Vec<Coordinate> {
    let mut came_from: HashMap<Coordinate, Option<Coordinate>> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    let _ = came_from.insert(start, None);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }

        for direction in Direction::ALL {
            let Some(next) = terrain.step(current, direction) else {
                continue;
            };

            if let Entry::Vacant(slot) = came_from.entry(next) {
                let _ = slot.insert(Some(current));
                queue.push_back(next);
            }
        }
    }

    // Walk the predecessor chain back from the goal. An unreached goal has no entry, which
    // leaves the path at `[goal]`.
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(Some(previous)) = came_from.get(&current) {
        path.push(*previous);
        current = *previous;
    }
    path.reverse();

    path
}
