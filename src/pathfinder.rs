//! Shortest-path search used by the bot.
//!
//! A* over the four orthogonal neighbours with a Manhattan heuristic. Visited
//! nodes live in an arena and link back to their parent by index, so the path
//! is rebuilt only once, when the goal is popped. The search itself does not
//! wrap around the grid edges even though movement does.

use crate::grid::Grid;
use crate::types::{Cell, Direction};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

#[derive(Debug, Clone, Copy)]
struct PathNode {
    cell: Cell,
    steps: u32,            // Cost so far
    parent: Option<usize>, // Index into the arena
}

/// Queue entry ordered by estimated total cost, then by insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    estimate: u32,
    seq: u64,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.estimate, self.seq).cmp(&(other.estimate, other.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pathfinder {
    grid: Grid,
}

impl Pathfinder {
    pub fn new(grid: Grid) -> Self {
        Pathfinder { grid }
    }

    fn is_open(&self, cell: Cell, obstacles: &HashSet<Cell>) -> bool {
        self.grid.contains(cell) && !obstacles.contains(&cell)
    }

    /// Full path from `start` (exclusive) to `goal` (inclusive), or `None` when unreachable.
    pub fn find_path(&self, start: Cell, goal: Cell, obstacles: &HashSet<Cell>) -> Option<Vec<Cell>> {
        let mut arena = vec![PathNode {
            cell: start,
            steps: 0,
            parent: None,
        }];
        let mut queue = BinaryHeap::new();
        let mut visited = HashSet::new();
        let mut seq = 0u64;

        queue.push(Reverse(Frontier {
            estimate: start.manhattan(goal),
            seq,
            node: 0,
        }));

        while let Some(Reverse(entry)) = queue.pop() {
            let current = arena[entry.node];

            if current.cell == goal {
                return Some(Self::reconstruct(&arena, entry.node));
            }

            // Stale duplicate of a cell already expanded through a cheaper route
            if !visited.insert(current.cell) {
                continue;
            }

            for direction in Direction::ALL {
                let next = current.cell.offset(direction);
                if !self.is_open(next, obstacles) || visited.contains(&next) {
                    continue;
                }
                let steps = current.steps + 1;
                arena.push(PathNode {
                    cell: next,
                    steps,
                    parent: Some(entry.node),
                });
                seq += 1;
                queue.push(Reverse(Frontier {
                    estimate: steps + next.manhattan(goal),
                    seq,
                    node: arena.len() - 1,
                }));
            }
        }

        None
    }

    fn reconstruct(arena: &[PathNode], mut index: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        while let Some(parent) = arena[index].parent {
            path.push(arena[index].cell);
            index = parent;
        }
        path.reverse();
        path
    }

    /// Direction for the bot's next step towards `goal`.
    ///
    /// Falls back to a random open neighbour when the goal is unreachable and to
    /// `Up` when every neighbour is blocked.
    pub fn next_direction<R: Rng>(&self, start: Cell, goal: Cell, obstacles: &HashSet<Cell>, rng: &mut R) -> Direction {
        match self.find_path(start, goal, obstacles) {
            Some(path) => match path.first() {
                Some(first) => Direction::between(start, *first).unwrap_or(Direction::Up),
                // Already standing on the goal
                None => Direction::ALL
                    .into_iter()
                    .find(|d| self.is_open(start.offset(*d), obstacles))
                    .unwrap_or(Direction::Up),
            },
            None => {
                let mut directions = Direction::ALL;
                directions.shuffle(rng);
                directions
                    .into_iter()
                    .find(|d| self.is_open(start.offset(*d), obstacles))
                    .unwrap_or(Direction::Up)
            }
        }
    }
}
