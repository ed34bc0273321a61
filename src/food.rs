use crate::grid::Grid;
use crate::types::Cell;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// The single piece of food on the grid.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    cell: Cell,
    active: bool,
}

impl FoodSpawner {
    /// Places the first piece of food on a free cell.
    pub fn new<R: Rng>(rng: &mut R, grid: &Grid, occupied: &[Cell]) -> Self {
        FoodSpawner {
            cell: pick_cell(rng, grid, occupied),
            active: true,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The food cell, while it can still be eaten.
    pub fn edible(&self) -> Option<Cell> {
        self.active.then_some(self.cell)
    }

    pub fn consume(&mut self) {
        self.active = false;
    }

    /// Replaces consumed food. Returns the new cell if a respawn happened.
    pub fn respawn_if_consumed<R: Rng>(&mut self, rng: &mut R, grid: &Grid, occupied: &[Cell]) -> Option<Cell> {
        if self.active {
            return None;
        }
        self.cell = pick_cell(rng, grid, occupied);
        self.active = true;
        crate::debug_food!("Food respawned at {}", self.cell);
        Some(self.cell)
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, cell: Cell) {
        self.cell = cell;
        self.active = true;
    }
}

// Food never lands on the first row or column unless the grid is a single cell thick
fn spawn_range(cells: i32) -> std::ops::Range<i32> {
    if cells > 1 { 1..cells } else { 0..cells }
}

// Random draws before falling back to a full scan of the free cells
const SAMPLE_ATTEMPTS: usize = 32;

fn pick_cell<R: Rng>(rng: &mut R, grid: &Grid, occupied: &[Cell]) -> Cell {
    let cols = spawn_range(grid.width);
    let rows = spawn_range(grid.height);

    for _ in 0..SAMPLE_ATTEMPTS {
        let cell = Cell::new(rng.gen_range(cols.clone()), rng.gen_range(rows.clone()));
        if !occupied.contains(&cell) {
            return cell;
        }
    }

    // Crowded grid: pick uniformly among whatever is still free
    let taken: HashSet<Cell> = occupied.iter().copied().collect();
    let free: Vec<Cell> = rows
        .clone()
        .flat_map(|row| cols.clone().map(move |col| Cell::new(col, row)))
        .filter(|cell| !taken.contains(cell))
        .collect();

    match free.choose(rng) {
        Some(cell) => *cell,
        // Bodies cover every candidate: overlap is allowed
        None => Cell::new(rng.gen_range(cols), rng.gen_range(rows)),
    }
}
