use crate::{Cell, Grid, Loc, Neighborhood, World};
use log::trace;
use std::mem;

/// Computes the next generation under B3/S23 as a new grid.
pub fn step(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    step_into(grid, &mut next);
    next
}

/// Writes the successor of `grid` into `next`, reading only from `grid`.
pub fn step_into(grid: &Grid, next: &mut Grid) {
    assert!(
        grid.same_size(next),
        "step_into needs equal sizes, got {}x{} and {}x{}",
        grid.width(),
        grid.height(),
        next.width(),
        next.height()
    );

    let (width, height) = (grid.width(), grid.height());
    let locs = (0..height).flat_map(|row| (0..width).map(move |col| Loc::new(row, col)));
    for (loc, next_cell) in locs.zip(next.cells_mut()) {
        *next_cell = next_state(grid[loc], &Neighborhood::new(grid, loc));
    }
}

fn next_state(cell: Cell, neighborhood: &Neighborhood) -> Cell {
    let neighbors = neighborhood.num_live_neighbors();
    match (cell, neighbors) {
        (Cell::Alive, 2 | 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// The current grid plus a scratch grid of the same size. Each update
/// computes into the scratch grid and swaps the two.
#[derive(Clone, Debug)]
pub struct Simulation {
    cells: Grid,
    next_cells: Grid,
    generation: u64,
}

impl Simulation {
    pub fn new(seed: Grid) -> Self {
        Self {
            next_cells: seed.clone(),
            cells: seed,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn update(&mut self) {
        step_into(&self.cells, &mut self.next_cells);
        mem::swap(&mut self.next_cells, &mut self.cells);
        self.generation += 1;
        trace!(
            "generation {}: {} live cells",
            self.generation,
            self.cells.num_alive()
        );
    }
}

impl World for Simulation {
    fn grid(&self) -> &Grid {
        Simulation::grid(self)
    }

    fn update(&mut self) {
        Simulation::update(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with(width: u32, height: u32, live: &[(u32, u32)]) -> Grid {
        Grid::new(width, height, |row, col| live.contains(&(row, col))).unwrap()
    }

    #[test]
    fn lone_cell_dies() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        assert_eq!(step(&grid).num_alive(), 0);
    }

    #[test]
    fn block_is_still_life() {
        let grid = grid_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(step(&grid), grid);
    }

    #[test]
    fn block_in_corner_is_still_life() {
        let grid = grid_with(4, 4, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(step(&grid), grid);
    }

    #[test]
    fn blinker_has_period_two() {
        let horizontal = grid_with(7, 7, &[(3, 2), (3, 3), (3, 4)]);
        let vertical = grid_with(7, 7, &[(2, 3), (3, 3), (4, 3)]);

        let next = step(&horizontal);
        assert_eq!(next, vertical);
        assert_eq!(step(&next), horizontal);
    }

    #[test]
    fn blinker_on_wide_grid_keeps_row_major_locations() {
        let horizontal = grid_with(9, 5, &[(2, 3), (2, 4), (2, 5)]);
        let vertical = grid_with(9, 5, &[(1, 4), (2, 4), (3, 4)]);

        let mut next = Grid::empty(9, 5).unwrap();
        step_into(&horizontal, &mut next);
        assert_eq!(next, vertical);
        step_into(&vertical, &mut next);
        assert_eq!(next, horizontal);
    }

    #[test]
    fn overcrowded_cell_dies() {
        // Center has four live neighbors.
        let grid = grid_with(5, 5, &[(1, 1), (1, 3), (2, 2), (3, 1), (3, 3)]);
        assert_eq!(step(&grid).get(2, 2), Ok(Cell::Dead));
    }

    #[test]
    fn edge_cell_counts_only_in_bounds_neighbors() {
        // (0, 2) sees three live cells in row 1. Wrapping would add the live
        // cells in the bottom row as well, making four.
        let grid = grid_with(5, 5, &[(1, 1), (1, 2), (1, 3), (4, 1), (4, 2), (4, 3)]);
        let next = step(&grid);
        assert_eq!(next.get(0, 2), Ok(Cell::Alive));
        assert_eq!(next.get(0, 1), Ok(Cell::Dead));
    }

    #[test]
    fn corner_cell_born_without_wraparound() {
        // Three in-bounds neighbors of (0, 0); the opposite corners are alive
        // too and would count if the grid wrapped.
        let grid = grid_with(4, 4, &[(0, 1), (1, 0), (1, 1), (3, 3), (0, 3), (3, 0)]);
        assert_eq!(step(&grid).get(0, 0), Ok(Cell::Alive));
    }

    #[test]
    fn step_leaves_input_untouched() {
        let grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let copy = grid.clone();
        let _ = step(&grid);
        assert_eq!(grid, copy);
    }

    #[test]
    #[should_panic(expected = "equal sizes")]
    fn step_into_rejects_mismatched_sizes() {
        let grid = Grid::empty(3, 3).unwrap();
        let mut next = Grid::empty(4, 3).unwrap();
        step_into(&grid, &mut next);
    }

    #[test]
    fn simulation_threads_state_through_updates() {
        let glider = grid_with(8, 8, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let mut simulation = Simulation::new(glider.clone());

        let mut expected = glider;
        for _ in 0..4 {
            simulation.update();
            expected = step(&expected);
            assert_eq!(simulation.grid(), &expected);
        }
        assert_eq!(simulation.generation(), 4);
        // A glider moves one cell diagonally every four generations.
        assert_eq!(
            simulation.grid(),
            &grid_with(8, 8, &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)])
        );
    }

    proptest! {
        #[test]
        fn dead_grid_stays_dead(width in 1u32..40, height in 1u32..40) {
            let grid = Grid::empty(width, height).unwrap();
            prop_assert_eq!(step(&grid), grid);
        }

        #[test]
        fn step_preserves_dimensions(
            width in 1u32..16,
            height in 1u32..16,
            alive in proptest::collection::vec(any::<bool>(), 256),
        ) {
            let grid = Grid::new(width, height, |row, col| alive[(row * 16 + col) as usize]).unwrap();
            let next = step(&grid);
            prop_assert_eq!(next.width(), width);
            prop_assert_eq!(next.height(), height);
        }
    }
}
