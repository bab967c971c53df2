use crate::{GridError, Result};
use std::fmt::{self, Display};
use std::ops::Index;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn from_alive(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Grayscale pixel value: 0xff for a live cell, 0x00 for a dead one.
    pub fn luma(self) -> u8 {
        match self {
            Cell::Alive => 0xff,
            Cell::Dead => 0x00,
        }
    }

    pub fn color_rgba(self) -> [u8; 4] {
        let luma = self.luma();
        [luma, luma, luma, 0xff]
    }
}

/// Fixed-size grid of cells stored row-major in one contiguous buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u32,
    height: u32,
}

impl Grid {
    /// Builds a grid, asking `initial_state` once per cell in row-major order
    /// whether that cell starts alive.
    pub fn new<F>(width: u32, height: u32, mut initial_state: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        Self::check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                cells.push(Cell::from_alive(initial_state(row, col)));
            }
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn empty(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, |_, _| false)
    }

    fn check_dimensions(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn num_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn same_size(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn get(&self, row: u32, col: u32) -> Result<Cell> {
        self.cell(Loc::new(row, col))
            .copied()
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            })
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &Cell> + Clone {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Cell]> + Clone {
        self.cells.chunks_exact(self.width as usize)
    }

    pub(crate) fn cell(&self, loc: Loc) -> Option<&Cell> {
        loc.grid_index(self.width, self.height)
            .map(|index| &self.cells[index])
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl Index<Loc> for Grid {
    type Output = Cell;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                f.write_str(if cell.is_alive() { "o" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The 3x3 block around a cell. Rows and columns that fall off the grid are
/// `None` and read as dead; the grid does not wrap.
pub struct Neighborhood<'a> {
    grid: &'a Grid,
    rows: [Option<u32>; 3],
    cols: [Option<u32>; 3],
}

impl<'a> Neighborhood<'a> {
    pub fn new(grid: &'a Grid, center: Loc) -> Self {
        let (row_above, row_below) = Self::adjacent_indexes(center.row, grid.height());
        let (col_left, col_right) = Self::adjacent_indexes(center.col, grid.width());
        Self {
            grid,
            rows: [row_above, Some(center.row), row_below],
            cols: [col_left, Some(center.col), col_right],
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        match (self.rows[row], self.cols[col]) {
            (Some(row), Some(col)) => self.grid[Loc::new(row, col)],
            _ => Cell::Dead,
        }
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(Cell),
    {
        for row in 0..3 {
            for col in 0..3 {
                if row != 1 || col != 1 {
                    f(self.cell(row, col));
                }
            }
        }
    }

    pub fn num_live_neighbors(&self) -> u32 {
        let mut result = 0;
        self.for_neighbor_cells(|neighbor| {
            if neighbor.is_alive() {
                result += 1;
            }
        });
        result
    }

    fn adjacent_indexes(index: u32, max: u32) -> (Option<u32>, Option<u32>) {
        let before = index.checked_sub(1);
        let after = index.checked_add(1).filter(|&next| next < max);
        (before, after)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.row < height && self.col < width {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}
