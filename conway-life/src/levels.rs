use clap::ValueEnum;
use life_grid::{Grid, Random};
use log::debug;

const RANDOM_LIFE_ODDS: f64 = 0.3;

/// Canned shape, given as live cells relative to its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(u32, u32)],
}

impl Pattern {
    fn extent(&self) -> (u32, u32) {
        let rows = self.cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0);
        (rows, cols)
    }

    /// Places the pattern in the middle of an otherwise dead grid. Cells that
    /// don't fit are dropped.
    fn centered(&self, width: u32, height: u32) -> life_grid::Result<Grid> {
        let (rows, cols) = self.extent();
        debug!("placing {} ({rows}x{cols}) on a {width}x{height} grid", self.name);
        let top = (i64::from(height) - i64::from(rows)) / 2;
        let left = (i64::from(width) - i64::from(cols)) / 2;
        Grid::new(width, height, |row, col| {
            let row = i64::from(row) - top;
            let col = i64::from(col) - left;
            row >= 0
                && col >= 0
                && self
                    .cells
                    .iter()
                    .any(|&(r, c)| i64::from(r) == row && i64::from(c) == col)
        })
    }
}

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

#[rustfmt::skip]
pub const PULSAR: Pattern = Pattern {
    name: "pulsar",
    cells: &[
        (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
        (2, 0), (2, 5), (2, 7), (2, 12),
        (3, 0), (3, 5), (3, 7), (3, 12),
        (4, 0), (4, 5), (4, 7), (4, 12),
        (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
        (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
        (8, 0), (8, 5), (8, 7), (8, 12),
        (9, 0), (9, 5), (9, 7), (9, 12),
        (10, 0), (10, 5), (10, 7), (10, 12),
        (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
    ],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Horizontal dotted lines every seventh row crossed by dotted columns
    /// every thirteenth column.
    Lattice,
    Glider,
    Blinker,
    Pulsar,
    Random { seed: Option<u64> },
}

impl Level {
    pub fn seed_grid(&self, width: u32, height: u32) -> life_grid::Result<Grid> {
        match *self {
            Level::Lattice => Grid::new(width, height, |row, col| {
                if row % 7 == 0 {
                    col % 2 == 1
                } else if col % 13 == 0 {
                    row % 2 == 1
                } else {
                    false
                }
            }),
            Level::Glider => GLIDER.centered(width, height),
            Level::Blinker => BLINKER.centered(width, height),
            Level::Pulsar => PULSAR.centered(width, height),
            Level::Random { seed } => {
                let mut rand = seed.map_or_else(Random::new, Random::from_seed);
                Grid::new(width, height, |_, _| rand.next_bool(RANDOM_LIFE_ODDS))
            }
        }
    }
}

/// Level names accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LevelName {
    Lattice,
    Glider,
    Blinker,
    Pulsar,
    Random,
}

impl LevelName {
    /// `seed` only matters for the random level.
    pub fn level(self, seed: Option<u64>) -> Level {
        match self {
            LevelName::Lattice => Level::Lattice,
            LevelName::Glider => Level::Glider,
            LevelName::Blinker => Level::Blinker,
            LevelName::Pulsar => Level::Pulsar,
            LevelName::Random => Level::Random { seed },
        }
    }
}
