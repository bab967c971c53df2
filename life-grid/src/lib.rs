#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Fixed-size Game of Life grids with hard edges, the B3/S23 step function,
//! and the grayscale rasterizer used by the output sinks.

mod error;
mod frame;
mod grid;
mod life;
mod random;

pub use error::{GridError, Result};
pub use frame::{rasterize, Frame};
pub use grid::{Cell, Grid, Loc, Neighborhood};
pub use life::{step, step_into, Simulation};
pub use random::Random;

/// Something that owns a grid and can advance it one generation.
pub trait World {
    fn grid(&self) -> &Grid;
    fn update(&mut self);
}
