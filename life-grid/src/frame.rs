use crate::Grid;
use std::ops::Deref;

/// One grayscale byte per cell, row-major: 0xff alive, 0x00 dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<u8>,
}

impl Frame {
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl Deref for Frame {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.pixels
    }
}

pub fn rasterize(grid: &Grid) -> Frame {
    let pixels = grid.cells_iter().map(|cell| cell.luma()).collect();
    Frame { pixels }
}
