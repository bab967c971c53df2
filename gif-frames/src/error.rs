use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("canvas must be 1..=65535 pixels on each side, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("frame has {actual} pixels, canvas needs {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("cannot {operation} while the encoder is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, EncodeError>;
