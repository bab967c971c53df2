#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Writes grayscale frames into a GIF89a-framed byte stream.
//!
//! The stream carries the GIF header, logical screen descriptor, one image
//! descriptor per frame and the trailer, but the pixel data of each frame is
//! stored literally, one byte per pixel. There is no color table and no LZW
//! stage, so general-purpose GIF decoders will not display the result.

mod error;

pub use error::{EncodeError, Result};

use log::{debug, trace};
use std::io::Write;

pub const HEADER: &[u8; 6] = b"GIF89a";
pub const TRAILER: u8 = 0x3b;
pub const IMAGE_SEPARATOR: u8 = 0x2c;

// Global color table flag, 8-bit color resolution, 256-entry table size.
const SCREEN_PACKED_FIELD: u8 = 0xf7;
const BACKGROUND_COLOR_INDEX: u8 = 0x00;
const PIXEL_ASPECT_RATIO: u8 = 0x00;
// No local color table, not interlaced.
const IMAGE_PACKED_FIELD: u8 = 0x00;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderState {
    Unopened,
    DescriptorWritten,
    FrameWritten,
    Closed,
    /// The sink returned an I/O error; the stream is incomplete.
    Failed,
}

impl EncoderState {
    fn name(self) -> &'static str {
        match self {
            EncoderState::Unopened => "unopened",
            EncoderState::DescriptorWritten => "open",
            EncoderState::FrameWritten => "writing frames",
            EncoderState::Closed => "closed",
            EncoderState::Failed => "failed",
        }
    }
}

/// Appends an animation to `sink`. The sink belongs to the encoder from
/// `open` until `close`; take it back with `into_inner`.
#[derive(Debug)]
pub struct GifEncoder<W: Write> {
    sink: W,
    width: u16,
    height: u16,
    state: EncoderState,
    frames_written: usize,
    bytes_written: u64,
}

impl<W: Write> GifEncoder<W> {
    pub fn new(sink: W, width: u32, height: u32) -> Result<Self> {
        let invalid = || EncodeError::InvalidDimensions { width, height };
        let canvas_width = u16::try_from(width).map_err(|_| invalid())?;
        let canvas_height = u16::try_from(height).map_err(|_| invalid())?;
        if canvas_width == 0 || canvas_height == 0 {
            return Err(invalid());
        }
        Ok(Self {
            sink,
            width: canvas_width,
            height: canvas_height,
            state: EncoderState::Unopened,
            frames_written: 0,
            bytes_written: 0,
        })
    }

    /// `new` followed by `open`.
    pub fn create(sink: W, width: u32, height: u32) -> Result<Self> {
        let mut encoder = Self::new(sink, width, height)?;
        encoder.open()?;
        Ok(encoder)
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Writes the header and the logical screen descriptor.
    pub fn open(&mut self) -> Result<()> {
        self.expect_state("open", &[EncoderState::Unopened])?;

        self.write(HEADER)?;
        let descriptor = self.screen_descriptor();
        self.write(&descriptor)?;

        self.state = EncoderState::DescriptorWritten;
        debug!("opened {}x{} animation", self.width, self.height);
        Ok(())
    }

    /// Writes one image descriptor followed by the frame's raw pixel bytes.
    pub fn write_frame(&mut self, pixels: &[u8]) -> Result<()> {
        self.expect_state(
            "write a frame",
            &[EncoderState::DescriptorWritten, EncoderState::FrameWritten],
        )?;
        if pixels.len() != self.frame_len() {
            return Err(EncodeError::SizeMismatch {
                expected: self.frame_len(),
                actual: pixels.len(),
            });
        }

        let descriptor = self.image_descriptor();
        self.write(&descriptor)?;
        self.write(pixels)?;

        self.state = EncoderState::FrameWritten;
        self.frames_written += 1;
        trace!("wrote frame {}", self.frames_written);
        Ok(())
    }

    /// Writes the trailer and flushes the sink.
    pub fn close(&mut self) -> Result<()> {
        self.expect_state(
            "close",
            &[EncoderState::DescriptorWritten, EncoderState::FrameWritten],
        )?;

        self.write(&[TRAILER])?;
        if let Err(err) = self.sink.flush() {
            self.state = EncoderState::Failed;
            return Err(err.into());
        }

        self.state = EncoderState::Closed;
        debug!(
            "closed animation: {} frames, {} bytes",
            self.frames_written, self.bytes_written
        );
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn screen_descriptor(&self) -> [u8; 7] {
        let [width_lo, width_hi] = self.width.to_le_bytes();
        let [height_lo, height_hi] = self.height.to_le_bytes();
        [
            width_lo,
            width_hi,
            height_lo,
            height_hi,
            SCREEN_PACKED_FIELD,
            BACKGROUND_COLOR_INDEX,
            PIXEL_ASPECT_RATIO,
        ]
    }

    fn image_descriptor(&self) -> [u8; 10] {
        let [width_lo, width_hi] = self.width.to_le_bytes();
        let [height_lo, height_hi] = self.height.to_le_bytes();
        [
            IMAGE_SEPARATOR,
            0x00,
            0x00,
            0x00,
            0x00,
            width_lo,
            width_hi,
            height_lo,
            height_hi,
            IMAGE_PACKED_FIELD,
        ]
    }

    fn expect_state(&self, operation: &'static str, allowed: &[EncoderState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(EncodeError::InvalidState {
                operation,
                state: self.state.name(),
            })
        }
    }

    /// Any I/O error leaves the encoder `Failed`.
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if let Err(err) = self.sink.write_all(bytes) {
            self.state = EncoderState::Failed;
            return Err(err.into());
        }
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}
