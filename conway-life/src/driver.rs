use crate::terminal::{FrameStatus, TerminalSink, Timing};
use gif_frames::{EncodeError, GifEncoder};
use life_grid::{rasterize, Simulation};
use log::{debug, info};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Steps the simulation `frames` times, writing every new generation as one
/// animation frame. Returns the sink once the trailer is written.
pub fn run_gif<W: Write>(
    simulation: &mut Simulation,
    frames: u64,
    sink: W,
) -> Result<W, EncodeError> {
    let grid = simulation.grid();
    let mut encoder = GifEncoder::create(sink, grid.width(), grid.height())?;
    for frame in 1..=frames {
        simulation.update();
        encoder.write_frame(&rasterize(simulation.grid()))?;
        debug!("frame {frame}/{frames} encoded");
    }
    encoder.close()?;
    info!("encoded {} frames", encoder.frames_written());
    Ok(encoder.into_inner())
}

/// Steps the simulation `frames` times, printing each generation to `out`
/// and sleeping `delay` after each one.
pub fn run_terminal<O: Write>(
    simulation: &mut Simulation,
    sink: &TerminalSink,
    timing: Timing,
    frames: u64,
    delay: Duration,
    out: &mut O,
) -> io::Result<()> {
    for frame in 1..=frames {
        simulation.update();
        let status = FrameStatus {
            frame,
            frames,
            timing,
        };
        write!(out, "{}", sink.render(simulation.grid(), &status))?;
        out.flush()?;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    Ok(())
}
