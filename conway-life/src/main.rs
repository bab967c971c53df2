#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod driver;
mod levels;
mod terminal;

use anyhow::Context;
use config::{Mode, RunConfig};
use life_grid::Simulation;
use log::{error, info};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use terminal::TerminalSink;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match config::parse_args(env::args_os()) {
        Ok(config) => config,
        Err(err) => {
            // Help and version output also arrive here, on stdout.
            if let Err(print_err) = err.print() {
                error!("could not print usage: {print_err}");
            }
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: RunConfig) -> anyhow::Result<()> {
    info!(
        "{:?} mode, {:?} level on a {}x{} grid, {} frames",
        config.mode, config.level, config.width, config.height, config.frames
    );

    let seed = config
        .level
        .seed_grid(config.width, config.height)
        .context("could not seed the initial grid")?;
    let simulation = Simulation::new(seed);

    match config.mode {
        Mode::Gif => write_gif(simulation, &config),
        Mode::Terminal => print_to_terminal(simulation, &config),
        Mode::Window => life_window::animate(simulation, config.timing.delay(), config.frames)
            .context("window renderer failed"),
    }
}

fn write_gif(mut simulation: Simulation, config: &RunConfig) -> anyhow::Result<()> {
    let path = &config.output;
    let file = File::create(path)
        .with_context(|| format!("could not open {} for writing", path.display()))?;
    driver::run_gif(&mut simulation, config.frames, BufWriter::new(file))
        .with_context(|| format!("could not write animation to {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn print_to_terminal(mut simulation: Simulation, config: &RunConfig) -> anyhow::Result<()> {
    let sink = TerminalSink::new(config.color);
    let mut out = io::stdout().lock();
    driver::run_terminal(
        &mut simulation,
        &sink,
        config.timing,
        config.frames,
        config.timing.delay(),
        &mut out,
    )
    .context("could not write to the terminal")
}
