use crate::levels::{Level, LevelName};
use crate::terminal::{TextColor, Timing, MAX_FPS};
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

const DEFAULT_SIZE: u32 = 48;
const DEFAULT_GIF_FRAMES: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Terminal,
    Gif,
    Window,
}

#[derive(Parser, Debug)]
#[command(name = "conway-life", about = "Conway's Game of Life on a hard-edged grid")]
struct Cli {
    /// Where generations are shown
    #[arg(short, long, value_enum, default_value_t = Mode::Terminal)]
    mode: Mode,
    /// Terminal text color
    #[arg(short, long, value_enum)]
    color: Option<TextColor>,
    /// Starting pattern
    #[arg(short, long, value_enum, default_value_t = LevelName::Lattice)]
    level: LevelName,
    /// Seed for the random level
    #[arg(long)]
    seed: Option<u64>,
    /// Grid width and height [default: 48]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    size: Option<u32>,
    /// Grid width, overrides --size
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,
    /// Grid height, overrides --size
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,
    /// Generations to render [default: 30 for gif, fps * duration otherwise]
    #[arg(short = 'n', long)]
    frames: Option<u64>,
    /// Frames per second
    #[arg(
        long,
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FPS))
    )]
    fps: u32,
    /// Run length in seconds, used for the default frame count
    #[arg(long, default_value_t = 30)]
    duration: u32,
    /// Animation output file
    #[arg(short, long, default_value = "output.gif")]
    output: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    pub color: Option<TextColor>,
    pub level: Level,
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    pub timing: Timing,
    pub output: PathBuf,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let timing = Timing {
            fps: cli.fps,
            duration_secs: cli.duration,
        };
        let frames = cli.frames.unwrap_or(match cli.mode {
            Mode::Gif => DEFAULT_GIF_FRAMES,
            Mode::Terminal | Mode::Window => timing.frames(),
        });
        Self {
            mode: cli.mode,
            color: cli.color,
            level: cli.level.level(cli.seed),
            width: cli.width.or(cli.size).unwrap_or(DEFAULT_SIZE),
            height: cli.height.or(cli.size).unwrap_or(DEFAULT_SIZE),
            frames,
            timing,
            output: cli.output,
        }
    }
}

/// Parses a full command line, program name first. Help and version requests
/// come back as errors too; `clap::Error::use_stderr` tells them apart.
pub fn parse_args<I, T>(args: I) -> Result<RunConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map(RunConfig::from)
}
