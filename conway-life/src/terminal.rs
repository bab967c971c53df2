use clap::ValueEnum;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use life_grid::{Cell, Grid};
use std::fmt::{self, Display};
use std::time::Duration;

const BORDER: char = '.';
const DEAD_CELL: char = ' ';
const LIVE_CELL: char = '*';

/// Highest accepted frame rate; keeps the frame delay well above zero.
pub const MAX_FPS: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TextColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl TextColor {
    /// The eight standard ANSI foreground colours.
    fn color(self) -> Color {
        match self {
            TextColor::Black => Color::Black,
            TextColor::Red => Color::DarkRed,
            TextColor::Green => Color::DarkGreen,
            TextColor::Yellow => Color::DarkYellow,
            TextColor::Blue => Color::DarkBlue,
            TextColor::Magenta => Color::DarkMagenta,
            TextColor::Cyan => Color::DarkCyan,
            TextColor::White => Color::Grey,
        }
    }
}

/// Frame rate and run length shown above the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub fps: u32,
    pub duration_secs: u32,
}

impl Timing {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn frames(&self) -> u64 {
        u64::from(self.fps) * u64::from(self.duration_secs)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FrameStatus {
    pub frame: u64,
    pub frames: u64,
    pub timing: Timing,
}

/// Formats a grid snapshot as text. Holds no terminal state; every call
/// returns a full screen that starts by clearing the terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalSink {
    color: Option<TextColor>,
}

impl TerminalSink {
    pub fn new(color: Option<TextColor>) -> Self {
        Self { color }
    }

    pub fn render<'a>(&self, grid: &'a Grid, status: &'a FrameStatus) -> Screen<'a> {
        Screen {
            grid,
            status,
            color: self.color,
        }
    }
}

/// One full terminal screen: clear, home the cursor, status block, grid.
pub struct Screen<'a> {
    grid: &'a Grid,
    status: &'a FrameStatus,
    color: Option<TextColor>,
}

impl Screen<'_> {
    fn fmt_status(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timing = self.status.timing;
        writeln!(f, "delay(s)       {:7.2}", timing.delay().as_secs_f32())?;
        writeln!(f, "duration(s)    {:4} ", timing.duration_secs)?;
        writeln!(f, "frames/sec     {:4}", timing.fps)?;
        writeln!(f, "frame          {:4}/{}", self.status.frame, self.status.frames)
    }

    fn fmt_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_border(f, self.grid.width())?;
        for row in self.grid.rows() {
            write!(f, "{BORDER}")?;
            for &cell in row {
                let symbol = if cell == Cell::Alive { LIVE_CELL } else { DEAD_CELL };
                write!(f, "{symbol:>2} ")?;
            }
            writeln!(f, "{BORDER}")?;
        }
        Self::fmt_border(f, self.grid.width())
    }

    fn fmt_border(f: &mut fmt::Formatter<'_>, width: u32) -> fmt::Result {
        f.write_str(" ")?;
        for _ in 0..width as usize * 3 {
            write!(f, "{BORDER}")?;
        }
        f.write_str(" \n")
    }
}

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Clear(ClearType::All), MoveTo(0, 0))?;
        self.fmt_status(f)?;
        match self.color {
            Some(color) => {
                write!(f, "{}", SetForegroundColor(color.color()))?;
                self.fmt_grid(f)?;
                write!(f, "{ResetColor}")
            }
            None => self.fmt_grid(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: Timing = Timing {
        fps: 60,
        duration_secs: 30,
    };

    fn status(frame: u64) -> FrameStatus {
        FrameStatus {
            frame,
            frames: 1800,
            timing: TIMING,
        }
    }

    #[test]
    fn renders_status_and_bordered_grid() {
        let grid = Grid::new(2, 2, |row, col| row == 0 && col == 1).unwrap();
        let status = status(7);
        let screen = TerminalSink::default().render(&grid, &status).to_string();

        let expected = [
            "\x1b[2J\x1b[1;1Hdelay(s)          0.02",
            "duration(s)      30 ",
            "frames/sec       60",
            "frame             7/1800",
            " ...... ",
            ".    * .",
            ".      .",
            " ...... ",
            "",
        ]
        .join("\n");
        assert_eq!(screen, expected);
    }

    #[test]
    fn color_wraps_grid_only() {
        let grid = Grid::empty(1, 1).unwrap();
        let status = status(1);
        let screen = TerminalSink::new(Some(TextColor::Green))
            .render(&grid, &status)
            .to_string();

        let set_green = SetForegroundColor(Color::DarkGreen).to_string();
        let grid_start = screen.find(&set_green).unwrap();
        assert!(screen[..grid_start].contains("frame"));
        assert!(screen.ends_with(&format!(" ... \n{ResetColor}")));
    }

    #[test]
    fn every_row_has_the_border_width() {
        let grid = Grid::new(5, 3, |row, col| (row + col) % 2 == 0).unwrap();
        let status = status(1);
        let screen = TerminalSink::default().render(&grid, &status).to_string();
        let grid_lines: Vec<&str> = screen.lines().skip(4).collect();
        assert_eq!(grid_lines.len(), 5);
        assert!(grid_lines.iter().all(|line| line.chars().count() == 17));
    }

    #[test]
    fn timing_derives_delay_and_frames() {
        assert_eq!(TIMING.frames(), 1800);
        assert_eq!(
            Timing {
                fps: 4,
                duration_secs: 1
            }
            .delay(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn fastest_frame_rate_still_waits() {
        let timing = Timing {
            fps: MAX_FPS,
            duration_secs: 1,
        };
        assert_eq!(timing.delay(), Duration::from_millis(1));
    }

    #[test]
    fn colors_are_the_standard_ansi_foregrounds() {
        assert_eq!(TextColor::Black.color(), Color::Black);
        assert_eq!(TextColor::Red.color(), Color::DarkRed);
        assert_eq!(TextColor::White.color(), Color::Grey);
        assert_eq!(TextColor::from_str("cyan", false), Ok(TextColor::Cyan));
        assert!(TextColor::from_str("purple", false).is_err());
    }
}
