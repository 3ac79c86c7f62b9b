// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Terminal preview of the painted graph.

use std::io;

use crate::{
    calendar::grid_index,
    intensity::{IntensitySample, LEVEL_COUNT},
};

/// ANSI 256-color foreground escapes, from no commits to the brightest tier.
pub const SHADES_OF_GREEN: [&str; LEVEL_COUNT] = [
    "\x1b[38;5;232m",
    "\x1b[38;5;22m",
    "\x1b[38;5;28m",
    "\x1b[38;5;34m",
    "\x1b[38;5;46m",
];

const RESET: &str = "\x1b[0m";
const CELL: char = '\u{2588}';

/// Writes the samples as a colored grid, one line per weekday.
///
/// `samples` must be in column-major order, as returned by
/// [`map_intensity`](crate::map_intensity), and hold `width * height`
/// entries.
///
/// # Errors
///
/// Propagates write failures from `writer`.
///
/// # Panics
///
/// Panics when `samples` holds fewer than `width * height` entries.
pub fn render_preview<W: io::Write,>(
    writer: &mut W,
    samples: &[IntensitySample],
    width: u32,
    height: u32,
) -> io::Result<(),>
{
    for row in 0..height as usize {
        for column in 0..width as usize {
            let level = samples[grid_index(row, column,)].level;
            write!(writer, "{}{CELL}{RESET} ", SHADES_OF_GREEN[usize::from(level.get(),)])?;
        }
        writeln!(writer)?;
    }

    Ok((),)
}
