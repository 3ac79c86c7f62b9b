//! Paint a small bitmap onto a yearly contribution graph.
//!
//! The library turns a `W x 7` RGB image into an ordered plan of dated
//! commits: [`build_grid`] lays out the Sunday..Saturday weeks of a year,
//! [`map_intensity`] buckets every pixel into a level `0..=4` and pairs it
//! with the date shown in the same graph cell, and [`emit_history`] replays
//! the plan into a fresh [`GitRepository`]. [`render_preview`] prints the
//! expected graph to a terminal.

mod calendar;
mod config;
mod error;
mod history;
mod intensity;
mod pipeline;
mod pixels;
mod preview;

pub use calendar::{CalendarGrid, DAYS_PER_WEEK, build_grid, grid_index};
pub use config::{DEFAULT_IMAGE_PATH, DEFAULT_REPO_DIR, DEFAULT_TARGET_YEAR, GraphConfig};
pub use error::{Error, io_error};
pub use history::{
    CommitAuthor, CommitRecord, CommitSink, GitRepository, HISTORY_FILE, PLACEHOLDER_FILE,
    emit_history,
};
pub use intensity::{IntensityLevel, IntensitySample, LEVEL_COUNT, map_intensity};
pub use pipeline::GraphPlan;
pub use pixels::{GRID_HEIGHT, PixelGrid, Rgb};
pub use preview::{SHADES_OF_GREEN, render_preview};
