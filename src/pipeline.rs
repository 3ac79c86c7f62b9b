// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validation and planning stage shared by every CLI command.
//!
//! [`GraphPlan::prepare`] performs every check that can fail on user input
//! before anything is written, so a rejected image or year never leaves a
//! half-built repository behind.

use serde::Serialize;
use tracing::info;

use crate::{
    calendar::build_grid,
    config::GraphConfig,
    error::Error,
    intensity::{IntensitySample, map_intensity},
    pixels::PixelGrid,
};

/// Ordered commit plan derived from an image and a year.
#[derive(Debug, Clone, Serialize,)]
pub struct GraphPlan
{
    year:     i32,
    width:    u32,
    height:   u32,
    inverted: bool,
    samples:  Vec<IntensitySample,>,
}

impl GraphPlan
{
    /// Loads the configured image, aligns it with the year's calendar and
    /// computes the per-day levels.
    ///
    /// # Errors
    ///
    /// * [`Error::Io`], [`Error::Image`], [`Error::InvalidFormat`] or
    ///   [`Error::DimensionMismatch`] from [`PixelGrid::load`].
    /// * [`Error::DimensionMismatch`] when the image has more columns than
    ///   the year has full weeks.
    /// * [`Error::Validation`] for an unsupported year.
    pub fn prepare(config: &GraphConfig,) -> Result<Self, Error,>
    {
        let pixels = PixelGrid::load(&config.image_path,)?;
        Self::from_pixels(&pixels, config.target_year, config.inverted_colors,)
    }

    /// Builds a plan from an already validated pixel grid.
    ///
    /// # Errors
    ///
    /// See [`GraphPlan::prepare`].
    pub fn from_pixels(pixels: &PixelGrid, year: i32, inverted: bool,) -> Result<Self, Error,>
    {
        let grid = build_grid(year,)?;
        let dates = grid.leading_columns(pixels.width(),)?;
        let samples = map_intensity(pixels, dates, inverted,);

        let plan = Self {
            year,
            width: pixels.width(),
            height: pixels.height(),
            inverted,
            samples,
        };
        info!(
            "Planned {} commits over {} days of {} ({}x{} image{})",
            plan.total_commits(),
            plan.samples.len(),
            year,
            plan.width,
            plan.height,
            if inverted { ", inverted" } else { "" }
        );

        Ok(plan,)
    }

    /// Year the plan paints.
    pub fn year(&self,) -> i32
    {
        self.year
    }

    /// Image width in week columns.
    pub fn width(&self,) -> u32
    {
        self.width
    }

    /// Image height in rows.
    pub fn height(&self,) -> u32
    {
        self.height
    }

    /// Samples in column-major order.
    pub fn samples(&self,) -> &[IntensitySample]
    {
        &self.samples
    }

    /// Sum of all levels, the number of commits the plan produces.
    pub fn total_commits(&self,) -> usize
    {
        self.samples.iter().map(|sample| sample.level.commits(),).sum()
    }
}
