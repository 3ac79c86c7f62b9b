// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Conversion of pixel brightness into per-day commit counts.
//!
//! Brightness uses green-biased weights, `0.2 R + 0.7 G + 0.1 B`, not the
//! conventional luma coefficients.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    calendar::{DAYS_PER_WEEK, grid_index},
    pixels::{PixelGrid, Rgb},
};

/// Number of distinct levels, `0..=4`.
pub const LEVEL_COUNT: usize = 5;

/// Contribution intensity of a single day, always in `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,)]
#[serde(transparent)]
pub struct IntensityLevel(u8,);

impl IntensityLevel
{
    /// Highest representable level.
    pub const MAX: Self = Self(LEVEL_COUNT as u8 - 1,);
    /// Level for days without commits.
    pub const MIN: Self = Self(0,);

    /// Creates a level, returning `None` above [`IntensityLevel::MAX`].
    pub const fn new(value: u8,) -> Option<Self,>
    {
        if value <= Self::MAX.0 { Some(Self(value,),) } else { None }
    }

    /// Buckets a pixel's brightness into a level.
    ///
    /// `floor(luma / 255 * 5)` is clamped to [`IntensityLevel::MAX`], so a
    /// white pixel lands on 4 rather than 5.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphpaint::{IntensityLevel, Rgb};
    ///
    /// assert_eq!(IntensityLevel::from_rgb(Rgb::new(0, 0, 0)).get(), 0);
    /// assert_eq!(IntensityLevel::from_rgb(Rgb::new(0, 255, 0)).get(), 3);
    /// assert_eq!(IntensityLevel::from_rgb(Rgb::new(255, 255, 255)).get(), 4);
    /// ```
    pub fn from_rgb(pixel: Rgb,) -> Self
    {
        let bucket = (luma(pixel,) / 255.0 * LEVEL_COUNT as f64).floor();
        Self(bucket.min(f64::from(Self::MAX.0,),) as u8,)
    }

    /// Mirrors the level around the middle of the scale.
    pub const fn inverted(self,) -> Self
    {
        Self(Self::MAX.0 - self.0,)
    }

    /// Numeric value of the level.
    pub const fn get(self,) -> u8
    {
        self.0
    }

    /// Number of commits a day with this level receives.
    pub const fn commits(self,) -> usize
    {
        self.0 as usize
    }
}

fn luma(pixel: Rgb,) -> f64
{
    0.2 * f64::from(pixel.red,) + 0.7 * f64::from(pixel.green,) + 0.1 * f64::from(pixel.blue,)
}

/// One calendar day paired with its intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
pub struct IntensitySample
{
    /// Day the commits are dated at.
    pub date:  NaiveDate,
    /// Number of commits for the day.
    pub level: IntensityLevel,
}

/// Maps every pixel to the date shown in the same graph cell.
///
/// Pixels are scanned column-major (all rows of column 0, then column 1,
/// ...), which is also the order of the returned samples. The pixel at
/// column `x`, row `y` is paired with `dates[grid_index(y, x)]`.
///
/// # Panics
///
/// Panics when `dates.len()` differs from `7 * pixels.width()`. Callers
/// obtain a matching slice from
/// [`CalendarGrid::leading_columns`](crate::CalendarGrid::leading_columns).
///
/// # Examples
///
/// ```
/// use graphpaint::{PixelGrid, build_grid, map_intensity};
/// use image::RgbImage;
///
/// let pixels = PixelGrid::from_rgb_image(RgbImage::new(50, 7,),)?;
/// let grid = build_grid(2024,)?;
/// let samples = map_intensity(&pixels, grid.leading_columns(50,)?, false,);
/// assert_eq!(samples.len(), 350);
/// assert!(samples.iter().all(|sample| sample.level.get() == 0));
/// # Ok::<(), graphpaint::Error>(())
/// ```
pub fn map_intensity(
    pixels: &PixelGrid,
    dates: &[NaiveDate],
    inverted: bool,
) -> Vec<IntensitySample,>
{
    let width = pixels.width() as usize;
    assert_eq!(
        dates.len(),
        width * DAYS_PER_WEEK,
        "date grid must hold exactly {DAYS_PER_WEEK} days per image column",
    );

    let mut samples = Vec::with_capacity(dates.len(),);
    for x in 0..pixels.width() {
        for y in 0..pixels.height() {
            let mut level = IntensityLevel::from_rgb(pixels.pixel(x, y,),);
            if inverted {
                level = level.inverted();
            }
            samples.push(IntensitySample {
                date: dates[grid_index(y as usize, x as usize,)],
                level,
            },);
        }
    }

    samples
}
