// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Loading and validation of the source bitmap.

use std::{fs, io::Cursor, path::Path};

use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::debug;

use crate::{
    calendar::DAYS_PER_WEEK,
    error::{self, Error},
};

/// Height every source image must have, one pixel row per weekday.
pub const GRID_HEIGHT: u32 = DAYS_PER_WEEK as u32;

/// Red, green and blue channels of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct Rgb
{
    /// Red channel.
    pub red:   u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue:  u8,
}

impl Rgb
{
    /// Creates a pixel from its three channels.
    pub const fn new(red: u8, green: u8, blue: u8,) -> Self
    {
        Self {
            red,
            green,
            blue,
        }
    }
}

/// Validated `W x 7` grid of 8-bit RGB pixels.
#[derive(Debug, Clone,)]
pub struct PixelGrid
{
    image: RgbImage,
}

impl PixelGrid
{
    /// Decodes and validates the image stored at `path`.
    ///
    /// # Errors
    ///
    /// * [`Error::Io`] when the file cannot be read.
    /// * [`Error::Image`] when the contents cannot be decoded.
    /// * [`Error::InvalidFormat`] when the color model is anything other than
    ///   three 8-bit channels. Palette PNGs and color-table BMPs are rejected
    ///   from their header, before expansion.
    /// * [`Error::DimensionMismatch`] when the height is not 7 or the width
    ///   is zero.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// use graphpaint::PixelGrid;
    ///
    /// # fn main() -> Result<(), graphpaint::Error> {
    /// let grid = PixelGrid::load(Path::new("pacman.png"))?;
    /// println!("{} week columns", grid.width());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: &Path,) -> Result<Self, Error,>
    {
        debug!("Decoding image {}", path.display());
        let bytes = fs::read(path,).map_err(|source| error::io_error(path, source,),)?;
        let image_error = |source| Error::Image {
            path: path.to_path_buf(),
            source,
        };

        let format = image::guess_format(&bytes,).map_err(image_error,)?;
        match format {
            ImageFormat::Png => reject_indexed_png(path, &bytes,)?,
            ImageFormat::Bmp => reject_indexed_bmp(path, &bytes,)?,
            _ => {}
        }

        let decoded = image::load_from_memory_with_format(&bytes, format,).map_err(image_error,)?;
        match decoded {
            DynamicImage::ImageRgb8(image,) => Self::from_rgb_image(image,),
            other => Err(Error::InvalidFormat {
                path:       path.to_path_buf(),
                color_type: format!("{:?}", other.color()),
            },),
        }
    }

    /// Wraps an in-memory RGB buffer after checking its dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when the buffer is not `W x 7`
    /// with `W > 0`.
    pub fn from_rgb_image(image: RgbImage,) -> Result<Self, Error,>
    {
        let (width, height,) = image.dimensions();
        if height != GRID_HEIGHT {
            return Err(Error::DimensionMismatch {
                width,
                height,
                requirement: format!("height must be exactly {GRID_HEIGHT}"),
            },);
        }
        if width == 0 {
            return Err(Error::DimensionMismatch {
                width,
                height,
                requirement: "width must be positive".to_owned(),
            },);
        }

        Ok(Self {
            image,
        },)
    }

    /// Number of pixel columns, one per week.
    pub fn width(&self,) -> u32
    {
        self.image.width()
    }

    /// Number of pixel rows, always [`GRID_HEIGHT`].
    pub fn height(&self,) -> u32
    {
        self.image.height()
    }

    /// Pixel at column `x` and row `y`.
    ///
    /// # Panics
    ///
    /// Panics when the coordinates lie outside the grid.
    pub fn pixel(&self, x: u32, y: u32,) -> Rgb
    {
        let [red, green, blue,] = self.image.get_pixel(x, y,).0;
        Rgb::new(red, green, blue,)
    }
}

/// Fails for palette PNGs, which the decoder would otherwise expand to RGB.
///
/// Headers that cannot be read are left for the decoder to report.
fn reject_indexed_png(path: &Path, bytes: &[u8],) -> Result<(), Error,>
{
    let Ok(reader,) = png::Decoder::new(Cursor::new(bytes,),).read_info() else {
        return Ok((),);
    };

    let color_type = reader.info().color_type;
    if color_type == png::ColorType::Indexed {
        return Err(Error::InvalidFormat {
            path:       path.to_path_buf(),
            color_type: format!("{color_type:?}"),
        },);
    }

    Ok((),)
}

/// Fails for BMPs storing 8 or fewer bits per pixel, which always use a
/// color table.
fn reject_indexed_bmp(path: &Path, bytes: &[u8],) -> Result<(), Error,>
{
    // Bits per pixel sit at offset 28 of every DIB header variant.
    let Some(&[low, high,],) = bytes.get(28..30,) else {
        return Ok((),);
    };

    let bits_per_pixel = u16::from_le_bytes([low, high,],);
    if bits_per_pixel <= 8 {
        return Err(Error::InvalidFormat {
            path:       path.to_path_buf(),
            color_type: format!("Indexed ({bits_per_pixel}-bit color table)"),
        },);
    }

    Ok((),)
}
