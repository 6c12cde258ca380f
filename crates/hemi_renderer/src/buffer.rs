//! Render output buffer and band views into it.

use std::path::Path;

use hemi_core::Color;
use hemi_math::Interval;

use crate::error::RenderResult;
use crate::scheduler::Band;

/// Row-major buffer of linear RGB colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Set one channel (0 = red, 1 = green, 2 = blue) of the pixel at (x, y).
    pub fn set_channel(&mut self, x: u32, y: u32, channel: usize, value: f32) {
        let index = self.index(x, y);
        self.pixels[index][channel] = value;
    }

    /// Split the buffer into one writable view per band.
    ///
    /// `bands` must be contiguous and start at row 0, as produced by
    /// [`crate::scheduler::partition_rows`]. The views never overlap.
    pub fn split_bands(&mut self, bands: &[Band]) -> Vec<BandView<'_>> {
        let width = self.width;
        let mut rest: &mut [Color] = &mut self.pixels;
        let mut views = Vec::with_capacity(bands.len());

        let mut next_row = 0;
        for band in bands {
            debug_assert_eq!(band.y_start, next_row, "bands must be contiguous");
            next_row = band.y_end;

            let len = band.row_count() as usize * width as usize;
            let (pixels, tail) = std::mem::take(&mut rest).split_at_mut(len);
            rest = tail;
            views.push(BandView {
                band: *band,
                width,
                pixels,
            });
        }

        views
    }

    /// Convert to 8-bit RGB bytes, row-major.
    pub fn to_rgb8(&self, gamma: bool) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&color| color_to_rgb8(color, gamma))
            .collect()
    }

    /// Encode to a file; the format follows the extension (png, bmp, ppm, ...).
    pub fn save<P: AsRef<Path>>(&self, path: P, gamma: bool) -> RenderResult<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgb8(gamma),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Exclusive write access to the rows of one band.
#[derive(Debug)]
pub struct BandView<'a> {
    band: Band,
    width: u32,
    pixels: &'a mut [Color],
}

impl BandView<'_> {
    /// The band this view covers.
    pub fn band(&self) -> Band {
        self.band
    }

    /// Set the pixel at (x, y), with y in image coordinates.
    ///
    /// Panics if y lies outside the band.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        assert!(
            self.band.rows().contains(&y),
            "row {y} outside band {:?}",
            self.band
        );
        let local = (y - self.band.y_start) as usize * self.width as usize + x as usize;
        self.pixels[local] = color;
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb8(color: Color, gamma: bool) -> [u8; 3] {
    color.to_array().map(|c| {
        let c = if gamma { linear_to_gamma(c) } else { c };
        (255.0 * Interval::UNIT.clamp(c)) as u8
    })
}
