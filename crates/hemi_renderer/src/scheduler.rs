//! Band-parallel rendering.
//!
//! The image is cut into horizontal bands of whole rows, one per worker.
//! Each band gets its own named OS thread, its own RNG and an exclusive
//! slice of the output buffer, so no pixel is ever written twice and
//! nothing is locked.

use std::ops::Range;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use hemi_core::Scene;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::buffer::{BandView, ImageBuffer};
use crate::error::{RenderError, RenderResult};
use crate::renderer::{render_pixel, RenderConfig};
use crate::{Camera, Integrator};

/// A contiguous range of image rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Index of this band, top to bottom
    pub index: usize,
    /// First row (inclusive)
    pub y_start: u32,
    /// Last row (exclusive)
    pub y_end: u32,
}

impl Band {
    /// Create a new band.
    pub fn new(index: usize, y_start: u32, y_end: u32) -> Self {
        Self {
            index,
            y_start,
            y_end,
        }
    }

    /// Rows covered by this band.
    pub fn rows(&self) -> Range<u32> {
        self.y_start..self.y_end
    }

    /// Get the number of rows in this band.
    pub fn row_count(&self) -> u32 {
        self.y_end - self.y_start
    }
}

/// Split rows `[0, height)` into `workers` contiguous bands.
///
/// Every band gets `height / workers` rows; the remainder goes to the last
/// band. Zero workers yields no bands.
pub fn partition_rows(height: u32, workers: usize) -> Vec<Band> {
    if workers == 0 {
        return Vec::new();
    }
    let workers = workers as u32;
    let rows_per_band = height / workers;

    (0..workers)
        .map(|i| {
            let y_start = i * rows_per_band;
            let y_end = if i + 1 == workers {
                height
            } else {
                y_start + rows_per_band
            };
            Band::new(i as usize, y_start, y_end)
        })
        .collect()
}

/// Seed for the RNG of band `index`.
pub fn band_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64)
}

/// What one worker did.
#[derive(Debug, Clone, PartialEq)]
pub struct BandStats {
    /// The band that was rendered
    pub band: Band,
    /// First to last row the worker wrote (empty if it wrote none)
    pub rows_rendered: Range<u32>,
    /// Pixels written
    pub pixels: u64,
    /// Thread that rendered the band
    pub worker: ThreadId,
    /// Name of that thread, if it has one
    pub worker_name: Option<String>,
    /// Wall time spent in the worker
    pub elapsed: Duration,
}

/// Render every pixel of one band into its view on the calling thread.
pub fn render_band<I: Integrator + ?Sized>(
    view: &mut BandView<'_>,
    camera: &Camera,
    scene: &Scene,
    integrator: &I,
    samples_per_pixel: u32,
    rng: &mut StdRng,
) -> BandStats {
    let start = Instant::now();
    let band = view.band();
    let mut pixels = 0;
    let mut rows_rendered: Option<Range<u32>> = None;

    for y in band.rows() {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, integrator, x, y, samples_per_pixel, rng);
            view.set(x, y, color);
            pixels += 1;
        }
        rows_rendered.get_or_insert(y..y).end = y + 1;
    }

    let current = thread::current();
    BandStats {
        band,
        rows_rendered: rows_rendered.unwrap_or(band.y_start..band.y_start),
        pixels,
        worker: current.id(),
        worker_name: current.name().map(str::to_owned),
        elapsed: start.elapsed(),
    }
}

/// Render all bands of `image` concurrently, one OS thread per band.
///
/// Blocks until every worker has finished. `config` must already be
/// validated and `bands` must come from [`partition_rows`] for the image
/// height.
pub(crate) fn render_bands<I: Integrator + ?Sized>(
    image: &mut ImageBuffer,
    bands: &[Band],
    camera: &Camera,
    scene: &Scene,
    integrator: &I,
    config: &RenderConfig,
) -> RenderResult<Vec<BandStats>> {
    let views = image.split_bands(bands);

    thread::scope(|scope| -> RenderResult<Vec<BandStats>> {
        let mut handles = Vec::with_capacity(views.len());

        for mut view in views {
            let index = view.band().index;
            let handle = thread::Builder::new()
                .name(format!("hemi-band-{index}"))
                .spawn_scoped(scope, move || {
                    let mut rng = StdRng::seed_from_u64(band_seed(config.seed, index));
                    let stats = render_band(
                        &mut view,
                        camera,
                        scene,
                        integrator,
                        config.samples_per_pixel,
                        &mut rng,
                    );
                    log::debug!(
                        "Band {} (rows {:?}) finished in {:.2?}",
                        index,
                        stats.rows_rendered,
                        stats.elapsed
                    );
                    stats
                })?;
            handles.push((index, handle));
        }

        handles
            .into_iter()
            .map(|(band, handle)| {
                handle
                    .join()
                    .map_err(|_| RenderError::WorkerPanicked { band })
            })
            .collect()
    })
}
