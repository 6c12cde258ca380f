//! Render entry points.
//!
//! [`render`] is the one-call path tracer: default camera framing, biased
//! hemisphere sampling, white background. [`render_with`] takes an explicit
//! camera and integrator.

use std::time::{Duration, Instant};

use hemi_core::{Color, Scene};
use hemi_math::Vec3;
use rand::RngCore;

use crate::buffer::ImageBuffer;
use crate::error::{RenderError, RenderResult};
use crate::scheduler::{partition_rows, render_bands, BandStats};
use crate::{Camera, Integrator, PathIntegrator};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of bands, and therefore worker threads
    pub workers: usize,
    /// Independent estimates averaged per pixel
    pub samples_per_pixel: u32,
    /// Base seed; band `i` uses `seed + i`
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(8),
            samples_per_pixel: 4,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Check the configuration against an image size and integrator.
    pub fn validate<I: Integrator + ?Sized>(
        &self,
        width: u32,
        height: u32,
        integrator: &I,
    ) -> RenderResult<()> {
        if self.workers == 0 {
            return Err(RenderError::ZeroWorkers);
        }
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage { width, height });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if integrator.max_depth() == Some(0) {
            return Err(RenderError::ZeroDepth);
        }
        Ok(())
    }
}

/// A finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    /// Per-worker statistics, in band order
    pub bands: Vec<BandStats>,
    pub elapsed: Duration,
}

/// Average `samples_per_pixel` independent estimates for pixel (x, y).
pub fn render_pixel<I: Integrator + ?Sized>(
    camera: &Camera,
    scene: &Scene,
    integrator: &I,
    x: u32,
    y: u32,
    samples_per_pixel: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += integrator.radiance(scene, &ray, rng);
    }

    pixel_color / samples_per_pixel.max(1) as f32
}

/// Render `scene` through `camera` with `integrator`.
///
/// The image size comes from the camera. Blocks until every band is done.
pub fn render_with<I: Integrator + ?Sized>(
    scene: &Scene,
    camera: &Camera,
    integrator: &I,
    config: &RenderConfig,
) -> RenderResult<RenderOutput> {
    let (width, height) = (camera.image_width, camera.image_height);
    config.validate(width, height, integrator)?;

    let mut workers = config.workers;
    if workers > height as usize {
        log::warn!(
            "{} workers requested for {} rows, using {}",
            workers,
            height,
            height
        );
        workers = height as usize;
    }

    log::info!(
        "Rendering {}x{} with {} primitives, {} workers, {} spp",
        width,
        height,
        scene.len(),
        workers,
        config.samples_per_pixel
    );

    let start = Instant::now();
    let bands = partition_rows(height, workers);
    let mut image = ImageBuffer::new(width, height);
    let band_stats = render_bands(&mut image, &bands, camera, scene, integrator, config)?;
    let elapsed = start.elapsed();

    log::info!("Rendered in {:.2?}", elapsed);

    Ok(RenderOutput {
        image,
        bands: band_stats,
        elapsed,
    })
}

/// Path trace `scene` from `camera_origin` with the default framing.
pub fn render(
    scene: &Scene,
    camera_origin: Vec3,
    image_width: u32,
    image_height: u32,
    worker_count: usize,
    samples_per_pixel: u32,
    max_bounce_depth: u32,
) -> RenderResult<ImageBuffer> {
    let camera = Camera::new(camera_origin).with_resolution(image_width, image_height);
    let integrator = PathIntegrator::new(max_bounce_depth);
    let config = RenderConfig {
        workers: worker_count,
        samples_per_pixel,
        ..Default::default()
    };

    render_with(scene, &camera, &integrator, &config).map(|output| output.image)
}
