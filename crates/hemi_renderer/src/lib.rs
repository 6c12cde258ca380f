//! Hemi renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over [`hemi_core`] scenes. Rays bounce off
//! diffuse planes and spheres in directions drawn from a hemisphere sampler
//! until they escape to the background or run out of depth. Rows of the
//! image are split into bands and rendered on a dedicated thread pool.
//!
//! ```no_run
//! use hemi_renderer::{render, Scene, Vec3};
//!
//! let image = render(&Scene::demo(), Vec3::new(0.0, 3.0, -1.0), 200, 200, 4, 4, 3)?;
//! image.save("out.png", true)?;
//! # Ok::<(), hemi_renderer::RenderError>(())
//! ```

mod buffer;
mod camera;
mod error;
mod integrator;
mod renderer;
mod sampler;
mod scheduler;

pub use buffer::{color_to_rgb8, linear_to_gamma, BandView, ImageBuffer};
pub use camera::{Camera, DEFAULT_ORIGIN};
pub use error::{RenderError, RenderResult};
pub use integrator::{AmbientOcclusion, Integrator, PathIntegrator, DEFAULT_BACKGROUND};
pub use renderer::{render, render_pixel, render_with, RenderConfig, RenderOutput};
pub use sampler::{
    sample_concentric_disk, BiasedHemisphere, CosineHemisphere, HemisphereSampler, SamplerKind,
};
pub use scheduler::{band_seed, partition_rows, render_band, Band, BandStats};

/// Re-export scene types from hemi_core
pub use hemi_core::{Color, Plane, Primitive, Scene, Sphere};
pub use hemi_math::{Ray, Vec3};
