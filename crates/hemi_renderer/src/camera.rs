//! Pinhole camera for primary ray generation.

use hemi_math::{normalize_guarded, Ray, Vec2, Vec3};
use rand::{Rng, RngCore};

/// Camera origin of the demo scene.
pub const DEFAULT_ORIGIN: Vec3 = Vec3::new(0.0, 3.0, -1.0);

/// Pinhole camera looking through a flat viewport.
///
/// The viewport is an axis-aligned rectangle in the XY plane whose center
/// sits at `origin + view_offset`. Its height is `viewport_height` and its
/// width follows the image aspect ratio. Pixel x grows toward -X and pixel
/// y toward -Y, so +Z is forward with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    origin: Vec3,
    view_offset: Vec3,
    viewport_height: f32,
    jitter: bool,
}

impl Camera {
    /// Create a camera at `origin` looking along +Z, tilted slightly down.
    pub fn new(origin: Vec3) -> Self {
        Self {
            image_width: 1000,
            image_height: 1000,
            origin,
            view_offset: Vec3::new(0.0, -0.3, 1.0),
            viewport_height: 1.0,
            jitter: false,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the viewport center (relative to the origin) and height.
    pub fn with_view(mut self, view_offset: Vec3, viewport_height: f32) -> Self {
        self.view_offset = view_offset;
        self.viewport_height = viewport_height;
        self
    }

    /// Jitter each sample within its pixel instead of using the pixel center.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Camera position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Generate a ray through pixel (x, y).
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.jitter {
            Vec2::new(rng.gen::<f32>(), rng.gen::<f32>())
        } else {
            Vec2::splat(0.5)
        };

        let width = self.image_width.max(1) as f32;
        let height = self.image_height.max(1) as f32;
        let viewport_width = self.viewport_height * width / height;

        let u = (x as f32 + offset.x) / width;
        let v = (y as f32 + offset.y) / height;

        let target = self.view_offset
            + Vec3::new(
                (0.5 - u) * viewport_width,
                (0.5 - v) * self.viewport_height,
                0.0,
            );

        Ray::new(self.origin, normalize_guarded(target))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}
