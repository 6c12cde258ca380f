//! Radiance estimators.
//!
//! [`PathIntegrator`] follows diffuse bounces recursively up to a fixed
//! depth. [`AmbientOcclusion`] is a cheaper single-bounce alternative.

use hemi_core::{Color, Scene};
use hemi_math::{normalize_guarded, Ray, Vec3};
use rand::RngCore;

use crate::sampler::{BiasedHemisphere, HemisphereSampler};

/// Radiance returned for rays that leave the scene.
pub const DEFAULT_BACKGROUND: Color = Color::ONE;

/// Estimates the radiance arriving along a ray.
pub trait Integrator: Send + Sync {
    /// One Monte Carlo estimate for `ray`.
    fn radiance(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color;

    /// Bounce limit, for integrators that have one.
    fn max_depth(&self) -> Option<u32> {
        None
    }
}

/// Recursive diffuse path tracer.
///
/// Each hit samples one bounce direction and multiplies the recursively
/// estimated incoming radiance by the primitive's reflectance. Paths that
/// reach `max_depth` contribute black.
#[derive(Debug, Clone)]
pub struct PathIntegrator<S = BiasedHemisphere> {
    max_depth: u32,
    background: Color,
    sampler: S,
}

impl PathIntegrator {
    /// Path integrator with the biased sampler and a white background.
    pub fn new(max_depth: u32) -> Self {
        Self {
            max_depth,
            background: DEFAULT_BACKGROUND,
            sampler: BiasedHemisphere,
        }
    }
}

impl<S: HemisphereSampler> PathIntegrator<S> {
    /// Replace the bounce sampler.
    pub fn with_sampler<T: HemisphereSampler>(self, sampler: T) -> PathIntegrator<T> {
        PathIntegrator {
            max_depth: self.max_depth,
            background: self.background,
            sampler,
        }
    }

    /// Set the radiance of escaping rays.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Estimate radiance along `ray`, which is `depth` bounces into its path.
    pub fn trace(&self, scene: &Scene, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        if depth >= self.max_depth {
            return Color::ZERO;
        }

        let Some(hit) = scene.closest_hit(ray) else {
            return self.background;
        };

        let direction = self.sampler.sample(hit.normal, rng);
        let bounce = Ray::new(hit.position, direction);
        let incoming = self.trace(scene, &bounce, depth + 1, rng);

        hit.primitive.color() * incoming
    }
}

impl<S: HemisphereSampler> Integrator for PathIntegrator<S> {
    fn radiance(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        self.trace(scene, ray, 0, rng)
    }

    fn max_depth(&self) -> Option<u32> {
        Some(self.max_depth)
    }
}

/// Direct light from a fixed direction plus an ambient occlusion term.
///
/// On a primary hit, `samples` hemisphere rays are fired and the fraction
/// that escapes becomes the ambient term. The direct term is `max(0, n.L)`
/// when a shadow ray toward `L` escapes. With the default weights only the
/// ambient term contributes.
#[derive(Debug, Clone)]
pub struct AmbientOcclusion<S = BiasedHemisphere> {
    samples: u32,
    light_direction: Vec3,
    direct_weight: f32,
    background: Color,
    sampler: S,
}

impl AmbientOcclusion {
    /// Ambient occlusion with `samples` rays per hit and no direct light.
    pub fn new(samples: u32) -> Self {
        Self {
            samples,
            light_direction: Vec3::Y,
            direct_weight: 0.0,
            background: DEFAULT_BACKGROUND,
            sampler: BiasedHemisphere,
        }
    }
}

impl<S: HemisphereSampler> AmbientOcclusion<S> {
    /// Replace the occlusion sampler.
    pub fn with_sampler<T: HemisphereSampler>(self, sampler: T) -> AmbientOcclusion<T> {
        AmbientOcclusion {
            samples: self.samples,
            light_direction: self.light_direction,
            direct_weight: self.direct_weight,
            background: self.background,
            sampler,
        }
    }

    /// Add a directional light. `weight` in [0, 1] is the share of the
    /// direct term; the ambient term gets the rest.
    pub fn with_light(mut self, direction: Vec3, weight: f32) -> Self {
        self.light_direction = normalize_guarded(direction);
        self.direct_weight = weight.clamp(0.0, 1.0);
        self
    }

    /// Set the radiance of escaping primary rays.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    fn ambient(&self, scene: &Scene, position: Vec3, normal: Vec3, rng: &mut dyn RngCore) -> f32 {
        if self.samples == 0 {
            return 0.0;
        }
        let escaped = (0..self.samples)
            .filter(|_| {
                let direction = self.sampler.sample(normal, rng);
                scene.closest_hit(&Ray::new(position, direction)).is_none()
            })
            .count();
        escaped as f32 / self.samples as f32
    }

    fn direct(&self, scene: &Scene, position: Vec3, normal: Vec3) -> f32 {
        let cos_theta = normal.dot(self.light_direction);
        if cos_theta <= 0.0 {
            return 0.0;
        }
        match scene.closest_hit(&Ray::new(position, self.light_direction)) {
            Some(_) => 0.0,
            None => cos_theta,
        }
    }
}

impl<S: HemisphereSampler> Integrator for AmbientOcclusion<S> {
    fn radiance(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let Some(hit) = scene.closest_hit(ray) else {
            return self.background;
        };

        let ambient = self.ambient(scene, hit.position, hit.normal, rng);
        let direct = if self.direct_weight > 0.0 {
            self.direct(scene, hit.position, hit.normal)
        } else {
            0.0
        };

        let intensity = (1.0 - self.direct_weight) * ambient + self.direct_weight * direct;
        hit.primitive.color() * intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemi_core::{Plane, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and sends the path straight back into the surface.
    #[derive(Default)]
    struct CountingSampler {
        calls: AtomicUsize,
    }

    impl HemisphereSampler for CountingSampler {
        fn sample(&self, normal: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
            self.calls.fetch_add(1, Ordering::Relaxed);
            -normal
        }
    }

    fn ground(color: Color) -> Scene {
        let mut scene = Scene::new();
        scene.add(Plane::ground(color));
        scene
    }

    fn down_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_terminal_depth_is_black_without_recursion() {
        let integrator = PathIntegrator::new(3).with_sampler(CountingSampler::default());
        let mut rng = StdRng::seed_from_u64(42);

        for scene in [Scene::new(), ground(Color::ONE), Scene::demo()] {
            let color = integrator.trace(&scene, &down_ray(), 3, &mut rng);
            assert_eq!(color, Color::ZERO);
        }
        assert_eq!(integrator.sampler.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_miss_returns_background() {
        let integrator = PathIntegrator::new(4).with_background(Color::new(0.1, 0.2, 0.3));
        let mut rng = StdRng::seed_from_u64(42);

        let color = integrator.radiance(&Scene::new(), &down_ray(), &mut rng);
        assert_eq!(color, Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_single_bounce_multiplies_reflectance() {
        let reflectance = Color::new(0.5, 0.25, 1.0);
        let scene = ground(reflectance);
        let mut rng = StdRng::seed_from_u64(42);

        // The bounce off the ground always escapes upward
        let integrator = PathIntegrator::new(2);
        for _ in 0..32 {
            let color = integrator.radiance(&scene, &down_ray(), &mut rng);
            assert!((color - reflectance).length() < 1e-6, "color = {color}");
        }

        // One level of recursion is not enough to see the background
        let shallow = PathIntegrator::new(1);
        assert_eq!(shallow.radiance(&scene, &down_ray(), &mut rng), Color::ZERO);
    }

    #[test]
    fn test_depth_limits_bounce_count() {
        // Every bounce re-hits the ground until the depth runs out
        let scene = ground(Color::ONE);

        let integrator = PathIntegrator::new(6).with_sampler(CountingSampler::default());
        let mut rng = StdRng::seed_from_u64(42);
        let color = integrator.radiance(&scene, &down_ray(), &mut rng);

        assert_eq!(color, Color::ZERO);
        assert_eq!(integrator.sampler.calls.load(Ordering::Relaxed), 6);
        assert_eq!(integrator.max_depth(), Some(6));
    }

    #[test]
    fn test_ambient_occlusion_open_ground_is_lit() {
        let scene = ground(Color::splat(0.5));
        let integrator = AmbientOcclusion::new(16);
        let mut rng = StdRng::seed_from_u64(42);

        let color = integrator.radiance(&scene, &down_ray(), &mut rng);
        assert!((color - Color::splat(0.5)).length() < 1e-6);
        assert_eq!(integrator.max_depth(), None);
    }

    #[test]
    fn test_ambient_occlusion_under_sphere_is_darker() {
        let mut scene = ground(Color::ONE);
        scene.add(Sphere::new(Vec3::new(0.0, 1.5, 0.0), 1.0, Color::ONE));

        let integrator = AmbientOcclusion::new(256);
        let mut rng = StdRng::seed_from_u64(42);

        // Straight under the sphere, looking down past it from the side
        let ray = Ray::new(Vec3::new(0.0, 0.2, -5.0), Vec3::new(0.0, -0.2, 5.0));
        let color = integrator.radiance(&scene, &ray, &mut rng);

        assert!(color.x < 0.9, "color = {color}");
        assert!(color.x > 0.0, "color = {color}");
    }

    #[test]
    fn test_direct_light_shadowed_by_sphere() {
        let mut scene = ground(Color::ONE);
        scene.add(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 1.0, Color::ONE));

        let integrator = AmbientOcclusion::new(0).with_light(Vec3::Y, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        let shadowed = integrator.radiance(&scene, &down_ray_at(0.0), &mut rng);
        let lit = integrator.radiance(&scene, &down_ray_at(3.0), &mut rng);

        assert_eq!(shadowed, Color::ZERO);
        assert!((lit - Color::ONE).length() < 1e-3, "lit = {lit}");
    }

    fn down_ray_at(x: f32) -> Ray {
        // Enter from below the sphere's height so the primary ray reaches the ground
        Ray::new(Vec3::new(x, 0.5, -1.0), Vec3::new(0.0, -0.5, 1.0))
    }
}
