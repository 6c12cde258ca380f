//! Hemisphere sampling policies for diffuse bounces.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use hemi_math::{normalize_guarded, Vec2, Vec3};
use rand::{Rng, RngCore};

/// Draws a bounce direction around a surface normal.
///
/// Integrators are generic over this trait so the sampling step can be
/// swapped without touching them.
pub trait HemisphereSampler: Send + Sync {
    /// Return a unit direction on the side of the surface `normal` faces.
    fn sample(&self, normal: Vec3, rng: &mut dyn RngCore) -> Vec3;
}

/// Cheap biased sampler: `normalize(normal + normalize(r))` with `r`
/// uniform in the cube [-1, 1]^3.
///
/// The result leans toward the normal but is not a true cosine-weighted
/// distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiasedHemisphere;

impl HemisphereSampler for BiasedHemisphere {
    fn sample(&self, normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let r = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        normalize_guarded(normal + normalize_guarded(r))
    }
}

/// Cosine-weighted sampler using the concentric disk mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineHemisphere;

impl HemisphereSampler for CosineHemisphere {
    fn sample(&self, normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let u = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
        let p = sample_concentric_disk(u);
        let z = (1.0 - p.length_squared()).max(0.0).sqrt();

        let n = normalize_guarded(normal);
        let (tangent, bitangent) = n.any_orthonormal_pair();
        normalize_guarded(tangent * p.x + bitangent * p.y + n * z)
    }
}

/// Map the unit square onto the unit disk, preserving relative area.
pub fn sample_concentric_disk(u: Vec2) -> Vec2 {
    let offset = 2.0 * u - Vec2::ONE;
    if offset == Vec2::ZERO {
        return Vec2::ZERO;
    }

    let (r, theta) = if offset.x.abs() > offset.y.abs() {
        (offset.x, FRAC_PI_4 * (offset.y / offset.x))
    } else {
        (offset.y, FRAC_PI_2 - FRAC_PI_4 * (offset.x / offset.y))
    };

    let (sin, cos) = theta.sin_cos();
    Vec2::new(r * cos, r * sin)
}

/// Sampler selection for configuration surfaces such as the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerKind {
    #[default]
    Biased,
    Cosine,
}

impl HemisphereSampler for SamplerKind {
    fn sample(&self, normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        match self {
            SamplerKind::Biased => BiasedHemisphere.sample(normal, rng),
            SamplerKind::Cosine => CosineHemisphere.sample(normal, rng),
        }
    }
}

/// Random direction uniformly on the unit sphere, used for tests.
#[cfg(test)]
pub(crate) fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let phi = std::f32::consts::TAU * rng.gen::<f32>();
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn check_hemisphere(sampler: &dyn HemisphereSampler) -> f32 {
        let mut rng = StdRng::seed_from_u64(42);
        let mut mean_cos = 0.0;
        let count = 2000;

        for _ in 0..count {
            let normal = random_unit_vector(&mut rng);
            let dir = sampler.sample(normal, &mut rng);

            assert!(dir.is_finite());
            assert!((dir.length() - 1.0).abs() < 1e-2, "|dir| = {}", dir.length());
            assert!(dir.dot(normal) >= -1e-4, "direction below surface");
            mean_cos += dir.dot(normal);
        }

        mean_cos / count as f32
    }

    #[test]
    fn test_biased_stays_in_hemisphere() {
        let mean_cos = check_hemisphere(&BiasedHemisphere);
        // Biased toward the normal
        assert!(mean_cos > 0.5, "mean cos = {mean_cos}");
    }

    #[test]
    fn test_cosine_stays_in_hemisphere() {
        let mean_cos = check_hemisphere(&CosineHemisphere);
        // E[cos] for a cosine-weighted lobe is 2/3
        assert!((mean_cos - 2.0 / 3.0).abs() < 0.05, "mean cos = {mean_cos}");
    }

    #[test]
    fn test_kind_dispatch_matches_sampler() {
        let normal = Vec3::Y;
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        assert_eq!(
            SamplerKind::Cosine.sample(normal, &mut a),
            CosineHemisphere.sample(normal, &mut b)
        );
        assert_eq!(
            SamplerKind::Biased.sample(normal, &mut a),
            BiasedHemisphere.sample(normal, &mut b)
        );
    }

    #[test]
    fn test_concentric_disk_bounds() {
        assert_eq!(sample_concentric_disk(Vec2::splat(0.5)), Vec2::ZERO);
        for u in [Vec2::ZERO, Vec2::ONE, Vec2::new(1.0, 0.0), Vec2::new(0.3, 0.9)] {
            assert!(sample_concentric_disk(u).length() <= 1.0 + 1e-5);
        }
    }
}
