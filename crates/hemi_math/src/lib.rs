// Re-export glam for convenience
pub use glam::*;

// hemi math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Added to the length before dividing in [`normalize_guarded`].
pub const NORMALIZE_EPSILON: f32 = 1e-5;

/// Normalize a vector without ever dividing by exact zero.
///
/// Returns `v / (|v| + NORMALIZE_EPSILON)`. Ordinary vectors come out with a
/// length within `NORMALIZE_EPSILON` of one; the zero vector stays zero
/// instead of turning into NaN.
#[inline]
pub fn normalize_guarded(v: Vec3) -> Vec3 {
    v / (v.length() + NORMALIZE_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_normalize_guarded_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0, 2.0, -7.5),
            Vec3::new(0.0, 0.0, 0.1),
            Vec3::new(1e4, -2e4, 3e3),
        ] {
            let n = normalize_guarded(v);
            assert!(
                (n.length() - 1.0).abs() < 1e-3,
                "|normalize({v})| = {}",
                n.length()
            );
            // Direction is preserved
            assert!(n.dot(v) > 0.0);
        }
    }

    #[test]
    fn test_normalize_guarded_zero_is_finite() {
        let n = normalize_guarded(Vec3::ZERO);
        assert!(n.is_finite());
        assert_eq!(n, Vec3::ZERO);

        let tiny = normalize_guarded(Vec3::splat(1e-30));
        assert!(tiny.is_finite());
        assert!(tiny.length() <= 1.0);
    }
}
