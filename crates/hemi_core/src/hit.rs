//! Hit records and closest-hit selection.

use hemi_math::{Interval, Vec3};

use crate::primitive::{Candidate, Primitive};

/// Distance a hit position is pushed along its normal so the next ray
/// leaving the surface does not immediately hit it again.
pub const SURFACE_EPSILON: f32 = 1e-4;

/// Record of the selected ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the intersection, always > 0
    pub distance: f32,
    /// Scan index of the primitive within its scene
    pub index: usize,
    /// The primitive that was hit
    pub primitive: &'a Primitive,
    /// Unit surface normal
    pub normal: Vec3,
    /// Intersection point, offset by `SURFACE_EPSILON` along `normal`
    pub position: Vec3,
}

/// Pick the candidate with the smallest strictly positive distance.
///
/// Candidates at or behind the origin are ignored. On equal distances the
/// first candidate in iteration order wins.
pub fn select_closest<I>(candidates: I) -> Option<(usize, Candidate)>
where
    I: IntoIterator<Item = (usize, Candidate)>,
{
    let mut closest: Option<(usize, Candidate)> = None;

    for (index, candidate) in candidates {
        if !Interval::POSITIVE.surrounds(candidate.distance) {
            continue;
        }
        match closest {
            Some((_, best)) if best.distance <= candidate.distance => {}
            _ => closest = Some((index, candidate)),
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(distance: f32) -> Candidate {
        Candidate {
            distance,
            normal: Vec3::Y,
        }
    }

    #[test]
    fn test_select_minimum_positive() {
        let list = vec![
            (0, candidate(7.0)),
            (1, candidate(-2.0)),
            (2, candidate(3.5)),
            (3, candidate(0.0)),
            (4, candidate(12.0)),
        ];

        let (index, best) = select_closest(list).unwrap();
        assert_eq!(index, 2);
        assert_eq!(best.distance, 3.5);
    }

    #[test]
    fn test_select_empty_is_none() {
        assert!(select_closest(Vec::new()).is_none());
    }

    #[test]
    fn test_select_all_nonpositive_is_none() {
        let list = vec![(0, candidate(-1.0)), (1, candidate(0.0)), (2, candidate(-0.0))];
        assert!(select_closest(list).is_none());
    }

    #[test]
    fn test_select_ignores_nan_and_infinity() {
        let list = vec![
            (0, candidate(f32::NAN)),
            (1, candidate(f32::INFINITY)),
            (2, candidate(4.0)),
        ];
        assert_eq!(select_closest(list).unwrap().0, 2);
    }

    #[test]
    fn test_select_tie_keeps_first() {
        let list = vec![(5, candidate(2.0)), (1, candidate(2.0)), (3, candidate(2.0))];
        assert_eq!(select_closest(list).unwrap().0, 5);
    }
}
