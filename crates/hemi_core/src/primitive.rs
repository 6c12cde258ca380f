//! Analytic primitives and their ray intersection routines.
//!
//! Geometry is a closed set, so primitives are a tagged enum with a single
//! [`Primitive::intersect`] dispatch rather than trait objects.

use hemi_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values in [0, 1])
pub type Color = Vec3;

/// Coordinate axis a [`Plane`] is perpendicular to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Component of `v` along this axis.
    #[inline]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// An infinite axis-aligned plane.
///
/// The normal is always the positive unit axis, regardless of which side
/// a ray arrives from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    #[serde(default)]
    pub axis: Axis,
    /// Position of the plane along `axis`.
    #[serde(default)]
    pub offset: f32,
    pub color: Color,
}

impl Plane {
    /// Ground plane at height 0 (normal +Y).
    pub fn ground(color: Color) -> Self {
        Self {
            axis: Axis::Y,
            offset: 0.0,
            color,
        }
    }

    /// Solve `origin_axis + t * direction_axis = offset`.
    ///
    /// Rays parallel to the plane have no candidate.
    pub fn intersect(&self, ray: &Ray) -> Option<Candidate> {
        let d = self.axis.component(ray.direction);
        if d == 0.0 {
            return None;
        }
        let o = self.axis.component(ray.origin);
        Some(Candidate {
            distance: (self.offset - o) / d,
            normal: self.axis.unit(),
        })
    }
}

/// A sphere given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    /// Both roots of `|o + t d - c|^2 = r^2`, far root first.
    ///
    /// A tangent ray yields two equal candidates. Normals are
    /// `position - center` and are left unnormalized.
    pub fn intersect(&self, ray: &Ray) -> Option<[Candidate; 2]> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let candidate = |t: f32| Candidate {
            distance: t,
            normal: ray.at(t) - self.center,
        };

        Some([
            candidate((-b + sqrtd) / (2.0 * a)),
            candidate((-b - sqrtd) / (2.0 * a)),
        ])
    }
}

/// A raw intersection before closest-hit selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Ray parameter; may be zero or negative (behind the origin).
    pub distance: f32,
    /// Surface normal, not necessarily unit length.
    pub normal: Vec3,
}

/// A scene primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Plane(Plane),
    Sphere(Sphere),
}

impl Primitive {
    /// Every candidate intersection of `ray` with this primitive.
    pub fn intersect(&self, ray: &Ray) -> impl Iterator<Item = Candidate> {
        let candidates = match self {
            Primitive::Plane(plane) => [plane.intersect(ray), None],
            Primitive::Sphere(sphere) => match sphere.intersect(ray) {
                Some([far, near]) => [Some(far), Some(near)],
                None => [None, None],
            },
        };
        candidates.into_iter().flatten()
    }

    /// Reflectance color of this primitive.
    pub fn color(&self) -> Color {
        match self {
            Primitive::Plane(plane) => plane.color,
            Primitive::Sphere(sphere) => sphere.color,
        }
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}
