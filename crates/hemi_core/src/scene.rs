//! The scene: an ordered list of primitives queried by brute-force scan.

use hemi_math::{normalize_guarded, Ray, Vec3};

use crate::hit::{select_closest, Hit, SURFACE_EPSILON};
use crate::primitive::{Candidate, Color, Plane, Primitive, Sphere};

/// An ordered collection of primitives.
///
/// Built once before rendering; renderers only ever hold `&Scene`, so it
/// cannot change while a render is running.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from a list of primitives, keeping their order.
    pub fn from_primitives(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    /// The four-primitive test scene: a white ground plane and three
    /// tinted spheres resting on it.
    pub fn demo() -> Self {
        let mut scene = Self::new();
        scene.add(Plane::ground(Color::ONE));
        scene.add(Sphere::new(
            Vec3::new(0.15, 1.0, 6.5),
            1.0,
            Color::new(0.8, 0.8, 1.0),
        ));
        scene.add(Sphere::new(
            Vec3::new(-1.0, 0.75, 5.1),
            0.75,
            Color::new(1.0, 0.8, 0.8),
        ));
        scene.add(Sphere::new(
            Vec3::new(0.5, 0.5, 5.0),
            0.5,
            Color::new(0.8, 1.0, 0.8),
        ));
        scene
    }

    /// Append a primitive; it is scanned after every earlier one.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in scan order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Every candidate intersection of `ray`, tagged with its primitive index.
    pub fn candidates<'a>(&'a self, ray: &'a Ray) -> impl Iterator<Item = (usize, Candidate)> + 'a {
        self.primitives
            .iter()
            .enumerate()
            .flat_map(move |(index, primitive)| {
                primitive.intersect(ray).map(move |candidate| (index, candidate))
            })
    }

    /// Closest hit in front of the ray origin, if any.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let (index, candidate) = select_closest(self.candidates(ray))?;

        let normal = normalize_guarded(candidate.normal);
        let position = ray.at(candidate.distance) + normal * SURFACE_EPSILON;

        Some(Hit {
            distance: candidate.distance,
            index,
            primitive: &self.primitives[index],
            normal,
            position,
        })
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<T: IntoIterator<Item = Primitive>>(iter: T) -> Self {
        Self::from_primitives(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_plane_straight_down() {
        let mut scene = Scene::new();
        scene.add(Plane::ground(Color::ONE));

        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = scene.closest_hit(&ray).unwrap();

        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.index, 0);
        assert!((hit.normal - Vec3::Y).length() < 1e-4);
        // Position sits just above the surface
        assert!(hit.position.y > 0.0);
        assert!(hit.position.y < 1e-3);
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(scene.is_empty());
        assert!(scene.closest_hit(&ray).is_none());
    }

    #[test]
    fn test_nearest_primitive_wins_over_scan_order() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0, Color::X));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, Color::Y));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scene.closest_hit(&ray).unwrap();

        assert_eq!(hit.index, 1);
        assert_eq!(hit.primitive.color(), Color::Y);
        assert!((hit.distance - 9.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    }

    #[test]
    fn test_inside_sphere_hits_far_wall() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::ZERO, 2.0, Color::ONE));

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = scene.closest_hit(&ray).unwrap();

        // The root behind the origin is discarded
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_hit_position_is_offset_along_normal() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::ONE));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scene.closest_hit(&ray).unwrap();

        let surface = ray.at(hit.distance);
        let offset = hit.position - surface;
        assert!((offset.length() - SURFACE_EPSILON).abs() < 1e-5);
        assert!(offset.dot(hit.normal) > 0.0);

        // A ray leaving the offset position away from the surface escapes
        let bounce = Ray::new(hit.position, hit.normal);
        assert!(scene.closest_hit(&bounce).is_none());
    }

    #[test]
    fn test_demo_scene_layout() {
        let scene = Scene::demo();
        assert_eq!(scene.len(), 4);
        assert!(matches!(scene.primitives()[0], Primitive::Plane(_)));

        // Looking down onto the ground from the camera position
        let ray = Ray::new(Vec3::new(0.0, 3.0, -1.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = scene.closest_hit(&ray).unwrap();
        assert_eq!(hit.index, 0);
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_collect_into_scene() {
        let scene: Scene = vec![
            Primitive::from(Plane::ground(Color::ONE)),
            Primitive::from(Sphere::new(Vec3::ZERO, 1.0, Color::ONE)),
        ]
        .into_iter()
        .collect();
        assert_eq!(scene.len(), 2);
    }
}
