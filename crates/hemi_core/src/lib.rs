//! hemi core - scene geometry for the hemi path tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Plane` and `Sphere`, dispatched through the closed `Primitive` enum
//! - **Scene queries**: brute-force closest-hit selection over an ordered `Scene`
//! - **Scene files**: JSON scene descriptions
//!
//! # Example
//!
//! ```
//! use hemi_core::{Color, Plane, Scene};
//! use hemi_math::{Ray, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.add(Plane::ground(Color::ONE));
//!
//! let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
//! let hit = scene.closest_hit(&ray).unwrap();
//! assert_eq!(hit.distance, 5.0);
//! ```

pub mod hit;
pub mod loader;
pub mod primitive;
pub mod scene;

// Re-export commonly used types
pub use hit::{select_closest, Hit, SURFACE_EPSILON};
pub use loader::{load_scene, SceneDescription, SceneError, SceneResult};
pub use primitive::{Axis, Candidate, Color, Plane, Primitive, Sphere};
pub use scene::Scene;
