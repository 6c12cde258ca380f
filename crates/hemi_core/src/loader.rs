//! Scene files.
//!
//! Scenes are described in JSON: an optional camera origin and an ordered
//! list of tagged primitives.
//!
//! ```json
//! {
//!   "camera": [0.0, 3.0, -1.0],
//!   "primitives": [
//!     { "type": "plane", "axis": "y", "offset": 0.0, "color": [1.0, 1.0, 1.0] },
//!     { "type": "sphere", "center": [0.15, 1.0, 6.5], "radius": 1.0, "color": [0.8, 0.8, 1.0] }
//!   ]
//! }
//! ```

use std::path::Path;

use hemi_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::primitive::{Color, Primitive};
use crate::scene::Scene;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid primitive #{index}: {reason}")]
    InvalidPrimitive { index: usize, reason: String },

    #[error("Invalid camera origin: {0}")]
    InvalidCamera(Vec3),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// On-disk scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Camera origin; renderers fall back to their default when absent
    #[serde(default)]
    pub camera: Option<Vec3>,
    pub primitives: Vec<Primitive>,
}

impl SceneDescription {
    /// Parse and validate a description from a JSON string.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let description: SceneDescription = serde_json::from_str(json)?;
        description.validate()?;
        Ok(description)
    }

    /// Check every primitive for usable geometry and colors.
    pub fn validate(&self) -> SceneResult<()> {
        if let Some(camera) = self.camera {
            if !camera.is_finite() {
                return Err(SceneError::InvalidCamera(camera));
            }
        }
        for (index, primitive) in self.primitives.iter().enumerate() {
            validate_primitive(primitive)
                .map_err(|reason| SceneError::InvalidPrimitive { index, reason })?;
        }
        Ok(())
    }

    /// Build the scene, keeping primitive order.
    pub fn into_scene(self) -> Scene {
        Scene::from_primitives(self.primitives)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load and validate a scene description from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let description = SceneDescription::from_json(&json)?;
    log::debug!(
        "Loaded {} primitives from {}",
        description.primitives.len(),
        path.display()
    );
    Ok(description)
}

fn validate_color(color: Color) -> Result<(), String> {
    if color.to_array().iter().all(|&c| Interval::UNIT.contains(c)) {
        Ok(())
    } else {
        Err(format!("color {color} outside [0, 1]"))
    }
}

fn validate_primitive(primitive: &Primitive) -> Result<(), String> {
    match primitive {
        Primitive::Plane(plane) => {
            if !plane.offset.is_finite() {
                return Err(format!("plane offset {} is not finite", plane.offset));
            }
        }
        Primitive::Sphere(sphere) => {
            if !sphere.center.is_finite() {
                return Err(format!("sphere center {} is not finite", sphere.center));
            }
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(format!("sphere radius {} must be positive", sphere.radius));
            }
        }
    }
    validate_color(primitive.color())
}
