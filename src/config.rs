use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SceneError;

/// Placement and asset of one shelf in the aisle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfConfig {
    pub id: String,
    #[serde(default)]
    pub position: [f32; 3],
    /// XYZ Euler angles in radians
    #[serde(default)]
    pub rotation: [f32; 3],
    pub model_path: String,
}

impl ShelfConfig {
    pub fn new(id: impl Into<String>, position: [f32; 3], rotation: [f32; 3], model_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            rotation,
            model_path: model_path.into(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation(&self) -> Vec3 {
        Vec3::from_array(self.rotation)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.id.trim().is_empty() {
            return Err(SceneError::EmptyShelfId);
        }
        if !self.position().is_finite() || !self.rotation().is_finite() {
            return Err(SceneError::InvalidPlacement(self.id.clone()));
        }
        if self.model_path.trim().is_empty() {
            return Err(SceneError::EmptyModelPath(self.id.clone()));
        }
        Ok(())
    }
}

/// Tunables for camera, framing, transitions and floor synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Margin multiplier when framing the whole aisle
    pub aisle_padding: f32,
    /// Margin multiplier when framing a single product
    pub product_padding: f32,
    pub transition_seconds: f32,
    /// Fraction added around the content footprint when sizing the floor
    pub floor_padding: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aisle_padding: 1.3,
            product_padding: 1.5,
            transition_seconds: 1.5,
            floor_padding: 0.3,
        }
    }
}

impl SessionConfig {
    /// Rejects settings that would leave the camera without a usable view.
    pub fn validate(&self) -> Result<(), SceneError> {
        let invalid = |reason: &str| -> Result<(), SceneError> {
            Err(SceneError::InvalidSetting(reason.to_string()))
        };

        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid("fovDegrees must be between 0 and 180");
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return invalid("near and far must satisfy 0 < near < far");
        }
        // Padding of zero puts the eye straight above the target
        if !(self.aisle_padding > 0.0 && self.aisle_padding.is_finite())
            || !(self.product_padding > 0.0 && self.product_padding.is_finite())
        {
            return invalid("framing padding must be positive");
        }
        if !(self.transition_seconds >= 0.0 && self.transition_seconds.is_finite()) {
            return invalid("transitionSeconds must not be negative");
        }
        if !(self.floor_padding >= 0.0 && self.floor_padding.is_finite()) {
            return invalid("floorPadding must not be negative");
        }
        Ok(())
    }
}

/// On-disk layout: the shelves plus optional session tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AisleConfig {
    pub shelves: Vec<ShelfConfig>,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AisleConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AisleConfig =
            serde_json::from_str(&text).map_err(|source| SceneError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.session.validate()?;
        log::info!("Loaded {} shelf configs from {:?}", config.shelves.len(), path);
        Ok(config)
    }
}

impl Default for AisleConfig {
    fn default() -> Self {
        Self {
            shelves: default_shelves(),
            session: SessionConfig::default(),
        }
    }
}

/// Built-in aisle layout.
pub fn default_shelves() -> Vec<ShelfConfig> {
    vec![ShelfConfig::new(
        "shelf-a",
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        "models/shelves_pack.glb",
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_config() {
        let json = r#"{
            "shelves": [
                { "id": "s1", "position": [1, 0, 2], "modelPath": "a.glb" },
                { "id": "s2", "rotation": [0, 3.14, 0], "modelPath": "b.glb" }
            ],
            "session": { "productPadding": 2.0, "transitionSeconds": 0.5 }
        }"#;
        let config: AisleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shelves.len(), 2);
        assert_eq!(config.shelves[0].position(), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(config.shelves[1].position, [0.0; 3]);
        assert_eq!(config.session.product_padding, 2.0);
        assert_eq!(config.session.transition_seconds, 0.5);
        assert_eq!(config.session.aisle_padding, 1.3);
    }

    #[test]
    fn test_session_section_optional() {
        let config: AisleConfig =
            serde_json::from_str(r#"{ "shelves": [] }"#).unwrap();
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_validate() {
        assert!(ShelfConfig::new("ok", [0.0; 3], [0.0; 3], "m.glb").validate().is_ok());
        assert!(matches!(
            ShelfConfig::new("  ", [0.0; 3], [0.0; 3], "m.glb").validate(),
            Err(SceneError::EmptyShelfId)
        ));
        assert!(matches!(
            ShelfConfig::new("nan", [f32::NAN, 0.0, 0.0], [0.0; 3], "m.glb").validate(),
            Err(SceneError::InvalidPlacement(_))
        ));
        assert!(matches!(
            ShelfConfig::new("nopath", [0.0; 3], [0.0; 3], "").validate(),
            Err(SceneError::EmptyModelPath(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AisleConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SceneError::ConfigIo { .. }));
    }

    #[test]
    fn test_session_validate() {
        assert!(SessionConfig::default().validate().is_ok());

        let broken = [
            SessionConfig { product_padding: 0.0, ..SessionConfig::default() },
            SessionConfig { aisle_padding: -1.0, ..SessionConfig::default() },
            SessionConfig { fov_degrees: 0.0, ..SessionConfig::default() },
            SessionConfig { fov_degrees: 180.0, ..SessionConfig::default() },
            SessionConfig { near: 10.0, far: 10.0, ..SessionConfig::default() },
            SessionConfig { near: 0.0, ..SessionConfig::default() },
            SessionConfig { transition_seconds: f32::NAN, ..SessionConfig::default() },
            SessionConfig { floor_padding: -0.1, ..SessionConfig::default() },
        ];
        for config in broken {
            assert!(
                matches!(config.validate(), Err(SceneError::InvalidSetting(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_session_in_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("aisle-explorer-{}-session.json", std::process::id()));
        std::fs::write(&path, r#"{ "shelves": [], "session": { "productPadding": 0 } }"#).unwrap();
        let result = AisleConfig::from_path(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(SceneError::InvalidSetting(_))));
    }
}
