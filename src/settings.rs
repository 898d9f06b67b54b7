//! Game configuration
//!
//! Dimensions, colours and camera placement. Loaded from JSON by hosts that
//! want to tweak the look; every field falls back to the stock value.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    /// Clear colour (0xRRGGBB)
    pub background: u32,
    /// Height of the ground plane the actor falls to
    pub ground: f32,

    // === Platforms ===
    pub platform_color: u32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_depth: f32,
    /// Platforms kept alive before the oldest is evicted
    pub max_platforms: usize,

    // === Jumper ===
    pub jumper_color: u32,
    pub jumper_width: f32,
    pub jumper_height: f32,
    pub jumper_depth: f32,

    // === Camera ===
    /// Fixed eye position of the orthographic camera
    pub camera_eye: Vec3,
    /// Pixels per world unit used to derive the frustum from the viewport
    pub viewport_divisor: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: 0x282828,
            ground: -1.0,

            platform_color: 0xbebebe,
            platform_width: 4.0,
            platform_height: 2.0,
            platform_depth: 4.0,
            max_platforms: 5,

            jumper_color: 0x232323,
            jumper_width: 1.0,
            jumper_height: 2.0,
            jumper_depth: 1.0,

            camera_eye: Vec3::splat(100.0),
            viewport_divisor: 80.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, then validate them
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject geometry the landing maths cannot work with
    pub fn validate(&self) -> Result<(), GameError> {
        let dims = [
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("platform_depth", self.platform_depth),
            ("jumper_width", self.jumper_width),
            ("jumper_height", self.jumper_height),
            ("jumper_depth", self.jumper_depth),
            ("viewport_divisor", self.viewport_divisor),
        ];
        for (name, value) in dims {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        // Landing needs the jumped-from platform and its successor alive
        if self.max_platforms < 2 {
            return Err(GameError::InvalidSettings(format!(
                "max_platforms must be at least 2, got {}",
                self.max_platforms
            )));
        }
        Ok(())
    }

    /// Furthest the actor's centre may be from a platform centre and still
    /// rest on it: (jumper width + platform width) / 2
    #[inline]
    pub fn landing_threshold(&self) -> f32 {
        (self.jumper_width + self.platform_width) / 2.0
    }

    /// Beyond this distance from a platform centre the actor hangs over the edge
    #[inline]
    pub fn edge_bound(&self) -> f32 {
        self.platform_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let settings = Settings::default();
        assert_eq!(settings.landing_threshold(), 2.5);
        assert_eq!(settings.edge_bound(), 2.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "platform_width": 6.0 }"#).unwrap();
        assert_eq!(settings.platform_width, 6.0);
        assert_eq!(settings.jumper_width, 1.0);
        assert_eq!(settings.max_platforms, 5);
        assert_eq!(settings.landing_threshold(), 3.5);
    }

    #[test]
    fn test_json_roundtrip_preserves_settings() {
        let mut settings = Settings::default();
        settings.ground = -2.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let err = Settings::from_json(r#"{ "jumper_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidSettings(_)));

        let err = Settings::from_json(r#"{ "max_platforms": 1 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidSettings(_)));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, GameError::Settings(_)));
    }
}
