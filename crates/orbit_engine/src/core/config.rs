//! # Unified Configuration
//!
//! Every section has defaults that reproduce the stock scene, so a config file
//! only needs to name the values it changes.
//!
//! ```toml
//! [engine]
//! log_level = "debug"
//!
//! [assets]
//! assets_dir = "resources/textures"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Logging and frame pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Frames per second the host aims for
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: 60,
        }
    }
}

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width in screen coordinates
    pub width: u32,
    /// Initial height in screen coordinates
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        // Portrait phone proportions
        Self {
            width: 375,
            height: 667,
            title: "Orbit".to_string(),
        }
    }
}

/// # Asset Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the scene's PNG textures
    pub assets_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            assets_dir: "resources/textures".to_string(),
        }
    }
}

/// # Moving Body Configuration
///
/// The body bounces inside the square `[-bound, bound]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Half-extent of the square the body is confined to
    pub bound: f32,
    /// Slowest speed level; the others are 2x and 3x this
    pub min_speed: f32,
    /// Starting x position
    pub start_x: f32,
    /// Starting y position
    pub start_y: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            bound: 0.4,
            min_speed: 0.20,
            start_x: 0.4,
            start_y: -0.4,
        }
    }
}

/// # Button Pulse Configuration
///
/// Scale oscillates between `min` and `max` once every `period` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Smallest scale factor
    pub min: f32,
    /// Largest scale factor
    pub max: f32,
    /// Seconds per full oscillation
    pub period: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            min: 0.96,
            max: 1.04,
            period: 0.5,
        }
    }
}

/// # Complete Application Configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Logging and pacing
    pub engine: EngineConfig,
    /// Host window
    pub window: WindowConfig,
    /// Texture lookup
    pub assets: AssetConfig,
    /// Moving body tuning
    pub motion: MotionConfig,
    /// Button pulse tuning
    pub pulse: PulseConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.assets_dir.is_empty() {
            return Err(ConfigError::Invalid("assets_dir cannot be empty".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.engine.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".to_string()));
        }
        if self.motion.bound <= 0.0 || self.motion.min_speed <= 0.0 {
            return Err(ConfigError::Invalid("motion bound and min_speed must be positive".to_string()));
        }
        if self.motion.start_x.abs() > self.motion.bound || self.motion.start_y.abs() > self.motion.bound {
            return Err(ConfigError::Invalid("moving body must start inside its bound".to_string()));
        }
        if self.pulse.period <= 0.0 {
            return Err(ConfigError::Invalid("pulse period must be positive".to_string()));
        }
        if self.pulse.min >= self.pulse.max {
            return Err(ConfigError::Invalid(format!(
                "pulse min ({}) must be below max ({})",
                self.pulse.min, self.pulse.max
            )));
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ApplicationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
            [engine]
            log_level = "debug"

            [motion]
            min_speed = 0.1
        "#;
        let config = ApplicationConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.engine.log_level, "debug");
        assert_eq!(config.engine.target_fps, 60);
        assert_eq!(config.motion.min_speed, 0.1);
        assert_eq!(config.motion.bound, 0.4);
        assert_eq!(config.pulse, PulseConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = ApplicationConfig::default();
        config.window.title = "Moon".to_string();
        let text = config.to_string_with_format(ConfigFormat::Ron).unwrap();
        let parsed = ApplicationConfig::from_str_with_format(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ConfigFormat::from_path(std::path::Path::new("scene.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_rejects_inverted_pulse() {
        let mut config = ApplicationConfig::default();
        config.pulse.min = 1.1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validation_rejects_start_outside_bound() {
        let mut config = ApplicationConfig::default();
        config.motion.start_x = 0.5;
        assert!(config.validate().is_err());
    }
}
