//! # Core Module
//!
//! Shared configuration types used by the scene and the host.

pub mod config;

pub use config::{
    ApplicationConfig,
    AssetConfig,
    EngineConfig,
    MotionConfig,
    PulseConfig,
    WindowConfig,
};
pub use crate::config::{Config, ConfigError, ConfigFormat};
