// src/config.rs

use crate::error::SceneError;
use crate::types::{LoggingConfig, SceneConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: SceneConfig =
            serde_yaml::from_str(&contents).context("Failed to parse scene config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), SceneError> {
        for overlay in &self.motion.overlays {
            if overlay.is_inverted() {
                return Err(SceneError::InvalidConfig(format!(
                    "overlay '{}' has inverted corners ({}, {}) -> ({}, {})",
                    overlay.name, overlay.x1, overlay.y1, overlay.x2, overlay.y2
                )));
            }
        }
        Ok(())
    }
}

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the
/// configured level. Safe to call more than once.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pitchscene={}", config.level)));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
