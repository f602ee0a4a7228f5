//! Session configuration, read from TOML.
//!
//! Resolution order: explicit path, then the `CUBE_CONFIG` environment
//! variable, then built-in defaults. Every field is optional.

use std::path::{Path, PathBuf};

use cube_core::constants::{CUBE_SIZE_PX, PERSPECTIVE_PX};
use cube_core::{Catalogue, Orientation, SpinTiming, Tuning};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

pub const CONFIG_ENV: &str = "CUBE_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeConfig {
    pub drag_sensitivity: f64,
    pub click_threshold_px: f64,
    pub snap_duration_secs: f64,
    pub spin: SpinTiming,
    pub initial_orientation: Orientation,
    pub cube_size_px: f64,
    pub perspective_px: f64,
    /// Show the first catalogue entry at startup, before any spin.
    pub show_initial_wisdom: bool,
    /// Fixed RNG seed for reproducible spins. OS entropy when absent.
    pub seed: Option<u64>,
    /// JSON catalogue replacing the built-in cards.
    pub catalogue: Option<PathBuf>,
}

impl Default for CubeConfig {
    fn default() -> Self {
        let tuning = Tuning::default();
        Self {
            drag_sensitivity: tuning.drag_sensitivity,
            click_threshold_px: tuning.click_threshold_px,
            snap_duration_secs: tuning.snap_duration_secs,
            spin: tuning.spin,
            initial_orientation: tuning.initial_orientation,
            cube_size_px: CUBE_SIZE_PX,
            perspective_px: PERSPECTIVE_PX,
            show_initial_wisdom: true,
            seed: None,
            catalogue: None,
        }
    }
}

impl CubeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `explicit`, else `$CUBE_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("drag_sensitivity", self.drag_sensitivity),
            ("snap_duration_secs", self.snap_duration_secs),
            ("spin.min_secs", self.spin.min_secs),
            ("spin.max_secs", self.spin.max_secs),
            ("cube_size_px", self.cube_size_px),
            ("perspective_px", self.perspective_px),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SessionError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.click_threshold_px.is_finite() || self.click_threshold_px < 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "click_threshold_px must be >= 0, got {}",
                self.click_threshold_px
            )));
        }
        if self.spin.min_secs > self.spin.max_secs {
            return Err(SessionError::InvalidConfig(format!(
                "spin.min_secs ({}) exceeds spin.max_secs ({})",
                self.spin.min_secs, self.spin.max_secs
            )));
        }
        if !self.initial_orientation.x.is_finite() || !self.initial_orientation.y.is_finite() {
            return Err(SessionError::InvalidConfig(
                "initial_orientation must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            drag_sensitivity: self.drag_sensitivity,
            click_threshold_px: self.click_threshold_px,
            snap_duration_secs: self.snap_duration_secs,
            spin: self.spin,
            initial_orientation: self.initial_orientation,
        }
    }

    /// The configured catalogue file, or the built-in cards.
    pub fn load_catalogue(&self) -> Result<Catalogue> {
        match &self.catalogue {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let catalogue = Catalogue::from_json(&json)?;
                tracing::debug!("loaded catalogue from {}", path.display());
                Ok(catalogue)
            }
            None => Ok(Catalogue::builtin()),
        }
    }
}
