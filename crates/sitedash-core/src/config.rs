//! Dashboard configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::HeightClass;

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Viewport width assumed for slot geometry when the host reports none.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Viewport widths (in pixels) where the screen class changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Narrowest width treated as a tablet.
    pub tablet_min_width: u32,
    /// Narrowest width treated as a desktop.
    pub desktop_min_width: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet_min_width: 768,
            desktop_min_width: 1024,
        }
    }
}

/// Minimum slot heights in pixels, one per height class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightTable {
    pub short: f64,
    pub regular: f64,
    pub tall: f64,
    pub extra_tall: f64,
}

impl Default for HeightTable {
    fn default() -> Self {
        Self {
            short: 160.0,
            regular: 240.0,
            tall: 320.0,
            extra_tall: 480.0,
        }
    }
}

impl HeightTable {
    pub fn height_for(&self, class: HeightClass) -> f64 {
        match class {
            HeightClass::Short => self.short,
            HeightClass::Regular => self.regular,
            HeightClass::Tall => self.tall,
            HeightClass::ExtraTall => self.extra_tall,
        }
    }
}

/// Grid geometry used to place slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Gap between columns and rows, in pixels.
    pub gap: f64,
    pub heights: HeightTable,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 16.0,
            heights: HeightTable::default(),
        }
    }
}

/// Top-level dashboard configuration. Every field has a default, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub breakpoints: Breakpoints,
    pub grid: GridConfig,
    pub autosave_interval_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            grid: GridConfig::default(),
            autosave_interval_secs: DEFAULT_AUTOSAVE_INTERVAL_SECS,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bp = &self.breakpoints;
        if bp.tablet_min_width >= bp.desktop_min_width {
            return Err(ConfigError::Invalid(format!(
                "tablet_min_width ({}) must be below desktop_min_width ({})",
                bp.tablet_min_width, bp.desktop_min_width
            )));
        }
        if self.grid.gap < 0.0 {
            return Err(ConfigError::Invalid("grid gap must be non-negative".to_string()));
        }
        let heights = &self.grid.heights;
        for (name, value) in [
            ("short", heights.short),
            ("regular", heights.regular),
            ("tall", heights.tall),
            ("extra_tall", heights.extra_tall),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{} height must be positive", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            DashboardConfig::from_json(r#"{ "breakpoints": { "desktop_min_width": 1280 } }"#).unwrap();
        assert_eq!(config.breakpoints.tablet_min_width, 768);
        assert_eq!(config.breakpoints.desktop_min_width, 1280);
        assert_eq!(config.autosave_interval_secs, DEFAULT_AUTOSAVE_INTERVAL_SECS);
    }

    #[test]
    fn test_rejects_inverted_breakpoints() {
        let json = r#"{ "breakpoints": { "tablet_min_width": 1200, "desktop_min_width": 1000 } }"#;
        assert!(matches!(DashboardConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_non_positive_heights() {
        let json = r#"{ "grid": { "heights": { "tall": 0 } } }"#;
        assert!(matches!(DashboardConfig::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DashboardConfig::load(Path::new("/nonexistent/sitedash.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_height_lookup() {
        let heights = HeightTable::default();
        assert_eq!(heights.height_for(HeightClass::Short), 160.0);
        assert_eq!(heights.height_for(HeightClass::ExtraTall), 480.0);
    }
}
