//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::board::mm_to_iu;
use crate::error::ConfigError;
use crate::fanout::{Alignment, FanoutPlan, ViaSpec};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Fanout defaults.
    #[serde(default)]
    pub fanout: FanoutConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fanout.validate()
    }
}

/// Fanout defaults. Lengths are in millimetres.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FanoutConfig {
    /// Alignment style: "Quadrant", "Diagonal" or "X-pattern".
    /// Default: "Quadrant"
    #[serde(default = "default_alignment")]
    pub alignment: String,

    /// Direction for Diagonal ("TopLeft", "TopRight", "BottomLeft",
    /// "BottomRight") or X-pattern ("Clockwise", "Counterclockwise").
    #[serde(default)]
    pub direction: Option<String>,

    /// Track width in mm.
    #[serde(default = "default_track_width")]
    pub track_width: f64,

    /// Via copper diameter in mm.
    #[serde(default = "default_via_diameter")]
    pub via_diameter: f64,

    /// Via drill diameter in mm.
    #[serde(default = "default_via_drill")]
    pub via_drill: f64,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            alignment: default_alignment(),
            direction: None,
            track_width: default_track_width(),
            via_diameter: default_via_diameter(),
            via_drill: default_via_drill(),
        }
    }
}

impl FanoutConfig {
    /// Validates alignment and track/via lengths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Alignment::from_str_loose(&self.alignment).is_none() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid alignment '{}'. Must be one of: Quadrant, Diagonal, X-pattern",
                    self.alignment
                ),
            });
        }
        for (name, value) in [
            ("track_width", self.track_width),
            ("via_diameter", self.via_diameter),
            ("via_drill", self.via_drill),
        ] {
            if value <= 0.0 || mm_to_iu(value) <= 0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{name} must be positive, got {value}"),
                });
            }
        }
        if self.via_drill >= self.via_diameter {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "via_drill ({}) must be smaller than via_diameter ({})",
                    self.via_drill, self.via_diameter
                ),
            });
        }
        Ok(())
    }

    /// Builds a fanout plan from these settings.
    ///
    /// An unknown alignment falls back to Quadrant; call
    /// [`validate`](Self::validate) first to reject it instead.
    #[must_use]
    pub fn to_plan(&self) -> FanoutPlan {
        let alignment = Alignment::from_str_loose(&self.alignment).unwrap_or_default();
        let plan = FanoutPlan::new(
            alignment,
            mm_to_iu(self.track_width),
            ViaSpec::from_mm(self.via_diameter, self.via_drill),
        );
        match self.direction.as_deref() {
            Some(direction) => plan.with_direction(direction),
            None => plan,
        }
    }
}

fn default_alignment() -> String {
    "Quadrant".to_string()
}

const fn default_track_width() -> f64 {
    0.2
}

const fn default_via_diameter() -> f64 {
    0.45
}

const fn default_via_drill() -> f64 {
    0.2
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::{Corner, Direction};

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.fanout.to_plan(), FanoutPlan::default());
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "fanout": {
                "alignment": "Diagonal",
                "direction": "TopLeft",
                "track_width": 0.15,
                "via_diameter": 0.4,
                "via_drill": 0.2
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        let plan = config.fanout.to_plan();
        assert_eq!(plan.alignment, Alignment::Diagonal);
        assert_eq!(plan.direction, Direction::Corner(Corner::TopLeft));
        assert_eq!(plan.track_width, 150_000);
        assert_eq!(plan.via, ViaSpec { diameter: 400_000, drill: 200_000 });
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn fanout_config_defaults() {
        let config = FanoutConfig::default();
        assert_eq!(config.alignment, "Quadrant");
        assert!(config.direction.is_none());
        assert!((config.track_width - 0.2).abs() < f64::EPSILON);
        assert!((config.via_diameter - 0.45).abs() < f64::EPSILON);
        assert!((config.via_drill - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_invalid_alignment() {
        let json = r#"{ "fanout": { "alignment": "Spiral" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_drill_larger_than_via() {
        let json = r#"{ "fanout": { "via_diameter": 0.3, "via_drill": 0.35 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn mismatched_direction_is_ignored() {
        let json = r#"{ "fanout": { "alignment": "Quadrant", "direction": "TopLeft" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.fanout.to_plan().direction, Direction::Unset);
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
