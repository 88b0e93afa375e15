//! Engine configuration.

use crate::pathfinding::PathConfig;
use crate::terrain::MovementRules;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for the cost model and the pathfinder.
///
/// Every field has a default, so a JSON document only needs the values it
/// overrides:
///
/// ```
/// use hexnav_core::settings::EngineSettings;
///
/// let settings = EngineSettings::from_json(r#"{ "movement": { "forest_multiplier": 2.0 } }"#)
///     .unwrap();
/// assert_eq!(settings.movement.forest_multiplier, 2.0);
/// assert_eq!(settings.movement.hills_cost, 2.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub movement: MovementRules,
    pub pathfinding: PathConfig,
}

impl EngineSettings {
    /// Parse and validate settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate settings and return the first problem found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let m = &self.movement;
        let p = &self.pathfinding;
        let fields = [
            ("movement.hills_cost", m.hills_cost),
            ("movement.river_crossing_cost", m.river_crossing_cost),
            ("movement.river_travel_cost", m.river_travel_cost),
            ("movement.road_divisor", m.road_divisor),
            ("movement.forest_multiplier", m.forest_multiplier),
            ("pathfinding.heuristic_scale", p.heuristic_scale),
            ("pathfinding.attack_cost_multiplier", p.attack_cost_multiplier),
        ];

        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

/// Errors from invalid engine settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.movement.hills_cost, 2.0);
        assert_eq!(settings.movement.road_divisor, 3.0);
        assert_eq!(settings.pathfinding.heuristic_scale, 1.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings = EngineSettings::from_json("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings =
            EngineSettings::from_json(r#"{ "pathfinding": { "heuristic_scale": 0.5 } }"#).unwrap();
        assert_eq!(settings.pathfinding.heuristic_scale, 0.5);
        assert_eq!(settings.pathfinding.attack_cost_multiplier, 3.0);
    }

    #[test]
    fn test_validation_rejects_non_positive() {
        let err = EngineSettings::from_json(r#"{ "movement": { "road_divisor": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::NotPositive {
                field: "movement.road_divisor",
                ..
            }
        ));
    }

    #[test]
    fn test_validation_rejects_nan() {
        let mut settings = EngineSettings::default();
        settings.pathfinding.heuristic_scale = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
        assert!(err.to_string().starts_with("invalid settings document"));
    }

    #[test]
    fn test_settings_serialization() {
        let mut settings = EngineSettings::default();
        settings.movement.forest_multiplier = 2.0;
        let json = settings.to_json().unwrap();
        let restored = EngineSettings::from_json(&json).unwrap();
        assert_eq!(restored, settings);
    }
}
