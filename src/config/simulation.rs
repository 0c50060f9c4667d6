use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::FractalTreeError;
use crate::types::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks a `grow` run performs
    pub ticks: u64,
    /// Fixed seed for reproducible runs, entropy when absent
    pub seed: Option<u64>,
    /// Where the seed is planted (screen space, y grows downward)
    pub start: Position,
    /// Respawn every leaf each time the tree age hits a multiple of this, 0 disables
    pub leaf_respawn_interval: u64,
    /// End a run early once every branch is fully grown or stopped
    pub stop_when_grown: bool,
    /// Ticks between console progress lines
    pub progress_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 300,
            seed: None,
            start: Position::new(400.0, 580.0),
            leaf_respawn_interval: 250,
            stop_when_grown: false,
            progress_interval: 50,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), FractalTreeError> {
        if !self.start.x.is_finite() || !self.start.y.is_finite() {
            return Err(FractalTreeError::Configuration(
                "Start position must be finite".to_string()
            ));
        }
        if self.progress_interval == 0 {
            return Err(FractalTreeError::Configuration(
                "Progress interval must be at least 1".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = Self::default();
        ConfigManifest {
            section: "Simulation".to_string(),
            fields: vec![
                FieldManifest {
                    name: "ticks".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.ticks),
                    min: Some(0.0),
                    max: None,
                    description: "Number of growth ticks per run".to_string(),
                },
                FieldManifest {
                    name: "seed".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::Value::Null,
                    min: Some(0.0),
                    max: None,
                    description: "Random seed, empty for a fresh tree every run".to_string(),
                },
                FieldManifest {
                    name: "start".to_string(),
                    field_type: "position".to_string(),
                    default: serde_json::json!({ "x": defaults.start.x, "y": defaults.start.y }),
                    min: None,
                    max: None,
                    description: "Where the seed is planted".to_string(),
                },
                FieldManifest {
                    name: "leaf_respawn_interval".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.leaf_respawn_interval),
                    min: Some(0.0),
                    max: None,
                    description: "Ticks between leaf respawns, 0 to disable".to_string(),
                },
                FieldManifest {
                    name: "stop_when_grown".to_string(),
                    field_type: "boolean".to_string(),
                    default: serde_json::json!(defaults.stop_when_grown),
                    min: None,
                    max: None,
                    description: "Stop as soon as the tree is fully grown".to_string(),
                },
                FieldManifest {
                    name: "progress_interval".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(defaults.progress_interval),
                    min: Some(1.0),
                    max: None,
                    description: "Ticks between progress reports".to_string(),
                },
            ],
        }
    }
}
