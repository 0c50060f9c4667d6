use crate::engines::dna::SCHEMA_VERSION;
use crate::error::FractalTreeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `[table]` of the TOML config
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    /// TOML table name, also the section's key in [`ManifestDocument`]
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), FractalTreeError>;
    fn to_manifest(&self) -> ConfigManifest;
}

/// Field listing for one section, enough to build a settings form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: String,
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub description: String,
}

/// Every section's manifest keyed by table name, stamped with the gene
/// schema version the ranges belong to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub schema_version: u32,
    pub sections: BTreeMap<String, ConfigManifest>,
}

impl ManifestDocument {
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sections: BTreeMap::new(),
        }
    }

    pub fn with_section<S: ConfigSection>(mut self, section: &S) -> Self {
        self.sections
            .insert(S::section_name().to_string(), section.to_manifest());
        self
    }
}

impl Default for ManifestDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a section, prefixing configuration errors with its table name
pub fn validate_section<S: ConfigSection>(section: &S) -> Result<(), FractalTreeError> {
    section.validate().map_err(|e| match e {
        FractalTreeError::Configuration(message) => {
            FractalTreeError::Configuration(format!("[{}] {}", S::section_name(), message))
        }
        other => other,
    })
}
