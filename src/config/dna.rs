use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::engines::dna::{GeneId, Genome, SCHEMA};
use crate::error::FractalTreeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Starting DNA for a run: an optional strand, then per-gene overrides on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnaConfig {
    pub strand: Option<String>,
    /// Gene name -> value. Names match case-insensitively since layered
    /// sources may lowercase keys.
    pub overrides: BTreeMap<String, i64>,
}

impl DnaConfig {
    /// Build the genome this section describes
    pub fn build_genome(&self) -> Result<Genome, FractalTreeError> {
        let mut genome = Genome::new();
        self.apply_to(&mut genome)?;
        Ok(genome)
    }

    /// Apply strand and overrides to an existing genome
    pub fn apply_to(&self, genome: &mut Genome) -> Result<(), FractalTreeError> {
        if let Some(strand) = self.strand.as_deref().filter(|s| !s.trim().is_empty()) {
            genome
                .decode(strand)
                .map_err(|e| FractalTreeError::Configuration(format!("Invalid DNA strand: {}", e)))?;
        }

        for (name, value) in &self.overrides {
            let id = GeneId::from_name_ignore_case(name).map_err(|_| {
                FractalTreeError::Configuration(format!("Unknown gene override '{}'", name))
            })?;
            genome.set(id, *value);
        }
        Ok(())
    }
}

impl ConfigSection for DnaConfig {
    fn section_name() -> &'static str {
        "dna"
    }

    fn validate(&self) -> Result<(), FractalTreeError> {
        self.build_genome().map(|_| ())
    }

    /// One field per gene, in strand order
    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "DNA".to_string(),
            fields: SCHEMA
                .iter()
                .map(|spec| FieldManifest {
                    name: spec.name.to_string(),
                    field_type: if spec.min == 0 && spec.max == 1 { "flag" } else { "integer" }
                        .to_string(),
                    default: serde_json::json!(spec.default),
                    min: Some(f64::from(spec.min)),
                    max: Some(f64::from(spec.max)),
                    description: spec.description.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_is_the_default_genome() {
        let genome = DnaConfig::default().build_genome().unwrap();
        assert_eq!(genome.encode(), Genome::new().encode());
    }

    #[test]
    fn test_overrides_apply_after_strand() {
        let mut source = Genome::new();
        source.set(GeneId::MaxBranches, 100);
        let config = DnaConfig {
            strand: Some(source.compressed()),
            overrides: BTreeMap::from([("branchangle1".to_string(), 40)]),
        };
        let genome = config.build_genome().unwrap();
        assert_eq!(genome.value(GeneId::MaxBranches), 100);
        assert_eq!(genome.value(GeneId::BranchAngle1), 40);
    }

    #[test]
    fn test_bad_entries_fail_validation() {
        let unknown = DnaConfig {
            strand: None,
            overrides: BTreeMap::from([("leafCount".to_string(), 3)]),
        };
        assert!(matches!(unknown.validate(), Err(FractalTreeError::Configuration(_))));

        let malformed = DnaConfig {
            strand: Some("GTAC".to_string()),
            overrides: BTreeMap::new(),
        };
        assert!(matches!(malformed.validate(), Err(FractalTreeError::Configuration(_))));
    }

    #[test]
    fn test_manifest_lists_every_gene() {
        let manifest = DnaConfig::default().to_manifest();
        assert_eq!(manifest.fields.len(), SCHEMA.len());
        assert_eq!(manifest.fields[0].name, "maxBranches");
        assert_eq!(manifest.fields[1].field_type, "flag");
    }
}
