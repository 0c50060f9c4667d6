use super::{
    dna::DnaConfig,
    simulation::SimulationConfig,
    traits::{validate_section, ManifestDocument},
};
use crate::error::FractalTreeError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix for environment overrides, e.g. `FRACTALTREE_SIMULATION__TICKS=500`
pub const ENV_PREFIX: &str = "FRACTALTREE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub dna: DnaConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), FractalTreeError> {
        validate_section(&self.simulation)?;
        validate_section(&self.dna)?;
        Ok(())
    }

    /// Manifest of every section, with defaults taken from this config's types
    pub fn manifest() -> ManifestDocument {
        ManifestDocument::new()
            .with_section(&SimulationConfig::default())
            .with_section(&DnaConfig::default())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FractalTreeError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FractalTreeError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| FractalTreeError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    /// Defaults, then the file (if any), then `FRACTALTREE_*` environment variables
    pub fn load_layered(&self, path: Option<&Path>) -> Result<(), FractalTreeError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).format(::config::FileFormat::Toml));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| FractalTreeError::Configuration(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        log::debug!("loaded layered configuration: {:?}", config);

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FractalTreeError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| FractalTreeError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| FractalTreeError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Apply `f` to a copy and keep it only if it validates
    pub fn update<F>(&self, f: F) -> Result<(), FractalTreeError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
