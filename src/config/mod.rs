pub mod traits;
pub mod simulation;
pub mod dna;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use simulation::SimulationConfig;
pub use dna::DnaConfig;
pub use traits::{validate_section, ConfigManifest, ConfigSection, FieldManifest, ManifestDocument};
