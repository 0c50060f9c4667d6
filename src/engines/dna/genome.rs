use super::codec::{compress, parse_strand};
use super::gene::Gene;
use super::observer::{NoopObserver, ParameterObserver};
use super::schema::{GeneId, GENE_COUNT, SCHEMA};
use crate::error::Result;
use std::fmt;

/// The tree's DNA: every growth setting as a bounded integer gene.
///
/// Genes live in a fixed order (see [`GeneId::ALL`]). That order is the strand
/// layout, so a code written by [`Genome::encode`] can be read back by
/// [`Genome::decode`] on any build using the same schema version.
///
/// # Access
///
/// - By [`GeneId`]: infallible, used by the growth engine every tick
/// - By name: for settings panels and config files, unknown names are an
///   [`crate::FractalTreeError::InvalidParameter`]
///
/// # Example
///
/// ```
/// use fractaltree::engines::dna::{GeneId, Genome};
///
/// let mut genome = Genome::new();
/// genome.set(GeneId::MaxBranches, 64);
/// let code = genome.compressed();
///
/// let mut copy = Genome::new();
/// copy.decode(&code).unwrap();
/// assert_eq!(copy.value(GeneId::MaxBranches), 64);
/// ```
pub struct Genome {
    genes: Vec<Gene>,
    observer: Box<dyn ParameterObserver>,
}

impl Genome {
    /// Default schema values, no observer
    pub fn new() -> Self {
        Self::with_observer(Box::new(NoopObserver))
    }

    pub fn with_observer(observer: Box<dyn ParameterObserver>) -> Self {
        let genes = SCHEMA.iter().map(Gene::from_spec).collect();
        Self { genes, observer }
    }

    /// Build a genome straight from a strand
    pub fn from_strand(strand: &str) -> Result<Self> {
        let mut genome = Self::new();
        genome.decode(strand)?;
        Ok(genome)
    }

    pub fn set_observer(&mut self, observer: Box<dyn ParameterObserver>) {
        self.observer = observer;
    }

    /// Genes in strand order
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn gene(&self, id: GeneId) -> &Gene {
        &self.genes[id.index()]
    }

    pub fn value(&self, id: GeneId) -> i32 {
        self.genes[id.index()].value()
    }

    /// Clamped write. Returns the stored value.
    pub fn set(&mut self, id: GeneId, value: i64) -> i32 {
        let stored = self.genes[id.index()].set_value(value);
        self.observer.on_parameter_changed(id.name(), stored);
        stored
    }

    pub fn resolve(&self, name: &str) -> Result<GeneId> {
        GeneId::from_name(name)
    }

    pub fn get_value(&self, name: &str) -> Result<i32> {
        Ok(self.value(self.resolve(name)?))
    }

    pub fn set_value(&mut self, name: &str, value: i64) -> Result<i32> {
        let id = self.resolve(name)?;
        Ok(self.set(id, value))
    }

    /// Named write for fractional input (form fields, sliders); truncates
    pub fn set_value_f64(&mut self, name: &str, value: f64) -> Result<i32> {
        let id = self.resolve(name)?;
        let stored = self.genes[id.index()].set_value_f64(value);
        self.observer.on_parameter_changed(id.name(), stored);
        Ok(stored)
    }

    /// Current values in strand order
    pub fn values(&self) -> [i32; GENE_COUNT] {
        let mut values = [0; GENE_COUNT];
        for (slot, gene) in values.iter_mut().zip(&self.genes) {
            *slot = gene.value();
        }
        values
    }

    /// Whether either branch angle is drawn at random
    pub fn is_random(&self) -> bool {
        self.value(GeneId::BranchAngle1Random) == 1 || self.value(GeneId::BranchAngle2Random) == 1
    }

    /// Back to schema defaults
    pub fn reset(&mut self) {
        for spec in SCHEMA.iter() {
            self.set(spec.id, i64::from(spec.default));
        }
    }

    /// Full uncompressed strand
    pub fn encode(&self) -> String {
        self.genes.iter().map(Gene::dna_strand).collect()
    }

    /// Compressed strand, the form meant for sharing
    pub fn compressed(&self) -> String {
        compress(&self.encode())
    }

    /// Load every gene from a strand, compressed or not.
    ///
    /// The whole strand is validated before any gene changes; on error the
    /// genome is left exactly as it was.
    pub fn decode(&mut self, strand: &str) -> Result<()> {
        let values = parse_strand(strand).map_err(|e| {
            log::warn!("rejected DNA strand: {}", e);
            e
        })?;

        for (id, value) in GeneId::ALL.into_iter().zip(values) {
            self.set(id, i64::from(value));
        }
        Ok(())
    }
}

impl Default for Genome {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.genes.iter().map(|g| (g.name(), g.value())))
            .finish()
    }
}
