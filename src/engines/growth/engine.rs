use crate::config::{AppConfig, SimulationConfig};
use crate::engines::dna::Genome;
use crate::engines::growth::{
    snapshot::TreeSnapshot,
    tree::{TickReport, Tree},
};
use crate::error::FractalTreeError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Headline numbers for a tree, as shown next to the drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthStats {
    pub age: u64,
    pub branch_count: usize,
    pub total_length: f64,
    pub max_generation: u32,
    pub fully_grown: bool,
}

pub trait GrowthCallback: Send {
    fn on_tick(&mut self, report: &TickReport);
    fn on_fully_grown(&mut self, stats: &GrowthStats);
    fn on_run_complete(&mut self, stats: &GrowthStats);
}

impl<C: GrowthCallback + ?Sized> GrowthCallback for &mut C {
    fn on_tick(&mut self, report: &TickReport) {
        (**self).on_tick(report);
    }

    fn on_fully_grown(&mut self, stats: &GrowthStats) {
        (**self).on_fully_grown(stats);
    }

    fn on_run_complete(&mut self, stats: &GrowthStats) {
        (**self).on_run_complete(stats);
    }
}

/// Drives one tree: owns its genome, the tree itself and the random source.
pub struct GrowthEngine {
    config: SimulationConfig,
    genome: Genome,
    tree: Tree,
    rng: StdRng,
}

impl GrowthEngine {
    pub fn new(config: SimulationConfig, genome: Genome) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tree = Tree::new(config.start, &mut rng);

        log::debug!(
            "planted tree at ({}, {}) with DNA {}",
            config.start.x,
            config.start.y,
            genome.compressed()
        );

        Self {
            config,
            genome,
            tree,
            rng,
        }
    }

    /// Validate the config, build its genome and plant
    pub fn from_config(config: &AppConfig) -> Result<Self, FractalTreeError> {
        config.validate()?;
        let genome = config.dna.build_genome()?;
        Ok(Self::new(config.simulation.clone(), genome))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Edits apply from the next tick on
    pub fn genome_mut(&mut self) -> &mut Genome {
        &mut self.genome
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Replace the genome from a strand; on error the current genome stays
    pub fn load_dna(&mut self, strand: &str) -> Result<(), FractalTreeError> {
        self.genome.decode(strand)
    }

    /// Grow once, then respawn leaves if the tree's age calls for it
    pub fn tick(&mut self) -> TickReport {
        let report = self.tree.grow(&self.genome, &mut self.rng);

        let interval = self.config.leaf_respawn_interval;
        if interval > 0 && self.tree.age() % interval == 0 {
            log::debug!("respawning leaves at tick {}", self.tree.age());
            self.tree.respawn_leaves(&mut self.rng);
        }

        report
    }

    /// Tick `ticks` times, or until fully grown when `stop_when_grown` is set
    pub fn run<C: GrowthCallback>(&mut self, ticks: u64, mut callback: C) -> GrowthStats {
        let mut announced = self.tree.is_fully_grown();

        for _ in 0..ticks {
            let report = self.tick();
            callback.on_tick(&report);

            if !announced && self.tree.is_fully_grown() {
                announced = true;
                let stats = self.stats();
                callback.on_fully_grown(&stats);
                if self.config.stop_when_grown {
                    break;
                }
            }
        }

        let stats = self.stats();
        callback.on_run_complete(&stats);
        stats
    }

    /// Throw the tree away and plant a fresh seed with the current genome.
    /// The random source carries on, so a seeded engine replants the same
    /// way every time it is rebuilt.
    pub fn replant(&mut self) {
        log::debug!("replanting after {} ticks", self.tree.age());
        self.tree = Tree::new(self.config.start, &mut self.rng);
    }

    pub fn stats(&self) -> GrowthStats {
        GrowthStats {
            age: self.tree.age(),
            branch_count: self.tree.branch_count(),
            total_length: self.tree.tree_length(),
            max_generation: self.tree.max_generation(),
            fully_grown: self.tree.is_fully_grown(),
        }
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        self.tree.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::dna::GeneId;
    use crate::engines::growth::progress::{ChannelGrowthCallback, GrowthMessage};
    use std::sync::mpsc;

    fn seeded(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<u64>,
        grown_at: Option<u64>,
        completed: bool,
    }

    impl GrowthCallback for Recorder {
        fn on_tick(&mut self, report: &TickReport) {
            self.ticks.push(report.tick);
        }

        fn on_fully_grown(&mut self, stats: &GrowthStats) {
            self.grown_at = Some(stats.age);
        }

        fn on_run_complete(&mut self, _stats: &GrowthStats) {
            self.completed = true;
        }
    }

    #[test]
    fn test_run_reports_every_tick() {
        let mut engine = GrowthEngine::new(seeded(1), Genome::new());
        let mut recorder = Recorder::default();
        let stats = engine.run(30, &mut recorder);
        assert_eq!(recorder.ticks, (1..=30).collect::<Vec<_>>());
        assert!(recorder.completed);
        assert_eq!(stats.age, 30);
        assert_eq!(stats, engine.stats());
    }

    #[test]
    fn test_stop_when_grown() {
        let mut config = seeded(1);
        config.stop_when_grown = true;
        let mut genome = Genome::new();
        genome.set(GeneId::MaxBranches, 1);

        let mut engine = GrowthEngine::new(config, genome);
        let mut recorder = Recorder::default();
        let stats = engine.run(500, &mut recorder);
        // the root matures on tick 11 and has nowhere to fork
        assert_eq!(recorder.grown_at, Some(11));
        assert_eq!(stats.age, 11);
        assert!(stats.fully_grown);
    }

    #[test]
    fn test_replant_starts_over() {
        let mut engine = GrowthEngine::new(seeded(5), Genome::new());
        engine.run(40, &mut Recorder::default());
        assert!(engine.tree().branch_count() > 1);

        engine.replant();
        assert_eq!(engine.tree().branch_count(), 1);
        assert_eq!(engine.tree().age(), 0);
    }

    #[test]
    fn test_leaf_respawn_interval() {
        let mut config = seeded(2);
        config.leaf_respawn_interval = 20;
        let mut engine = GrowthEngine::new(config, Genome::new());
        for _ in 0..20 {
            engine.tick();
        }
        assert!(engine.tree().branches().iter().all(|b| b.leaf().age() == 0));
    }

    #[test]
    fn test_load_dna_keeps_genome_on_error() {
        let mut engine = GrowthEngine::new(seeded(3), Genome::new());
        let before = engine.genome().encode();
        assert!(engine.load_dna("not dna").is_err());
        assert_eq!(engine.genome().encode(), before);

        let mut other = Genome::new();
        other.set(GeneId::BranchAngle1, 45);
        engine.load_dna(&other.compressed()).unwrap();
        assert_eq!(engine.genome().value(GeneId::BranchAngle1), 45);
    }

    #[test]
    fn test_channel_callback() {
        let (tx, rx) = mpsc::channel();
        let mut engine = GrowthEngine::new(seeded(4), Genome::new());
        engine.run(3, ChannelGrowthCallback::new(tx));

        let messages: Vec<GrowthMessage> = rx.try_iter().collect();
        assert_eq!(messages.len(), 4);
        assert!(matches!(messages[3], GrowthMessage::RunComplete(_)));
    }

    #[test]
    fn test_from_config_rejects_bad_dna() {
        let mut config = AppConfig::default();
        config.dna.strand = Some("GATTACA".to_string());
        assert!(GrowthEngine::from_config(&config).is_err());
    }
}
