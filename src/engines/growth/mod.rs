pub mod anchor;
pub mod branch;
pub mod engine;
pub mod leaf;
pub mod progress;
pub mod random;
pub mod snapshot;
pub mod tree;

pub use anchor::{Anchor, BranchId, GrowthAnchor, Seed};
pub use branch::{Branch, MATURITY_AGE};
pub use engine::{GrowthCallback, GrowthEngine, GrowthStats};
pub use leaf::{Leaf, LeafPhase};
pub use progress::{ChannelGrowthCallback, ConsoleGrowthCallback, GrowthMessage};
pub use random::{RandomSource, ScriptedRandom};
pub use snapshot::{BranchSnapshot, LeafSnapshot, TreeSnapshot};
pub use tree::{TickReport, Tree};
