use crate::types::Position;
use serde::{Deserialize, Serialize};

/// What a branch grows from: its parent branch, or the seed for the root.
///
/// Read-only. A branch copies these values each tick and never writes back.
pub trait GrowthAnchor {
    fn end_point(&self) -> Position;
    fn generation(&self) -> i32;
    fn thickness(&self) -> f64;
}

/// Index of a branch in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BranchId(pub usize);

impl BranchId {
    pub const ROOT: BranchId = BranchId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Seed,
    Branch(BranchId),
}

/// Where the tree was planted. Acts as the root branch's anchor, one
/// generation above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub position: Position,
    pub thickness: f64,
}

impl Seed {
    pub fn new(position: Position) -> Self {
        Self { position, thickness: 1.0 }
    }
}

impl GrowthAnchor for Seed {
    fn end_point(&self) -> Position {
        self.position
    }

    fn generation(&self) -> i32 {
        -1
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }
}
