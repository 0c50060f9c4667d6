use super::anchor::{BranchId, GrowthAnchor};
use super::branch::Branch;
use super::leaf::{Leaf, LeafPhase};
use crate::types::{Colour, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafSnapshot {
    pub phase: LeafPhase,
    pub age: u32,
    pub size: f64,
    pub colour: Colour,
    pub fallen: f64,
}

impl From<&Leaf> for LeafSnapshot {
    fn from(leaf: &Leaf) -> Self {
        Self {
            phase: leaf.phase(),
            age: leaf.age(),
            size: leaf.size(),
            colour: leaf.colour(),
            fallen: leaf.fallen(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSnapshot {
    pub id: BranchId,
    pub parent: Option<BranchId>,
    pub children: Option<[BranchId; 2]>,
    pub start_point: Position,
    pub end_point: Position,
    pub angle: f64,
    pub length: f64,
    pub thickness: f64,
    pub age: u32,
    pub generation: u32,
    pub stopped: bool,
    pub dont_branch: bool,
    pub leaf: LeafSnapshot,
}

impl From<&Branch> for BranchSnapshot {
    fn from(branch: &Branch) -> Self {
        Self {
            id: branch.id(),
            parent: branch.parent(),
            children: branch.children(),
            start_point: branch.start_point(),
            end_point: branch.end_point(),
            angle: branch.angle(),
            length: branch.length(),
            thickness: branch.thickness(),
            age: branch.age(),
            generation: branch.generation(),
            stopped: branch.is_stopped(),
            dont_branch: branch.dont_branch(),
            leaf: LeafSnapshot::from(branch.leaf()),
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub age: u64,
    pub start_point: Position,
    pub thickness: f64,
    pub branch_count: usize,
    pub total_length: f64,
    pub fully_grown: bool,
    pub branches: Vec<BranchSnapshot>,
}
