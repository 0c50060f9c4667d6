//! The pinned gene schema.
//!
//! Strands are positional: the order of [`GeneId::ALL`] is the order genes are
//! written to and read from a strand. Changing it (or any range) produces a new
//! schema version and invalidates every code shared so far.

use crate::error::{FractalTreeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Schema version written alongside exported manifests
pub const SCHEMA_VERSION: u32 = 1;

/// Number of genes in the pinned schema
pub const GENE_COUNT: usize = 18;

/// Largest value a 6-letter base-4 block can carry
pub const MAX_ENCODABLE: i32 = 4095;

/// Static description of one gene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneSpec {
    pub id: GeneId,
    pub name: &'static str,
    pub default: i32,
    pub min: i32,
    pub max: i32,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeneId {
    MaxBranches,
    BranchAngle1Random,
    BranchAngle1,
    BranchAngle1RandomFrom,
    BranchAngle1RandomTo,
    BranchAngle1Change,
    BranchAngle1ChangeDirection,
    BranchAngle1ChangeValue,
    BranchAngle2Random,
    BranchAngle2,
    BranchAngle2RandomFrom,
    BranchAngle2RandomTo,
    BranchAngle2Change,
    BranchAngle2ChangeDirection,
    BranchAngle2ChangeValue,
    BranchThickness,
    ContinuousBranchGrowth,
    BranchGrowthRate,
}

impl GeneId {
    /// Every gene in strand order
    pub const ALL: [GeneId; GENE_COUNT] = [
        GeneId::MaxBranches,
        GeneId::BranchAngle1Random,
        GeneId::BranchAngle1,
        GeneId::BranchAngle1RandomFrom,
        GeneId::BranchAngle1RandomTo,
        GeneId::BranchAngle1Change,
        GeneId::BranchAngle1ChangeDirection,
        GeneId::BranchAngle1ChangeValue,
        GeneId::BranchAngle2Random,
        GeneId::BranchAngle2,
        GeneId::BranchAngle2RandomFrom,
        GeneId::BranchAngle2RandomTo,
        GeneId::BranchAngle2Change,
        GeneId::BranchAngle2ChangeDirection,
        GeneId::BranchAngle2ChangeValue,
        GeneId::BranchThickness,
        GeneId::ContinuousBranchGrowth,
        GeneId::BranchGrowthRate,
    ];

    /// Position of this gene in the strand
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static GeneSpec {
        &SCHEMA[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Resolve a stable gene name, exact case
    pub fn from_name(name: &str) -> Result<Self> {
        Self::lookup(name)
            .filter(|id| id.name() == name)
            .ok_or_else(|| FractalTreeError::InvalidParameter(name.to_string()))
    }

    /// Resolve a gene name in any letter case, for sources that fold keys
    pub fn from_name_ignore_case(name: &str) -> Result<Self> {
        Self::lookup(name).ok_or_else(|| FractalTreeError::InvalidParameter(name.to_string()))
    }

    fn lookup(name: &str) -> Option<Self> {
        name_table().get(name.to_ascii_lowercase().as_str()).copied()
    }
}

/// Lowercased gene name -> id, built once
fn name_table() -> &'static HashMap<String, GeneId> {
    static TABLE: OnceLock<HashMap<String, GeneId>> = OnceLock::new();
    TABLE.get_or_init(|| {
        SCHEMA
            .iter()
            .map(|spec| (spec.name.to_ascii_lowercase(), spec.id))
            .collect()
    })
}

impl fmt::Display for GeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneId {
    type Err = FractalTreeError;

    fn from_str(s: &str) -> Result<Self> {
        GeneId::from_name(s)
    }
}

const fn gene(
    id: GeneId,
    name: &'static str,
    default: i32,
    min: i32,
    max: i32,
    description: &'static str,
) -> GeneSpec {
    GeneSpec { id, name, default, min, max, description }
}

/// Schema table, indexed by [`GeneId::index`]
pub static SCHEMA: [GeneSpec; GENE_COUNT] = [
    gene(GeneId::MaxBranches, "maxBranches", 512, 1, 4095, "Maximum branches the tree can grow"),
    gene(GeneId::BranchAngle1Random, "branchAngle1Random", 0, 0, 1, "Angle 1 is random (1 or 0)"),
    gene(GeneId::BranchAngle1, "branchAngle1", 15, 0, 150, "Fixed angle 1"),
    gene(GeneId::BranchAngle1RandomFrom, "branchAngle1RandomFrom", 5, 0, 150, "Random angle 1 from"),
    gene(GeneId::BranchAngle1RandomTo, "branchAngle1RandomTo", 30, 0, 150, "Random angle 1 to"),
    gene(GeneId::BranchAngle1Change, "branchAngle1Change", 0, 0, 1, "Angle 1 changes over time (1 or 0)"),
    gene(GeneId::BranchAngle1ChangeDirection, "branchAngle1ChangeDirection", 0, 0, 1, "Angle 1 change direction, 1 increases"),
    gene(GeneId::BranchAngle1ChangeValue, "branchAngle1ChangeValue", 2, 0, 20, "Angle 1 change per tick (x5)"),
    gene(GeneId::BranchAngle2Random, "branchAngle2Random", 0, 0, 1, "Angle 2 is random (1 or 0)"),
    gene(GeneId::BranchAngle2, "branchAngle2", 15, 0, 150, "Fixed angle 2"),
    gene(GeneId::BranchAngle2RandomFrom, "branchAngle2RandomFrom", 5, 0, 150, "Random angle 2 from"),
    gene(GeneId::BranchAngle2RandomTo, "branchAngle2RandomTo", 30, 0, 150, "Random angle 2 to"),
    gene(GeneId::BranchAngle2Change, "branchAngle2Change", 0, 0, 1, "Angle 2 changes over time (1 or 0)"),
    gene(GeneId::BranchAngle2ChangeDirection, "branchAngle2ChangeDirection", 0, 0, 1, "Angle 2 change direction, 1 increases"),
    gene(GeneId::BranchAngle2ChangeValue, "branchAngle2ChangeValue", 2, 0, 20, "Angle 2 change per tick (x5)"),
    gene(GeneId::BranchThickness, "branchThickness", 0, 0, 20, "How quickly branches thicken"),
    gene(GeneId::ContinuousBranchGrowth, "continuousBranchGrowth", 0, 0, 20, "Growth carried on after branching"),
    gene(GeneId::BranchGrowthRate, "branchGrowthRate", 5, 2, 20, "Branch growth per tick"),
];
