//! One segment of the tree and its per-tick state machine.
//!
//! A branch lengthens for [`MATURITY_AGE`] ticks, then (room permitting)
//! forks into two children. It stops for good if its tip dips below the
//! ground line once it is deep enough in the tree.

use super::anchor::{Anchor, BranchId, GrowthAnchor};
use super::leaf::Leaf;
use super::random::RandomSource;
use crate::engines::dna::{GeneId, Genome};
use crate::types::Position;

/// A branch is fully grown once its age passes this
pub const MATURITY_AGE: u32 = 10;

/// Branches deeper than this stop when they cross the ground line
pub const GROUND_CHECK_MIN_GENERATION: u32 = 3;

/// Height of the ground line above the seed
pub const GROUND_OFFSET: f64 = 50.0;

/// Leaves only tick on branches deeper than this
pub const LEAF_MIN_GENERATION: u32 = 4;

/// Thickness gained per tick
pub const THICKNESS_INCREMENT: f64 = 0.1;

/// A branch is never thicker than this share of its anchor
pub const THICKNESS_RATIO: f64 = 0.8;

/// Divides `continuousBranchGrowth` into a per-tick length gain
pub const CONTINUOUS_GROWTH_DIVISOR: f64 = 3.0;

/// Divides a `branchAngle*ChangeValue` into a per-tick angle drift
pub const DRIFT_DIVISOR: f64 = 5.0;

/// Everything a branch reads from outside itself during one step
pub(crate) struct StepContext<'a> {
    pub genome: &'a Genome,
    pub anchor_end: Position,
    pub anchor_thickness: f64,
    /// Seed height minus [`GROUND_OFFSET`]
    pub ground_line: f64,
    /// Every other branch is fully grown or stopped
    pub others_fully_grown: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepOutcome {
    pub stopped_now: bool,
    pub wants_to_fork: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    id: BranchId,
    anchor: Anchor,
    children: Option<[BranchId; 2]>,
    angle: f64,
    length: f64,
    age: u32,
    thickness: f64,
    generation: u32,
    stopped: bool,
    dont_branch: bool,
    start_point: Position,
    end_point: Position,
    leaf: Leaf,
}

impl Branch {
    /// A fresh branch sitting at its anchor's tip
    pub fn new<R: RandomSource + ?Sized>(
        id: BranchId,
        anchor: Anchor,
        from: &dyn GrowthAnchor,
        angle: f64,
        rng: &mut R,
    ) -> Self {
        let start = from.end_point();
        Self {
            id,
            anchor,
            children: None,
            angle,
            length: 1.0,
            age: 0,
            thickness: 1.0,
            generation: (from.generation() + 1).max(0) as u32,
            stopped: false,
            dont_branch: false,
            start_point: start,
            end_point: start,
            leaf: Leaf::new(rng),
        }
    }

    pub fn id(&self) -> BranchId {
        self.id
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn parent(&self) -> Option<BranchId> {
        match self.anchor {
            Anchor::Seed => None,
            Anchor::Branch(id) => Some(id),
        }
    }

    pub fn children(&self) -> Option<[BranchId; 2]> {
        self.children
    }

    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn dont_branch(&self) -> bool {
        self.dont_branch
    }

    pub fn start_point(&self) -> Position {
        self.start_point
    }

    pub fn leaf(&self) -> &Leaf {
        &self.leaf
    }

    pub fn is_fully_grown(&self) -> bool {
        self.age > MATURITY_AGE
    }

    /// Done changing length: fully grown or stopped
    pub fn is_settled(&self) -> bool {
        self.is_fully_grown() || self.stopped
    }

    pub(crate) fn set_children(&mut self, children: [BranchId; 2]) {
        debug_assert!(self.children.is_none(), "branch {:?} forked twice", self.id);
        self.children = Some(children);
    }

    pub(crate) fn drift(&mut self, degrees: f64) {
        self.angle += degrees;
    }

    pub(crate) fn replace_leaf(&mut self, leaf: Leaf) {
        self.leaf = leaf;
    }

    /// Advance one tick, everything except forking and the children.
    pub(crate) fn step(&mut self, ctx: &StepContext<'_>) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        self.thickness = (self.thickness + THICKNESS_INCREMENT)
            .min(ctx.anchor_thickness * THICKNESS_RATIO)
            .max(1.0);

        if self.generation > LEAF_MIN_GENERATION {
            self.leaf.grow();
        }

        // positions follow the anchor even once stopped
        self.start_point = ctx.anchor_end;
        self.end_point = self.start_point.project(self.length, self.angle);

        if self.stopped {
            return outcome;
        }

        self.age += 1;

        let continuous = ctx.genome.value(GeneId::ContinuousBranchGrowth);
        if continuous > 0 && !(ctx.others_fully_grown && self.is_settled()) {
            self.length += f64::from(continuous) / CONTINUOUS_GROWTH_DIVISOR;
        }

        if self.end_point.y > ctx.ground_line && self.generation > GROUND_CHECK_MIN_GENERATION {
            self.stopped = true;
            self.dont_branch = true;
            outcome.stopped_now = true;
        }

        if !self.is_fully_grown() {
            self.length += f64::from(ctx.genome.value(GeneId::BranchGrowthRate));
        } else if !self.has_children() && !self.dont_branch {
            outcome.wants_to_fork = true;
        }

        outcome
    }
}

impl GrowthAnchor for Branch {
    fn end_point(&self) -> Position {
        self.end_point
    }

    fn generation(&self) -> i32 {
        self.generation as i32
    }

    fn thickness(&self) -> f64 {
        self.thickness
    }
}

/// Offsets for the two children of a fork, in degrees.
///
/// Side 1 draws before side 2 so a seeded source replays the same tree.
pub(crate) fn fork_angles<R: RandomSource + ?Sized>(genome: &Genome, rng: &mut R) -> (f64, f64) {
    let first = side_angle(
        genome,
        rng,
        GeneId::BranchAngle1Random,
        GeneId::BranchAngle1,
        GeneId::BranchAngle1RandomFrom,
        GeneId::BranchAngle1RandomTo,
    );
    let second = side_angle(
        genome,
        rng,
        GeneId::BranchAngle2Random,
        GeneId::BranchAngle2,
        GeneId::BranchAngle2RandomFrom,
        GeneId::BranchAngle2RandomTo,
    );
    (first, second)
}

fn side_angle<R: RandomSource + ?Sized>(
    genome: &Genome,
    rng: &mut R,
    random: GeneId,
    fixed: GeneId,
    from: GeneId,
    to: GeneId,
) -> f64 {
    if genome.value(random) == 1 {
        let from = f64::from(genome.value(from));
        let to = f64::from(genome.value(to));
        rng.draw() * (to - from) + from
    } else {
        f64::from(genome.value(fixed))
    }
}

/// Per-tick angle change for (first child, second child)
pub(crate) fn drift_deltas(genome: &Genome) -> (f64, f64) {
    const SIDES: [(GeneId, GeneId, GeneId); 2] = [
        (
            GeneId::BranchAngle1Change,
            GeneId::BranchAngle1ChangeDirection,
            GeneId::BranchAngle1ChangeValue,
        ),
        (
            GeneId::BranchAngle2Change,
            GeneId::BranchAngle2ChangeDirection,
            GeneId::BranchAngle2ChangeValue,
        ),
    ];

    SIDES
        .iter()
        .filter(|(change, _, _)| genome.value(*change) == 1)
        .fold((0.0, 0.0), |(first, second), &(_, direction, value)| {
            let step = f64::from(genome.value(value)) / DRIFT_DIVISOR;
            if genome.value(direction) == 1 {
                (first + step, second - step)
            } else {
                (first - step, second + step)
            }
        })
}
