use super::anchor::{Anchor, BranchId, GrowthAnchor, Seed};
use super::branch::{drift_deltas, fork_angles, Branch, StepContext, GROUND_OFFSET};
use super::leaf::Leaf;
use super::random::RandomSource;
use super::snapshot::{BranchSnapshot, TreeSnapshot};
use crate::engines::dna::{GeneId, Genome};
use crate::types::Position;
use serde::{Deserialize, Serialize};

/// Trunk thickness stops growing here
pub const TRUNK_THICKNESS_CAP: f64 = 30.0;

/// The root grows straight up (screen y points down)
pub const ROOT_ANGLE: f64 = -90.0;

/// What happened during one call to [`Tree::grow`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub branches_spawned: usize,
    pub branches_stopped: usize,
    pub branch_count: usize,
}

/// A whole tree: the seed it grew from plus every branch, stored flat.
///
/// Branches refer to each other by [`BranchId`]; index 0 is always the root.
/// The tree reads its settings from a [`Genome`] handed to [`Tree::grow`]
/// each tick, so edits to the genome take effect on the next tick.
#[derive(Debug, Clone)]
pub struct Tree {
    seed: Seed,
    age: u64,
    branches: Vec<Branch>,
    /// Branches neither fully grown nor stopped
    unsettled: usize,
}

impl Tree {
    /// Plant a seed. The root branch draws its leaf from `rng`.
    pub fn new<R: RandomSource + ?Sized>(start: Position, rng: &mut R) -> Self {
        let seed = Seed::new(start);
        let root = Branch::new(BranchId::ROOT, Anchor::Seed, &seed, ROOT_ANGLE, rng);
        Self {
            seed,
            age: 0,
            branches: vec![root],
            unsettled: 1,
        }
    }

    pub fn start_point(&self) -> Position {
        self.seed.position
    }

    pub fn end_point(&self) -> Position {
        self.seed.end_point()
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn thickness(&self) -> f64 {
        self.seed.thickness
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.index())
    }

    pub fn root(&self) -> &Branch {
        &self.branches[BranchId::ROOT.index()]
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Below the `maxBranches` ceiling
    pub fn can_grow_branch(&self, genome: &Genome) -> bool {
        self.branches.len() < ceiling(genome)
    }

    /// Room for a whole fork (two branches) under the ceiling
    pub fn has_room_for_fork(&self, genome: &Genome) -> bool {
        self.branches.len() + 2 <= ceiling(genome)
    }

    /// Every branch is fully grown or stopped
    pub fn is_fully_grown(&self) -> bool {
        self.unsettled == 0
    }

    pub fn is_subtree_fully_grown(&self, id: BranchId) -> bool {
        self.subtree(id).all(|b| self.branches[b.index()].is_settled())
    }

    /// Length of a branch plus everything growing from it
    pub fn total_length(&self, id: BranchId) -> f64 {
        self.subtree(id).map(|b| self.branches[b.index()].length()).sum()
    }

    /// Length of every branch
    pub fn tree_length(&self) -> f64 {
        self.branches.iter().map(Branch::length).sum()
    }

    pub fn max_generation(&self) -> u32 {
        self.branches.iter().map(Branch::generation).max().unwrap_or(0)
    }

    /// Ids under (and including) `id`, parent before children, first child's
    /// subtree before the second's
    pub fn subtree(&self, id: BranchId) -> impl Iterator<Item = BranchId> + '_ {
        let mut stack = if id.index() < self.branches.len() { vec![id] } else { Vec::new() };
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            if let Some([first, second]) = self.branches[next.index()].children() {
                stack.push(second);
                stack.push(first);
            }
            Some(next)
        })
    }

    /// Advance the whole tree by one tick.
    pub fn grow<R: RandomSource + ?Sized>(&mut self, genome: &Genome, rng: &mut R) -> TickReport {
        self.age += 1;
        self.seed.thickness = (self.seed.thickness + 1.0).min(TRUNK_THICKNESS_CAP);

        let mut report = TickReport {
            tick: self.age,
            ..TickReport::default()
        };

        // depth-first, same order as recursing parent -> first -> second
        let mut stack = vec![BranchId::ROOT];
        while let Some(id) = stack.pop() {
            self.grow_branch(id, genome, rng, &mut report);
            if let Some([first, second]) = self.branches[id.index()].children() {
                stack.push(second);
                stack.push(first);
            }
        }

        report.branch_count = self.branches.len();
        report
    }

    fn grow_branch<R: RandomSource + ?Sized>(
        &mut self,
        id: BranchId,
        genome: &Genome,
        rng: &mut R,
        report: &mut TickReport,
    ) {
        let anchor = self.anchor_of(self.branches[id.index()].anchor());
        let (anchor_end, anchor_thickness) = (anchor.end_point(), anchor.thickness());

        let was_settled = self.branches[id.index()].is_settled();
        let others_fully_grown = self.unsettled - usize::from(!was_settled) == 0;

        let ctx = StepContext {
            genome,
            anchor_end,
            anchor_thickness,
            ground_line: self.seed.position.y - GROUND_OFFSET,
            others_fully_grown,
        };
        let outcome = self.branches[id.index()].step(&ctx);
        if !was_settled && self.branches[id.index()].is_settled() {
            self.unsettled -= 1;
        }

        if outcome.stopped_now {
            log::debug!(
                "branch {} (generation {}) stopped at the ground line",
                id.index(),
                self.branches[id.index()].generation()
            );
            report.branches_stopped += 1;
        }

        if outcome.wants_to_fork && self.has_room_for_fork(genome) {
            self.fork(id, genome, rng);
            report.branches_spawned += 2;
        }

        if let Some([first, second]) = self.branches[id.index()].children() {
            let (first_delta, second_delta) = drift_deltas(genome);
            self.branches[first.index()].drift(first_delta);
            self.branches[second.index()].drift(second_delta);
        }
    }

    fn fork<R: RandomSource + ?Sized>(&mut self, id: BranchId, genome: &Genome, rng: &mut R) {
        let (first_offset, second_offset) = fork_angles(genome, rng);

        let parent = &self.branches[id.index()];
        let angle = parent.angle();
        let first_id = BranchId(self.branches.len());
        let second_id = BranchId(first_id.index() + 1);
        let first = Branch::new(first_id, Anchor::Branch(id), parent, angle + first_offset, rng);
        let second = Branch::new(second_id, Anchor::Branch(id), parent, angle - second_offset, rng);

        log::debug!(
            "branch {} forked into {} and {} at generation {}",
            id.index(),
            first_id.index(),
            second_id.index(),
            first.generation()
        );

        self.branches.push(first);
        self.branches.push(second);
        self.unsettled += 2;
        self.branches[id.index()].set_children([first_id, second_id]);
    }

    fn anchor_of(&self, anchor: Anchor) -> &dyn GrowthAnchor {
        match anchor {
            Anchor::Seed => &self.seed,
            Anchor::Branch(id) => &self.branches[id.index()],
        }
    }

    /// Give every branch a brand new leaf
    pub fn respawn_leaves<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for branch in &mut self.branches {
            branch.replace_leaf(Leaf::new(rng));
        }
    }

    /// Read-only copy of the whole tree for a renderer
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            age: self.age,
            start_point: self.seed.position,
            thickness: self.seed.thickness,
            branch_count: self.branches.len(),
            total_length: self.tree_length(),
            fully_grown: self.is_fully_grown(),
            branches: self.branches.iter().map(BranchSnapshot::from).collect(),
        }
    }
}

fn ceiling(genome: &Genome) -> usize {
    genome.value(GeneId::MaxBranches).max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::growth::random::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plant() -> Tree {
        Tree::new(Position::new(400.0, 600.0), &mut ScriptedRandom::new(vec![0.5]))
    }

    #[test]
    fn test_new_tree_has_only_the_root() {
        let tree = plant();
        assert_eq!(tree.branch_count(), 1);
        assert_eq!(tree.root().generation(), 0);
        assert_eq!(tree.root().angle(), ROOT_ANGLE);
        assert_eq!(tree.end_point(), tree.start_point());
    }

    #[test]
    fn test_root_forks_after_maturing() {
        let genome = Genome::new();
        let mut tree = plant();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..10 {
            let report = tree.grow(&genome, &mut rng);
            assert_eq!(report.branches_spawned, 0);
        }
        let report = tree.grow(&genome, &mut rng);
        assert_eq!(report.tick, 11);
        assert_eq!(report.branches_spawned, 2);
        assert_eq!(tree.branch_count(), 3);

        let [first, second] = tree.root().children().unwrap();
        assert_eq!(tree.branch(first).unwrap().angle(), -75.0);
        assert_eq!(tree.branch(second).unwrap().angle(), -105.0);
        assert_eq!(tree.branch(first).unwrap().generation(), 1);
        assert_eq!(tree.branch(first).unwrap().parent(), Some(BranchId::ROOT));
        // children grew in the same tick they were born
        assert_eq!(tree.branch(first).unwrap().age(), 1);
    }

    #[test]
    fn test_single_branch_ceiling() {
        let mut genome = Genome::new();
        genome.set(GeneId::MaxBranches, 1);
        let mut tree = plant();
        assert!(!tree.can_grow_branch(&genome));

        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..50 {
            tree.grow(&genome, &mut rng);
        }
        assert_eq!(tree.branch_count(), 1);
        assert!(tree.is_fully_grown());
    }

    #[test]
    fn test_odd_ceiling_is_never_exceeded() {
        let mut genome = Genome::new();
        genome.set(GeneId::MaxBranches, 4);
        let mut tree = plant();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..60 {
            tree.grow(&genome, &mut rng);
            assert!(tree.branch_count() <= 4);
        }
        assert_eq!(tree.branch_count(), 3);
        assert!(tree.can_grow_branch(&genome));
        assert!(!tree.has_room_for_fork(&genome));
    }

    #[test]
    fn test_trunk_thickness_caps() {
        let genome = Genome::new();
        let mut tree = plant();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..40 {
            tree.grow(&genome, &mut rng);
        }
        assert_eq!(tree.thickness(), TRUNK_THICKNESS_CAP);
    }

    #[test]
    fn test_children_start_at_parent_tip() {
        let genome = Genome::new();
        let mut tree = plant();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..15 {
            tree.grow(&genome, &mut rng);
        }
        let [first, _] = tree.root().children().unwrap();
        assert_eq!(tree.branch(first).unwrap().start_point(), tree.root().end_point());
    }

    #[test]
    fn test_subtree_order_and_total_length() {
        let genome = Genome::new();
        let mut tree = plant();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..25 {
            tree.grow(&genome, &mut rng);
        }
        let order: Vec<usize> = tree.subtree(BranchId::ROOT).map(BranchId::index).collect();
        assert_eq!(order.len(), tree.branch_count());
        assert_eq!(order[0], 0);
        assert_eq!(order[1], 1);

        let sum: f64 = tree.branches().iter().map(Branch::length).sum();
        assert!((tree.total_length(BranchId::ROOT) - sum).abs() < 1e-9);
        assert_eq!(tree.total_length(BranchId(9999)), 0.0);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let mut genome = Genome::new();
        genome.set(GeneId::BranchAngle1Random, 1);
        genome.set(GeneId::BranchAngle2Random, 1);

        let grow = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut tree = Tree::new(Position::new(0.0, 0.0), &mut rng);
            for _ in 0..60 {
                tree.grow(&genome, &mut rng);
            }
            tree.snapshot()
        };
        assert_eq!(grow(3), grow(3));
    }

    #[test]
    fn test_respawn_leaves_resets_age() {
        let genome = Genome::new();
        let mut tree = plant();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..5 {
            tree.grow(&genome, &mut rng);
        }
        tree.respawn_leaves(&mut rng);
        assert!(tree.branches().iter().all(|b| b.leaf().age() == 0));
    }

    #[test]
    fn test_unsettled_count_tracks_branches() {
        let mut genome = Genome::new();
        genome.set(GeneId::ContinuousBranchGrowth, 3);
        genome.set(GeneId::BranchAngle1, 90);
        genome.set(GeneId::BranchAngle2, 90);

        // seed near the top so deep branches curl below the ground line
        let mut tree = Tree::new(Position::new(400.0, 0.0), &mut ScriptedRandom::new(vec![0.5]));
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..120 {
            tree.grow(&genome, &mut rng);
            let scanned = tree.branches().iter().filter(|b| !b.is_settled()).count();
            assert_eq!(tree.unsettled, scanned);
            assert_eq!(tree.is_fully_grown(), scanned == 0);
        }
        assert!(tree.branches().iter().any(Branch::is_stopped));
    }

    #[test]
    fn test_continuous_growth_pauses_once_everything_settles() {
        let mut genome = Genome::new();
        genome.set(GeneId::MaxBranches, 3);
        genome.set(GeneId::ContinuousBranchGrowth, 3);
        let mut tree = plant();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        for _ in 0..21 {
            tree.grow(&genome, &mut rng);
        }
        assert!(tree.is_fully_grown());

        // the root stepped before its children settled on tick 21, so
        // lengths freeze from the following tick
        tree.grow(&genome, &mut rng);
        let lengths: Vec<f64> = tree.branches().iter().map(Branch::length).collect();
        tree.grow(&genome, &mut rng);
        let after: Vec<f64> = tree.branches().iter().map(Branch::length).collect();
        assert_eq!(lengths, after);
    }
}
