//! Exclude-path subsumption compiler
//!
//! Compiles the parsed path list of a `SELECT * EXCLUDE ...` clause into one
//! reduced exclusion forest per FROM-clause variable. Children are sets
//! keyed on step values, so duplicate paths collapse and re-running
//! insertion over an already-reduced forest is a no-op. Subsumption applies
//! at insertion time:
//! - a leaf replaces a same-step branch (the coarser exclusion wins)
//! - a branch under a same-step leaf is dominated and dropped
//! - a wildcard leaf removes and blocks its sibling field/index entries
//! - wildcard and index entries at different depths never merge
//! - case-sensitive and case-insensitive field steps are distinct

use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use amberql_ast::{ExcludePath, ExcludeStep};

/// A terminal exclusion: everything reachable via `step` is removed
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ExcludeLeaf {
    /// The excluded step
    pub step: ExcludeStep,
}

impl ExcludeLeaf {
    /// Create a leaf for a step
    pub fn new(step: ExcludeStep) -> Self {
        Self { step }
    }
}

/// A non-terminal exclusion: descend via `step`, then apply the nested sets
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ExcludeBranch {
    /// The step to descend through
    pub step: ExcludeStep,
    /// Terminal exclusions below this step
    pub leaves: BTreeSet<ExcludeLeaf>,
    /// Nested exclusions below this step
    pub branches: BTreeSet<ExcludeBranch>,
}

/// The reduced exclusion forest for one FROM-clause variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledExcludeItem {
    /// Index of the root variable in the FROM clause
    pub root: usize,
    /// Terminal exclusions at the root
    pub leaves: BTreeSet<ExcludeLeaf>,
    /// Nested exclusions at the root
    pub branches: BTreeSet<ExcludeBranch>,
}

/// Compile a list of exclusion paths into one item per distinct root
///
/// Items appear in first-occurrence order of their roots.
pub fn compile_exclude_paths(paths: &[ExcludePath]) -> Vec<CompiledExcludeItem> {
    let mut forests: indexmap::IndexMap<usize, ForestNode> = indexmap::IndexMap::new();
    for path in paths {
        if path.steps.is_empty() {
            trace!("skipping empty exclude path for root #{}", path.root);
            continue;
        }
        forests.entry(path.root).or_default().insert(&path.steps);
    }
    forests
        .into_iter()
        .map(|(root, node)| {
            let (leaves, branches) = node.build();
            CompiledExcludeItem {
                root,
                leaves,
                branches,
            }
        })
        .collect()
}

/// Mutable node used while inserting paths; frozen into sets afterwards
#[derive(Debug, Default)]
struct ForestNode {
    leaves: BTreeSet<ExcludeStep>,
    branches: BTreeMap<ExcludeStep, ForestNode>,
}

impl ForestNode {
    fn insert(&mut self, steps: &[ExcludeStep]) {
        let Some((step, rest)) = steps.split_first() else {
            return;
        };
        if self.is_blocked(step) {
            return;
        }
        if rest.is_empty() {
            self.insert_leaf(step);
        } else {
            // A same-step leaf already excludes everything below this step
            if self.leaves.contains(step) {
                return;
            }
            self.branches.entry(step.clone()).or_default().insert(rest);
        }
    }

    /// A wildcard leaf at this node blocks field/index-level insertions
    fn is_blocked(&self, step: &ExcludeStep) -> bool {
        match step {
            ExcludeStep::StructField { .. } => {
                self.leaves.contains(&ExcludeStep::StructWildcard)
            }
            ExcludeStep::CollectionIndex(_) => {
                self.leaves.contains(&ExcludeStep::CollectionWildcard)
            }
            ExcludeStep::CollectionWildcard | ExcludeStep::StructWildcard => false,
        }
    }

    fn insert_leaf(&mut self, step: &ExcludeStep) {
        match step {
            ExcludeStep::StructWildcard => {
                self.leaves
                    .retain(|l| !matches!(l, ExcludeStep::StructField { .. }));
                self.branches
                    .retain(|s, _| !matches!(s, ExcludeStep::StructField { .. }));
            }
            ExcludeStep::CollectionWildcard => {
                self.leaves
                    .retain(|l| !matches!(l, ExcludeStep::CollectionIndex(_)));
                self.branches
                    .retain(|s, _| !matches!(s, ExcludeStep::CollectionIndex(_)));
            }
            ExcludeStep::StructField { .. } | ExcludeStep::CollectionIndex(_) => {}
        }
        // The coarser exclusion wins over a same-step branch
        self.branches.remove(step);
        self.leaves.insert(step.clone());
    }

    fn build(self) -> (BTreeSet<ExcludeLeaf>, BTreeSet<ExcludeBranch>) {
        let leaves = self.leaves.into_iter().map(ExcludeLeaf::new).collect();
        let branches = self
            .branches
            .into_iter()
            .map(|(step, node)| {
                let (leaves, branches) = node.build();
                ExcludeBranch {
                    step,
                    leaves,
                    branches,
                }
            })
            .collect();
        (leaves, branches)
    }
}
