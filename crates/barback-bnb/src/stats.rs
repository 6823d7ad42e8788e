// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::time::Duration;

/// Statistics collected during the execution of the Barback-BnB solver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbSolverStatistics {
    /// Total nodes visited. Each visit consumes one unit of search budget.
    pub nodes_explored: u64,
    /// Nodes split into an include and an exclude child.
    pub branches: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Candidates dropped because they no longer fit into the element budget.
    pub infeasible_filtered: u64,
    /// Nodes closed because no candidates were left.
    pub leaves: u64,
    /// Nodes pruned by a bound, per bound name, in evaluation order.
    pub prunings_by_bound: Vec<(&'static str, u64)>,
    /// Strict improvements of the incumbent.
    pub solutions_found: u64,
    /// Largest number of nodes pending on the work stack.
    pub peak_open_nodes: u64,
    /// Whether the search stopped because the node budget ran out.
    pub budget_exhausted: bool,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl BnbSolverStatistics {
    /// Creates statistics with one pruning counter per bound name.
    pub fn with_bounds<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            prunings_by_bound: names.into_iter().map(|name| (name, 0)).collect(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_branch(&mut self) {
        self.branches = self.branches.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_infeasible_filtered(&mut self, count: u64) {
        self.infeasible_filtered = self.infeasible_filtered.saturating_add(count);
    }

    #[inline]
    pub fn on_leaf(&mut self) {
        self.leaves = self.leaves.saturating_add(1);
    }

    /// Records a pruning by the bound at position `index`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `index` has no counter.
    #[inline]
    pub fn on_pruning_bound(&mut self, index: usize) {
        debug_assert!(
            index < self.prunings_by_bound.len(),
            "called `BnbSolverStatistics::on_pruning_bound` with bound index out of bounds: the len is {} but the index is {}",
            self.prunings_by_bound.len(),
            index
        );
        if let Some((_, count)) = self.prunings_by_bound.get_mut(index) {
            *count = count.saturating_add(1);
        }
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_open_nodes(&mut self, open: u64) {
        self.peak_open_nodes = self.peak_open_nodes.max(open);
    }

    #[inline]
    pub fn set_budget_exhausted(&mut self) {
        self.budget_exhausted = true;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Returns the number of nodes pruned by any bound.
    #[inline]
    pub fn prunings_total(&self) -> u64 {
        self.prunings_by_bound.iter().map(|(_, c)| c).sum()
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Barback-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Branches:             {}", self.branches)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Leaves:               {}", self.leaves)?;
        writeln!(f, "  Infeasible filtered:  {}", self.infeasible_filtered)?;
        for (name, count) in &self.prunings_by_bound {
            writeln!(f, "  Prunings ({}): {}", name, count)?;
        }
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Peak open nodes:      {}", self.peak_open_nodes)?;
        writeln!(f, "  Budget exhausted:     {}", self.budget_exhausted)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
