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

//! Branch-and-Bound solver for budgeted item coverage.
//!
//! This module implements a stateful search engine that looks for the largest
//! set of items whose combined elements fit into an element budget. The search
//! tree branches on one item per node: the include branch commits the item
//! together with every candidate that becomes free once its elements are
//! present, the exclude branch forbids it. Nodes are kept on an explicit LIFO
//! work stack, so the depth of the tree never touches the native call stack.
//!
//! Every popped node charges one unit of the search budget. When the budget
//! runs out, the search stops and returns the best solution found so far; when
//! the stack runs dry first, that solution is proven optimal. Monitors are
//! consulted between node visits and may abort the search at that point.
//!
//! A search session object encapsulates per-run state, statistics, and timing.
//! The `BnbSolver` itself only keeps the work stack allocation between solves.

use crate::{
    bound::{BoundContext, BoundSet, BoundVerdict},
    branching::{amortized::MinAmortizedCostRule, rule::BranchingRule},
    incumbent::Incumbent,
    monitor::{
        no_op::NoOperationMonitor,
        tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    },
    profile::ItemProfile,
    result::{BnbSolverOutcome, TerminationReason},
    stack::{SearchNode, SearchStack},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use barback_model::{index::ItemIndex, model::Model, solution::Solution};

/// Default number of node visits before the search gives up.
pub const DEFAULT_SEARCH_BUDGET: u64 = 8_000_000;

/// Default element budget.
pub const DEFAULT_MAX_SIZE: usize = 12;

/// The two scalars that parameterize a solve.
///
/// - `max_size`: the element budget. A solution may use at most this many
///   distinct elements.
/// - `search_budget`: the number of node visits the search may perform. A
///   budget of zero returns the empty solution without searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    max_size: usize,
    search_budget: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            search_budget: DEFAULT_SEARCH_BUDGET,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with the given element budget and the default
    /// search budget.
    #[inline]
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    /// Sets the element budget.
    #[inline]
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the number of node visits the search may perform.
    #[inline]
    pub fn with_search_budget(mut self, search_budget: u64) -> Self {
        self.search_budget = search_budget;
        self
    }

    /// Returns the element budget.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the search budget.
    #[inline]
    pub fn search_budget(&self) -> u64 {
        self.search_budget
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverConfig(max_size: {}, search_budget: {})",
            self.max_size, self.search_budget
        )
    }
}

/// A branch and bound solver for the budgeted coverage problem.
/// Note that this is just the execution engine, the choice of the branching
/// item is delegated to a `BranchingRule` and pruning to a `BoundSet`.
#[derive(Clone, Debug, Default)]
pub struct BnbSolver {
    stack: SearchStack,
}

impl BnbSolver {
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            stack: SearchStack::new(),
        }
    }

    /// Create a new solver instance with preallocated storage for a model
    /// with `num_items` items.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            stack: SearchStack::preallocated(num_items),
        }
    }

    /// Solve `model` with the minimum amortized cost rule, the default bounds
    /// and no monitoring.
    #[inline]
    pub fn solve_with_defaults(&mut self, model: &Model, config: &SolverConfig) -> BnbSolverOutcome {
        let mut rule = MinAmortizedCostRule::new();
        let mut bounds = BoundSet::default();
        self.solve(model, config, &mut rule, &mut bounds, NoOperationMonitor::new())
    }

    /// Solve `model` using the provided `BranchingRule`, `BoundSet`, and
    /// `TreeSearchMonitor`.
    ///
    /// Pass `&mut monitor` to keep ownership of the monitor.
    pub fn solve<R, S>(
        &mut self,
        model: &Model,
        config: &SolverConfig,
        rule: &mut R,
        bounds: &mut BoundSet,
        mut monitor: S,
    ) -> BnbSolverOutcome
    where
        R: BranchingRule + ?Sized,
        S: TreeSearchMonitor,
    {
        if config.search_budget() == 0 {
            let mut stats = BnbSolverStatistics::with_bounds(bounds.names());
            stats.set_budget_exhausted();
            monitor.on_enter_search(model, &stats);
            monitor.on_exit_search(&stats);
            return BnbSolverOutcome::budget_exhausted(Solution::empty(), stats);
        }

        let session =
            BnbSolverSearchSession::new(self, model, config, rule, bounds, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Reset the internal state of the solver, clearing the work stack.
    ///
    /// # Note
    ///
    /// This does not deallocate any memory used by the stack,
    /// but only resets its logical state.
    #[inline]
    fn reset(&mut self) {
        self.stack.reset();
    }
}

/// A search session for the coverage solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, R, S>
where
    R: BranchingRule + ?Sized,
    S: TreeSearchMonitor,
{
    solver: &'a mut BnbSolver,
    model: &'a Model,
    config: &'a SolverConfig,
    rule: &'a mut R,
    bounds: &'a mut BoundSet,
    monitor: &'a mut S,
    profile: ItemProfile,
    incumbent: Incumbent,
    remaining_budget: u64,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<R, S> std::fmt::Debug for BnbSolverSearchSession<'_, R, S>
where
    R: BranchingRule + ?Sized,
    S: TreeSearchMonitor,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("model", &self.model)
            .field("config", &self.config)
            .field("incumbent", &self.incumbent)
            .field("remaining_budget", &self.remaining_budget)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, R, S> BnbSolverSearchSession<'a, R, S>
where
    R: BranchingRule + ?Sized,
    S: TreeSearchMonitor,
{
    /// Create a new search session. This runs the per-item precomputation.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver,
        model: &'a Model,
        config: &'a SolverConfig,
        rule: &'a mut R,
        bounds: &'a mut BoundSet,
        monitor: &'a mut S,
    ) -> Self {
        let stats = BnbSolverStatistics::with_bounds(bounds.names());
        Self {
            solver,
            model,
            config,
            rule,
            bounds,
            monitor,
            profile: ItemProfile::new(model),
            incumbent: Incumbent::new(),
            remaining_budget: config.search_budget(),
            stats,
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> BnbSolverOutcome {
        self.monitor.on_enter_search(self.model, &self.stats);

        self.solver.stack.ensure_capacity(self.model.num_items());
        self.solver
            .stack
            .push(SearchNode::root(self.model.num_items()));

        let termination_reason = loop {
            let Some(node) = self.solver.stack.pop() else {
                break TerminationReason::SearchExhausted;
            };

            let state = self.snapshot(&node);
            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&state, &self.stats)
            {
                break TerminationReason::Aborted(msg);
            }

            // The only cancellation point of the traversal.
            if self.remaining_budget == 0 {
                break TerminationReason::BudgetExhausted;
            }
            self.remaining_budget -= 1;
            self.stats.on_node_explored();

            let state = self.snapshot(&node);
            self.monitor.on_step(&state, &self.stats);

            self.expand(node);
        };

        self.stats.set_total_time(self.start_time.elapsed());
        if termination_reason == TerminationReason::BudgetExhausted {
            self.stats.set_budget_exhausted();
        }
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    /// Finalize the solver result based on the incumbent
    /// and the termination reason.
    #[inline]
    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome {
        let solution = self.incumbent.into_solution();
        debug_assert!(
            solution.is_within(self.config.max_size()),
            "called `BnbSolverSearchSession::finalize_result` with an incumbent over budget: the budget is {} but the solution uses {}",
            self.config.max_size(),
            solution.num_elements()
        );
        match reason {
            TerminationReason::SearchExhausted => BnbSolverOutcome::optimal(solution, self.stats),
            TerminationReason::BudgetExhausted => {
                BnbSolverOutcome::budget_exhausted(solution, self.stats)
            }
            TerminationReason::Aborted(msg) => BnbSolverOutcome::aborted(solution, msg, self.stats),
        }
    }

    #[inline]
    fn snapshot(&self, node: &SearchNode) -> SearchState {
        SearchState::new(
            node.depth,
            node.partial_len,
            node.candidates.len(),
            self.incumbent.score(),
            self.remaining_budget,
            self.solver.stack.len(),
        )
    }

    /// Visit `node`: update the incumbent, filter, bound, and branch.
    fn expand(&mut self, node: SearchNode) {
        let SearchNode {
            mut candidates,
            partial,
            partial_len,
            partial_elements,
            forbidden,
            depth,
        } = node;
        let max_size = self.config.max_size();

        self.stats.on_depth_update(depth as u64);

        if let Some(solution) = self.incumbent.try_improve(partial_len, || {
            Solution::from_parts(
                partial.ones().map(ItemIndex::new).collect(),
                partial_elements.clone(),
            )
        }) {
            self.stats.on_solution_found();
            self.monitor.on_solution_found(solution, &self.stats);
        }

        let before = candidates.len();
        let model = self.model;
        candidates.retain(|&c| model.item(c).union_len(&partial_elements) <= max_size);
        self.stats
            .on_infeasible_filtered((before - candidates.len()) as u64);

        let state = SearchState::new(
            depth,
            partial_len,
            candidates.len(),
            self.incumbent.score(),
            self.remaining_budget,
            self.solver.stack.len(),
        );

        if candidates.is_empty() {
            self.stats.on_leaf();
            self.monitor
                .on_prune(&state, PruneReason::NoCandidates, &self.stats);
            return;
        }

        let threshold = self.incumbent.score().saturating_sub(partial_len);
        let ctx = BoundContext {
            model,
            profile: &self.profile,
            candidates: &candidates,
            partial: &partial,
            partial_elements: &partial_elements,
            max_size,
        };
        if let BoundVerdict::Prune { index, name } = self.bounds.keep_exploring(&ctx, threshold) {
            self.stats.on_pruning_bound(index);
            self.monitor
                .on_prune(&state, PruneReason::BoundDominated(name), &self.stats);
            return;
        }

        let Some(best) = self.rule.select(model, &self.profile, &candidates) else {
            self.stats.on_leaf();
            self.monitor
                .on_prune(&state, PruneReason::NoCandidates, &self.stats);
            return;
        };
        debug_assert!(
            candidates.contains(&best),
            "called `BnbSolverSearchSession::expand` with a branching rule that picked {} outside the candidates",
            best
        );

        self.stats.on_branch();
        self.monitor.on_branch(&state, best, &self.stats);

        let best_set = model.item(best);

        // Exclude: drop `best` and every candidate that would bring all of
        // `best`'s elements in anyway.
        let remaining: Vec<ItemIndex> = candidates
            .iter()
            .copied()
            .filter(|&c| c != best && !best_set.is_subset_of_union(model.item(c), &partial_elements))
            .collect();
        let mut excluded = forbidden.clone();
        excluded.insert(best.get());
        let exclude_node = SearchNode {
            candidates: remaining,
            partial: partial.clone(),
            partial_len,
            partial_elements: partial_elements.clone(),
            forbidden: excluded,
            depth: depth + 1,
        };

        // Include: commit `best` plus every candidate it makes free. A candidate
        // stays open only if it fits and does not complete a forbidden item.
        let new_elements = &partial_elements | best_set;
        let mut include_partial = partial;
        let mut include_len = partial_len;
        let mut permitted = Vec::with_capacity(candidates.len());
        for &c in &candidates {
            let item = model.item(c);
            if item.is_subset(&new_elements) {
                include_partial.insert(c.get());
                include_len += 1;
            } else if item.union_len(&new_elements) <= max_size
                && !forbidden
                    .ones()
                    .any(|f| model.item(ItemIndex::new(f)).is_subset_of_union(item, &new_elements))
            {
                permitted.push(c);
            }
        }
        let include_node = SearchNode {
            candidates: permitted,
            partial: include_partial,
            partial_len: include_len,
            partial_elements: new_elements,
            forbidden,
            depth: depth + 1,
        };

        // LIFO: the include branch is explored first.
        self.solver.stack.push(exclude_node);
        self.solver.stack.push(include_node);
        self.stats.on_open_nodes(self.solver.stack.len() as u64);
    }
}
