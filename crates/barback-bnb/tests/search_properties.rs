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

use barback_bnb::{
    bnb::{BnbSolver, SolverConfig},
    bound::BoundSet,
    branching::{amortized::MinAmortizedCostRule, random::SeededRandomRule},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::{BnbSolverOutcome, TerminationReason},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use barback_core::set::ElementSet;
use barback_model::{
    index::ItemIndex,
    model::{Model, ModelBuilder},
    solution::Solution,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builds a random collection of at most `max_items` distinct items over a
/// universe of `num_elements` elements.
fn random_model(rng: &mut ChaCha8Rng, max_items: usize, num_elements: usize) -> Model {
    let mut builder = ModelBuilder::new();
    for i in 0..max_items {
        let len = rng.random_range(1..=4.min(num_elements));
        let mut elements = Vec::with_capacity(len);
        while elements.len() < len {
            let e = format!("e{}", rng.random_range(0..num_elements));
            if !elements.contains(&e) {
                elements.push(e);
            }
        }
        builder
            .add_item(format!("item{}", i), elements)
            .expect("generated items are never empty");
    }
    builder.build()
}

/// Exhaustively enumerates every sub-collection and returns the best feasible score.
fn brute_force(model: &Model, max_size: usize) -> usize {
    let n = model.num_items();
    let mut best = 0;
    for mask in 0u32..(1u32 << n) {
        let score = mask.count_ones() as usize;
        if score <= best {
            continue;
        }
        let mut union = ElementSet::new();
        for i in 0..n {
            if mask & (1 << i) != 0 {
                union.union_with(model.item(ItemIndex::new(i)));
            }
        }
        if union.len() <= max_size {
            best = score;
        }
    }
    best
}

fn assert_consistent(model: &Model, outcome: &BnbSolverOutcome, max_size: usize) {
    let solution = outcome.solution();
    assert!(
        solution.is_within(max_size),
        "solution uses {} elements, budget is {}",
        solution.num_elements(),
        max_size
    );
    assert_eq!(
        model.union_of(solution.items().iter().copied()),
        *solution.elements()
    );
}

#[derive(Default)]
struct RecordingMonitor {
    scores: Vec<usize>,
    steps: u64,
    prunes: u64,
    branches: u64,
    entered: bool,
    exited: bool,
}

impl TreeSearchMonitor for RecordingMonitor {
    fn name(&self) -> &str {
        "RecordingMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model, _statistics: &BnbSolverStatistics) {
        self.entered = true;
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {
        self.exited = true;
    }

    fn on_step(&mut self, _state: &SearchState, _statistics: &BnbSolverStatistics) {
        self.steps += 1;
    }

    fn on_prune(
        &mut self,
        _state: &SearchState,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
        self.prunes += 1;
    }

    fn on_branch(
        &mut self,
        _state: &SearchState,
        _item: ItemIndex,
        _statistics: &BnbSolverStatistics,
    ) {
        self.branches += 1;
    }

    fn on_solution_found(&mut self, solution: &Solution, _statistics: &BnbSolverStatistics) {
        self.scores.push(solution.score());
    }
}

#[test]
fn test_matches_brute_force_on_random_instances() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xBA2BAC);
    let mut solver = BnbSolver::new();

    for round in 0..60 {
        let max_items = rng.random_range(0..=14);
        let num_elements = rng.random_range(2..=9);
        let model = random_model(&mut rng, max_items, num_elements);
        let max_size = rng.random_range(1..=num_elements);

        let config = SolverConfig::new(max_size).with_search_budget(u64::MAX);
        let outcome = solver.solve_with_defaults(&model, &config);

        assert!(outcome.is_optimal(), "round {} did not finish", round);
        assert_consistent(&model, &outcome, max_size);
        assert_eq!(
            outcome.score(),
            brute_force(&model, max_size),
            "round {}: {} items, {} elements, budget {}",
            round,
            model.num_items(),
            model.num_elements(),
            max_size
        );
    }
}

#[test]
fn test_extended_bounds_and_random_branching_stay_optimal() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let mut solver = BnbSolver::new();

    for round in 0..30 {
        let model = random_model(&mut rng, 12, 7);
        let max_size = rng.random_range(1..=7);
        let config = SolverConfig::new(max_size).with_search_budget(u64::MAX);
        let expected = brute_force(&model, max_size);

        let mut rule = SeededRandomRule::new(round);
        let mut bounds = BoundSet::extended();
        let outcome = solver.solve(
            &model,
            &config,
            &mut rule,
            &mut bounds,
            RecordingMonitor::default(),
        );
        assert!(outcome.is_optimal());
        assert_consistent(&model, &outcome, max_size);
        assert_eq!(outcome.score(), expected, "round {}", round);
    }
}

#[test]
fn test_small_budgets_are_anytime_and_respected() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut solver = BnbSolver::new();

    for _ in 0..20 {
        let model = random_model(&mut rng, 14, 8);
        let max_size = rng.random_range(2..=8);
        let optimum = brute_force(&model, max_size);

        for budget in 1..=5u64 {
            let config = SolverConfig::new(max_size).with_search_budget(budget);
            let mut monitor = RecordingMonitor::default();
            let mut rule = MinAmortizedCostRule::new();
            let mut bounds = BoundSet::default();
            let outcome = solver.solve(&model, &config, &mut rule, &mut bounds, &mut monitor);

            assert_consistent(&model, &outcome, max_size);
            assert!(outcome.score() <= optimum);
            assert!(outcome.statistics().nodes_explored <= budget);
            assert_eq!(monitor.steps, outcome.statistics().nodes_explored);
            if !outcome.is_optimal() {
                assert_eq!(
                    outcome.termination_reason(),
                    &TerminationReason::BudgetExhausted
                );
            }
        }
    }
}

#[test]
fn test_incumbent_is_monotone() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let model = random_model(&mut rng, 14, 9);
    let config = SolverConfig::new(5).with_search_budget(u64::MAX);

    let mut monitor = RecordingMonitor::default();
    let mut rule = MinAmortizedCostRule::new();
    let mut bounds = BoundSet::default();
    let outcome = BnbSolver::new().solve(&model, &config, &mut rule, &mut bounds, &mut monitor);

    assert!(monitor.entered && monitor.exited);
    assert!(monitor.scores.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(monitor.scores.last().copied().unwrap_or(0), outcome.score());
    assert_eq!(monitor.scores.len() as u64, outcome.statistics().solutions_found);
    assert_eq!(monitor.branches, outcome.statistics().branches);
    assert_eq!(
        monitor.prunes,
        outcome.statistics().leaves + outcome.statistics().prunings_total()
    );
}

#[test]
fn test_runs_are_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let model = random_model(&mut rng, 14, 8);
    let config = SolverConfig::new(4).with_search_budget(50);

    let first = BnbSolver::new().solve_with_defaults(&model, &config);
    let second = BnbSolver::new().solve_with_defaults(&model, &config);
    assert_eq!(first.solution(), second.solution());
    assert_eq!(
        first.statistics().nodes_explored,
        second.statistics().nodes_explored
    );

    let seeded = |seed| {
        let mut rule = SeededRandomRule::new(seed);
        let mut bounds = BoundSet::default();
        BnbSolver::new().solve(
            &model,
            &config,
            &mut rule,
            &mut bounds,
            RecordingMonitor::default(),
        )
    };
    assert_eq!(seeded(8).solution(), seeded(8).solution());
}

#[test]
fn test_solver_is_reusable_across_models() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let big = random_model(&mut rng, 14, 9);
    let small = random_model(&mut rng, 5, 4);
    let mut solver = BnbSolver::preallocated(big.num_items());

    let config = SolverConfig::new(3).with_search_budget(10);
    let _ = solver.solve_with_defaults(&big, &config);

    let config = SolverConfig::new(3).with_search_budget(u64::MAX);
    let outcome = solver.solve_with_defaults(&small, &config);
    assert!(outcome.is_optimal());
    assert_eq!(outcome.score(), brute_force(&small, 3));
}
