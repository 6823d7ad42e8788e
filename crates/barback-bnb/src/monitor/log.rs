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

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::SearchState,
    stats::BnbSolverStatistics,
};
use barback_model::{index::ItemIndex, model::Model, solution::Solution};
use std::time::{Duration, Instant};

const TABLE_WIDTH: usize = 96;

/// Prints a progress table to stdout while the search runs.
///
/// The clock is only read when `nodes_explored & clock_check_mask == 0`, and a
/// line is printed at most once per `log_interval`. Every improvement of the
/// incumbent is printed right away.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_score: usize,
    prunings: u64,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_score: 0,
            prunings: 0,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<9} | {:<14} | {:<12}",
            "Elapsed", "Nodes", "Depth", "Best Score", "Partial", "Budget Left", "Pruned"
        );
        println!("{}", "-".repeat(TABLE_WIDTH));
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<7} | {:<10} | {:<9} | {:<14} | {:<12}",
            elapsed_field,
            stats.nodes_explored,
            state.depth(),
            self.best_score,
            state.partial_score(),
            state.remaining_budget(),
            self.prunings
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &Model, _stats: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_score = 0;
        self.prunings = 0;
        println!(
            "Searching {} items over {} elements.",
            model.num_items(),
            model.num_elements()
        );
        self.print_header();
    }

    fn on_step(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_prune(&mut self, _state: &SearchState, reason: PruneReason, _stats: &BnbSolverStatistics) {
        if matches!(reason, PruneReason::BoundDominated(_)) {
            self.prunings += 1;
        }
    }

    fn on_branch(&mut self, _state: &SearchState, _item: ItemIndex, _stats: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, solution: &Solution, stats: &BnbSolverStatistics) {
        self.best_score = solution.score();
        let elapsed = self.start_time.elapsed().as_secs_f32();
        println!(
            "{:<9} | {:<14} | new best score {} using {} elements",
            format!("{:.1}s", elapsed),
            stats.nodes_explored,
            solution.score(),
            solution.num_elements()
        );
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        println!("{}", "-".repeat(TABLE_WIDTH));
        println!(
            "Search finished after {} nodes in {:.2?}.",
            stats.nodes_explored,
            self.start_time.elapsed()
        );
    }
}
