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

use crate::stats::BnbSolverStatistics;
use barback_model::solution::Solution;

/// The solution a search ends with.
///
/// The empty solution is always feasible, so every search yields one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// The search tree was exhausted; no better solution exists.
    Optimal(Solution),
    /// The best solution found before the search was cut short.
    Feasible(Solution),
}

impl SolverResult {
    /// Returns the solution.
    #[inline]
    pub fn solution(&self) -> &Solution {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }

    /// Consumes the result and returns the solution.
    #[inline]
    pub fn into_solution(self) -> Solution {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => solution,
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(solution) => write!(f, "Optimal(score={})", solution.score()),
            SolverResult::Feasible(solution) => write!(f, "Feasible(score={})", solution.score()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every node was either explored or pruned; optimality is proven.
    SearchExhausted,
    /// The node budget ran out before the tree was exhausted.
    BudgetExhausted,
    /// A monitor stopped the search (time limit, interrupt, ...).
    /// The string contains the reason given by the monitor.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::SearchExhausted => write!(f, "Search Exhausted"),
            TerminationReason::BudgetExhausted => write!(f, "Budget Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    #[inline]
    pub fn optimal(solution: Solution, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::SearchExhausted,
            statistics,
        }
    }

    #[inline]
    pub fn budget_exhausted(solution: Solution, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Feasible(solution),
            termination_reason: TerminationReason::BudgetExhausted,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(solution: Solution, reason: R, statistics: BnbSolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Feasible(solution),
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    /// Returns the solution, optimal or not.
    #[inline]
    pub fn solution(&self) -> &Solution {
        self.result.solution()
    }

    /// Returns the score of the solution.
    #[inline]
    pub fn score(&self) -> usize {
        self.solution().score()
    }

    /// Returns `true` if the solution is proven optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Consumes the outcome and returns the solution.
    #[inline]
    pub fn into_solution(self) -> Solution {
        self.result.into_solution()
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolverOutcome(result: {}, reason: {}, nodes: {})",
            self.result, self.termination_reason, self.statistics.nodes_explored
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> BnbSolverStatistics {
        BnbSolverStatistics::default()
    }

    #[test]
    fn test_optimal_outcome() {
        let outcome = BnbSolverOutcome::optimal(Solution::empty(), stats());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.score(), 0);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::SearchExhausted
        );
        assert_eq!(format!("{}", outcome.result()), "Optimal(score=0)");
    }

    #[test]
    fn test_budget_exhausted_outcome_is_feasible() {
        let outcome = BnbSolverOutcome::budget_exhausted(Solution::empty(), stats());
        assert!(!outcome.is_optimal());
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert_eq!(
            format!("{}", outcome.termination_reason()),
            "Budget Exhausted"
        );
    }

    #[test]
    fn test_aborted_outcome_keeps_reason() {
        let outcome = BnbSolverOutcome::aborted(Solution::empty(), "time limit", stats());
        match outcome.termination_reason() {
            TerminationReason::Aborted(msg) => assert_eq!(msg, "time limit"),
            other => panic!("expected Aborted termination reason, got {:?}", other),
        }
        assert!(outcome.into_solution().is_empty());
    }
}
