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

//! Search state snapshot handed to monitors.
//!
//! The solver does not keep one mutable state that it patches and restores;
//! every node on the work stack owns its own candidates, partial solution and
//! forbidden set. `SearchState` is the small, copyable view of the node being
//! processed plus the global counters, which is what monitors need for
//! logging and stop decisions.

/// A read‑only view of the search at the current node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    depth: usize,
    partial_score: usize,
    num_candidates: usize,
    best_score: usize,
    remaining_budget: u64,
    open_nodes: usize,
}

impl SearchState {
    /// Creates a new snapshot.
    #[inline]
    pub fn new(
        depth: usize,
        partial_score: usize,
        num_candidates: usize,
        best_score: usize,
        remaining_budget: u64,
        open_nodes: usize,
    ) -> Self {
        Self {
            depth,
            partial_score,
            num_candidates,
            best_score,
            remaining_budget,
            open_nodes,
        }
    }

    /// Depth of the current node; the root has depth zero.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of items in the partial solution of the current node.
    #[inline]
    pub fn partial_score(&self) -> usize {
        self.partial_score
    }

    /// Number of undecided candidates at the current node.
    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    /// Score of the incumbent.
    #[inline]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Node visits left before the search stops.
    #[inline]
    pub fn remaining_budget(&self) -> u64 {
        self.remaining_budget
    }

    /// Nodes waiting on the work stack.
    #[inline]
    pub fn open_nodes(&self) -> usize {
        self.open_nodes
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(depth: {}, partial: {}, candidates: {}, best: {}, budget: {}, open: {})",
            self.depth,
            self.partial_score,
            self.num_candidates,
            self.best_score,
            self.remaining_budget,
            self.open_nodes
        )
    }
}
