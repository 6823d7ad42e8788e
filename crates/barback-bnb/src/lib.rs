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

//! Barback‑BnB: branch‑and‑bound for budgeted item coverage
//!
//! High‑level crate that implements a deterministic, anytime BnB solver that
//! picks the largest sub‑collection of items whose combined elements stay
//! within an element budget (the cocktails a shelf of `max_size` ingredients
//! can make). The solver separates precomputation, pruning bounds, branching,
//! and monitoring so strategies can be swapped without touching the search loop.
//!
//! Core flow
//! - Provide a `barback_model::model::Model`.
//! - Choose a `branching::BranchingRule` (defaults to minimum amortized cost).
//! - Choose a `bound::BoundSet` (total → singleton → concentration by default).
//! - Optionally attach monitors for logging, time limits, or interrupts.
//! - Run `bnb::BnbSolver` with a `bnb::SolverConfig`.
//!
//! Design highlights
//! - Explicit LIFO work stack instead of native recursion; each popped node
//!   costs one unit of search budget.
//! - Include/exclude branching with a forbidden set, so an excluded item is
//!   never re‑admitted as covered further down the path.
//! - Anytime: an exhausted budget returns the best solution found so far.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `bound`: admissible upper bounds on the achievable additional score.
//! - `branching`: rules that pick the item to branch on.
//! - `incumbent`: best‑known solution bookkeeping.
//! - `monitor`: tree‑search monitors (log, composite, limits).
//! - `profile`: per‑item statistics computed once per solve.
//! - `result`: solver outcomes with termination reasons.
//! - `state`: read‑only snapshot of the search handed to monitors.
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod bound;
pub mod branching;
pub mod incumbent;
pub mod monitor;
pub mod profile;
pub mod result;
mod stack;
pub mod state;
pub mod stats;
