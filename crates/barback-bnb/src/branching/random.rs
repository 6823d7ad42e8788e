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

//! Seeded random branching.
//!
//! Branches on a uniformly chosen candidate. The generator is a ChaCha8 stream
//! seeded from a `u64`, so two runs with the same seed over the same model make
//! the same choices. Useful as a baseline against the amortized cost rule and
//! for diversifying anytime runs with a small budget.

use crate::{branching::rule::BranchingRule, profile::ItemProfile};
use barback_model::{index::ItemIndex, model::Model};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks a uniformly random candidate.
#[derive(Clone, Debug)]
pub struct SeededRandomRule {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandomRule {
    /// Creates a rule seeded with `seed`.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the seed the rule was created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the random stream from the original seed.
    #[inline]
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

impl BranchingRule for SeededRandomRule {
    #[inline]
    fn name(&self) -> &str {
        "SeededRandomRule"
    }

    fn select(
        &mut self,
        _model: &Model,
        _profile: &ItemProfile,
        candidates: &[ItemIndex],
    ) -> Option<ItemIndex> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.random_range(0..candidates.len())])
    }
}
