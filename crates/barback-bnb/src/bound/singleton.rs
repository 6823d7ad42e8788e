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

//! Singleton bound.
//!
//! An item with `min_cover == 1` owns an element that no other item in the
//! collection uses. Adding it therefore consumes at least one unit of the
//! remaining element budget that nobody else can share, so at most
//! `remaining_budget` of those items can be added. The other candidates are
//! counted optimistically.

use crate::bound::{BoundContext, PruningBound};

/// Caps the candidates with unique elements at the remaining element budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingletonBound;

impl SingletonBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl PruningBound for SingletonBound {
    #[inline]
    fn name(&self) -> &'static str {
        "SingletonBound"
    }

    fn upper_increment(&mut self, ctx: &BoundContext<'_>) -> usize {
        let unique = ctx
            .candidates
            .iter()
            .filter(|&&c| ctx.profile.has_unique_element(c))
            .count();
        ctx.candidates.len() - unique + unique.min(ctx.remaining_budget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::test_support::Fixture;

    #[test]
    fn test_disjoint_singletons_are_capped_by_budget() {
        let fx = Fixture::new(&[&["a"], &["b"], &["c"], &["d"]], &[], 2);
        assert_eq!(SingletonBound::new().upper_increment(&fx.ctx()), 2);
    }

    #[test]
    fn test_shared_items_count_fully() {
        // Every element is used at least twice, so nothing is capped.
        let fx = Fixture::new(&[&["a", "b"], &["b", "c"], &["a", "c"]], &[], 2);
        assert_eq!(SingletonBound::new().upper_increment(&fx.ctx()), 3);
    }

    #[test]
    fn test_budget_shrinks_with_partial() {
        // Partial uses `x`; one unit of budget is left for the three uniques.
        let fx = Fixture::new(&[&["x"], &["a"], &["b"], &["c"]], &[0], 2);
        assert_eq!(SingletonBound::new().upper_increment(&fx.ctx()), 1);
    }
}
