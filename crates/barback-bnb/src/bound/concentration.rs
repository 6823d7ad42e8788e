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

//! Concentration bound.
//!
//! If all candidates were added, the partial solution would use
//! `|∪candidates ∪ partial_elements|` elements, which exceeds `max_size` by
//! some excess. In the best case that excess is concentrated in the candidates
//! that bring the most new elements. The bound drops candidates in descending
//! order of `|item − partial_elements|` until the dropped elements cover the
//! excess, and counts the rest.

use crate::bound::{BoundContext, PruningBound};
use barback_core::set::ElementSet;

/// Assumes the excess elements concentrate in as few candidates as possible.
#[derive(Clone, Debug, Default)]
pub struct ConcentrationBound {
    scratch_union: ElementSet,
    scratch_increases: Vec<usize>,
}

impl ConcentrationBound {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PruningBound for ConcentrationBound {
    #[inline]
    fn name(&self) -> &'static str {
        "ConcentrationBound"
    }

    fn upper_increment(&mut self, ctx: &BoundContext<'_>) -> usize {
        self.scratch_union.clone_from(ctx.partial_elements);
        self.scratch_increases.clear();
        for &c in ctx.candidates {
            let item = ctx.model.item(c);
            self.scratch_union.union_with(item);
            self.scratch_increases
                .push(item.difference_len(ctx.partial_elements));
        }

        let mut excess = self.scratch_union.len() as isize - ctx.max_size as isize;
        if excess <= 0 {
            return ctx.candidates.len();
        }

        self.scratch_increases.sort_unstable_by(|a, b| b.cmp(a));

        let mut upper_increment = ctx.candidates.len();
        for &increase in &self.scratch_increases {
            if excess <= 0 {
                break;
            }
            upper_increment -= 1;
            excess -= increase as isize;
        }
        upper_increment
    }
}
