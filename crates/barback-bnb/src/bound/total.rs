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

use crate::bound::{BoundContext, PruningBound};

/// The trivial bound: every remaining candidate could be added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TotalBound;

impl TotalBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl PruningBound for TotalBound {
    #[inline]
    fn name(&self) -> &'static str {
        "TotalBound"
    }

    #[inline]
    fn upper_increment(&mut self, ctx: &BoundContext<'_>) -> usize {
        ctx.candidates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::test_support::Fixture;

    #[test]
    fn test_counts_candidates() {
        let fx = Fixture::new(&[&["a"], &["b"], &["a", "b", "c"]], &[], 2);
        // The three-element item is filtered out by the fixture.
        assert_eq!(TotalBound::new().upper_increment(&fx.ctx()), 2);
    }
}
