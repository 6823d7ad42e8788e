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

//! Amortized cost bound.
//!
//! Summed over any feasible solution, the minimum amortized costs of its items
//! never exceed the number of distinct elements it uses, and hence never exceed
//! `max_size`. The partial solution has already spent its own share, so the
//! candidates must fit into what is left. Taking the cheapest candidates first
//! gives the largest number that can possibly fit.
//!
//! Costs are floating point sums of reciprocals; a small tolerance keeps the
//! bound admissible when a solution hits the budget exactly.

use crate::bound::{BoundContext, PruningBound};
use barback_model::index::ItemIndex;

const TOLERANCE: f64 = 1e-9;

/// Packs the cheapest candidates into the remaining amortized budget.
#[derive(Clone, Debug, Default)]
pub struct AmortizedCostBound {
    scratch_costs: Vec<f64>,
}

impl AmortizedCostBound {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PruningBound for AmortizedCostBound {
    #[inline]
    fn name(&self) -> &'static str {
        "AmortizedCostBound"
    }

    fn upper_increment(&mut self, ctx: &BoundContext<'_>) -> usize {
        let spent: f64 = ctx
            .partial
            .ones()
            .map(|p| ctx.profile.min_amortized_cost(ItemIndex::new(p)))
            .sum();
        let budget = ctx.max_size as f64 - spent + TOLERANCE;

        self.scratch_costs.clear();
        self.scratch_costs.extend(
            ctx.candidates
                .iter()
                .map(|&c| ctx.profile.min_amortized_cost(c)),
        );
        self.scratch_costs.sort_unstable_by(f64::total_cmp);

        let mut total = 0.0;
        let mut upper_increment = 0;
        for &cost in &self.scratch_costs {
            total += cost;
            if total > budget {
                break;
            }
            upper_increment += 1;
        }
        upper_increment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound::test_support::Fixture;

    #[test]
    fn test_unique_items_cost_one_each() {
        let fx = Fixture::new(&[&["a"], &["b"], &["c"]], &[], 2);
        assert_eq!(AmortizedCostBound::new().upper_increment(&fx.ctx()), 2);
    }

    #[test]
    fn test_shared_elements_are_cheap() {
        // Costs: {a,b} = 4/3, {a,c} = 4/3, {a} = 1/3. Only two fit into 2.
        let fx = Fixture::new(&[&["a", "b"], &["a", "c"], &["a"]], &[], 2);
        assert_eq!(AmortizedCostBound::new().upper_increment(&fx.ctx()), 2);
    }

    #[test]
    fn test_exact_fit_is_not_lost_to_rounding() {
        // Three items sharing three elements pairwise cost 1 each; all three fit
        // exactly into a budget of three.
        let fx = Fixture::new(&[&["a", "b"], &["b", "c"], &["a", "c"]], &[], 3);
        assert_eq!(AmortizedCostBound::new().upper_increment(&fx.ctx()), 3);
    }

    #[test]
    fn test_partial_spends_budget() {
        // Partial {x} costs 1, leaving 1 for the unique candidates.
        let fx = Fixture::new(&[&["x"], &["a"], &["b"]], &[0], 2);
        assert_eq!(AmortizedCostBound::new().upper_increment(&fx.ctx()), 1);
    }
}
