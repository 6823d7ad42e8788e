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

//! Minimum amortized cost branching.
//!
//! Branches on the candidate with the smallest minimum amortized cost, that is
//! the item whose elements are most widely shared across the collection. Such
//! items are cheap to satisfy, so the include branch tends to find large
//! incumbents early. Ties go to the lowest item index, which keeps the search
//! fully deterministic.

use crate::{branching::rule::BranchingRule, profile::ItemProfile};
use barback_model::{index::ItemIndex, model::Model};

/// Picks the candidate with the minimum amortized cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinAmortizedCostRule;

impl MinAmortizedCostRule {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl BranchingRule for MinAmortizedCostRule {
    #[inline]
    fn name(&self) -> &str {
        "MinAmortizedCostRule"
    }

    fn select(
        &mut self,
        _model: &Model,
        profile: &ItemProfile,
        candidates: &[ItemIndex],
    ) -> Option<ItemIndex> {
        let (&first, rest) = candidates.split_first()?;
        let mut best = first;
        let mut best_cost = profile.min_amortized_cost(first);
        for &candidate in rest {
            let cost = profile.min_amortized_cost(candidate);
            // Strictly smaller only: the earliest candidate wins a tie.
            if cost < best_cost {
                best = candidate;
                best_cost = cost;
            }
        }
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barback_model::model::ModelBuilder;

    fn model() -> Model {
        let mut b = ModelBuilder::new();
        b.add_item("Mojito", ["rum", "lime", "mint"]).unwrap();
        b.add_item("Daiquiri", ["rum", "lime"]).unwrap();
        b.add_item("Cuba Libre", ["rum", "cola"]).unwrap();
        b.add_item("Rum Rickey", ["rum", "soda"]).unwrap();
        b.build()
    }

    #[test]
    fn test_picks_cheapest() {
        let m = model();
        let profile = ItemProfile::new(&m);
        let all: Vec<ItemIndex> = m.item_indices().collect();
        // Daiquiri only uses shared elements.
        assert_eq!(
            MinAmortizedCostRule::new().select(&m, &profile, &all),
            Some(ItemIndex::new(1))
        );
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let m = model();
        let profile = ItemProfile::new(&m);
        // Cuba Libre and Rum Rickey have identical costs.
        let tied = [ItemIndex::new(2), ItemIndex::new(3)];
        assert_eq!(
            MinAmortizedCostRule::new().select(&m, &profile, &tied),
            Some(ItemIndex::new(2))
        );
    }

    #[test]
    fn test_no_candidates() {
        let m = model();
        let profile = ItemProfile::new(&m);
        assert_eq!(MinAmortizedCostRule::new().select(&m, &profile, &[]), None);
    }
}
