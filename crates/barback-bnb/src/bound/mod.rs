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

//! Pruning bounds for the coverage search
//!
//! A pruning bound returns an upper bound on how many *more* items can still
//! be added to the current partial solution from the remaining candidates. The
//! solver prunes a node when some bound does not exceed the gap between the
//! incumbent score and the partial score, since the subtree cannot produce a
//! strictly better solution.
//!
//! Provided bounds:
//! - `total`: every candidate could be added.
//! - `singleton`: candidates owning a unique element each burn one unit of the
//!   remaining element budget.
//! - `concentration`: the excess elements concentrate in as few candidates as
//!   possible.
//! - `amortized`: candidates pay at least their minimum amortized cost out of
//!   the amortized budget left by the partial solution. Opt‑in.
//!
//! `BoundSet` evaluates bounds in insertion order and short‑circuits on the
//! first one that proves the node dominated. All bounds must be admissible
//! (never underestimate the true increment); pruning correctness depends on it.

pub mod amortized;
pub mod concentration;
pub mod singleton;
pub mod total;

use crate::profile::ItemProfile;
use amortized::AmortizedCostBound;
use barback_core::set::ElementSet;
use barback_model::{index::ItemIndex, model::Model};
use concentration::ConcentrationBound;
use fixedbitset::FixedBitSet;
use singleton::SingletonBound;
use total::TotalBound;

/// Everything a bound may look at when evaluating a search node.
///
/// `candidates` have already passed the feasibility filter, so each of them
/// fits within `max_size` together with `partial_elements`.
#[derive(Debug, Clone, Copy)]
pub struct BoundContext<'a> {
    /// The collection being searched.
    pub model: &'a Model,
    /// Static per‑item statistics of `model`.
    pub profile: &'a ItemProfile,
    /// Undecided items at this node, in ascending index order.
    pub candidates: &'a [ItemIndex],
    /// Items committed to the partial solution, as a bitset over item positions.
    pub partial: &'a FixedBitSet,
    /// Union of the elements of `partial`.
    pub partial_elements: &'a ElementSet,
    /// The element budget.
    pub max_size: usize,
}

impl BoundContext<'_> {
    /// Returns the number of elements still available to new items.
    #[inline]
    pub fn remaining_budget(&self) -> usize {
        self.max_size.saturating_sub(self.partial_elements.len())
    }
}

/// An admissible upper bound on the additional score reachable from a node.
pub trait PruningBound {
    /// Returns the name of the bound.
    fn name(&self) -> &'static str;

    /// Returns an upper bound on the number of candidates that can still be
    /// added to the partial solution.
    fn upper_increment(&mut self, ctx: &BoundContext<'_>) -> usize;
}

impl std::fmt::Debug for dyn PruningBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PruningBound({})", self.name())
    }
}

impl std::fmt::Display for dyn PruningBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PruningBound({})", self.name())
    }
}

/// The verdict of a `BoundSet` on a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundVerdict {
    /// No bound rules the node out; keep exploring.
    Explore,
    /// The bound at position `index` (named `name`) proved the node dominated.
    Prune {
        /// Position of the bound inside its `BoundSet`.
        index: usize,
        /// Name of the bound.
        name: &'static str,
    },
}

impl BoundVerdict {
    /// Returns `true` if the node should be explored further.
    #[inline]
    pub fn is_explore(&self) -> bool {
        matches!(self, BoundVerdict::Explore)
    }
}

/// An ordered collection of pruning bounds.
pub struct BoundSet {
    bounds: Vec<Box<dyn PruningBound>>,
}

impl Default for BoundSet {
    /// The three required bounds, cheapest first:
    /// total → singleton → concentration.
    fn default() -> Self {
        Self::empty()
            .with_bound(TotalBound::new())
            .with_bound(SingletonBound::new())
            .with_bound(ConcentrationBound::new())
    }
}

impl BoundSet {
    /// Creates a set without any bounds. Such a set never prunes.
    #[inline]
    pub fn empty() -> Self {
        Self { bounds: Vec::new() }
    }

    /// The default bounds followed by the amortized cost bound.
    #[inline]
    pub fn extended() -> Self {
        Self::default().with_bound(AmortizedCostBound::new())
    }

    /// Appends `bound` and returns the set.
    #[inline]
    pub fn with_bound<B>(mut self, bound: B) -> Self
    where
        B: PruningBound + 'static,
    {
        self.bounds.push(Box::new(bound));
        self
    }

    /// Appends `bound`.
    #[inline]
    pub fn add_bound<B>(&mut self, bound: B)
    where
        B: PruningBound + 'static,
    {
        self.bounds.push(Box::new(bound));
    }

    /// Returns the number of bounds.
    #[inline]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Returns `true` if the set holds no bounds.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Returns the names of the bounds in evaluation order.
    pub fn names(&self) -> Vec<&'static str> {
        self.bounds.iter().map(|b| b.name()).collect()
    }

    /// Decides whether a node can still beat the incumbent.
    ///
    /// `threshold` is `incumbent_score - partial_score`. The node is pruned by
    /// the first bound whose increment is `<= threshold`.
    pub fn keep_exploring(&mut self, ctx: &BoundContext<'_>, threshold: usize) -> BoundVerdict {
        for (index, bound) in self.bounds.iter_mut().enumerate() {
            if bound.upper_increment(ctx) <= threshold {
                return BoundVerdict::Prune {
                    index,
                    name: bound.name(),
                };
            }
        }
        BoundVerdict::Explore
    }
}

impl std::fmt::Debug for BoundSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl std::fmt::Display for BoundSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundSet({})", self.names().join(" -> "))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use barback_model::model::ModelBuilder;

    /// A node over a fixed collection, owning everything a `BoundContext` borrows.
    pub struct Fixture {
        pub model: Model,
        pub profile: ItemProfile,
        pub candidates: Vec<ItemIndex>,
        pub partial: FixedBitSet,
        pub partial_elements: ElementSet,
        pub max_size: usize,
    }

    impl Fixture {
        /// Builds a fixture whose candidates are all items not in `partial`.
        pub fn new(items: &[&[&str]], partial: &[usize], max_size: usize) -> Self {
            let mut builder = ModelBuilder::new();
            for (i, elements) in items.iter().enumerate() {
                builder
                    .add_item(format!("item{}", i), elements.iter().copied())
                    .unwrap();
            }
            let model = builder.build();
            let profile = ItemProfile::new(&model);

            let mut partial_set = FixedBitSet::with_capacity(model.num_items());
            for &p in partial {
                partial_set.insert(p);
            }
            let partial_elements = model.union_of(partial.iter().map(|&p| ItemIndex::new(p)));
            let candidates = model
                .item_indices()
                .filter(|i| !partial_set.contains(i.get()))
                .filter(|&i| model.item(i).union_len(&partial_elements) <= max_size)
                .collect();

            Self {
                model,
                profile,
                candidates,
                partial: partial_set,
                partial_elements,
                max_size,
            }
        }

        pub fn ctx(&self) -> BoundContext<'_> {
            BoundContext {
                model: &self.model,
                profile: &self.profile,
                candidates: &self.candidates,
                partial: &self.partial,
                partial_elements: &self.partial_elements,
                max_size: self.max_size,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    struct Constant(usize);

    impl PruningBound for Constant {
        fn name(&self) -> &'static str {
            "Constant"
        }

        fn upper_increment(&mut self, _ctx: &BoundContext<'_>) -> usize {
            self.0
        }
    }

    #[test]
    fn test_default_order() {
        let set = BoundSet::default();
        assert_eq!(
            set.names(),
            vec!["TotalBound", "SingletonBound", "ConcentrationBound"]
        );
        assert_eq!(BoundSet::extended().len(), 4);
        assert_eq!(
            format!("{}", BoundSet::empty().with_bound(Constant(1))),
            "BoundSet(Constant)"
        );
    }

    #[test]
    fn test_keep_exploring_short_circuits_on_first_failing_bound() {
        let fx = Fixture::new(&[&["a"], &["b"]], &[], 2);
        let mut set = BoundSet::empty()
            .with_bound(Constant(5))
            .with_bound(Constant(1))
            .with_bound(Constant(0));

        assert_eq!(
            set.keep_exploring(&fx.ctx(), 1),
            BoundVerdict::Prune {
                index: 1,
                name: "Constant"
            }
        );
        assert_eq!(
            set.keep_exploring(&fx.ctx(), 0),
            BoundVerdict::Prune {
                index: 2,
                name: "Constant"
            }
        );
        assert!(BoundSet::empty().keep_exploring(&fx.ctx(), 100).is_explore());
    }

    #[test]
    fn test_remaining_budget_saturates() {
        let fx = Fixture::new(&[&["a", "b", "c"]], &[0], 2);
        assert_eq!(fx.ctx().remaining_budget(), 0);
    }
}
