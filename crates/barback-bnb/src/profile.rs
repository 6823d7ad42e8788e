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

//! Per‑item statistics for bounding and branching.
//!
//! `ItemProfile` is computed once against the full collection and is read‑only
//! for the rest of the solve. It is never recomputed as candidates shrink.
//!
//! - `cardinality[e]`: the number of items containing element `e`.
//! - `min_amortized_cost[i]`: `Σ 1 / cardinality[e]` over the elements of item
//!   `i`. A lower bound on the share of the element budget the item consumes if
//!   every item sharing its elements ends up selected.
//! - `min_cover[i]`: `min cardinality[e]` over the elements of item `i`. A value
//!   of `1` means the item owns an element no other item uses.

use barback_model::{
    index::{ElementIndex, ItemIndex},
    model::Model,
};

/// Static per‑element and per‑item statistics of a `Model`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemProfile {
    cardinality: Vec<usize>,
    min_amortized_cost: Vec<f64>,
    min_cover: Vec<usize>,
}

impl ItemProfile {
    /// Computes the profile of `model`.
    ///
    /// An empty model yields empty tables.
    pub fn new(model: &Model) -> Self {
        let mut cardinality = vec![0usize; model.num_elements()];
        for item in model.items() {
            for element in item.iter() {
                cardinality[element] += 1;
            }
        }

        let mut min_amortized_cost = Vec::with_capacity(model.num_items());
        let mut min_cover = Vec::with_capacity(model.num_items());
        for item in model.items() {
            let mut cost = 0.0;
            let mut cover = usize::MAX;
            for element in item.iter() {
                let count = cardinality[element];
                cost += 1.0 / count as f64;
                cover = cover.min(count);
            }
            min_amortized_cost.push(cost);
            // Items are never empty, but keep the table well defined regardless.
            min_cover.push(if cover == usize::MAX { 0 } else { cover });
        }

        Self {
            cardinality,
            min_amortized_cost,
            min_cover,
        }
    }

    /// Returns the number of items profiled.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.min_cover.len()
    }

    /// Returns the number of elements profiled.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.cardinality.len()
    }

    /// Returns how many items contain `element`.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not within `0..num_elements()`.
    #[inline]
    pub fn cardinality(&self, element: ElementIndex) -> usize {
        let index = element.get();
        debug_assert!(
            index < self.cardinality.len(),
            "called `ItemProfile::cardinality` with element index out of bounds: the len is {} but the index is {}",
            self.cardinality.len(),
            index
        );
        self.cardinality[index]
    }

    /// Returns the minimum amortized cost of `item`.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not within `0..num_items()`.
    #[inline]
    pub fn min_amortized_cost(&self, item: ItemIndex) -> f64 {
        let index = item.get();
        debug_assert!(
            index < self.min_amortized_cost.len(),
            "called `ItemProfile::min_amortized_cost` with item index out of bounds: the len is {} but the index is {}",
            self.min_amortized_cost.len(),
            index
        );
        self.min_amortized_cost[index]
    }

    /// Returns the minimum cover count of `item`.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not within `0..num_items()`.
    #[inline]
    pub fn min_cover(&self, item: ItemIndex) -> usize {
        let index = item.get();
        debug_assert!(
            index < self.min_cover.len(),
            "called `ItemProfile::min_cover` with item index out of bounds: the len is {} but the index is {}",
            self.min_cover.len(),
            index
        );
        self.min_cover[index]
    }

    /// Returns `true` if `item` owns at least one element no other item uses.
    #[inline]
    pub fn has_unique_element(&self, item: ItemIndex) -> bool {
        self.min_cover(item) == 1
    }
}

impl std::fmt::Display for ItemProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ItemProfile(items: {}, elements: {})",
            self.num_items(),
            self.num_elements()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barback_model::model::ModelBuilder;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_profile_of_shared_elements() {
        // gin appears three times, vermouth twice, campari and tonic once.
        let mut b = ModelBuilder::new();
        let martini = b.add_item("Martini", ["gin", "vermouth"]).unwrap();
        let negroni = b.add_item("Negroni", ["gin", "vermouth", "campari"]).unwrap();
        let gin_tonic = b.add_item("Gin and Tonic", ["gin", "tonic"]).unwrap();
        let model = b.build();

        let profile = ItemProfile::new(&model);
        assert_eq!(profile.num_items(), 3);
        assert_eq!(profile.num_elements(), 4);

        assert_eq!(profile.cardinality(ElementIndex::new(0)), 3);
        assert_eq!(profile.cardinality(ElementIndex::new(1)), 2);

        assert!(approx_eq(profile.min_amortized_cost(martini), 1.0 / 3.0 + 0.5));
        assert!(approx_eq(
            profile.min_amortized_cost(negroni),
            1.0 / 3.0 + 0.5 + 1.0
        ));
        assert!(approx_eq(profile.min_amortized_cost(gin_tonic), 1.0 / 3.0 + 1.0));

        assert_eq!(profile.min_cover(martini), 2);
        assert_eq!(profile.min_cover(negroni), 1);
        assert!(profile.has_unique_element(gin_tonic));
        assert!(!profile.has_unique_element(martini));
    }

    #[test]
    fn test_profile_of_empty_model() {
        let model = ModelBuilder::new().build();
        let profile = ItemProfile::new(&model);
        assert_eq!(profile.num_items(), 0);
        assert_eq!(profile.num_elements(), 0);
        assert_eq!(format!("{}", profile), "ItemProfile(items: 0, elements: 0)");
    }
}
