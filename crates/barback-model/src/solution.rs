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

use crate::{index::ItemIndex, model::Model};
use barback_core::set::ElementSet;

/// A selected sub-collection of items.
///
/// The items are stored in ascending index order together with the union of
/// their element sets. The score of a solution is the number of items it
/// contains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    items: Vec<ItemIndex>,
    elements: ElementSet,
}

impl Solution {
    /// Creates a solution from the given items, computing their element union.
    ///
    /// Duplicate indices are removed.
    ///
    /// # Panics
    ///
    /// Panics if any index is not within `0..model.num_items()`.
    pub fn new<I>(model: &Model, items: I) -> Self
    where
        I: IntoIterator<Item = ItemIndex>,
    {
        let mut items: Vec<ItemIndex> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        let elements = model.union_of(items.iter().copied());
        Self { items, elements }
    }

    /// Creates a solution from parts that the caller already keeps consistent.
    ///
    /// `items` must be sorted and free of duplicates, and `elements` must be
    /// the union of their element sets.
    #[inline]
    pub fn from_parts(items: Vec<ItemIndex>, elements: ElementSet) -> Self {
        debug_assert!(
            items.windows(2).all(|w| w[0] < w[1]),
            "called `Solution::from_parts` with unsorted or duplicate items"
        );
        Self { items, elements }
    }

    /// Returns the empty solution.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the score: the number of selected items.
    #[inline]
    pub fn score(&self) -> usize {
        self.items.len()
    }

    /// Returns the selected items in ascending order.
    #[inline]
    pub fn items(&self) -> &[ItemIndex] {
        &self.items
    }

    /// Returns the union of the selected items' elements.
    #[inline]
    pub fn elements(&self) -> &ElementSet {
        &self.elements
    }

    /// Returns the number of distinct elements the solution uses.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the solution uses at most `max_size` elements.
    #[inline]
    pub fn is_within(&self, max_size: usize) -> bool {
        self.num_elements() <= max_size
    }

    /// Returns `true` if nothing was selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the labels of the selected items, sorted alphabetically.
    pub fn sorted_item_labels<'m>(&self, model: &'m Model) -> Vec<&'m str> {
        let mut labels: Vec<&str> = self.items.iter().map(|&i| model.item_label(i)).collect();
        labels.sort_unstable();
        labels
    }

    /// Returns the labels of the used elements, sorted alphabetically.
    pub fn sorted_element_labels<'m>(&self, model: &'m Model) -> Vec<&'m str> {
        let mut labels: Vec<&str> = self
            .elements
            .iter()
            .map(|e| model.element_label(e.into()))
            .collect();
        labels.sort_unstable();
        labels
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution(score: {}, elements: {})",
            self.score(),
            self.num_elements()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelBuilder;

    fn model() -> Model {
        let mut b = ModelBuilder::new();
        b.add_item("Old Fashioned", ["bourbon", "bitters", "sugar"])
            .unwrap();
        b.add_item("Whiskey Sour", ["bourbon", "lemon", "sugar"])
            .unwrap();
        b.add_item("Gimlet", ["gin", "lime"]).unwrap();
        b.build()
    }

    #[test]
    fn test_new_sorts_dedups_and_unions() {
        let m = model();
        let s = Solution::new(&m, [ItemIndex::new(1), ItemIndex::new(0), ItemIndex::new(1)]);
        assert_eq!(s.items(), &[ItemIndex::new(0), ItemIndex::new(1)]);
        assert_eq!(s.score(), 2);
        assert_eq!(s.num_elements(), 4);
        assert!(s.is_within(4));
        assert!(!s.is_within(3));
    }

    #[test]
    fn test_sorted_labels() {
        let m = model();
        let s = Solution::new(&m, [ItemIndex::new(1), ItemIndex::new(0)]);
        assert_eq!(
            s.sorted_item_labels(&m),
            vec!["Old Fashioned", "Whiskey Sour"]
        );
        assert_eq!(
            s.sorted_element_labels(&m),
            vec!["bitters", "bourbon", "lemon", "sugar"]
        );
    }

    #[test]
    fn test_empty_solution() {
        let s = Solution::empty();
        assert!(s.is_empty());
        assert_eq!(s.score(), 0);
        assert!(s.is_within(0));
        assert_eq!(format!("{}", s), "Solution(score: 0, elements: 0)");
    }
}
