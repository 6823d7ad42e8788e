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

use crate::index::{ElementIndex, ItemIndex};
use barback_core::set::ElementSet;
use rustc_hash::FxHashMap;

/// Errors raised while assembling a `Model`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The item has no elements. Such an item would be a subset of every
    /// partial union and is therefore rejected up front.
    EmptyItem {
        /// The label of the rejected item.
        label: String,
    },
    /// The item refers to an element position that was never interned.
    UnknownElement {
        /// The label of the rejected item.
        label: String,
        /// The offending element position.
        element: usize,
    },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyItem { label } => write!(f, "Item '{}' has no elements", label),
            Self::UnknownElement { label, element } => write!(
                f,
                "Item '{}' refers to unknown element position {}",
                label, element
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// The immutable collection of items the solver optimizes over.
///
/// - `items[item]`: the element set of each item. Items are pairwise distinct.
/// - `item_labels[item]`: the label the item was added under (first label wins
///   when duplicates were collapsed).
/// - `element_labels[element]`: the interned element labels.
///
/// Item positions are the stable enumeration order used for deterministic
/// tie-breaking during search.
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build`.
#[derive(Clone, Default)]
pub struct Model {
    items: Vec<ElementSet>,
    item_labels: Vec<String>,
    element_labels: Vec<String>,
}

impl Model {
    /// Returns the number of (distinct) items.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use barback_model::model::ModelBuilder;
    /// let mut builder = ModelBuilder::new();
    /// builder.add_item("Daiquiri", ["rum", "lime", "sugar"]).unwrap();
    /// builder.add_item("Mojito", ["rum", "lime", "sugar", "mint"]).unwrap();
    /// let model = builder.build();
    /// assert_eq!(model.num_items(), 2);
    /// assert_eq!(model.num_elements(), 4);
    /// ```
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of interned elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.element_labels.len()
    }

    /// Returns `true` if the model holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the element sets of all items, indexed by item position.
    #[inline]
    pub fn items(&self) -> &[ElementSet] {
        &self.items
    }

    /// Returns the element set of `item`.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not within `0..num_items()`.
    #[inline]
    pub fn item(&self, item: ItemIndex) -> &ElementSet {
        let index = item.get();
        assert!(
            index < self.items.len(),
            "called `Model::item` with item index out of bounds: the len is {} but the index is {}",
            self.items.len(),
            index
        );
        &self.items[index]
    }

    /// Returns the label of `item`.
    ///
    /// # Panics
    ///
    /// Panics if `item` is not within `0..num_items()`.
    #[inline]
    pub fn item_label(&self, item: ItemIndex) -> &str {
        &self.item_labels[item.get()]
    }

    /// Returns the label of `element`.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not within `0..num_elements()`.
    #[inline]
    pub fn element_label(&self, element: ElementIndex) -> &str {
        &self.element_labels[element.get()]
    }

    /// Iterates over all item indices in enumeration order.
    #[inline]
    pub fn item_indices(&self) -> impl DoubleEndedIterator<Item = ItemIndex> + ExactSizeIterator {
        ItemIndex::range(self.items.len())
    }

    /// Iterates over the elements of `item` as typed indices.
    #[inline]
    pub fn elements_of(&self, item: ItemIndex) -> impl Iterator<Item = ElementIndex> + '_ {
        self.item(item).iter().map(ElementIndex::new)
    }

    /// Returns the union of the element sets of `items`.
    pub fn union_of<I>(&self, items: I) -> ElementSet
    where
        I: IntoIterator<Item = ItemIndex>,
    {
        let mut union = ElementSet::new();
        for item in items {
            union.union_with(self.item(item));
        }
        union
    }

    /// Returns the largest number of elements any single item has.
    #[inline]
    pub fn max_item_len(&self) -> usize {
        self.items.iter().map(ElementSet::len).max().unwrap_or(0)
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("num_items", &self.num_items())
            .field("num_elements", &self.num_elements())
            .finish()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(items: {}, elements: {})",
            self.num_items(),
            self.num_elements()
        )
    }
}

/// A mutable builder that interns element labels and collapses duplicate items.
#[derive(Clone, Default)]
pub struct ModelBuilder {
    items: Vec<ElementSet>,
    item_labels: Vec<String>,
    element_labels: Vec<String>,
    element_lookup: FxHashMap<String, ElementIndex>,
    item_lookup: FxHashMap<ElementSet, ItemIndex>,
}

impl ModelBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with room for `num_items` items.
    #[inline]
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            items: Vec::with_capacity(num_items),
            item_labels: Vec::with_capacity(num_items),
            item_lookup: FxHashMap::with_capacity_and_hasher(num_items, Default::default()),
            ..Self::default()
        }
    }

    /// Returns the number of distinct items added so far.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of interned elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.element_labels.len()
    }

    /// Returns the index for the element `label`, interning it on first use.
    pub fn intern_element(&mut self, label: &str) -> ElementIndex {
        if let Some(&index) = self.element_lookup.get(label) {
            return index;
        }
        let index = ElementIndex::new(self.element_labels.len());
        self.element_labels.push(label.to_owned());
        self.element_lookup.insert(label.to_owned(), index);
        index
    }

    /// Adds an item named `label` made of the given element labels.
    ///
    /// Returns the index of the item. If an item with the same element set was
    /// added before, its index is returned and its label is kept.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyItem` if `elements` yields nothing.
    pub fn add_item<L, I, S>(&mut self, label: L, elements: I) -> Result<ItemIndex, ModelError>
    where
        L: Into<String>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: ElementSet = elements
            .into_iter()
            .map(|e| self.intern_element(e.as_ref()).get())
            .collect();
        self.insert_item(label.into(), set)
    }

    /// Adds an item from an already interned element set.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::EmptyItem` for an empty set and
    /// `ModelError::UnknownElement` if a position was never interned.
    pub fn add_item_set<L>(&mut self, label: L, elements: ElementSet) -> Result<ItemIndex, ModelError>
    where
        L: Into<String>,
    {
        let label = label.into();
        if let Some(element) = elements.iter().find(|&e| e >= self.element_labels.len()) {
            return Err(ModelError::UnknownElement { label, element });
        }
        self.insert_item(label, elements)
    }

    fn insert_item(&mut self, label: String, set: ElementSet) -> Result<ItemIndex, ModelError> {
        if set.is_empty() {
            return Err(ModelError::EmptyItem { label });
        }
        if let Some(&existing) = self.item_lookup.get(&set) {
            return Ok(existing);
        }
        let index = ItemIndex::new(self.items.len());
        self.item_lookup.insert(set.clone(), index);
        self.items.push(set);
        self.item_labels.push(label);
        Ok(index)
    }

    /// Finalizes the builder into an immutable `Model`.
    #[inline]
    pub fn build(self) -> Model {
        Model {
            items: self.items,
            item_labels: self.item_labels,
            element_labels: self.element_labels,
        }
    }
}

impl std::fmt::Debug for ModelBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBuilder")
            .field("num_items", &self.num_items())
            .field("num_elements", &self.num_elements())
            .finish()
    }
}
