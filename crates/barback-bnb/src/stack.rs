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

//! Explicit work stack for the include/exclude traversal.
//!
//! Every `SearchNode` owns the sets it needs, so sibling branches never observe
//! each other's changes. The solver pushes the exclude child before the include
//! child; LIFO order then explores the include branch first, which matches a
//! depth‑first recursion that calls include before exclude.

use barback_core::set::ElementSet;
use barback_model::index::ItemIndex;
use fixedbitset::FixedBitSet;

/// A pending node of the search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchNode {
    /// Undecided items, ascending.
    pub candidates: Vec<ItemIndex>,
    /// Items committed along the path.
    pub partial: FixedBitSet,
    /// Number of items in `partial`.
    pub partial_len: usize,
    /// Union of the elements of `partial`.
    pub partial_elements: ElementSet,
    /// Items excluded along the path.
    pub forbidden: FixedBitSet,
    /// Distance from the root.
    pub depth: usize,
}

impl SearchNode {
    /// Creates the root node over `num_items` items with all of them as candidates.
    #[inline]
    pub fn root(num_items: usize) -> Self {
        Self {
            candidates: ItemIndex::range(num_items).collect(),
            partial: FixedBitSet::with_capacity(num_items),
            partial_len: 0,
            partial_elements: ElementSet::new(),
            forbidden: FixedBitSet::with_capacity(num_items),
            depth: 0,
        }
    }
}

/// A LIFO stack of pending search nodes.
///
/// Performance notes:
/// - `preallocated` avoids reallocations for the expected depth.
/// - `reset` clears the nodes but keeps the allocation for the next solve.
#[derive(Clone, Debug, Default)]
pub struct SearchStack {
    entries: Vec<SearchNode>,
    peak_len: usize,
}

impl SearchStack {
    /// Creates a new, empty `SearchStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            peak_len: 0,
        }
    }

    /// Creates a `SearchStack` with room for the nodes of a search over
    /// `num_items` items. A depth‑first traversal keeps at most one pending
    /// sibling per level plus the current child.
    #[inline]
    pub fn preallocated(num_items: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_items.saturating_add(1)),
            peak_len: 0,
        }
    }

    /// Ensures the stack has capacity for a search over `num_items` items.
    #[inline]
    pub fn ensure_capacity(&mut self, num_items: usize) {
        let capacity = num_items.saturating_add(1);
        if self.entries.capacity() < capacity {
            self.entries.reserve(capacity - self.entries.len());
        }
    }

    /// Returns the number of pending nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no nodes are pending (search exhausted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the largest number of nodes pending at once since the last reset.
    #[inline]
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }

    /// Pushes a node.
    #[inline]
    pub fn push(&mut self, node: SearchNode) {
        self.entries.push(node);
        self.peak_len = self.peak_len.max(self.entries.len());
    }

    /// Pops the most recently pushed node.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.entries.pop()
    }

    /// Clears all nodes, but keeps allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.peak_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(depth: usize) -> SearchNode {
        SearchNode {
            depth,
            ..SearchNode::default()
        }
    }

    #[test]
    fn test_root_holds_every_item() {
        let root = SearchNode::root(3);
        assert_eq!(
            root.candidates,
            vec![ItemIndex::new(0), ItemIndex::new(1), ItemIndex::new(2)]
        );
        assert_eq!(root.partial_len, 0);
        assert_eq!(root.partial.count_ones(..), 0);
        assert!(root.partial_elements.is_empty());
        assert_eq!(root.depth, 0);
    }

    #[test]
    fn test_lifo_order_and_peak() {
        let mut stack = SearchStack::preallocated(4);
        assert!(stack.is_empty());

        stack.push(node(1));
        stack.push(node(2));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().map(|n| n.depth), Some(2));
        stack.push(node(3));
        assert_eq!(stack.pop().map(|n| n.depth), Some(3));
        assert_eq!(stack.pop().map(|n| n.depth), Some(1));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peak_len(), 2);

        stack.reset();
        assert_eq!(stack.peak_len(), 0);
    }

    #[test]
    fn test_ensure_capacity() {
        let mut stack = SearchStack::new();
        stack.ensure_capacity(10);
        stack.push(node(0));
        stack.ensure_capacity(10);
        assert!(stack.len() == 1);
    }
}
