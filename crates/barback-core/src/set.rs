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

//! # Element Sets
//!
//! `ElementSet` is a growable bitset over dense element positions. It is the
//! representation of a single item (a cocktail is the set of its ingredients)
//! and of every derived union the search computes.
//!
//! ## Representation
//!
//! Bits are packed into `u64` words stored in a `SmallVec` with two inline
//! words, so sets over the first 128 elements never touch the heap. The word
//! vector is kept *normalized*: it never ends with a zero word. Two sets with
//! the same members therefore have identical words, which makes the derived
//! `PartialEq`, `Eq` and `Hash` implementations structural.
//!
//! ## Highlights
//!
//! - Allocation-free measurements: `union_len`, `difference_len` and
//!   `is_subset` never build an intermediate set.
//! - Operator sugar for `|` and `-` on references.
//! - Ascending iteration via `iter()`.

use smallvec::SmallVec;

const WORD_BITS: usize = u64::BITS as usize;

/// A set of element positions backed by a normalized bitset.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementSet {
    words: SmallVec<[u64; 2]>,
}

#[inline(always)]
const fn split(element: usize) -> (usize, u64) {
    (element / WORD_BITS, 1u64 << (element % WORD_BITS))
}

impl ElementSet {
    /// Creates a new, empty set.
    #[inline]
    pub fn new() -> Self {
        Self {
            words: SmallVec::new(),
        }
    }

    /// Creates a set holding exactly `element`.
    #[inline]
    pub fn singleton(element: usize) -> Self {
        let mut set = Self::new();
        set.insert(element);
        set
    }

    /// Inserts `element`. Returns `true` if it was not present before.
    #[inline]
    pub fn insert(&mut self, element: usize) -> bool {
        let (word, mask) = split(element);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let was_present = self.words[word] & mask != 0;
        self.words[word] |= mask;
        !was_present
    }

    /// Removes `element`. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, element: usize) -> bool {
        let (word, mask) = split(element);
        match self.words.get_mut(word) {
            Some(bits) if *bits & mask != 0 => {
                *bits &= !mask;
                self.normalize();
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if `element` is a member of the set.
    #[inline]
    pub fn contains(&self, element: usize) -> bool {
        let (word, mask) = split(element);
        self.words.get(word).is_some_and(|bits| bits & mask != 0)
    }

    /// Returns the number of elements in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        // Normalization guarantees that a non-empty word vector has a set bit.
        self.words.is_empty()
    }

    /// Removes every element while keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Returns `self ∪ other` as a new set.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.union_with(other);
        out
    }

    /// Adds every element of `other` to `self`.
    #[inline]
    pub fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (lhs, rhs) in self.words.iter_mut().zip(other.words.iter()) {
            *lhs |= *rhs;
        }
    }

    /// Returns `self \ other` as a new set.
    #[inline]
    pub fn difference(&self, other: &Self) -> Self {
        let mut words: SmallVec<[u64; 2]> = self
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| w & !other.words.get(i).copied().unwrap_or(0))
            .collect();
        while words.last() == Some(&0) {
            words.pop();
        }
        Self { words }
    }

    /// Returns `|self ∪ other|` without materializing the union.
    #[inline]
    pub fn union_len(&self, other: &Self) -> usize {
        let (long, short) = if self.words.len() >= other.words.len() {
            (&self.words, &other.words)
        } else {
            (&other.words, &self.words)
        };
        long.iter()
            .enumerate()
            .map(|(i, w)| (w | short.get(i).copied().unwrap_or(0)).count_ones() as usize)
            .sum()
    }

    /// Returns `|self \ other|` without materializing the difference.
    #[inline]
    pub fn difference_len(&self, other: &Self) -> usize {
        self.words
            .iter()
            .enumerate()
            .map(|(i, w)| (w & !other.words.get(i).copied().unwrap_or(0)).count_ones() as usize)
            .sum()
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .enumerate()
            .all(|(i, w)| w & !other.words.get(i).copied().unwrap_or(0) == 0)
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[inline]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a subset of `a ∪ b`.
    ///
    /// This is the hot test of the exclusion branch, so it avoids building the union.
    #[inline]
    pub fn is_subset_of_union(&self, a: &Self, b: &Self) -> bool {
        self.words.iter().enumerate().all(|(i, w)| {
            let covered = a.words.get(i).copied().unwrap_or(0) | b.words.get(i).copied().unwrap_or(0);
            w & !covered == 0
        })
    }

    /// Returns an iterator over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    #[inline]
    fn normalize(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl std::fmt::Debug for ElementSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl std::fmt::Display for ElementSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ElementSet(len: {})", self.len())
    }
}

impl FromIterator<usize> for ElementSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<usize> for ElementSet {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = usize>,
    {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::ops::BitOr<&ElementSet> for &ElementSet {
    type Output = ElementSet;

    #[inline]
    fn bitor(self, rhs: &ElementSet) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign<&ElementSet> for ElementSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: &ElementSet) {
        self.union_with(rhs);
    }
}

impl std::ops::Sub<&ElementSet> for &ElementSet {
    type Output = ElementSet;

    #[inline]
    fn sub(self, rhs: &ElementSet) -> Self::Output {
        self.difference(rhs)
    }
}

/// Ascending iterator over the members of an `ElementSet`.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_index * WORD_BITS + bit);
            }
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
    }
}

impl std::iter::FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn set(elements: &[usize]) -> ElementSet {
        elements.iter().copied().collect()
    }

    #[test]
    fn test_insert_contains_len() {
        let mut s = ElementSet::new();
        assert!(s.is_empty());
        assert!(s.insert(3));
        assert!(!s.insert(3));
        assert!(s.insert(200));
        assert_eq!(s.len(), 2);
        assert!(s.contains(3));
        assert!(s.contains(200));
        assert!(!s.contains(4));
        assert!(!s.contains(10_000));
    }

    #[test]
    fn test_remove_keeps_representation_normalized() {
        let mut a = set(&[1, 130]);
        assert!(a.remove(130));
        assert!(!a.remove(130));
        // After removing the only high element, equality with a freshly built set must hold.
        assert_eq!(a, set(&[1]));

        let mut hashes = HashSet::new();
        hashes.insert(a.clone());
        assert!(hashes.contains(&set(&[1])));

        assert!(a.remove(1));
        assert!(a.is_empty());
        assert_eq!(a, ElementSet::new());
    }

    #[test]
    fn test_union_and_difference() {
        let a = set(&[0, 5, 64]);
        let b = set(&[5, 7, 300]);

        let u = &a | &b;
        assert_eq!(u, set(&[0, 5, 7, 64, 300]));
        assert_eq!(a.union_len(&b), 5);
        assert_eq!(b.union_len(&a), 5);

        let d = &b - &a;
        assert_eq!(d, set(&[7, 300]));
        assert_eq!(b.difference_len(&a), 2);

        // Difference that clears the high words must stay normalized.
        let e = &set(&[1, 300]) - &set(&[300]);
        assert_eq!(e, set(&[1]));
    }

    #[test]
    fn test_subset_relations() {
        let small = set(&[1, 3]);
        let big = set(&[1, 3, 5, 100]);
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(big.is_superset(&small));
        assert!(ElementSet::new().is_subset(&small));

        let a = set(&[1]);
        let b = set(&[3, 100]);
        assert!(big.difference(&set(&[5])).is_subset_of_union(&a, &b));
        assert!(!big.is_subset_of_union(&a, &b));
    }

    #[test]
    fn test_iter_is_ascending() {
        let s = set(&[129, 2, 64, 0, 63]);
        let collected: Vec<usize> = s.iter().collect();
        assert_eq!(collected, vec![0, 2, 63, 64, 129]);
        assert_eq!(ElementSet::new().iter().next(), None);
    }

    #[test]
    fn test_debug_lists_members() {
        assert_eq!(format!("{:?}", set(&[2, 1])), "{1, 2}");
        assert_eq!(format!("{}", set(&[2, 1])), "ElementSet(len: 2)");
    }
}
