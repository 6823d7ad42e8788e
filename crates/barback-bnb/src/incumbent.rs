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

//! Incumbent bookkeeping for the coverage search
//!
//! `Incumbent` holds the best partial solution seen so far and its score. It
//! is owned by the search session and updated on the single control path, so
//! no synchronization is involved.
//!
//! Highlights
//! - `try_improve` installs a candidate only if its score is *strictly*
//!   greater. Ties keep the earlier find, which makes the result independent of
//!   how many equally good solutions the search happens to visit.
//! - The score never decreases over the lifetime of an `Incumbent`.
//! - The solution is built lazily, so rejected candidates cost nothing.

use barback_model::solution::Solution;

/// The best solution found so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Incumbent {
    solution: Solution,
}

impl Incumbent {
    /// Creates an incumbent holding the empty solution (score zero).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the score of the incumbent.
    #[inline]
    pub fn score(&self) -> usize {
        self.solution.score()
    }

    /// Returns the incumbent solution.
    #[inline]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Consumes the incumbent and returns its solution.
    #[inline]
    pub fn into_solution(self) -> Solution {
        self.solution
    }

    /// Installs the solution produced by `build` if `score` beats the incumbent.
    ///
    /// Returns the installed solution, or `None` if `score` is not strictly
    /// greater than the current score.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the built solution's score differs from `score`.
    #[inline]
    pub fn try_improve<F>(&mut self, score: usize, build: F) -> Option<&Solution>
    where
        F: FnOnce() -> Solution,
    {
        if score <= self.score() {
            return None;
        }
        let solution = build();
        debug_assert_eq!(
            solution.score(),
            score,
            "called `Incumbent::try_improve` with a score that does not match the built solution"
        );
        self.solution = solution;
        Some(&self.solution)
    }
}

impl std::fmt::Display for Incumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(score: {})", self.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barback_core::set::ElementSet;
    use barback_model::index::ItemIndex;

    fn solution(items: &[usize]) -> Solution {
        let items: Vec<ItemIndex> = items.iter().map(|&i| ItemIndex::new(i)).collect();
        Solution::from_parts(items, ElementSet::new())
    }

    #[test]
    fn test_starts_empty() {
        let inc = Incumbent::new();
        assert_eq!(inc.score(), 0);
        assert!(inc.solution().is_empty());
        assert_eq!(format!("{}", inc), "Incumbent(score: 0)");
    }

    #[test]
    fn test_only_strict_improvements_are_installed() {
        let mut inc = Incumbent::new();
        assert!(inc.try_improve(0, || solution(&[])).is_none());
        assert!(inc.try_improve(2, || solution(&[0, 1])).is_some());
        assert_eq!(inc.score(), 2);

        // A tie must not replace the earlier find, and must not even build it.
        let mut built = false;
        assert!(
            inc.try_improve(2, || {
                built = true;
                solution(&[2, 3])
            })
            .is_none()
        );
        assert!(!built);
        assert_eq!(inc.solution().items(), &[ItemIndex::new(0), ItemIndex::new(1)]);

        assert!(inc.try_improve(1, || solution(&[4])).is_none());
        assert_eq!(inc.score(), 2);

        let installed = inc.try_improve(3, || solution(&[1, 2, 3])).map(Solution::score);
        assert_eq!(installed, Some(3));
        assert_eq!(inc.into_solution().score(), 3);
    }
}
