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

use crate::profile::ItemProfile;
use barback_model::{index::ItemIndex, model::Model};

/// Chooses the item to branch on.
pub trait BranchingRule {
    /// Returns the name of the rule.
    fn name(&self) -> &str;

    /// Picks one of `candidates`, or `None` if there are none.
    ///
    /// `candidates` are in ascending index order. Implementations that break
    /// ties must do so deterministically for a reproducible search.
    fn select(
        &mut self,
        model: &Model,
        profile: &ItemProfile,
        candidates: &[ItemIndex],
    ) -> Option<ItemIndex>;
}

impl std::fmt::Debug for dyn BranchingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BranchingRule({})", self.name())
    }
}

impl std::fmt::Display for dyn BranchingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BranchingRule({})", self.name())
    }
}

impl<R> BranchingRule for &mut R
where
    R: BranchingRule + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn select(
        &mut self,
        model: &Model,
        profile: &ItemProfile,
        candidates: &[ItemIndex],
    ) -> Option<ItemIndex> {
        (**self).select(model, profile, candidates)
    }
}

impl<R> BranchingRule for Box<R>
where
    R: BranchingRule + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn select(
        &mut self,
        model: &Model,
        profile: &ItemProfile,
        candidates: &[ItemIndex],
    ) -> Option<ItemIndex> {
        (**self).select(model, profile, candidates)
    }
}
