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

//! # Barback Model
//!
//! **The domain model of the ingredient-shelf problem.**
//!
//! A *collection* of distinct *items* (cocktails) is drawn from a shared
//! universe of *elements* (ingredients). The solver looks for the largest
//! sub-collection whose combined elements fit into an element budget.
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed `ItemIndex` and `ElementIndex`.
//! * **`model`**: The immutable `Model` consumed by the solver and the
//!   `ModelBuilder` that interns element labels and collapses duplicate items.
//! * **`solution`**: The selected sub-collection with its element union and score.
//! * **`loading`**: CSV ingestion (`label,element,element,...`) into a `Model`.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Items and elements live in distinct index domains.
//! 2.  **Structural identity**: An item *is* its element set. Two rows with the
//!     same elements are the same item.
//! 3.  **Fail-Fast**: Items without elements are rejected when they are added,
//!     so the solver never sees an item that every partial solution would cover
//!     for free.

pub mod index;
pub mod loading;
pub mod model;
pub mod solution;
