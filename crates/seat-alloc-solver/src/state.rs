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

use crate::topology::SlotSet;
use std::fmt::Display;

/// One node of the placement search: which slots are still legal to place
/// into (`empty`) and which slots have been chosen so far (`occupied`).
///
/// States are immutable values with structural equality and hash; every
/// expansion produces a fresh state sharing no storage with its parent.
/// The two sets are disjoint by construction, and `occupied` grows by
/// exactly one bit per placed group along any path from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementState {
    empty: SlotSet,
    occupied: SlotSet,
}

impl PlacementState {
    /// Builds a state from its two slot sets.
    ///
    /// # Panics
    ///
    /// Panics when the sets overlap; an overlap means the safety index is
    /// corrupt.
    pub fn new(empty: SlotSet, occupied: SlotSet) -> Self {
        assert!(
            empty.is_disjoint(&occupied),
            "placement state invariant violated: empty and occupied slot sets overlap"
        );
        Self { empty, occupied }
    }

    /// The root state over a universe of `num_slots`: everything legal,
    /// nothing occupied.
    pub fn initial(num_slots: usize) -> Self {
        Self {
            empty: SlotSet::new(num_slots, true),
            occupied: SlotSet::new(num_slots, false),
        }
    }

    #[inline]
    pub fn empty(&self) -> &SlotSet {
        &self.empty
    }

    #[inline]
    pub fn occupied(&self) -> &SlotSet {
        &self.occupied
    }

    /// Number of groups placed on the path leading to this state.
    #[inline]
    pub fn num_placed(&self) -> usize {
        self.occupied.count_ones()
    }
}

impl Display for PlacementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.empty, self.occupied)
    }
}
