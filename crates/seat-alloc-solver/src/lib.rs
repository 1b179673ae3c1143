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

//! # Seat Allocation Solver (`seat-alloc-solver`)
//!
//! The placement search engine: a best-first, backtracking state-space
//! search over seat occupancy, backed by a bitset index of legal
//! placements precomputed once per venue.
//!
//! - [`topology`]: the static precomputation ([`topology::VenueTopology`]):
//!   the slot universe and its by-size, by-seat, safety, and accessibility
//!   indexes.
//! - [`state`]: the immutable search state ([`state::PlacementState`]).
//! - [`fringe`]: the priority frontier and the visited set.
//! - [`search`]: the [`search::SearchSpace`] seam, the
//!   [`search::SearchManager`] driving the group-by-group loop with
//!   checkpoint/rollback, and solution assembly.
//! - [`indexed`]: the production bitset-indexed implementation.
//! - [`grid`]: the naive grid-scan implementation, kept conforming as a
//!   cross-check oracle.
//! - [`score`]: injectable scoring policies.

pub mod fringe;
pub mod grid;
pub mod indexed;
pub mod score;
pub mod search;
pub mod state;
pub mod topology;
