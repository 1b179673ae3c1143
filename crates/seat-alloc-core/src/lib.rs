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

//! # Seat Allocation Core (`seat-alloc-core`)
//!
//! Foundational primitives shared by the seat allocation model and solver
//! crates: strongly typed row/seat/size indexes, the [`space::Slot`]
//! candidate-placement value, a totally ordered [`score::Score`], and the
//! word-packed [`bitset::BitSetIndex`] that all slot-set algebra runs on.

use num_traits::{PrimInt, Unsigned};
use std::{fmt::Debug, hash::Hash};

pub mod bitset;
pub mod score;
pub mod space;

/// Storage word of a [`bitset::BitSetIndex`]. Any unsigned primitive
/// integer qualifies; `u64` is the default and the one the solver uses.
pub trait BitWord: PrimInt + Unsigned + Hash + Send + Sync + Debug {}
impl<T> BitWord for T where T: PrimInt + Unsigned + Hash + Send + Sync + Debug {}
