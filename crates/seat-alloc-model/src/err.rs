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

use seat_alloc_core::space::{GroupSize, RowIndex, SeatIndex};
use std::fmt::Display;

/// A venue description failed validation at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum VenueError {
    /// The venue declares no rows at all.
    NoRows,
    /// A row declares no seats.
    EmptyRow { row: RowIndex },
    /// A seat carries a non-finite physical coordinate.
    NonFiniteCoordinate { row: RowIndex, seat: SeatIndex },
    /// The stage center carries a non-finite coordinate.
    NonFiniteStage { x: f64, y: f64 },
}

impl Display for VenueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenueError::NoRows => write!(f, "venue has no rows"),
            VenueError::EmptyRow { row } => write!(f, "venue row {} has no seats", row),
            VenueError::NonFiniteCoordinate { row, seat } => {
                write!(f, "seat at {} {} has a non-finite coordinate", row, seat)
            }
            VenueError::NonFiniteStage { x, y } => {
                write!(f, "stage center ({}, {}) is not finite", x, y)
            }
        }
    }
}

impl std::error::Error for VenueError {}

/// A requirements object failed validation at the call boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RequirementsError {
    /// The maximum group size must be at least one.
    ZeroMaxGroupSize,
    /// The minimum distance must be finite and non-negative.
    InvalidMinDistance { value: f64 },
    /// A group of zero people cannot be placed.
    ZeroGroupSize { name: String },
    /// A group exceeds the declared maximum group size.
    GroupTooLarge {
        name: String,
        size: GroupSize,
        max: GroupSize,
    },
}

impl Display for RequirementsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequirementsError::ZeroMaxGroupSize => {
                write!(f, "maximum group size must be at least 1")
            }
            RequirementsError::InvalidMinDistance { value } => {
                write!(f, "minimum distance {} must be finite and >= 0", value)
            }
            RequirementsError::ZeroGroupSize { name } => {
                write!(f, "group '{}' has size 0", name)
            }
            RequirementsError::GroupTooLarge { name, size, max } => {
                write!(f, "group '{}' has {} exceeding {}", name, size, max)
            }
        }
    }
}

impl std::error::Error for RequirementsError {}
