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

use seat_alloc_core::space::GroupSize;
use std::fmt::Display;

/// An instance generation config failed validation at build time.
#[derive(Debug, Clone, PartialEq)]
pub enum GenConfigBuildError {
    ZeroRows,
    ZeroRowLength,
    InvalidPitch { value: f64 },
    InvalidMinDistance { value: f64 },
    InvalidSizeRange { min: GroupSize, max: GroupSize },
    InvalidAccessibilityRate { value: f64 },
    AccessibleSeatOutOfBounds { row: usize, seat: usize },
}

impl Display for GenConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenConfigBuildError::ZeroRows => write!(f, "instance needs at least one row"),
            GenConfigBuildError::ZeroRowLength => {
                write!(f, "instance needs at least one seat per row")
            }
            GenConfigBuildError::InvalidPitch { value } => {
                write!(f, "seat/row pitch {} must be finite and > 0", value)
            }
            GenConfigBuildError::InvalidMinDistance { value } => {
                write!(f, "minimum distance {} must be finite and >= 0", value)
            }
            GenConfigBuildError::InvalidSizeRange { min, max } => {
                write!(f, "invalid group size range [{}, {}]", min, max)
            }
            GenConfigBuildError::InvalidAccessibilityRate { value } => {
                write!(f, "accessibility rate {} must lie in [0, 1]", value)
            }
            GenConfigBuildError::AccessibleSeatOutOfBounds { row, seat } => {
                write!(
                    f,
                    "accessible seat (row {}, seat {}) lies outside the instance grid",
                    row, seat
                )
            }
        }
    }
}

impl std::error::Error for GenConfigBuildError {}
