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

use crate::generator::err::GenConfigBuildError;
use seat_alloc_core::space::GroupSize;

/// Validated configuration for [`super::InstanceGenerator`].
///
/// Describes a rectangular grid venue (`num_rows` x `row_len`, physical
/// seat spacing `seat_pitch` within a row and `row_pitch` between rows,
/// stage centered in front of row 0) and the random group queue drawn
/// against it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
    num_rows: usize,
    row_len: usize,
    seat_pitch: f64,
    row_pitch: f64,
    accessible_seats: Vec<(usize, usize)>,
    num_groups: usize,
    min_group_size: GroupSize,
    max_group_size: GroupSize,
    min_distance: f64,
    accessibility_rate: f64,
    seed: u64,
}

impl GenConfig {
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    #[inline]
    pub fn seat_pitch(&self) -> f64 {
        self.seat_pitch
    }

    #[inline]
    pub fn row_pitch(&self) -> f64 {
        self.row_pitch
    }

    #[inline]
    pub fn accessible_seats(&self) -> &[(usize, usize)] {
        &self.accessible_seats
    }

    #[inline]
    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    #[inline]
    pub fn min_group_size(&self) -> GroupSize {
        self.min_group_size
    }

    #[inline]
    pub fn max_group_size(&self) -> GroupSize {
        self.max_group_size
    }

    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    #[inline]
    pub fn accessibility_rate(&self) -> f64 {
        self.accessibility_rate
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfigBuilder::new()
            .build()
            .expect("default generator config is valid")
    }
}

/// Builder for [`GenConfig`].
#[derive(Debug, Clone)]
pub struct GenConfigBuilder {
    num_rows: usize,
    row_len: usize,
    seat_pitch: f64,
    row_pitch: f64,
    accessible_rows: Vec<usize>,
    accessible_seats: Vec<(usize, usize)>,
    num_groups: usize,
    min_group_size: GroupSize,
    max_group_size: GroupSize,
    min_distance: f64,
    accessibility_rate: f64,
    seed: u64,
}

impl Default for GenConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GenConfigBuilder {
    pub fn new() -> Self {
        Self {
            num_rows: 5,
            row_len: 10,
            seat_pitch: 1.0,
            row_pitch: 1.0,
            accessible_rows: Vec::new(),
            accessible_seats: Vec::new(),
            num_groups: 10,
            min_group_size: GroupSize::new(1),
            max_group_size: GroupSize::new(6),
            min_distance: 1.5,
            accessibility_rate: 0.1,
            seed: 42,
        }
    }

    pub fn num_rows(mut self, v: usize) -> Self {
        self.num_rows = v;
        self
    }

    pub fn row_len(mut self, v: usize) -> Self {
        self.row_len = v;
        self
    }

    pub fn seat_pitch(mut self, v: f64) -> Self {
        self.seat_pitch = v;
        self
    }

    pub fn row_pitch(mut self, v: f64) -> Self {
        self.row_pitch = v;
        self
    }

    /// Marks every seat of `row` as accessible.
    pub fn accessible_row(mut self, row: usize) -> Self {
        self.accessible_rows.push(row);
        self
    }

    /// Marks a single seat as accessible.
    pub fn accessible_seat(mut self, row: usize, seat: usize) -> Self {
        self.accessible_seats.push((row, seat));
        self
    }

    pub fn num_groups(mut self, v: usize) -> Self {
        self.num_groups = v;
        self
    }

    pub fn group_size_range(mut self, min: GroupSize, max: GroupSize) -> Self {
        self.min_group_size = min;
        self.max_group_size = max;
        self
    }

    pub fn min_distance(mut self, v: f64) -> Self {
        self.min_distance = v;
        self
    }

    pub fn accessibility_rate(mut self, v: f64) -> Self {
        self.accessibility_rate = v;
        self
    }

    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<GenConfig, GenConfigBuildError> {
        if self.num_rows == 0 {
            return Err(GenConfigBuildError::ZeroRows);
        }
        if self.row_len == 0 {
            return Err(GenConfigBuildError::ZeroRowLength);
        }
        for &pitch in &[self.seat_pitch, self.row_pitch] {
            if !pitch.is_finite() || pitch <= 0.0 {
                return Err(GenConfigBuildError::InvalidPitch { value: pitch });
            }
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(GenConfigBuildError::InvalidMinDistance {
                value: self.min_distance,
            });
        }
        if self.min_group_size.is_zero() || self.min_group_size > self.max_group_size {
            return Err(GenConfigBuildError::InvalidSizeRange {
                min: self.min_group_size,
                max: self.max_group_size,
            });
        }
        if !self.accessibility_rate.is_finite()
            || !(0.0..=1.0).contains(&self.accessibility_rate)
        {
            return Err(GenConfigBuildError::InvalidAccessibilityRate {
                value: self.accessibility_rate,
            });
        }

        let mut accessible_seats = self.accessible_seats;
        for &row in &self.accessible_rows {
            for seat in 0..self.row_len {
                accessible_seats.push((row, seat));
            }
        }
        accessible_seats.sort_unstable();
        accessible_seats.dedup();
        for &(row, seat) in &accessible_seats {
            if row >= self.num_rows || seat >= self.row_len {
                return Err(GenConfigBuildError::AccessibleSeatOutOfBounds { row, seat });
            }
        }

        Ok(GenConfig {
            num_rows: self.num_rows,
            row_len: self.row_len,
            seat_pitch: self.seat_pitch,
            row_pitch: self.row_pitch,
            accessible_seats,
            num_groups: self.num_groups,
            min_group_size: self.min_group_size,
            max_group_size: self.max_group_size,
            min_distance: self.min_distance,
            accessibility_rate: self.accessibility_rate,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let config = GenConfig::default();
        assert_eq!(config.num_rows(), 5);
        assert_eq!(config.row_len(), 10);
        assert_eq!(config.max_group_size(), GroupSize::new(6));
    }

    #[test]
    fn test_zero_rows_rejected() {
        assert_eq!(
            GenConfigBuilder::new().num_rows(0).build(),
            Err(GenConfigBuildError::ZeroRows)
        );
    }

    #[test]
    fn test_bad_size_range_rejected() {
        let err = GenConfigBuilder::new()
            .group_size_range(GroupSize::new(4), GroupSize::new(2))
            .build();
        assert!(matches!(
            err,
            Err(GenConfigBuildError::InvalidSizeRange { .. })
        ));
    }

    #[test]
    fn test_bad_rate_rejected() {
        assert!(matches!(
            GenConfigBuilder::new().accessibility_rate(1.5).build(),
            Err(GenConfigBuildError::InvalidAccessibilityRate { .. })
        ));
    }

    #[test]
    fn test_accessible_row_expands_and_dedups() {
        let config = GenConfigBuilder::new()
            .num_rows(2)
            .row_len(3)
            .accessible_row(0)
            .accessible_seat(0, 1)
            .build()
            .unwrap();
        assert_eq!(config.accessible_seats(), &[(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_accessible_seat_out_of_bounds_rejected() {
        assert!(matches!(
            GenConfigBuilder::new()
                .num_rows(2)
                .row_len(3)
                .accessible_seat(2, 0)
                .build(),
            Err(GenConfigBuildError::AccessibleSeatOutOfBounds { row: 2, seat: 0 })
        ));
    }
}
