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

use seat_alloc_core::score::Score;
use seat_alloc_model::{
    sol::{SeatStatus, StatusGrid},
    venue::Venue,
};
use std::fmt::Debug;

/// Pluggable heuristic over search states, evaluated on the seat-status
/// projection of a state so every [`crate::search::SearchSpace`]
/// implementation can share one policy.
///
/// Contract: the returned score must be dominated by `depth`: a state
/// with one more group placed must always outrank any state with fewer,
/// regardless of local seat quality. Within one depth the policy is free
/// to rank however it likes.
pub trait ScorePolicy: Debug {
    fn evaluate(&self, venue: &Venue, depth: usize, grid: &StatusGrid) -> Score;
}

/// Default policy: seats weighted by their desirability value, occupied
/// counting double, on top of a depth term that always dominates (seat
/// values are normalized to `[0, 1]`, so the per-seat sum never exceeds
/// `2 * num_seats`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatValueScorer;

impl ScorePolicy for SeatValueScorer {
    fn evaluate(&self, venue: &Venue, depth: usize, grid: &StatusGrid) -> Score {
        let mut total = 2.0 * depth as f64 * venue.num_seats() as f64;
        for (row, statuses) in venue.rows().iter().zip(grid) {
            for (seat, status) in row.seats().iter().zip(statuses) {
                match status {
                    SeatStatus::Occupied => total += 2.0 * seat.value(),
                    SeatStatus::Empty => total += seat.value(),
                    SeatStatus::Blocked => {}
                }
            }
        }
        Score::new(total)
    }
}

/// Alternative policy ranking occupied seats purely by row proximity to
/// the stage: an occupied seat in row `r` is worth `num_rows - r`, any
/// still-empty seat is worth one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowProximityScorer;

impl ScorePolicy for RowProximityScorer {
    fn evaluate(&self, venue: &Venue, depth: usize, grid: &StatusGrid) -> Score {
        let num_rows = venue.num_rows();
        let mut total = (depth * venue.num_seats() * num_rows) as f64;
        for (row_n, statuses) in grid.iter().enumerate() {
            for status in statuses {
                match status {
                    SeatStatus::Occupied => total += (num_rows - row_n) as f64,
                    SeatStatus::Empty => total += 1.0,
                    SeatStatus::Blocked => {}
                }
            }
        }
        Score::new(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seat_alloc_model::venue::{RowSpec, SeatSpec};

    fn venue_2x3() -> Venue {
        let rows = (0..2)
            .map(|r| {
                RowSpec::new(
                    format!("R{}", r),
                    (0..3)
                        .map(|s| SeatSpec::new(1.0 + s as f64, 1.0 + r as f64, false))
                        .collect(),
                )
            })
            .collect();
        Venue::new(rows, 2.0, 0.0).unwrap()
    }

    fn all_empty(venue: &Venue) -> StatusGrid {
        venue
            .rows()
            .iter()
            .map(|row| vec![SeatStatus::Empty; row.len()])
            .collect()
    }

    #[test]
    fn test_depth_dominates_seat_quality() {
        let venue = venue_2x3();
        // Best possible grid at depth 1 vs worst possible at depth 2.
        let mut best_shallow = all_empty(&venue);
        for row in &mut best_shallow {
            row.fill(SeatStatus::Occupied);
        }
        let worst_deep: StatusGrid = venue
            .rows()
            .iter()
            .map(|row| vec![SeatStatus::Blocked; row.len()])
            .collect();
        for scorer in [&SeatValueScorer as &dyn ScorePolicy, &RowProximityScorer] {
            assert!(
                scorer.evaluate(&venue, 2, &worst_deep)
                    >= scorer.evaluate(&venue, 1, &best_shallow),
                "{:?} lets seat quality outweigh depth",
                scorer
            );
        }
    }

    #[test]
    fn test_occupied_seats_beat_blocked_seats() {
        let venue = venue_2x3();
        let empty = all_empty(&venue);
        let mut occupied = empty.clone();
        occupied[0][1] = SeatStatus::Occupied;
        let mut blocked = empty.clone();
        blocked[0][1] = SeatStatus::Blocked;
        let scorer = SeatValueScorer;
        assert!(scorer.evaluate(&venue, 1, &occupied) > scorer.evaluate(&venue, 1, &blocked));
    }

    #[test]
    fn test_row_proximity_prefers_front_rows() {
        let venue = venue_2x3();
        let empty = all_empty(&venue);
        let mut front = empty.clone();
        front[0][0] = SeatStatus::Occupied;
        let mut back = empty.clone();
        back[1][0] = SeatStatus::Occupied;
        let scorer = RowProximityScorer;
        assert!(scorer.evaluate(&venue, 1, &front) > scorer.evaluate(&venue, 1, &back));
    }
}
