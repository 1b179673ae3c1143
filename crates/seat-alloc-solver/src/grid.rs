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

use crate::{
    indexed::DEFAULT_MAX_EXPAND,
    score::{ScorePolicy, SeatValueScorer},
    search::{AssignmentPlan, MissingSlotError, SearchSpace},
};
use seat_alloc_core::{
    score::Score,
    space::{GroupSize, RowIndex, SeatIndex, Slot},
};
use seat_alloc_model::{
    req::{Group, Requirements},
    sol::{SeatStatus, StatusGrid},
    venue::Venue,
};

/// Search state of the grid implementation: the raw per-seat statuses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridState {
    cells: Vec<Vec<SeatStatus>>,
}

impl GridState {
    #[inline]
    pub fn cells(&self) -> &[Vec<SeatStatus>] {
        &self.cells
    }
}

/// The naive [`SearchSpace`]: no precomputed indexes, just direct scans of
/// a seat-status grid. Slower by construction, but it conforms to the same
/// candidate order, branch cap, and accessibility preference as
/// [`crate::indexed::IndexedPlacement`], which makes it a useful oracle
/// for cross-checking the indexed implementation.
///
/// One representational limit: the grid cannot tell two occupied runs
/// apart once they touch, so reconciliation assumes `min_distance` is at
/// least the seat pitch (adjacent runs never arise then).
#[derive(Debug)]
pub struct GridPlacement<'v> {
    venue: &'v Venue,
    min_distance: f64,
    max_group_size: GroupSize,
    max_expand: usize,
    scorer: Box<dyn ScorePolicy>,
    reserved: Vec<Vec<bool>>,
}

impl<'v> GridPlacement<'v> {
    pub fn new(venue: &'v Venue, requirements: &Requirements) -> Self {
        Self::with_max_expand(venue, requirements, DEFAULT_MAX_EXPAND)
    }

    pub fn with_max_expand(
        venue: &'v Venue,
        requirements: &Requirements,
        max_expand: usize,
    ) -> Self {
        let reserved = Self::compute_reserved(
            venue,
            requirements.max_group_size(),
            requirements.min_distance(),
        );
        Self {
            venue,
            min_distance: requirements.min_distance(),
            max_group_size: requirements.max_group_size(),
            max_expand,
            scorer: Box::new(SeatValueScorer),
            reserved,
        }
    }

    /// Swaps the scoring policy; the search loop stays untouched.
    pub fn with_scorer(mut self, scorer: Box<dyn ScorePolicy>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Seats that would be consumed (occupied or blocked) if every run
    /// covering an accessible seat were filled. A run avoiding all of them
    /// can never steal accessible capacity.
    fn compute_reserved(
        venue: &Venue,
        max_group_size: GroupSize,
        min_distance: f64,
    ) -> Vec<Vec<bool>> {
        let mut reserved: Vec<Vec<bool>> =
            venue.rows().iter().map(|r| vec![false; r.len()]).collect();
        for row in venue.rows() {
            for start in 0..row.len() {
                for size in 1..=max_group_size.value() {
                    if start + size > row.len() {
                        break;
                    }
                    let covers_accessible =
                        (start..start + size).any(|s| row.seats()[s].accessible());
                    if !covers_accessible {
                        continue;
                    }
                    for s in start..start + size {
                        let seat = &row.seats()[s];
                        reserved[row.index().value()][s] = true;
                        for other in venue.iter_seats() {
                            if other.coord() != seat.coord()
                                && seat.distance_to(other) < min_distance
                            {
                                reserved[other.row().value()][other.seat().value()] = true;
                            }
                        }
                    }
                }
            }
        }
        reserved
    }

    fn run_is_empty(&self, state: &GridState, row: usize, start: usize, size: usize) -> bool {
        state.cells[row][start..start + size]
            .iter()
            .all(|&cell| cell == SeatStatus::Empty)
    }

    /// Fitting empty runs of exactly `group.size()` seats, in `(row,
    /// seat)` scan order, narrowed by the soft accessibility preference.
    fn candidates(&self, state: &GridState, group: &Group) -> Vec<(usize, usize)> {
        let size = group.size().value();
        let mut all = Vec::new();
        for row in self.venue.rows() {
            let row_n = row.index().value();
            for start in 0..row.len() {
                if start + size <= row.len() && self.run_is_empty(state, row_n, start, size) {
                    all.push((row_n, start));
                }
            }
        }

        let preferred: Vec<(usize, usize)> = if group.accessibility() {
            all.iter()
                .copied()
                .filter(|&(row_n, start)| {
                    (start..start + size)
                        .any(|s| self.venue.rows()[row_n].seats()[s].accessible())
                })
                .collect()
        } else {
            all.iter()
                .copied()
                .filter(|&(row_n, start)| {
                    (start..start + size).all(|s| !self.reserved[row_n][s])
                })
                .collect()
        };

        if preferred.is_empty() { all } else { preferred }
    }

    /// Successor occupying the run and blocking every still-empty seat
    /// within `min_distance` of it.
    fn place(&self, state: &GridState, row_n: usize, start: usize, size: usize) -> GridState {
        let mut cells = state.cells.clone();
        for s in start..start + size {
            assert_eq!(
                cells[row_n][s],
                SeatStatus::Empty,
                "placing into a non-empty seat"
            );
            cells[row_n][s] = SeatStatus::Occupied;
        }
        for s in start..start + size {
            let seat = &self.venue.rows()[row_n].seats()[s];
            for other in self.venue.iter_seats() {
                let coord = other.coord();
                if coord.row().value() == row_n
                    && start <= coord.seat().value()
                    && coord.seat().value() < start + size
                {
                    continue;
                }
                if seat.distance_to(other) < self.min_distance {
                    let cell = &mut cells[coord.row().value()][coord.seat().value()];
                    assert_ne!(
                        *cell,
                        SeatStatus::Occupied,
                        "blocking zone reached an occupied seat"
                    );
                    *cell = SeatStatus::Blocked;
                }
            }
        }
        GridState { cells }
    }
}

impl SearchSpace for GridPlacement<'_> {
    type State = GridState;

    fn initial_state(&self) -> GridState {
        GridState {
            cells: self
                .venue
                .rows()
                .iter()
                .map(|row| vec![SeatStatus::Empty; row.len()])
                .collect(),
        }
    }

    fn expand(&self, state: &GridState, group: &Group) -> Vec<GridState> {
        let size = group.size().value();
        self.candidates(state, group)
            .into_iter()
            .take(self.max_expand)
            .map(|(row_n, start)| self.place(state, row_n, start, size))
            .collect()
    }

    fn evaluate(&self, state: &GridState, depth: usize) -> Score {
        self.scorer.evaluate(self.venue, depth, &state.cells)
    }

    fn assign(
        &self,
        placed: &[Group],
        state: &GridState,
    ) -> Result<AssignmentPlan, MissingSlotError> {
        let max_size = self.max_group_size.value();
        let mut buckets: Vec<Vec<Slot>> = vec![Vec::new(); max_size];
        for (row_n, row) in state.cells.iter().enumerate() {
            let mut s = 0;
            while s < row.len() {
                if row[s] == SeatStatus::Occupied {
                    let mut len = 1;
                    while s + len < row.len() && row[s + len] == SeatStatus::Occupied {
                        len += 1;
                    }
                    if len <= max_size {
                        buckets[len - 1].push(Slot::new(
                            RowIndex::new(row_n),
                            SeatIndex::new(s),
                            GroupSize::new(len),
                        ));
                    }
                    s += len;
                } else {
                    s += 1;
                }
            }
        }

        let mut cursors = vec![0usize; max_size];
        let mut slots = Vec::with_capacity(placed.len());
        let mut by_group = Vec::with_capacity(placed.len());
        for group in placed {
            let size_ix = group.size().value() - 1;
            let slot = *buckets[size_ix]
                .get(cursors[size_ix])
                .ok_or(MissingSlotError::new(group.size()))?;
            cursors[size_ix] += 1;
            slots.push(slot);
            by_group.push(slots.len() - 1);
        }
        Ok(AssignmentPlan::new(slots, by_group))
    }

    fn status_grid(&self, state: &GridState) -> StatusGrid {
        state.cells.clone()
    }
}
