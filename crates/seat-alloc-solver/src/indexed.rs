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
    score::{ScorePolicy, SeatValueScorer},
    search::{AssignmentPlan, MissingSlotError, SearchSpace},
    state::PlacementState,
    topology::{SlotSet, VenueTopology},
};
use seat_alloc_core::{
    score::Score,
    space::{Slot, SlotIndex},
};
use seat_alloc_model::{
    req::{Group, Requirements},
    sol::{SeatStatus, StatusGrid},
    venue::Venue,
};
use tracing::trace;

/// Default cap on successor states per expansion.
pub const DEFAULT_MAX_EXPAND: usize = 10;

/// The production [`SearchSpace`]: states are bitset pairs over the
/// precomputed slot universe, and expansion is a handful of word-wise
/// intersections per candidate.
#[derive(Debug)]
pub struct IndexedPlacement<'v> {
    venue: &'v Venue,
    topology: VenueTopology,
    max_expand: usize,
    scorer: Box<dyn ScorePolicy>,
}

impl<'v> IndexedPlacement<'v> {
    pub fn new(venue: &'v Venue, requirements: &Requirements) -> Self {
        Self::with_max_expand(venue, requirements, DEFAULT_MAX_EXPAND)
    }

    pub fn with_max_expand(
        venue: &'v Venue,
        requirements: &Requirements,
        max_expand: usize,
    ) -> Self {
        Self {
            venue,
            topology: VenueTopology::new(
                venue,
                requirements.max_group_size(),
                requirements.min_distance(),
            ),
            max_expand,
            scorer: Box::new(SeatValueScorer),
        }
    }

    /// Swaps the scoring policy; the search loop stays untouched.
    pub fn with_scorer(mut self, scorer: Box<dyn ScorePolicy>) -> Self {
        self.scorer = scorer;
        self
    }

    #[inline]
    pub fn venue(&self) -> &'v Venue {
        self.venue
    }

    #[inline]
    pub fn topology(&self) -> &VenueTopology {
        &self.topology
    }

    #[inline]
    pub fn max_expand(&self) -> usize {
        self.max_expand
    }

    /// Slots this group may be placed into from `state`: the still-legal
    /// slots of its size, narrowed by the accessibility preference. The
    /// preference is soft: if the narrowed set is empty, the unfiltered
    /// candidates are used, so accessibility contention never makes a
    /// group unplaceable on its own.
    fn candidate_slots(&self, state: &PlacementState, group: &Group) -> SlotSet {
        let unfiltered = state.empty().and(self.topology.size_slots(group.size()));
        let preferred = if group.accessibility() {
            unfiltered.and(self.topology.accessible_slots())
        } else {
            unfiltered.and(self.topology.clear_of_accessible())
        };
        if preferred.any() {
            preferred
        } else {
            trace!(
                group = %group,
                "accessibility preference unsatisfiable, using unfiltered candidates"
            );
            unfiltered
        }
    }

    /// Successor placing the group into slot `slot_n`.
    fn place(&self, state: &PlacementState, slot_n: usize) -> PlacementState {
        let empty = state
            .empty()
            .and(self.topology.safety(SlotIndex::new(slot_n)));
        let mut occupied = state.occupied().clone();
        occupied.set(slot_n);
        PlacementState::new(empty, occupied)
    }

    fn seat_status(&self, state: &PlacementState, covering: &SlotSet) -> SeatStatus {
        if state.occupied().intersects(covering) {
            SeatStatus::Occupied
        } else if state.empty().intersects(covering) {
            SeatStatus::Empty
        } else {
            SeatStatus::Blocked
        }
    }
}

impl SearchSpace for IndexedPlacement<'_> {
    type State = PlacementState;

    fn initial_state(&self) -> PlacementState {
        PlacementState::initial(self.topology.num_slots())
    }

    fn expand(&self, state: &PlacementState, group: &Group) -> Vec<PlacementState> {
        self.candidate_slots(state, group)
            .iter_ones()
            .take(self.max_expand)
            .map(|slot_n| self.place(state, slot_n))
            .collect()
    }

    fn evaluate(&self, state: &PlacementState, depth: usize) -> Score {
        let grid = self.status_grid(state);
        self.scorer.evaluate(self.venue, depth, &grid)
    }

    fn assign(
        &self,
        placed: &[Group],
        state: &PlacementState,
    ) -> Result<AssignmentPlan, MissingSlotError> {
        let max_size = self.topology.max_group_size().value();
        let mut buckets: Vec<Vec<Slot>> = vec![Vec::new(); max_size];
        for slot_n in state.occupied().iter_ones() {
            let slot = self.topology.slot(SlotIndex::new(slot_n));
            buckets[slot.size().value() - 1].push(slot);
        }
        for bucket in &mut buckets {
            bucket.sort_by_key(|slot| (slot.row(), slot.seat()));
        }

        let mut cursors = vec![0usize; max_size];
        let mut slots = Vec::with_capacity(placed.len());
        let mut by_group = Vec::with_capacity(placed.len());
        for group in placed {
            let size_ix = group.size().value() - 1;
            let bucket = &buckets[size_ix];
            let cursor = &mut cursors[size_ix];
            let slot = *bucket
                .get(*cursor)
                .ok_or(MissingSlotError::new(group.size()))?;
            *cursor += 1;
            slots.push(slot);
            by_group.push(slots.len() - 1);
        }
        Ok(AssignmentPlan::new(slots, by_group))
    }

    fn status_grid(&self, state: &PlacementState) -> StatusGrid {
        self.venue
            .rows()
            .iter()
            .map(|row| {
                row.seats()
                    .iter()
                    .map(|seat| {
                        self.seat_status(state, self.topology.seat_slots(seat.coord()))
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seat_alloc_core::space::{GroupSize, RowIndex, SeatIndex};
    use seat_alloc_model::venue::{RowSpec, SeatSpec};

    fn grid_venue(num_rows: usize, row_len: usize, accessible: &[(usize, usize)]) -> Venue {
        let rows = (0..num_rows)
            .map(|r| {
                RowSpec::new(
                    format!("R{}", r),
                    (0..row_len)
                        .map(|s| {
                            SeatSpec::new(
                                1.0 + s as f64,
                                1.0 + r as f64,
                                accessible.contains(&(r, s)),
                            )
                        })
                        .collect(),
                )
            })
            .collect();
        Venue::new(rows, 1.0 + (row_len as f64 - 1.0) / 2.0, 0.0).unwrap()
    }

    fn requirements(max_size: usize, min_distance: f64, sizes: &[usize]) -> Requirements {
        requirements_with_access(max_size, min_distance, sizes, &[])
    }

    fn requirements_with_access(
        max_size: usize,
        min_distance: f64,
        sizes: &[usize],
        accessible_groups: &[usize],
    ) -> Requirements {
        let mut req = Requirements::new(GroupSize::new(max_size), min_distance).unwrap();
        for (i, &size) in sizes.iter().enumerate() {
            req.push_group(
                format!("party-{}", i),
                GroupSize::new(size),
                accessible_groups.contains(&i),
            )
            .unwrap();
        }
        req
    }

    fn slot(row: usize, seat: usize, size: usize) -> Slot {
        Slot::new(RowIndex::new(row), SeatIndex::new(seat), GroupSize::new(size))
    }

    #[test]
    fn test_expand_only_returns_group_sized_slots() {
        let venue = grid_venue(2, 4, &[]);
        let req = requirements(3, 1.5, &[2]);
        let space = IndexedPlacement::new(&venue, &req);
        let state = space.initial_state();
        let children = space.expand(&state, &req.group_queue()[0]);
        assert!(!children.is_empty());
        for child in &children {
            let placed: Vec<Slot> = child
                .occupied()
                .iter_ones()
                .map(|n| space.topology().slot(SlotIndex::new(n)))
                .collect();
            assert_eq!(placed.len(), 1);
            assert_eq!(placed[0].size(), GroupSize::new(2));
        }
    }

    #[test]
    fn test_expand_respects_max_expand_cap_in_slot_order() {
        let venue = grid_venue(3, 6, &[]);
        let req = requirements(2, 1.5, &[1]);
        let space = IndexedPlacement::with_max_expand(&venue, &req, 4);
        let state = space.initial_state();
        let children = space.expand(&state, &req.group_queue()[0]);
        assert_eq!(children.len(), 4);
        // First four size-1 slots in (row, seat) order sit in row 0.
        let placed: Vec<Slot> = children
            .iter()
            .map(|c| {
                space
                    .topology()
                    .slot(SlotIndex::new(c.occupied().iter_ones().next().unwrap()))
            })
            .collect();
        assert_eq!(
            placed,
            vec![slot(0, 0, 1), slot(0, 1, 1), slot(0, 2, 1), slot(0, 3, 1)]
        );
    }

    #[test]
    fn test_children_keep_empty_and_occupied_disjoint() {
        let venue = grid_venue(3, 5, &[]);
        let req = requirements(3, 1.5, &[2, 1, 3]);
        let space = IndexedPlacement::new(&venue, &req);
        let mut frontier = vec![space.initial_state()];
        for group in req.group_queue() {
            let mut next = Vec::new();
            for state in &frontier {
                for child in space.expand(state, group) {
                    // PlacementState::new would have panicked on overlap;
                    // double-check the sets and the depth bookkeeping.
                    assert!(child.empty().is_disjoint(child.occupied()));
                    assert_eq!(child.num_placed(), state.num_placed() + 1);
                    next.push(child);
                }
            }
            frontier = next;
            assert!(!frontier.is_empty());
        }
    }

    #[test]
    fn test_placed_slot_leaves_empty_set() {
        let venue = grid_venue(1, 5, &[]);
        let req = requirements(2, 1.5, &[2]);
        let space = IndexedPlacement::new(&venue, &req);
        let state = space.initial_state();
        for child in space.expand(&state, &req.group_queue()[0]) {
            let slot_n = child.occupied().iter_ones().next().unwrap();
            assert!(
                !child.empty().get(slot_n),
                "an occupied slot must not stay in the empty set"
            );
        }
    }

    #[test]
    fn test_two_seat_group_blocks_row_neighbours() {
        // Single row of five seats: placing a pair at seat 1 occupies
        // seats 1-2, blocks 0 and 3, and leaves only seat 4 usable.
        let venue = grid_venue(1, 5, &[]);
        let req = requirements(2, 1.5, &[2]);
        let space = IndexedPlacement::new(&venue, &req);
        let state = space.initial_state();
        let children = space.expand(&state, &req.group_queue()[0]);
        let child = children
            .iter()
            .find(|c| {
                c.occupied()
                    .iter_ones()
                    .map(|n| space.topology().slot(SlotIndex::new(n)))
                    .any(|s| s == slot(0, 1, 2))
            })
            .unwrap();
        assert_eq!(
            space.status_grid(child)[0],
            vec![
                SeatStatus::Blocked,
                SeatStatus::Occupied,
                SeatStatus::Occupied,
                SeatStatus::Blocked,
                SeatStatus::Empty,
            ]
        );
        let legal: Vec<Slot> = child
            .empty()
            .iter_ones()
            .map(|n| space.topology().slot(SlotIndex::new(n)))
            .collect();
        assert_eq!(legal, vec![slot(0, 4, 1)]);
    }

    #[test]
    fn test_accessible_group_prefers_accessible_slots() {
        let venue = grid_venue(2, 3, &[(1, 0)]);
        let req = requirements_with_access(2, 1.5, &[1], &[0]);
        let space = IndexedPlacement::new(&venue, &req);
        let children = space.expand(&space.initial_state(), &req.group_queue()[0]);
        assert!(!children.is_empty());
        for child in &children {
            let placed = space
                .topology()
                .slot(SlotIndex::new(child.occupied().iter_ones().next().unwrap()));
            assert!(placed.covers(seat_alloc_core::space::SeatCoord::new(
                RowIndex::new(1),
                SeatIndex::new(0)
            )));
        }
    }

    #[test]
    fn test_accessible_group_falls_back_without_accessible_seats() {
        let venue = grid_venue(2, 3, &[]);
        let req = requirements_with_access(2, 1.5, &[1], &[0]);
        let space = IndexedPlacement::new(&venue, &req);
        let children = space.expand(&space.initial_state(), &req.group_queue()[0]);
        assert!(!children.is_empty(), "accessible group must stay placeable");
    }

    #[test]
    fn test_regular_group_avoids_accessible_area_when_possible() {
        let venue = grid_venue(3, 3, &[(0, 0)]);
        let req = requirements(1, 1.5, &[1]);
        let space = IndexedPlacement::new(&venue, &req);
        let children = space.expand(&space.initial_state(), &req.group_queue()[0]);
        for child in &children {
            let placed = space
                .topology()
                .slot(SlotIndex::new(child.occupied().iter_ones().next().unwrap()));
            // Accessible seat (0,0) and everything within 1.5 of it stays
            // untouched while clear slots exist.
            assert!(placed.row() == RowIndex::new(2) || placed.seat() == SeatIndex::new(2));
        }
    }

    #[test]
    fn test_regular_group_falls_back_when_only_accessible_slots_remain() {
        // Whole venue accessible: the purely-non-accessible set is empty
        // and the fallback lets the group in anyway.
        let venue = grid_venue(1, 3, &[(0, 0), (0, 1), (0, 2)]);
        let req = requirements(1, 1.5, &[1]);
        let space = IndexedPlacement::new(&venue, &req);
        let children = space.expand(&space.initial_state(), &req.group_queue()[0]);
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn test_assign_buckets_by_size_in_fifo_order() {
        let venue = grid_venue(4, 4, &[]);
        let req = requirements(2, 1.5, &[2, 1, 2]);
        let space = IndexedPlacement::new(&venue, &req);

        // Occupy three disjoint slots by hand: pairs at (0,0) and (2,0),
        // a single at (2,3). Rows far enough apart not to interact.
        let mut state = space.initial_state();
        for wanted in [slot(0, 0, 2), slot(2, 0, 2), slot(2, 3, 1)] {
            let slot_n = space
                .topology()
                .slots()
                .iter()
                .position(|&s| s == wanted)
                .unwrap();
            assert!(state.empty().get(slot_n), "slot {} not legal", wanted);
            state = space.place(&state, slot_n);
        }

        let plan = space.assign(req.group_queue(), &state).unwrap();
        // Queue order: pair, single, pair. Pair bucket is consumed front
        // to back by row.
        assert_eq!(plan.slots()[plan.by_group()[0]], slot(0, 0, 2));
        assert_eq!(plan.slots()[plan.by_group()[1]], slot(2, 3, 1));
        assert_eq!(plan.slots()[plan.by_group()[2]], slot(2, 0, 2));
    }

    #[test]
    fn test_assign_missing_bucket_is_an_error() {
        let venue = grid_venue(2, 4, &[]);
        let req = requirements(2, 1.5, &[2]);
        let space = IndexedPlacement::new(&venue, &req);
        // No slot occupied at all: reconciliation must refuse.
        let err = space
            .assign(req.group_queue(), &space.initial_state())
            .unwrap_err();
        assert_eq!(err.size(), GroupSize::new(2));
    }

    #[test]
    fn test_status_grid_of_initial_state_is_all_empty() {
        let venue = grid_venue(2, 3, &[]);
        let req = requirements(2, 1.5, &[1]);
        let space = IndexedPlacement::new(&venue, &req);
        let grid = space.status_grid(&space.initial_state());
        assert!(
            grid.iter()
                .flatten()
                .all(|&status| status == SeatStatus::Empty)
        );
    }
}
