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

use crate::fringe::{ClosedSet, Fringe};
use seat_alloc_core::{score::Score, space::{GroupSize, Slot}};
use seat_alloc_model::{
    id::GroupId,
    req::{Group, Requirements},
    sol::{SeatCell, SeatStatus, Solution, StatusGrid},
};
use std::{
    collections::HashMap,
    fmt::{Debug, Display},
    hash::Hash,
};
use tracing::{debug, info, instrument, trace};

/// Default cap on expansion-loop iterations per group attempt.
pub const DEFAULT_MAX_LOOP: usize = 50;

/// The seam between the search manager and a placement representation.
///
/// Two conforming implementations exist: the production bitset-indexed one
/// ([`crate::indexed::IndexedPlacement`]) and the naive grid-scan oracle
/// ([`crate::grid::GridPlacement`]). Both must expand candidates in
/// ascending `(row, seat)` order under the same branch cap so their
/// searches stay comparable state for state.
pub trait SearchSpace {
    type State: Clone + Eq + Hash + Debug;

    /// The root state: an untouched venue.
    fn initial_state(&self) -> Self::State;

    /// All successor states placing `group`, in candidate order, capped by
    /// the implementation's branch limit. Empty when the group cannot be
    /// placed from `state`.
    fn expand(&self, state: &Self::State, group: &Group) -> Vec<Self::State>;

    /// Heuristic score of `state` given `depth` groups already placed.
    fn evaluate(&self, state: &Self::State, depth: usize) -> Score;

    /// Maps the final occupancy back to one concrete slot per placed
    /// group, consuming size buckets in queue order.
    fn assign(
        &self,
        placed: &[Group],
        state: &Self::State,
    ) -> Result<AssignmentPlan, MissingSlotError>;

    /// Per-seat status projection of `state`, in venue shape.
    fn status_grid(&self, state: &Self::State) -> StatusGrid;
}

/// Outcome of reconciliation: one slot per placed group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPlan {
    slots: Vec<Slot>,
    by_group: Vec<usize>,
}

impl AssignmentPlan {
    pub fn new(slots: Vec<Slot>, by_group: Vec<usize>) -> Self {
        debug_assert_eq!(slots.len(), by_group.len());
        Self { slots, by_group }
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// For the `i`-th placed group, the index into [`Self::slots`].
    #[inline]
    pub fn by_group(&self) -> &[usize] {
        &self.by_group
    }
}

/// Reconciliation found no occupied slot left for a size the search
/// reported as placed. This means search and reconciliation disagree on
/// size bucketing, which is a bug, not a placement failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingSlotError {
    size: GroupSize,
}

impl MissingSlotError {
    #[inline]
    pub fn new(size: GroupSize) -> Self {
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> GroupSize {
        self.size
    }
}

impl Display for MissingSlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no occupied slot of {} left during reconciliation",
            self.size
        )
    }
}

impl std::error::Error for MissingSlotError {}

/// Fatal search failures. Declined groups are not errors; these are
/// internal-consistency violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No frontier state exists at the final depth, although every queued
    /// group reported success.
    MissingFinalState { depth: usize },
    /// Reconciliation and search disagreed on slot bucketing.
    Assignment(MissingSlotError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::MissingFinalState { depth } => {
                write!(f, "no frontier state at final depth {}", depth)
            }
            SearchError::Assignment(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<MissingSlotError> for SearchError {
    fn from(e: MissingSlotError) -> Self {
        SearchError::Assignment(e)
    }
}

/// Tuning knobs of the placement loop.
///
/// `max_loop` caps expansion iterations per group attempt (a soft timeout:
/// the group is declined, the run continues). `max_groups` optionally
/// stops the run once that many groups have been placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub max_loop: Option<usize>,
    pub max_groups: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_loop: Some(DEFAULT_MAX_LOOP),
            max_groups: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Checkpoint<St> {
    fringe: Fringe<St>,
    closed: ClosedSet<St>,
}

/// Drives the group-by-group placement loop over a [`SearchSpace`].
///
/// For each queued group the manager checkpoints the frontier and visited
/// set, appends the group to the active queue, and runs best-first
/// expansion until a state reaching the new queue depth appears, the
/// frontier drains, or the loop budget runs out. Failure restores the
/// checkpoint and records the group as declined; the search then moves on.
/// Placement is all-or-nothing per group.
pub struct SearchManager<S: SearchSpace> {
    space: S,
    params: SearchParams,
    fringe: Fringe<S::State>,
    closed: ClosedSet<S::State>,
    queue: Vec<Group>,
    declined: Vec<Group>,
    checkpoint: Option<Checkpoint<S::State>>,
}

impl<S: SearchSpace> SearchManager<S> {
    pub fn new(space: S) -> Self {
        Self::with_params(space, SearchParams::default())
    }

    pub fn with_params(space: S, params: SearchParams) -> Self {
        let mut fringe = Fringe::new();
        let initial = space.initial_state();
        let score = space.evaluate(&initial, 0);
        fringe.push(initial, 0, score);
        Self {
            space,
            params,
            fringe,
            closed: ClosedSet::new(),
            queue: Vec::new(),
            declined: Vec::new(),
            checkpoint: None,
        }
    }

    #[inline]
    pub fn space(&self) -> &S {
        &self.space
    }

    #[inline]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Groups placed so far, in placement order.
    #[inline]
    pub fn placed(&self) -> &[Group] {
        &self.queue
    }

    /// Groups declined so far, in decline order.
    #[inline]
    pub fn declined(&self) -> &[Group] {
        &self.declined
    }

    /// Processes the whole queue and assembles the final solution.
    #[instrument(skip_all, fields(num_groups = requirements.num_groups()))]
    pub fn run(&mut self, requirements: &Requirements) -> Result<Solution, SearchError> {
        info!("starting placement loop");
        for group in requirements.group_queue() {
            debug!(group = %group, "attempting placement");
            self.save_checkpoint();
            self.queue.push(group.clone());
            if self.place_next() {
                debug!(
                    group = %group,
                    placed = self.queue.len(),
                    fringe = self.fringe.len(),
                    "group placed"
                );
                if let Some(max_groups) = self.params.max_groups {
                    if self.queue.len() >= max_groups {
                        info!(max_groups, "reached maximum group count, stopping early");
                        break;
                    }
                }
            } else {
                info!(group = %group, "group declined");
                self.queue.pop();
                self.restore_checkpoint();
                self.declined.push(group.clone());
            }
        }
        info!(
            placed = self.queue.len(),
            declined = self.declined.len(),
            "placement loop finished"
        );
        self.build_solution(requirements)
    }

    /// One group attempt: best-first expansion until the new depth is
    /// reached. Returns `false` on frontier exhaustion or budget timeout.
    fn place_next(&mut self) -> bool {
        let target_depth = self.queue.len();
        let mut iterations = 0;
        loop {
            if self.fringe.is_empty() {
                debug!(iterations, "frontier exhausted");
                return false;
            }
            if let Some(max_loop) = self.params.max_loop {
                if iterations >= max_loop {
                    debug!(iterations, "attempt exceeded loop budget");
                    return false;
                }
            }
            iterations += 1;

            let Some((state, depth)) = self.fringe.pop() else {
                return false;
            };
            debug_assert!(depth < target_depth);
            let group = &self.queue[depth];
            let children = self.space.expand(&state, group);
            let reached_target = !children.is_empty() && depth + 1 == target_depth;

            for child in children {
                if self.closed.contains(&child) {
                    trace!("child state already visited, not re-queued");
                    continue;
                }
                let score = self.space.evaluate(&child, depth + 1);
                self.closed.insert(child.clone());
                self.fringe.push(child, depth + 1, score);
            }

            if reached_target {
                return true;
            }
        }
    }

    fn save_checkpoint(&mut self) {
        self.checkpoint = Some(Checkpoint {
            fringe: self.fringe.clone(),
            closed: self.closed.clone(),
        });
    }

    fn restore_checkpoint(&mut self) {
        if let Some(checkpoint) = self.checkpoint.take() {
            self.fringe = checkpoint.fringe;
            self.closed = checkpoint.closed;
        }
    }

    fn build_solution(&self, requirements: &Requirements) -> Result<Solution, SearchError> {
        let depth = self.queue.len();
        let final_state = self
            .fringe
            .best_at_depth(depth)
            .ok_or(SearchError::MissingFinalState { depth })?;

        let plan = self.space.assign(&self.queue, final_state)?;
        let statuses = self.space.status_grid(final_state);

        let mut grid: Vec<Vec<SeatCell>> = statuses
            .iter()
            .map(|row| row.iter().map(|&status| SeatCell::new(status)).collect())
            .collect();

        let mut slot_by_id: HashMap<GroupId, usize> = HashMap::with_capacity(self.queue.len());
        for (i, group) in self.queue.iter().enumerate() {
            let slot_n = plan.by_group()[i];
            for coord in plan.slots()[slot_n].seats() {
                grid[coord.row().value()][coord.seat().value()].annotate(group.id(), slot_n);
            }
            slot_by_id.insert(group.id(), slot_n);
        }

        let assignments: Vec<Option<usize>> = requirements
            .group_queue()
            .iter()
            .map(|group| slot_by_id.get(&group.id()).copied())
            .collect();

        let count = |wanted: SeatStatus| -> usize {
            statuses
                .iter()
                .map(|row| row.iter().filter(|&&s| s == wanted).count())
                .sum()
        };

        Ok(Solution::new(
            self.declined.is_empty(),
            self.queue.len(),
            self.declined.len(),
            self.queue.iter().map(|g| g.size().value()).sum(),
            count(SeatStatus::Blocked),
            count(SeatStatus::Empty),
            plan.slots().to_vec(),
            assignments,
            grid,
        ))
    }
}
