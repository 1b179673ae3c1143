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

use crate::id::GroupId;
use seat_alloc_core::space::Slot;
use serde::Serialize;
use std::fmt::Display;

/// Final state of one seat in a computed solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeatStatus {
    /// Still free and legal to sit in.
    Empty,
    /// Taken by a placed group.
    Occupied,
    /// Unusable because an occupied seat is too close.
    Blocked,
}

impl SeatStatus {
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            SeatStatus::Empty => '.',
            SeatStatus::Occupied => 'o',
            SeatStatus::Blocked => 'x',
        }
    }
}

impl Display for SeatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Per-seat statuses in venue shape (one inner vector per row).
pub type StatusGrid = Vec<Vec<SeatStatus>>;

/// One seat of the rendered solution grid: its status plus, for occupied
/// seats, the group and slot sitting there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatCell {
    status: SeatStatus,
    group: Option<GroupId>,
    slot: Option<usize>,
}

impl SeatCell {
    #[inline]
    pub fn new(status: SeatStatus) -> Self {
        Self {
            status,
            group: None,
            slot: None,
        }
    }

    /// Records which group and slot cover this seat.
    #[inline]
    pub fn annotate(&mut self, group: GroupId, slot: usize) {
        self.group = Some(group);
        self.slot = Some(slot);
    }

    #[inline]
    pub fn status(&self) -> SeatStatus {
        self.status
    }

    #[inline]
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    #[inline]
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }
}

/// The final output of a placement run.
///
/// `assignments` is aligned with the original requirements queue: entry `i`
/// is the index into `slots` where group `i` sits, or `None` if the group
/// was declined. Built once at the end of the search, never partially
/// materialized during it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    success: bool,
    num_groups_placed: usize,
    num_groups_declined: usize,
    num_seats_occupied: usize,
    num_seats_blocked: usize,
    num_seats_empty: usize,
    slots: Vec<Slot>,
    assignments: Vec<Option<usize>>,
    grid: Vec<Vec<SeatCell>>,
}

impl Solution {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        success: bool,
        num_groups_placed: usize,
        num_groups_declined: usize,
        num_seats_occupied: usize,
        num_seats_blocked: usize,
        num_seats_empty: usize,
        slots: Vec<Slot>,
        assignments: Vec<Option<usize>>,
        grid: Vec<Vec<SeatCell>>,
    ) -> Self {
        Self {
            success,
            num_groups_placed,
            num_groups_declined,
            num_seats_occupied,
            num_seats_blocked,
            num_seats_empty,
            slots,
            assignments,
            grid,
        }
    }

    /// True when every queued group was placed.
    #[inline]
    pub fn success(&self) -> bool {
        self.success
    }

    #[inline]
    pub fn num_groups_placed(&self) -> usize {
        self.num_groups_placed
    }

    #[inline]
    pub fn num_groups_declined(&self) -> usize {
        self.num_groups_declined
    }

    #[inline]
    pub fn num_seats_occupied(&self) -> usize {
        self.num_seats_occupied
    }

    #[inline]
    pub fn num_seats_blocked(&self) -> usize {
        self.num_seats_blocked
    }

    #[inline]
    pub fn num_seats_empty(&self) -> usize {
        self.num_seats_empty
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline]
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignments
    }

    #[inline]
    pub fn grid(&self) -> &[Vec<SeatCell>] {
        &self.grid
    }

    /// The slot assigned to the group queued at `group_n`, if any.
    #[inline]
    pub fn slot_for_group(&self, group_n: usize) -> Option<Slot> {
        self.assignments
            .get(group_n)
            .copied()
            .flatten()
            .map(|slot_n| self.slots[slot_n])
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  success = {}", self.success)?;
        writeln!(
            f,
            "  groups: {} placed, {} declined",
            self.num_groups_placed, self.num_groups_declined
        )?;
        writeln!(
            f,
            "  seats: {} occupied, {} blocked, {} empty",
            self.num_seats_occupied, self.num_seats_blocked, self.num_seats_empty
        )?;
        writeln!(f, "  grid:")?;
        for (row_n, row) in self.grid.iter().enumerate() {
            write!(f, "  {:3}| ", row_n)?;
            for cell in row {
                write!(f, "{}", cell.status())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  assignments:")?;
        for (group_n, assignment) in self.assignments.iter().enumerate() {
            match assignment {
                Some(slot_n) => {
                    let slot = self.slots[*slot_n];
                    writeln!(
                        f,
                        "    group {} -> row {} seat {} (size {})",
                        group_n,
                        slot.row().value(),
                        slot.seat().value(),
                        slot.size().value()
                    )?;
                }
                None => writeln!(f, "    group {} -> declined", group_n)?,
            }
        }
        Ok(())
    }
}
