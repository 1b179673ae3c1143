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

use serde::Serialize;
use std::{fmt::Display, iter::FusedIterator, ops::Add};

/// Zero-based index of a row within a venue.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize)]
pub struct RowIndex(usize);

impl RowIndex {
    #[inline]
    pub const fn new(v: usize) -> Self {
        RowIndex(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl Display for RowIndex {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RowIndex({})", self.0)
    }
}

impl From<usize> for RowIndex {
    #[inline]
    fn from(v: usize) -> Self {
        RowIndex(v)
    }
}

/// Zero-based index of a seat within its row.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize)]
pub struct SeatIndex(usize);

impl SeatIndex {
    #[inline]
    pub const fn new(v: usize) -> Self {
        SeatIndex(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl Display for SeatIndex {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SeatIndex({})", self.0)
    }
}

impl From<usize> for SeatIndex {
    #[inline]
    fn from(v: usize) -> Self {
        SeatIndex(v)
    }
}

/// Number of people in a group, equivalently the number of contiguous
/// seats a placement of that group consumes.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize)]
pub struct GroupSize(usize);

impl GroupSize {
    #[inline]
    pub const fn new(v: usize) -> Self {
        GroupSize(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Display for GroupSize {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GroupSize({})", self.0)
    }
}

impl From<usize> for GroupSize {
    #[inline]
    fn from(v: usize) -> Self {
        GroupSize(v)
    }
}

impl Add<GroupSize> for SeatIndex {
    type Output = SeatIndex;

    #[inline]
    fn add(self, rhs: GroupSize) -> Self::Output {
        SeatIndex(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in SeatIndex + GroupSize"),
        )
    }
}

/// Identity of a single seat: `(row, seat)`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct SeatCoord {
    row: RowIndex,
    seat: SeatIndex,
}

impl SeatCoord {
    #[inline]
    pub const fn new(row: RowIndex, seat: SeatIndex) -> Self {
        Self { row, seat }
    }

    #[inline]
    pub const fn row(self) -> RowIndex {
        self.row
    }

    #[inline]
    pub const fn seat(self) -> SeatIndex {
        self.seat
    }
}

impl Display for SeatCoord {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat(r{}, s{})", self.row.value(), self.seat.value())
    }
}

/// Position of a slot within the enumerated slot universe of a venue.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct SlotIndex(usize);

impl SlotIndex {
    #[inline]
    pub const fn new(v: usize) -> Self {
        SlotIndex(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl Display for SlotIndex {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlotIndex({})", self.0)
    }
}

impl From<usize> for SlotIndex {
    #[inline]
    fn from(v: usize) -> Self {
        SlotIndex(v)
    }
}

/// A candidate placement: `size` contiguous seats starting at `seat`
/// within a single row.
///
/// The derived ordering is lexicographic over `(row, seat, size)`, which is
/// exactly the enumeration order of the slot universe.
///
/// # Examples
///
/// ```
/// use seat_alloc_core::space::{GroupSize, RowIndex, SeatCoord, SeatIndex, Slot};
///
/// let slot = Slot::new(RowIndex::new(0), SeatIndex::new(1), GroupSize::new(2));
/// assert!(slot.covers(SeatCoord::new(RowIndex::new(0), SeatIndex::new(2))));
/// assert!(!slot.covers(SeatCoord::new(RowIndex::new(0), SeatIndex::new(3))));
/// assert_eq!(slot.seats().count(), 2);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct Slot {
    row: RowIndex,
    seat: SeatIndex,
    size: GroupSize,
}

impl Slot {
    #[inline]
    pub const fn new(row: RowIndex, seat: SeatIndex, size: GroupSize) -> Self {
        Self { row, seat, size }
    }

    #[inline]
    pub const fn row(self) -> RowIndex {
        self.row
    }

    #[inline]
    pub const fn seat(self) -> SeatIndex {
        self.seat
    }

    #[inline]
    pub const fn size(self) -> GroupSize {
        self.size
    }

    /// One past the last seat index covered by this slot.
    #[inline]
    pub fn end(self) -> SeatIndex {
        self.seat + self.size
    }

    /// Whether the given seat lies within this slot's seat range.
    #[inline]
    pub fn covers(self, coord: SeatCoord) -> bool {
        self.row == coord.row() && self.seat <= coord.seat() && coord.seat() < self.end()
    }

    /// The seats this slot occupies, in ascending seat order.
    #[inline]
    pub fn seats(self) -> SlotSeats {
        SlotSeats {
            row: self.row,
            next: self.seat.value(),
            end: self.end().value(),
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot(r{}, s{}, size={})",
            self.row.value(),
            self.seat.value(),
            self.size.value()
        )
    }
}

/// Iterator over the seats covered by a [`Slot`].
#[derive(Debug, Clone)]
pub struct SlotSeats {
    row: RowIndex,
    next: usize,
    end: usize,
}

impl Iterator for SlotSeats {
    type Item = SeatCoord;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let coord = SeatCoord::new(self.row, SeatIndex::new(self.next));
        self.next += 1;
        Some(coord)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotSeats {}
impl FusedIterator for SlotSeats {}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(row: usize, seat: usize, size: usize) -> Slot {
        Slot::new(RowIndex::new(row), SeatIndex::new(seat), GroupSize::new(size))
    }

    #[test]
    fn test_seat_index_plus_group_size() {
        assert_eq!(SeatIndex::new(3) + GroupSize::new(2), SeatIndex::new(5));
    }

    #[test]
    fn test_slot_end_and_covers() {
        let s = slot(1, 2, 3);
        assert_eq!(s.end(), SeatIndex::new(5));
        for i in 2..5 {
            assert!(s.covers(SeatCoord::new(RowIndex::new(1), SeatIndex::new(i))));
        }
        assert!(!s.covers(SeatCoord::new(RowIndex::new(1), SeatIndex::new(5))));
        assert!(!s.covers(SeatCoord::new(RowIndex::new(0), SeatIndex::new(2))));
    }

    #[test]
    fn test_slot_seats_iterates_in_order() {
        let coords: Vec<_> = slot(0, 1, 2).seats().collect();
        assert_eq!(
            coords,
            vec![
                SeatCoord::new(RowIndex::new(0), SeatIndex::new(1)),
                SeatCoord::new(RowIndex::new(0), SeatIndex::new(2)),
            ]
        );
        assert_eq!(slot(0, 0, 4).seats().len(), 4);
    }

    #[test]
    fn test_slot_ordering_is_enumeration_order() {
        let mut slots = vec![slot(1, 0, 1), slot(0, 1, 1), slot(0, 0, 2), slot(0, 0, 1)];
        slots.sort();
        assert_eq!(
            slots,
            vec![slot(0, 0, 1), slot(0, 0, 2), slot(0, 1, 1), slot(1, 0, 1)]
        );
    }
}
