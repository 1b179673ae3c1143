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

use seat_alloc_core::{
    bitset::BitSetIndex,
    space::{GroupSize, SeatCoord, SeatIndex, Slot, SlotIndex},
};
use seat_alloc_model::venue::Venue;
use tracing::debug;

/// Bitset over the slot universe of one venue.
pub type SlotSet = BitSetIndex;

/// Static, venue-derived precomputation shared read-only by every search
/// state: the enumerated slot universe and the indexes over it.
///
/// Built once per `(venue, max_group_size, min_distance)` and never
/// mutated afterwards. All sets are expressed as bit positions into the
/// slot universe, enumerated in `(row, seat, size)` lexicographic order.
#[derive(Debug, Clone)]
pub struct VenueTopology {
    slots: Vec<Slot>,
    by_size: Vec<SlotSet>,
    by_seat: Vec<Vec<SlotSet>>,
    distances: Vec<Vec<Vec<(f64, SeatCoord)>>>,
    safety: Vec<SlotSet>,
    accessible_slots: SlotSet,
    clear_of_accessible: SlotSet,
    max_group_size: GroupSize,
    min_distance: f64,
}

impl VenueTopology {
    pub fn new(venue: &Venue, max_group_size: GroupSize, min_distance: f64) -> Self {
        let slots = Self::compute_slots(venue, max_group_size);
        let by_size = Self::compute_by_size(&slots, max_group_size);
        let by_seat = Self::compute_by_seat(venue, &slots);
        let distances = Self::compute_distances(venue);
        let safety = Self::compute_safety(&slots, &by_seat, &distances, min_distance);
        let (accessible_slots, clear_of_accessible) =
            Self::compute_accessibility(venue, &by_seat, &safety, slots.len());

        debug!(
            num_slots = slots.len(),
            max_group_size = max_group_size.value(),
            min_distance,
            "venue topology built"
        );

        Self {
            slots,
            by_size,
            by_seat,
            distances,
            safety,
            accessible_slots,
            clear_of_accessible,
            max_group_size,
            min_distance,
        }
    }

    /// Every `(row, seat, size)` combination that fits within its row.
    fn compute_slots(venue: &Venue, max_group_size: GroupSize) -> Vec<Slot> {
        let mut slots = Vec::new();
        for row in venue.rows() {
            for seat_n in 0..row.len() {
                for size in 1..=max_group_size.value() {
                    if seat_n + size <= row.len() {
                        slots.push(Slot::new(
                            row.index(),
                            SeatIndex::new(seat_n),
                            GroupSize::new(size),
                        ));
                    }
                }
            }
        }
        slots
    }

    fn compute_by_size(slots: &[Slot], max_group_size: GroupSize) -> Vec<SlotSet> {
        (1..=max_group_size.value())
            .map(|size| {
                let bits: Vec<bool> = slots.iter().map(|s| s.size().value() == size).collect();
                SlotSet::from_bools(&bits)
            })
            .collect()
    }

    fn compute_by_seat(venue: &Venue, slots: &[Slot]) -> Vec<Vec<SlotSet>> {
        venue
            .rows()
            .iter()
            .map(|row| {
                row.seats()
                    .iter()
                    .map(|seat| {
                        let bits: Vec<bool> =
                            slots.iter().map(|s| s.covers(seat.coord())).collect();
                        SlotSet::from_bools(&bits)
                    })
                    .collect()
            })
            .collect()
    }

    /// For every seat, all other seats sorted by ascending distance.
    fn compute_distances(venue: &Venue) -> Vec<Vec<Vec<(f64, SeatCoord)>>> {
        venue
            .rows()
            .iter()
            .map(|row| {
                row.seats()
                    .iter()
                    .map(|seat| {
                        let mut list: Vec<(f64, SeatCoord)> = venue
                            .iter_seats()
                            .filter(|other| other.coord() != seat.coord())
                            .map(|other| (seat.distance_to(other), other.coord()))
                            .collect();
                        list.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                        list
                    })
                    .collect()
            })
            .collect()
    }

    /// For every slot, the set of slots that stay legal once it is
    /// occupied: everything except the slots touching one of its own seats
    /// or a seat strictly within `min_distance` of one of them.
    fn compute_safety(
        slots: &[Slot],
        by_seat: &[Vec<SlotSet>],
        distances: &[Vec<Vec<(f64, SeatCoord)>>],
        min_distance: f64,
    ) -> Vec<SlotSet> {
        let num_slots = slots.len();
        slots
            .iter()
            .map(|slot| {
                let mut removed = SlotSet::new(num_slots, false);
                for coord in slot.seats() {
                    removed.union_with(&by_seat[coord.row().value()][coord.seat().value()]);
                    for &(distance, other) in
                        &distances[coord.row().value()][coord.seat().value()]
                    {
                        if distance >= min_distance {
                            break;
                        }
                        removed.union_with(&by_seat[other.row().value()][other.seat().value()]);
                    }
                }
                removed.invert();
                removed
            })
            .collect()
    }

    /// The accessibility partition: the slots covering at least one
    /// accessible seat, and the slots that stay legal even if every
    /// accessible slot were occupied. With no accessible seats the former
    /// is empty and the latter is the full universe.
    fn compute_accessibility(
        venue: &Venue,
        by_seat: &[Vec<SlotSet>],
        safety: &[SlotSet],
        num_slots: usize,
    ) -> (SlotSet, SlotSet) {
        let mut accessible = SlotSet::new(num_slots, false);
        for seat in venue.iter_seats() {
            if seat.accessible() {
                accessible
                    .union_with(&by_seat[seat.row().value()][seat.seat().value()]);
            }
        }

        let mut clear = SlotSet::new(num_slots, true);
        for slot_n in accessible.iter_ones() {
            clear.intersect_with(&safety[slot_n]);
        }

        (accessible, clear)
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline]
    pub fn slot(&self, index: SlotIndex) -> Slot {
        self.slots[index.value()]
    }

    /// All slots of exactly this size. `size` must lie in
    /// `1..=max_group_size`.
    #[inline]
    pub fn size_slots(&self, size: GroupSize) -> &SlotSet {
        assert!(
            !size.is_zero() && size <= self.max_group_size,
            "{} outside 1..={}",
            size,
            self.max_group_size.value()
        );
        &self.by_size[size.value() - 1]
    }

    /// All slots covering the given seat.
    #[inline]
    pub fn seat_slots(&self, coord: SeatCoord) -> &SlotSet {
        &self.by_seat[coord.row().value()][coord.seat().value()]
    }

    /// The slots that remain legal after the given slot is occupied.
    #[inline]
    pub fn safety(&self, index: SlotIndex) -> &SlotSet {
        &self.safety[index.value()]
    }

    #[inline]
    pub fn accessible_slots(&self) -> &SlotSet {
        &self.accessible_slots
    }

    #[inline]
    pub fn clear_of_accessible(&self) -> &SlotSet {
        &self.clear_of_accessible
    }

    /// Other seats of the venue sorted by ascending distance from `coord`.
    #[inline]
    pub fn seat_distances(&self, coord: SeatCoord) -> &[(f64, SeatCoord)] {
        &self.distances[coord.row().value()][coord.seat().value()]
    }

    #[inline]
    pub fn max_group_size(&self) -> GroupSize {
        self.max_group_size
    }

    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seat_alloc_core::space::RowIndex;
    use seat_alloc_model::venue::{RowSpec, SeatSpec};

    fn grid_venue(num_rows: usize, row_len: usize) -> Venue {
        grid_venue_accessible(num_rows, row_len, &[])
    }

    fn grid_venue_accessible(
        num_rows: usize,
        row_len: usize,
        accessible: &[(usize, usize)],
    ) -> Venue {
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

    fn slot(row: usize, seat: usize, size: usize) -> Slot {
        Slot::new(RowIndex::new(row), SeatIndex::new(seat), GroupSize::new(size))
    }

    #[test]
    fn test_slot_enumeration_order_and_count() {
        let venue = grid_venue(2, 3);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        // Per row: 3 size-1 slots + 2 size-2 slots.
        assert_eq!(topology.num_slots(), 10);
        assert!(topology.slots().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(topology.slot(SlotIndex::new(0)), slot(0, 0, 1));
        assert_eq!(topology.slot(SlotIndex::new(1)), slot(0, 0, 2));
    }

    #[test]
    fn test_ragged_rows_limit_slots() {
        let rows = vec![
            RowSpec::new("A", vec![SeatSpec::new(1.0, 1.0, false); 4]),
            RowSpec::new("B", vec![SeatSpec::new(1.0, 2.0, false); 2]),
        ];
        let venue = Venue::new(rows, 1.0, 0.0).unwrap();
        let topology = VenueTopology::new(&venue, GroupSize::new(3), 1.5);
        // Row A: 4+3+2 slots; row B: 2+1 slots.
        assert_eq!(topology.num_slots(), 12);
        assert!(
            topology
                .slots()
                .iter()
                .all(|s| s.row() != RowIndex::new(1) || s.size().value() <= 2)
        );
    }

    #[test]
    fn test_by_size_partitions_universe() {
        let venue = grid_venue(2, 3);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        let ones = topology.size_slots(GroupSize::new(1));
        let twos = topology.size_slots(GroupSize::new(2));
        assert_eq!(ones.count_ones(), 6);
        assert_eq!(twos.count_ones(), 4);
        assert!(ones.is_disjoint(twos));
        assert_eq!(ones.count_ones() + twos.count_ones(), topology.num_slots());
    }

    #[test]
    fn test_by_seat_lists_covering_slots() {
        let venue = grid_venue(1, 3);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        // Universe: (0,1), (0,2 via s0), (1,1), (1,2), (2,1).
        let covering = topology.seat_slots(SeatCoord::new(RowIndex::new(0), SeatIndex::new(1)));
        let covered: Vec<Slot> = covering
            .iter_ones()
            .map(|n| topology.slot(SlotIndex::new(n)))
            .collect();
        assert_eq!(covered, vec![slot(0, 0, 2), slot(0, 1, 1), slot(0, 1, 2)]);
    }

    #[test]
    fn test_seat_distances_are_sorted() {
        let venue = grid_venue(3, 3);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        let distances =
            topology.seat_distances(SeatCoord::new(RowIndex::new(1), SeatIndex::new(1)));
        assert_eq!(distances.len(), 8);
        assert!(distances.windows(2).all(|w| w[0].0 <= w[1].0));
        // Four orthogonal neighbors at distance 1 come first.
        assert!(distances[..4].iter().all(|&(d, _)| d == 1.0));
    }

    #[test]
    fn test_safety_excludes_slot_itself() {
        let venue = grid_venue(2, 4);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        for n in 0..topology.num_slots() {
            assert!(
                !topology.safety(SlotIndex::new(n)).get(n),
                "slot {} must not survive its own placement",
                n
            );
        }
    }

    #[test]
    fn test_safety_blocks_adjacent_seats_in_single_row() {
        // One row of five seats, unit pitch; neighbors within 1.5 get
        // blocked. Occupying seats 1-2 must leave only the size-1 slot at
        // seat 4 legal.
        let venue = grid_venue(1, 5);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        let slot_n = topology
            .slots()
            .iter()
            .position(|&s| s == slot(0, 1, 2))
            .unwrap();
        let legal: Vec<Slot> = topology
            .safety(SlotIndex::new(slot_n))
            .iter_ones()
            .map(|n| topology.slot(SlotIndex::new(n)))
            .collect();
        assert_eq!(legal, vec![slot(0, 4, 1)]);
    }

    #[test]
    fn test_safety_blocks_facing_rows_at_unit_pitch() {
        let venue = grid_venue(2, 3);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        let slot_n = topology
            .slots()
            .iter()
            .position(|&s| s == slot(0, 0, 2))
            .unwrap();
        let legal = topology.safety(SlotIndex::new(slot_n));
        // Everything in row 1 is within 1.5 of seats (0,0)/(0,1) except
        // nothing: facing seats at distance 1, the diagonal at sqrt(2).
        for (n, s) in topology.slots().iter().enumerate() {
            if s.row() == RowIndex::new(1) {
                assert!(!legal.get(n), "slot {} should be blocked", s);
            }
        }
    }

    #[test]
    fn test_accessibility_partition() {
        let venue = grid_venue_accessible(2, 3, &[(0, 0)]);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        let accessible: Vec<Slot> = topology
            .accessible_slots()
            .iter_ones()
            .map(|n| topology.slot(SlotIndex::new(n)))
            .collect();
        assert_eq!(accessible, vec![slot(0, 0, 1), slot(0, 0, 2)]);
        // Clear slots never touch an accessible slot's footprint.
        for n in topology.clear_of_accessible().iter_ones() {
            let s = topology.slot(SlotIndex::new(n));
            assert!(!s.covers(SeatCoord::new(RowIndex::new(0), SeatIndex::new(0))));
        }
        assert!(topology.clear_of_accessible().any());
    }

    #[test]
    fn test_accessibility_partition_without_accessible_seats() {
        let venue = grid_venue(2, 3);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        assert!(!topology.accessible_slots().any());
        assert_eq!(
            topology.clear_of_accessible().count_ones(),
            topology.num_slots()
        );
    }

    #[test]
    #[should_panic(expected = "outside 1..=")]
    fn test_size_slots_rejects_out_of_range() {
        let venue = grid_venue(1, 3);
        let topology = VenueTopology::new(&venue, GroupSize::new(2), 1.5);
        let _ = topology.size_slots(GroupSize::new(3));
    }
}
