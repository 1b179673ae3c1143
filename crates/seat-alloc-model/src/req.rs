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

use crate::{err::RequirementsError, id::GroupId};
use seat_alloc_core::space::GroupSize;
use serde::Serialize;
use std::fmt::Display;

/// An external placement request: a named party of `size` people, possibly
/// asking for accessibility seating. Immutable once queued; placement is
/// recorded by the solution, never on the group itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    id: GroupId,
    name: String,
    size: GroupSize,
    accessibility: bool,
}

impl Group {
    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> GroupSize {
        self.size
    }

    #[inline]
    pub fn accessibility(&self) -> bool {
        self.accessibility
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} pers", self.name, self.size.value())?;
        if self.accessibility {
            write!(f, " with accessibility")?;
        }
        Ok(())
    }
}

/// The ordered group queue plus the placement constraints: the maximum
/// group size the venue accepts and the minimum physical distance to keep
/// between distinct groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Requirements {
    group_queue: Vec<Group>,
    max_group_size: GroupSize,
    min_distance: f64,
}

impl Requirements {
    pub fn new(max_group_size: GroupSize, min_distance: f64) -> Result<Self, RequirementsError> {
        if max_group_size.is_zero() {
            return Err(RequirementsError::ZeroMaxGroupSize);
        }
        if !min_distance.is_finite() || min_distance < 0.0 {
            return Err(RequirementsError::InvalidMinDistance {
                value: min_distance,
            });
        }
        Ok(Self {
            group_queue: Vec::new(),
            max_group_size,
            min_distance,
        })
    }

    /// Appends a group to the queue, assigning it the next [`GroupId`].
    pub fn push_group(
        &mut self,
        name: impl Into<String>,
        size: GroupSize,
        accessibility: bool,
    ) -> Result<GroupId, RequirementsError> {
        let name = name.into();
        if size.is_zero() {
            return Err(RequirementsError::ZeroGroupSize { name });
        }
        if size > self.max_group_size {
            return Err(RequirementsError::GroupTooLarge {
                name,
                size,
                max: self.max_group_size,
            });
        }
        let id = GroupId::new(self.group_queue.len() as u64);
        self.group_queue.push(Group {
            id,
            name,
            size,
            accessibility,
        });
        Ok(id)
    }

    #[inline]
    pub fn group_queue(&self) -> &[Group] {
        &self.group_queue
    }

    #[inline]
    pub fn num_groups(&self) -> usize {
        self.group_queue.len()
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

    #[test]
    fn test_zero_max_group_size_is_rejected() {
        assert_eq!(
            Requirements::new(GroupSize::new(0), 1.0),
            Err(RequirementsError::ZeroMaxGroupSize)
        );
    }

    #[test]
    fn test_invalid_min_distance_is_rejected() {
        assert!(Requirements::new(GroupSize::new(2), -1.0).is_err());
        assert!(Requirements::new(GroupSize::new(2), f64::NAN).is_err());
        assert!(Requirements::new(GroupSize::new(2), 0.0).is_ok());
    }

    #[test]
    fn test_push_group_assigns_sequential_ids() {
        let mut req = Requirements::new(GroupSize::new(4), 1.5).unwrap();
        let a = req.push_group("a", GroupSize::new(2), false).unwrap();
        let b = req.push_group("b", GroupSize::new(4), true).unwrap();
        assert_eq!(a, GroupId::new(0));
        assert_eq!(b, GroupId::new(1));
        assert_eq!(req.num_groups(), 2);
        assert!(req.group_queue()[1].accessibility());
    }

    #[test]
    fn test_group_size_bounds_are_enforced() {
        let mut req = Requirements::new(GroupSize::new(3), 1.5).unwrap();
        assert!(matches!(
            req.push_group("zero", GroupSize::new(0), false),
            Err(RequirementsError::ZeroGroupSize { .. })
        ));
        assert!(matches!(
            req.push_group("big", GroupSize::new(4), false),
            Err(RequirementsError::GroupTooLarge { .. })
        ));
        assert_eq!(req.num_groups(), 0);
    }

    #[test]
    fn test_group_display() {
        let mut req = Requirements::new(GroupSize::new(3), 1.5).unwrap();
        req.push_group("family", GroupSize::new(3), true).unwrap();
        assert_eq!(
            req.group_queue()[0].to_string(),
            "family of 3 pers with accessibility"
        );
    }
}
