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

//! # Seat Allocation Model (`seat-alloc-model`)
//!
//! The domain data model for the seat allocation engine, built on the
//! primitives of `seat-alloc-core`.
//!
//! ## Key data structures
//!
//! - **[`venue::Venue`]**: validated venue geometry: ordered rows of seats
//!   with physical positions, accessibility flags, and the derived
//!   desirability `value` of every seat (a normalized function of distance
//!   and viewing angle to the stage center, used only for scoring).
//!
//! - **[`req::Requirements`]**: the ordered group queue together with the
//!   maximum group size and the minimum physical distance to keep between
//!   separate groups. Invalid inputs (zero sizes, oversized groups,
//!   negative distances) are rejected at this boundary, before any search
//!   begins.
//!
//! - **[`sol::Solution`]**: the final artifact: per-group slot
//!   assignments, aggregate counts, and the full seat-by-seat status grid
//!   (`EMPTY | OCCUPIED | BLOCKED`).
//!
//! - **[`generator`]**: deterministic fake venue and group queue
//!   generation for demos, benches, and tests.

pub mod err;
pub mod generator;
pub mod id;
pub mod req;
pub mod sol;
pub mod venue;

pub mod prelude {
    pub use crate::err::{RequirementsError, VenueError};
    pub use crate::generator::{GenConfig, GenConfigBuilder, InstanceGenerator};
    pub use crate::id::GroupId;
    pub use crate::req::{Group, Requirements};
    pub use crate::sol::{SeatCell, SeatStatus, Solution, StatusGrid};
    pub use crate::venue::{Row, RowSpec, Seat, SeatSpec, Venue};
}
