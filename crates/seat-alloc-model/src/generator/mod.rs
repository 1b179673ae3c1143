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

mod config;
mod err;

pub use config::{GenConfig, GenConfigBuilder};
pub use err::GenConfigBuildError;

use crate::{
    req::Requirements,
    venue::{RowSpec, SeatSpec, Venue},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use std::collections::HashSet;

/// Deterministic fake-instance generator: a rectangular grid venue with the
/// stage centered in front of the first row, plus a seeded random group
/// queue. The same config always yields the same instance.
pub struct InstanceGenerator {
    config: GenConfig,
    rng: ChaCha8Rng,
    size_distribution: Uniform<usize>,
}

impl From<GenConfig> for InstanceGenerator {
    fn from(config: GenConfig) -> Self {
        Self::new(config)
    }
}

impl InstanceGenerator {
    pub fn new(config: GenConfig) -> Self {
        Self {
            size_distribution: Uniform::new_inclusive(
                config.min_group_size().value(),
                config.max_group_size().value(),
            )
            .expect("valid [min_group_size, max_group_size]"),
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Builds the venue and draws the group queue.
    pub fn generate(&mut self) -> (Venue, Requirements) {
        let venue = self.generate_venue();
        let requirements = self.generate_requirements();
        (venue, requirements)
    }

    fn generate_venue(&self) -> Venue {
        let accessible: HashSet<(usize, usize)> =
            self.config.accessible_seats().iter().copied().collect();

        let rows = (0..self.config.num_rows())
            .map(|row_n| {
                let seats = (0..self.config.row_len())
                    .map(|seat_n| {
                        SeatSpec::new(
                            1.0 + seat_n as f64 * self.config.seat_pitch(),
                            1.0 + row_n as f64 * self.config.row_pitch(),
                            accessible.contains(&(row_n, seat_n)),
                        )
                    })
                    .collect();
                RowSpec::new(row_name(row_n), seats)
            })
            .collect();

        let stage_x = 1.0 + (self.config.row_len() as f64 - 1.0) * self.config.seat_pitch() / 2.0;
        Venue::new(rows, stage_x, 0.0).expect("generated venue is well-formed")
    }

    fn generate_requirements(&mut self) -> Requirements {
        let mut requirements = Requirements::new(
            self.config.max_group_size(),
            self.config.min_distance(),
        )
        .expect("generator config implies valid requirements");

        for group_n in 0..self.config.num_groups() {
            let size = self.size_distribution.sample(&mut self.rng);
            let accessibility = self.rng.random_bool(self.config.accessibility_rate());
            requirements
                .push_group(format!("party-{}", group_n), size.into(), accessibility)
                .expect("sampled group size within bounds");
        }

        requirements
    }
}

fn row_name(row_n: usize) -> String {
    if row_n < 26 {
        char::from(b'A' + row_n as u8).to_string()
    } else {
        format!("R{}", row_n)
    }
}
