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

use seat_alloc_core::space::GroupSize;
use seat_alloc_model::prelude::*;
use seat_alloc_solver::{indexed::IndexedPlacement, search::SearchManager};
use serde::Serialize;
use std::{fs::File, io::BufWriter, time::Instant};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct InstanceInfo {
    idx: usize,
    seed: u64,
    num_rows: usize,
    row_len: usize,
    num_groups: usize,
    min_distance: f64,
    accessibility_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    instance: InstanceInfo,
    success: bool,
    groups_placed: usize,
    groups_declined: usize,
    seats_occupied: usize,
    seats_blocked: usize,
    seats_empty: usize,
    elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
struct PlacementReport {
    description: String,
    instances: Vec<RunResult>,
}

fn interpolate_u(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    let num = (val1 as isize - val0 as isize) * step as isize;
    (val0 as isize + num / (steps as isize - 1)).max(0) as usize
}

fn main() {
    enable_tracing();

    // A ramp from small to big across 8 instances.
    let n_instances = 8usize;

    let min_rows = 4usize;
    let max_rows = 12usize;
    let min_row_len = 8usize;
    let max_row_len = 20usize;
    let min_groups = 6usize;
    let max_groups = 40usize;

    let min_distance = 1.5;
    let accessibility_rate = 0.1;

    let mut results: Vec<RunResult> = Vec::with_capacity(n_instances);

    for i in 0..n_instances {
        let num_rows = interpolate_u(min_rows, max_rows, i, n_instances);
        let row_len = interpolate_u(min_row_len, max_row_len, i, n_instances);
        let num_groups = interpolate_u(min_groups, max_groups, i, n_instances);
        let seed: u64 = 42 + (i as u64);

        let config = GenConfigBuilder::new()
            .num_rows(num_rows)
            .row_len(row_len)
            .num_groups(num_groups)
            .group_size_range(GroupSize::new(1), GroupSize::new(4))
            .min_distance(min_distance)
            .accessibility_rate(accessibility_rate)
            .accessible_row(0)
            .seed(seed)
            .build()
            .expect("valid instance config");

        let mut generator = InstanceGenerator::new(config);
        let (venue, requirements) = generator.generate();

        let space = IndexedPlacement::new(&venue, &requirements);
        let mut manager = SearchManager::new(space);
        let t0 = Instant::now();
        let solution = manager.run(&requirements).expect("placement run");
        let elapsed = t0.elapsed();

        println!(
            "instance {} ({} rows x {} seats, {} groups):",
            i, num_rows, row_len, num_groups
        );
        println!("{}", solution);

        results.push(RunResult {
            instance: InstanceInfo {
                idx: i,
                seed,
                num_rows,
                row_len,
                num_groups,
                min_distance,
                accessibility_rate,
            },
            success: solution.success(),
            groups_placed: solution.num_groups_placed(),
            groups_declined: solution.num_groups_declined(),
            seats_occupied: solution.num_seats_occupied(),
            seats_blocked: solution.num_seats_blocked(),
            seats_empty: solution.num_seats_empty(),
            elapsed_ms: elapsed.as_millis(),
        });
    }

    let report = PlacementReport {
        description: "Seat allocation benchmark: 8 instances from small to big, \
                      distancing 1.5 with an accessible front row."
            .into(),
        instances: results,
    };

    let file = File::create("placement_results.json").expect("create placement_results.json");
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report).expect("write json report");

    println!();
    println!("=================================================================");
    println!("======================= Placement Done ==========================");
    println!("=================================================================");
    println!();
    println!("Wrote: placement_results.json");
}
