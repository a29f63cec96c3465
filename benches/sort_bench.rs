// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Folder sort benchmarks

use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use romshelf::core::library::{GameMetadata, LibraryTree, NodeId, SORT_STATES};
use std::hint::black_box;

fn build_tree(games: usize) -> (LibraryTree, NodeId) {
    let mut tree = LibraryTree::new("bench", "/roms/bench");
    let root = tree.root();
    for i in 0..games {
        // Scrambled so every sort has real work to do
        let key = (i * 7919) % games;
        let metadata = GameMetadata {
            rating: (key % 11) as f32 / 10.0,
            times_played: (key % 37) as u32,
            release_date: NaiveDate::from_ymd_opt(1980 + (key % 40) as i32, 1 + (key % 12) as u32, 1),
            last_played: (key % 3 != 0)
                .then(|| Utc.timestamp_opt(1_600_000_000 + key as i64 * 60, 0).unwrap()),
            ..GameMetadata::default()
        };
        tree.add_game(
            root,
            &format!("Game {:05}", key),
            format!("/roms/bench/game{}.bin", i),
            metadata,
        )
        .unwrap();
    }
    (tree, root)
}

fn bench_sort_states(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_folder");
    let (tree, root) = build_tree(5_000);

    for (index, state) in SORT_STATES.iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(state.label), &index, |b, &index| {
            b.iter_batched_ref(
                || tree.clone(),
                |tree| tree.sort_folder(black_box(root), black_box(index)).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_sort_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_by_name");
    for games in [100, 1_000, 10_000] {
        let (tree, root) = build_tree(games);
        group.bench_with_input(BenchmarkId::from_parameter(games), &games, |b, _| {
            b.iter_batched_ref(
                || tree.clone(),
                |tree| tree.sort_folder(black_box(root), 0).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort_states, bench_sort_sizes);
criterion_main!(benches);
