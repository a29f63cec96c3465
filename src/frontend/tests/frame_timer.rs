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

//! Unit tests for FrameTimer

use crate::frontend::frame_timer::{FrameTimer, MAX_FRAME_DELTA_MS};
use std::time::Duration;

#[test]
fn test_frame_timer_new() {
    let timer = FrameTimer::new(60);
    assert_eq!(timer.fps(), 0.0);
    assert_eq!(timer.frame_time_ms(), 0.0);
    assert_eq!(timer.frame_count(), 0);
}

#[test]
fn test_tick_reports_whole_milliseconds() {
    let mut timer = FrameTimer::new(60);
    let start = timer.next_frame_instant() - Duration::from_nanos(1_000_000_000 / 60);

    assert_eq!(timer.tick_at(start + Duration::from_micros(16_600)), 16);
    assert_eq!(timer.frame_count(), 1);
    assert!(timer.frame_time_ms() > 16.0);
}

#[test]
fn test_tick_carries_remainder() {
    let mut timer = FrameTimer::new(60);
    let start = timer.next_frame_instant() - Duration::from_nanos(1_000_000_000 / 60);

    // 3 x 16.5 ms = 49.5 ms
    let mut total = 0;
    for i in 1..=3 {
        total += timer.tick_at(start + Duration::from_micros(16_500 * i));
    }
    assert_eq!(total, 49);
}

#[test]
fn test_tick_clamps_long_frames() {
    let mut timer = FrameTimer::new(60);
    let start = timer.next_frame_instant() - Duration::from_nanos(1_000_000_000 / 60);

    assert_eq!(timer.tick_at(start + Duration::from_secs(30)), MAX_FRAME_DELTA_MS);
    // Nothing of the long frame leaks into the next one
    assert_eq!(
        timer.tick_at(start + Duration::from_secs(30) + Duration::from_millis(5)),
        5
    );
}

#[test]
fn test_frame_timer_fps_calculation() {
    let mut timer = FrameTimer::new(60);
    let start = timer.next_frame_instant() - Duration::from_nanos(1_000_000_000 / 60);

    for i in 1..=61 {
        timer.tick_at(start + Duration::from_millis(17 * i));
    }

    assert!(timer.fps() > 50.0 && timer.fps() < 70.0);
    assert_eq!(timer.frame_count(), 61);
}

#[test]
fn test_frame_timer_default() {
    let timer = FrameTimer::default();
    assert_eq!(timer.frame_count(), 0);
}
