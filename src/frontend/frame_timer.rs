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

//! Frame clock
//!
//! Paces redraws at a target rate and hands the browser the elapsed time of
//! each frame in milliseconds.

use std::time::{Duration, Instant};

/// Longest delta reported for a single frame (ms)
///
/// Launching a game blocks the event loop until the emulator exits; without
/// the clamp the first frame afterwards would skip the whole return effect.
pub const MAX_FRAME_DELTA_MS: u32 = 100;

/// Frame clock for the browser UI
///
/// # Example
///
/// ```no_run
/// use romshelf::frontend::FrameTimer;
///
/// let mut timer = FrameTimer::new(60);
///
/// loop {
///     if timer.should_run_frame() {
///         let delta_ms = timer.tick();
///         println!("{} ms, {:.1} FPS", delta_ms, timer.fps());
///     }
/// }
/// ```
pub struct FrameTimer {
    /// Target frame time
    target_frame_time: Duration,
    /// Time when the last frame was executed
    last_frame: Instant,
    /// Sub-millisecond remainder carried into the next delta
    carry: Duration,
    /// Total number of frames executed
    frame_count: u64,
    /// Current FPS (frames per second)
    fps: f32,
    /// Duration of the last frame in milliseconds, unclamped
    frame_time_ms: f32,
    /// Time when FPS calculation started
    fps_start: Instant,
    /// Frames since last FPS calculation
    fps_frame_count: u64,
}

impl FrameTimer {
    /// Create a clock targeting `target_fps`
    ///
    /// # Arguments
    ///
    /// * `target_fps` - Frames per second; sets the [`should_run_frame`]
    ///   interval
    ///
    /// [`should_run_frame`]: FrameTimer::should_run_frame
    ///
    /// # Panics
    ///
    /// Panics if `target_fps` is 0
    pub fn new(target_fps: u32) -> Self {
        assert!(target_fps > 0, "target_fps must be greater than 0");
        let target_frame_time = Duration::from_nanos(1_000_000_000 / target_fps as u64);
        let now = Instant::now();

        Self {
            target_frame_time,
            last_frame: now,
            carry: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            frame_time_ms: 0.0,
            fps_start: now,
            fps_frame_count: 0,
        }
    }

    /// Start a new frame
    ///
    /// Returns the whole milliseconds elapsed since the previous frame,
    /// clamped to [`MAX_FRAME_DELTA_MS`]. The fractional rest is carried over
    /// so slow drift does not accumulate.
    ///
    /// # Returns
    ///
    /// Delta in milliseconds to hand to the browser's own `tick`
    ///
    /// # Example
    ///
    /// ```
    /// use romshelf::frontend::frame_timer::{FrameTimer, MAX_FRAME_DELTA_MS};
    ///
    /// let mut timer = FrameTimer::new(60);
    /// let delta_ms = timer.tick();
    /// assert!(delta_ms <= MAX_FRAME_DELTA_MS);
    /// assert_eq!(timer.frame_count(), 1);
    /// ```
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        self.tick_at(now)
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.frame_time_ms = elapsed.as_secs_f32() * 1000.0;

        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Calculate FPS approximately once per second
        let fps_elapsed = now.saturating_duration_since(self.fps_start);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_start = now;
        }

        self.last_frame = now;

        let total = elapsed + self.carry;
        let whole_ms = total.as_millis();
        if whole_ms >= u128::from(MAX_FRAME_DELTA_MS) {
            self.carry = Duration::ZERO;
            return MAX_FRAME_DELTA_MS;
        }
        let delta = whole_ms as u32;
        self.carry = total - Duration::from_millis(u64::from(delta));
        delta
    }

    /// Check whether the next frame is due
    #[inline(always)]
    pub fn should_run_frame(&self) -> bool {
        self.last_frame.elapsed() >= self.target_frame_time
    }

    /// Instant the next frame is due, for `ControlFlow::WaitUntil`
    #[inline(always)]
    pub fn next_frame_instant(&self) -> Instant {
        self.last_frame + self.target_frame_time
    }

    /// Most recent FPS reading, updated about once per second
    #[inline(always)]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline(always)]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    #[inline(always)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(60)
    }
}
