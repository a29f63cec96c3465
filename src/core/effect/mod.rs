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

//! Launch and system-switch transitions
//!
//! # Launch effect
//!
//! ```text
//! Idle --start()--> Launching --(t > D) LaunchDue--> finish_launch()
//!                                                        |
//! Idle <--(t >= D) Finished-- Returning <----------------+
//! ```
//!
//! While launching, with `tn = clamp01(t / D)`:
//!
//! - camera center: `lerp(screen_center, target, smoothstep(tn))`
//! - zoom: `lerp(1, 3, tn²)`
//! - fade: `lerp(0, 1, (t - (D - 600)) / (D - (D - 600) - 100))`
//!
//! Returning evaluates the same curves at `D - t`. The sequencer only
//! computes numbers; applying them to the screen is up to the renderer.

mod math;

pub use math::{clamp01, lerp, lerp_vec2, smoothstep};

use crate::core::geometry::Vec2;

/// Shortest launch effect (ms)
pub const MIN_LAUNCH_EFFECT_MS: u32 = 800;

/// Fade starts this long before the end of the effect (ms)
pub const FADE_LEAD_MS: i64 = 600;

/// Fade completes this long before the end of the effect (ms)
pub const FADE_TAIL_MS: i64 = 100;

/// Maximum zoom reached at the end of the launch
pub const MAX_ZOOM: f32 = 3.0;

/// Length of the system switch slide (ms)
pub const SLIDE_DURATION_MS: u32 = 250;

/// Launch effect length for a confirmation sound of `sound_ms`
#[inline]
pub fn launch_duration(sound_ms: u32) -> u32 {
    sound_ms.max(MIN_LAUNCH_EFFECT_MS)
}

/// Phase of the launch effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectState {
    #[default]
    Idle,
    Launching,
    Returning,
}

/// Camera parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectFrame {
    /// Screen point the camera looks at
    pub center: Vec2,
    /// Scale around `center`, 1.0 is unzoomed
    pub zoom: f32,
    /// Black overlay opacity, `0.0..=1.0`
    pub fade: f32,
}

impl EffectFrame {
    /// Untransformed view
    pub fn identity(screen_center: Vec2) -> Self {
        Self {
            center: screen_center,
            zoom: 1.0,
            fade: 0.0,
        }
    }

    /// Evaluate the launch curves at `t` ms of a `duration_ms` effect
    pub fn at(t: i64, duration_ms: u32, screen_center: Vec2, target: Vec2) -> Self {
        let end = i64::from(duration_ms.max(1));
        let fade_delay = end - FADE_LEAD_MS;
        let fade_time = end - fade_delay - FADE_TAIL_MS;

        let tn = clamp01(t as f32 / end as f32);
        Self {
            center: lerp_vec2(screen_center, target, smoothstep(tn)),
            zoom: lerp(1.0, MAX_ZOOM, tn * tn),
            fade: lerp(0.0, 1.0, (t - fade_delay) as f32 / fade_time as f32),
        }
    }
}

/// What the caller has to do after [`LaunchEffectSequencer::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEvent {
    /// Nothing
    None,
    /// The launch animation is over: run the game, then call
    /// [`LaunchEffectSequencer::finish_launch`]
    LaunchDue,
    /// The return animation is over and the sequencer is idle again
    Finished,
}

/// Tick-driven launch/return state machine
#[derive(Debug, Clone)]
pub struct LaunchEffectSequencer {
    state: EffectState,
    elapsed_ms: i64,
    duration_ms: u32,
    frame: Option<EffectFrame>,
}

impl Default for LaunchEffectSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchEffectSequencer {
    pub fn new() -> Self {
        Self {
            state: EffectState::Idle,
            elapsed_ms: 0,
            duration_ms: MIN_LAUNCH_EFFECT_MS,
            frame: None,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> EffectState {
        self.state
    }

    /// Navigation input is ignored unless idle
    #[inline(always)]
    pub fn is_locked(&self) -> bool {
        self.state != EffectState::Idle
    }

    #[inline(always)]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    #[inline(always)]
    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    /// Frame computed by the last update, `None` when idle
    #[inline(always)]
    pub fn frame(&self) -> Option<EffectFrame> {
        self.frame
    }

    /// Begin the launch animation
    ///
    /// Ignored unless idle, so a running effect can never be restarted.
    /// Returns whether the effect started.
    pub fn start(&mut self, duration_ms: u32) -> bool {
        if self.state != EffectState::Idle {
            log::debug!("Launch effect already running ({:?})", self.state);
            return false;
        }
        self.state = EffectState::Launching;
        self.elapsed_ms = 0;
        self.duration_ms = duration_ms.max(1);
        self.frame = None;
        true
    }

    /// Advance by `delta_ms` and recompute the frame
    pub fn update(&mut self, delta_ms: u32, screen_center: Vec2, target: Vec2) -> EffectEvent {
        let duration = i64::from(self.duration_ms);
        match self.state {
            EffectState::Idle => EffectEvent::None,
            EffectState::Launching => {
                self.elapsed_ms += i64::from(delta_ms);
                self.frame = Some(EffectFrame::at(
                    self.elapsed_ms,
                    self.duration_ms,
                    screen_center,
                    target,
                ));
                if self.elapsed_ms > duration {
                    EffectEvent::LaunchDue
                } else {
                    EffectEvent::None
                }
            }
            EffectState::Returning => {
                self.elapsed_ms += i64::from(delta_ms);
                if self.elapsed_ms >= duration {
                    self.state = EffectState::Idle;
                    self.frame = None;
                    return EffectEvent::Finished;
                }
                self.frame = Some(EffectFrame::at(
                    duration - self.elapsed_ms,
                    self.duration_ms,
                    screen_center,
                    target,
                ));
                EffectEvent::None
            }
        }
    }

    /// Switch from launching to returning once the game has exited
    pub fn finish_launch(&mut self) {
        if self.state != EffectState::Launching {
            log::warn!("finish_launch called while {:?}", self.state);
            return;
        }
        self.state = EffectState::Returning;
        self.elapsed_ms = 0;
    }
}

/// Horizontal slide played when switching systems
///
/// `offset` is measured in screen widths: the new view starts at
/// `direction` and slides to 0, the previous screen image follows at
/// `offset - direction`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlideTransition {
    direction: i32,
    elapsed_ms: u32,
    active: bool,
}

impl SlideTransition {
    /// Start sliding; `direction` is the sign of the system index delta
    pub fn start(&mut self, delta: i32) {
        self.direction = delta.signum();
        self.elapsed_ms = 0;
        self.active = self.direction != 0;
    }

    pub fn update(&mut self, delta_ms: u32) {
        if !self.active {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms >= SLIDE_DURATION_MS {
            self.active = false;
        }
    }

    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline(always)]
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Current offset of the new view in screen widths
    pub fn offset(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        let t = self.elapsed_ms as f32 / SLIDE_DURATION_MS as f32;
        // Ease out
        let remaining = 1.0 - clamp01(t);
        self.direction as f32 * remaining * remaining
    }
}
