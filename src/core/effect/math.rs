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

//! Interpolation helpers

use crate::core::geometry::Vec2;

/// Linear interpolation that saturates outside `0.0..1.0`
///
/// `t <= 0` yields exactly `start`, `t >= 1` exactly `end`.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return start;
    }
    if t >= 1.0 {
        return end;
    }
    start * (1.0 - t) + end * t
}

/// [`lerp`] on both components
#[inline]
pub fn lerp_vec2(start: Vec2, end: Vec2, t: f32) -> Vec2 {
    if t <= 0.0 {
        return start;
    }
    if t >= 1.0 {
        return end;
    }
    start * (1.0 - t) + end * t
}

#[inline(always)]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Quintic smoothstep on `0.0..=1.0` (`6x^5 - 15x^4 + 10x^3`)
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = clamp01(x);
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}
