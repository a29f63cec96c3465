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

//! Sizing rules and text formatting for the detail pane

use crate::core::geometry::Vec2;
use chrono::{DateTime, NaiveDate, Utc};

/// Size of an image of `native` pixels resized into `target`
///
/// Both target dimensions set stretches to exactly `target`. A zero
/// dimension is derived from the other one, keeping the aspect ratio. With
/// both zero the native size is kept.
pub fn resize_to(native: (u32, u32), target: Vec2) -> Vec2 {
    let (w, h) = (native.0 as f32, native.1 as f32);
    if w <= 0.0 || h <= 0.0 {
        return Vec2::ZERO;
    }

    match (target.x > 0.0, target.y > 0.0) {
        (true, true) => target,
        (true, false) => Vec2::new(target.x, h * target.x / w),
        (false, true) => Vec2::new(w * target.y / h, target.y),
        (false, false) => Vec2::new(w, h),
    }
}

/// Size of an image of `native` pixels in a stack column `width` wide
///
/// Images wider than the column shrink to fit; narrower ones grow only when
/// `upscale` is set.
pub fn fit_width(native: (u32, u32), width: f32, upscale: bool) -> Vec2 {
    let (w, h) = (native.0 as f32, native.1 as f32);
    if w <= 0.0 || h <= 0.0 {
        return Vec2::ZERO;
    }
    if width <= 0.0 {
        return Vec2::new(w, h);
    }

    let scale = width / w;
    let scale = if upscale { scale } else { scale.min(1.0) };
    Vec2::new(w * scale, h * scale)
}

/// Release date as shown in the pane
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}

/// `then` relative to `now`, e.g. "3 hours ago"
pub fn format_relative(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(then) = then else {
        return "never".to_string();
    };

    let elapsed = now.signed_duration_since(then);
    let secs = elapsed.num_seconds();
    if secs < 0 {
        return then.format("%Y-%m-%d").to_string();
    }

    let (amount, unit) = if secs < 60 {
        (secs, "second")
    } else if elapsed.num_minutes() < 60 {
        (elapsed.num_minutes(), "minute")
    } else if elapsed.num_hours() < 24 {
        (elapsed.num_hours(), "hour")
    } else {
        (elapsed.num_days(), "day")
    };

    if amount == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", amount, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_resize_to() {
        assert_eq!(resize_to((200, 100), Vec2::new(100.0, 0.0)), Vec2::new(100.0, 50.0));
        assert_eq!(resize_to((200, 100), Vec2::new(0.0, 25.0)), Vec2::new(50.0, 25.0));
        assert_eq!(resize_to((200, 100), Vec2::new(10.0, 10.0)), Vec2::new(10.0, 10.0));
        assert_eq!(resize_to((200, 100), Vec2::ZERO), Vec2::new(200.0, 100.0));
        assert_eq!(resize_to((0, 0), Vec2::new(100.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width((400, 200), 100.0, false), Vec2::new(100.0, 50.0));
        assert_eq!(fit_width((50, 50), 100.0, false), Vec2::new(50.0, 50.0));
        assert_eq!(fit_width((50, 50), 100.0, true), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative(None, now), "never");
        assert_eq!(format_relative(Some(now), now), "0 seconds ago");
        assert_eq!(format_relative(Some(now - Duration::minutes(1)), now), "1 minute ago");
        assert_eq!(format_relative(Some(now - Duration::hours(5)), now), "5 hours ago");
        assert_eq!(format_relative(Some(now - Duration::days(40)), now), "40 days ago");
        assert_eq!(format_relative(Some(now + Duration::days(1)), now), "2024-05-02");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(1994, 3, 19)), "1994-03-19");
        assert_eq!(format_date(None), "unknown");
    }
}
