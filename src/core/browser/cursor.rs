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

//! List selection with held-key auto-repeat

/// Hold time before auto-repeat kicks in (ms)
pub const SCROLL_DELAY_MS: u32 = 500;

/// Interval between repeated steps (ms)
pub const SCROLL_REPEAT_MS: u32 = 100;

/// Selected row of the game list
///
/// Single steps wrap around at both ends, larger steps stop at the first or
/// last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCursor {
    len: usize,
    selected: usize,
    /// Step repeated while a key is held, 0 when idle
    scroll_step: i32,
    held_ms: u32,
    repeat_ms: u32,
}

impl ListCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the list length, keeping the selection in range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select `index`, clamped to the list
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.len.saturating_sub(1));
    }

    #[inline(always)]
    pub fn is_scrolling(&self) -> bool {
        self.scroll_step != 0
    }

    /// Move by `step` rows; returns whether the selection changed
    pub fn step(&mut self, step: i32) -> bool {
        if self.len == 0 || step == 0 {
            return false;
        }

        let len = self.len as i64;
        let target = self.selected as i64 + i64::from(step);
        let next = if step.abs() == 1 {
            target.rem_euclid(len)
        } else {
            target.clamp(0, len - 1)
        };

        let changed = next as usize != self.selected;
        self.selected = next as usize;
        changed
    }

    /// Key down: move once and start the repeat timer
    pub fn press(&mut self, step: i32) -> bool {
        self.scroll_step = step;
        self.held_ms = 0;
        self.repeat_ms = 0;
        self.step(step)
    }

    /// Key up
    pub fn release(&mut self) {
        self.stop_scrolling();
    }

    /// Cancel any auto-repeat
    pub fn stop_scrolling(&mut self) {
        self.scroll_step = 0;
        self.held_ms = 0;
        self.repeat_ms = 0;
    }

    /// Advance the repeat timer; returns whether the selection changed
    pub fn update(&mut self, delta_ms: u32) -> bool {
        if self.scroll_step == 0 {
            return false;
        }

        let before = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(delta_ms);
        if self.held_ms < SCROLL_DELAY_MS {
            return false;
        }

        // Only time past the delay counts towards repeats
        let repeating = self.held_ms - before.max(SCROLL_DELAY_MS);
        self.repeat_ms = self.repeat_ms.saturating_add(repeating);
        let mut changed = false;
        while self.repeat_ms >= SCROLL_REPEAT_MS {
            self.repeat_ms -= SCROLL_REPEAT_MS;
            changed |= self.step(self.scroll_step);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(len: usize) -> ListCursor {
        let mut cursor = ListCursor::new();
        cursor.set_len(len);
        cursor
    }

    #[test]
    fn test_single_steps_wrap() {
        let mut c = cursor(3);
        assert!(c.step(-1));
        assert_eq!(c.selected(), 2);
        assert!(c.step(1));
        assert_eq!(c.selected(), 0);
    }

    #[test]
    fn test_pages_clamp() {
        let mut c = cursor(25);
        c.step(10);
        c.step(10);
        assert_eq!(c.selected(), 20);
        c.step(10);
        assert_eq!(c.selected(), 24);
        assert!(!c.step(10));
        c.step(-10);
        c.step(-10);
        c.step(-10);
        assert_eq!(c.selected(), 0);
    }

    #[test]
    fn test_empty_list() {
        let mut c = cursor(0);
        assert!(!c.step(1));
        assert_eq!(c.selected(), 0);
        c.select(5);
        assert_eq!(c.selected(), 0);
    }

    #[test]
    fn test_set_len_clamps_selection() {
        let mut c = cursor(10);
        c.select(9);
        c.set_len(4);
        assert_eq!(c.selected(), 3);
    }

    #[test]
    fn test_auto_repeat() {
        let mut c = cursor(50);
        assert!(c.press(1));
        assert_eq!(c.selected(), 1);

        assert!(!c.update(SCROLL_DELAY_MS - 1));
        assert_eq!(c.selected(), 1);

        // Past the delay, one step per repeat interval
        c.update(1 + SCROLL_REPEAT_MS);
        assert_eq!(c.selected(), 2);
        c.update(SCROLL_REPEAT_MS * 3);
        assert_eq!(c.selected(), 5);

        c.release();
        assert!(!c.is_scrolling());
        assert!(!c.update(10_000));
        assert_eq!(c.selected(), 5);
    }

    #[test]
    fn test_stop_scrolling() {
        let mut c = cursor(50);
        c.press(10);
        c.stop_scrolling();
        assert!(!c.update(SCROLL_DELAY_MS * 4));
        assert_eq!(c.selected(), 10);
    }
}
