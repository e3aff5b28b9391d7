//! Double-tap detection for touch input.
//!
//! Mouse users get the native `dblclick` event; touch pointers have no
//! such event, so two taps on the same card inside the configured window
//! count as a double activation.

use crate::models::TaskId;

/// Default double-tap window in milliseconds
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleTap {
    window_ms: f64,
    last: Option<(TaskId, f64)>,
}

impl DoubleTap {
    pub fn new(window_ms: f64) -> Self {
        Self { window_ms, last: None }
    }

    /// Register a tap on `id` at `now_ms`. Returns true when it completes a
    /// double tap; the detector then resets so a third tap starts over.
    pub fn tap(&mut self, id: TaskId, now_ms: f64) -> bool {
        match self.last {
            Some((last_id, at)) if last_id == id && now_ms - at <= self.window_ms => {
                self.last = None;
                true
            }
            _ => {
                self.last = Some((id, now_ms));
                false
            }
        }
    }
}

impl Default for DoubleTap {
    fn default() -> Self {
        Self::new(DOUBLE_TAP_WINDOW_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_quick_taps() {
        let mut detector = DoubleTap::default();
        assert!(!detector.tap(1, 1000.0));
        assert!(detector.tap(1, 1250.0));
    }

    #[test]
    fn test_slow_taps_do_not_count() {
        let mut detector = DoubleTap::default();
        assert!(!detector.tap(1, 1000.0));
        assert!(!detector.tap(1, 1301.0));
        // the slow tap becomes the new first tap
        assert!(detector.tap(1, 1400.0));
    }

    #[test]
    fn test_taps_on_different_cards() {
        let mut detector = DoubleTap::new(500.0);
        assert!(!detector.tap(1, 0.0));
        assert!(!detector.tap(2, 100.0));
        assert!(detector.tap(2, 200.0));
    }

    #[test]
    fn test_third_tap_starts_over() {
        let mut detector = DoubleTap::default();
        detector.tap(1, 0.0);
        assert!(detector.tap(1, 100.0));
        assert!(!detector.tap(1, 200.0));
    }
}
