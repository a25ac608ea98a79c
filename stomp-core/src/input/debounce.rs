//! Time-based debouncing
//!
//! A channel reports an edge only at a raw transition, and only when the
//! input has been quiet for the debounce window before it. The window is
//! measured from the previous raw transition, not from the previous
//! reported edge, so contact bounce keeps pushing it forward.
//!
//! A glitch shorter than the window reports its leading edge and nothing
//! else. Once the raw level has been quiet for the window the debounced
//! level follows it back without reporting an edge, so consumers see the
//! glitch end through [`Debounced::is_active`].

use stomp_hal::elapsed_ms;

/// Reported level change of a debounced input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Became active
    Pressed,
    /// Became inactive
    Released,
}

/// One debounced digital input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debounced {
    /// Last sampled level
    raw: bool,
    /// Level as last reported to the consumer
    stable: bool,
    /// Timestamp of the last raw transition
    last_transition: u32,
}

impl Debounced {
    /// Start from the boot-time level
    ///
    /// The channel counts as quiet at boot, so the first real transition is
    /// reported immediately.
    pub const fn new(active: bool, now: u32, window_ms: u32) -> Self {
        Self {
            raw: active,
            stable: active,
            last_transition: now.wrapping_sub(window_ms),
        }
    }

    /// Feed one sample; returns the edge to report, if any
    pub fn update(&mut self, active: bool, now: u32, window_ms: u32) -> Option<Edge> {
        let quiet = elapsed_ms(now, self.last_transition) >= window_ms;

        if active != self.raw {
            self.raw = active;
            self.last_transition = now;
            if quiet && active != self.stable {
                return Some(self.settle(active));
            }
            return None;
        }

        // Glitch over: follow the raw level silently
        if quiet {
            self.stable = self.raw;
        }
        None
    }

    /// Debounced level
    pub const fn is_active(&self) -> bool {
        self.stable
    }

    fn settle(&mut self, active: bool) -> Edge {
        self.stable = active;
        if active {
            Edge::Pressed
        } else {
            Edge::Released
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u32 = 20;

    #[test]
    fn test_clean_press_reported_immediately() {
        let mut input = Debounced::new(false, 1_000, WINDOW);
        assert_eq!(input.update(true, 1_001, WINDOW), Some(Edge::Pressed));
        assert!(input.is_active());
    }

    #[test]
    fn test_bounce_inside_window_reports_once() {
        let mut input = Debounced::new(false, 0, WINDOW);
        assert_eq!(input.update(true, 100, WINDOW), Some(Edge::Pressed));
        assert_eq!(input.update(false, 103, WINDOW), None);
        assert_eq!(input.update(true, 105, WINDOW), None);
        // settles on the already-reported level: nothing more
        for t in 106..200 {
            assert_eq!(input.update(true, t, WINDOW), None);
        }
    }

    #[test]
    fn test_window_measured_from_last_transition() {
        let mut input = Debounced::new(false, 0, WINDOW);
        assert_eq!(input.update(true, 100, WINDOW), Some(Edge::Pressed));
        // bounce keeps restarting the window
        assert_eq!(input.update(false, 115, WINDOW), None);
        assert_eq!(input.update(true, 130, WINDOW), None);
        // 19 ms after the last transition: still inside the window
        assert_eq!(input.update(false, 149, WINDOW), None);
        assert_eq!(input.update(true, 160, WINDOW), None);
        // quiet since 160, so the release counts
        assert_eq!(input.update(false, 180, WINDOW), Some(Edge::Released));
    }

    #[test]
    fn test_glitch_reports_a_single_edge() {
        let mut input = Debounced::new(false, 0, WINDOW);
        assert_eq!(input.update(true, 100, WINDOW), Some(Edge::Pressed));
        assert_eq!(input.update(false, 105, WINDOW), None);
        for t in 106..200 {
            assert_eq!(input.update(false, t, WINDOW), None);
        }
        // level followed the glitch back without an edge
        assert!(!input.is_active());
    }

    #[test]
    fn test_press_after_glitch_is_reported() {
        let mut input = Debounced::new(false, 0, WINDOW);
        assert_eq!(input.update(true, 100, WINDOW), Some(Edge::Pressed));
        assert_eq!(input.update(false, 105, WINDOW), None);
        assert_eq!(input.update(false, 150, WINDOW), None);
        assert_eq!(input.update(true, 300, WINDOW), Some(Edge::Pressed));
        assert_eq!(input.update(false, 500, WINDOW), Some(Edge::Released));
    }

    #[test]
    fn test_wraparound_timestamps() {
        let start = u32::MAX - 5;
        let mut input = Debounced::new(false, start, WINDOW);
        assert_eq!(input.update(true, start, WINDOW), Some(Edge::Pressed));
        assert_eq!(input.update(true, start.wrapping_add(10), WINDOW), None);
        assert_eq!(
            input.update(false, start.wrapping_add(30), WINDOW),
            Some(Edge::Released)
        );
    }
}
