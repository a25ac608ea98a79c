//! Button behaviours built on debounced edges
//!
//! - [`PushButton`]: one event per click, on press or on release
//! - [`RepeatButton`]: immediate event on press, then auto-repeat while held
//! - [`LongPressButton`]: distinguishes a long hold from a short click

use stomp_hal::elapsed_ms;

use super::debounce::{Debounced, Edge};

/// Which edge of a click counts as the press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressTrigger {
    /// Fire as soon as the button goes down
    OnPress,
    /// Fire when the button comes back up
    #[default]
    OnRelease,
}

/// Click detector
#[derive(Debug, Clone, Copy)]
pub struct PushButton {
    input: Debounced,
    trigger: PressTrigger,
}

impl PushButton {
    pub const fn new(active: bool, now: u32, debounce_ms: u32, trigger: PressTrigger) -> Self {
        Self {
            input: Debounced::new(active, now, debounce_ms),
            trigger,
        }
    }

    /// Returns `true` when the click fires
    pub fn update(&mut self, active: bool, now: u32, debounce_ms: u32) -> bool {
        matches!(
            (self.input.update(active, now, debounce_ms), self.trigger),
            (Some(Edge::Pressed), PressTrigger::OnPress)
                | (Some(Edge::Released), PressTrigger::OnRelease)
        )
    }

    pub const fn is_active(&self) -> bool {
        self.input.is_active()
    }
}

/// Auto-repeat timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatTiming {
    /// Hold time before the first repeat
    pub hold_ms: u32,
    /// Interval between repeats
    pub period_ms: u32,
}

/// Press-start and last-repeat timestamps; both exist or neither does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hold {
    pressed_at: u32,
    last_repeat: u32,
    repeating: bool,
}

/// Button that fires on press and repeats while held
#[derive(Debug, Clone, Copy)]
pub struct RepeatButton {
    input: Debounced,
    hold: Option<Hold>,
}

impl RepeatButton {
    pub const fn new(active: bool, now: u32, debounce_ms: u32) -> Self {
        Self {
            input: Debounced::new(active, now, debounce_ms),
            hold: None,
        }
    }

    /// Returns `true` for the press itself and for every repeat
    ///
    /// Repeats are spaced from the previous emission, so a late poll delays
    /// the sequence instead of producing a burst.
    pub fn update(&mut self, active: bool, now: u32, debounce_ms: u32, timing: RepeatTiming) -> bool {
        match self.input.update(active, now, debounce_ms) {
            Some(Edge::Pressed) => {
                self.hold = Some(Hold {
                    pressed_at: now,
                    last_repeat: now,
                    repeating: false,
                });
                return true;
            }
            Some(Edge::Released) => {
                self.hold = None;
                return false;
            }
            None => {}
        }

        // A glitch ended without a release edge
        if !self.input.is_active() {
            self.hold = None;
            return false;
        }

        let Some(hold) = self.hold.as_mut() else {
            return false;
        };

        let due = if hold.repeating {
            elapsed_ms(now, hold.last_repeat) >= timing.period_ms
        } else {
            elapsed_ms(now, hold.pressed_at) >= timing.hold_ms
        };
        if due {
            hold.repeating = true;
            hold.last_repeat = now;
        }
        due
    }

    /// Stop repeating until the button is released and pressed again
    pub fn cancel_repeat(&mut self) {
        self.hold = None;
    }

    /// Whether auto-repeat is armed
    pub const fn is_armed(&self) -> bool {
        self.hold.is_some()
    }

    pub const fn is_active(&self) -> bool {
        self.input.is_active()
    }
}

/// Result of a [`LongPressButton`] update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Held for at least the long-press time; fires while still held
    Long,
    /// Released before the long-press time
    Short,
}

/// Long/short press detector
#[derive(Debug, Clone, Copy)]
pub struct LongPressButton {
    input: Debounced,
    pressed_at: Option<u32>,
    long_fired: bool,
}

impl LongPressButton {
    pub const fn new(active: bool, now: u32, debounce_ms: u32) -> Self {
        Self {
            input: Debounced::new(active, now, debounce_ms),
            pressed_at: None,
            long_fired: false,
        }
    }

    /// A long press fires once per hold, as soon as the threshold passes.
    /// A short press fires on release.
    pub fn update(&mut self, active: bool, now: u32, debounce_ms: u32, long_ms: u32) -> Option<PressKind> {
        match self.input.update(active, now, debounce_ms) {
            Some(Edge::Pressed) => {
                self.pressed_at = Some(now);
                self.long_fired = false;
                None
            }
            Some(Edge::Released) => {
                let short = self.pressed_at.take().is_some() && !self.long_fired;
                self.long_fired = false;
                short.then_some(PressKind::Short)
            }
            None if !self.input.is_active() => {
                self.pressed_at = None;
                None
            }
            None => match self.pressed_at {
                Some(at) if !self.long_fired && elapsed_ms(now, at) >= long_ms => {
                    self.long_fired = true;
                    Some(PressKind::Long)
                }
                _ => None,
            },
        }
    }

    pub const fn is_active(&self) -> bool {
        self.input.is_active()
    }
}
