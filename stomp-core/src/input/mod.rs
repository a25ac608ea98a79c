//! Input layer
//!
//! Turns one tick of raw samples (a multiplexer scan plus the two encoder
//! phases) into discrete events. Everything is driven by the caller's
//! millisecond timestamp; nothing here blocks or sleeps.
//!
//! ```text
//! MuxScanner ──ScanFrame──┐
//!                         ├──► InputTracker::poll ──► [InputEvent]
//! encoder A/B ────────────┘
//! ```

pub mod buttons;
pub mod channel;
pub mod debounce;
pub mod mux;
pub mod quadrature;

use heapless::Vec;

use crate::config::{DEBOUNCE_MS, LONG_PRESS_MS, REPEAT_HOLD_MS, REPEAT_PERIOD_MS, STOMP_COUNT};

pub use buttons::{LongPressButton, PressKind, PressTrigger, PushButton, RepeatButton, RepeatTiming};
pub use channel::{ChannelMap, ChannelMapError, LogicalInput};
pub use debounce::{Debounced, Edge};
pub use mux::{AddressBits, AddressBitsError, MuxScanner, ScanFrame};
pub use quadrature::{Direction, QuadratureDecoder};

/// Upper bound on events from a single poll
pub const MAX_EVENTS_PER_POLL: usize = 10;

/// Events produced by one poll
pub type Events = Vec<InputEvent, MAX_EVENTS_PER_POLL>;

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder moved one detent
    Turn(Direction),
    /// Encoder push button clicked
    Press,
    /// Toggle switch pressed or auto-repeated (`Cw` = up, `Ccw` = down)
    Toggle(Direction),
    /// Mirror button held past the long-press time
    MirrorLongPress,
    /// Mirror button released before the long-press time
    MirrorShortPress,
    /// Stomp switch edge; `index` is 0..4
    Stomp { index: u8, pressed: bool },
}

/// Input layer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Debounce window for every multiplexed control
    pub debounce_ms: u32,
    /// Toggle auto-repeat timing
    pub repeat: RepeatTiming,
    /// Mirror long-press threshold
    pub long_press_ms: u32,
    /// Which edge of an encoder click fires [`InputEvent::Press`]
    pub press_trigger: PressTrigger,
    /// Control → multiplexer address wiring
    pub channels: ChannelMap,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            repeat: RepeatTiming {
                hold_ms: REPEAT_HOLD_MS,
                period_ms: REPEAT_PERIOD_MS,
            },
            long_press_ms: LONG_PRESS_MS,
            press_trigger: PressTrigger::default(),
            channels: ChannelMap::DEFAULT,
        }
    }
}

/// One tick of raw input levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Active levels of the multiplexed controls
    pub frame: ScanFrame,
    /// Encoder phase A level
    pub encoder_a: bool,
    /// Encoder phase B level
    pub encoder_b: bool,
}

/// Debounce, decode and timer state for every control
#[derive(Debug, Clone)]
pub struct InputTracker {
    config: InputConfig,
    encoder: QuadratureDecoder,
    push: PushButton,
    toggle_up: RepeatButton,
    toggle_down: RepeatButton,
    mirror: LongPressButton,
    stomps: [Debounced; STOMP_COUNT],
}

impl InputTracker {
    /// Initialize every channel from the boot-time sample
    pub fn new(config: InputConfig, sample: &RawSample, now: u32) -> Self {
        let level = |input| config.channels.is_active(&sample.frame, input);
        let window = config.debounce_ms;

        Self {
            config,
            encoder: QuadratureDecoder::new(sample.encoder_a, sample.encoder_b),
            push: PushButton::new(level(LogicalInput::EncoderPush), now, window, config.press_trigger),
            toggle_up: RepeatButton::new(level(LogicalInput::ToggleUp), now, window),
            toggle_down: RepeatButton::new(level(LogicalInput::ToggleDown), now, window),
            mirror: LongPressButton::new(level(LogicalInput::Mirror), now, window),
            stomps: LogicalInput::STOMPS.map(|input| Debounced::new(level(input), now, window)),
        }
    }

    /// Process one tick
    ///
    /// Events come out in a fixed order: turn, press, toggles, mirror,
    /// stomps.
    pub fn poll(&mut self, sample: &RawSample, now: u32) -> Events {
        let mut events = Events::new();
        let config = self.config;
        let window = config.debounce_ms;
        let level = |input| config.channels.is_active(&sample.frame, input);

        // Capacity covers one event per source, so pushes cannot fail.
        if let Some(direction) = self.encoder.update(sample.encoder_a, sample.encoder_b) {
            let _ = events.push(InputEvent::Turn(direction));
        }

        if self.push.update(level(LogicalInput::EncoderPush), now, window) {
            let _ = events.push(InputEvent::Press);
        }

        if self.toggle_up.update(level(LogicalInput::ToggleUp), now, window, config.repeat) {
            let _ = events.push(InputEvent::Toggle(Direction::Cw));
        }
        if self.toggle_down.update(level(LogicalInput::ToggleDown), now, window, config.repeat) {
            let _ = events.push(InputEvent::Toggle(Direction::Ccw));
        }

        match self.mirror.update(level(LogicalInput::Mirror), now, window, config.long_press_ms) {
            Some(PressKind::Long) => {
                let _ = events.push(InputEvent::MirrorLongPress);
            }
            Some(PressKind::Short) => {
                let _ = events.push(InputEvent::MirrorShortPress);
            }
            None => {}
        }

        for (index, (stomp, input)) in self.stomps.iter_mut().zip(LogicalInput::STOMPS).enumerate() {
            if let Some(edge) = stomp.update(level(input), now, window) {
                let _ = events.push(InputEvent::Stomp {
                    index: index as u8,
                    pressed: edge == Edge::Pressed,
                });
            }
        }

        events
    }

    /// Stop toggle auto-repeat until the toggles are pressed again
    pub fn cancel_repeats(&mut self) {
        self.toggle_up.cancel_repeat();
        self.toggle_down.cancel_repeat();
    }

    /// Sub-steps pending on the encoder
    pub fn encoder_accumulator(&self) -> i8 {
        self.encoder.accumulator()
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }
}
