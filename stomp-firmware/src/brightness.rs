//! Brightness output
//!
//! Drives the LED ring and backlight PWM channels from brightness steps.
//! While a level screen is open its value is previewed live; otherwise
//! both outputs follow the stored settings.

use defmt::*;
use embedded_hal::pwm::SetDutyCycle;
use stomp_core::brightness::{duty, MAX_DUTY};
use stomp_core::menu::{LevelTarget, View};
use stomp_core::SettingsStore;

pub struct Dimmer<L, T> {
    led: L,
    tft: T,
    /// Last step written to each channel, LED first
    applied: [Option<u8>; 2],
}

impl<L: SetDutyCycle, T: SetDutyCycle> Dimmer<L, T> {
    pub fn new(led: L, tft: T) -> Self {
        Self {
            led,
            tft,
            applied: [None; 2],
        }
    }

    /// Set one output; repeated steps are skipped
    pub fn show(&mut self, target: LevelTarget, step: u8) {
        let slot = match target {
            LevelTarget::Led => 0,
            LevelTarget::Tft => 1,
        };
        if self.applied[slot] == Some(step) {
            return;
        }

        let level = u16::from(duty(target, step));
        let result = match target {
            LevelTarget::Led => self
                .led
                .set_duty_cycle_fraction(level, u16::from(MAX_DUTY))
                .map_err(|_| ()),
            LevelTarget::Tft => self
                .tft
                .set_duty_cycle_fraction(level, u16::from(MAX_DUTY))
                .map_err(|_| ()),
        };

        match result {
            Ok(()) => self.applied[slot] = Some(step),
            Err(()) => warn!("brightness: setting {} duty failed", target),
        }
    }

    /// Preview the level on screen, stored values for everything else
    pub fn follow<S: SettingsStore>(&mut self, view: &View, store: &S) {
        for target in [LevelTarget::Led, LevelTarget::Tft] {
            let step = match view.brightness() {
                Some((shown, value)) if shown == target => value,
                _ => store.get(target.setting()),
            };
            self.show(target, step);
        }
    }
}
