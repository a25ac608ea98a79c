//! Brightness curves
//!
//! Brightness settings are steps on a 1..=20 scale. The eye is far more
//! sensitive at the dark end, so each target maps steps through its own
//! 8-bit duty table instead of a straight line.

use crate::menu::LevelTarget;

/// LED ring duty per step (gamma-shaped)
pub const LED_DUTY: [u8; 21] = [
    0, 1, 2, 3, 5, 7, 11, 17, 24, 32, 42, 54, 68, 83, 101, 121, 143, 167, 194, 223, 255,
];

/// Backlight duty per step; the panel is unreadable below a few percent
pub const TFT_DUTY: [u8; 21] = [
    0, 2, 3, 6, 10, 15, 22, 30, 40, 52, 68, 86, 108, 134, 164, 190, 208, 224, 238, 248, 255,
];

/// Full-scale duty
pub const MAX_DUTY: u8 = u8::MAX;

/// 8-bit duty for `step` on `target`; steps past the table end saturate
pub fn duty(target: LevelTarget, step: u8) -> u8 {
    let table = match target {
        LevelTarget::Led => &LED_DUTY,
        LevelTarget::Tft => &TFT_DUTY,
    };
    table[usize::from(step).min(table.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::values::BRIGHTNESS_STEPS;

    #[test]
    fn test_tables_cover_every_step() {
        assert_eq!(LED_DUTY.len(), usize::from(*BRIGHTNESS_STEPS.end()) + 1);
        assert_eq!(TFT_DUTY.len(), LED_DUTY.len());
        assert_eq!(duty(LevelTarget::Led, 20), MAX_DUTY);
        assert_eq!(duty(LevelTarget::Tft, 20), MAX_DUTY);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for table in [&LED_DUTY, &TFT_DUTY] {
            assert!(table.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(duty(LevelTarget::Led, 10), 42);
        assert_eq!(duty(LevelTarget::Tft, 10), 68);
        assert_eq!(duty(LevelTarget::Tft, 1), 2);
        assert_eq!(duty(LevelTarget::Led, 200), MAX_DUTY);
    }
}
