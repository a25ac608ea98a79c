//! Quadrature encoder decoding
//!
//! Table-driven: each pair of consecutive 2-bit phase states maps to -1, 0
//! or +1 sub-steps. Four sub-steps make one detent. Invalid double-bit
//! jumps map to 0, so noise can stall the count but never reverse it.

use crate::config::STEPS_PER_DETENT;

/// Sub-step delta indexed by `(previous << 2) | current`, phase = `(A << 1) | B`
const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0, //
];

/// Rotation direction of one detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise, "+1": next item, larger value
    Cw,
    /// Counter-clockwise, "-1": previous item, smaller value
    Ccw,
}

impl Direction {
    /// +1 or -1
    pub const fn delta(self) -> i16 {
        match self {
            Direction::Cw => 1,
            Direction::Ccw => -1,
        }
    }
}

/// Quadrature decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    /// Previous phase, `(A << 1) | B`
    previous: u8,
    /// Sub-steps since the last detent; |accumulator| < threshold between calls
    accumulator: i8,
    /// Sign of the last non-zero sub-step, 0 before the first one
    last_delta: i8,
    threshold: i8,
}

impl QuadratureDecoder {
    /// Start from the current phase levels
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            previous: phase(a, b),
            accumulator: 0,
            last_delta: 0,
            threshold: STEPS_PER_DETENT,
        }
    }

    /// Feed the current phase levels; returns a direction once per detent
    ///
    /// A sub-step against the previous direction discards any partial
    /// accumulation first. After a detent the threshold is subtracted
    /// rather than zeroed, keeping any excess.
    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        let current = phase(a, b);
        let delta = TRANSITIONS[((self.previous << 2) | current) as usize];
        self.previous = current;

        if delta == 0 {
            return None;
        }

        if self.last_delta != 0 && delta != self.last_delta {
            self.accumulator = 0;
        }
        self.last_delta = delta;
        self.accumulator += delta;

        if self.accumulator >= self.threshold {
            self.accumulator -= self.threshold;
            Some(Direction::Cw)
        } else if self.accumulator <= -self.threshold {
            self.accumulator += self.threshold;
            Some(Direction::Ccw)
        } else {
            None
        }
    }

    /// Sub-steps accumulated toward the next detent
    pub const fn accumulator(&self) -> i8 {
        self.accumulator
    }
}

const fn phase(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | (b as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One clockwise detent starting and ending at (0, 0)
    const CW_DETENT: [(bool, bool); 4] = [(true, false), (true, true), (false, true), (false, false)];
    const CCW_DETENT: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    fn feed(decoder: &mut QuadratureDecoder, steps: &[(bool, bool)]) -> Vec<Direction> {
        steps
            .iter()
            .filter_map(|&(a, b)| decoder.update(a, b))
            .collect()
    }

    #[test]
    fn test_single_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(false, false);
        assert_eq!(feed(&mut decoder, &CW_DETENT), vec![Direction::Cw]);
        assert_eq!(decoder.accumulator(), 0);
    }

    #[test]
    fn test_single_counter_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(false, false);
        assert_eq!(feed(&mut decoder, &CCW_DETENT), vec![Direction::Ccw]);
        assert_eq!(decoder.accumulator(), 0);
    }

    #[test]
    fn test_reversal_discards_partial() {
        let mut decoder = QuadratureDecoder::new(false, false);
        // two clockwise sub-steps
        assert!(feed(&mut decoder, &CW_DETENT[..2]).is_empty());
        assert_eq!(decoder.accumulator(), 2);

        // step back: (1,1) -> (1,0) is a counter-clockwise sub-step
        assert_eq!(decoder.update(true, false), None);
        assert_eq!(decoder.accumulator(), -1);
    }

    #[test]
    fn test_double_bit_jump_is_ignored() {
        let mut decoder = QuadratureDecoder::new(false, false);
        assert_eq!(decoder.update(true, true), None);
        assert_eq!(decoder.accumulator(), 0);
    }

    #[test]
    fn test_repeated_sample_is_ignored() {
        let mut decoder = QuadratureDecoder::new(false, false);
        decoder.update(true, false);
        decoder.update(true, false);
        assert_eq!(decoder.accumulator(), 1);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Cw.delta(), 1);
        assert_eq!(Direction::Ccw.delta(), -1);
    }
}
