//! Logical input channels
//!
//! Every physical control sits behind one multiplexer address. The mapping
//! from control to address is board wiring, so it is data rather than code,
//! and it is checked to be a bijection when built.

use crate::config::MUX_CHANNELS;

use super::mux::ScanFrame;

/// A physical control on the pedal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalInput {
    Stomp1,
    Stomp2,
    Stomp3,
    Stomp4,
    EncoderPush,
    ToggleUp,
    ToggleDown,
    Mirror,
}

impl LogicalInput {
    /// All controls, in declaration order
    pub const ALL: [LogicalInput; MUX_CHANNELS] = [
        LogicalInput::Stomp1,
        LogicalInput::Stomp2,
        LogicalInput::Stomp3,
        LogicalInput::Stomp4,
        LogicalInput::EncoderPush,
        LogicalInput::ToggleUp,
        LogicalInput::ToggleDown,
        LogicalInput::Mirror,
    ];

    /// The four stomp switches, left to right
    pub const STOMPS: [LogicalInput; 4] = [
        LogicalInput::Stomp1,
        LogicalInput::Stomp2,
        LogicalInput::Stomp3,
        LogicalInput::Stomp4,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Errors from building a [`ChannelMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelMapError {
    /// Address is not in 0..8
    AddressOutOfRange(u8),
    /// Two controls share one address
    DuplicateAddress(u8),
    /// A control is listed twice
    DuplicateInput(LogicalInput),
}

/// Bijective control → multiplexer address mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMap {
    /// Address per control, indexed by `LogicalInput as usize`
    addresses: [u8; MUX_CHANNELS],
}

impl ChannelMap {
    /// Wiring of the reference board
    pub const DEFAULT: ChannelMap = ChannelMap {
        addresses: [
            5, // Stomp1
            7, // Stomp2
            6, // Stomp3
            4, // Stomp4
            3, // EncoderPush
            2, // ToggleUp
            1, // ToggleDown
            0, // Mirror
        ],
    };

    /// Build a map from `(control, address)` pairs
    ///
    /// Each control must appear exactly once and each address in 0..8
    /// exactly once.
    pub fn new(pairs: [(LogicalInput, u8); MUX_CHANNELS]) -> Result<Self, ChannelMapError> {
        let mut addresses = [0u8; MUX_CHANNELS];
        let mut seen_input = [false; MUX_CHANNELS];
        let mut seen_address = [false; MUX_CHANNELS];

        for (input, address) in pairs {
            if address as usize >= MUX_CHANNELS {
                return Err(ChannelMapError::AddressOutOfRange(address));
            }
            if seen_input[input.index()] {
                return Err(ChannelMapError::DuplicateInput(input));
            }
            if seen_address[address as usize] {
                return Err(ChannelMapError::DuplicateAddress(address));
            }
            seen_input[input.index()] = true;
            seen_address[address as usize] = true;
            addresses[input.index()] = address;
        }

        Ok(Self { addresses })
    }

    /// Multiplexer address of a control
    pub const fn address(&self, input: LogicalInput) -> u8 {
        self.addresses[input.index()]
    }

    /// Control wired to an address, if the address is in range
    pub fn input_at(&self, address: u8) -> Option<LogicalInput> {
        LogicalInput::ALL
            .into_iter()
            .find(|input| self.address(*input) == address)
    }

    /// Active state of a control in a scan frame
    pub fn is_active(&self, frame: &ScanFrame, input: LogicalInput) -> bool {
        frame.channel(self.address(input))
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_pairs() -> [(LogicalInput, u8); MUX_CHANNELS] {
        [
            (LogicalInput::Mirror, 0),
            (LogicalInput::ToggleDown, 1),
            (LogicalInput::ToggleUp, 2),
            (LogicalInput::EncoderPush, 3),
            (LogicalInput::Stomp4, 4),
            (LogicalInput::Stomp1, 5),
            (LogicalInput::Stomp3, 6),
            (LogicalInput::Stomp2, 7),
        ]
    }

    #[test]
    fn test_default_matches_board_wiring() {
        assert_eq!(ChannelMap::new(default_pairs()), Ok(ChannelMap::DEFAULT));
    }

    #[test]
    fn test_encoder_push_on_channel_three() {
        let map = ChannelMap::DEFAULT;
        let frame = ScanFrame::from_levels([false, false, false, true, false, false, false, false]);

        assert!(map.is_active(&frame, LogicalInput::EncoderPush));
        for input in LogicalInput::ALL {
            if input != LogicalInput::EncoderPush {
                assert!(!map.is_active(&frame, input));
            }
        }
    }

    #[test]
    fn test_input_at_inverts_address() {
        let map = ChannelMap::DEFAULT;
        for input in LogicalInput::ALL {
            assert_eq!(map.input_at(map.address(input)), Some(input));
        }
        assert_eq!(map.input_at(8), None);
    }

    #[test]
    fn test_rejects_duplicate_address() {
        let mut pairs = default_pairs();
        pairs[1].1 = 0;
        assert_eq!(ChannelMap::new(pairs), Err(ChannelMapError::DuplicateAddress(0)));
    }

    #[test]
    fn test_rejects_duplicate_input() {
        let mut pairs = default_pairs();
        pairs[7].0 = LogicalInput::Mirror;
        assert_eq!(
            ChannelMap::new(pairs),
            Err(ChannelMapError::DuplicateInput(LogicalInput::Mirror))
        );
    }

    #[test]
    fn test_rejects_out_of_range_address() {
        let mut pairs = default_pairs();
        pairs[4].1 = 9;
        assert_eq!(ChannelMap::new(pairs), Err(ChannelMapError::AddressOutOfRange(9)));
    }
}
