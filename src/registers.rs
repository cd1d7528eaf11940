//! Register layout and code constants for the PR33-15 receiver.
//!
//! The board carries an MCP3428 converter. It has no register pointer:
//! every read returns a frame starting at the latest conversion result, and
//! a single written byte always lands in the configuration register.
//!
//! | Byte | Contents                                  |
//! |------|-------------------------------------------|
//! | 0    | Conversion result, high byte              |
//! | 1    | Conversion result, low byte               |
//! | 2    | Configuration register (packed bit-fields)|
//!
//! Configuration register bits:
//!
//! | Bits | Field       |
//! |------|-------------|
//! | 0–1  | gain        |
//! | 2–3  | sample rate |
//! | 4    | continuous  |
//! | 5–6  | channel     |
//! | 7    | ready       |

use crate::config::ConfigField;
use crate::error::ConfigError;

/// Default I2C address of the PR33-15 board.
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Bytes in a full register frame (2 data bytes + configuration byte).
pub const FRAME_LEN: usize = 3;

/// Index of the configuration byte within the frame.
pub const CONFIG_BYTE: usize = 2;

/// Bytes in a raw conversion result.
pub const SAMPLE_LEN: usize = 2;

/// Number of input channels on the board.
pub const CHANNEL_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

const fn field(num_bits: u8, lowest_bit: u8) -> ConfigField {
    match ConfigField::new(num_bits, lowest_bit) {
        Ok(field) => field,
        Err(_) => panic!("field does not fit in the configuration byte"),
    }
}

/// PGA gain, bits 0–1.
pub const GAIN: ConfigField = field(2, 0);

/// Sample rate / resolution, bits 2–3.
pub const SAMPLE_RATE: ConfigField = field(2, 2);

/// Continuous conversion mode, bit 4.
pub const CONTINUOUS: ConfigField = field(1, 4);

/// Input channel select, bits 5–6.
pub const CHANNEL: ConfigField = field(2, 5);

/// Ready flag, bit 7. Set by hardware.
pub const READY: ConfigField = field(1, 7);

// ---------------------------------------------------------------------------
// Field codes
// ---------------------------------------------------------------------------

/// Programmable gain amplifier setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    X1 = 0x00,
    X2 = 0x01,
    X4 = 0x02,
    X8 = 0x03,
}

impl TryFrom<u8> for Gain {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, ConfigError> {
        match code {
            0x00 => Ok(Gain::X1),
            0x01 => Ok(Gain::X2),
            0x02 => Ok(Gain::X4),
            0x03 => Ok(Gain::X8),
            _ => Err(ConfigError::UnknownCode(code)),
        }
    }
}

/// Conversion resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleRate {
    /// 12-bit, 240 samples/s
    Bits12 = 0x00,
    /// 14-bit, 60 samples/s
    Bits14 = 0x01,
    /// 16-bit, 15 samples/s
    Bits16 = 0x02,
}

impl TryFrom<u8> for SampleRate {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, ConfigError> {
        match code {
            0x00 => Ok(SampleRate::Bits12),
            0x01 => Ok(SampleRate::Bits14),
            0x02 => Ok(SampleRate::Bits16),
            _ => Err(ConfigError::UnknownCode(code)),
        }
    }
}

/// Input channel. Codes 0–3 select the board's inputs 1–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Channel1 = 0x00,
    Channel2 = 0x01,
    Channel3 = 0x02,
    Channel4 = 0x03,
}

impl Channel {
    /// Channel number as printed on the board (1–4).
    pub fn number(self) -> u8 {
        self as u8 + 1
    }
}

impl TryFrom<u8> for Channel {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, ConfigError> {
        match code {
            0x00 => Ok(Channel::Channel1),
            0x01 => Ok(Channel::Channel2),
            0x02 => Ok(Channel::Channel3),
            0x03 => Ok(Channel::Channel4),
            _ => Err(ConfigError::UnknownCode(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_layout() {
        assert_eq!(GAIN.mask(), 0b0000_0011);
        assert_eq!(SAMPLE_RATE.mask(), 0b0000_1100);
        assert_eq!(CONTINUOUS.mask(), 0b0001_0000);
        assert_eq!(CHANNEL.mask(), 0b0110_0000);
        assert_eq!(READY.mask(), 0b1000_0000);
    }

    #[test]
    fn fields_are_disjoint_and_cover_the_byte() {
        let fields = [GAIN, SAMPLE_RATE, CONTINUOUS, CHANNEL, READY];
        let mut seen = 0u8;
        for field in fields {
            assert_eq!(seen & field.mask(), 0);
            seen |= field.mask();
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn codes_round_trip() {
        for gain in [Gain::X1, Gain::X2, Gain::X4, Gain::X8] {
            assert_eq!(Gain::try_from(gain as u8), Ok(gain));
        }
        assert_eq!(SampleRate::try_from(2), Ok(SampleRate::Bits16));
        assert_eq!(SampleRate::try_from(3), Err(ConfigError::UnknownCode(3)));
        assert_eq!(Channel::try_from(3), Ok(Channel::Channel4));
        assert_eq!(Channel::Channel1.number(), 1);
    }
}
