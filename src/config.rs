//! Bit-field descriptors and receiver construction parameters.
//!
//! A [`ConfigField`] only knows where its bits live inside the packed
//! configuration byte. The bus round trip that surrounds every access is
//! owned by the receiver, see [`Receiver::get_field`] and
//! [`Receiver::set_field`].
//!
//! [`Receiver::get_field`]: crate::Receiver::get_field
//! [`Receiver::set_field`]: crate::Receiver::set_field

use crate::error::ConfigError;
use crate::registers::DEFAULT_ADDRESS;

/// Location of one bit-field inside the configuration register byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigField {
    mask: u8,
    lowest_bit: u8,
}

impl ConfigField {
    /// Describe a field `num_bits` wide starting at bit `lowest_bit`.
    ///
    /// # Errors
    /// [`ConfigError::InvalidField`] if the field is empty or would reach
    /// past bit 7.
    pub const fn new(num_bits: u8, lowest_bit: u8) -> Result<Self, ConfigError> {
        if num_bits == 0 || num_bits > 8 || lowest_bit > 7 {
            return Err(ConfigError::InvalidField);
        }

        let mask = ((1u16 << num_bits) - 1) << lowest_bit;
        if mask > 0xFF {
            return Err(ConfigError::InvalidField);
        }

        Ok(Self {
            mask: mask as u8,
            lowest_bit,
        })
    }

    /// In-register mask, already shifted into position.
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    pub const fn lowest_bit(&self) -> u8 {
        self.lowest_bit
    }

    /// Largest value the field can hold.
    pub const fn max_value(&self) -> u8 {
        self.mask >> self.lowest_bit
    }

    /// Pull this field's value out of a register byte.
    pub const fn extract(&self, register: u8) -> u8 {
        (register & self.mask) >> self.lowest_bit
    }

    /// Return `register` with this field replaced by `value`.
    ///
    /// Bits outside the mask are carried over unchanged.
    ///
    /// # Errors
    /// [`ConfigError::ValueOutOfRange`] if `value` does not fit in the field.
    pub const fn insert(&self, register: u8, value: u8) -> Result<u8, ConfigError> {
        if value > self.max_value() {
            return Err(ConfigError::ValueOutOfRange);
        }

        Ok((register & !self.mask) | (value << self.lowest_bit))
    }
}

/// Construction parameters for a receiver.
///
/// The range maps the raw sample onto physical units, e.g. 0–20 for a
/// milliamp reading. It is fixed once the receiver is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiverConfig {
    /// Lower bound of the physical range.
    pub range_from: f32,
    /// Upper bound of the physical range.
    pub range_to: f32,
    /// 7-bit I2C address of the board.
    pub address: u8,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            range_from: 0.0,
            range_to: 20.0,
            address: DEFAULT_ADDRESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_within_one_byte_are_accepted() {
        for num_bits in 1..=8u8 {
            for lowest_bit in 0..=7u8 {
                let field = ConfigField::new(num_bits, lowest_bit);
                if num_bits + lowest_bit <= 8 {
                    assert!(field.is_ok(), "{} bits at {}", num_bits, lowest_bit);
                } else {
                    assert_eq!(field, Err(ConfigError::InvalidField));
                }
            }
        }
    }

    #[test]
    fn empty_or_oversized_fields_are_rejected() {
        assert_eq!(ConfigField::new(0, 0), Err(ConfigError::InvalidField));
        assert_eq!(ConfigField::new(9, 0), Err(ConfigError::InvalidField));
        assert_eq!(ConfigField::new(1, 8), Err(ConfigError::InvalidField));
    }

    #[test]
    fn mask_is_shifted_into_place() {
        let field = ConfigField::new(2, 5).unwrap();
        assert_eq!(field.mask(), 0b0110_0000);
        assert_eq!(field.max_value(), 3);
        assert_eq!(ConfigField::new(8, 0).unwrap().mask(), 0xFF);
    }

    #[test]
    fn insert_leaves_other_bits_alone() {
        let field = ConfigField::new(2, 0).unwrap();
        assert_eq!(field.insert(0b1010_1100, 3), Ok(0b1010_1111));
        assert_eq!(field.insert(0b1111_1111, 0), Ok(0b1111_1100));
    }

    #[test]
    fn insert_rejects_values_wider_than_field() {
        let field = ConfigField::new(1, 4).unwrap();
        assert_eq!(field.insert(0, 2), Err(ConfigError::ValueOutOfRange));
    }

    #[test]
    fn extract_inverts_insert() {
        let field = ConfigField::new(2, 2).unwrap();
        for value in 0..=field.max_value() {
            let reg = field.insert(0b1001_0001, value).unwrap();
            assert_eq!(field.extract(reg), value);
            assert_eq!(reg & !field.mask(), 0b1001_0001);
        }
    }

    #[test]
    fn default_config() {
        let config = ReceiverConfig::default();
        assert_eq!(config.address, 0x68);
        assert_eq!(config.range_from, 0.0);
        assert_eq!(config.range_to, 20.0);
    }
}
