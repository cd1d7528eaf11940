//! Error types for the receiver driver.

use core::fmt;

/// Errors raised by the configuration layer, independent of the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Bit-field definition does not fit inside one register byte.
    InvalidField,
    /// Value is wider than the field it is written to.
    ValueOutOfRange,
    /// Register holds a code with no assigned meaning for this field.
    UnknownCode(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidField => write!(f, "Bit-field does not fit in one byte"),
            ConfigError::ValueOutOfRange => write!(f, "Value too wide for bit-field"),
            ConfigError::UnknownCode(code) => write!(f, "Unknown register code {}", code),
        }
    }
}

/// Errors that can occur when talking to the receiver board.
#[derive(Debug)]
pub enum Error<E> {
    /// Underlying I2C bus error, passed through untouched.
    I2c(E),

    /// Field definition or value rejected before touching the bus.
    Config(ConfigError),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            Error::Config(e) => defmt::write!(f, "Configuration error: {}", e),
        }
    }
}
