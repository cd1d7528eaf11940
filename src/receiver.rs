//! Blocking interface for the PR33-15 receiver.
//!
//! [`Receiver`] owns the I2C bus handle and both scratch buffers. Every
//! accessor goes to the hardware; nothing is cached between calls.
//!
//! # Concurrency
//!
//! Field writes are read-modify-write over two separate bus transactions.
//! Two writers interleaving on the same board can lose an update, so all
//! access to one board must be serialized by the caller (owning the
//! receiver through `&mut` already does this within one thread).

use embedded_hal::i2c::I2c;

use crate::config::{ConfigField, ReceiverConfig};
use crate::conversion;
use crate::error::{ConfigError, Error};
use crate::registers::{
    Channel, Gain, SampleRate, CHANNEL, CONFIG_BYTE, CONTINUOUS, FRAME_LEN, GAIN, READY,
    SAMPLE_LEN, SAMPLE_RATE,
};

/// Blocking driver for the NCD PR33-15 4-channel 4-20mA receiver.
///
/// # Example
///
/// ```ignore
/// use pr33_receiver::{Receiver, SampleRate};
///
/// // `i2c` is any `embedded-hal` I2C implementation
/// let mut receiver = Receiver::with_defaults(i2c);
/// receiver.set_sample_rate(SampleRate::Bits16)?;
/// let milliamps = receiver.read()?;
/// ```
pub struct Receiver<I2C> {
    i2c: I2C,
    config: ReceiverConfig,
    frame: [u8; FRAME_LEN],
    sample: [u8; SAMPLE_LEN],
}

impl<I2C> Receiver<I2C>
where
    I2C: I2c,
{
    /// Create a receiver. No bus traffic is generated.
    pub fn new(i2c: I2C, config: ReceiverConfig) -> Self {
        Self {
            i2c,
            config,
            frame: [0; FRAME_LEN],
            sample: [0; SAMPLE_LEN],
        }
    }

    /// Create a receiver at address 0x68 with a 0–20 range.
    pub fn with_defaults(i2c: I2C) -> Self {
        Self::new(i2c, ReceiverConfig::default())
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Configuration register
    // -----------------------------------------------------------------------

    /// Read the raw configuration byte (third byte of the register frame).
    pub fn read_register(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.i2c.read(self.config.address, &mut self.frame)?;
        Ok(self.frame[CONFIG_BYTE])
    }

    /// Read one bit-field from the configuration register.
    pub fn get_field(&mut self, field: ConfigField) -> Result<u8, Error<I2C::Error>> {
        let register = self.read_register()?;
        Ok(field.extract(register))
    }

    /// Write one bit-field, preserving the other bits of the register.
    ///
    /// Reads the current frame, then writes back the single updated
    /// configuration byte.
    ///
    /// # Errors
    /// * [`Error::Config`] if `value` is wider than the field; the bus is
    ///   not touched
    /// * [`Error::I2c`] on communication failure
    pub fn set_field(&mut self, field: ConfigField, value: u8) -> Result<(), Error<I2C::Error>> {
        if value > field.max_value() {
            return Err(Error::Config(ConfigError::ValueOutOfRange));
        }

        let register = self.read_register()?;
        let updated = field.insert(register, value).map_err(Error::Config)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("config register {=u8:#x} -> {=u8:#x}", register, updated);

        self.frame[CONFIG_BYTE] = updated;
        self.i2c
            .write(self.config.address, &self.frame[CONFIG_BYTE..FRAME_LEN])?;

        Ok(())
    }

    pub fn gain(&mut self) -> Result<Gain, Error<I2C::Error>> {
        let code = self.get_field(GAIN)?;
        Gain::try_from(code).map_err(Error::Config)
    }

    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<I2C::Error>> {
        self.set_field(GAIN, gain as u8)
    }

    /// Current resolution setting.
    ///
    /// # Errors
    /// [`ConfigError::UnknownCode`](crate::ConfigError::UnknownCode) if the
    /// register holds the unassigned code 3.
    pub fn sample_rate(&mut self) -> Result<SampleRate, Error<I2C::Error>> {
        let code = self.get_field(SAMPLE_RATE)?;
        SampleRate::try_from(code).map_err(Error::Config)
    }

    pub fn set_sample_rate(&mut self, rate: SampleRate) -> Result<(), Error<I2C::Error>> {
        self.set_field(SAMPLE_RATE, rate as u8)
    }

    /// `true` in continuous conversion mode, `false` in one-shot mode.
    pub fn continuous(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_field(CONTINUOUS)? != 0)
    }

    pub fn set_continuous(&mut self, continuous: bool) -> Result<(), Error<I2C::Error>> {
        self.set_field(CONTINUOUS, continuous as u8)
    }

    pub fn channel(&mut self) -> Result<Channel, Error<I2C::Error>> {
        let code = self.get_field(CHANNEL)?;
        Channel::try_from(code).map_err(Error::Config)
    }

    pub fn set_channel(&mut self, channel: Channel) -> Result<(), Error<I2C::Error>> {
        self.set_field(CHANNEL, channel as u8)
    }

    /// Hardware ready flag.
    pub fn ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_field(READY)? != 0)
    }

    /// Write the ready bit. In one-shot mode a set bit starts a conversion.
    pub fn set_ready(&mut self, ready: bool) -> Result<(), Error<I2C::Error>> {
        self.set_field(READY, ready as u8)
    }

    // -----------------------------------------------------------------------
    // Sampling
    // -----------------------------------------------------------------------

    /// Read the latest conversion as a masked, sign-folded integer.
    ///
    /// Queries the sample rate first, then reads the 2-byte result.
    pub fn read_raw(&mut self) -> Result<i32, Error<I2C::Error>> {
        let sample_rate = self.get_field(SAMPLE_RATE)?;
        self.i2c.read(self.config.address, &mut self.sample)?;
        Ok(conversion::raw_sample(
            self.sample,
            conversion::bits_less(sample_rate),
        ))
    }

    /// Read the latest conversion scaled to the configured range.
    ///
    /// The sample rate is fetched fresh on every call, so configuration
    /// changes take effect on the next read. The result is relative to
    /// zero; `range_from` is not added.
    pub fn read(&mut self) -> Result<f32, Error<I2C::Error>> {
        let sample_rate = self.get_field(SAMPLE_RATE)?;
        self.i2c.read(self.config.address, &mut self.sample)?;

        let value = conversion::to_physical(
            self.sample,
            sample_rate,
            self.config.range_from,
            self.config.range_to,
        );

        #[cfg(feature = "defmt")]
        defmt::trace!("sample {=[u8]} rate {=u8} -> {=f32}", &self.sample[..], sample_rate, value);

        Ok(value)
    }
}
