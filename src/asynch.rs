//! Async interface for the PR33-15 receiver.
//!
//! [`AsyncReceiver`] mirrors [`Receiver`](crate::Receiver) method for
//! method over an `embedded-hal-async` bus, for use under Embassy. Each
//! call still completes its bus transactions in order before returning, and
//! the read-modify-write caveat from the blocking receiver applies here too.

use embedded_hal_async::i2c::I2c;

use crate::config::{ConfigField, ReceiverConfig};
use crate::conversion;
use crate::error::{ConfigError, Error};
use crate::registers::{
    Channel, Gain, SampleRate, CHANNEL, CONFIG_BYTE, CONTINUOUS, FRAME_LEN, GAIN, READY,
    SAMPLE_LEN, SAMPLE_RATE,
};

/// Async driver for the NCD PR33-15 4-channel 4-20mA receiver.
///
/// # Example
///
/// ```ignore
/// use pr33_receiver::{AsyncReceiver, Channel};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut receiver = AsyncReceiver::with_defaults(i2c);
/// receiver.set_channel(Channel::Channel3).await?;
/// let milliamps = receiver.read().await?;
/// ```
pub struct AsyncReceiver<I2C> {
    i2c: I2C,
    config: ReceiverConfig,
    frame: [u8; FRAME_LEN],
    sample: [u8; SAMPLE_LEN],
}

impl<I2C> AsyncReceiver<I2C>
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

    pub fn with_defaults(i2c: I2C) -> Self {
        Self::new(i2c, ReceiverConfig::default())
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    pub fn address(&self) -> u8 {
        self.config.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Configuration register
    // -----------------------------------------------------------------------

    pub async fn read_register(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.i2c.read(self.config.address, &mut self.frame).await?;
        Ok(self.frame[CONFIG_BYTE])
    }

    pub async fn get_field(&mut self, field: ConfigField) -> Result<u8, Error<I2C::Error>> {
        let register = self.read_register().await?;
        Ok(field.extract(register))
    }

    /// Write one bit-field, preserving the other bits of the register.
    ///
    /// See [`Receiver::set_field`](crate::Receiver::set_field).
    pub async fn set_field(
        &mut self,
        field: ConfigField,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        if value > field.max_value() {
            return Err(Error::Config(ConfigError::ValueOutOfRange));
        }

        let register = self.read_register().await?;
        let updated = field.insert(register, value).map_err(Error::Config)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("config register {=u8:#x} -> {=u8:#x}", register, updated);

        self.frame[CONFIG_BYTE] = updated;
        self.i2c
            .write(self.config.address, &self.frame[CONFIG_BYTE..FRAME_LEN])
            .await?;

        Ok(())
    }

    pub async fn gain(&mut self) -> Result<Gain, Error<I2C::Error>> {
        let code = self.get_field(GAIN).await?;
        Gain::try_from(code).map_err(Error::Config)
    }

    pub async fn set_gain(&mut self, gain: Gain) -> Result<(), Error<I2C::Error>> {
        self.set_field(GAIN, gain as u8).await
    }

    pub async fn sample_rate(&mut self) -> Result<SampleRate, Error<I2C::Error>> {
        let code = self.get_field(SAMPLE_RATE).await?;
        SampleRate::try_from(code).map_err(Error::Config)
    }

    pub async fn set_sample_rate(&mut self, rate: SampleRate) -> Result<(), Error<I2C::Error>> {
        self.set_field(SAMPLE_RATE, rate as u8).await
    }

    pub async fn continuous(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_field(CONTINUOUS).await? != 0)
    }

    pub async fn set_continuous(&mut self, continuous: bool) -> Result<(), Error<I2C::Error>> {
        self.set_field(CONTINUOUS, continuous as u8).await
    }

    pub async fn channel(&mut self) -> Result<Channel, Error<I2C::Error>> {
        let code = self.get_field(CHANNEL).await?;
        Channel::try_from(code).map_err(Error::Config)
    }

    pub async fn set_channel(&mut self, channel: Channel) -> Result<(), Error<I2C::Error>> {
        self.set_field(CHANNEL, channel as u8).await
    }

    pub async fn ready(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_field(READY).await? != 0)
    }

    pub async fn set_ready(&mut self, ready: bool) -> Result<(), Error<I2C::Error>> {
        self.set_field(READY, ready as u8).await
    }

    // -----------------------------------------------------------------------
    // Sampling
    // -----------------------------------------------------------------------

    pub async fn read_raw(&mut self) -> Result<i32, Error<I2C::Error>> {
        let sample_rate = self.get_field(SAMPLE_RATE).await?;
        self.i2c.read(self.config.address, &mut self.sample).await?;
        Ok(conversion::raw_sample(
            self.sample,
            conversion::bits_less(sample_rate),
        ))
    }

    /// Read the latest conversion scaled to the configured range.
    pub async fn read(&mut self) -> Result<f32, Error<I2C::Error>> {
        let sample_rate = self.get_field(SAMPLE_RATE).await?;
        self.i2c.read(self.config.address, &mut self.sample).await?;

        Ok(conversion::to_physical(
            self.sample,
            sample_rate,
            self.config.range_from,
            self.config.range_to,
        ))
    }
}
