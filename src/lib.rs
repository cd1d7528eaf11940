//! Driver for the NCD PR33-15 4-channel 4-20mA current receiver.
//!
//! The board is an MCP3428 converter behind a 4-20mA front end on an I2C
//! bus. This crate reads the latest conversion, scales it into a
//! caller-chosen physical range and gives typed access to the five fields
//! packed in the configuration register.
//!
//! # Architecture
//!
//! - **`registers`** — frame layout, field descriptors and field codes.
//! - **`config`** — [`ConfigField`] mask/shift arithmetic and the
//!   [`ReceiverConfig`] construction parameters.
//! - **`conversion`** — raw sample to physical value scaling.
//! - **[`Receiver`]** / **[`AsyncReceiver`]** — blocking and async drivers
//!   built on `embedded-hal` and `embedded-hal-async`.
//!
//! # Quick start
//!
//! ```ignore
//! use pr33_receiver::{Receiver, ReceiverConfig, Gain, SampleRate};
//!
//! let mut receiver = Receiver::new(i2c, ReceiverConfig::default());
//! receiver.set_gain(Gain::X1)?;
//! receiver.set_sample_rate(SampleRate::Bits16)?;
//! let milliamps = receiver.read()?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] implementations on public types and
//!   trace logging of register writes and conversions.

#![cfg_attr(not(test), no_std)]

pub use asynch::AsyncReceiver;
pub use config::{ConfigField, ReceiverConfig};
pub use error::{ConfigError, Error};
pub use receiver::Receiver;
pub use registers::{Channel, Gain, SampleRate, CHANNEL_COUNT, DEFAULT_ADDRESS};

mod asynch;
pub mod config;
pub mod conversion;
mod error;
mod receiver;
pub mod registers;
