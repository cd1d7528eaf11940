//! Raw sample to physical value arithmetic.
//!
//! The scaling reproduces the board vendor's reference arithmetic bit for
//! bit, including two behaviours that look wrong but have not been checked
//! against the MCP3428 datasheet on real hardware:
//!
//! * [`bits_less`] floors `sample_rate / 2`, so the 14-bit setting scales
//!   exactly like the 12-bit setting.
//! * [`raw_sample`] folds negative readings by the fixed constant
//!   [`SIGN_FOLD`] whatever the active resolution.
//!
//! Confirm both against hardware before changing either.

/// Full-scale unsigned 16-bit sample.
const FULL_SCALE: u32 = 65535;

/// Constant subtracted from readings whose top significant bit is set.
///
/// Computed for a 12-bit sample and applied at every resolution.
pub const SIGN_FOLD: i32 = (1 << (16 - 4)) - 1;

/// Number of unused high bits for a raw sample-rate code.
///
/// Code 0 and code 1 both give 4 (known quirk, see module docs); code 2
/// gives 3.
pub const fn bits_less(sample_rate: u8) -> u32 {
    4 - (sample_rate as u32 / 2)
}

/// Physical value of one raw increment at the given `bits_less`.
pub fn resolution(range_from: f32, range_to: f32, bits_less: u32) -> f32 {
    (range_to - range_from) / (FULL_SCALE >> (bits_less + 1)) as f32
}

/// Combine the big-endian sample bytes, mask to the significant bits and
/// fold negative readings.
pub fn raw_sample(bytes: [u8; 2], bits_less: u32) -> i32 {
    let raw = (u16::from_be_bytes(bytes) as u32 & (FULL_SCALE >> bits_less)) as i32;
    let positive_max = (1i32 << (16 - (bits_less + 1))) - 1;

    if raw > positive_max {
        raw - SIGN_FOLD
    } else {
        raw
    }
}

/// Convert sample bytes to a physical value.
///
/// The result is relative to zero: `range_from` only enters through the
/// span of the range, it is never added as an offset.
pub fn to_physical(bytes: [u8; 2], sample_rate: u8, range_from: f32, range_to: f32) -> f32 {
    let bits_less = bits_less(sample_rate);
    raw_sample(bytes, bits_less) as f32 * resolution(range_from, range_to, bits_less)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn bits_less_per_sample_rate() {
        // 12-bit and 14-bit share the same value. Pinned on purpose.
        assert_eq!(bits_less(0), 4);
        assert_eq!(bits_less(1), 4);
        assert_eq!(bits_less(2), 3);
        assert_eq!(bits_less(3), 3);
    }

    #[test]
    fn sign_fold_is_fixed() {
        assert_eq!(SIGN_FOLD, 4095);
    }

    #[test]
    fn sixteen_bit_full_scale() {
        let bits_less = bits_less(2);
        assert_eq!(raw_sample([0x7F, 0xFF], bits_less), 4096);
        assert!(approx(resolution(0.0, 20.0, bits_less), 20.0 / 4095.0));

        let value = to_physical([0x7F, 0xFF], 2, 0.0, 20.0);
        assert!(approx(value, 4096.0 * 20.0 / 4095.0));
        assert!((value - 20.0).abs() < 0.01);
    }

    #[test]
    fn twelve_bit_positive_full_scale() {
        assert_eq!(raw_sample([0x07, 0xFF], 4), 2047);
        assert!(approx(to_physical([0x07, 0xFF], 0, 0.0, 20.0), 20.0));
    }

    #[test]
    fn twelve_bit_negative_reading_is_folded() {
        assert_eq!(raw_sample([0x08, 0x00], 4), 2048 - 4095);
        assert!(approx(to_physical([0x08, 0x00], 0, 0.0, 20.0), -20.0));
    }

    #[test]
    fn high_bits_are_masked_off() {
        assert_eq!(raw_sample([0xF0, 0x10], 4), 0x010);
    }

    #[test]
    fn fourteen_bit_scales_like_twelve_bit() {
        let bytes = [0x04, 0x00];
        assert_eq!(to_physical(bytes, 1, 0.0, 20.0), to_physical(bytes, 0, 0.0, 20.0));
    }

    #[test]
    fn range_from_is_not_an_offset() {
        // 4-20mA range: span is 16, zero raw stays zero.
        assert_eq!(to_physical([0x00, 0x00], 0, 4.0, 20.0), 0.0);
        assert!(approx(to_physical([0x07, 0xFF], 0, 4.0, 20.0), 16.0));
    }
}
