//! Proof-of-work targets
//!
//! A target is a 256-bit unsigned integer stored big-endian; a block hash
//! meets it when the hash, read as a number, is not above the target.
//! Headers carry targets in the compact "bits" form.

use std::fmt;

/// 256-bit target value, big-endian
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(pub [u8; 32]);

impl Target {
    /// All bits set
    pub const MAX: Target = Target([0xff; 32]);

    /// `!0 >> shift`, the usual way a proof-of-work ceiling is written
    pub const fn max_shifted_right(shift: u32) -> Self {
        let mut bytes = [0xffu8; 32];
        let full_bytes = (shift / 8) as usize;
        let mut i = 0;
        while i < full_bytes && i < 32 {
            bytes[i] = 0;
            i += 1;
        }
        if full_bytes < 32 {
            bytes[full_bytes] = 0xff >> (shift % 8);
        }
        Target(bytes)
    }

    /// Expand compact bits into a full target.
    ///
    /// Returns `None` for negative or overflowing encodings.
    pub fn from_compact(compact: u32) -> Option<Self> {
        let exponent = (compact >> 24) as usize;
        let mantissa = compact & 0x007f_ffff;

        if compact & 0x0080_0000 != 0 && mantissa != 0 {
            return None;
        }

        let mut target = [0u8; 32];
        if exponent <= 3 {
            let value = mantissa >> (8 * (3 - exponent));
            target[29..].copy_from_slice(&value.to_be_bytes()[1..]);
            return Some(Target(target));
        }

        let mantissa_bytes = &mantissa.to_be_bytes()[1..];
        for (offset, byte) in mantissa_bytes.iter().enumerate() {
            // Byte `offset` of the mantissa sits `exponent - 1 - offset` bytes from the bottom.
            let position = exponent - 1 - offset;
            if position >= 32 {
                if *byte != 0 {
                    return None;
                }
                continue;
            }
            target[31 - position] = *byte;
        }
        Some(Target(target))
    }

    /// Compress into compact bits
    pub fn to_compact(&self) -> u32 {
        let first_nonzero = match self.0.iter().position(|b| *b != 0) {
            Some(index) => index,
            None => return 0,
        };

        let mut exponent = (32 - first_nonzero) as u32;
        let mut mantissa: u32 = 0;
        for i in 0..3 {
            mantissa <<= 8;
            if let Some(byte) = self.0.get(first_nonzero + i) {
                mantissa |= *byte as u32;
            }
        }

        // The 0x00800000 bit is the sign bit, so shift it out of the mantissa.
        if mantissa & 0x0080_0000 != 0 {
            mantissa >>= 8;
            exponent += 1;
        }

        (exponent << 24) | mantissa
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.to_hex())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
