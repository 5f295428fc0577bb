//! Base-128 varints, zigzag mapping and little-endian fixed-width values.

use crate::stream::Stream;
use crate::{Result, WireError};

/// Maximum number of bytes a 64-bit varint can occupy.
pub const MAX_VARINT_LEN: usize = 10;

/// Writes `value` as a base-128 varint, low-order group first.
#[inline]
pub fn write_varint(stream: &mut Stream, mut value: u64) {
    while value >= 0x80 {
        stream.write_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    stream.write_u8(value as u8);
}

/// Reads a base-128 varint.
///
/// # Errors
/// Returns [`WireError::MalformedVarint`] if no terminating byte appears within
/// [`MAX_VARINT_LEN`] bytes, the stream ends first, or the value does not fit in 64 bits.
#[inline]
pub fn read_varint(stream: &mut Stream) -> Result<u64> {
    let mut value = 0u64;
    for i in 0..MAX_VARINT_LEN {
        let byte = stream
            .read_u8()
            .map_err(|_| WireError::MalformedVarint)?;
        // the tenth byte carries only bit 63
        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(WireError::MalformedVarint);
        }
        value |= u64::from(byte & 0x7F) << (7 * i);
        if byte < 0x80 {
            return Ok(value);
        }
    }
    Err(WireError::MalformedVarint)
}

/// Number of bytes [`write_varint`] emits for `value`.
#[inline]
pub const fn varint_size(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let bits = 64 - value.leading_zeros() as usize;
    (bits + 6) / 7
}

/// Maps a signed integer onto an unsigned one so small magnitudes stay small.
#[inline]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

#[inline]
pub fn write_fixed32(stream: &mut Stream, value: u32) {
    stream.write_u32_le(value);
}

#[inline]
pub fn write_fixed64(stream: &mut Stream, value: u64) {
    stream.write_u64_le(value);
}

#[inline]
pub fn read_fixed32(stream: &mut Stream) -> Result<u32> {
    stream.read_u32_le()
}

#[inline]
pub fn read_fixed64(stream: &mut Stream) -> Result<u64> {
    stream.read_u64_le()
}

/// Writes an IEEE-754 single as its raw little-endian bits.
#[inline]
pub fn write_float(stream: &mut Stream, value: f32) {
    write_fixed32(stream, value.to_bits());
}

#[inline]
pub fn write_double(stream: &mut Stream, value: f64) {
    write_fixed64(stream, value.to_bits());
}

#[inline]
pub fn read_float(stream: &mut Stream) -> Result<f32> {
    read_fixed32(stream).map(f32::from_bits)
}

#[inline]
pub fn read_double(stream: &mut Stream) -> Result<f64> {
    read_fixed64(stream).map(f64::from_bits)
}
