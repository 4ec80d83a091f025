// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Traits related to buffering (appending) values.

use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Utc};

use super::{
    primitives::{I24, U24},
    BufferSize, CodecError,
};
use crate::{
    data_types::{length_prefixed, Width},
    endian::{Endianness, NATIVE_ENDIAN},
    random,
};

/// Shorthand name for what a buffering operation should return.
pub type BufferResult = std::result::Result<(), CodecError>;

/// Trait for types that can be "buffered" (serialized to a byte buffer)
pub trait BufferTo: BufferSize {
    /// Serialize to a buffer (taken as a mutable reference) in the given byte order.
    ///
    /// Writes nothing if it returns an error.
    fn buffer_to<T: BufMut>(&self, buf: &mut T, order: Endianness) -> BufferResult;

    /// Get the number of bytes required to serialize this to a buffer.
    fn required_buffer_size(&self) -> usize {
        self.buffer_size()
    }
}

/// Extension trait for BytesMut for easier interaction with stuff we can buffer.
pub trait BytesMutExtras
where
    Self: Sized,
{
    /// Allocate enough space in the buffer for the given value, then serialize the value to the buffer.
    ///
    /// # Errors
    /// If buffering fails.
    fn allocate_and_buffer<T: BufferTo>(v: &T, order: Endianness) -> Result<Self, CodecError>;
}

impl BytesMutExtras for BytesMut {
    fn allocate_and_buffer<T: BufferTo>(v: &T, order: Endianness) -> Result<Self, CodecError> {
        let mut buf = Self::with_capacity(v.required_buffer_size());
        v.buffer_to(&mut buf, order)?;
        Ok(buf)
    }
}

/// Check whether a buffer has enough space remaining to buffer a given length
pub fn check_buffer_remaining<T: BufMut>(buf: &T, required_len: usize) -> BufferResult {
    let bytes_len = buf.remaining_mut();
    if bytes_len < required_len {
        Err(CodecError::OutOfBuffer)
    } else {
        Ok(())
    }
}

/// Append `bytes` to the end of the buffer.
///
/// Only fails if the buffer has a fixed capacity that cannot hold `bytes`.
pub fn append<T: BufMut>(buf: &mut T, bytes: &[u8]) -> BufferResult {
    check_buffer_remaining(buf, bytes.len())?;
    buf.put_slice(bytes);
    Ok(())
}

macro_rules! buffer_methods {
    ($($t:ty => $be:ident, $le:ident, $ne:ident;)*) => {
        $(
            #[doc = concat!("Append a big-endian `", stringify!($t), "`.")]
            fn $be(&mut self, v: $t) -> BufferResult {
                self.buffer(&v, Endianness::Big)
            }

            #[doc = concat!("Append a little-endian `", stringify!($t), "`.")]
            fn $le(&mut self, v: $t) -> BufferResult {
                self.buffer(&v, Endianness::Little)
            }

            #[doc = concat!("Append a native-endian `", stringify!($t), "`.")]
            fn $ne(&mut self, v: $t) -> BufferResult {
                self.buffer(&v, NATIVE_ENDIAN)
            }
        )*
    };
}

/// Extension trait giving every `BufMut` the typed write ("append") operations.
///
/// Against a growable buffer (`Vec<u8>`, `BytesMut`, `Buffer`) the integer
/// writes always succeed.
///
/// ```
/// use bytebuilder::BufMutExtras;
/// let mut out = Vec::new();
/// out.write_u16_be(0x1234).unwrap();
/// out.write_u16_le(0x1234).unwrap();
/// assert_eq!(out, [0x12, 0x34, 0x34, 0x12]);
/// ```
pub trait BufMutExtras: BufMut + Sized {
    /// Buffer any `BufferTo` type in the given byte order.
    fn buffer<T: BufferTo>(&mut self, v: &T, order: Endianness) -> BufferResult {
        v.buffer_to(self, order)
    }

    /// Append raw bytes.
    fn write_bytes(&mut self, bytes: &[u8]) -> BufferResult {
        append(self, bytes)
    }

    fn write_u8(&mut self, v: u8) -> BufferResult {
        self.buffer(&v, Endianness::Big)
    }

    fn write_i8(&mut self, v: i8) -> BufferResult {
        self.buffer(&v, Endianness::Big)
    }

    /// Append the low 24 bits of `v`.
    fn write_u24(&mut self, v: u32, order: Endianness) -> BufferResult {
        self.buffer(&U24(v), order)
    }

    /// Append the low 24 bits of `v` (two's complement).
    fn write_i24(&mut self, v: i32, order: Endianness) -> BufferResult {
        self.buffer(&I24(v), order)
    }

    fn write_u24_be(&mut self, v: u32) -> BufferResult {
        self.write_u24(v, Endianness::Big)
    }

    fn write_u24_le(&mut self, v: u32) -> BufferResult {
        self.write_u24(v, Endianness::Little)
    }

    fn write_u24_ne(&mut self, v: u32) -> BufferResult {
        self.write_u24(v, NATIVE_ENDIAN)
    }

    fn write_i24_be(&mut self, v: i32) -> BufferResult {
        self.write_i24(v, Endianness::Big)
    }

    fn write_i24_le(&mut self, v: i32) -> BufferResult {
        self.write_i24(v, Endianness::Little)
    }

    fn write_i24_ne(&mut self, v: i32) -> BufferResult {
        self.write_i24(v, NATIVE_ENDIAN)
    }

    buffer_methods! {
        u16 => write_u16_be, write_u16_le, write_u16_ne;
        i16 => write_i16_be, write_i16_le, write_i16_ne;
        u32 => write_u32_be, write_u32_le, write_u32_ne;
        i32 => write_i32_be, write_i32_le, write_i32_ne;
        u64 => write_u64_be, write_u64_le, write_u64_ne;
        i64 => write_i64_be, write_i64_le, write_i64_ne;
        isize => write_isize_be, write_isize_le, write_isize_ne;
    }

    /// Append an unsigned integer whose width is only known at runtime.
    ///
    /// Fails with `CodecError::LengthOverflow` if `v` does not fit in `width`.
    fn write_uint(&mut self, v: u64, width: Width, order: Endianness) -> BufferResult {
        length_prefixed::buffer_uint(self, v, width, order)
    }

    /// Append `time` as a 32-bit big-endian count of seconds since the Unix epoch.
    ///
    /// Sub-second precision is dropped.
    fn write_gmt_unix_time32(&mut self, time: &DateTime<Utc>) -> BufferResult {
        self.buffer(time, Endianness::Big)
    }

    /// Append `n` bytes from the operating system's entropy source.
    ///
    /// # Panics
    /// If the entropy source fails.
    fn write_random(&mut self, n: usize) -> BufferResult {
        check_buffer_remaining(self, n)?;
        self.put_slice(&random::random_bytes(n));
        Ok(())
    }

    /// Append `span` preceded by its big-endian length.
    fn write_vector(&mut self, span: &[u8], width: Width) -> BufferResult {
        length_prefixed::buffer_vector(self, span, width, Endianness::Big)
    }

    /// Append `span` preceded by its length in the given byte order.
    fn write_vector_with_order(
        &mut self,
        span: &[u8],
        width: Width,
        order: Endianness,
    ) -> BufferResult {
        length_prefixed::buffer_vector(self, span, width, order)
    }
}

impl<B: BufMut> BufMutExtras for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufExtras;
    use hex_literal::hex;

    #[test]
    fn allocate() {
        let buf = BytesMut::allocate_and_buffer(&0xdead_beefu32, Endianness::Little).unwrap();
        assert_eq!(&buf[..], &hex!("ef be ad de")[..]);
    }

    #[test]
    fn append_to_full_slice() {
        let mut storage = [0u8; 2];
        let mut window = &mut storage[..];
        assert_eq!(append(&mut window, b"abc"), Err(CodecError::OutOfBuffer));
        assert!(append(&mut window, b"ab").is_ok());
        assert_eq!(&storage, b"ab");
    }

    #[test]
    fn endian_variants_differ() {
        let mut big = Vec::new();
        let mut little = Vec::new();
        big.write_u16_be(0x1234).unwrap();
        little.write_u16_le(0x1234).unwrap();
        assert_ne!(big, little);
        assert_eq!(&big[..], &hex!("12 34")[..]);
        assert_eq!(&little[..], &hex!("34 12")[..]);

        let mut native = Vec::new();
        native.write_u16_ne(0x1234).unwrap();
        assert_eq!(native, 0x1234u16.to_ne_bytes());
    }

    #[test]
    fn random_appends_exactly_n() {
        let mut buf = BytesMut::from(&b"xy"[..]);
        buf.write_random(32).unwrap();
        assert_eq!(buf.len(), 34);
        assert_eq!(&buf[..2], b"xy");
        buf.write_random(0).unwrap();
        assert_eq!(buf.len(), 34);
    }

    #[test]
    fn random_into_full_slice_writes_nothing() {
        let mut storage = [0u8; 2];
        let mut window = &mut storage[..];
        assert_eq!(window.write_random(3), Err(CodecError::OutOfBuffer));
        assert_eq!(window.len(), 2);
        assert!(window.write_random(2).is_ok());
        assert!(window.is_empty());
        assert_eq!(window.write_random(1), Err(CodecError::OutOfBuffer));
        let mut untouched = [0u8; 2];
        assert_eq!(
            (&mut untouched[..]).write_random(3),
            Err(CodecError::OutOfBuffer)
        );
        assert_eq!(untouched, [0u8; 2]);
    }

    #[test]
    fn write_then_read_mixed() {
        let mut buf = BytesMut::new();
        buf.write_u8(7).unwrap();
        buf.write_i32_le(-40_000).unwrap();
        buf.write_u24_be(12_365_234).unwrap();
        buf.write_isize_ne(-5).unwrap();
        buf.write_bytes(b"tail").unwrap();

        assert_eq!(buf.read_u8().unwrap(), 7);
        assert_eq!(buf.read_i32_le().unwrap(), -40_000);
        assert_eq!(buf.read_u24_be().unwrap(), 12_365_234);
        assert_eq!(buf.read_isize_ne().unwrap(), -5);
        assert_eq!(&buf.drain_bytes(4).unwrap()[..], b"tail");
        assert!(buf.is_empty());
    }
}
