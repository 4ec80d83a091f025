// Copyright 2018, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Traits, etc. related to unbuffering (reading and draining) values.

use bytes::{Buf, Bytes};
use chrono::{DateTime, Utc};

use super::{primitives::I24, primitives::U24, CodecError, SizeRequirement};
use crate::{
    data_types::{length_prefixed, Width},
    endian::{Endianness, NATIVE_ENDIAN},
};

pub type UnbufferResult<T> = std::result::Result<T, CodecError>;

/// Trait for types that can be "unbuffered" (parsed from a byte buffer)
pub trait UnbufferFrom: Sized {
    /// Tries to unbuffer, advancing the buffer position only if successful.
    ///
    /// # Note
    ///
    /// Must check size before advancing the buffer: usually start with
    /// `check_unbuffer_remaining`.
    ///
    /// Returns `Err(CodecError::NeedMoreData(n))` if not enough data.
    fn unbuffer_from<T: Buf>(buf: &mut T, order: Endianness) -> UnbufferResult<Self>;
}

/// Check whether a buffer has enough bytes remaining to unbuffer a given length
pub fn check_unbuffer_remaining<T: Buf>(buf: &T, required_len: usize) -> UnbufferResult<()> {
    match SizeRequirement::shortfall(required_len, buf.remaining()) {
        Some(required) => Err(required.into()),
        None => Ok(()),
    }
}

/// Remove the first `n` bytes from the buffer and return them.
///
/// Leaves the buffer untouched if fewer than `n` bytes remain.
///
/// ```
/// use bytebuilder::buffer_unbuffer::drain;
/// let mut buf = &b"hello world"[..];
/// assert_eq!(&drain(&mut buf, 5).unwrap()[..], b"hello");
/// assert_eq!(buf, b" world");
/// assert!(drain(&mut buf, 7).is_err());
/// assert_eq!(buf, b" world");
/// ```
pub fn drain<T: Buf>(buf: &mut T, n: usize) -> UnbufferResult<Bytes> {
    check_unbuffer_remaining(buf, n)?;
    Ok(buf.copy_to_bytes(n))
}

/// Remove the first `n` bytes from the buffer, discarding them.
pub fn skip<T: Buf>(buf: &mut T, n: usize) -> UnbufferResult<()> {
    check_unbuffer_remaining(buf, n)?;
    buf.advance(n);
    Ok(())
}

/// Peek at the first `n` bytes of a contiguous buffer without consuming them.
///
/// ```
/// use bytebuilder::buffer_unbuffer::peek;
/// let data = [1u8, 2, 3];
/// assert_eq!(peek(&data[..], 2), Some(&[1u8, 2][..]));
/// assert_eq!(peek(&data[..], 4), None);
/// ```
pub fn peek(buf: &[u8], n: usize) -> Option<&[u8]> {
    buf.get(..n)
}

macro_rules! unbuffer_methods {
    ($($t:ty => $be:ident, $le:ident, $ne:ident;)*) => {
        $(
            #[doc = concat!("Drain a big-endian `", stringify!($t), "`.")]
            fn $be(&mut self) -> UnbufferResult<$t> {
                self.unbuffer(Endianness::Big)
            }

            #[doc = concat!("Drain a little-endian `", stringify!($t), "`.")]
            fn $le(&mut self) -> UnbufferResult<$t> {
                self.unbuffer(Endianness::Little)
            }

            #[doc = concat!("Drain a native-endian `", stringify!($t), "`.")]
            fn $ne(&mut self) -> UnbufferResult<$t> {
                self.unbuffer(NATIVE_ENDIAN)
            }
        )*
    };
}

/// Extension trait giving every `Buf` the typed read ("drain") operations.
///
/// Each read either consumes exactly the bytes of the value or fails with
/// `CodecError::NeedMoreData` leaving the buffer as it was.
///
/// ```
/// use bytebuilder::BufExtras;
/// let mut buf = &[0x12u8, 0x34, 0x12, 0x34][..];
/// assert_eq!(buf.read_u16_be().unwrap(), 0x1234);
/// assert_eq!(buf.read_u16_le().unwrap(), 0x3412);
/// assert!(buf.is_empty());
/// ```
pub trait BufExtras: Buf + Sized {
    /// Unbuffer any `UnbufferFrom` type in the given byte order.
    fn unbuffer<T: UnbufferFrom>(&mut self, order: Endianness) -> UnbufferResult<T> {
        T::unbuffer_from(self, order)
    }

    /// Remove and return the first `n` bytes.
    fn drain_bytes(&mut self, n: usize) -> UnbufferResult<Bytes> {
        drain(self, n)
    }

    /// Remove the first `n` bytes.
    fn skip_bytes(&mut self, n: usize) -> UnbufferResult<()> {
        skip(self, n)
    }

    fn read_u8(&mut self) -> UnbufferResult<u8> {
        self.unbuffer(Endianness::Big)
    }

    fn read_i8(&mut self) -> UnbufferResult<i8> {
        self.unbuffer(Endianness::Big)
    }

    /// Drain a 24-bit unsigned integer, zero-extended to 32 bits.
    fn read_u24(&mut self, order: Endianness) -> UnbufferResult<u32> {
        U24::unbuffer_from(self, order).map(U24::get)
    }

    /// Drain a 24-bit signed integer, sign-extended to 32 bits.
    fn read_i24(&mut self, order: Endianness) -> UnbufferResult<i32> {
        I24::unbuffer_from(self, order).map(I24::get)
    }

    fn read_u24_be(&mut self) -> UnbufferResult<u32> {
        self.read_u24(Endianness::Big)
    }

    fn read_u24_le(&mut self) -> UnbufferResult<u32> {
        self.read_u24(Endianness::Little)
    }

    fn read_u24_ne(&mut self) -> UnbufferResult<u32> {
        self.read_u24(NATIVE_ENDIAN)
    }

    fn read_i24_be(&mut self) -> UnbufferResult<i32> {
        self.read_i24(Endianness::Big)
    }

    fn read_i24_le(&mut self) -> UnbufferResult<i32> {
        self.read_i24(Endianness::Little)
    }

    fn read_i24_ne(&mut self) -> UnbufferResult<i32> {
        self.read_i24(NATIVE_ENDIAN)
    }

    unbuffer_methods! {
        u16 => read_u16_be, read_u16_le, read_u16_ne;
        i16 => read_i16_be, read_i16_le, read_i16_ne;
        u32 => read_u32_be, read_u32_le, read_u32_ne;
        i32 => read_i32_be, read_i32_le, read_i32_ne;
        u64 => read_u64_be, read_u64_le, read_u64_ne;
        i64 => read_i64_be, read_i64_le, read_i64_ne;
        isize => read_isize_be, read_isize_le, read_isize_ne;
    }

    /// Drain an unsigned integer whose width is only known at runtime.
    fn read_uint(&mut self, width: Width, order: Endianness) -> UnbufferResult<u64> {
        length_prefixed::unbuffer_uint(self, width, order)
    }

    /// Drain a 32-bit big-endian count of seconds since the Unix epoch.
    fn read_gmt_unix_time32(&mut self) -> UnbufferResult<DateTime<Utc>> {
        self.unbuffer(Endianness::Big)
    }

    /// Drain a span preceded by its big-endian length.
    fn read_vector(&mut self, width: Width) -> UnbufferResult<Bytes> {
        length_prefixed::unbuffer_vector(self, width, Endianness::Big)
    }

    /// Drain a span preceded by its length in the given byte order.
    fn read_vector_with_order(&mut self, width: Width, order: Endianness) -> UnbufferResult<Bytes> {
        length_prefixed::unbuffer_vector(self, width, order)
    }
}

impl<B: Buf> BufExtras for B {}
