// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Length-prefixed byte vectors and runtime-width unsigned integers.

use bytes::{Buf, BufMut, Bytes};
use std::{
    convert::TryFrom,
    fmt::{self, Display},
};

use crate::{
    buffer_unbuffer::{
        check_buffer_remaining, check_unbuffer_remaining, size_requirement::*, BufferResult,
        CodecError, InvalidWidth, UnbufferResult,
    },
    endian::Endianness,
};

/// Width of an integer whose size is picked at runtime, such as a length prefix.
///
/// Only the widths the wire format supports can be represented:
/// any other bit count is rejected when converting with `Width::try_from`.
///
/// ```
/// use bytebuilder::Width;
/// use std::convert::TryFrom;
/// assert_eq!(Width::try_from(24).unwrap(), Width::W24);
/// assert!(Width::try_from(12).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Width {
    W8,
    W16,
    W24,
    W32,
    W64,
}

impl Width {
    pub const ALL: [Width; 5] = [Width::W8, Width::W16, Width::W24, Width::W32, Width::W64];

    /// Number of bits.
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W24 => 24,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// Number of bytes on the wire.
    pub const fn byte_len(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Largest value this width can hold.
    pub const fn max_value(self) -> u64 {
        match self {
            Width::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Width> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            24 => Some(Width::W24),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }
}

impl TryFrom<u32> for Width {
    type Error = InvalidWidth;
    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Width::from_bits(bits).ok_or(InvalidWidth(bits))
    }
}

impl Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Get the size required to buffer a span preceded by its length.
pub fn buffer_size(span: &[u8], width: Width) -> usize {
    width.byte_len() + span.len()
}

fn check_fits(v: u64, width: Width) -> BufferResult {
    if v > width.max_value() {
        Err(CodecError::LengthOverflow { len: v, width })
    } else {
        Ok(())
    }
}

/// Buffer an unsigned integer using `width.byte_len()` bytes.
pub fn buffer_uint<T: BufMut>(buf: &mut T, v: u64, width: Width, order: Endianness) -> BufferResult {
    check_fits(v, width)?;
    check_buffer_remaining(buf, width.byte_len())?;
    match order {
        Endianness::Big => buf.put_uint(v, width.byte_len()),
        Endianness::Little => buf.put_uint_le(v, width.byte_len()),
    }
    Ok(())
}

/// Unbuffer an unsigned integer occupying `width.byte_len()` bytes.
pub fn unbuffer_uint<T: Buf>(buf: &mut T, width: Width, order: Endianness) -> UnbufferResult<u64> {
    check_unbuffer_remaining(buf, width.byte_len())?;
    Ok(match order {
        Endianness::Big => buf.get_uint(width.byte_len()),
        Endianness::Little => buf.get_uint_le(width.byte_len()),
    })
}

/// Buffer a span, preceded by its length.
///
/// Writes nothing if the length does not fit in `width`.
pub fn buffer_vector<T: BufMut>(
    buf: &mut T,
    span: &[u8],
    width: Width,
    order: Endianness,
) -> BufferResult {
    let len = span.len() as u64;
    check_fits(len, width)?;
    check_buffer_remaining(buf, buffer_size(span, width))?;
    buffer_uint(buf, len, width, order)?;
    buf.put_slice(span);
    Ok(())
}

/// Unbuffer a span, preceded by its length.
///
/// If the length prefix is available but the span is not, the prefix stays
/// consumed and the error reports how many span bytes are missing.
pub fn unbuffer_vector<T: Buf>(buf: &mut T, width: Width, order: Endianness) -> UnbufferResult<Bytes> {
    // Without the prefix we cannot know the total, so we need at least the rest of it.
    let len = unbuffer_uint(buf, width, order).map_err(ExpandSizeRequirement::expand_size_requirement)?;
    let len = usize::try_from(len).map_err(|_| SizeRequirement::Unknown)?;
    check_unbuffer_remaining(buf, len)?;
    Ok(buf.copy_to_bytes(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use hex_literal::hex;
    use proptest::prelude::*;

    #[test]
    fn width_conversions() {
        for width in Width::ALL.iter() {
            assert_eq!(Width::try_from(width.bits()), Ok(*width));
            assert_eq!(width.byte_len() * 8, width.bits() as usize);
        }
        assert_eq!(Width::try_from(0), Err(InvalidWidth(0)));
        assert_eq!(Width::try_from(48), Err(InvalidWidth(48)));
        assert_eq!(Width::W24.max_value(), 0xff_ffff);
        assert_eq!(Width::W64.max_value(), u64::MAX);
        assert_eq!(Width::W16.to_string(), "16-bit");
    }

    #[test]
    fn read_u8_prefixed() {
        let data = hex!("02 aa bb cc");
        let mut buf = &data[..];
        let span = unbuffer_vector(&mut buf, Width::W8, Endianness::Big).unwrap();
        assert_eq!(&span[..], &hex!("aa bb")[..]);
        assert_eq!(buf, &hex!("cc")[..]);
    }

    #[test]
    fn short_span_consumes_prefix() {
        let data = hex!("00 05 01 02");
        let mut buf = &data[..];
        assert_eq!(
            unbuffer_vector(&mut buf, Width::W16, Endianness::Big),
            Err(CodecError::NeedMoreData(SizeRequirement::Exactly(3)))
        );
        assert_eq!(buf, &hex!("01 02")[..]);
    }

    #[test]
    fn short_prefix() {
        let data = hex!("00 00");
        let mut buf = &data[..];
        assert_eq!(
            unbuffer_vector(&mut buf, Width::W32, Endianness::Big),
            Err(CodecError::NeedMoreData(SizeRequirement::AtLeast(2)))
        );
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn empty_span() {
        let mut buf = BytesMut::new();
        buffer_vector(&mut buf, b"", Width::W24, Endianness::Big).unwrap();
        assert_eq!(&buf[..], &hex!("00 00 00")[..]);
        let span = unbuffer_vector(&mut buf, Width::W24, Endianness::Big).unwrap();
        assert!(span.is_empty());
        assert!(buf.is_empty());
    }

    #[test]
    fn little_endian_prefix() {
        let mut buf = Vec::new();
        buffer_vector(&mut buf, b"xyz", Width::W32, Endianness::Little).unwrap();
        assert_eq!(buf, b"\x03\0\0\0xyz");
    }

    #[test]
    fn overflowing_length_writes_nothing() {
        let span = vec![0u8; 256];
        let mut buf = Vec::new();
        assert_eq!(
            buffer_vector(&mut buf, &span, Width::W8, Endianness::Big),
            Err(CodecError::LengthOverflow {
                len: 256,
                width: Width::W8
            })
        );
        assert!(buf.is_empty());
        assert!(buffer_vector(&mut buf, &span, Width::W16, Endianness::Big).is_ok());
        assert_eq!(buf.len(), 258);
    }

    #[test]
    fn uint_widths() {
        let mut buf = Vec::new();
        buffer_uint(&mut buf, 0x0102_03, Width::W24, Endianness::Little).unwrap();
        assert_eq!(buf, hex!("03 02 01"));
        assert!(buffer_uint(&mut buf, 0x1_0000, Width::W16, Endianness::Big).is_err());
        assert_eq!(buf.len(), 3);
    }

    proptest! {
        #[test]
        fn vector_roundtrip(span in proptest::collection::vec(any::<u8>(), 0..300), idx in 0usize..5, big in any::<bool>()) {
            let width = Width::ALL[idx];
            let order = if big { Endianness::Big } else { Endianness::Little };
            let mut buf = BytesMut::new();
            let result = buffer_vector(&mut buf, &span, width, order);
            if span.len() as u64 > width.max_value() {
                prop_assert!(result.is_err());
                prop_assert!(buf.is_empty());
            } else {
                result.unwrap();
                prop_assert_eq!(buf.len(), buffer_size(&span, width));
                let decoded = unbuffer_vector(&mut buf, width, order).unwrap();
                prop_assert_eq!(&decoded[..], &span[..]);
                prop_assert!(buf.is_empty());
            }
        }
    }
}
