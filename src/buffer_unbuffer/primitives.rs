// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

use super::{
    buffer::{check_buffer_remaining, BufferResult, BufferTo},
    size::ConstantBufferSize,
    unbuffer::{check_unbuffer_remaining, UnbufferFrom, UnbufferResult},
};
use crate::endian::{Endianness, WordSize, WORD_SIZE};
use bytes::{Buf, BufMut};

macro_rules! buffer_primitive {
    ($t:ty, $put_be:ident, $put_le:ident, $get_be:ident, $get_le:ident) => {
        impl ConstantBufferSize for $t {}

        impl BufferTo for $t {
            fn buffer_to<T: BufMut>(&self, buf: &mut T, order: Endianness) -> BufferResult {
                check_buffer_remaining(buf, Self::constant_buffer_size())?;
                match order {
                    Endianness::Big => buf.$put_be(*self),
                    Endianness::Little => buf.$put_le(*self),
                }
                Ok(())
            }
        }

        impl UnbufferFrom for $t {
            fn unbuffer_from<T: Buf>(buf: &mut T, order: Endianness) -> UnbufferResult<Self> {
                check_unbuffer_remaining(buf, Self::constant_buffer_size())?;
                Ok(match order {
                    Endianness::Big => buf.$get_be(),
                    Endianness::Little => buf.$get_le(),
                })
            }
        }
    };
}

// Single bytes have no byte order.
buffer_primitive!(u8, put_u8, put_u8, get_u8, get_u8);
buffer_primitive!(i8, put_i8, put_i8, get_i8, get_i8);
buffer_primitive!(u16, put_u16, put_u16_le, get_u16, get_u16_le);
buffer_primitive!(i16, put_i16, put_i16_le, get_i16, get_i16_le);
buffer_primitive!(u32, put_u32, put_u32_le, get_u32, get_u32_le);
buffer_primitive!(i32, put_i32, put_i32_le, get_i32, get_i32_le);
buffer_primitive!(u64, put_u64, put_u64_le, get_u64, get_u64_le);
buffer_primitive!(i64, put_i64, put_i64_le, get_i64, get_i64_le);

const INT24_LEN: usize = 3;
const INT24_MASK: u32 = 0x00ff_ffff;

fn put_int24<T: BufMut>(buf: &mut T, bits: u32, order: Endianness) -> BufferResult {
    check_buffer_remaining(buf, INT24_LEN)?;
    let bits = u64::from(bits & INT24_MASK);
    match order {
        Endianness::Big => buf.put_uint(bits, INT24_LEN),
        Endianness::Little => buf.put_uint_le(bits, INT24_LEN),
    }
    Ok(())
}

fn get_int24<T: Buf>(buf: &mut T, order: Endianness) -> UnbufferResult<u32> {
    check_unbuffer_remaining(buf, INT24_LEN)?;
    let bits = match order {
        Endianness::Big => buf.get_uint(INT24_LEN),
        Endianness::Little => buf.get_uint_le(INT24_LEN),
    };
    Ok(bits as u32)
}

/// A 24-bit unsigned integer, held in the low bits of a `u32`.
///
/// Occupies exactly three bytes in a buffer. Buffering keeps only the low
/// 24 bits of the wrapped value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U24(pub u32);

impl U24 {
    pub const MAX: u32 = INT24_MASK;

    pub fn get(self) -> u32 {
        self.0
    }
}

/// A 24-bit signed integer, held sign-extended in an `i32`.
///
/// Occupies exactly three bytes in a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct I24(pub i32);

impl I24 {
    pub const MIN: i32 = -(1 << 23);
    pub const MAX: i32 = (1 << 23) - 1;

    pub fn get(self) -> i32 {
        self.0
    }
}

impl ConstantBufferSize for U24 {
    fn constant_buffer_size() -> usize {
        INT24_LEN
    }
}

impl ConstantBufferSize for I24 {
    fn constant_buffer_size() -> usize {
        INT24_LEN
    }
}

impl BufferTo for U24 {
    fn buffer_to<T: BufMut>(&self, buf: &mut T, order: Endianness) -> BufferResult {
        put_int24(buf, self.0, order)
    }
}

impl BufferTo for I24 {
    fn buffer_to<T: BufMut>(&self, buf: &mut T, order: Endianness) -> BufferResult {
        put_int24(buf, self.0 as u32, order)
    }
}

impl UnbufferFrom for U24 {
    fn unbuffer_from<T: Buf>(buf: &mut T, order: Endianness) -> UnbufferResult<Self> {
        get_int24(buf, order).map(U24)
    }
}

impl UnbufferFrom for I24 {
    fn unbuffer_from<T: Buf>(buf: &mut T, order: Endianness) -> UnbufferResult<Self> {
        // Move the sign bit up to bit 31, then shift back arithmetically.
        get_int24(buf, order).map(|bits| I24(((bits << 8) as i32) >> 8))
    }
}

/// `isize` takes the 32-bit or 64-bit path depending on the target word size.
impl ConstantBufferSize for isize {}

impl BufferTo for isize {
    fn buffer_to<T: BufMut>(&self, buf: &mut T, order: Endianness) -> BufferResult {
        match WORD_SIZE {
            WordSize::W32 => (*self as i32).buffer_to(buf, order),
            WordSize::W64 => (*self as i64).buffer_to(buf, order),
        }
    }
}

impl UnbufferFrom for isize {
    fn unbuffer_from<T: Buf>(buf: &mut T, order: Endianness) -> UnbufferResult<Self> {
        match WORD_SIZE {
            WordSize::W32 => i32::unbuffer_from(buf, order).map(|v| v as isize),
            WordSize::W64 => i64::unbuffer_from(buf, order).map(|v| v as isize),
        }
    }
}

impl ConstantBufferSize for () {
    fn constant_buffer_size() -> usize {
        0
    }
}

impl BufferTo for () {
    fn buffer_to<T: BufMut>(&self, _buf: &mut T, _order: Endianness) -> BufferResult {
        Ok(())
    }
}

impl UnbufferFrom for () {
    fn unbuffer_from<T: Buf>(_buf: &mut T, _order: Endianness) -> UnbufferResult<Self> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer_unbuffer::CodecError;
    use bytes::BytesMut;
    use hex_literal::hex;
    use proptest::prelude::*;

    fn encode<T: BufferTo>(v: T, order: Endianness) -> Vec<u8> {
        let mut buf = Vec::new();
        v.buffer_to(&mut buf, order).unwrap();
        buf
    }

    #[test]
    fn sizes() {
        assert_eq!(u8::constant_buffer_size(), 1);
        assert_eq!(i16::constant_buffer_size(), 2);
        assert_eq!(U24::constant_buffer_size(), 3);
        assert_eq!(I24::constant_buffer_size(), 3);
        assert_eq!(u64::constant_buffer_size(), 8);
        assert_eq!(
            isize::constant_buffer_size() as u32 * 8,
            WORD_SIZE.bits()
        );
        assert_eq!(<()>::constant_buffer_size(), 0);
    }

    #[test]
    fn byte_layout() {
        assert_eq!(encode(0x1234u16, Endianness::Big), hex!("12 34"));
        assert_eq!(encode(0x1234u16, Endianness::Little), hex!("34 12"));
        assert_eq!(encode(U24(0x0a_0b0c), Endianness::Big), hex!("0a 0b 0c"));
        assert_eq!(encode(U24(0x0a_0b0c), Endianness::Little), hex!("0c 0b 0a"));
        assert_eq!(encode(I24(-1), Endianness::Big), hex!("ff ff ff"));
        assert_eq!(
            encode(-2i64, Endianness::Little),
            hex!("fe ff ff ff ff ff ff ff")
        );
    }

    #[test]
    fn palindromes_match() {
        assert_eq!(
            encode(0x1221u16, Endianness::Big),
            encode(0x2112u16, Endianness::Little)
        );
        // Byte-palindromic values encode the same in either order.
        assert_eq!(
            encode(0xababu16, Endianness::Big),
            encode(0xababu16, Endianness::Little)
        );
        assert_eq!(
            encode(0xab12_12abu32, Endianness::Big),
            encode(0xab12_12abu32, Endianness::Little)
        );
        assert_ne!(
            encode(0xabbau16, Endianness::Big),
            encode(0xabbau16, Endianness::Little)
        );
    }

    #[test]
    fn u24_truncates_high_byte() {
        assert_eq!(encode(U24(0xff12_3456), Endianness::Big), hex!("12 34 56"));
    }

    #[test]
    fn fixed_buffer_full() {
        let mut storage = [0u8; 3];
        let mut window = &mut storage[..];
        assert_eq!(
            0x0102_0304u32.buffer_to(&mut window, Endianness::Big),
            Err(CodecError::OutOfBuffer)
        );
        assert_eq!(window.len(), 3);
        U24(0x01_0203).buffer_to(&mut window, Endianness::Big).unwrap();
        assert!(window.is_empty());
        assert_eq!(storage, hex!("01 02 03"));
    }

    macro_rules! roundtrip_test {
        ($name:ident, $strategy:expr, $t:ty) => {
            proptest! {
                #[test]
                fn $name(v in $strategy, big in any::<bool>()) {
                    let order = if big { Endianness::Big } else { Endianness::Little };
                    let mut buf = BytesMut::new();
                    v.buffer_to(&mut buf, order).unwrap();
                    prop_assert_eq!(buf.len(), <$t>::constant_buffer_size());
                    let decoded = <$t>::unbuffer_from(&mut buf, order).unwrap();
                    prop_assert_eq!(decoded, v);
                    prop_assert!(buf.is_empty());
                }
            }
        };
    }

    roundtrip_test!(roundtrip_u8, any::<u8>(), u8);
    roundtrip_test!(roundtrip_i8, any::<i8>(), i8);
    roundtrip_test!(roundtrip_u16, any::<u16>(), u16);
    roundtrip_test!(roundtrip_i16, any::<i16>(), i16);
    roundtrip_test!(roundtrip_u24, (0..=U24::MAX).prop_map(U24), U24);
    roundtrip_test!(roundtrip_i24, (I24::MIN..=I24::MAX).prop_map(I24), I24);
    roundtrip_test!(roundtrip_u32, any::<u32>(), u32);
    roundtrip_test!(roundtrip_i32, any::<i32>(), i32);
    roundtrip_test!(roundtrip_u64, any::<u64>(), u64);
    roundtrip_test!(roundtrip_i64, any::<i64>(), i64);
    roundtrip_test!(roundtrip_isize, any::<isize>(), isize);
}
