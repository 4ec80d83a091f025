// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Blocking adapters between `std::io` streams and the buffer codecs.
//!
//! Each call reads exactly the bytes one value needs into a temporary buffer
//! (or encodes into one) and then hands it to the same routines used on
//! in-memory buffers, so the byte layout is identical.

use bytes::{Bytes, BytesMut};
use std::io::{self, Read, Write};

use crate::{
    buffer_unbuffer::{
        append, BufferTo, BytesMutExtras, ConstantBufferSize, UnbufferFrom,
    },
    data_types::{length_prefixed, Width},
    endian::Endianness,
    error::{StreamError, StreamResult},
};

fn read_exactly<R: Read + ?Sized>(stream: &mut R, n: usize) -> StreamResult<BytesMut> {
    let mut buf = BytesMut::new();
    buf.resize(n, 0);
    stream.read_exact(&mut buf[..]).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            tracing::trace!(wanted = n, "stream reached end of input");
        }
        StreamError::from(e)
    })?;
    Ok(buf)
}

/// Extension trait for reading typed values from a synchronous source implementing `Read`.
///
/// Reaching the end of the input before a value is complete is reported as
/// `StreamError::EndOfInput`, distinct from other I/O failures.
///
/// ```
/// use bytebuilder::{Endianness, ReadExtras};
/// let mut input = std::io::Cursor::new(vec![0xfe, 0xdc, 0x01]);
/// assert_eq!(input.pull_value::<u16>(Endianness::Big).unwrap(), 0xfedc);
/// assert!(input.pull_value::<u16>(Endianness::Big).unwrap_err().is_end_of_input());
/// ```
pub trait ReadExtras: Read {
    /// Read exactly the bytes of one `T` and unbuffer it.
    fn pull_value<T>(&mut self, order: Endianness) -> StreamResult<T>
    where
        T: UnbufferFrom + ConstantBufferSize,
    {
        let mut buf = read_exactly(self, T::constant_buffer_size())?;
        Ok(T::unbuffer_from(&mut buf, order)?)
    }

    /// Read exactly `n` bytes.
    fn pull_bytes(&mut self, n: usize) -> StreamResult<Bytes> {
        read_exactly(self, n).map(BytesMut::freeze)
    }

    /// Read and discard exactly `n` bytes.
    fn pull_skip(&mut self, n: usize) -> StreamResult<()> {
        let copied = io::copy(&mut (&mut *self).take(n as u64), &mut io::sink())?;
        if copied < n as u64 {
            tracing::trace!(wanted = n, got = copied, "stream reached end of input while skipping");
            return Err(StreamError::EndOfInput);
        }
        Ok(())
    }

    /// Read a length prefix of the given width, then that many bytes.
    fn pull_vector(&mut self, width: Width, order: Endianness) -> StreamResult<Bytes> {
        let mut prefix = read_exactly(self, width.byte_len())?;
        let len = length_prefixed::unbuffer_uint(&mut prefix, width, order)?;
        // Read in bounded pieces so a corrupt prefix cannot force a huge allocation up front.
        let mut out = Vec::new();
        let copied = (&mut *self).take(len).read_to_end(&mut out)?;
        if (copied as u64) < len {
            tracing::trace!(wanted = len, got = copied, "stream reached end of input inside a vector");
            return Err(StreamError::EndOfInput);
        }
        Ok(Bytes::from(out))
    }
}

impl<R: Read + ?Sized> ReadExtras for R {}

/// Extension trait for writing typed values to a synchronous sink implementing `Write`.
///
/// ```
/// use bytebuilder::{Endianness, WriteExtras};
/// let mut out = Vec::new();
/// out.push_value(&0x0102_0304u32, Endianness::Little).unwrap();
/// assert_eq!(out, [4, 3, 2, 1]);
/// ```
pub trait WriteExtras: Write {
    /// Buffer `v` and write all of its bytes.
    fn push_value<T: BufferTo>(&mut self, v: &T, order: Endianness) -> StreamResult<()> {
        let buf = BytesMut::allocate_and_buffer(v, order)?;
        self.write_all(&buf[..])?;
        Ok(())
    }

    /// Write all of `bytes`.
    fn push_bytes(&mut self, bytes: &[u8]) -> StreamResult<()> {
        self.write_all(bytes)?;
        Ok(())
    }

    /// Write `span` preceded by its length.
    fn push_vector(&mut self, span: &[u8], width: Width, order: Endianness) -> StreamResult<()> {
        let mut prefix = BytesMut::with_capacity(width.byte_len());
        length_prefixed::buffer_uint(&mut prefix, span.len() as u64, width, order)?;
        self.write_all(&prefix[..])?;
        self.write_all(span)?;
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteExtras for W {}

/// Write `span` preceded by its length, via a single contiguous write.
pub fn push_vector_contiguous<W: Write + ?Sized>(
    stream: &mut W,
    span: &[u8],
    width: Width,
    order: Endianness,
) -> StreamResult<()> {
    let mut buf = BytesMut::with_capacity(length_prefixed::buffer_size(span, width));
    length_prefixed::buffer_uint(&mut buf, span.len() as u64, width, order)?;
    append(&mut buf, span)?;
    stream.write_all(&buf[..])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buffer_unbuffer::U24, CodecError};
    use chrono::{DateTime, TimeZone, Utc};
    use std::io::Cursor;

    #[test]
    fn u8_file_roundtrip() {
        let mut file = Cursor::new(Vec::new());
        file.push_value(&123u8, Endianness::Big).unwrap();
        file.push_value(&213u8, Endianness::Big).unwrap();
        file.set_position(0);
        assert_eq!(file.pull_value::<u8>(Endianness::Big).unwrap(), 123);
        assert_eq!(file.pull_value::<u8>(Endianness::Big).unwrap(), 213);
        assert!(file.pull_value::<u8>(Endianness::Big).unwrap_err().is_end_of_input());
    }

    #[test]
    fn widths_roundtrip() {
        let mut file = Cursor::new(Vec::new());
        file.push_value(&65234u16, Endianness::Big).unwrap();
        file.push_value(&U24(12_365_234), Endianness::Big).unwrap();
        file.push_value(&4_294_967_294u32, Endianness::Little).unwrap();
        file.push_value(&-9i64, Endianness::Big).unwrap();
        assert_eq!(file.get_ref().len(), 2 + 3 + 4 + 8);
        file.set_position(0);
        assert_eq!(file.pull_value::<u16>(Endianness::Big).unwrap(), 65234);
        assert_eq!(
            file.pull_value::<U24>(Endianness::Big).unwrap(),
            U24(12_365_234)
        );
        assert_eq!(
            file.pull_value::<u32>(Endianness::Little).unwrap(),
            4_294_967_294
        );
        assert_eq!(file.pull_value::<i64>(Endianness::Big).unwrap(), -9);
    }

    #[test]
    fn timestamps() {
        let t = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        let mut out = Vec::new();
        out.push_value(&t, Endianness::Big).unwrap();
        let mut input = &out[..];
        assert_eq!(
            input.pull_value::<DateTime<Utc>>(Endianness::Big).unwrap(),
            t
        );
    }

    #[test]
    fn vectors() {
        let mut out = Vec::new();
        out.push_vector(b"hello", Width::W8, Endianness::Big).unwrap();
        push_vector_contiguous(&mut out, b"world!", Width::W32, Endianness::Little).unwrap();
        assert_eq!(out, b"\x05hello\x06\0\0\0world!");

        let mut input = &out[..];
        assert_eq!(
            &input.pull_vector(Width::W8, Endianness::Big).unwrap()[..],
            b"hello"
        );
        assert_eq!(
            &input.pull_vector(Width::W32, Endianness::Little).unwrap()[..],
            b"world!"
        );
        assert!(input.is_empty());
    }

    #[test]
    fn vector_length_overflow() {
        let mut out = Vec::new();
        let err = out
            .push_vector(&[0u8; 300], Width::W8, Endianness::Big)
            .unwrap_err();
        assert!(matches!(
            err,
            StreamError::Codec(CodecError::LengthOverflow { len: 300, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn truncated_vector() {
        let mut input = &b"\x09short"[..];
        assert!(input
            .pull_vector(Width::W8, Endianness::Big)
            .unwrap_err()
            .is_end_of_input());
    }

    #[test]
    fn skip_and_bytes() {
        let mut input = &b"abcdef"[..];
        input.pull_skip(2).unwrap();
        assert_eq!(&input.pull_bytes(3).unwrap()[..], b"cde");
        assert!(input.pull_skip(2).unwrap_err().is_end_of_input());
        input.pull_skip(0).unwrap();
    }

    #[test]
    fn hard_errors_are_not_eof() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "broken"))
            }
        }
        let err = Broken.pull_value::<u32>(Endianness::Big).unwrap_err();
        assert!(matches!(err, StreamError::Io(_)));
    }
}
