// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! An owning byte buffer: reads drain from the front, writes append to the back.

use bytes::{buf::UninitSlice, Buf, BufMut, Bytes, BytesMut};
use std::io::{self, Read};

/// Owning byte buffer.
///
/// The stored bytes are exactly the not-yet-read remainder: there is no
/// separate read position. Reading physically removes bytes from the front
/// and writing appends them at the back.
///
/// `Buffer` implements `Buf` and `BufMut`, so all of the typed operations in
/// [`BufExtras`](crate::BufExtras) and [`BufMutExtras`](crate::BufMutExtras)
/// are available as methods.
///
/// ```
/// use bytebuilder::{BufExtras, BufMutExtras, Buffer};
/// let mut buf = Buffer::new();
/// buf.write_u8(234).unwrap();
/// buf.write_u8(123).unwrap();
/// assert_eq!(buf.read_u8().unwrap(), 234);
/// assert_eq!(buf.read_u8().unwrap(), 123);
/// assert!(buf.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer(BytesMut);

impl Buffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self(BytesMut::new())
    }

    /// Create an empty buffer with room for `capacity` bytes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(BytesMut::with_capacity(capacity))
    }

    /// Read from `reader` until end-of-input, and return a buffer holding everything read.
    ///
    /// Reaching end-of-input is the normal way for this to finish, not an error.
    pub fn read_all<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut writer = BytesMut::new().writer();
        let n = io::copy(reader, &mut writer)?;
        tracing::trace!(bytes = n, "read buffer to end of input");
        Ok(Self(writer.into_inner()))
    }

    /// Whether every byte has been read.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bytes not yet read.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The bytes not yet read.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    /// The first `n` unread bytes, without consuming them.
    pub fn peek(&self, n: usize) -> Option<&[u8]> {
        crate::buffer_unbuffer::peek(self.as_bytes(), n)
    }

    /// Borrow the underlying storage, for use with functions that take a `Buf` or `BufMut`.
    ///
    /// Reads and writes through this reference are reads and writes of this buffer.
    pub fn bytes_mut(&mut self) -> &mut BytesMut {
        &mut self.0
    }

    /// Discard every unread byte.
    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn into_inner(self) -> BytesMut {
        self.0
    }

    /// Convert the unread bytes into an immutable `Bytes` without copying.
    pub fn freeze(self) -> Bytes {
        self.0.freeze()
    }
}

impl From<BytesMut> for Buffer {
    fn from(bytes: BytesMut) -> Self {
        Self(bytes)
    }
}

/// Copies the bytes: a shared `Bytes` cannot hand its storage over to a unique `BytesMut`.
impl From<Bytes> for Buffer {
    fn from(bytes: Bytes) -> Self {
        Self(BytesMut::from(&bytes[..]))
    }
}

/// Copies the bytes into fresh `BytesMut` storage, then drops the vector.
///
/// Use `From<BytesMut>` to wrap existing storage without copying.
impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        let mut storage = BytesMut::with_capacity(bytes.len());
        storage.extend_from_slice(&bytes);
        Self(storage)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self(BytesMut::from(bytes))
    }
}

impl From<Buffer> for Bytes {
    fn from(buf: Buffer) -> Self {
        buf.freeze()
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Buf for Buffer {
    fn remaining(&self) -> usize {
        self.0.remaining()
    }

    fn chunk(&self) -> &[u8] {
        self.0.chunk()
    }

    fn advance(&mut self, cnt: usize) {
        self.0.advance(cnt)
    }

    fn copy_to_bytes(&mut self, len: usize) -> Bytes {
        self.0.copy_to_bytes(len)
    }
}

// SAFETY: every method forwards to the `BytesMut` we own, which upholds the `BufMut` contract.
unsafe impl BufMut for Buffer {
    fn remaining_mut(&self) -> usize {
        self.0.remaining_mut()
    }

    unsafe fn advance_mut(&mut self, cnt: usize) {
        self.0.advance_mut(cnt)
    }

    fn chunk_mut(&mut self) -> &mut UninitSlice {
        self.0.chunk_mut()
    }

    fn put_slice(&mut self, src: &[u8]) {
        self.0.put_slice(src)
    }
}
