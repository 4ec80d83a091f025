// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Cursor-style reading and appending of binary data.
//!
//! Reads drain bytes from the front of a buffer, writes append to the back.
//! The same operations work on borrowed slices (`&[u8]`), growable vectors,
//! `bytes::BytesMut` and the owning [`Buffer`], through the [`BufExtras`] and
//! [`BufMutExtras`] extension traits.
//!
//! ```
//! use bytebuilder::{BufExtras, BufMutExtras, Buffer, Width};
//!
//! let mut buf = Buffer::new();
//! buf.write_u32_be(u32::MAX).unwrap();
//! buf.write_u24_le(12_365_234).unwrap();
//! buf.write_vector(b"name", Width::W8).unwrap();
//!
//! assert_eq!(buf.read_u32_be().unwrap(), u32::MAX);
//! assert_eq!(buf.read_u24_le().unwrap(), 12_365_234);
//! assert_eq!(&buf.read_vector(Width::W8).unwrap()[..], b"name");
//! assert!(buf.is_empty());
//! ```

pub mod buffer_unbuffer;
mod byte_buffer;
pub mod data_types;
mod endian;
mod error;
pub mod prelude;
pub mod random;
pub mod sync_io;

#[cfg(feature = "async-futures")]
pub mod async_io;

#[cfg(feature = "tokio-codec")]
pub mod codec;

pub use crate::{
    buffer_unbuffer::{
        BufExtras, BufMutExtras, BufferSize, BufferTo, BytesMutExtras, CodecError,
        ConstantBufferSize, InvalidWidth, SizeRequirement, UnbufferFrom, I24, U24,
    },
    byte_buffer::Buffer,
    data_types::Width,
    endian::{Endianness, WordSize, INT_SIZE, NATIVE_ENDIAN, WORD_SIZE},
    error::{StreamError, StreamResult},
    sync_io::{ReadExtras, WriteExtras},
};

#[cfg(feature = "tokio-codec")]
pub use crate::codec::{VectorCodec, DEFAULT_MAX_FRAME_LEN};
