// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

use crate::{
    buffer_unbuffer::peek,
    data_types::{length_prefixed, Width},
    endian::Endianness,
    CodecError, StreamError,
};
use bytes::{Buf, Bytes, BytesMut};
use std::convert::TryFrom;
use tokio_util::codec::{Decoder, Encoder};

/// Codec providing length-prefixed framing.
///
/// Each frame is a length of the configured width followed by that many bytes.
/// Frames longer than the maximum (by default [`DEFAULT_MAX_FRAME_LEN`]) are
/// rejected when decoding and when encoding, so a corrupt length prefix is
/// reported as an error instead of driving a huge allocation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct VectorCodec {
    width: Width,
    order: Endianness,
    max_frame_len: Option<usize>,
}

/// Default limit on the body of a frame: 8 MiB.
pub const DEFAULT_MAX_FRAME_LEN: usize = 8 * 1024 * 1024;

impl VectorCodec {
    /// A codec with big-endian length prefixes of the given width,
    /// limited to frames of [`DEFAULT_MAX_FRAME_LEN`] bytes.
    pub fn new(width: Width) -> Self {
        Self {
            width,
            order: Endianness::Big,
            max_frame_len: Some(DEFAULT_MAX_FRAME_LEN),
        }
    }

    pub fn with_order(self, order: Endianness) -> Self {
        Self { order, ..self }
    }

    /// Limit the length of a frame body, not counting the prefix.
    pub fn with_max_frame_len(self, max_frame_len: usize) -> Self {
        Self {
            max_frame_len: Some(max_frame_len),
            ..self
        }
    }

    /// Accept any frame length the prefix can express.
    ///
    /// Decoding still fails rather than panicking if a length cannot be
    /// addressed, but buffers may grow as large as the peer claims.
    pub fn without_max_frame_len(self) -> Self {
        Self {
            max_frame_len: None,
            ..self
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn order(&self) -> Endianness {
        self.order
    }

    pub fn max_frame_len(&self) -> Option<usize> {
        self.max_frame_len
    }

    fn check_frame_len(&self, len: u64) -> Result<usize, StreamError> {
        let too_long = CodecError::LengthOverflow {
            len,
            width: self.width,
        };
        let len = usize::try_from(len).map_err(|_| too_long.clone())?;
        match self.max_frame_len {
            Some(max) if len > max => {
                tracing::debug!(len, max, "rejecting oversized frame");
                Err(too_long.into())
            }
            _ => Ok(len),
        }
    }
}

impl Decoder for VectorCodec {
    type Item = Bytes;
    type Error = StreamError;
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut prefix = match peek(&src[..], self.width.byte_len()) {
            Some(prefix) => prefix,
            None => return Ok(None),
        };
        let len = length_prefixed::unbuffer_uint(&mut prefix, self.width, self.order)?;
        let len = self.check_frame_len(len)?;
        let total = match self.width.byte_len().checked_add(len) {
            Some(total) => total,
            None => {
                tracing::debug!(len, "frame length cannot be addressed");
                return Err(CodecError::LengthOverflow {
                    len: len as u64,
                    width: self.width,
                }
                .into());
            }
        };
        if src.len() < total {
            tracing::trace!(have = src.len(), need = total, "waiting for the rest of a frame");
            let cap = self.max_frame_len.unwrap_or(DEFAULT_MAX_FRAME_LEN);
            src.reserve((total - src.len()).min(cap));
            return Ok(None);
        }
        src.advance(self.width.byte_len());
        Ok(Some(src.split_to(len).freeze()))
    }
}

impl Encoder<Bytes> for VectorCodec {
    type Error = StreamError;
    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.check_frame_len(item.len() as u64)?;
        dst.reserve(length_prefixed::buffer_size(&item, self.width));
        length_prefixed::buffer_vector(dst, &item, self.width, self.order)?;
        Ok(())
    }
}
