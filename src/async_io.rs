// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Async counterparts of the `sync_io` adapters, over the `futures` I/O traits.

use bytes::{Bytes, BytesMut};
use futures::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    buffer_unbuffer::{BufferTo, BytesMutExtras, ConstantBufferSize, UnbufferFrom},
    byte_buffer::Buffer,
    data_types::{length_prefixed, Width},
    endian::Endianness,
    error::StreamResult,
};

/// Read exactly `n` bytes and append them to `buf`.
pub async fn read_n_into_bytes_mut<T: AsyncRead + Unpin>(
    stream: &mut T,
    buf: &mut BytesMut,
    n: usize,
) -> StreamResult<usize> {
    let orig_len = buf.len();
    buf.resize(orig_len + n, 0);
    if let Err(e) = stream.read_exact(&mut buf[orig_len..]).await {
        buf.truncate(orig_len);
        tracing::trace!(wanted = n, error = %e, "async read of fixed length failed");
        return Err(e.into());
    }
    Ok(n)
}

/// Read exactly the bytes of one `T` and unbuffer it.
pub async fn read_value<T, R>(stream: &mut R, order: Endianness) -> StreamResult<T>
where
    T: UnbufferFrom + ConstantBufferSize,
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(T::constant_buffer_size());
    read_n_into_bytes_mut(stream, &mut buf, T::constant_buffer_size()).await?;
    Ok(T::unbuffer_from(&mut buf, order)?)
}

/// Read exactly `n` bytes.
pub async fn read_bytes<R: AsyncRead + Unpin>(stream: &mut R, n: usize) -> StreamResult<Bytes> {
    let mut buf = BytesMut::with_capacity(n);
    read_n_into_bytes_mut(stream, &mut buf, n).await?;
    Ok(buf.freeze())
}

/// Read a length prefix of the given width, then that many bytes.
pub async fn read_vector<R: AsyncRead + Unpin>(
    stream: &mut R,
    width: Width,
    order: Endianness,
) -> StreamResult<Bytes> {
    let mut prefix = BytesMut::with_capacity(width.byte_len());
    read_n_into_bytes_mut(stream, &mut prefix, width.byte_len()).await?;
    let len = length_prefixed::unbuffer_uint(&mut prefix, width, order)?;
    let mut out = Vec::new();
    let copied = (&mut *stream).take(len).read_to_end(&mut out).await?;
    if (copied as u64) < len {
        tracing::trace!(wanted = len, got = copied, "stream reached end of input inside a vector");
        return Err(crate::StreamError::EndOfInput);
    }
    Ok(Bytes::from(out))
}

/// Read until end-of-input into a new `Buffer`.
pub async fn read_to_buffer<R: AsyncRead + Unpin>(stream: &mut R) -> StreamResult<Buffer> {
    let mut v = Vec::new();
    let n = stream.read_to_end(&mut v).await?;
    tracing::trace!(bytes = n, "read buffer to end of input");
    Ok(Buffer::from(v))
}

/// Buffer `v` and write all of its bytes.
pub async fn write_value<T, W>(stream: &mut W, v: &T, order: Endianness) -> StreamResult<()>
where
    T: BufferTo,
    W: AsyncWrite + Unpin,
{
    let buf = BytesMut::allocate_and_buffer(v, order)?;
    stream.write_all(&buf[..]).await?;
    Ok(())
}

/// Write `span` preceded by its length.
pub async fn write_vector<W: AsyncWrite + Unpin>(
    stream: &mut W,
    span: &[u8],
    width: Width,
    order: Endianness,
) -> StreamResult<()> {
    let mut buf = BytesMut::with_capacity(length_prefixed::buffer_size(span, width));
    length_prefixed::buffer_vector(&mut buf, span, width, order)?;
    stream.write_all(&buf[..]).await?;
    Ok(())
}
