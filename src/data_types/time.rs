// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

/*!
 * Points in time stored as a 32-bit unsigned count of seconds since the Unix epoch (UTC).
 */

use crate::{
    buffer_unbuffer::{
        BufferResult, BufferTo, CodecError, ConstantBufferSize, UnbufferFrom, UnbufferResult,
    },
    endian::Endianness,
};

use bytes::{Buf, BufMut};
use chrono::{DateTime, Utc};
use std::{
    convert::TryFrom,
    time::{Duration, SystemTime},
};

/// Convert to the 32-bit wire representation, if representable.
///
/// ```
/// use bytebuilder::data_types::unix_time32;
/// use chrono::{TimeZone, Utc};
/// let day_one = Utc.timestamp_opt(86_400, 0).unwrap();
/// assert_eq!(unix_time32(&day_one).unwrap(), 86_400);
/// let before_epoch = Utc.timestamp_opt(-1, 0).unwrap();
/// assert!(unix_time32(&before_epoch).is_err());
/// ```
pub fn unix_time32(time: &DateTime<Utc>) -> Result<u32, CodecError> {
    let secs = time.timestamp();
    u32::try_from(secs).map_err(|_| CodecError::TimestampOutOfRange(secs))
}

/// Convert from the 32-bit wire representation.
pub fn from_unix_time32(secs: u32) -> DateTime<Utc> {
    DateTime::from(SystemTime::UNIX_EPOCH + Duration::from_secs(u64::from(secs)))
}

impl ConstantBufferSize for DateTime<Utc> {
    fn constant_buffer_size() -> usize {
        u32::constant_buffer_size()
    }
}

impl BufferTo for DateTime<Utc> {
    fn buffer_to<T: BufMut>(&self, buf: &mut T, order: Endianness) -> BufferResult {
        unix_time32(self)?.buffer_to(buf, order)
    }
}

impl UnbufferFrom for DateTime<Utc> {
    fn unbuffer_from<T: Buf>(buf: &mut T, order: Endianness) -> UnbufferResult<Self> {
        u32::unbuffer_from(buf, order).map(from_unix_time32)
    }
}
