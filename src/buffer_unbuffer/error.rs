// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

use thiserror::Error;

use crate::data_types::Width;

use super::size_requirement::{ExpandSizeRequirement, MayContainSizeRequirement, SizeRequirement};

/// A bit count that is not one of the supported integer widths (8, 16, 24, 32, 64).
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[error("{0} is not a supported integer width: expected 8, 16, 24, 32 or 64 bits")]
pub struct InvalidWidth(pub u32);

/// Error type returned by buffering/unbuffering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unbuffering ran out of buffered bytes: need {0} additional bytes")]
    NeedMoreData(SizeRequirement),
    #[error("buffering ran out of buffer space")]
    OutOfBuffer,
    #[error("length {len} does not fit in a {width} length prefix")]
    LengthOverflow { len: u64, width: Width },
    #[error("timestamp {0} is outside the range of 32-bit unsigned Unix time")]
    TimestampOutOfRange(i64),
    #[error(transparent)]
    InvalidWidth(#[from] InvalidWidth),
}

impl From<SizeRequirement> for CodecError {
    fn from(val: SizeRequirement) -> Self {
        CodecError::NeedMoreData(val)
    }
}

impl CodecError {
    /// True if this error only means the input ended too soon.
    pub fn is_need_more_data(&self) -> bool {
        matches!(self, CodecError::NeedMoreData(_))
    }
}

impl MayContainSizeRequirement for CodecError {
    fn try_get_size_requirement(self) -> Option<SizeRequirement> {
        match self {
            CodecError::NeedMoreData(required) => Some(required),
            _ => None,
        }
    }
}

impl MayContainSizeRequirement for &CodecError {
    fn try_get_size_requirement(self) -> Option<SizeRequirement> {
        match self {
            CodecError::NeedMoreData(required) => Some(*required),
            _ => None,
        }
    }
}

impl ExpandSizeRequirement for CodecError {
    /// Maps `CodecError::NeedMoreData(SizeRequirement::Exactly(n))` to
    /// `CodecError::NeedMoreData(SizeRequirement::AtLeast(n))`
    fn expand_size_requirement(self) -> Self {
        use CodecError::*;
        match self {
            NeedMoreData(required) => NeedMoreData(required.expand()),
            _ => self,
        }
    }
}
