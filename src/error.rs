// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

use crate::buffer_unbuffer::{
    size_requirement::MayContainSizeRequirement, CodecError, SizeRequirement,
};
use thiserror::Error;

/// Error type returned when reading or writing through an I/O stream.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("reached end of input")]
    EndOfInput,
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

impl From<std::io::Error> for StreamError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            StreamError::EndOfInput
        } else {
            StreamError::Io(e)
        }
    }
}

/// `tokio_util` codecs need to turn their errors back into `std::io::Error`.
impl From<StreamError> for std::io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::EndOfInput => std::io::Error::from(std::io::ErrorKind::UnexpectedEof),
            StreamError::Io(e) => e,
            StreamError::Codec(e) => std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        }
    }
}

impl StreamError {
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, StreamError::EndOfInput)
    }
}

impl MayContainSizeRequirement for &StreamError {
    fn try_get_size_requirement(self) -> Option<SizeRequirement> {
        match self {
            StreamError::Codec(e) => e.try_get_size_requirement(),
            _ => None,
        }
    }
}

pub type StreamResult<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn eof_is_distinct() {
        let e = StreamError::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(e.is_end_of_input());
        let e = StreamError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!e.is_end_of_input());
        assert!(matches!(e, StreamError::Io(_)));
    }

    #[test]
    fn back_to_io() {
        let e: io::Error = StreamError::Codec(CodecError::OutOfBuffer).into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        let e: io::Error = StreamError::EndOfInput.into();
        assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn size_requirement() {
        let e = StreamError::Codec(CodecError::NeedMoreData(SizeRequirement::Exactly(1)));
        assert_eq!(
            (&e).try_get_size_requirement(),
            Some(SizeRequirement::Exactly(1))
        );
        assert_eq!((&StreamError::EndOfInput).try_get_size_requirement(), None);
    }
}
