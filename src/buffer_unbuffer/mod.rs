// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Routines and traits to buffer/unbuffer to/from byte buffers.

pub mod buffer;
mod error;
mod primitives;
mod size;
pub mod size_requirement;
pub mod unbuffer;

#[doc(inline)]
pub use crate::buffer_unbuffer::{
    error::{CodecError, InvalidWidth},
    primitives::{I24, U24},
    size::{BufferSize, ConstantBufferSize},
};

pub use crate::buffer_unbuffer::{
    buffer::{append, check_buffer_remaining, BufMutExtras, BufferResult, BufferTo, BytesMutExtras},
    size_requirement::SizeRequirement,
    unbuffer::{
        check_unbuffer_remaining, drain, peek, skip, BufExtras, UnbufferFrom, UnbufferResult,
    },
};
