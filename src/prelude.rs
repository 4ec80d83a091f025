// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Extension traits, for glob import.

pub use crate::{
    buffer_unbuffer::{BufExtras, BufMutExtras, BufferSize, BufferTo, BytesMutExtras, ConstantBufferSize, UnbufferFrom},
    sync_io::{ReadExtras, WriteExtras},
};
