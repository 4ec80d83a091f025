// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Data types with a fixed wire format beyond the plain integers.

pub mod length_prefixed;
mod time;

#[doc(inline)]
pub use crate::data_types::{
    length_prefixed::Width,
    time::{from_unix_time32, unix_time32},
};
