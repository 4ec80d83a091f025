// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Byte order and word size of the build target.
//!
//! Both are fixed when the crate is compiled and never change at runtime.

use std::fmt::{self, Display};

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("bytebuilder only supports targets with a 32-bit or 64-bit native word size");

/// Order in which the bytes of a multi-byte integer appear on the wire.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Endianness {
    /// Least significant byte first.
    Little,
    /// Most significant byte first ("network order").
    Big,
}

/// Byte order of the target this crate was compiled for.
pub const NATIVE_ENDIAN: Endianness = if cfg!(target_endian = "big") {
    Endianness::Big
} else {
    Endianness::Little
};

impl Endianness {
    /// The byte order of the build target.
    ///
    /// ```
    /// use bytebuilder::{Endianness, NATIVE_ENDIAN};
    /// assert_eq!(Endianness::native(), NATIVE_ENDIAN);
    /// ```
    pub const fn native() -> Endianness {
        NATIVE_ENDIAN
    }

    pub fn is_native(self) -> bool {
        self == NATIVE_ENDIAN
    }
}

impl Default for Endianness {
    fn default() -> Self {
        NATIVE_ENDIAN
    }
}

impl Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => write!(f, "little-endian"),
            Endianness::Big => write!(f, "big-endian"),
        }
    }
}

/// Width of the native `isize`/`usize` integer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum WordSize {
    W32,
    W64,
}

/// Size in bits of an `isize` or `usize` value.
pub const INT_SIZE: u32 = usize::BITS;

#[cfg(target_pointer_width = "32")]
pub const WORD_SIZE: WordSize = WordSize::W32;

#[cfg(target_pointer_width = "64")]
pub const WORD_SIZE: WordSize = WordSize::W64;

impl WordSize {
    pub const fn bits(self) -> u32 {
        match self {
            WordSize::W32 => 32,
            WordSize::W64 => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_matches_target() {
        let probe = 1u16.to_ne_bytes();
        let expected = if probe[0] == 1 {
            Endianness::Little
        } else {
            Endianness::Big
        };
        assert_eq!(NATIVE_ENDIAN, expected);
        assert!(NATIVE_ENDIAN.is_native());
        assert_eq!(Endianness::default(), NATIVE_ENDIAN);
    }

    #[test]
    fn word_size_matches_usize() {
        assert_eq!(WORD_SIZE.bits(), INT_SIZE);
        assert_eq!(
            INT_SIZE as usize,
            std::mem::size_of::<usize>() * 8,
            "word size should be the width of usize"
        );
    }
}
