// Copyright 2018-2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

use std::{
    fmt::{self, Display},
    ops::Add,
};

/// Implemented by errors that may carry a `SizeRequirement`.
pub trait MayContainSizeRequirement {
    fn try_get_size_requirement(self) -> Option<SizeRequirement>;
}

/// Implemented by errors whose `SizeRequirement`, if any, can be loosened
/// from "exactly" to "at least".
pub trait ExpandSizeRequirement {
    fn expand_size_requirement(self) -> Self;
}

/// How many more bytes a read needs before it can succeed.
///
/// `Exactly` means the read will succeed once that many more bytes arrive.
/// `AtLeast` is used when only part of a value could be inspected, such as a
/// length prefix that was itself cut short.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeRequirement {
    Exactly(usize),
    AtLeast(usize),
    Unknown,
}

impl SizeRequirement {
    /// The requirement for a read of `required` bytes from `available` bytes, if short.
    pub fn shortfall(required: usize, available: usize) -> Option<SizeRequirement> {
        required
            .checked_sub(available)
            .filter(|&missing| missing > 0)
            .map(SizeRequirement::Exactly)
    }

    /// Whether `additional` more bytes would be enough.
    ///
    /// Both `Exactly(n)` and `AtLeast(n)` are satisfied by `n` or more; `None` if unknown.
    pub fn satisfied_by(&self, additional: usize) -> Option<bool> {
        match *self {
            SizeRequirement::Exactly(n) | SizeRequirement::AtLeast(n) => Some(n <= additional),
            SizeRequirement::Unknown => None,
        }
    }

    /// Turn `Exactly(n)` into `AtLeast(n)`.
    pub fn expand(self) -> SizeRequirement {
        match self {
            SizeRequirement::Exactly(n) => SizeRequirement::AtLeast(n),
            other => other,
        }
    }

    /// The smallest number of additional bytes that could be enough, if known.
    pub fn min_bytes(&self) -> Option<usize> {
        match *self {
            SizeRequirement::Exactly(n) | SizeRequirement::AtLeast(n) => Some(n),
            SizeRequirement::Unknown => None,
        }
    }
}

impl MayContainSizeRequirement for SizeRequirement {
    fn try_get_size_requirement(self) -> Option<SizeRequirement> {
        Some(self)
    }
}

impl Add for SizeRequirement {
    type Output = SizeRequirement;
    fn add(self, other: SizeRequirement) -> Self::Output {
        use self::SizeRequirement::*;
        match (self, other) {
            (Exactly(a), Exactly(b)) => Exactly(a.saturating_add(b)),
            (Exactly(a), AtLeast(b)) | (AtLeast(a), Exactly(b)) | (AtLeast(a), AtLeast(b)) => {
                AtLeast(a.saturating_add(b))
            }
            (Unknown, _) | (_, Unknown) => Unknown,
        }
    }
}

impl Display for SizeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SizeRequirement::Exactly(n) => write!(f, "exactly {}", n),
            SizeRequirement::AtLeast(n) => write!(f, "at least {}", n),
            SizeRequirement::Unknown => f.write_str("an unknown number of"),
        }
    }
}
