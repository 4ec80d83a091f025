// Copyright 2021, Collabora, Ltd.
// SPDX-License-Identifier: BSL-1.0
// Author: Ryan A. Pavlik <ryan.pavlik@collabora.com>

//! Random bytes from the operating system entropy source.

/// Fill `dest` with bytes from the operating system entropy source.
///
/// # Panics
/// If the entropy source fails. There is no fallback to a weaker generator.
pub fn fill_random(dest: &mut [u8]) {
    if let Err(e) = getrandom::getrandom(dest) {
        tracing::error!(error = %e, len = dest.len(), "OS entropy source failed");
        panic!("failed to read from the OS entropy source: {}", e);
    }
}

/// Get `n` bytes from the operating system entropy source.
///
/// # Panics
/// If the entropy source fails.
pub fn random_bytes(n: usize) -> Vec<u8> {
    let mut v = vec![0u8; n];
    fill_random(&mut v);
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert!(random_bytes(0).is_empty());
        assert_eq!(random_bytes(17).len(), 17);
    }

    #[test]
    fn not_constant() {
        // 2^-256 chance of a false failure.
        let a = random_bytes(32);
        let b = random_bytes(32);
        assert_ne!(a, b);
    }
}
