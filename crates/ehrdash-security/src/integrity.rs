// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SHA-256 helpers for password digests.

use ehrdash_core::digest::sha256;

/// Lowercase hex SHA-256 of `data`.
pub use ehrdash_core::digest::sha256_hex as hash_bytes;

/// Whether `data` hashes to `expected_hex` (case-insensitive hex).
///
/// The digest comparison does not short-circuit on the first differing byte.
pub fn verify_hash(data: &[u8], expected_hex: &str) -> bool {
    let Ok(expected) = hex::decode(expected_hex.trim()) else {
        return false;
    };
    let actual = sha256(data);
    if expected.len() != actual.len() {
        return false;
    }
    expected
        .iter()
        .zip(actual.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
