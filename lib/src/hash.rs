// Copyright 2026 The Gitlet Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Component A: the Hasher.
//!
//! Kept as a trait, rather than a bare function, so the rest of the core
//! never names a hash crate directly -- only this module does.

use digest::Digest as _;

use crate::hex_util;
use crate::object_id::Fingerprint;

/// Deterministic content fingerprint over one or more byte inputs.
pub trait ContentHasher {
    /// Hashes the concatenation of `items`, in order, producing a 40-hex
    /// character [`Fingerprint`]. Equal input sequences always produce equal
    /// fingerprints, including across processes.
    fn hash(&self, items: &[&[u8]]) -> Fingerprint;
}

/// The shipped [`ContentHasher`]: SHA-1 over the concatenated inputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha1Hasher;

impl ContentHasher for Sha1Hasher {
    fn hash(&self, items: &[&[u8]]) -> Fingerprint {
        let mut hasher = sha1::Sha1::new();
        for item in items {
            hasher.update(item);
        }
        let digest = hasher.finalize();
        Fingerprint::from_hex(hex_util::encode_hex(&digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_sha1_digest() {
        // sha1("A") = 6dcd4ce23d88e2ee9568ba546c007c63d9131c1b
        let hasher = Sha1Hasher;
        let fp = hasher.hash(&[b"A"]);
        assert_eq!(fp.as_str(), "6dcd4ce23d88e2ee9568ba546c007c63d9131c1b");
    }

    #[test]
    fn concatenates_without_separator() {
        let hasher = Sha1Hasher;
        assert_eq!(hasher.hash(&[b"AB"]).as_str(), hasher.hash(&[b"A", b"B"]).as_str());
    }

    #[test]
    fn deterministic() {
        let hasher = Sha1Hasher;
        assert_eq!(hasher.hash(&[b"hello"]).as_str(), hasher.hash(&[b"hello"]).as_str());
    }
}
