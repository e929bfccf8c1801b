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

//! The [`Fingerprint`] type: a 40-hex-character content address shared by
//! blobs and commits.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::hex_util;

/// A 40-character lowercase hex digest identifying a blob or a commit by its
/// content. Fingerprints for blobs and commits share one namespace-free type
/// because this core never needs to tell, from the fingerprint alone,
/// whether it names a blob or a commit -- the caller always knows from
/// context.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps an already-computed hex digest. Panics if `hex` is not a
    /// well-formed 40-character hex string; only [`crate::hash::ContentHasher`]
    /// impls should call this.
    pub(crate) fn from_hex(hex: String) -> Self {
        debug_assert_eq!(hex.len(), 40, "fingerprint must be a 40-char hex digest");
        debug_assert!(hex_util::is_hex_prefix(&hex));
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` hex characters, used for abbreviated display in logs.
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fingerprint").field(&self.0).finish()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Fingerprint> for String {
    fn from(id: Fingerprint) -> Self {
        id.0
    }
}
