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

//! The [`Commit`] record (§3) and its deterministic id derivation.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::hash::ContentHasher;
use crate::object_id::Fingerprint;

/// Path relative to the working root. This spec pins flat-tree semantics, so
/// a plain `String` is sufficient -- there is no directory component to
/// model.
pub type Path = String;

/// Mapping from working-tree path to the fingerprint of its blob. Backed by
/// a `BTreeMap` so that iteration -- and therefore serialization -- is
/// always in sorted key order, which is what keeps commit ids reproducible
/// across processes (see the Design Notes' deliberate deviation from the
/// source's default map ordering).
pub type Tree = BTreeMap<Path, Fingerprint>;

pub const BOOTSTRAP_MESSAGE: &str = "initial commit";
pub const EPOCH_TIMESTAMP: &str = "Thu Jan 01 00:00:00 1970 +0000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: Fingerprint,
    pub message: String,
    pub timestamp: String,
    pub parent: Option<Fingerprint>,
    pub second_parent: Option<Fingerprint>,
    pub tree: Tree,
}

impl Commit {
    /// Builds a commit, deriving its id from (message, timestamp, parent,
    /// tree) per §3 -- `second_parent` is deliberately excluded from the
    /// derivation, a quirk preserved from the source.
    pub fn new(
        hasher: &dyn ContentHasher,
        message: String,
        timestamp: String,
        parent: Option<Fingerprint>,
        second_parent: Option<Fingerprint>,
        tree: Tree,
    ) -> Self {
        let id = compute_id(hasher, &message, &timestamp, parent.as_ref(), &tree);
        Self {
            id,
            message,
            timestamp,
            parent,
            second_parent,
            tree,
        }
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn bootstrap(hasher: &dyn ContentHasher) -> Self {
        Self::new(
            hasher,
            BOOTSTRAP_MESSAGE.to_string(),
            EPOCH_TIMESTAMP.to_string(),
            None,
            None,
            Tree::new(),
        )
    }
}

/// Canonical byte serialization of a tree, used only as hash input: sorted
/// `path\0fingerprint\n` records. Never written to disk verbatim -- on-disk
/// commits use JSON (see [`crate::store`]) -- this exists purely so the id
/// derivation has an unambiguous, order-independent encoding of the tree.
fn canonical_tree_bytes(tree: &Tree) -> Vec<u8> {
    let mut buf = Vec::new();
    for (path, fingerprint) in tree {
        buf.extend_from_slice(path.as_bytes());
        buf.push(0);
        buf.extend_from_slice(fingerprint.as_str().as_bytes());
        buf.push(b'\n');
    }
    buf
}

fn compute_id(
    hasher: &dyn ContentHasher,
    message: &str,
    timestamp: &str,
    parent: Option<&Fingerprint>,
    tree: &Tree,
) -> Fingerprint {
    let parent_bytes = parent.map(Fingerprint::as_str).unwrap_or("").as_bytes();
    let tree_bytes = canonical_tree_bytes(tree);
    hasher.hash(&[
        message.as_bytes(),
        timestamp.as_bytes(),
        parent_bytes,
        &tree_bytes,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha1Hasher;

    #[test]
    fn same_fields_same_id() {
        let hasher = Sha1Hasher;
        let mut tree = Tree::new();
        tree.insert("a.txt".to_string(), Fingerprint::from_hex("a".repeat(40)));
        let c1 = Commit::new(
            &hasher,
            "msg".into(),
            "t".into(),
            None,
            None,
            tree.clone(),
        );
        let c2 = Commit::new(
            &hasher,
            "msg".into(),
            "t".into(),
            None,
            Some(Fingerprint::from_hex("b".repeat(40))),
            tree,
        );
        assert_eq!(c1.id, c2.id, "second_parent must not affect the id");
    }

    #[test]
    fn different_tree_different_id() {
        let hasher = Sha1Hasher;
        let mut tree_a = Tree::new();
        tree_a.insert("a.txt".to_string(), Fingerprint::from_hex("a".repeat(40)));
        let tree_b = Tree::new();
        let c1 = Commit::new(&hasher, "msg".into(), "t".into(), None, None, tree_a);
        let c2 = Commit::new(&hasher, "msg".into(), "t".into(), None, None, tree_b);
        assert_ne!(c1.id, c2.id);
    }
}
