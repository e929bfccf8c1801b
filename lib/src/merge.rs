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

//! Component H: the three-way merge resolver -- the per-path decision
//! table (§4.H) and conflict-marker synthesis.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::trace;

use crate::commit::Tree;
use crate::hash::ContentHasher;
use crate::object_id::Fingerprint;
use crate::staging::StagingArea;
use crate::store::ObjectStore;
use crate::working_tree;

pub const CONFLICT_START: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_MIDDLE: &str = "=======\n";
pub const CONFLICT_END: &str = ">>>>>>>\n";

/// The outcome of applying the decision table at one path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Decision {
    /// Nothing observable changes at this path.
    Noop,
    /// Check out the given branch's content and stage it for addition.
    TakeGiven(Fingerprint),
    /// Delete the working file and stage the removal.
    Delete,
    /// The two sides touched this path incompatibly.
    Conflict {
        ours: Option<Fingerprint>,
        theirs: Option<Fingerprint>,
    },
}

/// Implements the per-path decision table in §4.H given the blob fingerprint
/// (or absence) of one path under the split point (`s`), current commit
/// (`c`), and given branch (`g`).
fn decide(s: Option<&Fingerprint>, c: Option<&Fingerprint>, g: Option<&Fingerprint>) -> Decision {
    match s {
        Some(s_id) => match c {
            Some(c_id) if c_id == s_id => match g {
                None => Decision::Delete,
                Some(g_id) if g_id == s_id => Decision::Noop,
                Some(g_id) => Decision::TakeGiven(g_id.clone()),
            },
            None => match g {
                Some(g_id) if g_id == s_id => Decision::Noop,
                None => Decision::Noop,
                Some(g_id) => Decision::Conflict {
                    ours: None,
                    theirs: Some(g_id.clone()),
                },
            },
            Some(c_id) => match g {
                Some(g_id) if g_id == s_id => Decision::Noop,
                None => Decision::Conflict {
                    ours: Some(c_id.clone()),
                    theirs: None,
                },
                Some(g_id) if g_id == c_id => Decision::Noop,
                Some(g_id) => Decision::Conflict {
                    ours: Some(c_id.clone()),
                    theirs: Some(g_id.clone()),
                },
            },
        },
        None => match (c, g) {
            (None, None) => Decision::Noop,
            (None, Some(g_id)) => Decision::TakeGiven(g_id.clone()),
            (Some(_), None) => Decision::Noop,
            (Some(c_id), Some(g_id)) if c_id == g_id => Decision::Noop,
            (Some(c_id), Some(g_id)) => Decision::Conflict {
                ours: Some(c_id.clone()),
                theirs: Some(g_id.clone()),
            },
        },
    }
}

/// Synthesizes the conflict-marker content for one path.
fn conflict_content(store: &ObjectStore, ours: &Option<Fingerprint>, theirs: &Option<Fingerprint>) -> crate::error::Result<Vec<u8>> {
    let ours_bytes = match ours {
        Some(id) => store.get_blob(id)?,
        None => Vec::new(),
    };
    let theirs_bytes = match theirs {
        Some(id) => store.get_blob(id)?,
        None => Vec::new(),
    };
    let mut out = Vec::new();
    out.extend_from_slice(CONFLICT_START.as_bytes());
    out.extend_from_slice(&ours_bytes);
    out.extend_from_slice(CONFLICT_MIDDLE.as_bytes());
    out.extend_from_slice(&theirs_bytes);
    out.extend_from_slice(CONFLICT_END.as_bytes());
    Ok(out)
}

/// Applies the three-way merge of `current` and `given` against `split` to
/// the working tree and staging area, path by path. Returns the resulting
/// tree (current tree with the table's actions folded in) and whether any
/// conflict was encountered.
pub fn apply(
    root: &Path,
    store: &ObjectStore,
    staging: &StagingArea,
    hasher: &dyn ContentHasher,
    split: &Tree,
    current: &Tree,
    given: &Tree,
) -> crate::error::Result<(Tree, bool)> {
    let mut paths = BTreeSet::new();
    paths.extend(split.keys().cloned());
    paths.extend(current.keys().cloned());
    paths.extend(given.keys().cloned());

    let mut result_tree = current.clone();
    let mut had_conflict = false;

    for path in paths {
        let s = split.get(&path);
        let c = current.get(&path);
        let g = given.get(&path);
        let decision = decide(s, c, g);
        trace!(path = %path, ?decision, "merge decision");
        match decision {
            Decision::Noop => {}
            Decision::TakeGiven(id) => {
                let content = store.get_blob(&id)?;
                working_tree::write_working_file(root, &path, &content)?;
                staging.stage_add_entry(&path, &id)?;
                result_tree.insert(path, id);
            }
            Decision::Delete => {
                working_tree::delete_working_file(root, &path)?;
                let removed_id = c.or(s).expect("delete decision implies a tracked blob").clone();
                staging.stage_remove_entry(&path, &removed_id)?;
                result_tree.remove(&path);
            }
            Decision::Conflict { ours, theirs } => {
                had_conflict = true;
                let content = conflict_content(store, &ours, &theirs)?;
                working_tree::write_working_file(root, &path, &content)?;
                let blob_id = store.put_blob(hasher, &content)?;
                staging.stage_add_entry(&path, &blob_id)?;
                result_tree.insert(path, blob_id);
            }
        }
    }

    Ok((result_tree, had_conflict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha1Hasher;

    fn id(byte: u8) -> Fingerprint {
        Fingerprint::from_hex(format!("{byte:02x}").repeat(20))
    }

    #[test]
    fn unchanged_on_both_sides_is_noop() {
        let a = id(1);
        assert_eq!(decide(Some(&a), Some(&a), Some(&a)), Decision::Noop);
    }

    #[test]
    fn only_given_changed_takes_given() {
        let s = id(1);
        let g = id(2);
        assert_eq!(decide(Some(&s), Some(&s), Some(&g)), Decision::TakeGiven(g));
    }

    #[test]
    fn only_current_changed_is_noop() {
        let s = id(1);
        let c = id(2);
        assert_eq!(decide(Some(&s), Some(&c), Some(&s)), Decision::Noop);
    }

    #[test]
    fn both_changed_same_way_is_noop() {
        let s = id(1);
        let c = id(2);
        assert_eq!(decide(Some(&s), Some(&c), Some(&c)), Decision::Noop);
    }

    #[test]
    fn both_changed_differently_conflicts() {
        let s = id(1);
        let c = id(2);
        let g = id(3);
        assert_eq!(
            decide(Some(&s), Some(&c), Some(&g)),
            Decision::Conflict {
                ours: Some(c),
                theirs: Some(g)
            }
        );
    }

    #[test]
    fn given_deleted_unmodified_current_deletes() {
        let s = id(1);
        assert_eq!(decide(Some(&s), Some(&s), None), Decision::Delete);
    }

    #[test]
    fn current_modified_given_deleted_conflicts() {
        let s = id(1);
        let c = id(2);
        assert_eq!(
            decide(Some(&s), Some(&c), None),
            Decision::Conflict {
                ours: Some(c),
                theirs: None
            }
        );
    }

    #[test]
    fn current_deleted_unmodified_given_stays_absent() {
        let s = id(1);
        assert_eq!(decide(Some(&s), None, Some(&s)), Decision::Noop);
    }

    #[test]
    fn current_deleted_given_modified_conflicts() {
        let s = id(1);
        let g = id(2);
        assert_eq!(
            decide(Some(&s), None, Some(&g)),
            Decision::Conflict {
                ours: None,
                theirs: Some(g)
            }
        );
    }

    #[test]
    fn new_in_given_only_takes_given() {
        let g = id(2);
        assert_eq!(decide(None, None, Some(&g)), Decision::TakeGiven(g));
    }

    #[test]
    fn new_in_current_only_is_noop() {
        let c = id(2);
        assert_eq!(decide(None, Some(&c), None), Decision::Noop);
    }

    #[test]
    fn new_in_both_differently_conflicts() {
        let c = id(2);
        let g = id(3);
        assert_eq!(
            decide(None, Some(&c), Some(&g)),
            Decision::Conflict {
                ours: Some(c),
                theirs: Some(g)
            }
        );
    }

    #[test]
    fn new_in_both_identically_is_noop() {
        let c = id(2);
        assert_eq!(decide(None, Some(&c), Some(&c)), Decision::Noop);
    }

    #[test]
    fn conflict_marker_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(&dir.path().join(".gitlet"));
        store.init().unwrap();
        let hasher = Sha1Hasher;
        let ours = store.put_blob(&hasher, b"C").unwrap();
        let theirs = store.put_blob(&hasher, b"B").unwrap();
        let bytes = conflict_content(&store, &Some(ours), &Some(theirs)).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "<<<<<<< HEAD\nC=======\nB>>>>>>>\n"
        );
    }
}
