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

//! Component G: the working-tree reconciler. Operates on the ordinary
//! filesystem directly beneath the repository root, excluding `.gitlet`
//! itself. This spec pins flat-tree semantics (§9): a single, non-recursive
//! directory listing is sufficient.

use std::collections::BTreeSet;
use std::path::Path;

use crate::commit::Tree;
use crate::error::RepoError;
use crate::error::Result;
use crate::file_util;

pub const GITLET_DIR_NAME: &str = ".gitlet";

/// Sorted, flat listing of every regular file directly under `root`,
/// excluding `.gitlet`.
pub fn list_working_files(root: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    let entries = std::fs::read_dir(root).map_err(|source| RepoError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| RepoError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| RepoError::Io {
            path: entry.path(),
            source,
        })?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.insert(name.to_string());
        }
    }
    Ok(names)
}

pub fn read_working_file(root: &Path, path: &str) -> Result<Option<Vec<u8>>> {
    let full = root.join(path);
    if !full.is_file() {
        return Ok(None);
    }
    file_util::read(&full).map(Some)
}

pub fn write_working_file(root: &Path, path: &str, bytes: &[u8]) -> Result<()> {
    file_util::write_atomic(&root.join(path), bytes)
}

pub fn delete_working_file(root: &Path, path: &str) -> Result<()> {
    let full = root.join(path);
    match std::fs::remove_file(&full) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RepoError::Io { path: full, source }),
    }
}

/// The conservative safety check used by checkout-branch and merge: any
/// working-tree file not tracked by `current_tree` is unsafe, regardless of
/// whether the target operation would actually touch it. This is an
/// intentional asymmetry with [`check_untracked_safety_for_reset`],
/// preserved from the source (§9).
pub fn check_untracked_safety(root: &Path, current_tree: &Tree) -> Result<()> {
    for path in list_working_files(root)? {
        if !current_tree.contains_key(&path) {
            return Err(RepoError::UntrackedOverwrite { path });
        }
    }
    Ok(())
}

/// The stricter, content-comparing safety check used by reset: an untracked
/// file is safe as long as the target commit either doesn't mention that
/// path, or mentions it with byte-identical content to what's already on
/// disk.
pub fn check_untracked_safety_for_reset(
    root: &Path,
    current_tree: &Tree,
    target_tree: &Tree,
    store: &crate::store::ObjectStore,
) -> Result<()> {
    for path in list_working_files(root)? {
        if current_tree.contains_key(&path) {
            continue;
        }
        let Some(target_blob) = target_tree.get(&path) else {
            continue;
        };
        let target_content = store.get_blob(target_blob)?;
        let working_content = read_working_file(root, &path)?.unwrap_or_default();
        if target_content != working_content {
            return Err(RepoError::UntrackedOverwrite { path });
        }
    }
    Ok(())
}

/// Overwrites (creating if absent) every working file named by `tree`.
pub fn materialize(
    root: &Path,
    tree: &Tree,
    store: &crate::store::ObjectStore,
) -> Result<()> {
    for (path, blob) in tree {
        let content = store.get_blob(blob)?;
        write_working_file(root, path, &content)?;
    }
    Ok(())
}

/// Deletes every working file tracked by `current_tree` but absent from
/// `target_tree`.
pub fn prune(root: &Path, current_tree: &Tree, target_tree: &Tree) -> Result<()> {
    for path in current_tree.keys() {
        if !target_tree.contains_key(path) {
            delete_working_file(root, path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha1Hasher;
    use crate::store::ObjectStore;

    fn setup() -> (tempfile::TempDir, ObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(&dir.path().join(".gitlet"));
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn conservative_check_flags_any_untracked_file() {
        let (dir, _store) = setup();
        std::fs::write(dir.path().join("b.txt"), b"stray").unwrap();
        let current_tree = Tree::new();
        assert!(matches!(
            check_untracked_safety(dir.path(), &current_tree),
            Err(RepoError::UntrackedOverwrite { .. })
        ));
    }

    #[test]
    fn reset_check_allows_identical_content() {
        let (dir, store) = setup();
        let hasher = Sha1Hasher;
        std::fs::write(dir.path().join("b.txt"), b"same").unwrap();
        let id = store.put_blob(&hasher, b"same").unwrap();
        let mut target_tree = Tree::new();
        target_tree.insert("b.txt".to_string(), id);
        let current_tree = Tree::new();
        assert!(
            check_untracked_safety_for_reset(dir.path(), &current_tree, &target_tree, &store)
                .is_ok()
        );
    }

    #[test]
    fn reset_check_flags_conflicting_content() {
        let (dir, store) = setup();
        let hasher = Sha1Hasher;
        std::fs::write(dir.path().join("b.txt"), b"mine").unwrap();
        let id = store.put_blob(&hasher, b"theirs").unwrap();
        let mut target_tree = Tree::new();
        target_tree.insert("b.txt".to_string(), id);
        let current_tree = Tree::new();
        assert!(matches!(
            check_untracked_safety_for_reset(dir.path(), &current_tree, &target_tree, &store),
            Err(RepoError::UntrackedOverwrite { .. })
        ));
    }

    #[test]
    fn materialize_then_prune() {
        let (dir, store) = setup();
        let hasher = Sha1Hasher;
        let id = store.put_blob(&hasher, b"content").unwrap();
        let mut tree = Tree::new();
        tree.insert("a.txt".to_string(), id);
        materialize(dir.path(), &tree, &store).unwrap();
        assert_eq!(read_working_file(dir.path(), "a.txt").unwrap().unwrap(), b"content");

        prune(dir.path(), &tree, &Tree::new()).unwrap();
        assert!(read_working_file(dir.path(), "a.txt").unwrap().is_none());
    }
}
