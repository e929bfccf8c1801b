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

//! Component B: the object store. Two flat, content-addressed namespaces
//! (`objects/commits/<id>`, `objects/blobs/<id>`) rooted under a `.gitlet`
//! directory.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use crate::commit::Commit;
use crate::error::RepoError;
use crate::error::Result;
use crate::file_util;
use crate::hash::ContentHasher;
use crate::object_id::Fingerprint;

/// Wraps filesystem access to one repository's object namespaces. Holds no
/// cache: the working set for this core is small enough that re-reading from
/// disk on every lookup is simpler and still fast.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    commits_dir: PathBuf,
    blobs_dir: PathBuf,
}

impl ObjectStore {
    /// `gitlet_dir` is the `.gitlet` directory itself.
    pub fn new(gitlet_dir: &Path) -> Self {
        Self {
            commits_dir: gitlet_dir.join("objects").join("commits"),
            blobs_dir: gitlet_dir.join("objects").join("blobs"),
        }
    }

    pub fn init(&self) -> Result<()> {
        file_util::create_dir_all(&self.commits_dir)?;
        file_util::create_dir_all(&self.blobs_dir)?;
        Ok(())
    }

    fn blob_path(&self, id: &Fingerprint) -> PathBuf {
        self.blobs_dir.join(id.as_str())
    }

    fn commit_path(&self, id: &Fingerprint) -> PathBuf {
        self.commits_dir.join(id.as_str())
    }

    /// Hashes `bytes` and stores them under that fingerprint. A no-op if the
    /// fingerprint is already present.
    pub fn put_blob(&self, hasher: &dyn ContentHasher, bytes: &[u8]) -> Result<Fingerprint> {
        let id = hasher.hash(&[bytes]);
        file_util::write_atomic_if_absent(&self.blob_path(&id), bytes)?;
        Ok(id)
    }

    pub fn get_blob(&self, id: &Fingerprint) -> Result<Vec<u8>> {
        let path = self.blob_path(id);
        if !path.is_file() {
            return Err(RepoError::MissingObject {
                fingerprint: id.to_string(),
            });
        }
        file_util::read(&path)
    }

    pub fn has_blob(&self, id: &Fingerprint) -> bool {
        self.blob_path(id).is_file()
    }

    /// Writes `bytes` under the caller-supplied fingerprint without
    /// rehashing, trusting that `id` was computed correctly by the source
    /// store. Used only by remote sync, which copies objects verbatim
    /// between two stores that both already agree on the hash function.
    pub fn put_blob_raw(&self, id: &Fingerprint, bytes: &[u8]) -> Result<()> {
        file_util::write_atomic_if_absent(&self.blob_path(id), bytes)
    }

    /// Writes `commit` keyed by its own id. A no-op if already present.
    pub fn put_commit(&self, commit: &Commit) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(commit)?;
        file_util::write_atomic_if_absent(&self.commit_path(&commit.id), &bytes)
    }

    pub fn get_commit(&self, id: &Fingerprint) -> Result<Commit> {
        let path = self.commit_path(id);
        if !path.is_file() {
            return Err(RepoError::MissingObject {
                fingerprint: id.to_string(),
            });
        }
        let bytes = file_util::read(&path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn has_commit(&self, id: &Fingerprint) -> bool {
        self.commit_path(id).is_file()
    }

    pub fn all_commit_ids(&self) -> Result<HashSet<Fingerprint>> {
        let mut ids = HashSet::new();
        if !self.commits_dir.is_dir() {
            return Ok(ids);
        }
        for entry in std::fs::read_dir(&self.commits_dir)
            .map_err(|source| RepoError::Io {
                path: self.commits_dir.clone(),
                source,
            })?
        {
            let entry = entry.map_err(|source| RepoError::Io {
                path: self.commits_dir.clone(),
                source,
            })?;
            if let Some(name) = entry.file_name().to_str() {
                ids.insert(Fingerprint::from_hex(name.to_string()));
            }
        }
        Ok(ids)
    }

    /// Resolves a (possibly abbreviated) hex prefix to the one commit id
    /// starting with it.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<Fingerprint> {
        let mut matches: Vec<Fingerprint> = self
            .all_commit_ids()?
            .into_iter()
            .filter(|id| id.starts_with(prefix))
            .collect();
        match matches.len() {
            0 => Err(RepoError::NoSuchCommit),
            1 => Ok(matches.pop().unwrap()),
            _ => Err(RepoError::AmbiguousPrefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha1Hasher;

    fn store() -> (tempfile::TempDir, ObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn put_and_get_blob_roundtrip() {
        let (_dir, store) = store();
        let hasher = Sha1Hasher;
        let id = store.put_blob(&hasher, b"hello").unwrap();
        assert_eq!(store.get_blob(&id).unwrap(), b"hello");
        assert!(store.has_blob(&id));
    }

    #[test]
    fn missing_blob_errors() {
        let (_dir, store) = store();
        let bogus = Fingerprint::from_hex("0".repeat(40));
        assert!(matches!(
            store.get_blob(&bogus),
            Err(RepoError::MissingObject { .. })
        ));
    }

    #[test]
    fn resolve_prefix_ambiguous_and_unique() {
        let (_dir, store) = store();
        let hasher = Sha1Hasher;
        let c1 = crate::commit::Commit::new(&hasher, "one".into(), "t".into(), None, None, Default::default());
        store.put_commit(&c1).unwrap();
        let full = c1.id.as_str().to_string();
        assert_eq!(store.resolve_prefix(&full[..8]).unwrap(), c1.id);
        let bogus_prefix = "0".repeat(8);
        assert!(matches!(
            store.resolve_prefix(&bogus_prefix),
            Err(RepoError::NoSuchCommit)
        ));
    }
}
