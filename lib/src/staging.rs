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

//! Component D: the staging area -- the transient add-set / remove-set
//! intent that accumulates between commits. Persisted to disk (one file per
//! entry under `staging/add/` and `staging/remove/`) so intent survives
//! across process invocations.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use crate::commit::Path as TrackedPath;
use crate::error::RepoError;
use crate::error::Result;
use crate::file_util;
use crate::object_id::Fingerprint;

#[derive(Debug, Clone)]
pub struct StagingArea {
    add_dir: PathBuf,
    remove_dir: PathBuf,
}

impl StagingArea {
    pub fn new(gitlet_dir: &Path) -> Self {
        Self {
            add_dir: gitlet_dir.join("staging").join("add"),
            remove_dir: gitlet_dir.join("staging").join("remove"),
        }
    }

    pub fn init(&self) -> Result<()> {
        file_util::create_dir_all(&self.add_dir)?;
        file_util::create_dir_all(&self.remove_dir)?;
        Ok(())
    }

    /// Upserts `path -> id` in the add-set and drops any remove-set entry
    /// for the same path, maintaining the disjointness invariant.
    pub fn stage_add_entry(&self, path: &TrackedPath, id: &Fingerprint) -> Result<()> {
        file_util::write_atomic(&self.add_dir.join(path), id.as_str().as_bytes())?;
        self.unstage_remove_entry(path)
    }

    /// Removes `path` from the add-set, if present.
    pub fn unstage_add_entry(&self, path: &TrackedPath) -> Result<()> {
        remove_if_present(&self.add_dir.join(path))
    }

    pub fn stage_remove_entry(&self, path: &TrackedPath, id: &Fingerprint) -> Result<()> {
        file_util::write_atomic(&self.remove_dir.join(path), id.as_str().as_bytes())?;
        self.unstage_add_entry(path)
    }

    pub fn unstage_remove_entry(&self, path: &TrackedPath) -> Result<()> {
        remove_if_present(&self.remove_dir.join(path))
    }

    pub fn added(&self) -> Result<BTreeMap<TrackedPath, Fingerprint>> {
        read_entries(&self.add_dir)
    }

    pub fn removed(&self) -> Result<BTreeMap<TrackedPath, Fingerprint>> {
        read_entries(&self.remove_dir)
    }

    pub fn is_added(&self, path: &TrackedPath) -> bool {
        self.add_dir.join(path).is_file()
    }

    pub fn is_removed(&self, path: &TrackedPath) -> bool {
        self.remove_dir.join(path).is_file()
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.added()?.is_empty() && self.removed()?.is_empty())
    }

    pub fn clear(&self) -> Result<()> {
        clear_dir(&self.add_dir)?;
        clear_dir(&self.remove_dir)
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(RepoError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn clear_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir).map_err(|source| RepoError::Io {
        path: dir.to_path_buf(),
        source,
    })? {
        let entry = entry.map_err(|source| RepoError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        remove_if_present(&entry.path())?;
    }
    Ok(())
}

fn read_entries(dir: &Path) -> Result<BTreeMap<TrackedPath, Fingerprint>> {
    let mut entries = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(entries);
    }
    for entry in std::fs::read_dir(dir).map_err(|source| RepoError::Io {
        path: dir.to_path_buf(),
        source,
    })? {
        let entry = entry.map_err(|source| RepoError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let id_text = file_util::read_to_string(&path)?;
        entries.insert(
            name.to_string(),
            Fingerprint::from_hex(id_text.trim().to_string()),
        );
    }
    Ok(entries)
}
