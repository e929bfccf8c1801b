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

//! Component C: named mutable pointers -- HEAD, local branches,
//! remote-tracking branches, and remote descriptors.

use std::path::Path;
use std::path::PathBuf;

use crate::error::RepoError;
use crate::error::Result;
use crate::file_util;
use crate::object_id::Fingerprint;

#[derive(Debug, Clone)]
pub struct RefStore {
    gitlet_dir: PathBuf,
}

impl RefStore {
    pub fn new(gitlet_dir: &Path) -> Self {
        Self {
            gitlet_dir: gitlet_dir.to_path_buf(),
        }
    }

    fn head_path(&self) -> PathBuf {
        self.gitlet_dir.join("HEAD")
    }

    fn heads_dir(&self) -> PathBuf {
        self.gitlet_dir.join("refs").join("heads")
    }

    fn remotes_dir(&self) -> PathBuf {
        self.gitlet_dir.join("refs").join("remotes")
    }

    fn remote_descriptors_dir(&self) -> PathBuf {
        self.gitlet_dir.join("remote")
    }

    pub fn init(&self) -> Result<()> {
        file_util::create_dir_all(&self.heads_dir())?;
        file_util::create_dir_all(&self.remotes_dir())?;
        file_util::create_dir_all(&self.remote_descriptors_dir())?;
        Ok(())
    }

    pub fn read_head(&self) -> Result<String> {
        Ok(file_util::read_to_string(&self.head_path())?.trim().to_string())
    }

    pub fn write_head(&self, value: &str) -> Result<()> {
        file_util::write_atomic(&self.head_path(), value.as_bytes())
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        if let Some((remote, branch)) = name.split_once('/') {
            self.remotes_dir().join(remote).join(branch)
        } else {
            self.heads_dir().join(name)
        }
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.branch_path(name).is_file()
    }

    pub fn read_branch(&self, name: &str) -> Result<Fingerprint> {
        let path = self.branch_path(name);
        if !path.is_file() {
            return Err(RepoError::NoSuchBranch);
        }
        let text = file_util::read_to_string(&path)?;
        Ok(Fingerprint::from_hex(text.trim().to_string()))
    }

    pub fn write_branch(&self, name: &str, id: &Fingerprint) -> Result<()> {
        file_util::write_atomic(&self.branch_path(name), id.as_str().as_bytes())
    }

    pub fn delete_branch(&self, name: &str) -> Result<()> {
        if !self.branch_exists(name) {
            return Err(RepoError::NoSuchBranch);
        }
        if self.read_head()? == name {
            return Err(RepoError::DeletingCurrent);
        }
        std::fs::remove_file(self.branch_path(name)).map_err(|source| RepoError::Io {
            path: self.branch_path(name),
            source,
        })
    }

    /// All qualified branch names: flat local names, and `<remote>/<branch>`
    /// for every remote-tracking branch, in sorted order.
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in read_dir_sorted(&self.heads_dir())? {
            if let Some(name) = entry.to_str() {
                names.push(name.to_string());
            }
        }
        if self.remotes_dir().is_dir() {
            for remote_entry in read_dir_sorted(&self.remotes_dir())? {
                let remote_dir = self.remotes_dir().join(&remote_entry);
                if !remote_dir.is_dir() {
                    continue;
                }
                for branch_entry in read_dir_sorted(&remote_dir)? {
                    if let (Some(remote), Some(branch)) =
                        (remote_entry.to_str(), branch_entry.to_str())
                    {
                        names.push(format!("{remote}/{branch}"));
                    }
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn add_remote(&self, name: &str, path: &str) -> Result<()> {
        let descriptor = self.remote_descriptors_dir().join(name);
        if descriptor.is_file() {
            return Err(RepoError::RemoteExists);
        }
        file_util::write_atomic(&descriptor, path.as_bytes())
    }

    pub fn remove_remote(&self, name: &str) -> Result<()> {
        let descriptor = self.remote_descriptors_dir().join(name);
        if !descriptor.is_file() {
            return Err(RepoError::NoSuchRemote);
        }
        std::fs::remove_file(&descriptor).map_err(|source| RepoError::Io {
            path: descriptor,
            source,
        })
    }

    pub fn resolve_remote(&self, name: &str) -> Result<String> {
        let descriptor = self.remote_descriptors_dir().join(name);
        if !descriptor.is_file() {
            return Err(RepoError::NoSuchRemote);
        }
        Ok(file_util::read_to_string(&descriptor)?.trim().to_string())
    }

    pub fn list_remotes(&self) -> Result<Vec<String>> {
        read_dir_sorted(&self.remote_descriptors_dir()).map(|entries| {
            entries
                .into_iter()
                .filter_map(|e| e.to_str().map(str::to_string))
                .collect()
        })
    }
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<std::ffi::OsString>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .map_err(|source| RepoError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .map(|entry| {
            entry
                .map(|e| e.file_name())
                .map_err(|source| RepoError::Io {
                    path: dir.to_path_buf(),
                    source,
                })
        })
        .collect::<Result<_>>()?;
    names.sort();
    Ok(names)
}
