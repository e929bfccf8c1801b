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

//! Component I: the status reporter.

use std::collections::BTreeSet;
use std::path::Path;

use crate::commit::Tree;
use crate::error::Result;
use crate::ref_store::RefStore;
use crate::staging::StagingArea;
use crate::store::ObjectStore;
use crate::working_tree;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub branches: Vec<BranchEntry>,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modified_not_staged: Vec<ModifiedEntry>,
    pub untracked: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    pub name: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModificationKind {
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModifiedEntry {
    pub path: String,
    pub kind: ModificationKind,
}

impl std::fmt::Display for ModifiedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            ModificationKind::Modified => "modified",
            ModificationKind::Deleted => "deleted",
        };
        write!(f, "{} ({label})", self.path)
    }
}

pub fn status(
    root: &Path,
    refs: &RefStore,
    staging: &StagingArea,
    store: &ObjectStore,
    current_tree: &Tree,
) -> Result<Status> {
    let head = refs.read_head()?;
    let branches = refs
        .list_branches()?
        .into_iter()
        .map(|name| BranchEntry {
            is_current: name == head,
            name,
        })
        .collect();

    let added = staging.added()?;
    let removed = staging.removed()?;
    let staged: Vec<String> = added.keys().cloned().collect();
    let removed_names: Vec<String> = removed.keys().cloned().collect();

    let working_files = working_tree::list_working_files(root)?;

    let mut modified = BTreeSet::new();
    for (path, tracked_id) in current_tree {
        if removed.contains_key(path) {
            continue;
        }
        match working_tree::read_working_file(root, path)? {
            None => {
                modified.insert(ModifiedEntry {
                    path: path.clone(),
                    kind: ModificationKind::Deleted,
                });
            }
            Some(content) if !added.contains_key(path) => {
                let tracked_content = store.get_blob(tracked_id)?;
                if content != tracked_content {
                    modified.insert(ModifiedEntry {
                        path: path.clone(),
                        kind: ModificationKind::Modified,
                    });
                }
            }
            Some(_) => {}
        }
    }
    for (path, staged_id) in &added {
        match working_tree::read_working_file(root, path)? {
            None => {
                modified.insert(ModifiedEntry {
                    path: path.clone(),
                    kind: ModificationKind::Deleted,
                });
            }
            Some(content) => {
                let staged_content = store.get_blob(staged_id)?;
                if content != staged_content {
                    modified.insert(ModifiedEntry {
                        path: path.clone(),
                        kind: ModificationKind::Modified,
                    });
                }
            }
        }
    }

    let mut untracked = BTreeSet::new();
    for path in &working_files {
        let tracked = current_tree.contains_key(path) || added.contains_key(path);
        if !tracked {
            untracked.insert(path.clone());
        }
    }
    for path in removed.keys() {
        if working_files.contains(path) {
            untracked.insert(path.clone());
        }
    }

    Ok(Status {
        branches,
        staged,
        removed: removed_names,
        modified_not_staged: modified.into_iter().collect(),
        untracked: untracked.into_iter().collect(),
    })
}
