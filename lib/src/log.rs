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

//! Component K: log renderers. These produce structured records; rendering
//! the records as text is left to the outer shell (§1).

use std::collections::HashSet;

use crate::dag;
use crate::error::RepoError;
use crate::error::Result;
use crate::object_id::Fingerprint;
use crate::store::ObjectStore;

pub const ABBREV_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: Fingerprint,
    pub message: String,
    pub timestamp: String,
    /// Abbreviated (7-hex) ids of both parents, present only for merge
    /// commits.
    pub merge_parents: Option<(String, String)>,
}

/// Walks from `head` following first-parent only, emitting one record per
/// commit.
pub fn log(store: &ObjectStore, head: &Fingerprint) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    let mut current = Some(head.clone());
    while let Some(id) = current {
        let commit = store.get_commit(&id)?;
        let merge_parents = commit.second_parent.as_ref().map(|second| {
            (
                commit.parent.as_ref().unwrap().short(ABBREV_LEN).to_string(),
                second.short(ABBREV_LEN).to_string(),
            )
        });
        current = commit.parent.clone();
        entries.push(LogEntry {
            id: commit.id,
            message: commit.message,
            timestamp: commit.timestamp,
            merge_parents,
        });
    }
    Ok(entries)
}

/// Every commit in the store, in unspecified order.
pub fn global_log(store: &ObjectStore) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    for id in store.all_commit_ids()? {
        let commit = store.get_commit(&id)?;
        let merge_parents = commit.second_parent.as_ref().map(|second| {
            (
                commit.parent.as_ref().unwrap().short(ABBREV_LEN).to_string(),
                second.short(ABBREV_LEN).to_string(),
            )
        });
        entries.push(LogEntry {
            id: commit.id,
            message: commit.message,
            timestamp: commit.timestamp,
            merge_parents,
        });
    }
    Ok(entries)
}

/// Commit ids whose message equals `query`.
pub fn find(store: &ObjectStore, query: &str) -> Result<HashSet<Fingerprint>> {
    let mut found = HashSet::new();
    for id in store.all_commit_ids()? {
        let commit = store.get_commit(&id)?;
        if commit.message == query {
            found.insert(commit.id);
        }
    }
    if found.is_empty() {
        return Err(RepoError::NoCommitWithMessage);
    }
    Ok(found)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRow {
    pub id: Fingerprint,
    pub message: String,
    /// Which column (0 = first-parent spine, 1 = a merged-in side branch)
    /// this commit's node is drawn in.
    pub column: usize,
    /// True once this row's commit is the point where a side branch rejoins
    /// the spine.
    pub closes_branch: bool,
}

/// Renders a deterministic, branch-aware history starting from `head`: the
/// first-parent spine occupies column 0; each merge commit's second-parent
/// chain is walked in column 1 until it rejoins the first-parent spine (at
/// the merge base), at which point the side column closes. This exact shape
/// is advisory (§4.K) -- what matters is that it is deterministic and shows
/// branch structure, not the precise character art.
pub fn graph_log(store: &ObjectStore, head: &Fingerprint) -> Result<Vec<GraphRow>> {
    let spine = dag::ancestors(store, head)?;
    let mut rows = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(head.clone());
    while let Some(id) = current {
        if !visited.insert(id.clone()) {
            break;
        }
        let commit = store.get_commit(&id)?;
        rows.push(GraphRow {
            id: commit.id.clone(),
            message: commit.message.clone(),
            column: 0,
            closes_branch: false,
        });
        if let Some(second_parent) = commit.second_parent.clone() {
            let base = dag::lowest_common_ancestor(
                store,
                commit.parent.as_ref().unwrap_or(&commit.id),
                &second_parent,
            )?;
            let mut side = Some(second_parent);
            while let Some(side_id) = side {
                if Some(&side_id) == base.as_ref() || !spine.contains(&side_id) && visited.contains(&side_id)
                {
                    break;
                }
                if !visited.insert(side_id.clone()) {
                    break;
                }
                let side_commit = store.get_commit(&side_id)?;
                let reached_base = base.as_ref() == Some(&side_id);
                rows.push(GraphRow {
                    id: side_commit.id.clone(),
                    message: side_commit.message.clone(),
                    column: 1,
                    closes_branch: reached_base,
                });
                if reached_base {
                    break;
                }
                side = side_commit.parent;
            }
        }
        current = commit.parent;
    }
    Ok(rows)
}
