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

//! Component F: the snapshot engine. Builds a commit from the current HEAD
//! commit's tree plus the staging area's intent, then advances the current
//! branch and clears staging.

use tracing::debug;
use tracing::instrument;

use crate::clock::Clock;
use crate::commit::Commit;
use crate::commit::Tree;
use crate::error::RepoError;
use crate::error::Result;
use crate::hash::ContentHasher;
use crate::object_id::Fingerprint;
use crate::ref_store::RefStore;
use crate::staging::StagingArea;
use crate::store::ObjectStore;

/// Builds and writes the new commit, advances `branch_name`, and clears
/// staging. Ordered per the resource model (§5): object write, then ref
/// write, then staging clear (there is no working-tree mutation for an
/// ordinary commit). Fails *NothingToCommit* if staging is empty -- the
/// precondition that applies to an ordinary `commit`, but not to a merge
/// commit (see [`commit_merge`]).
#[instrument(skip(store, refs, staging, hasher, clock), fields(branch = branch_name))]
pub fn commit(
    store: &ObjectStore,
    refs: &RefStore,
    staging: &StagingArea,
    hasher: &dyn ContentHasher,
    clock: &dyn Clock,
    branch_name: &str,
    current_tree: &Tree,
    current_id: &Fingerprint,
    message: String,
    second_parent: Option<Fingerprint>,
) -> Result<Commit> {
    let added = staging.added()?;
    let removed = staging.removed()?;
    if added.is_empty() && removed.is_empty() {
        return Err(RepoError::NothingToCommit);
    }
    write_and_advance(
        store,
        refs,
        staging,
        hasher,
        clock,
        branch_name,
        current_tree,
        current_id,
        message,
        second_parent,
    )
}

/// Like [`commit`], but for the tail end of a non-fast-forward `merge`: a
/// merge commit is created regardless of whether the per-path decision table
/// produced any staged change, since the two branches being joined is itself
/// the observable effect, per §4.H ("regardless" of diff emptiness once past
/// the two fast-forward short-circuits).
#[instrument(skip(store, refs, staging, hasher, clock), fields(branch = branch_name))]
pub fn commit_merge(
    store: &ObjectStore,
    refs: &RefStore,
    staging: &StagingArea,
    hasher: &dyn ContentHasher,
    clock: &dyn Clock,
    branch_name: &str,
    current_tree: &Tree,
    current_id: &Fingerprint,
    message: String,
    second_parent: Option<Fingerprint>,
) -> Result<Commit> {
    write_and_advance(
        store,
        refs,
        staging,
        hasher,
        clock,
        branch_name,
        current_tree,
        current_id,
        message,
        second_parent,
    )
}

#[allow(clippy::too_many_arguments)]
fn write_and_advance(
    store: &ObjectStore,
    refs: &RefStore,
    staging: &StagingArea,
    hasher: &dyn ContentHasher,
    clock: &dyn Clock,
    branch_name: &str,
    current_tree: &Tree,
    current_id: &Fingerprint,
    message: String,
    second_parent: Option<Fingerprint>,
) -> Result<Commit> {
    if message.trim().is_empty() {
        return Err(RepoError::EmptyMessage);
    }
    let added = staging.added()?;
    let removed = staging.removed()?;

    let mut tree = current_tree.clone();
    for (path, id) in &added {
        tree.insert(path.clone(), id.clone());
    }
    for path in removed.keys() {
        tree.remove(path);
    }

    let timestamp = clock.now();
    let commit = Commit::new(
        hasher,
        message,
        timestamp,
        Some(current_id.clone()),
        second_parent,
        tree,
    );

    store.put_commit(&commit)?;
    debug!(id = %commit.id, "wrote commit object");
    refs.write_branch(branch_name, &commit.id)?;
    debug!(branch = branch_name, id = %commit.id, "advanced branch");
    staging.clear()?;
    debug!("cleared staging area");

    Ok(commit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::hash::Sha1Hasher;

    fn env() -> (tempfile::TempDir, ObjectStore, RefStore, StagingArea) {
        let dir = tempfile::tempdir().unwrap();
        let gitlet = dir.path().join(".gitlet");
        let store = ObjectStore::new(&gitlet);
        let refs = RefStore::new(&gitlet);
        let staging = StagingArea::new(&gitlet);
        store.init().unwrap();
        refs.init().unwrap();
        staging.init().unwrap();
        (dir, store, refs, staging)
    }

    #[test]
    fn empty_message_rejected() {
        let (_dir, store, refs, staging) = env();
        let hasher = Sha1Hasher;
        let clock = FixedClock("t".into());
        let base = Commit::bootstrap(&hasher);
        store.put_commit(&base).unwrap();
        staging
            .stage_add_entry(&"a.txt".to_string(), &Fingerprint::from_hex("a".repeat(40)))
            .unwrap();
        let result = commit(
            &store, &refs, &staging, &hasher, &clock, "master", &base.tree, &base.id, "   ".into(), None,
        );
        assert!(matches!(result, Err(RepoError::EmptyMessage)));
    }

    #[test]
    fn nothing_to_commit_rejected() {
        let (_dir, store, refs, staging) = env();
        let hasher = Sha1Hasher;
        let clock = FixedClock("t".into());
        let base = Commit::bootstrap(&hasher);
        store.put_commit(&base).unwrap();
        let result = commit(
            &store, &refs, &staging, &hasher, &clock, "master", &base.tree, &base.id, "msg".into(), None,
        );
        assert!(matches!(result, Err(RepoError::NothingToCommit)));
    }

    #[test]
    fn commit_advances_branch_and_clears_staging() {
        let (_dir, store, refs, staging) = env();
        let hasher = Sha1Hasher;
        let clock = FixedClock("t".into());
        let base = Commit::bootstrap(&hasher);
        store.put_commit(&base).unwrap();
        refs.write_branch("master", &base.id).unwrap();
        let blob = store.put_blob(&hasher, b"A").unwrap();
        staging.stage_add_entry(&"a.txt".to_string(), &blob).unwrap();

        let new_commit = commit(
            &store, &refs, &staging, &hasher, &clock, "master", &base.tree, &base.id, "c1".into(), None,
        )
        .unwrap();

        assert_eq!(refs.read_branch("master").unwrap(), new_commit.id);
        assert_eq!(new_commit.parent, Some(base.id));
        assert!(staging.is_empty().unwrap());
        assert_eq!(new_commit.tree.get("a.txt"), Some(&blob));
    }

    #[test]
    fn commit_merge_succeeds_with_empty_staging() {
        let (_dir, store, refs, staging) = env();
        let hasher = Sha1Hasher;
        let clock = FixedClock("t".into());
        let base = Commit::bootstrap(&hasher);
        store.put_commit(&base).unwrap();
        refs.write_branch("master", &base.id).unwrap();
        let other = Commit::new(&hasher, "other".into(), "t".into(), Some(base.id.clone()), None, base.tree.clone());
        store.put_commit(&other).unwrap();

        let merge_commit = commit_merge(
            &store,
            &refs,
            &staging,
            &hasher,
            &clock,
            "master",
            &base.tree,
            &base.id,
            "Merged other into master.".into(),
            Some(other.id.clone()),
        )
        .unwrap();

        assert_eq!(refs.read_branch("master").unwrap(), merge_commit.id);
        assert_eq!(merge_commit.parent, Some(base.id));
        assert_eq!(merge_commit.second_parent, Some(other.id));
    }
}
