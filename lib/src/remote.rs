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

//! Component J: remote synchronization over a shared filesystem. A remote
//! is just another repository of this same kind, addressed by path; push
//! and fetch read and write its object store and ref store directly.

use tracing::debug;
use tracing::instrument;

use crate::dag;
use crate::error::RepoError;
use crate::error::Result;
use crate::object_id::Fingerprint;
use crate::ref_store::RefStore;
use crate::store::ObjectStore;

/// Copies every object in `ids` from `source` to `dest`, skipping objects
/// `dest` already has.
fn copy_objects(source: &ObjectStore, dest: &ObjectStore, ids: impl IntoIterator<Item = Fingerprint>) -> Result<()> {
    for id in ids {
        if dest.has_commit(&id) {
            continue;
        }
        let commit = source.get_commit(&id)?;
        for blob_id in commit.tree.values() {
            if !dest.has_blob(blob_id) {
                let bytes = source.get_blob(blob_id)?;
                dest.put_blob_raw(blob_id, &bytes)?;
            }
        }
        dest.put_commit(&commit)?;
        debug!(id = %id, "copied commit object");
    }
    Ok(())
}

/// Pushes `local_current_id` to `branch` on the peer. Fails
/// [`RepoError::PushNotFastForward`] unless the peer's current-branch head
/// is an ancestor of the local current commit.
#[instrument(skip(local_store, peer_store, peer_refs), fields(branch))]
pub fn push(
    local_store: &ObjectStore,
    peer_store: &ObjectStore,
    peer_refs: &RefStore,
    branch: &str,
    local_current_id: &Fingerprint,
) -> Result<()> {
    let peer_head = peer_refs.read_head()?;
    let remote_current = peer_refs.read_branch(&peer_head)?;
    if !dag::is_ancestor(local_store, &remote_current, local_current_id)? {
        return Err(RepoError::PushNotFastForward);
    }
    let ids = dag::frontier(local_store, &remote_current, local_current_id)?;
    copy_objects(local_store, peer_store, ids)?;
    peer_refs.write_branch(branch, local_current_id)?;
    Ok(())
}

/// Fetches `branch` from the peer into the local remote-tracking ref
/// `remote_tracking_name`. Returns the fetched commit id.
#[instrument(skip(local_store, local_refs, peer_store, peer_refs), fields(branch))]
pub fn fetch(
    local_store: &ObjectStore,
    local_refs: &RefStore,
    peer_store: &ObjectStore,
    peer_refs: &RefStore,
    branch: &str,
    remote_tracking_name: &str,
    local_current_id: &Fingerprint,
) -> Result<Fingerprint> {
    if !peer_refs.branch_exists(branch) {
        return Err(RepoError::NoSuchRemoteBranch);
    }
    let remote_head = peer_refs.read_branch(branch)?;
    let ids = dag::frontier(peer_store, local_current_id, &remote_head)?;
    copy_objects(peer_store, local_store, ids)?;
    local_refs.write_branch(remote_tracking_name, &remote_head)?;
    Ok(remote_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Commit;
    use crate::commit::Tree;
    use crate::hash::Sha1Hasher;

    struct Repo {
        _dir: tempfile::TempDir,
        store: ObjectStore,
        refs: RefStore,
    }

    fn init_repo() -> Repo {
        let dir = tempfile::tempdir().unwrap();
        let gitlet = dir.path().join(".gitlet");
        let store = ObjectStore::new(&gitlet);
        let refs = RefStore::new(&gitlet);
        store.init().unwrap();
        refs.init().unwrap();
        let hasher = Sha1Hasher;
        let bootstrap = Commit::bootstrap(&hasher);
        store.put_commit(&bootstrap).unwrap();
        refs.write_branch("master", &bootstrap.id).unwrap();
        refs.write_head("master").unwrap();
        Repo {
            _dir: dir,
            store,
            refs,
        }
    }

    #[test]
    fn push_fast_forward_transfers_objects() {
        let local = init_repo();
        let peer = init_repo();
        let hasher = Sha1Hasher;
        let base_id = local.refs.read_branch("master").unwrap();
        let next = Commit::new(&hasher, "c1".into(), "t".into(), Some(base_id), None, Tree::new());
        local.store.put_commit(&next).unwrap();

        push(&local.store, &peer.store, &peer.refs, "master", &next.id).unwrap();

        assert_eq!(peer.refs.read_branch("master").unwrap(), next.id);
        assert!(peer.store.has_commit(&next.id));
    }

    #[test]
    fn push_rejected_when_peer_has_diverged() {
        let local = init_repo();
        let peer = init_repo();
        let hasher = Sha1Hasher;
        let peer_base = peer.refs.read_branch("master").unwrap();
        let peer_next = Commit::new(&hasher, "peer-only".into(), "t".into(), Some(peer_base), None, Tree::new());
        peer.store.put_commit(&peer_next).unwrap();
        peer.refs.write_branch("master", &peer_next.id).unwrap();

        let local_base = local.refs.read_branch("master").unwrap();
        let local_next = Commit::new(&hasher, "local-only".into(), "t".into(), Some(local_base), None, Tree::new());
        local.store.put_commit(&local_next).unwrap();

        let result = push(&local.store, &peer.store, &peer.refs, "master", &local_next.id);
        assert!(matches!(result, Err(RepoError::PushNotFastForward)));
        assert_eq!(peer.refs.read_branch("master").unwrap(), peer_next.id);
    }

    #[test]
    fn fetch_populates_remote_tracking_branch() {
        let local = init_repo();
        let peer = init_repo();
        let hasher = Sha1Hasher;
        let peer_base = peer.refs.read_branch("master").unwrap();
        let peer_next = Commit::new(&hasher, "on-peer".into(), "t".into(), Some(peer_base), None, Tree::new());
        peer.store.put_commit(&peer_next).unwrap();
        peer.refs.write_branch("master", &peer_next.id).unwrap();

        let local_head = local.refs.read_branch("master").unwrap();
        let fetched = fetch(
            &local.store,
            &local.refs,
            &peer.store,
            &peer.refs,
            "master",
            "origin/master",
            &local_head,
        )
        .unwrap();

        assert_eq!(fetched, peer_next.id);
        assert_eq!(local.refs.read_branch("origin/master").unwrap(), peer_next.id);
        assert!(local.store.has_commit(&peer_next.id));
    }

    #[test]
    fn fetch_missing_branch_errors() {
        let local = init_repo();
        let peer = init_repo();
        let local_head = local.refs.read_branch("master").unwrap();
        let result = fetch(
            &local.store,
            &local.refs,
            &peer.store,
            &peer.refs,
            "nonexistent",
            "origin/nonexistent",
            &local_head,
        );
        assert!(matches!(result, Err(RepoError::NoSuchRemoteBranch)));
    }
}
