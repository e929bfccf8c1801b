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

//! Component N: the repository facade. The only type the CLI shell talks
//! to; owns the concrete object store, ref store, and staging area and
//! exposes one method per CLI verb.

use std::path::Path;
use std::path::PathBuf;

use tracing::info;
use tracing::instrument;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::commit::BOOTSTRAP_MESSAGE;
use crate::commit::Commit;
use crate::dag;
use crate::error::RepoError;
use crate::error::Result;
use crate::hash::ContentHasher;
use crate::hash::Sha1Hasher;
use crate::log;
use crate::log::GraphRow;
use crate::log::LogEntry;
use crate::merge;
use crate::object_id::Fingerprint;
use crate::ref_store::RefStore;
use crate::remote;
use crate::snapshot;
use crate::staging::StagingArea;
use crate::status;
use crate::status::Status;
use crate::store::ObjectStore;
use crate::working_tree;
use crate::working_tree::GITLET_DIR_NAME;

/// The outcome of a [`Repository::merge`] call.
#[derive(Debug)]
pub enum MergeOutcome {
    /// The given branch was already an ancestor of the current branch.
    GivenIsAncestor,
    /// The current branch was advanced to the given branch without a merge
    /// commit.
    FastForwarded,
    /// A merge commit was created; `had_conflict` is set if any path needed
    /// conflict markers.
    Merged {
        commit: Commit,
        had_conflict: bool,
    },
}

pub struct Repository {
    root: PathBuf,
    gitlet_dir: PathBuf,
    store: ObjectStore,
    refs: RefStore,
    staging: StagingArea,
    hasher: Box<dyn ContentHasher>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .field("gitlet_dir", &self.gitlet_dir)
            .field("store", &self.store)
            .field("refs", &self.refs)
            .field("staging", &self.staging)
            .finish_non_exhaustive()
    }
}

impl Repository {
    fn gitlet_dir_for(root: &Path) -> PathBuf {
        root.join(GITLET_DIR_NAME)
    }

    /// Creates a new repository at `root`. Fails [`RepoError::AlreadyInitialized`]
    /// if `root/.gitlet` already exists.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn init(root: &Path) -> Result<Self> {
        let gitlet_dir = Self::gitlet_dir_for(root);
        if gitlet_dir.is_dir() {
            return Err(RepoError::AlreadyInitialized);
        }
        let store = ObjectStore::new(&gitlet_dir);
        let refs = RefStore::new(&gitlet_dir);
        let staging = StagingArea::new(&gitlet_dir);
        store.init()?;
        refs.init()?;
        staging.init()?;

        let hasher = Sha1Hasher;
        let bootstrap = Commit::bootstrap(&hasher);
        debug_assert_eq!(bootstrap.message, BOOTSTRAP_MESSAGE);
        store.put_commit(&bootstrap)?;
        refs.write_branch("master", &bootstrap.id)?;
        refs.write_head("master")?;
        info!(id = %bootstrap.id, "initialized repository");

        Ok(Self {
            root: root.to_path_buf(),
            gitlet_dir,
            store,
            refs,
            staging,
            hasher: Box::new(Sha1Hasher),
            clock: Box::new(SystemClock),
        })
    }

    /// Opens an existing repository rooted exactly at `root`. Fails
    /// [`RepoError::NotInitialized`] if `root/.gitlet` is absent.
    pub fn open(root: &Path) -> Result<Self> {
        let gitlet_dir = Self::gitlet_dir_for(root);
        if !gitlet_dir.is_dir() {
            return Err(RepoError::NotInitialized);
        }
        Ok(Self {
            store: ObjectStore::new(&gitlet_dir),
            refs: RefStore::new(&gitlet_dir),
            staging: StagingArea::new(&gitlet_dir),
            gitlet_dir,
            root: root.to_path_buf(),
            hasher: Box::new(Sha1Hasher),
            clock: Box::new(SystemClock),
        })
    }

    /// Looks for `.gitlet` at `start_dir`, then at its parent exactly one
    /// level up. Repositories in this spec are never nested, so no further
    /// ancestor walk is attempted.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        if Self::gitlet_dir_for(start_dir).is_dir() {
            return Self::open(start_dir);
        }
        if let Some(parent) = start_dir.parent() {
            if Self::gitlet_dir_for(parent).is_dir() {
                return Self::open(parent);
            }
        }
        Err(RepoError::NotInitialized)
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> Result<String> {
        self.refs.read_head()
    }

    pub fn current_commit_id(&self) -> Result<Fingerprint> {
        let head = self.current_branch()?;
        self.refs.read_branch(&head)
    }

    pub fn current_commit(&self) -> Result<Commit> {
        let id = self.current_commit_id()?;
        self.store.get_commit(&id)
    }

    // -- staging -----------------------------------------------------

    #[instrument(skip(self), fields(path))]
    pub fn add(&self, path: &str) -> Result<()> {
        let Some(content) = working_tree::read_working_file(&self.root, path)? else {
            return Err(RepoError::FileAbsent);
        };
        let new_id = self.store.put_blob(self.hasher.as_ref(), &content)?;
        let current = self.current_commit()?;
        let tracked = current.tree.get(path);
        if tracked == Some(&new_id) {
            self.staging.unstage_add_entry(&path.to_string())?;
        } else {
            self.staging.stage_add_entry(&path.to_string(), &new_id)?;
        }
        self.staging.unstage_remove_entry(&path.to_string())
    }

    #[instrument(skip(self), fields(path))]
    pub fn rm(&self, path: &str) -> Result<()> {
        let path_key = path.to_string();
        let mut did_something = false;
        if self.staging.is_added(&path_key) {
            self.staging.unstage_add_entry(&path_key)?;
            did_something = true;
        }
        let current = self.current_commit()?;
        if let Some(tracked_id) = current.tree.get(path) {
            self.staging.stage_remove_entry(&path_key, tracked_id)?;
            working_tree::delete_working_file(&self.root, path)?;
            did_something = true;
        }
        if !did_something {
            return Err(RepoError::NothingToRemove);
        }
        Ok(())
    }

    // -- snapshots -----------------------------------------------------

    #[instrument(skip(self, message))]
    pub fn commit(&self, message: String) -> Result<Commit> {
        let branch = self.current_branch()?;
        let current = self.current_commit()?;
        snapshot::commit(
            &self.store,
            &self.refs,
            &self.staging,
            self.hasher.as_ref(),
            self.clock.as_ref(),
            &branch,
            &current.tree,
            &current.id,
            message,
            None,
        )
    }

    // -- history ---------------------------------------------------------

    pub fn log(&self) -> Result<Vec<LogEntry>> {
        log::log(&self.store, &self.current_commit_id()?)
    }

    pub fn global_log(&self) -> Result<Vec<LogEntry>> {
        log::global_log(&self.store)
    }

    pub fn find(&self, message: &str) -> Result<std::collections::HashSet<Fingerprint>> {
        log::find(&self.store, message)
    }

    pub fn graph_log(&self) -> Result<Vec<GraphRow>> {
        log::graph_log(&self.store, &self.current_commit_id()?)
    }

    pub fn status(&self) -> Result<Status> {
        let current = self.current_commit()?;
        status::status(&self.root, &self.refs, &self.staging, &self.store, &current.tree)
    }

    // -- working tree ------------------------------------------------

    pub fn checkout_file(&self, path: &str) -> Result<()> {
        let current = self.current_commit()?;
        self.checkout_file_from_tree(&current.tree, path)
    }

    pub fn checkout_commit_file(&self, commit_prefix: &str, path: &str) -> Result<()> {
        let id = self.store.resolve_prefix(commit_prefix)?;
        let commit = self.store.get_commit(&id)?;
        self.checkout_file_from_tree(&commit.tree, path)
    }

    fn checkout_file_from_tree(&self, tree: &crate::commit::Tree, path: &str) -> Result<()> {
        let Some(blob_id) = tree.get(path) else {
            return Err(RepoError::FileNotInCommit);
        };
        let content = self.store.get_blob(blob_id)?;
        working_tree::write_working_file(&self.root, path, &content)
    }

    #[instrument(skip(self), fields(branch = branch_name))]
    pub fn checkout_branch(&self, branch_name: &str) -> Result<()> {
        if !self.refs.branch_exists(branch_name) {
            return Err(RepoError::NoSuchBranch);
        }
        let head = self.current_branch()?;
        if branch_name == head {
            return Err(RepoError::AlreadyOnBranch);
        }
        let target_id = self.refs.read_branch(branch_name)?;
        let target = self.store.get_commit(&target_id)?;
        let current = self.current_commit()?;

        working_tree::check_untracked_safety(&self.root, &current.tree)?;
        working_tree::materialize(&self.root, &target.tree, &self.store)?;
        self.refs.write_head(branch_name)?;
        working_tree::prune(&self.root, &current.tree, &target.tree)?;
        self.staging.clear()
    }

    pub fn branch(&self, name: &str) -> Result<()> {
        if self.refs.branch_exists(name) {
            return Err(RepoError::BranchExists);
        }
        self.refs.write_branch(name, &self.current_commit_id()?)
    }

    pub fn rm_branch(&self, name: &str) -> Result<()> {
        self.refs.delete_branch(name)
    }

    #[instrument(skip(self), fields(commit = commit_prefix))]
    pub fn reset(&self, commit_prefix: &str) -> Result<()> {
        let target_id = self.store.resolve_prefix(commit_prefix)?;
        let target = self.store.get_commit(&target_id)?;
        let current = self.current_commit()?;

        working_tree::check_untracked_safety_for_reset(
            &self.root,
            &current.tree,
            &target.tree,
            &self.store,
        )?;
        working_tree::materialize(&self.root, &target.tree, &self.store)?;
        let branch = self.current_branch()?;
        self.refs.write_branch(&branch, &target_id)?;
        working_tree::prune(&self.root, &current.tree, &target.tree)?;
        self.staging.clear()
    }

    // -- merge -------------------------------------------------------

    #[instrument(skip(self), fields(given = given_branch))]
    pub fn merge(&self, given_branch: &str) -> Result<MergeOutcome> {
        if !self.staging.is_empty()? {
            return Err(RepoError::UncommittedChanges);
        }
        if !self.refs.branch_exists(given_branch) {
            return Err(RepoError::NoSuchBranch);
        }
        let head = self.current_branch()?;
        if given_branch == head {
            return Err(RepoError::SelfMerge);
        }

        let current = self.current_commit()?;
        let given_id = self.refs.read_branch(given_branch)?;
        let given = self.store.get_commit(&given_id)?;

        working_tree::check_untracked_safety(&self.root, &current.tree)?;

        let lca = dag::lowest_common_ancestor(&self.store, &current.id, &given_id)?
            .ok_or(RepoError::NoSuchCommit)?;

        if lca == given_id {
            return Ok(MergeOutcome::GivenIsAncestor);
        }
        if lca == current.id {
            self.checkout_branch(given_branch)?;
            return Ok(MergeOutcome::FastForwarded);
        }

        let split = self.store.get_commit(&lca)?;
        let (_result_tree, had_conflict) = merge::apply(
            &self.root,
            &self.store,
            &self.staging,
            self.hasher.as_ref(),
            &split.tree,
            &current.tree,
            &given.tree,
        )?;

        let message = format!("Merged {given_branch} into {head}.");
        let commit = snapshot::commit_merge(
            &self.store,
            &self.refs,
            &self.staging,
            self.hasher.as_ref(),
            self.clock.as_ref(),
            &head,
            &current.tree,
            &current.id,
            message,
            Some(given_id),
        )?;

        Ok(MergeOutcome::Merged { commit, had_conflict })
    }

    // -- remotes -------------------------------------------------------

    pub fn add_remote(&self, name: &str, path: &str) -> Result<()> {
        self.refs.add_remote(name, path)
    }

    pub fn rm_remote(&self, name: &str) -> Result<()> {
        self.refs.remove_remote(name)
    }

    fn open_peer(&self, remote_name: &str) -> Result<(ObjectStore, RefStore)> {
        let peer_root = PathBuf::from(self.refs.resolve_remote(remote_name)?);
        let peer_gitlet = Self::gitlet_dir_for(&peer_root);
        if !peer_gitlet.is_dir() {
            return Err(RepoError::RemoteMissing);
        }
        Ok((ObjectStore::new(&peer_gitlet), RefStore::new(&peer_gitlet)))
    }

    #[instrument(skip(self), fields(remote = remote_name, branch))]
    pub fn push(&self, remote_name: &str, branch: &str) -> Result<()> {
        let (peer_store, peer_refs) = self.open_peer(remote_name)?;
        let local_current = self.current_commit_id()?;
        remote::push(&self.store, &peer_store, &peer_refs, branch, &local_current)
    }

    #[instrument(skip(self), fields(remote = remote_name, branch))]
    pub fn fetch(&self, remote_name: &str, branch: &str) -> Result<Fingerprint> {
        let (peer_store, peer_refs) = self.open_peer(remote_name)?;
        let local_current = self.current_commit_id()?;
        let remote_tracking_name = format!("{remote_name}/{branch}");
        remote::fetch(
            &self.store,
            &self.refs,
            &peer_store,
            &peer_refs,
            branch,
            &remote_tracking_name,
            &local_current,
        )
    }

    #[instrument(skip(self), fields(remote = remote_name, branch))]
    pub fn pull(&self, remote_name: &str, branch: &str) -> Result<MergeOutcome> {
        let current = self.current_commit()?;
        working_tree::check_untracked_safety(&self.root, &current.tree)?;
        self.fetch(remote_name, branch)?;
        let remote_tracking_name = format!("{remote_name}/{branch}");
        self.merge(&remote_tracking_name)
    }

    pub(crate) fn gitlet_dir(&self) -> &Path {
        &self.gitlet_dir
    }
}
