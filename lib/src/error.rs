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

//! Typed error taxonomy for the core.
//!
//! Every fallible operation returns [`RepoError`]. The facade is the only
//! layer that downgrades a variant into the exact one-line message from the
//! external interface contract; everything below it matches on variants.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("File does not exist.")]
    FileAbsent,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("Prefix not unique.")]
    AmbiguousPrefix,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("Cannot remove the current branch.")]
    DeletingCurrent,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedOverwrite { path: String },
    #[error("You have uncommited changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("Given branch is an ancestor of the current branch.")]
    AncestorMerge,
    #[error("Current branch fast-forwarded.")]
    FastForwardMerge,

    #[error("A remote with that name already exists.")]
    RemoteExists,
    #[error("A remote with that name does not exist.")]
    NoSuchRemote,
    #[error("Remote directory not found.")]
    RemoteMissing,
    #[error("That remote does not have that branch.")]
    NoSuchRemoteBranch,
    #[error("Please pull down remote changes before pushing.")]
    PushNotFastForward,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("object {fingerprint} is missing from the store")]
    MissingObject { fingerprint: String },

    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to (de)serialize object")]
    Serialization(#[from] serde_json::Error),
}

/// Extension trait attaching a path to an [`std::io::Error`], mirroring the
/// `IoResultExt`/`PathError` pattern used throughout this lineage of code.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| RepoError::Io {
            path: path.into(),
            source,
        })
    }
}
