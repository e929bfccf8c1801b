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

//! Core library for a miniature, local-first, distributed version-control
//! system: a content-addressed object store, DAG algorithms over a commit
//! graph, a three-way merge resolver, working-tree reconciliation, and
//! filesystem-based remote sync. [`repo::Repository`] is the facade the CLI
//! shell is built against; everything else is reusable on its own.

pub mod clock;
pub mod commit;
pub mod dag;
pub mod error;
mod file_util;
mod hash;
mod hex_util;
pub mod log;
pub mod merge;
pub mod object_id;
pub mod ref_store;
pub mod remote;
pub mod repo;
pub mod snapshot;
pub mod staging;
pub mod status;
pub mod store;
pub mod working_tree;

pub use crate::clock::Clock;
pub use crate::commit::Commit;
pub use crate::commit::Tree;
pub use crate::error::RepoError;
pub use crate::error::Result;
pub use crate::object_id::Fingerprint;
pub use crate::repo::MergeOutcome;
pub use crate::repo::Repository;
