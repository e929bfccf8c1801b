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

//! Cross-component end-to-end scenarios, each in its own throwaway
//! repository.

use assert_matches::assert_matches;
use gitlet_lib::RepoError;
use gitlet_lib::Repository;

fn write(root: &std::path::Path, name: &str, content: &str) {
    std::fs::write(root.join(name), content).unwrap();
}

#[test]
fn push_fast_forward_is_rejected_after_peer_diverges() {
    let r1_dir = tempfile::tempdir().unwrap();
    let r2_dir = tempfile::tempdir().unwrap();
    let r1 = Repository::init(r1_dir.path()).unwrap();
    let r2 = Repository::init(r2_dir.path()).unwrap();

    // R2 advances by one commit, diverging from the shared initial commit.
    write(r2_dir.path(), "only-on-r2.txt", "x");
    r2.add("only-on-r2.txt").unwrap();
    r2.commit("advance r2".into()).unwrap();

    r1.add_remote("peer", &r2_dir.path().to_string_lossy()).unwrap();
    write(r1_dir.path(), "only-on-r1.txt", "y");
    r1.add("only-on-r1.txt").unwrap();
    r1.commit("advance r1".into()).unwrap();

    let result = r1.push("peer", "master");
    assert_matches!(result, Err(RepoError::PushNotFastForward));

    // R2 is left untouched.
    let r2_reopened = Repository::open(r2_dir.path()).unwrap();
    assert_eq!(r2_reopened.current_commit().unwrap().message, "advance r2");
}

#[test]
fn push_fetch_pull_round_trip_between_two_repositories() {
    let r1_dir = tempfile::tempdir().unwrap();
    let r2_dir = tempfile::tempdir().unwrap();
    let r1 = Repository::init(r1_dir.path()).unwrap();
    let r2 = Repository::init(r2_dir.path()).unwrap();

    write(r1_dir.path(), "shared.txt", "hello");
    r1.add("shared.txt").unwrap();
    let c1 = r1.commit("c1".into()).unwrap();

    r2.add_remote("origin", &r1_dir.path().to_string_lossy()).unwrap();
    r2.pull("origin", "master").unwrap();

    assert_eq!(r2.current_commit().unwrap().id, c1.id);
    assert_eq!(
        std::fs::read_to_string(r2_dir.path().join("shared.txt")).unwrap(),
        "hello"
    );
}

#[test]
fn repository_discover_fails_outside_any_repository() {
    let dir = tempfile::tempdir().unwrap();
    let result = Repository::discover(dir.path());
    assert_matches!(result, Err(RepoError::NotInitialized));
}

#[test]
fn init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    Repository::init(dir.path()).unwrap();
    let result = Repository::init(dir.path());
    assert_matches!(result, Err(RepoError::AlreadyInitialized));
}

#[test]
fn checkout_unknown_branch_fails() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    assert_matches!(repo.checkout_branch("ghost"), Err(RepoError::NoSuchBranch));
}

#[test]
fn status_reflects_staged_and_untracked_files_together() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "staged.txt", "s");
    write(dir.path(), "loose.txt", "u");
    repo.add("staged.txt").unwrap();

    let status = repo.status().unwrap();
    assert_eq!(status.staged, vec!["staged.txt".to_string()]);
    assert_eq!(status.untracked, vec!["loose.txt".to_string()]);
}
