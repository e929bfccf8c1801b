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

//! Component E: DAG algorithms over the commit graph. Traversal uses
//! explicit work lists with a visited set rather than recursion, so merge
//! DAGs with shared ancestors are handled without risk of revisiting a
//! commit or blowing the stack on a long history.

use std::collections::HashSet;
use std::collections::VecDeque;

use crate::error::Result;
use crate::object_id::Fingerprint;
use crate::store::ObjectStore;

fn parents(store: &ObjectStore, id: &Fingerprint) -> Result<Vec<Fingerprint>> {
    let commit = store.get_commit(id)?;
    let mut parents = Vec::new();
    if let Some(parent) = commit.parent {
        parents.push(parent);
    }
    if let Some(second) = commit.second_parent {
        parents.push(second);
    }
    Ok(parents)
}

/// The transitive closure of `c` and both parents of every merge commit
/// along the way, including `c` itself.
pub fn ancestors(store: &ObjectStore, c: &Fingerprint) -> Result<HashSet<Fingerprint>> {
    let mut visited = HashSet::new();
    let mut work = vec![c.clone()];
    while let Some(id) = work.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        work.extend(parents(store, &id)?);
    }
    Ok(visited)
}

/// True iff `a` is an ancestor of (or equal to) `b`.
pub fn is_ancestor(store: &ObjectStore, a: &Fingerprint, b: &Fingerprint) -> Result<bool> {
    Ok(ancestors(store, b)?.contains(a))
}

/// A split point of `a` and `b`: breadth-first from `b`, returning the first
/// id also found in `ancestors(a)`. When multiple lowest common ancestors
/// exist (criss-cross merges), this resolves the tie by BFS order from `b`,
/// the same convention as the source; no further disambiguation is
/// attempted.
pub fn lowest_common_ancestor(
    store: &ObjectStore,
    a: &Fingerprint,
    b: &Fingerprint,
) -> Result<Option<Fingerprint>> {
    let ancestors_of_a = ancestors(store, a)?;
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(b.clone());
    while let Some(id) = queue.pop_front() {
        if !visited.insert(id.clone()) {
            continue;
        }
        if ancestors_of_a.contains(&id) {
            return Ok(Some(id));
        }
        queue.extend(parents(store, &id)?);
    }
    Ok(None)
}

/// Ids reachable from `to` but not from `from` -- the set of objects that
/// must be copied when advancing a ref from `from` to `to`. Implemented as a
/// DFS from `to`, pruned at `from` and at previously visited ids.
pub fn frontier(
    store: &ObjectStore,
    from: &Fingerprint,
    to: &Fingerprint,
) -> Result<HashSet<Fingerprint>> {
    let mut frontier = HashSet::new();
    let mut visited = HashSet::new();
    let mut stack = vec![to.clone()];
    while let Some(id) = stack.pop() {
        if id == *from || !visited.insert(id.clone()) {
            continue;
        }
        frontier.insert(id.clone());
        stack.extend(parents(store, &id)?);
    }
    Ok(frontier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Commit;
    use crate::commit::Tree;
    use crate::hash::Sha1Hasher;

    fn chain(store: &ObjectStore, hasher: &Sha1Hasher, n: usize) -> Vec<Fingerprint> {
        let mut ids = Vec::new();
        let mut parent = None;
        for i in 0..n {
            let commit = Commit::new(
                hasher,
                format!("c{i}"),
                format!("t{i}"),
                parent.clone(),
                None,
                Tree::new(),
            );
            store.put_commit(&commit).unwrap();
            ids.push(commit.id.clone());
            parent = Some(commit.id);
        }
        ids
    }

    #[test]
    fn ancestors_of_self_is_reflexive() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.init().unwrap();
        let hasher = Sha1Hasher;
        let ids = chain(&store, &hasher, 3);
        assert!(ancestors(&store, &ids[2]).unwrap().contains(&ids[0]));
        assert_eq!(
            lowest_common_ancestor(&store, &ids[2], &ids[2]).unwrap(),
            Some(ids[2].clone())
        );
    }

    #[test]
    fn lca_on_linear_chain() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.init().unwrap();
        let hasher = Sha1Hasher;
        let ids = chain(&store, &hasher, 3);
        assert_eq!(
            lowest_common_ancestor(&store, &ids[0], &ids[2]).unwrap(),
            Some(ids[0].clone())
        );
        assert!(is_ancestor(&store, &ids[0], &ids[2]).unwrap());
        assert!(!is_ancestor(&store, &ids[2], &ids[0]).unwrap());
    }

    #[test]
    fn lca_of_divergent_branches() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.init().unwrap();
        let hasher = Sha1Hasher;
        let base = chain(&store, &hasher, 1);
        let left = Commit::new(&hasher, "left".into(), "t".into(), Some(base[0].clone()), None, Tree::new());
        let right = Commit::new(&hasher, "right".into(), "t".into(), Some(base[0].clone()), None, Tree::new());
        store.put_commit(&left).unwrap();
        store.put_commit(&right).unwrap();
        assert_eq!(
            lowest_common_ancestor(&store, &left.id, &right.id).unwrap(),
            Some(base[0].clone())
        );
    }

    #[test]
    fn frontier_empty_for_identical_refs() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.init().unwrap();
        let hasher = Sha1Hasher;
        let ids = chain(&store, &hasher, 2);
        assert!(frontier(&store, &ids[1], &ids[1]).unwrap().is_empty());
    }

    #[test]
    fn frontier_from_root_equals_ancestors_of_head() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.init().unwrap();
        let hasher = Sha1Hasher;
        let ids = chain(&store, &hasher, 3);
        let root = Fingerprint::from_hex("0".repeat(40));
        assert_eq!(
            frontier(&store, &root, &ids[2]).unwrap(),
            ancestors(&store, &ids[2]).unwrap()
        );
    }
}
