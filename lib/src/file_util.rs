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

//! Filesystem helpers giving every write under `.gitlet/` the
//! write-then-rename atomicity called for in the resource model (so a crash
//! mid-write never leaves a half-written object or ref behind).

use std::fs;
use std::path::Path;

use crate::error::IoResultExt as _;
use crate::error::Result;

/// Creates `dir` (and its parents) or does nothing if it already exists.
pub fn create_dir_all(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_path(dir)
}

/// Writes `contents` to `path` atomically: the bytes land in a sibling temp
/// file first, which is then renamed over `path`. A reader of `path` never
/// observes a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path.parent().expect("path must have a parent directory");
    create_dir_all(dir)?;
    let mut temp = tempfile::NamedTempFile::new_in(dir).with_path(dir)?;
    std::io::Write::write_all(&mut temp, contents).with_path(path)?;
    temp.persist(path)
        .map_err(|err| err.error)
        .with_path(path)?;
    Ok(())
}

/// Like [`write_atomic`], but treats an existing file at `path` as already
/// correct and leaves it untouched -- used for content-addressed objects,
/// where two writers racing to create the same fingerprint would otherwise
/// both succeed at writing byte-identical content anyway, but we avoid the
/// redundant I/O and any partial-write window on the common "already
/// present" path.
pub fn write_atomic_if_absent(path: &Path, contents: &[u8]) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    write_atomic(path, contents)
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_path(path)
}

pub fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_path(path)
}
