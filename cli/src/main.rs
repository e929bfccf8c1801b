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

//! Thin CLI shell: parses args, resolves the repository, dispatches to the
//! one matching [`gitlet_lib::Repository`] method, and renders the result.
//! Business logic lives entirely in the library; this binary only formats.

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use gitlet_lib::MergeOutcome;
use gitlet_lib::RepoError;
use gitlet_lib::Repository;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::cli::Command;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli.command) {
        Ok(Some(output)) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) if is_internal(&err) => {
            eprintln!("internal error: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            println!("{err}");
            ExitCode::SUCCESS
        }
    }
}

fn is_internal(err: &RepoError) -> bool {
    matches!(
        err,
        RepoError::MissingObject { .. } | RepoError::Io { .. } | RepoError::Serialization(_)
    )
}

fn dispatch(command: Command) -> Result<Option<String>, RepoError> {
    let cwd = std::env::current_dir().map_err(|source| RepoError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    if let Command::Init = command {
        Repository::init(&cwd)?;
        return Ok(None);
    }

    let repo = Repository::discover(&cwd)?;

    match command {
        Command::Init => unreachable!("handled above"),
        Command::Add { file } => {
            repo.add(&file)?;
            Ok(None)
        }
        Command::Commit { message } => {
            repo.commit(message)?;
            Ok(None)
        }
        Command::Rm { file } => {
            repo.rm(&file)?;
            Ok(None)
        }
        Command::Log => Ok(Some(render_log(&repo.log()?))),
        Command::GlobalLog => Ok(Some(render_log(&repo.global_log()?))),
        Command::Find { message } => {
            let mut ids: Vec<String> = repo.find(&message)?.into_iter().map(|id| id.to_string()).collect();
            ids.sort();
            Ok(Some(ids.into_iter().map(|id| format!("{id}\n")).collect()))
        }
        Command::Status => Ok(Some(render_status(&repo.status()?))),
        Command::Checkout { args } => {
            match args.as_slice() {
                [sep, file] if sep == "--" => {
                    repo.checkout_file(file)?;
                }
                [commit, sep, file] if sep == "--" => {
                    repo.checkout_commit_file(commit, file)?;
                }
                [branch] => {
                    repo.checkout_branch(branch)?;
                }
                _ => return Ok(Some("Incorrect operands.\n".to_string())),
            }
            Ok(None)
        }
        Command::Branch { name } => {
            repo.branch(&name)?;
            Ok(None)
        }
        Command::RmBranch { name } => {
            repo.rm_branch(&name)?;
            Ok(None)
        }
        Command::Reset { commit } => {
            repo.reset(&commit)?;
            Ok(None)
        }
        Command::Merge { branch } => Ok(Some(render_merge_outcome(repo.merge(&branch)?))),
        Command::GraphLog => Ok(Some(render_graph_log(&repo.graph_log()?))),
        Command::AddRemote { name, path } => {
            repo.add_remote(&name, &path)?;
            Ok(None)
        }
        Command::RmRemote { name } => {
            repo.rm_remote(&name)?;
            Ok(None)
        }
        Command::Push { remote, branch } => {
            repo.push(&remote, &branch)?;
            Ok(None)
        }
        Command::Fetch { remote, branch } => {
            repo.fetch(&remote, &branch)?;
            Ok(None)
        }
        Command::Pull { remote, branch } => Ok(Some(render_merge_outcome(repo.pull(&remote, &branch)?))),
    }
}

fn render_log(entries: &[gitlet_lib::log::LogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str("===\n");
        out.push_str(&format!("commit {}\n", entry.id));
        if let Some((p1, p2)) = &entry.merge_parents {
            out.push_str(&format!("Merge: {p1} {p2}\n"));
        }
        out.push_str(&format!("Date: {}\n", entry.timestamp));
        out.push_str(&entry.message);
        out.push_str("\n\n");
    }
    out
}

fn render_status(status: &gitlet_lib::status::Status) -> String {
    let mut out = String::new();
    out.push_str("=== Branches ===\n");
    for branch in &status.branches {
        if branch.is_current {
            out.push('*');
        }
        out.push_str(&branch.name);
        out.push('\n');
    }
    out.push_str("\n=== Staged Files ===\n");
    for path in &status.staged {
        out.push_str(path);
        out.push('\n');
    }
    out.push_str("\n=== Removed Files ===\n");
    for path in &status.removed {
        out.push_str(path);
        out.push('\n');
    }
    out.push_str("\n=== Modifications Not Staged For Commit ===\n");
    for entry in &status.modified_not_staged {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out.push_str("\n=== Untracked Files ===\n");
    for path in &status.untracked {
        out.push_str(path);
        out.push('\n');
    }
    out
}

fn render_graph_log(rows: &[gitlet_lib::log::GraphRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let prefix = if row.column == 0 { "* " } else { "| * " };
        out.push_str(prefix);
        out.push_str(row.id.short(gitlet_lib::log::ABBREV_LEN));
        out.push(' ');
        out.push_str(&row.message);
        out.push('\n');
        if row.closes_branch {
            out.push_str("|/\n");
        }
    }
    out
}

fn render_merge_outcome(outcome: MergeOutcome) -> String {
    match outcome {
        MergeOutcome::GivenIsAncestor => "Given branch is an ancestor of the current branch.\n".to_string(),
        MergeOutcome::FastForwarded => "Current branch fast-forwarded.\n".to_string(),
        MergeOutcome::Merged { had_conflict, .. } => {
            if had_conflict {
                "Encountered a merge conflict.\n".to_string()
            } else {
                String::new()
            }
        }
    }
}
