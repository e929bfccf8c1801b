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

//! Command surface (§6), kept as one flat enum rather than per-command
//! modules given how few verbs this shell has.

use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Parser)]
#[command(name = "gitlet", about = "A miniature, local-first version-control system")]
pub struct Cli {
    /// Increase log verbosity (stacks: -v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new repository in the current directory.
    Init,
    /// Stage a file for the next commit.
    Add { file: String },
    /// Record a new commit from the current staging area.
    Commit { message: String },
    /// Unstage a file, or stage it for removal if tracked.
    Rm { file: String },
    /// Show commit history from the current head, following first parents.
    Log,
    /// Show every commit ever made, in no particular order.
    #[command(name = "global-log")]
    GlobalLog,
    /// Print the ids of all commits with the given message.
    Find { message: String },
    /// Show staged, removed, modified, and untracked files.
    Status,
    /// `checkout -- <file>` restores from head; `checkout <commit> -- <file>`
    /// restores from a specific commit; `checkout <branch>` switches
    /// branches.
    Checkout {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Create a new branch pointing at the current commit.
    Branch { name: String },
    /// Delete a branch (not the current one).
    #[command(name = "rm-branch")]
    RmBranch { name: String },
    /// Move the current branch to a commit and overwrite the working tree.
    Reset { commit: String },
    /// Merge a branch into the current one.
    Merge { branch: String },
    /// Show a two-column, branch-aware ASCII history graph.
    #[command(name = "graph-log")]
    GraphLog,
    /// Record a filesystem path to another repository.
    #[command(name = "add-remote")]
    AddRemote { name: String, path: String },
    /// Forget a recorded remote.
    #[command(name = "rm-remote")]
    RmRemote { name: String },
    /// Push the current commit to a branch on a remote.
    Push { remote: String, branch: String },
    /// Fetch a branch from a remote into a remote-tracking branch.
    Fetch { remote: String, branch: String },
    /// Fetch then merge a branch from a remote.
    Pull { remote: String, branch: String },
}
