// Git operations on a cached working copy: pull, branch deletion.

use super::git;
use crate::runner::{CmdOutput, CommandRunner};
use std::path::Path;

pub fn pull(runner: &dyn CommandRunner, path: &Path) -> CmdOutput {
    git(runner, path, &["pull"])
}

/// Delete `branch` on origin via a delete refspec push.
pub fn delete_remote_branch(runner: &dyn CommandRunner, path: &Path, branch: &str) -> CmdOutput {
    git(runner, path, &["push", "origin", "--delete", branch])
}

/// Force-delete the local branch (merged or not).
pub fn delete_local_branch(runner: &dyn CommandRunner, path: &Path, branch: &str) -> CmdOutput {
    git(runner, path, &["branch", "-D", branch])
}
