// Pull request create + merge, run inside the working copy so gh resolves
// the repository from its origin remote.

use std::path::Path;

use super::gh;
use crate::runner::{CmdOutput, CommandRunner};

/// `gh pr create --fill --head <branch>`; base is the repository default branch.
pub fn create(runner: &dyn CommandRunner, repo: &Path, branch: &str) -> CmdOutput {
    gh(runner, Some(repo), &["pr", "create", "--fill", "--head", branch])
}

/// Merge commit, delete the head branch. Flags given up front keep gh from prompting.
pub fn merge(runner: &dyn CommandRunner, repo: &Path, branch: &str) -> CmdOutput {
    gh(runner, Some(repo), &["pr", "merge", branch, "--merge", "--delete-branch"])
}
