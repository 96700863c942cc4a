pub mod branches;
pub mod ops;

use crate::runner::{CmdOutput, CommandRunner};
use std::path::Path;

/// `git -C <repo> <args>`
pub fn git(runner: &dyn CommandRunner, repo: &Path, args: &[&str]) -> CmdOutput {
    let repo = repo.to_string_lossy();
    let mut argv = Vec::with_capacity(args.len() + 3);
    argv.extend_from_slice(&["git", "-C", &*repo]);
    argv.extend_from_slice(args);
    runner.run(&argv, None)
}
