pub mod client;
pub mod pr;

use crate::runner::{CmdOutput, CommandRunner};
use std::path::Path;

/// `gh <args>`, optionally run inside a working copy.
pub fn gh(runner: &dyn CommandRunner, cwd: Option<&Path>, args: &[&str]) -> CmdOutput {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push("gh");
    argv.extend_from_slice(args);
    runner.run(&argv, cwd)
}

/// `gh repo clone owner/name <dest>`
pub fn clone_repo(runner: &dyn CommandRunner, full_name: &str, dest: &Path) -> CmdOutput {
    let dest = dest.to_string_lossy();
    gh(runner, None, &["repo", "clone", full_name, &*dest])
}

/// Non-blank, trimmed lines of a CLI listing.
pub fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
