// Remote branch listing: fetch --prune, then for-each-ref under origin.
// ref: git-for-each-ref(1), https://git-scm.com/docs/git-for-each-ref

use super::git;
use crate::model::repo::Listing;
use crate::runner::CommandRunner;
use std::path::Path;

const REMOTE_PREFIX: &str = "origin/";

/// Fetch with pruning, then list origin's branches. Either step failing
/// yields an empty listing carrying the diagnostic.
pub fn refresh_branches(runner: &dyn CommandRunner, path: &Path) -> Listing {
    let fetch = git(runner, path, &["fetch", "--prune"]);
    if !fetch.success {
        log::warn!("fetch in {} failed: {}", path.display(), fetch.output);
        return Listing::failed(format!("Fetch failed: {}", fetch.output));
    }
    let out = git(
        runner,
        path,
        &["for-each-ref", "--format=%(refname:short)", "refs/remotes/origin/"],
    );
    if !out.success {
        log::warn!("listing branches in {} failed: {}", path.display(), out.output);
        return Listing::failed(format!("Branch listing failed: {}", out.output));
    }
    Listing::complete(parse_remote_branches(&out.output))
}

/// `origin/main\norigin/HEAD\n` -> `["main"]`, keeping listing order.
pub fn parse_remote_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        // `refs/remotes/origin/HEAD` abbreviates to `origin/HEAD` or bare `origin`
        .filter(|l| !l.is_empty() && *l != "origin" && *l != "origin/HEAD")
        .map(|l| l.strip_prefix(REMOTE_PREFIX).unwrap_or(l).to_string())
        .collect()
}
