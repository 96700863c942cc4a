// Local working copies under the cache root: clone or pull, then list
// origin's branches. Free functions with explicit arguments, no App state.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    gh,
    git::{branches, ops as git_ops},
    model::repo::{Listing, RepoId},
    runner::CommandRunner,
};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Could not create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Clone failed: {0}")]
    Clone(String),
}

#[derive(Debug, Clone)]
pub struct Workspace {
    pub path: PathBuf,
    pub branches: Listing,
    /// Set when an existing copy could not be pulled; listing still proceeds.
    pub pull_warning: Option<String>,
}

/// Default root for cached clones, e.g. `~/.cache/ghpm`.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ghpm")
}

/// `<root>/<owner>/<name>`
pub fn workspace_path(cache_root: &Path, repo: &RepoId) -> PathBuf {
    cache_root.join(&repo.owner).join(&repo.name)
}

/// Clone `repo` if it has no working copy yet, pull it otherwise, then
/// fetch and list remote branches. Only a failed clone is fatal.
pub fn ensure_workspace(
    runner: &dyn CommandRunner,
    cache_root: &Path,
    repo: &RepoId,
) -> Result<Workspace, WorkspaceError> {
    let path = workspace_path(cache_root, repo);
    let mut pull_warning = None;

    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| WorkspaceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        log::info!("cloning {} into {}", repo, path.display());
        let out = gh::clone_repo(runner, &repo.to_string(), &path);
        if !out.success {
            return Err(WorkspaceError::Clone(out.output));
        }
    } else {
        let out = git_ops::pull(runner, &path);
        if !out.success {
            log::warn!("pull of {} failed, listing stale copy: {}", repo, out.output);
            pull_warning = Some(format!("Pull failed: {}", out.output));
        }
    }

    let branches = branches::refresh_branches(runner, &path);
    Ok(Workspace { path, branches, pull_warning })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{testing::ScriptedRunner, CmdOutput};

    fn repo() -> RepoId {
        "org/repo1".parse().unwrap()
    }

    fn is_clone(argv: &[String]) -> bool {
        argv.starts_with(&["gh".to_string(), "repo".to_string(), "clone".to_string()])
    }

    fn is_pull(argv: &[String]) -> bool {
        argv.last().map(String::as_str) == Some("pull")
    }

    #[test]
    fn path_nests_owner_then_name() {
        assert_eq!(
            workspace_path(Path::new("/cache"), &repo()),
            PathBuf::from("/cache/org/repo1")
        );
    }

    #[test]
    fn missing_copy_is_cloned_not_pulled() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("org").join("repo1");
        let dest_str = dest.to_string_lossy().to_string();
        let runner = ScriptedRunner::new();

        let ws = ensure_workspace(&runner, root.path(), &repo()).unwrap();

        assert_eq!(ws.path, dest);
        assert!(root.path().join("org").is_dir());
        assert!(runner.called_with(&["gh", "repo", "clone", "org/repo1", &dest_str]));
        assert_eq!(runner.count_matching(is_pull), 0);
    }

    #[test]
    fn existing_copy_is_pulled_not_cloned() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("org").join("repo1");
        std::fs::create_dir_all(&dest).unwrap();
        let dest_str = dest.to_string_lossy().to_string();
        let runner = ScriptedRunner::new();

        ensure_workspace(&runner, root.path(), &repo()).unwrap();

        assert!(runner.called_with(&["git", "-C", &dest_str, "pull"]));
        assert_eq!(runner.count_matching(is_clone), 0);
    }

    #[test]
    fn failed_clone_stops_before_listing() {
        let root = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new()
            .on(&["gh", "repo", "clone"], CmdOutput::failed("repository not found"));

        let err = ensure_workspace(&runner, root.path(), &repo()).unwrap_err();

        assert_eq!(err.to_string(), "Clone failed: repository not found");
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn failed_pull_still_lists_branches() {
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("org").join("repo1");
        std::fs::create_dir_all(&dest).unwrap();
        let dest_str = dest.to_string_lossy().to_string();
        let runner = ScriptedRunner::new()
            .on(&["git", "-C", &dest_str, "pull"], CmdOutput::failed("divergent branches"))
            .on(
                &["git", "-C", &dest_str, "for-each-ref"],
                CmdOutput::ok("origin/main\norigin/feature\norigin/HEAD\n"),
            );

        let ws = ensure_workspace(&runner, root.path(), &repo()).unwrap();

        assert_eq!(ws.pull_warning.as_deref(), Some("Pull failed: divergent branches"));
        assert_eq!(ws.branches.items, vec!["main", "feature"]);
        assert!(ws.branches.is_complete());
    }
}
