// Branch workflows against a working copy: delete the remote branch, or
// create PR -> merge -> delete local branch. Stops at the first failed step;
// earlier steps are not rolled back.

use std::path::Path;

use thiserror::Error;

use crate::{
    gh::pr,
    git::ops as git_ops,
    runner::CommandRunner,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAction {
    DeleteBranch,
    PrMergeDelete,
}

impl BranchAction {
    pub fn title(&self) -> &'static str {
        match self {
            BranchAction::DeleteBranch => "Delete branch",
            BranchAction::PrMergeDelete => "PR / merge / delete",
        }
    }

    pub fn confirm_message(&self, branch: &str) -> String {
        match self {
            BranchAction::DeleteBranch => format!("Delete '{}' from origin?", branch),
            BranchAction::PrMergeDelete => format!(
                "Open a PR for '{}', merge it into the default branch and delete it?",
                branch
            ),
        }
    }
}

/// Display text is the status line shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("No branch selected.")]
    NoBranchSelected,
    #[error("Select exactly one branch.")]
    MultipleSelected,
    #[error("Delete failed: {0}")]
    Delete(String),
    #[error("Create failed: {0}")]
    Create(String),
    #[error("Merge failed: {0}")]
    Merge(String),
    #[error("Cleanup failed: {0}")]
    Cleanup(String),
}

/// Workflows act on exactly one branch.
pub fn single_branch(selected: &[String]) -> Result<&str, ActionError> {
    match selected {
        [] => Err(ActionError::NoBranchSelected),
        [branch] => Ok(branch.as_str()),
        _ => Err(ActionError::MultipleSelected),
    }
}

/// Run `action` for the selected branch; `Ok` carries the success message.
pub fn run_action(
    runner: &dyn CommandRunner,
    path: &Path,
    selected: &[String],
    action: BranchAction,
) -> Result<String, ActionError> {
    let branch = single_branch(selected)?;
    log::info!("{} on {} in {}", action.title(), branch, path.display());
    match action {
        BranchAction::DeleteBranch => delete_branch(runner, path, branch),
        BranchAction::PrMergeDelete => pr_merge_delete(runner, path, branch),
    }
}

fn delete_branch(runner: &dyn CommandRunner, path: &Path, branch: &str) -> Result<String, ActionError> {
    let out = git_ops::delete_remote_branch(runner, path, branch);
    if !out.success {
        return Err(ActionError::Delete(out.output));
    }
    Ok(format!("Deleted {}", branch))
}

fn pr_merge_delete(runner: &dyn CommandRunner, path: &Path, branch: &str) -> Result<String, ActionError> {
    let out = pr::create(runner, path, branch);
    if !out.success {
        return Err(ActionError::Create(out.output));
    }
    let out = pr::merge(runner, path, branch);
    if !out.success {
        return Err(ActionError::Merge(out.output));
    }
    // origin side is already gone via --delete-branch; this cleans the clone
    let out = git_ops::delete_local_branch(runner, path, branch);
    if !out.success {
        return Err(ActionError::Cleanup(out.output));
    }
    Ok(format!("PR merged and {} deleted", branch))
}
