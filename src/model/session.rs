use std::path::PathBuf;

use super::repo::RepoId;

/// Navigation data for one run of the app. Screens are rebuilt from this,
/// never the other way round.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Authenticated login, once known.
    pub viewer_login: Option<String>,
    /// Owner picker entries as loaded at startup.
    pub owners: Vec<String>,
    pub selected_owner: Option<String>,
    /// Last listing for `selected_owner`; reused when navigating back.
    pub owner_repositories: Vec<String>,
    pub selected_repository: Option<RepoId>,
    pub workspace_path: Option<PathBuf>,
    pub current_branches: Vec<String>,
    /// Zero or one entry: the highlighted branch.
    pub selected_branches: Vec<String>,
}

impl Session {
    pub fn select_owner(&mut self, owner: &str, repositories: Vec<String>) {
        self.selected_owner = Some(owner.to_string());
        self.owner_repositories = repositories;
        self.clear_repository();
    }

    pub fn select_repository(&mut self, repo: RepoId, path: PathBuf, branches: Vec<String>) {
        self.selected_repository = Some(repo);
        self.workspace_path = Some(path);
        self.current_branches = branches;
        self.selected_branches.clear();
    }

    pub fn clear_repository(&mut self) {
        self.selected_repository = None;
        self.workspace_path = None;
        self.current_branches.clear();
        self.selected_branches.clear();
    }

    pub fn highlight_branch(&mut self, branch: Option<&str>) {
        self.selected_branches = branch.map(|b| vec![b.to_string()]).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choosing_owner_discards_repository_state() {
        let mut s = Session::default();
        s.select_repository("a/b".parse().unwrap(), PathBuf::from("/ws/a/b"), vec!["main".into()]);
        s.highlight_branch(Some("main"));

        s.select_owner("c", vec!["c/d".into()]);

        assert_eq!(s.selected_owner.as_deref(), Some("c"));
        assert_eq!(s.owner_repositories, vec!["c/d"]);
        assert!(s.selected_repository.is_none());
        assert!(s.current_branches.is_empty());
        assert!(s.selected_branches.is_empty());
    }

    #[test]
    fn highlight_tracks_single_branch() {
        let mut s = Session::default();
        s.highlight_branch(Some("feature"));
        assert_eq!(s.selected_branches, vec!["feature"]);
        s.highlight_branch(None);
        assert!(s.selected_branches.is_empty());
    }
}
