// GitHub queries via the gh CLI: auth, login, orgs, repositories.
// ref: https://cli.github.com/manual/gh_api

use std::cell::OnceCell;

use super::{gh, lines};
use crate::model::repo::Listing;
use crate::runner::CommandRunner;

pub const PAGE_SIZE: usize = 100;

pub struct HostClient<'a> {
    runner: &'a dyn CommandRunner,
    login: OnceCell<String>,
}

impl<'a> HostClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner, login: OnceCell::new() }
    }

    /// Seed the login cache from an earlier lookup.
    pub fn with_login(self, login: Option<String>) -> Self {
        if let Some(login) = login {
            let _ = self.login.set(login);
        }
        self
    }

    pub fn is_authenticated(&self) -> bool {
        gh(self.runner, None, &["auth", "status"]).success
    }

    /// Login of the authenticated user. Only successful lookups are cached.
    pub fn current_user_login(&self) -> Option<String> {
        if let Some(login) = self.login.get() {
            return Some(login.clone());
        }
        let out = gh(self.runner, None, &["api", "user", "--jq", ".login"]);
        if !out.success {
            return None;
        }
        let login = out.output.trim().to_string();
        if login.is_empty() {
            return None;
        }
        Some(self.login.get_or_init(|| login).clone())
    }

    pub fn user_organizations(&self) -> Listing {
        let out = gh(self.runner, None, &["api", "user/orgs", "--jq", ".[].login"]);
        if out.success {
            Listing::complete(lines(&out.output))
        } else {
            Listing::failed(out.output)
        }
    }

    /// Owner picker entries: own login first, then organizations.
    pub fn owner_choices(&self) -> Listing {
        let mut owners = Vec::new();
        if let Some(login) = self.current_user_login() {
            owners.push(login);
        }
        let orgs = self.user_organizations();
        for org in orgs.items {
            if !owners.contains(&org) {
                owners.push(org);
            }
        }
        Listing { items: owners, failure: orgs.failure }
    }

    /// All `owner/name` full names for `owner`, fetched in pages of 100.
    /// The caller's own repositories go through `user/repos` so private ones
    /// are included. A failing page ends pagination; earlier pages are kept.
    pub fn repositories_for_owner(&self, owner: &str) -> Listing {
        let own = self.current_user_login().as_deref() == Some(owner);
        let mut repos = Vec::new();
        let mut page = 1;
        loop {
            let path = if own {
                format!("user/repos?affiliation=owner&per_page={}&page={}", PAGE_SIZE, page)
            } else {
                format!("users/{}/repos?per_page={}&page={}", owner, PAGE_SIZE, page)
            };
            let out = gh(self.runner, None, &["api", &path, "--jq", ".[].full_name"]);
            if !out.success {
                log::warn!("listing repositories for {} stopped at page {}: {}", owner, page, out.output);
                return Listing { items: repos, failure: Some(out.output) };
            }
            let batch = lines(&out.output);
            let count = batch.len();
            repos.extend(batch);
            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }
        log::info!("{} repositories for {} ({} pages)", repos.len(), owner, page);
        Listing::complete(repos)
    }
}
