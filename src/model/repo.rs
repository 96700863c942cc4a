use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A repository by its host full name, `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not an owner/name repository: '{0}'")]
pub struct RepoIdError(pub String);

impl FromStr for RepoId {
    type Err = RepoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self { owner: owner.to_string(), name: name.to_string() })
            }
            _ => Err(RepoIdError(s.to_string())),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Result of a listing query. `failure` keeps the reason when the query
/// (or a later page of it) failed; `items` holds whatever was retrieved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<String>,
    pub failure: Option<String>,
}

impl Listing {
    pub fn complete(items: Vec<String>) -> Self {
        Self { items, failure: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self { items: Vec::new(), failure: Some(reason.into()) }
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_name() {
        let id: RepoId = "octo/widgets".parse().unwrap();
        assert_eq!(id.owner, "octo");
        assert_eq!(id.name, "widgets");
        assert_eq!(id.to_string(), "octo/widgets");
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "octo", "/widgets", "octo/", "a/b/c"] {
            assert!(bad.parse::<RepoId>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn failed_listing_is_empty_but_keeps_reason() {
        let l = Listing::failed("HTTP 502");
        assert!(l.items.is_empty());
        assert!(!l.is_complete());
        assert_eq!(l.failure.as_deref(), Some("HTTP 502"));
    }
}
