//! Domain types returned by the GitHub adapter.
//!
//! These are provider-neutral shapes: the adapter maps raw API responses
//! into them and the formatter renders them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A repository coordinate (`owner/repo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Public profile of a user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub url: String,
}

/// A repository as listed for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An issue in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub author: Option<String>,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A pull request in a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub draft: bool,
    pub source_branch: String,
    pub target_branch: String,
    pub author: Option<String>,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A commit on the default branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    pub date: String,
    pub url: String,
}

/// A single entry from the contents API.
///
/// `content` is passed through exactly as the API returned it, in the
/// stated `encoding` (base64 for regular files).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    pub name: String,
    pub path: String,
    pub kind: String,
    pub size: u64,
    pub url: Option<String>,
    pub encoding: Option<String>,
    pub content: Option<String>,
}
