//! Adapter trait for the remote GitHub API.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Commit, FileContent, Issue, PullRequest, RepoRef, Repository, UserProfile};

/// One method per remote operation exposed as a tool.
///
/// Implementations issue exactly one outbound call per method and never retry.
/// `None` for a username selects the authenticated-user variant.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Get a user profile (`None` = the authenticated user).
    async fn get_user(&self, username: Option<&str>) -> Result<UserProfile>;

    /// List repositories of a user (`None` = the authenticated user).
    async fn list_repositories(&self, username: Option<&str>) -> Result<Vec<Repository>>;

    /// List issues of a repository.
    async fn list_issues(&self, repo: &RepoRef) -> Result<Vec<Issue>>;

    /// List pull requests of a repository.
    async fn list_pull_requests(&self, repo: &RepoRef) -> Result<Vec<PullRequest>>;

    /// List commits of a repository.
    async fn list_commits(&self, repo: &RepoRef) -> Result<Vec<Commit>>;

    /// Get a file (or other content entry) by path.
    async fn get_content(&self, repo: &RepoRef, path: &str) -> Result<FileContent>;
}
