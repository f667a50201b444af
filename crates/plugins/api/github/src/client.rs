//! GitHub API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use ghbridge_core::config::DEFAULT_TIMEOUT_SECS;
use ghbridge_core::{
    Commit, Error, FileContent, GitHubApi, Issue, PullRequest, RepoRef, Repository, Result,
    UserProfile,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use tracing::{debug, warn};

use crate::types::{
    GitHubCommit, GitHubContent, GitHubErrorBody, GitHubIssue, GitHubPullRequest, GitHubRepo,
    GitHubUser,
};
use crate::{API_VERSION, DEFAULT_GITHUB_URL, USER_AGENT};

/// GitHub API client.
pub struct GitHubClient {
    base_url: Url,
    token: String,
    client: reqwest::Client,
}

impl GitHubClient {
    /// Create a client for api.github.com with the default timeout.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(
            DEFAULT_GITHUB_URL,
            token,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with a custom base URL (GitHub Enterprise) and timeout.
    pub fn with_base_url(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Invalid base URL '{}': not a hierarchical URL",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            token: token.into(),
            client,
        })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    ///
    /// `.` and `..` are rejected: the URL parser would resolve them and
    /// silently address a different resource.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let segments: Vec<&str> = segments.into_iter().collect();
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(Error::InvalidData(format!(
                "Invalid path segment '{}'",
                segment
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make an authenticated GET request with typed deserialization.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GitHub GET request");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(map_transport_error)?;

        self.handle_response(response).await
    }

    /// Handle response and map errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = status_message(status, &body);
            warn!(
                status = status.as_u16(),
                message = message.as_str(),
                "GitHub API error response"
            );
            return Err(Error::from_status(status.as_u16(), message));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::InvalidData(format!("Failed to parse response: {}", e)))
    }

    fn repo_endpoint(&self, repo: &RepoRef, resource: &str) -> Result<Url> {
        self.endpoint(["repos", repo.owner.as_str(), repo.repo.as_str(), resource])
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, username: Option<&str>) -> Result<UserProfile> {
        let url = match username {
            Some(username) => self.endpoint(["users", username])?,
            None => self.endpoint(["user"])?,
        };
        let user: GitHubUser = self.get(url).await?;
        Ok(map_user(user))
    }

    async fn list_repositories(&self, username: Option<&str>) -> Result<Vec<Repository>> {
        let url = match username {
            Some(username) => self.endpoint(["users", username, "repos"])?,
            None => self.endpoint(["user", "repos"])?,
        };
        let repos: Vec<GitHubRepo> = self.get(url).await?;
        Ok(repos.into_iter().map(map_repository).collect())
    }

    async fn list_issues(&self, repo: &RepoRef) -> Result<Vec<Issue>> {
        let issues: Vec<GitHubIssue> = self.get(self.repo_endpoint(repo, "issues")?).await?;
        Ok(issues.into_iter().map(map_issue).collect())
    }

    async fn list_pull_requests(&self, repo: &RepoRef) -> Result<Vec<PullRequest>> {
        let prs: Vec<GitHubPullRequest> = self.get(self.repo_endpoint(repo, "pulls")?).await?;
        Ok(prs.into_iter().map(map_pull_request).collect())
    }

    async fn list_commits(&self, repo: &RepoRef) -> Result<Vec<Commit>> {
        let commits: Vec<GitHubCommit> = self.get(self.repo_endpoint(repo, "commits")?).await?;
        Ok(commits.into_iter().map(map_commit).collect())
    }

    async fn get_content(&self, repo: &RepoRef, path: &str) -> Result<FileContent> {
        let segments = ["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let content: GitHubContent = self.get(self.endpoint(segments)?).await?;
        Ok(map_content(content))
    }
}

// =============================================================================
// Error mapping
// =============================================================================

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Status text, extended with GitHub's own `message` when the body has one.
fn status_message(status: reqwest::StatusCode, body: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    let detail = serde_json::from_str::<GitHubErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_default();

    if detail.is_empty() || detail == reason {
        reason.to_string()
    } else {
        format!("{}: {}", reason, detail)
    }
}

// =============================================================================
// Mapping functions
// =============================================================================

fn map_user(user: GitHubUser) -> UserProfile {
    UserProfile {
        login: user.login,
        name: user.name,
        bio: user.bio,
        location: user.location,
        company: user.company,
        email: user.email,
        followers: user.followers,
        following: user.following,
        url: user.html_url,
    }
}

fn map_repository(repo: GitHubRepo) -> Repository {
    Repository {
        name: repo.name,
        full_name: repo.full_name,
        description: repo.description,
        private: repo.private,
        url: repo.html_url,
        created_at: repo.created_at,
        updated_at: repo.updated_at,
    }
}

fn map_issue(issue: GitHubIssue) -> Issue {
    Issue {
        number: issue.number,
        title: issue.title,
        state: issue.state,
        author: issue.user.map(|u| u.login),
        url: issue.html_url,
        created_at: issue.created_at,
        updated_at: issue.updated_at,
    }
}

fn map_pull_request(pr: GitHubPullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title,
        state: pr.state,
        draft: pr.draft,
        source_branch: pr.head.ref_name,
        target_branch: pr.base.ref_name,
        author: pr.user.map(|u| u.login),
        url: pr.html_url,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
    }
}

fn map_commit(commit: GitHubCommit) -> Commit {
    let author = commit.commit.author.unwrap_or_default();

    Commit {
        sha: commit.sha,
        message: commit.commit.message,
        author_name: author.name,
        author_email: author.email,
        date: author.date,
        url: commit.html_url,
    }
}

fn map_content(content: GitHubContent) -> FileContent {
    FileContent {
        name: content.name,
        path: content.path,
        kind: content.kind,
        size: content.size,
        url: content.html_url,
        encoding: content.encoding,
        content: content.content,
    }
}
