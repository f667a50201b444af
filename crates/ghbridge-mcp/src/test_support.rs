//! Recording stand-in for the GitHub adapter.

use std::sync::Mutex;

use async_trait::async_trait;
use ghbridge_core::{
    Commit, Error, FileContent, GitHubApi, Issue, PullRequest, RepoRef, Repository, Result,
    UserProfile,
};

#[derive(Default)]
pub struct StubApi {
    calls: Mutex<Vec<String>>,
    repositories: Vec<Repository>,
    failure: Option<(u16, String)>,
}

impl StubApi {
    pub fn with_repositories(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            ..Self::default()
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            failure: Some((status, message.to_string())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, message)) => Err(Error::from_status(*status, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GitHubApi for StubApi {
    async fn get_user(&self, username: Option<&str>) -> Result<UserProfile> {
        self.record(format!("get_user({:?})", username))?;
        Ok(UserProfile {
            login: username.unwrap_or("me").to_string(),
            name: None,
            bio: None,
            location: None,
            company: None,
            email: None,
            followers: 0,
            following: 0,
            url: "https://github.com/me".to_string(),
        })
    }

    async fn list_repositories(&self, username: Option<&str>) -> Result<Vec<Repository>> {
        self.record(format!("list_repositories({:?})", username))?;
        Ok(self.repositories.clone())
    }

    async fn list_issues(&self, repo: &RepoRef) -> Result<Vec<Issue>> {
        self.record(format!("list_issues({})", repo))?;
        Ok(vec![])
    }

    async fn list_pull_requests(&self, repo: &RepoRef) -> Result<Vec<PullRequest>> {
        self.record(format!("list_pull_requests({})", repo))?;
        Ok(vec![])
    }

    async fn list_commits(&self, repo: &RepoRef) -> Result<Vec<Commit>> {
        self.record(format!("list_commits({})", repo))?;
        Ok(vec![])
    }

    async fn get_content(&self, repo: &RepoRef, path: &str) -> Result<FileContent> {
        self.record(format!("get_content({}, {})", repo, path))?;
        Ok(FileContent {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            kind: "file".to_string(),
            size: 0,
            url: None,
            encoding: None,
            content: None,
        })
    }
}
