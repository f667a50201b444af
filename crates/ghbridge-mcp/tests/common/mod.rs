//! Common test utilities for the stdio server tests.
//!
//! - `FixtureApi`: serves domain data from JSON fixtures in tests/fixtures/
//! - `run_session`: feeds raw lines to a server and collects every response

use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ghbridge_core::{
    Commit, Error, FileContent, GitHubApi, Issue, PullRequest, RepoRef, Repository, Result,
    UserProfile,
};
use ghbridge_mcp::{McpServer, StdioTransport, ToolRegistry};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Adapter that loads data from JSON fixtures and counts its calls.
pub struct FixtureApi {
    fixtures_dir: PathBuf,
    failure: Option<(u16, String)>,
    calls: Mutex<usize>,
}

impl FixtureApi {
    /// Looks for fixtures in `tests/fixtures/github/`.
    pub fn new() -> Self {
        Self {
            fixtures_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests")
                .join("fixtures")
                .join("github"),
            failure: None,
            calls: Mutex::new(0),
        }
    }

    /// Every operation fails with the given HTTP status.
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            failure: Some((status, message.to_string())),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        *self.calls.lock().unwrap() += 1;

        if let Some((status, message)) = &self.failure {
            return Err(Error::from_status(*status, message.clone()));
        }

        let path = self.fixtures_dir.join(name);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("Failed to load fixture {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl GitHubApi for FixtureApi {
    async fn get_user(&self, _username: Option<&str>) -> Result<UserProfile> {
        self.load("user.json")
    }

    async fn list_repositories(&self, _username: Option<&str>) -> Result<Vec<Repository>> {
        self.load("repos.json")
    }

    async fn list_issues(&self, _repo: &RepoRef) -> Result<Vec<Issue>> {
        self.load("issues.json")
    }

    async fn list_pull_requests(&self, _repo: &RepoRef) -> Result<Vec<PullRequest>> {
        self.load("pull_requests.json")
    }

    async fn list_commits(&self, _repo: &RepoRef) -> Result<Vec<Commit>> {
        self.load("commits.json")
    }

    async fn get_content(&self, _repo: &RepoRef, _path: &str) -> Result<FileContent> {
        self.load("content.json")
    }
}

struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serve `input` to completion and return the raw output.
pub async fn run_raw(input: &str, api: Arc<FixtureApi>) -> String {
    let output = Arc::new(Mutex::new(Vec::new()));
    let transport = StdioTransport::new(
        Box::new(Cursor::new(input.as_bytes().to_vec())),
        Box::new(SharedWriter(output.clone())),
    );

    McpServer::new(ToolRegistry::new(), api)
        .run_with(transport)
        .await
        .unwrap();

    let bytes = output.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

/// Serve the given lines and decode each output line as JSON.
pub async fn run_session(lines: &[&str], api: Arc<FixtureApi>) -> Vec<Value> {
    let mut input = lines.join("\n");
    input.push('\n');

    run_raw(&input, api)
        .await
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
