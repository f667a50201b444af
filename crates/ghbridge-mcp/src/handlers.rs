//! Tool handlers for MCP server.
//!
//! This module implements the actual tool execution logic: registry lookup,
//! argument validation, the adapter call, and rendering of the result.

use std::sync::Arc;

use ghbridge_core::{GitHubApi, RepoRef};
use ghbridge_format::ToolOutput;
use serde_json::Value;

use crate::protocol::{JsonRpcError, ToolCallResult, ToolDefinition};
use crate::tools::{ToolInvocation, ToolRegistry};

/// Tool handler that executes tools against the GitHub adapter.
pub struct ToolHandler {
    registry: ToolRegistry,
    api: Arc<dyn GitHubApi>,
}

impl ToolHandler {
    /// Create a new tool handler.
    pub fn new(registry: ToolRegistry, api: Arc<dyn GitHubApi>) -> Self {
        Self { registry, api }
    }

    /// Get available tool definitions.
    pub fn available_tools(&self) -> &[ToolDefinition] {
        self.registry.describe()
    }

    /// Execute a tool by name with arguments.
    ///
    /// Unknown tools and invalid arguments are rejected before the adapter
    /// is called.
    pub async fn execute(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<ToolCallResult, JsonRpcError> {
        let kind = self.registry.lookup(name).ok_or_else(|| {
            tracing::warn!("Unknown tool: {}", name);
            JsonRpcError::tool_not_found(name)
        })?;

        let invocation = ToolInvocation::decode(kind, arguments).map_err(|e| {
            tracing::warn!("Invalid arguments for {}: {}", name, e);
            JsonRpcError::invalid_params(&e.to_string())
        })?;

        let output = self.invoke(invocation).await.map_err(|e| {
            tracing::warn!(status = ?e.status(), "Tool {} failed: {}", name, e);
            JsonRpcError::from(e)
        })?;

        Ok(ToolCallResult::text(ghbridge_format::render(&output)))
    }

    /// Run the adapter operation behind a validated invocation.
    async fn invoke(&self, invocation: ToolInvocation) -> ghbridge_core::Result<ToolOutput> {
        let output = match invocation {
            ToolInvocation::GetUser(args) => {
                ToolOutput::User(self.api.get_user(args.username()).await?)
            }
            ToolInvocation::GetRepos(args) => {
                ToolOutput::Repositories(self.api.list_repositories(args.username()).await?)
            }
            ToolInvocation::GetIssues(args) => {
                let repo = RepoRef::new(args.owner, args.repo);
                let issues = self.api.list_issues(&repo).await?;
                tracing::debug!("Got {} issues from {}", issues.len(), repo);
                ToolOutput::Issues { repo, issues }
            }
            ToolInvocation::GetPullRequests(args) => {
                let repo = RepoRef::new(args.owner, args.repo);
                let pull_requests = self.api.list_pull_requests(&repo).await?;
                tracing::debug!("Got {} pull requests from {}", pull_requests.len(), repo);
                ToolOutput::PullRequests {
                    repo,
                    pull_requests,
                }
            }
            ToolInvocation::GetCommits(args) => {
                let repo = RepoRef::new(args.owner, args.repo);
                let commits = self.api.list_commits(&repo).await?;
                tracing::debug!("Got {} commits from {}", commits.len(), repo);
                ToolOutput::Commits { repo, commits }
            }
            ToolInvocation::GetContent(args) => {
                let repo = RepoRef::new(args.owner, args.repo);
                let content = self.api.get_content(&repo, &args.path).await?;
                ToolOutput::Content {
                    repo,
                    path: args.path,
                    content,
                }
            }
        };

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolResultContent;
    use crate::test_support::StubApi;
    use ghbridge_core::Repository;
    use serde_json::json;

    fn handler(api: StubApi) -> (ToolHandler, Arc<StubApi>) {
        let api = Arc::new(api);
        (ToolHandler::new(ToolRegistry::new(), api.clone()), api)
    }

    fn text(result: &ToolCallResult) -> &str {
        match &result.content[0] {
            ToolResultContent::Text { text } => text.as_str(),
        }
    }

    #[tokio::test]
    async fn test_get_repos_renders_listing() {
        let (handler, api) = handler(StubApi::with_repositories(vec![
            Repository {
                name: "hello".to_string(),
                full_name: "octo/hello".to_string(),
                description: Some("Hello world".to_string()),
                private: false,
                url: "https://github.com/octo/hello".to_string(),
                created_at: "2024-01-01T00:00:00Z".to_string(),
                updated_at: "2024-01-02T00:00:00Z".to_string(),
            },
        ]));

        let result = handler.execute("get_repos", None).await.unwrap();

        assert!(text(&result).starts_with("Repositories (1):\n\n- hello\n"));
        assert_eq!(api.calls(), vec!["list_repositories(None)".to_string()]);
    }

    #[tokio::test]
    async fn test_username_routes_to_user_variant() {
        let (handler, api) = handler(StubApi::default());

        handler
            .execute("get_user", Some(json!({"username": "octocat"})))
            .await
            .unwrap();
        handler
            .execute("get_user", Some(json!({"username": ""})))
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![
                "get_user(Some(\"octocat\"))".to_string(),
                "get_user(None)".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_get_content_passes_path() {
        let (handler, api) = handler(StubApi::default());

        let result = handler
            .execute(
                "get_content",
                Some(json!({"owner": "octo", "repo": "hello", "path": "src/main.rs"})),
            )
            .await
            .unwrap();

        assert!(text(&result).starts_with("Content of octo/hello/src/main.rs:\n\n"));
        assert_eq!(
            api.calls(),
            vec!["get_content(octo/hello, src/main.rs)".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (handler, api) = handler(StubApi::default());
        let err = handler.execute("unknown_tool", None).await.unwrap_err();

        assert_eq!(err.code, JsonRpcError::METHOD_NOT_FOUND);
        assert_eq!(err.data.as_deref(), Some("unknown_tool"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_field_never_reaches_adapter() {
        let (handler, api) = handler(StubApi::default());
        let err = handler
            .execute("get_issues", Some(json!({"owner": "octo"})))
            .await
            .unwrap_err();

        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);
        assert_eq!(err.data.as_deref(), Some("missing required field `repo`"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_adapter_failure_is_internal_error() {
        let (handler, _api) = handler(StubApi::failing(404, "Not Found"));

        let err = handler
            .execute("get_commits", Some(json!({"owner": "octo", "repo": "gone"})))
            .await
            .unwrap_err();

        assert_eq!(err.code, JsonRpcError::INTERNAL_ERROR);
        assert_eq!(err.message, "Internal error");
        assert_eq!(err.data.as_deref(), Some("API error: 404 - Not Found"));
    }

    #[test]
    fn test_available_tools() {
        let (handler, _api) = handler(StubApi::default());
        assert_eq!(handler.available_tools().len(), 6);
    }
}
