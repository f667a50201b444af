//! Output rendering for tool results.
//!
//! Every successful tool call ends up here: the adapter payload, paired with
//! the context of the invocation, is rendered into a single text block that
//! goes back to the caller verbatim.
//!
//! Rendering is pure. The same [`ToolOutput`] always produces byte-identical
//! text, and nothing is truncated or summarized.
//!
//! # Example
//!
//! ```ignore
//! use ghbridge_format::{render, ToolOutput};
//!
//! let text = render(&ToolOutput::Repositories(repos));
//! assert!(text.starts_with("Repositories (2):"));
//! ```

pub mod text;

use ghbridge_core::{Commit, FileContent, Issue, PullRequest, RepoRef, Repository, UserProfile};

/// A successful adapter result plus the invocation context needed to render it.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    User(UserProfile),
    Repositories(Vec<Repository>),
    Issues {
        repo: RepoRef,
        issues: Vec<Issue>,
    },
    PullRequests {
        repo: RepoRef,
        pull_requests: Vec<PullRequest>,
    },
    Commits {
        repo: RepoRef,
        commits: Vec<Commit>,
    },
    Content {
        repo: RepoRef,
        path: String,
        content: FileContent,
    },
}

/// Render a tool result as a single text block.
pub fn render(output: &ToolOutput) -> String {
    match output {
        ToolOutput::User(user) => text::user_to_text(user),
        ToolOutput::Repositories(repos) => text::repositories_to_text(repos),
        ToolOutput::Issues { repo, issues } => text::issues_to_text(repo, issues),
        ToolOutput::PullRequests {
            repo,
            pull_requests,
        } => text::pull_requests_to_text(repo, pull_requests),
        ToolOutput::Commits { repo, commits } => text::commits_to_text(repo, commits),
        ToolOutput::Content {
            repo,
            path,
            content,
        } => text::content_to_text(repo, path, content),
    }
}
