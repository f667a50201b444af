//! Plain-text layouts, one function per payload type.
//!
//! Listings start with a count line followed by one block per item; single
//! entities are rendered one field per line. Absent values render as an
//! empty string so field positions never shift.

use ghbridge_core::{Commit, FileContent, Issue, PullRequest, RepoRef, Repository, UserProfile};

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

// ============================================================================
// Users
// ============================================================================

/// Render a user profile.
pub fn user_to_text(user: &UserProfile) -> String {
    let mut output = String::new();

    output.push_str(&format!("User: {}\n", user.login));
    output.push_str(&format!("Name: {}\n", opt(&user.name)));
    output.push_str(&format!("Bio: {}\n", opt(&user.bio)));
    output.push_str(&format!("Location: {}\n", opt(&user.location)));
    output.push_str(&format!("Company: {}\n", opt(&user.company)));
    output.push_str(&format!("Email: {}\n", opt(&user.email)));
    output.push_str(&format!("Followers: {}\n", user.followers));
    output.push_str(&format!("Following: {}\n", user.following));
    output.push_str(&format!("URL: {}", user.url));

    output
}

// ============================================================================
// Repositories
// ============================================================================

/// Render a repository listing.
pub fn repositories_to_text(repos: &[Repository]) -> String {
    let mut output = format!("Repositories ({}):\n\n", repos.len());

    for repo in repos {
        let visibility = if repo.private { "private" } else { "public" };

        output.push_str(&format!("- {}\n", repo.name));
        output.push_str(&format!("  Full name: {}\n", repo.full_name));
        output.push_str(&format!("  Description: {}\n", opt(&repo.description)));
        output.push_str(&format!("  Visibility: {}\n", visibility));
        output.push_str(&format!("  URL: {}\n", repo.url));
        output.push_str(&format!("  Created: {}\n", repo.created_at));
        output.push_str(&format!("  Updated: {}\n", repo.updated_at));
        output.push('\n');
    }

    output
}

// ============================================================================
// Issues and pull requests
// ============================================================================

/// Render the issues of a repository.
pub fn issues_to_text(repo: &RepoRef, issues: &[Issue]) -> String {
    let mut output = format!("Issues for {} ({}):\n\n", repo, issues.len());

    for issue in issues {
        output.push_str(&format!("- #{}: {}\n", issue.number, issue.title));
        output.push_str(&format!("  State: {}\n", issue.state));
        output.push_str(&format!("  Author: {}\n", opt(&issue.author)));
        output.push_str(&format!("  URL: {}\n", issue.url));
        output.push_str(&format!("  Created: {}\n", issue.created_at));
        output.push_str(&format!("  Updated: {}\n", issue.updated_at));
        output.push('\n');
    }

    output
}

/// Render the pull requests of a repository.
pub fn pull_requests_to_text(repo: &RepoRef, pull_requests: &[PullRequest]) -> String {
    let mut output = format!("Pull requests for {} ({}):\n\n", repo, pull_requests.len());

    for pr in pull_requests {
        output.push_str(&format!("- #{}: {}\n", pr.number, pr.title));
        output.push_str(&format!("  State: {}\n", pr.state));
        output.push_str(&format!("  Draft: {}\n", pr.draft));
        output.push_str(&format!(
            "  Branch: {} -> {}\n",
            pr.source_branch, pr.target_branch
        ));
        output.push_str(&format!("  Author: {}\n", opt(&pr.author)));
        output.push_str(&format!("  URL: {}\n", pr.url));
        output.push_str(&format!("  Created: {}\n", pr.created_at));
        output.push_str(&format!("  Updated: {}\n", pr.updated_at));
        output.push('\n');
    }

    output
}

// ============================================================================
// Commits
// ============================================================================

/// Render the commits of a repository.
pub fn commits_to_text(repo: &RepoRef, commits: &[Commit]) -> String {
    let mut output = format!("Commits for {} ({}):\n\n", repo, commits.len());

    for commit in commits {
        output.push_str(&format!("- {}\n", commit.sha));
        output.push_str(&format!("  Message: {}\n", commit.message));
        output.push_str(&format!(
            "  Author: {} <{}>\n",
            commit.author_name, commit.author_email
        ));
        output.push_str(&format!("  Date: {}\n", commit.date));
        output.push_str(&format!("  URL: {}\n", commit.url));
        output.push('\n');
    }

    output
}

// ============================================================================
// Contents
// ============================================================================

/// Render a content entry. The body is appended exactly as returned.
pub fn content_to_text(repo: &RepoRef, path: &str, content: &FileContent) -> String {
    let mut output = format!("Content of {}/{}:\n\n", repo, path);

    output.push_str(&format!("Name: {}\n", content.name));
    output.push_str(&format!("Path: {}\n", content.path));
    output.push_str(&format!("Type: {}\n", content.kind));
    output.push_str(&format!("Size: {} bytes\n", content.size));
    output.push_str(&format!("URL: {}\n", opt(&content.url)));

    if let Some(body) = content.content.as_deref().filter(|b| !b.is_empty()) {
        output.push_str(&format!("\nContent ({}):\n", opt(&content.encoding)));
        output.push_str(body);
    }

    output
}
