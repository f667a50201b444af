//! MCP tool catalogue and typed tool arguments.
//!
//! The catalogue is static: six tools, each backed by exactly one
//! [`GitHubApi`](ghbridge_core::GitHubApi) operation. Raw `arguments` from a
//! `tools/call` request are decoded into a per-tool struct before anything
//! touches the network.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::protocol::ToolDefinition;

/// Primitive type of a tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// Declared argument of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: &'static str,
}

const USERNAME: FieldSpec = FieldSpec {
    name: "username",
    kind: FieldKind::String,
    required: false,
    description: "GitHub login (leave empty for the authenticated user)",
};

const OWNER: FieldSpec = FieldSpec {
    name: "owner",
    kind: FieldKind::String,
    required: true,
    description: "Repository owner (user or organization)",
};

const REPO: FieldSpec = FieldSpec {
    name: "repo",
    kind: FieldKind::String,
    required: true,
    description: "Repository name",
};

const PATH: FieldSpec = FieldSpec {
    name: "path",
    kind: FieldKind::String,
    required: true,
    description: "File path inside the repository",
};

/// The fixed set of tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetUser,
    GetRepos,
    GetIssues,
    GetPullRequests,
    GetCommits,
    GetContent,
}

impl ToolKind {
    /// Catalogue order, as reported by `tools/list`.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::GetUser,
        ToolKind::GetRepos,
        ToolKind::GetIssues,
        ToolKind::GetPullRequests,
        ToolKind::GetCommits,
        ToolKind::GetContent,
    ];

    /// Wire name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::GetUser => "get_user",
            ToolKind::GetRepos => "get_repos",
            ToolKind::GetIssues => "get_issues",
            ToolKind::GetPullRequests => "get_pull_requests",
            ToolKind::GetCommits => "get_commits",
            ToolKind::GetContent => "get_content",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::GetUser => "Get the profile of a GitHub user",
            ToolKind::GetRepos => "List the repositories of a GitHub user",
            ToolKind::GetIssues => "List the issues of a repository",
            ToolKind::GetPullRequests => "List the pull requests of a repository",
            ToolKind::GetCommits => "List the commits of a repository",
            ToolKind::GetContent => "Get the content of a file in a repository",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            ToolKind::GetUser | ToolKind::GetRepos => &[USERNAME],
            ToolKind::GetIssues | ToolKind::GetPullRequests | ToolKind::GetCommits => {
                &[OWNER, REPO]
            }
            ToolKind::GetContent => &[OWNER, REPO, PATH],
        }
    }

    /// JSON Schema of the tool's arguments.
    pub fn input_schema(self) -> Value {
        let mut properties = Map::new();
        for field in self.fields() {
            properties.insert(
                field.name.to_string(),
                serde_json::json!({
                    "type": field.kind.as_str(),
                    "description": field.description,
                }),
            );
        }

        let mut schema = serde_json::json!({
            "type": "object",
            "properties": properties,
        });

        let required: Vec<&str> = self
            .fields()
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        if !required.is_empty() {
            schema["required"] = serde_json::json!(required);
        }

        schema
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Catalogue of tool descriptors, built once at startup.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: ToolKind::ALL.iter().map(|kind| kind.definition()).collect(),
        }
    }

    /// All descriptors, in catalogue order.
    pub fn describe(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn lookup(&self, name: &str) -> Option<ToolKind> {
        ToolKind::from_name(name)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// Why a tool's arguments were rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ArgumentError {
    #[error("arguments must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("field `{0}` must not be empty")]
    Empty(&'static str),

    #[error("field `{0}` must not contain `.` or `..` path segments")]
    DotSegment(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Arguments of `get_user` and `get_repos`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserArgs {
    #[serde(default)]
    pub username: Option<String>,
}

impl UserArgs {
    /// The requested login; `None` selects the authenticated user.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }
}

/// Arguments of the repository-scoped listing tools.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoArgs {
    pub owner: String,
    pub repo: String,
}

/// Arguments of `get_content`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentArgs {
    pub owner: String,
    pub repo: String,
    pub path: String,
}

/// A validated tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    GetUser(UserArgs),
    GetRepos(UserArgs),
    GetIssues(RepoArgs),
    GetPullRequests(RepoArgs),
    GetCommits(RepoArgs),
    GetContent(ContentArgs),
}

impl ToolInvocation {
    /// Decode and validate raw arguments for `kind`.
    ///
    /// Required fields that are absent, null, or blank are rejected before
    /// type decoding, so a missing field and a mistyped one produce
    /// different errors.
    pub fn decode(kind: ToolKind, arguments: Option<Value>) -> Result<Self, ArgumentError> {
        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value @ Value::Object(_)) => value,
            Some(other) => return Err(ArgumentError::NotAnObject(json_type(&other))),
        };

        for field in kind.fields().iter().filter(|f| f.required) {
            match arguments.get(field.name) {
                None | Some(Value::Null) => return Err(ArgumentError::Missing(field.name)),
                Some(Value::String(s)) if s.trim().is_empty() => {
                    return Err(ArgumentError::Empty(field.name))
                }
                _ => {}
            }
        }

        for field in kind.fields() {
            if let Some(Value::String(s)) = arguments.get(field.name) {
                if has_dot_segment(field, s) {
                    return Err(ArgumentError::DotSegment(field.name));
                }
            }
        }

        let invocation = match kind {
            ToolKind::GetUser => Self::GetUser(from_arguments(arguments)?),
            ToolKind::GetRepos => Self::GetRepos(from_arguments(arguments)?),
            ToolKind::GetIssues => Self::GetIssues(from_arguments(arguments)?),
            ToolKind::GetPullRequests => Self::GetPullRequests(from_arguments(arguments)?),
            ToolKind::GetCommits => Self::GetCommits(from_arguments(arguments)?),
            ToolKind::GetContent => Self::GetContent(from_arguments(arguments)?),
        };

        Ok(invocation)
    }
}

/// URL resolution would turn `.`/`..` into a different endpoint or file.
fn has_dot_segment(field: &FieldSpec, value: &str) -> bool {
    let is_dot = |segment: &str| segment == "." || segment == "..";
    if field.name == PATH.name {
        value.split('/').any(is_dot)
    } else {
        is_dot(value)
    }
}

fn from_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ArgumentError> {
    serde_json::from_value(arguments).map_err(|e| ArgumentError::Invalid(e.to_string()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
