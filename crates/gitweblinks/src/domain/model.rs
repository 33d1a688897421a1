//! Domain models for remotes, selections, and link references.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One addressable instance of a hosting provider.
///
/// Either field may carry a single trailing `/` or `:`; matching and URL building
/// normalize that away.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ServerUrl {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub ssh_url: String,
}

impl ServerUrl {
    pub fn new(base_url: impl Into<String>, ssh_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ssh_url: ssh_url.into(),
        }
    }
}

/// Providers that accept user-configured server instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerKind {
    GitHubEnterprise,
    GitLab,
    BitbucketServer,
    AzureDevOpsServer,
}

/// Source of user-configured servers for each [`ServerKind`].
pub trait ServerProvider {
    /// Servers in configuration order; empty means cloud defaults only.
    fn servers(&self, kind: ServerKind) -> Vec<ServerUrl>;
}

/// A [`ServerProvider`] with nothing configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCustomServers;

impl ServerProvider for NoCustomServers {
    fn servers(&self, _kind: ServerKind) -> Vec<ServerUrl> {
        Vec::new()
    }
}

/// Repository information resolved for a single link request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    pub root_directory: PathBuf,
    pub remote_url: String,
}

/// Whether a link pins to the current branch or to the current commit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum LinkType {
    /// Follow the branch as it moves.
    Branch,
    /// Pin to the commit hash.
    #[default]
    Hash,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Branch => "branch",
            LinkType::Hash => "hash",
        }
    }
}

impl FromStr for LinkType {
    type Err = LinkTypeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "branch" => Ok(LinkType::Branch),
            "hash" | "commit" => Ok(LinkType::Hash),
            other => Err(LinkTypeParseError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LinkTypeParseError {
    #[error("unknown link type '{0}' (expected 'branch' or 'hash')")]
    Unknown(String),
}

/// A resolved branch name or commit hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitRef {
    Branch(String),
    Commit(String),
}

impl GitRef {
    pub fn name(&self) -> &str {
        match self {
            GitRef::Branch(name) | GitRef::Commit(name) => name,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, GitRef::Branch(_))
    }
}

/// Highlighted text range, 1-based on both axes.
///
/// Columns are carried along but no provider encodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl Selection {
    /// Build a selection, swapping reversed endpoints and clamping zero to one.
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        let (start, end) = normalize_range((start_line, start_column), (end_line, end_column));
        Self {
            start_line: start.0,
            end_line: end.0,
            start_column: start.1,
            end_column: end.1,
        }
    }

    /// Whole-line selection between two lines.
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        Self::new(start_line, 1, end_line, 1)
    }

    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }
}

fn normalize_range(a: (usize, usize), b: (usize, usize)) -> ((usize, usize), (usize, usize)) {
    let clamp = |(line, column): (usize, usize)| (line.max(1), column.max(1));
    let (a, b) = (clamp(a), clamp(b));
    if a <= b { (a, b) } else { (b, a) }
}

impl FromStr for Selection {
    type Err = SelectionParseError;

    /// Accepts `N`, `A-B`, or `A:C-B:D` (line:column).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SelectionParseError::Empty);
        }

        let (start, end) = match value.split_once('-') {
            Some((start, end)) => (parse_position(start)?, parse_position(end)?),
            None => {
                let position = parse_position(value)?;
                (position, position)
            }
        };

        Ok(Selection::new(start.0, start.1, end.0, end.1))
    }
}

fn parse_position(text: &str) -> Result<(usize, usize), SelectionParseError> {
    let text = text.trim().trim_start_matches(['L', 'l']);
    let (line, column) = match text.split_once(':') {
        Some((line, column)) => (line, Some(column)),
        None => (text, None),
    };

    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .ok()
            .filter(|number| *number > 0)
            .ok_or_else(|| SelectionParseError::InvalidNumber(part.trim().to_string()))
    };

    let line = parse(line)?;
    let column = column.map(parse).transpose()?.unwrap_or(1);
    Ok((line, column))
}

/// Error returned when parsing a [`Selection`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SelectionParseError {
    #[error("selection is empty")]
    Empty,
    #[error("'{0}' is not a positive line or column number")]
    InvalidNumber(String),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(f, "{}", self.start_line)
        } else {
            write!(f, "{}-{}", self.start_line, self.end_line)
        }
    }
}
