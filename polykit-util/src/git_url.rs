//! GitHub URL parsing.
//!
//! Accepts repository, tree and blob URLs in https, http or ssh form:
//!
//! ```text
//! https://github.com/<owner>/<project>[/tree|blob/<branch>/<path...>]
//! git@github.com:<owner>/<project>.git
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFIXES: [&str; 3] = ["https://github.com/", "http://github.com/", "git@github.com:"];
const GIT_SUFFIX: &str = ".git";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitUrlError {
    #[error("not a GitHub URL: {0}")]
    UnsupportedHost(String),

    #[error("URL has no {segment} segment: {url}")]
    MissingSegment { segment: &'static str, url: String },
}

/// Whether a URL points at a single file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    File,
    Dir,
}

/// The parts of a GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitUrlInfo {
    /// The URL as given.
    pub href: String,
    pub owner: String,
    /// Project name with any `.git` suffix removed.
    pub project: String,
    /// True for `.git` URLs and URLs without a tree or blob segment.
    pub is_repo: bool,
    pub source_type: SourceType,
    /// Empty when the URL names no branch.
    pub branch: String,
    /// Path inside the repository, without a leading slash.
    pub pathname: String,
}

/// Splits a GitHub URL into owner, project, branch and path.
pub fn parse_git_url(url: &str) -> Result<GitUrlInfo, GitUrlError> {
    let rest = PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .ok_or_else(|| GitUrlError::UnsupportedHost(url.to_string()))?;
    let pathname = format!("/{rest}");

    let mut segments = rest.split('/');
    let owner = non_empty(segments.next(), "owner", url)?;
    let project = non_empty(segments.next(), "project", url)?;
    let _kind = segments.next();
    let branch = segments.next().unwrap_or_default();
    let file_path = segments.collect::<Vec<_>>().join("/");

    let is_file = pathname.contains("blob") || has_extension(&file_path);
    let is_repo =
        pathname.ends_with(GIT_SUFFIX) || (!pathname.contains("tree") && !pathname.contains("blob"));

    Ok(GitUrlInfo {
        href: url.to_string(),
        owner: owner.to_string(),
        project: project.strip_suffix(GIT_SUFFIX).unwrap_or(project).to_string(),
        is_repo,
        source_type: if is_file { SourceType::File } else { SourceType::Dir },
        branch: branch.to_string(),
        pathname: file_path,
    })
}

fn non_empty<'a>(
    segment: Option<&'a str>,
    name: &'static str,
    url: &str,
) -> Result<&'a str, GitUrlError> {
    segment
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GitUrlError::MissingSegment {
            segment: name,
            url: url.to_string(),
        })
}

/// True if the last path component has an extension. Leading dots do not
/// count, so `.gitignore` has none.
fn has_extension(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or_default();
    matches!(name.rfind('.'), Some(index) if index > 0 && name != "..")
}
