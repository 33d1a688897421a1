//! Link handlers: one per hosting provider family.
//!
//! A handler recognizes remote URLs that belong to its provider and turns a
//! repository-relative file path into that provider's web URL. Every handler
//! follows the same flow (match, resolve the ref, build the URL, append the
//! selection); only the grammars differ.

use std::path::{Component, Path};

use crate::domain::errors::LinkError;
use crate::domain::model::{GitInfo, GitRef, LinkType, Selection, ServerUrl};
use crate::infra::git::GitExecutor;

pub mod azure_devops_cloud;
pub mod azure_devops_server;
pub mod bitbucket_cloud;
pub mod bitbucket_server;
pub mod devdiv;
pub mod finder;
pub mod github;
pub mod gitlab;
pub mod server;
pub mod url;
pub mod vsts;

pub use azure_devops_cloud::AzureDevOpsCloudHandler;
pub use azure_devops_server::AzureDevOpsServerHandler;
pub use bitbucket_cloud::BitbucketCloudHandler;
pub use bitbucket_server::BitbucketServerHandler;
pub use devdiv::DevDivHandler;
pub use finder::LinkHandlerFinder;
pub use github::GitHubHandler;
pub use gitlab::GitLabHandler;
pub use vsts::VisualStudioTeamServicesHandler;

/// Provider-specific link construction.
pub trait LinkHandler: Send + Sync {
    /// Display name used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// The server instance `remote_url` belongs to, if this handler recognizes it.
    fn matching_server(&self, remote_url: &str) -> Option<ServerUrl>;

    fn is_match(&self, remote_url: &str) -> bool {
        self.matching_server(remote_url).is_some()
    }

    /// Path of the repository on `server`, e.g. `owner/repo`.
    fn repository_path(&self, remote_url: &str, server: &ServerUrl) -> Option<String> {
        server::repository_path(server, remote_url)
    }

    fn current_branch(&self, git: &dyn GitExecutor, root: &Path) -> Result<String, LinkError> {
        git.execute(root, &["symbolic-ref", "--short", "HEAD"])
    }

    /// Build the URL to the file, without any selection.
    fn create_url(
        &self,
        base_url: &str,
        repository_path: &str,
        reference: &GitRef,
        relative_path: &str,
    ) -> String;

    /// Suffix appended to the file URL to highlight `selection`.
    fn selection_suffix(&self, relative_path: &str, selection: &Selection) -> String;

    /// Produce the web URL for `file` inside the repository described by `info`.
    ///
    /// Callers must check [`LinkHandler::is_match`] first; a non-matching remote
    /// yields [`LinkError::NoMatchingServer`]. Git failures are returned as-is.
    fn make_url(
        &self,
        git: &dyn GitExecutor,
        info: &GitInfo,
        file: &Path,
        selection: Option<&Selection>,
        link_type: LinkType,
    ) -> Result<String, LinkError> {
        let no_match = || LinkError::NoMatchingServer {
            handler: self.name(),
            remote: info.remote_url.clone(),
        };

        let server = self.matching_server(&info.remote_url).ok_or_else(no_match)?;
        let repository_path = self
            .repository_path(&info.remote_url, &server)
            .ok_or_else(no_match)?;
        let relative_path = relative_path(&info.root_directory, file)?;

        let reference = match link_type {
            LinkType::Hash => GitRef::Commit(git.execute(&info.root_directory, &["rev-parse", "HEAD"])?),
            LinkType::Branch => GitRef::Branch(self.current_branch(git, &info.root_directory)?),
        };

        let base_url = server::normalize_url(&server.base_url);
        let mut url = self.create_url(&base_url, &repository_path, &reference, &relative_path);
        if let Some(selection) = selection {
            url.push_str(&self.selection_suffix(&relative_path, selection));
        }

        tracing::debug!(handler = self.name(), %url, "created link");
        Ok(url)
    }
}

/// Repository-relative path of `file` using forward slashes.
pub fn relative_path(root: &Path, file: &Path) -> Result<String, LinkError> {
    let outside = || LinkError::FileOutsideRepository {
        file: file.to_path_buf(),
        root: root.to_path_buf(),
    };

    let relative = file.strip_prefix(root).map_err(|_| outside())?;
    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(outside()),
        }
    }

    Ok(segments.join("/"))
}
