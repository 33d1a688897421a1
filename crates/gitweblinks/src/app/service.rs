//! The single entry point editors and the CLI use: file in, web link out.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::app::links::LinkHandlerFinder;
use crate::domain::errors::LinkError;
use crate::domain::model::{GitInfo, LinkType, Selection};
use crate::infra::git::{GitExecutor, GitInfoFinder};

/// A produced link and the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedLink {
    pub url: String,
    pub handler: String,
}

/// Composes repository lookup, handler selection, and URL construction.
pub struct LinkService<'a> {
    git: &'a dyn GitExecutor,
    finder: &'a LinkHandlerFinder,
}

impl<'a> LinkService<'a> {
    pub fn new(git: &'a dyn GitExecutor, finder: &'a LinkHandlerFinder) -> Self {
        Self { git, finder }
    }

    /// Produce a link to `file`, optionally highlighting `selection`.
    pub fn link_for(
        &self,
        file: &Path,
        selection: Option<&Selection>,
        link_type: LinkType,
    ) -> Result<GeneratedLink, LinkError> {
        let info = GitInfoFinder::new(self.git)
            .find(file)?
            .ok_or_else(|| LinkError::NoRepository {
                path: file.to_path_buf(),
            })?;
        let file = fs::canonicalize(file)?;
        self.link_for_info(&info, &file, selection, link_type)
    }

    /// Like [`LinkService::link_for`] for callers that already know the repository.
    pub fn link_for_info(
        &self,
        info: &GitInfo,
        file: &Path,
        selection: Option<&Selection>,
        link_type: LinkType,
    ) -> Result<GeneratedLink, LinkError> {
        let handler = self
            .finder
            .find(info)
            .ok_or_else(|| LinkError::NoMatchingHandler {
                remote: info.remote_url.clone(),
            })?;

        let url = handler.make_url(self.git, info, file, selection, link_type)?;
        tracing::info!(handler = handler.name(), link_type = link_type.as_str(), "link created");

        Ok(GeneratedLink {
            url,
            handler: handler.name().to_string(),
        })
    }
}
