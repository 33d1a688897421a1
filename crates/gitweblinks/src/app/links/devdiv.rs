//! Microsoft's DevDiv project, which always lives at a single fixed address.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LinkHandler, server, url};
use crate::domain::errors::LinkError;
use crate::domain::model::{GitRef, Selection, ServerUrl};
use crate::infra::git::GitExecutor;

const BASE_URL: &str = "https://devdiv.visualstudio.com/DevDiv/_git";
const SSH_URL: &str = "devdiv@vs-ssh.visualstudio.com:v3/devdiv/DevDiv";

static REMOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<user>[^.@]+)@vs-ssh\.visualstudio\.com:v3/devdiv/DevDiv(?:/(?P<repo>.*?))?(?:\.git)?/?$")
        .expect("valid devdiv pattern")
});

/// VSTS grammar pinned to the DevDiv project, whatever user the remote names.
#[derive(Debug, Clone, Default)]
pub struct DevDivHandler;

impl DevDivHandler {
    pub fn new() -> Self {
        Self
    }
}

impl LinkHandler for DevDivHandler {
    fn name(&self) -> &'static str {
        "Microsoft DevDiv"
    }

    fn matching_server(&self, remote_url: &str) -> Option<ServerUrl> {
        REMOTE
            .is_match(&server::normalize_url(remote_url))
            .then(|| ServerUrl::new(BASE_URL, SSH_URL))
    }

    fn repository_path(&self, remote_url: &str, _server: &ServerUrl) -> Option<String> {
        let remote = server::normalize_url(remote_url);
        let captures = REMOTE.captures(&remote)?;
        captures
            .name("repo")
            .map(|repo| repo.as_str().trim_matches('/').to_string())
            .filter(|repo| !repo.is_empty())
    }

    fn current_branch(&self, git: &dyn GitExecutor, root: &Path) -> Result<String, LinkError> {
        git.execute(root, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn create_url(
        &self,
        base_url: &str,
        repository_path: &str,
        reference: &GitRef,
        relative_path: &str,
    ) -> String {
        url::query_string_url(base_url, repository_path, reference, relative_path)
    }

    fn selection_suffix(&self, _relative_path: &str, selection: &Selection) -> String {
        url::query_string_selection(selection)
    }
}
