//! GitHub and GitHub Enterprise.

use super::{LinkHandler, server, url};
use crate::domain::model::{GitRef, Selection, ServerUrl};

const CLOUD_BASE_URL: &str = "https://github.com";
const CLOUD_SSH_URL: &str = "git@github.com";

/// Links of the form `https://github.com/owner/repo/blob/<ref>/<path>#L1-L2`.
#[derive(Debug, Clone)]
pub struct GitHubHandler {
    servers: Vec<ServerUrl>,
}

impl GitHubHandler {
    /// Handler for github.com plus any Enterprise instances, checked in the given order.
    pub fn new(enterprise: Vec<ServerUrl>) -> Self {
        let mut servers = enterprise;
        servers.push(ServerUrl::new(CLOUD_BASE_URL, CLOUD_SSH_URL));
        Self { servers }
    }
}

impl Default for GitHubHandler {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LinkHandler for GitHubHandler {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn matching_server(&self, remote_url: &str) -> Option<ServerUrl> {
        server::find_server(&self.servers, remote_url).cloned()
    }

    fn create_url(
        &self,
        base_url: &str,
        repository_path: &str,
        reference: &GitRef,
        relative_path: &str,
    ) -> String {
        url::path_segment_url(base_url, repository_path, "blob", reference, relative_path)
    }

    fn selection_suffix(&self, _relative_path: &str, selection: &Selection) -> String {
        if selection.is_single_line() {
            format!("#L{}", selection.start_line)
        } else {
            format!("#L{}-L{}", selection.start_line, selection.end_line)
        }
    }
}
