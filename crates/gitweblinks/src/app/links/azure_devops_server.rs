//! Self-hosted Azure DevOps Server (formerly TFS).

use super::{LinkHandler, server, url};
use crate::domain::model::{GitRef, Selection, ServerUrl};

/// Same query-string grammar as the cloud service, against configured servers.
#[derive(Debug, Clone, Default)]
pub struct AzureDevOpsServerHandler {
    servers: Vec<ServerUrl>,
}

impl AzureDevOpsServerHandler {
    pub fn new(servers: Vec<ServerUrl>) -> Self {
        Self { servers }
    }
}

impl LinkHandler for AzureDevOpsServerHandler {
    fn name(&self) -> &'static str {
        "Azure DevOps Server"
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
        url::query_string_url(base_url, repository_path, reference, relative_path)
    }

    fn selection_suffix(&self, _relative_path: &str, selection: &Selection) -> String {
        url::query_string_selection(selection)
    }
}
