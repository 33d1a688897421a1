//! Visual Studio Team Services, the predecessor of Azure DevOps.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LinkHandler, server, url};
use crate::domain::model::{GitRef, Selection, ServerUrl};

static HTTP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(?P<user>[^./@]+)\.visualstudio\.com/(?:(?P<collection>.+)/)?_git/")
        .expect("valid vsts http pattern")
});
static SSH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ssh://(?P<user>[^@/]+)@vs-ssh\.visualstudio\.com:22/(?:(?P<collection>.+)/)?_ssh/")
        .expect("valid vsts ssh pattern")
});

/// Remotes on `<user>.visualstudio.com`, optionally nested under a collection.
#[derive(Debug, Clone, Default)]
pub struct VisualStudioTeamServicesHandler;

impl VisualStudioTeamServicesHandler {
    pub fn new() -> Self {
        Self
    }
}

impl LinkHandler for VisualStudioTeamServicesHandler {
    fn name(&self) -> &'static str {
        "Visual Studio Team Services"
    }

    fn matching_server(&self, remote_url: &str) -> Option<ServerUrl> {
        let normalized = server::normalize_url(remote_url);
        let captures = HTTP
            .captures(&normalized)
            .or_else(|| SSH.captures(remote_url.trim()))?;

        let user = &captures["user"];
        let collection = captures
            .name("collection")
            .map(|collection| format!("/{}", collection.as_str()))
            .unwrap_or_default();

        Some(ServerUrl::new(
            format!("https://{user}.visualstudio.com{collection}/_git"),
            format!("ssh://{user}@vs-ssh.visualstudio.com:22{collection}/_ssh"),
        ))
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
