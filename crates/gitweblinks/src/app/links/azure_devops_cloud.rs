//! Azure DevOps Services (dev.azure.com and `<org>.visualstudio.com`).

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LinkHandler, server, url};
use crate::domain::model::{GitRef, Selection, ServerUrl};

static DEV_AZURE_HTTP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://dev\.azure\.com/(?P<org>[^/]+)/(?P<project>[^/]+)/_git/[^/]+/?$")
        .expect("valid dev.azure.com http pattern")
});
static DEV_AZURE_SSH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@ssh\.dev\.azure\.com:v3/(?P<org>[^/]+)/(?P<project>[^/]+)/[^/]+/?$")
        .expect("valid dev.azure.com ssh pattern")
});
// `vs-ssh.visualstudio.com` remotes are left to the VSTS and DevDiv handlers.
static VISUAL_STUDIO_HTTP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(?P<org>[^./]+)\.visualstudio\.com/(?P<project>[^/]+)/_git/[^/]+/?$")
        .expect("valid visualstudio.com http pattern")
});

/// Query-string links: `<base>/<repo>?path=%2F<path>&version=GB<branch>&line=1&lineEnd=2`.
#[derive(Debug, Clone, Default)]
pub struct AzureDevOpsCloudHandler;

impl AzureDevOpsCloudHandler {
    pub fn new() -> Self {
        Self
    }
}

impl LinkHandler for AzureDevOpsCloudHandler {
    fn name(&self) -> &'static str {
        "Azure DevOps"
    }

    fn matching_server(&self, remote_url: &str) -> Option<ServerUrl> {
        let remote = server::normalize_url(remote_url);

        if let Some(captures) = DEV_AZURE_HTTP
            .captures(&remote)
            .or_else(|| DEV_AZURE_SSH.captures(&remote))
        {
            let (org, project) = (&captures["org"], &captures["project"]);
            return Some(ServerUrl::new(
                format!("https://dev.azure.com/{org}/{project}/_git"),
                format!("git@ssh.dev.azure.com:v3/{org}/{project}"),
            ));
        }

        let captures = VISUAL_STUDIO_HTTP.captures(&remote)?;
        let (org, project) = (&captures["org"], &captures["project"]);
        Some(ServerUrl::new(
            format!("https://{org}.visualstudio.com/{project}/_git"),
            format!("{org}@vs-ssh.visualstudio.com:v3/{org}/{project}"),
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
