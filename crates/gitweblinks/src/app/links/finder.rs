//! Selecting the handler for a remote.

use super::{
    AzureDevOpsCloudHandler, AzureDevOpsServerHandler, BitbucketCloudHandler,
    BitbucketServerHandler, DevDivHandler, GitHubHandler, GitLabHandler, LinkHandler,
    VisualStudioTeamServicesHandler,
};
use crate::domain::model::{GitInfo, NoCustomServers, ServerKind, ServerProvider};

/// Tries each handler in a fixed priority order; the first match wins.
pub struct LinkHandlerFinder {
    handlers: Vec<Box<dyn LinkHandler>>,
}

impl LinkHandlerFinder {
    /// Build the default handler list, wiring in user-configured servers.
    pub fn new(servers: &dyn ServerProvider) -> Self {
        Self::with_handlers(vec![
            Box::new(AzureDevOpsCloudHandler::new()),
            Box::new(AzureDevOpsServerHandler::new(
                servers.servers(ServerKind::AzureDevOpsServer),
            )),
            Box::new(BitbucketCloudHandler::new()),
            Box::new(BitbucketServerHandler::new(
                servers.servers(ServerKind::BitbucketServer),
            )),
            Box::new(GitHubHandler::new(
                servers.servers(ServerKind::GitHubEnterprise),
            )),
            Box::new(GitLabHandler::new(servers.servers(ServerKind::GitLab))),
            Box::new(VisualStudioTeamServicesHandler::new()),
            Box::new(DevDivHandler::new()),
        ])
    }

    pub fn with_handlers(handlers: Vec<Box<dyn LinkHandler>>) -> Self {
        Self { handlers }
    }

    /// Handlers in the order they are tried.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn LinkHandler> {
        self.handlers.iter().map(|handler| handler.as_ref())
    }

    pub fn find(&self, info: &GitInfo) -> Option<&dyn LinkHandler> {
        self.find_for_remote(&info.remote_url)
    }

    pub fn find_for_remote(&self, remote_url: &str) -> Option<&dyn LinkHandler> {
        tracing::debug!(remote = remote_url, "finding a handler");

        for handler in self.handlers() {
            tracing::debug!(handler = handler.name(), "testing handler");
            if handler.is_match(remote_url) {
                tracing::debug!(handler = handler.name(), "handler is a match");
                return Some(handler);
            }
        }

        tracing::debug!(remote = remote_url, "no handler found");
        None
    }
}

impl Default for LinkHandlerFinder {
    fn default() -> Self {
        Self::new(&NoCustomServers)
    }
}
