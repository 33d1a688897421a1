//! Bitbucket Cloud (bitbucket.org).

use super::{LinkHandler, server, url};
use crate::domain::model::{GitRef, Selection, ServerUrl};

const BASE_URL: &str = "https://bitbucket.org";
const SSH_URL: &str = "git@bitbucket.org";

#[derive(Debug, Clone)]
pub struct BitbucketCloudHandler {
    servers: [ServerUrl; 1],
}

impl BitbucketCloudHandler {
    pub fn new() -> Self {
        Self {
            servers: [ServerUrl::new(BASE_URL, SSH_URL)],
        }
    }
}

impl Default for BitbucketCloudHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkHandler for BitbucketCloudHandler {
    fn name(&self) -> &'static str {
        "Bitbucket Cloud"
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
        url::path_segment_url(base_url, repository_path, "src", reference, relative_path)
    }

    fn selection_suffix(&self, _relative_path: &str, selection: &Selection) -> String {
        if selection.is_single_line() {
            format!("#lines-{}", selection.start_line)
        } else {
            format!("#lines-{}:{}", selection.start_line, selection.end_line)
        }
    }
}
