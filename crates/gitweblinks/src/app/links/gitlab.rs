//! GitLab.com and self-managed GitLab.

use super::{LinkHandler, server, url};
use crate::domain::model::{GitRef, Selection, ServerUrl};

const CLOUD_BASE_URL: &str = "https://gitlab.com";
const CLOUD_SSH_URL: &str = "git@gitlab.com";

/// Links of the form `https://gitlab.com/group/sub/repo/-/blob/<ref>/<path>#L1-2`.
#[derive(Debug, Clone)]
pub struct GitLabHandler {
    servers: Vec<ServerUrl>,
}

impl GitLabHandler {
    pub fn new(self_managed: Vec<ServerUrl>) -> Self {
        let mut servers = self_managed;
        servers.push(ServerUrl::new(CLOUD_BASE_URL, CLOUD_SSH_URL));
        Self { servers }
    }
}

impl Default for GitLabHandler {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LinkHandler for GitLabHandler {
    fn name(&self) -> &'static str {
        "GitLab"
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
        url::path_segment_url(base_url, repository_path, "-/blob", reference, relative_path)
    }

    fn selection_suffix(&self, _relative_path: &str, selection: &Selection) -> String {
        if selection.is_single_line() {
            format!("#L{}", selection.start_line)
        } else {
            format!("#L{}-{}", selection.start_line, selection.end_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::links::testing::{HASH, StubGit, file, info};
    use crate::domain::model::LinkType;

    fn make(handler: &GitLabHandler, remote: &str, selection: Option<Selection>, link_type: LinkType) -> String {
        handler
            .make_url(
                &StubGit::on_branch("main"),
                &info(remote),
                &file("src/app/main file.rs"),
                selection.as_ref(),
                link_type,
            )
            .unwrap()
    }

    #[test]
    fn matches_cloud_and_self_managed() {
        let handler = GitLabHandler::new(vec![ServerUrl::new("https://gitlab.corp/", "git@gitlab.corp")]);
        assert!(handler.is_match("https://gitlab.com/group/project.git"));
        assert!(handler.is_match("git@gitlab.com:group/sub/project.git"));
        assert!(handler.is_match("ssh://git@gitlab.corp:2222/group/project.git"));
        assert!(handler.is_match("https://gitlab.corp/group/project.git"));
        assert!(!handler.is_match("https://github.com/group/project.git"));
    }

    #[test]
    fn keeps_nested_groups() {
        assert_eq!(
            make(&GitLabHandler::default(), "git@gitlab.com:group/sub/project.git", None, LinkType::Branch),
            "https://gitlab.com/group/sub/project/-/blob/main/src/app/main%20file.rs"
        );
    }

    #[test]
    fn selection_uses_bare_end_line() {
        let handler = GitLabHandler::default();
        let remote = "https://gitlab.com/group/project.git";
        assert!(make(&handler, remote, Some(Selection::lines(7, 7)), LinkType::Branch).ends_with("#L7"));
        assert!(make(&handler, remote, Some(Selection::lines(7, 12)), LinkType::Branch).ends_with("#L7-12"));
    }

    #[test]
    fn hash_links_use_commit() {
        assert_eq!(
            make(&GitLabHandler::default(), "https://gitlab.com/group/project.git", None, LinkType::Hash),
            format!("https://gitlab.com/group/project/-/blob/{HASH}/src/app/main%20file.rs")
        );
    }
}
