//! Self-hosted Bitbucket Server / Data Center.

use super::{LinkHandler, server, url};
use crate::domain::model::{GitRef, Selection, ServerUrl};

/// Links of the form `<base>/projects/<PROJ>/repos/<repo>/browse/<path>?at=<ref>#1-2`.
///
/// Only user-configured servers are recognized; there is no public instance.
#[derive(Debug, Clone, Default)]
pub struct BitbucketServerHandler {
    servers: Vec<ServerUrl>,
}

impl BitbucketServerHandler {
    pub fn new(servers: Vec<ServerUrl>) -> Self {
        Self { servers }
    }
}

impl LinkHandler for BitbucketServerHandler {
    fn name(&self) -> &'static str {
        "Bitbucket Server"
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
        // HTTP clone URLs carry an `scm/` prefix that the browse URLs do not.
        let path = repository_path
            .strip_prefix("scm/")
            .unwrap_or(repository_path);
        let (owner, repository) = path.rsplit_once('/').unwrap_or(("", path));
        let owner = match owner.strip_prefix('~') {
            Some(user) => format!("users/{}", url::encode_component(user)),
            None => format!("projects/{}", url::encode_component(owner)),
        };

        let at = match reference {
            GitRef::Branch(branch) => url::encode_component(&format!("refs/heads/{branch}")),
            GitRef::Commit(hash) => url::encode_component(hash),
        };

        format!(
            "{}/repos/{}/browse/{}?at={at}",
            url::join(base_url, &owner),
            url::encode_component(repository),
            url::encode_segments(relative_path)
        )
    }

    fn selection_suffix(&self, _relative_path: &str, selection: &Selection) -> String {
        if selection.is_single_line() {
            format!("#{}", selection.start_line)
        } else {
            format!("#{}-{}", selection.start_line, selection.end_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::links::testing::{HASH, StubGit, file, info};
    use crate::domain::model::LinkType;

    fn handler() -> BitbucketServerHandler {
        BitbucketServerHandler::new(vec![ServerUrl::new(
            "https://bitbucket.corp/",
            "ssh://git@bitbucket.corp:7999",
        )])
    }

    fn make(remote: &str, selection: Option<Selection>, link_type: LinkType) -> String {
        handler()
            .make_url(
                &StubGit::on_branch("feature/login"),
                &info(remote),
                &file("src/main/App.java"),
                selection.as_ref(),
                link_type,
            )
            .unwrap()
    }

    #[test]
    fn only_matches_configured_servers() {
        assert!(handler().is_match("https://bitbucket.corp/scm/PROJ/app.git"));
        assert!(handler().is_match("ssh://git@bitbucket.corp:7999/PROJ/app.git"));
        assert!(!handler().is_match("https://bitbucket.org/PROJ/app.git"));
        assert!(!BitbucketServerHandler::default().is_match("https://bitbucket.corp/scm/PROJ/app.git"));
    }

    #[test]
    fn https_and_ssh_remotes_produce_the_same_link() {
        let expected = "https://bitbucket.corp/projects/PROJ/repos/app/browse/src/main/App.java?at=refs%2Fheads%2Ffeature%2Flogin";
        assert_eq!(make("https://bitbucket.corp/scm/PROJ/app.git", None, LinkType::Branch), expected);
        assert_eq!(make("ssh://git@bitbucket.corp:7999/PROJ/app.git", None, LinkType::Branch), expected);
    }

    #[test]
    fn encodes_spaces_in_browse_path() {
        let url = handler()
            .make_url(
                &StubGit::on_branch("main"),
                &info("https://bitbucket.corp/scm/PROJ/app.git"),
                &file("src/sub dir/App Main.java"),
                Some(&Selection::lines(3, 3)),
                LinkType::Branch,
            )
            .unwrap();
        assert_eq!(
            url,
            "https://bitbucket.corp/projects/PROJ/repos/app/browse/src/sub%20dir/App%20Main.java?at=refs%2Fheads%2Fmain#3"
        );
    }

    #[test]
    fn personal_repositories_use_users_path() {
        assert_eq!(
            make("ssh://git@bitbucket.corp:7999/~jdoe/scratch.git", None, LinkType::Hash),
            format!("https://bitbucket.corp/users/jdoe/repos/scratch/browse/src/main/App.java?at={HASH}")
        );
    }

    #[test]
    fn selection_is_a_bare_fragment() {
        let remote = "https://bitbucket.corp/scm/PROJ/app.git";
        assert!(make(remote, Some(Selection::lines(10, 10)), LinkType::Hash).ends_with("#10"));
        assert!(make(remote, Some(Selection::lines(10, 20)), LinkType::Hash).ends_with("#10-20"));
    }
}
