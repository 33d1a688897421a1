use std::path::{Path, PathBuf};

use gitweblinks::domain::model::{GitInfo, LinkType, Selection, ServerKind, ServerProvider, ServerUrl};
use gitweblinks::infra::git::GitExecutor;
use gitweblinks::{LinkError, LinkHandlerFinder, LinkService};
use insta::assert_snapshot;

const HASH: &str = "5e7c1a2b9d8f4e3c6b5a4d3c2b1a09f8e7d6c5b4";

struct FixedGit;

impl GitExecutor for FixedGit {
    fn execute(&self, _root: &Path, args: &[&str]) -> Result<String, LinkError> {
        match args {
            ["symbolic-ref", "--short", "HEAD"] | ["rev-parse", "--abbrev-ref", "HEAD"] => {
                Ok("master".into())
            }
            ["rev-parse", "HEAD"] => Ok(HASH.into()),
            other => Err(LinkError::GitCommand {
                command: format!("git {}", other.join(" ")),
                code: Some(128),
                stderr: "not stubbed".into(),
            }),
        }
    }
}

struct Corp;

impl ServerProvider for Corp {
    fn servers(&self, kind: ServerKind) -> Vec<ServerUrl> {
        match kind {
            ServerKind::GitHubEnterprise => vec![ServerUrl::new("https://github.corp", "git@github.corp")],
            ServerKind::GitLab => vec![ServerUrl::new("https://gitlab.corp", "git@gitlab.corp")],
            ServerKind::BitbucketServer => {
                vec![ServerUrl::new("https://bitbucket.corp", "ssh://git@bitbucket.corp:7999")]
            }
            ServerKind::AzureDevOpsServer => vec![ServerUrl::new("https://tfs.corp/tfs", "ssh://tfs.corp:22/tfs")],
        }
    }
}

fn root() -> PathBuf {
    PathBuf::from("/work/repo")
}

fn link(remote: &str, relative: &str, selection: Option<Selection>, link_type: LinkType) -> String {
    let finder = LinkHandlerFinder::new(&Corp);
    let info = GitInfo {
        root_directory: root(),
        remote_url: remote.into(),
    };
    LinkService::new(&FixedGit, &finder)
        .link_for_info(&info, &root().join(relative), selection.as_ref(), link_type)
        .expect("link")
        .url
}

#[test]
fn github_links() {
    assert_snapshot!(
        link(
            "git@github.com:dotnet/corefx.git",
            "src/System.IO.FileSystem/src/System/IO/Directory.cs",
            Some(Selection::lines(38, 49)),
            LinkType::Branch,
        ),
        @"https://github.com/dotnet/corefx/blob/master/src/System.IO.FileSystem/src/System/IO/Directory.cs#L38-L49"
    );
    assert_snapshot!(
        link("https://github.corp/team/app.git", "README.md", Some(Selection::lines(4, 4)), LinkType::Branch),
        @"https://github.corp/team/app/blob/master/README.md#L4"
    );
}

#[test]
fn gitlab_links() {
    assert_snapshot!(
        link("git@gitlab.corp:group/sub/app.git", "lib/a b.rs", Some(Selection::lines(7, 9)), LinkType::Branch),
        @"https://gitlab.corp/group/sub/app/-/blob/master/lib/a%20b.rs#L7-9"
    );
}

#[test]
fn bitbucket_links() {
    assert_snapshot!(
        link("git@bitbucket.org:atlassian/stash.git", "lib/parser.py", Some(Selection::lines(10, 12)), LinkType::Branch),
        @"https://bitbucket.org/atlassian/stash/src/master/lib/parser.py#lines-10:12"
    );
    assert_snapshot!(
        link("ssh://git@bitbucket.corp:7999/PROJ/app.git", "src/App.java", Some(Selection::lines(3, 5)), LinkType::Branch),
        @"https://bitbucket.corp/projects/PROJ/repos/app/browse/src/App.java?at=refs%2Fheads%2Fmaster#3-5"
    );
}

#[test]
fn azure_devops_links() {
    assert_snapshot!(
        link("https://dev.azure.com/contoso/Fabrikam/_git/Web", "src/file.cs", Some(Selection::lines(2, 2)), LinkType::Branch),
        @"https://dev.azure.com/contoso/Fabrikam/_git/Web?path=%2Fsrc%2Ffile.cs&version=GBmaster&line=2"
    );
    assert_snapshot!(
        link("https://tfs.corp/tfs/DefaultCollection/Project/_git/Repo", "src/file.cs", None, LinkType::Hash),
        @"https://tfs.corp/tfs/DefaultCollection/Project/_git/Repo?path=%2Fsrc%2Ffile.cs&version=GC5e7c1a2b9d8f4e3c6b5a4d3c2b1a09f8e7d6c5b4"
    );
}

#[test]
fn vsts_links() {
    assert_snapshot!(
        link(
            "ssh://foo@vs-ssh.visualstudio.com:22/DefaultCollection/Child/_ssh/MyRepo",
            "src/file.cs",
            Some(Selection::lines(1, 3)),
            LinkType::Branch,
        ),
        @"https://foo.visualstudio.com/DefaultCollection/Child/_git/MyRepo?path=%2Fsrc%2Ffile.cs&version=GBmaster&line=1&lineEnd=3"
    );
}

#[test]
fn hash_links_pin_the_commit() {
    assert_snapshot!(
        link("https://github.com/dotnet/corefx.git", "README.md", None, LinkType::Hash),
        @"https://github.com/dotnet/corefx/blob/5e7c1a2b9d8f4e3c6b5a4d3c2b1a09f8e7d6c5b4/README.md"
    );
}

#[test]
fn unknown_providers_are_reported() {
    let finder = LinkHandlerFinder::new(&Corp);
    let info = GitInfo {
        root_directory: root(),
        remote_url: "https://codeplex.com/foo/bar.git".into(),
    };
    let err = LinkService::new(&FixedGit, &finder)
        .link_for_info(&info, &root().join("README.md"), None, LinkType::Hash)
        .unwrap_err();
    assert!(matches!(err, LinkError::NoMatchingHandler { .. }));
}
