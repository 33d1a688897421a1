use std::fs;
use std::path::Path;

use gitweblinks::domain::model::LinkType;
use gitweblinks::infra::git::{GitExecutor, GitInfoFinder};
use gitweblinks::{LinkError, LinkHandlerFinder, LinkService};

/// Serves `git config` from a fixed listing; the repository itself is real.
struct Remotes(&'static str);

impl GitExecutor for Remotes {
    fn execute(&self, _root: &Path, args: &[&str]) -> Result<String, LinkError> {
        match args {
            ["config", "--get-regexp", _] if self.0.is_empty() => Err(LinkError::GitCommand {
                command: "git config".into(),
                code: Some(1),
                stderr: String::new(),
            }),
            ["config", "--get-regexp", _] => Ok(self.0.into()),
            ["rev-parse", "HEAD"] => Ok("0123456789abcdef0123456789abcdef01234567".into()),
            ["symbolic-ref", "--short", "HEAD"] => Ok("main".into()),
            other => panic!("unexpected git call: {other:?}"),
        }
    }
}

#[test]
fn finds_root_and_prefers_origin() {
    let temp = tempfile::tempdir().expect("temp dir");
    gix::init(temp.path()).expect("init repository");
    let nested = temp.path().join("src/nested");
    fs::create_dir_all(&nested).expect("create dirs");
    let file = nested.join("lib.rs");
    fs::write(&file, "fn main() {}\n").expect("write file");

    let git = Remotes(
        "remote.upstream.url https://github.com/upstream/project.git\n\
         remote.origin.url git@github.com:me/project.git",
    );
    let info = GitInfoFinder::new(&git)
        .find(&file)
        .expect("discovery succeeds")
        .expect("repository found");

    assert_eq!(info.root_directory, fs::canonicalize(temp.path()).expect("canonical root"));
    assert_eq!(info.remote_url, "git@github.com:me/project.git");
}

#[test]
fn repositories_without_remotes_yield_nothing() {
    let temp = tempfile::tempdir().expect("temp dir");
    gix::init(temp.path()).expect("init repository");

    let info = GitInfoFinder::new(&Remotes("")).find(temp.path()).expect("discovery succeeds");
    assert!(info.is_none());
}

#[test]
fn links_files_in_a_real_working_tree() {
    let temp = tempfile::tempdir().expect("temp dir");
    gix::init(temp.path()).expect("init repository");
    fs::create_dir_all(temp.path().join("docs")).expect("create dirs");
    let file = temp.path().join("docs/guide.md");
    fs::write(&file, "# Guide\n").expect("write file");

    let git = Remotes("remote.origin.url https://gitlab.com/group/project.git");
    let finder = LinkHandlerFinder::default();
    let link = LinkService::new(&git, &finder)
        .link_for(&file, None, LinkType::Branch)
        .expect("link");

    assert_eq!(link.handler, "GitLab");
    assert_eq!(link.url, "https://gitlab.com/group/project/-/blob/main/docs/guide.md");
}
