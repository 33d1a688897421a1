//! Domain-specific errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("cannot produce a link here: {} is not inside a git repository with a remote", path.display())]
    NoRepository { path: PathBuf },

    #[error("unsupported hosting provider for remote '{remote}'")]
    NoMatchingHandler { remote: String },

    #[error("{handler} does not recognize the remote '{remote}'")]
    NoMatchingServer {
        handler: &'static str,
        remote: String,
    },

    #[error("{} is outside of the repository at {}", file.display(), root.display())]
    FileOutsideRepository { file: PathBuf, root: PathBuf },

    #[error("`{command}` failed ({}): {stderr}", describe_exit(*code))]
    GitCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to run git: {0}")]
    GitUnavailable(#[source] std::io::Error),

    #[error("failed to discover repository: {0}")]
    Discover(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
