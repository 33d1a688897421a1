//! Remote URL normalization and matching against known servers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::ServerUrl;

static SSH_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^/:]+):\d+(/|$)").expect("valid ssh port pattern"));
static SSH_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^/:]+)/").expect("valid ssh path pattern"));
static HTTP_USER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://)[^@/]+@").expect("valid http user pattern"));

/// Bring a remote or server URL into a canonical shape for prefix matching.
///
/// `ssh://user@host:22/owner/repo` becomes `user@host:owner/repo`, credentials are
/// removed from HTTP URLs, and one trailing `/` or `:` is dropped.
///
/// `ssh://` URLs may also be written scp-style (`ssh://git@host:owner/repo`). An
/// all-digit segment after the colon is always read as a port, so an scp-style
/// remote whose owner is purely numeric loses its owner. Use `git@host:123/repo`
/// for such owners.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let normalized = match url.strip_prefix("ssh://") {
        Some(rest) => {
            let without_port = SSH_PORT.replace(rest, "${1}${2}");
            SSH_PATH.replace(&without_port, "${1}:").into_owned()
        }
        None => HTTP_USER.replace(url, "${1}").into_owned(),
    };
    strip_trailing_separator(&normalized).to_string()
}

fn strip_trailing_separator(url: &str) -> &str {
    url.strip_suffix('/')
        .or_else(|| url.strip_suffix(':'))
        .unwrap_or(url)
}

/// The repository path of `remote_url` relative to `server`, if the remote lives there.
///
/// The path has no leading separator and no `.git` suffix.
pub fn repository_path(server: &ServerUrl, remote_url: &str) -> Option<String> {
    let remote = normalize_url(remote_url);
    [&server.base_url, &server.ssh_url]
        .into_iter()
        .map(|prefix| normalize_url(prefix))
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| strip_server_prefix(&prefix, &remote))
}

fn strip_server_prefix(prefix: &str, remote: &str) -> Option<String> {
    let pattern = format!(r"^{}[/:]+(?P<path>.+?)(?:\.git)?/*$", regex::escape(prefix));
    let grammar = Regex::new(&pattern).ok()?;
    let captures = grammar.captures(remote)?;
    Some(captures["path"].to_string())
}

/// First server in `servers` that `remote_url` belongs to.
pub fn find_server<'a>(servers: &'a [ServerUrl], remote_url: &str) -> Option<&'a ServerUrl> {
    servers
        .iter()
        .find(|server| repository_path(server, remote_url).is_some())
}
