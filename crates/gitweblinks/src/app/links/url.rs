//! URL assembly helpers shared by the provider handlers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::domain::model::{GitRef, Selection};

/// Characters left untouched by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single URL component; `/` is encoded.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-encode every `/`-separated segment, keeping the separators.
pub fn encode_segments(value: &str) -> String {
    value
        .split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a base URL and a repository path with exactly one `/`.
pub fn join(base_url: &str, repository_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        repository_path.trim_start_matches('/')
    )
}

/// `<base>/<repo>/<verb>/<ref>/<path>` used by GitHub-like providers.
pub fn path_segment_url(
    base_url: &str,
    repository_path: &str,
    verb: &str,
    reference: &GitRef,
    relative_path: &str,
) -> String {
    format!(
        "{}/{verb}/{}/{}",
        join(base_url, repository_path),
        encode_segments(reference.name()),
        encode_segments(relative_path)
    )
}

/// `<base>/<repo>?path=%2F<path>&version=GB<branch>` used by the Azure DevOps family.
pub fn query_string_url(
    base_url: &str,
    repository_path: &str,
    reference: &GitRef,
    relative_path: &str,
) -> String {
    let marker = if reference.is_branch() { "GB" } else { "GC" };
    format!(
        "{}?path=%2F{}&version={marker}{}",
        join(base_url, repository_path),
        encode_component(relative_path),
        encode_component(reference.name())
    )
}

/// `&line=<start>[&lineEnd=<end>]`
pub fn query_string_selection(selection: &Selection) -> String {
    if selection.is_single_line() {
        format!("&line={}", selection.start_line)
    } else {
        format!(
            "&line={}&lineEnd={}",
            selection.start_line, selection.end_line
        )
    }
}
