//! Putting a generated link on the system clipboard.

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

/// Where a copied link ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyBackend {
    System,
    Command(&'static str),
}

impl fmt::Display for CopyBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyBackend::System => f.write_str("system clipboard"),
            CopyBackend::Command(program) => f.write_str(program),
        }
    }
}

/// Copy `link` using the native clipboard, then the platform's clipboard tools.
pub fn copy_link(link: &str) -> Result<CopyBackend> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(link.to_owned())) {
        Ok(()) => return Ok(CopyBackend::System),
        Err(err) => tracing::debug!(error = %err, "native clipboard unavailable"),
    }

    for command in fallback_commands() {
        match pipe_to(command, link) {
            Ok(()) => return Ok(CopyBackend::Command(command[0])),
            Err(err) => tracing::debug!(program = command[0], error = %err, "clipboard command failed"),
        }
    }

    bail!("no clipboard backend accepted the link")
}

fn pipe_to(command: &[&str], text: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("clipboard command missing program")?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    child
        .stdin
        .take()
        .context("clipboard command has no stdin")?
        .write_all(text.as_bytes())
        .with_context(|| format!("failed to write link to {program}"))?;

    let status = child
        .wait()
        .with_context(|| format!("{program} did not exit cleanly"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["wl-copy"], &["xclip", "-selection", "clipboard"], &["xsel", "--clipboard", "--input"]]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[]
}
