//! Infrastructure adapters for git, config, and the clipboard.

pub mod clipboard;
pub mod config;
pub mod git;
