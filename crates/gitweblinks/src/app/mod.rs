//! Application layer: provider handlers and the link service built on them.

pub mod links;
pub mod service;
