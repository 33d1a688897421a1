//! Value types and errors shared by every layer.

pub mod errors;
pub mod model;
