//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior, including the static playlist, and helpers to load it from disk.

mod load;
mod schema;

pub use load::{default_library_root, default_log_path};
pub use schema::*;
