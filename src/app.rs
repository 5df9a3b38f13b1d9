//! Application module: UI-only state kept next to the playback controller.
//!
//! The `App` model lives in `app::model`. It never holds playback state of its
//! own; that is always read from the controller snapshot.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
