//! Track metadata and the playlist the controller traverses.
//!
//! Tracks come from static configuration (`[[playlist]]` entries), from a
//! directory scan, or from the built-in playlist shipped with the binary.

mod builtin;
mod display;
mod model;
mod scan;

pub use builtin::builtin_playlist;
pub use display::track_label;
pub use model::*;
pub use scan::scan;
