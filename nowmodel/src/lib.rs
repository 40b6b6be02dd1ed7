//! Data model for the now-playing overlay.
//!
//! This crate holds the pure types shared by the sources and the widget
//! core: playback snapshots, overlay settings and label resolution.
//! No I/O happens here.

pub mod settings;
pub mod snapshot;

pub use settings::{LabelField, OverlaySettings};
pub use snapshot::TrackSnapshot;
