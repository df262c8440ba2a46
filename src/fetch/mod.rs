//! Registry download.
//!
//! - [`progress`] - Progress line rendering and sinks
//! - [`download`] - Streaming fetch of the bulk document into the cache

pub mod download;
pub mod progress;

pub use download::{Download, HttpRegistry, RegistrySource, fetch};
pub use progress::{NoProgress, ProgressSink, TerminalProgress, format_bytes, render_progress};
