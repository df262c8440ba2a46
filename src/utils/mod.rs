//! Shared plumbing for the fetch, build and query stages.
//!
//! - [`cache_dir`] - Cache directory layout and `config.json`
//! - [`atomic`] - Write-then-rename file replacement
//! - [`progress`] - Spinners for long-running build phases

pub mod atomic;
pub mod cache_dir;
pub mod progress;

pub use atomic::AtomicFile;
pub use cache_dir::{AppConfig, CacheDir};
