//! # npm-locate - Local npm package lookup
//!
//! npm-locate downloads the registry's bulk listing once, compacts it into a
//! flat line-oriented index, and answers name, description and keyword
//! queries by streaming that index.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`fetch`] - Streaming download of the bulk document with progress
//! - [`index`] - Record encoding and index building
//! - [`query`] - Predicates and the streaming query engine
//! - [`output`] - Colored result formatting
//! - [`utils`] - Cache directory, config and atomic file replacement
//!
//! ## Quick Start
//!
//! ```no_run
//! use npm_locate::query::{query_index, Filters};
//! use npm_locate::utils::CacheDir;
//!
//! let cache = CacheDir::resolve(None)?;
//! let filters = Filters::new().keywords(Some("cli,color"));
//!
//! let mut run = query_index(&cache.index_path(), &filters)?;
//! for m in run.by_ref() {
//!     println!("{}", m?.name.text);
//! }
//! println!("{} found", run.finish()?.total);
//! # Ok::<(), npm_locate::Error>(())
//! ```
//!
//! ## Index format
//!
//! One package per line, `name |description |kw1,kw2`. Every `|` inside a
//! field is written as `\|` and line breaks are removed, so the two-byte
//! delimiter `" |"` only ever separates fields. Each build writes a complete
//! new file and renames it over the old one.

pub mod error;
pub mod fetch;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
