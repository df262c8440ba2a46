pub mod build;
pub mod encoding;
pub mod types;

pub use build::{build_from_cache, build_index};
pub use encoding::{IndexLine, decode_line, encode_record, escape};
pub use types::*;
