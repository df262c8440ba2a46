pub mod engine;
pub mod filter;
pub mod trends;

pub use engine::{QueryRun, Summary, query_index};
pub use filter::{Filters, Highlighted, KeywordDisplay, Match};
pub use trends::trends_link;
