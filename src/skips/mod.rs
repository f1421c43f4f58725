//! Skip-hire listing
//!
//! This is the data side of the skip listing view: decoding the listing
//! JSON, pricing, search and size classes. Fetching the listing over HTTP is
//! left to whoever implements [`SkipSource`].

mod source;
mod types;

pub use source::{JsonFileSource, SkipSource};
pub use types::{filter_skips, format_price, parse_skips, SizeClass, Skip};
