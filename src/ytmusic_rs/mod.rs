//! Minimal client for the YouTube Music web API ("InnerTube").
//!
//! Only the search endpoint is implemented. Requests impersonate the
//! `WEB_REMIX` web client, which does not need authentication for search.

pub mod parse;
pub mod search;

pub use parse::parse_search_response;
pub use search::{InnerTubeContext, search};
