//! Web search adapters.

mod travily_web_search;

pub use travily_web_search::{TravilyConfig, TravilyWebSearch, TRAVILY_SEARCH_URL};
