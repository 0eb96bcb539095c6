//! Search and filter engine for the tool catalog.
//!
//! - [`fuzzy_index`] - Weighted, typo-tolerant ranked search
//! - [`filter`] - Exact filter predicates (text, platform, pricing, tags)
//! - [`sort`] - Ranking policies for filtered lists
//!
//! Everything here is synchronous and pure over the tool slice it is given.

pub mod filter;
pub mod fuzzy_index;
pub mod sort;

pub use filter::{FilterCriteria, FilterDimension, filter_tools, matches};
pub use fuzzy_index::{
    DEFAULT_THRESHOLD, FuzzySearchIndex, MAX_QUERY_CHARS, MAX_RESULTS, SearchField, SearchHit,
    normalize_query,
};
pub use sort::{SortStrategy, sort_tools};
