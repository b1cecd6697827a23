//! Good Things Feed
//!
//! Own records and other people's entries, normalized for display.

pub mod aggregator;

pub use aggregator::{
    normalize_others, normalize_own, DisplayEntry, FeedItem, OwnRecord, OwnRow, OWN_ROWS_SHOWN,
};
