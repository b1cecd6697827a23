//! Good Things Feed Aggregator
//!
//! Normalizes the user's own records and other people's items into display
//! rows. Other people's items arrive in several shapes; each accepted shape
//! is a [`FeedItem`] variant and [`FeedItem::resolve`] is the only place that
//! turns one into text.

use serde::Deserialize;

/// How many of the user's own records are shown
pub const OWN_ROWS_SHOWN: usize = 3;

/// One of the user's own good-things records
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OwnRecord {
    #[serde(default)]
    pub positives: Option<Vec<String>>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl OwnRecord {
    pub fn new(positives: Vec<String>) -> Self {
        Self {
            positives: Some(positives),
            ..Default::default()
        }
    }
}

/// Display row for one own record
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnRow {
    /// One line per positive statement
    Positives(Vec<String>),
    /// Record with nothing written in it
    Empty,
}

/// An item of other people's feed, in any shape the backend sends
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FeedItem {
    /// `{ "text": ..., "genre": ... }`
    Text {
        text: String,
        #[serde(default)]
        genre: Option<String>,
    },
    /// `{ "positives": [...] }`; the first statement is shown
    Positives { positives: Vec<String> },
    /// A bare string
    Bare(String),
    /// Anything else; always dropped
    Unrecognized(serde_json::Value),
}

/// A normalized feed entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayEntry {
    pub text: String,
    pub genre: Option<String>,
}

impl DisplayEntry {
    pub fn new(text: impl Into<String>, genre: Option<&str>) -> Self {
        Self {
            text: text.into(),
            genre: genre.map(str::to_string),
        }
    }
}

impl FeedItem {
    /// Resolve to a display entry, or `None` when there is no text to show.
    pub fn resolve(self) -> Option<DisplayEntry> {
        let (text, genre) = match self {
            FeedItem::Text { text, genre } => (text, genre),
            FeedItem::Positives { positives } => (positives.into_iter().next()?, None),
            FeedItem::Bare(text) => (text, None),
            FeedItem::Unrecognized(_) => return None,
        };

        if text.is_empty() {
            return None;
        }

        Some(DisplayEntry {
            text,
            genre: genre.filter(|g| !g.is_empty()),
        })
    }
}

impl From<&str> for FeedItem {
    fn from(text: &str) -> Self {
        FeedItem::Bare(text.to_string())
    }
}

/// Last [`OWN_ROWS_SHOWN`] records, newest first.
pub fn normalize_own(rows: &[OwnRecord]) -> Vec<OwnRow> {
    let skip = rows.len().saturating_sub(OWN_ROWS_SHOWN);

    rows[skip..]
        .iter()
        .rev()
        .map(|row| match row.positives.as_deref() {
            Some(positives) if !positives.is_empty() => OwnRow::Positives(positives.to_vec()),
            _ => OwnRow::Empty,
        })
        .collect()
}

/// Resolve other people's items in input order, skipping empty ones.
pub fn normalize_others<I>(items: I) -> Vec<DisplayEntry>
where
    I: IntoIterator<Item = FeedItem>,
{
    let mut dropped = 0usize;
    let entries: Vec<DisplayEntry> = items
        .into_iter()
        .filter_map(|item| {
            let entry = item.resolve();
            if entry.is_none() {
                dropped += 1;
            }
            entry
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(dropped, kept = entries.len(), "Skipped feed items without text");
    }

    entries
}
