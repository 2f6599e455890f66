//! Leaf source resolution.
//!
//! Leaves come either from structured page data (a JSON list whose entries are
//! `{"img": .., "backImg": ..}` objects or `[front, back]` pairs) or from the
//! host's child markup (`img-src` / `back-img-src` attributes). Structured data
//! wins when it parses; when it does not, the markup-derived sequence is used
//! and the failure is only logged.

use alloc::{string::String, vec::Vec};
use core::fmt;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use super::LeafSequence;

/// Attribute carrying the front image of a markup leaf.
pub const FRONT_ATTRIBUTE: &str = "img-src";
/// Attribute carrying the back image of a markup leaf.
pub const BACK_ATTRIBUTE: &str = "back-img-src";

/// Why structured page data could not be turned into leaves.
#[derive(Debug)]
pub enum SourceError {
    /// The text was not valid JSON.
    Json(serde_json::Error),
    /// Valid JSON, but not a list of pages.
    NotAList,
    /// The entry at `index` is neither a page object nor a `[front, back]` pair.
    Entry { index: usize },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "page data is not valid JSON: {err}"),
            Self::NotAList => f.write_str("page data is not a list"),
            Self::Entry { index } => write!(f, "page entry {index} is malformed"),
        }
    }
}

impl core::error::Error for SourceError {}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageEntry {
    Pair(String, String),
    Object {
        #[serde(default, alias = "front")]
        img: String,
        #[serde(default, rename = "backImg", alias = "back")]
        back_img: String,
    },
}

impl PageEntry {
    fn into_pair(self) -> (String, String) {
        match self {
            Self::Pair(front, back) => (front, back),
            Self::Object { img, back_img } => (img, back_img),
        }
    }
}

/// Attributes read from one child element of the host.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MarkupLeaf<'a> {
    pub front: Option<&'a str>,
    pub back: Option<&'a str>,
}

/// Parses structured page data from JSON text.
pub fn pages_from_str(text: &str) -> Result<LeafSequence, SourceError> {
    let value: Value = serde_json::from_str(text).map_err(SourceError::Json)?;
    pages_from_value(&value)
}

/// Parses structured page data from an already decoded JSON value.
///
/// A string value is treated as JSON text, which is how page data arrives
/// through an element attribute.
pub fn pages_from_value(value: &Value) -> Result<LeafSequence, SourceError> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::String(text) => return pages_from_str(text),
        _ => return Err(SourceError::NotAList),
    };

    let mut pairs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry = PageEntry::deserialize(entry).map_err(|_| SourceError::Entry { index })?;
        pairs.push(entry.into_pair());
    }
    Ok(LeafSequence::from_pairs(pairs))
}

/// Builds one leaf per child element; a missing attribute is an empty source.
pub fn leaves_from_markup<'a, I>(children: I) -> LeafSequence
where
    I: IntoIterator<Item = MarkupLeaf<'a>>,
{
    LeafSequence::from_pairs(
        children
            .into_iter()
            .map(|child| (child.front.unwrap_or(""), child.back.unwrap_or(""))),
    )
}

/// Picks the leaf sequence for a viewer: structured `pages` when present and
/// well formed, the markup-derived sequence otherwise.
pub fn resolve_leaves<'a, I>(pages: Option<&Value>, markup: I) -> LeafSequence
where
    I: IntoIterator<Item = MarkupLeaf<'a>>,
{
    match pages {
        None | Some(Value::Null) => leaves_from_markup(markup),
        Some(pages) => match pages_from_value(pages) {
            Ok(leaves) => {
                debug!("zine-source: using structured pages count={}", leaves.len());
                leaves
            }
            Err(err) => {
                warn!("zine-source: {err}; falling back to markup leaves");
                leaves_from_markup(markup)
            }
        },
    }
}
