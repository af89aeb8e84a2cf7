//! Locating named configuration blocks.
//!
//! A block declaration is a 24-character identifier, a comment holding the
//! configuration name, and an `= {` opener:
//! ```text
//! 0123456789ABCDEF01234567 /* Debug */ = {
//! ```
//! The block runs to the brace that closes that opener. Nesting is tracked by
//! counting braces; braces inside quoted strings and comments are ignored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Matches a block header. Group 1 is the identifier, group 2 the raw
/// comment text.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9A-Za-z]{24})\s*/\*([^*\n]*)\*/\s*=\s*\{").expect("Invalid block header regex")
});

/// What to do when more than one block carries the requested name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`Error::AmbiguousBlock`].
    #[default]
    Reject,
    /// Use the first declaration in file order.
    #[serde(rename = "first")]
    FirstMatch,
}

/// A located configuration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    /// The configuration name from the header comment.
    pub name: String,
    /// The 24-character identifier preceding the comment.
    pub id: String,
    /// Byte offset where the header (the identifier) starts.
    pub header_start: usize,
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
    content: String,
}

impl BlockSpan {
    /// The block text from `{` through the matching `}`.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace this block's content inside `text`, returning the new text.
    ///
    /// `text` must be the text the span was located in.
    pub fn splice(&self, text: &str, new_content: &str) -> String {
        debug_assert_eq!(&text[self.start..self.end], self.content);

        let mut out = String::with_capacity(text.len() - self.content.len() + new_content.len());
        out.push_str(&text[..self.start]);
        out.push_str(new_content);
        out.push_str(&text[self.end..]);
        out
    }
}

/// Offset of the last byte of the quoted string or `/* */` comment starting
/// at `i`. `None` when nothing opaque starts there, `Some(None)` when it is
/// never terminated.
fn opaque_end(text: &str, i: usize) -> Option<Option<usize>> {
    let bytes = text.as_bytes();
    match bytes[i] {
        b'"' => {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] != b'"' {
                j += if bytes[j] == b'\\' { 2 } else { 1 };
            }
            Some((j < bytes.len()).then_some(j))
        }
        b'/' if bytes.get(i + 1) == Some(&b'*') => {
            Some(text[i + 2..].find("*/").map(|close| i + 2 + close + 1))
        }
        _ => None,
    }
}

/// Byte ranges of quoted strings and comments in `text`. An unterminated one
/// runs to the end of `text`.
pub(crate) fn opaque_regions(text: &str) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut i = 0;

    while i < text.len() {
        match opaque_end(text, i) {
            Some(Some(end)) => {
                regions.push(i..end + 1);
                i = end + 1;
            }
            Some(None) => {
                regions.push(i..text.len());
                break;
            }
            None => i += 1,
        }
    }

    regions
}

/// Find the offset of the `}` closing the `{` at `open`.
fn closing_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        if let Some(end) = opaque_end(text, i) {
            i = end? + 1;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Find every block named `name`, in file order.
///
/// # Errors
/// Returns [`Error::UnbalancedBlock`] if a matching block is never closed.
///
/// # Example
/// ```
/// use pbx_blocks::locate_all;
///
/// let text = "A1B2C3D4E5F6A1B2C3D4E5F6 /* Release */ = { X = 1; };";
/// let blocks = locate_all(text, "Release").unwrap();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].content(), "{ X = 1; }");
/// ```
pub fn locate_all(text: &str, name: &str) -> Result<Vec<BlockSpan>> {
    let mut blocks = Vec::new();

    for caps in HEADER_REGEX.captures_iter(text) {
        let (Some(whole), Some(id), Some(comment)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if comment.as_str().trim() != name {
            continue;
        }

        let start = whole.end() - 1;
        let close = closing_brace(text, start).ok_or_else(|| Error::UnbalancedBlock {
            name: name.to_string(),
            offset: start,
        })?;
        let end = close + 1;

        blocks.push(BlockSpan {
            name: name.to_string(),
            id: id.as_str().to_string(),
            header_start: whole.start(),
            start,
            end,
            content: text[start..end].to_string(),
        });
    }

    Ok(blocks)
}

/// Find the block named `name`.
///
/// # Errors
/// - [`Error::BlockNotFound`] when no block carries the name.
/// - [`Error::AmbiguousBlock`] when several do and `policy` is
///   [`DuplicatePolicy::Reject`].
/// - [`Error::UnbalancedBlock`] when the block is never closed.
pub fn locate(text: &str, name: &str, policy: DuplicatePolicy) -> Result<BlockSpan> {
    let mut blocks = locate_all(text, name)?;
    let count = blocks.len();

    match (count, policy) {
        (0, _) => Err(Error::BlockNotFound {
            name: name.to_string(),
        }),
        (1, _) | (_, DuplicatePolicy::FirstMatch) => {
            if count > 1 {
                tracing::warn!(name, count, "Configuration name is ambiguous, using first block");
            }
            let block = blocks.swap_remove(0);
            tracing::debug!(name, id = %block.id, start = block.start, end = block.end, "Located block");
            Ok(block)
        }
        (_, DuplicatePolicy::Reject) => Err(Error::AmbiguousBlock {
            name: name.to_string(),
            count,
        }),
    }
}
