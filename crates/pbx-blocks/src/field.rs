//! Reading and rewriting a single `KEY = VALUE;` setting inside a block.
//!
//! Only the value token is ever replaced. The key, the `=`, the surrounding
//! whitespace and the terminating `;` stay exactly as they were.

use regex::Regex;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::locator::{BlockSpan, DuplicatePolicy, locate_all, opaque_regions};

/// A scalar setting found inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// The setting name.
    pub key: String,
    /// The value text, without surrounding quotes. Escapes are left as written.
    pub raw: String,
    /// Whether the value was written as a double-quoted string.
    pub quoted: bool,
    /// Byte range of the value token (quotes included) within the block content.
    pub range: Range<usize>,
}

/// Outcome of rewriting one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    pub key: String,
    pub old: String,
    pub new: String,
    /// `false` when the new value equals the old one; `content` is then the
    /// original block content.
    pub changed: bool,
    /// The rewritten block content.
    pub content: String,
}

/// Pattern for `KEY = VALUE;` where KEY is not the tail of a longer
/// identifier. Group 1 is the key, group 2 the value token.
fn field_pattern(key: &str) -> Result<Regex> {
    let pattern = format!(
        r#"(?:^|[^A-Za-z0-9_])({})[ \t]*=[ \t]*("(?:[^"\\\n]|\\.)*"|[^;\s"]+)[ \t]*;"#,
        regex::escape(key)
    );
    Ok(Regex::new(&pattern)?)
}

/// Find the first `key = value;` setting in `block`.
///
/// # Errors
/// Returns [`Error::FieldNotFound`] if the block has no such setting.
///
/// # Example
/// ```
/// use pbx_blocks::{DuplicatePolicy, find_field, locate};
///
/// let text = "A1B2C3D4E5F6A1B2C3D4E5F6 /* Release */ = { CURRENT_PROJECT_VERSION = 41; };";
/// let block = locate(text, "Release", DuplicatePolicy::Reject).unwrap();
/// let field = find_field(&block, "CURRENT_PROJECT_VERSION").unwrap();
/// assert_eq!(field.raw, "41");
/// assert!(!field.quoted);
/// ```
pub fn find_field(block: &BlockSpan, key: &str) -> Result<FieldValue> {
    let re = field_pattern(key)?;
    find_with(&re, block, key)
}

/// First match of `re` whose key lies outside quoted strings and comments.
fn find_with(re: &Regex, block: &BlockSpan, key: &str) -> Result<FieldValue> {
    let content = block.content();
    let opaque = opaque_regions(content);
    let mut at = 0;
    let mut found = None;

    while let Some(caps) = re.captures_at(content, at) {
        let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
            break;
        };
        if !opaque.iter().any(|region| region.contains(&name.start())) {
            found = Some(value);
            break;
        }
        at = name.end();
    }

    let value = found.ok_or_else(|| Error::FieldNotFound {
        key: key.to_string(),
        block: block.name.clone(),
    })?;

    let token = value.as_str();
    let (raw, quoted) = match token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => (inner.to_string(), true),
        None => (token.to_string(), false),
    };

    Ok(FieldValue {
        key: key.to_string(),
        raw,
        quoted,
        range: value.range(),
    })
}

/// Find the block named `name` that holds a `key` setting.
///
/// Project files often repeat a configuration name, once for the project and
/// once per target, and only some of those blocks carry a given setting.
/// Blocks without `key` are not candidates, so `policy` only comes into play
/// when several blocks both share the name and hold the setting.
///
/// # Errors
/// - [`Error::BlockNotFound`] when no block carries the name.
/// - [`Error::FieldNotFound`] when blocks carry the name but none holds `key`.
/// - [`Error::AmbiguousBlock`] when several candidates remain and `policy` is
///   [`DuplicatePolicy::Reject`].
pub fn locate_with_field(
    text: &str,
    name: &str,
    key: &str,
    policy: DuplicatePolicy,
) -> Result<BlockSpan> {
    let blocks = locate_all(text, name)?;
    if blocks.is_empty() {
        return Err(Error::BlockNotFound {
            name: name.to_string(),
        });
    }

    let re = field_pattern(key)?;
    let mut candidates: Vec<BlockSpan> = blocks
        .into_iter()
        .filter(|block| find_with(&re, block, key).is_ok())
        .collect();

    match (candidates.len(), policy) {
        (0, _) => Err(Error::FieldNotFound {
            key: key.to_string(),
            block: name.to_string(),
        }),
        (1, _) => Ok(candidates.swap_remove(0)),
        (count, DuplicatePolicy::FirstMatch) => {
            tracing::warn!(name, key, count, "Several blocks hold the setting, using first");
            Ok(candidates.swap_remove(0))
        }
        (count, DuplicatePolicy::Reject) => Err(Error::AmbiguousBlock {
            name: name.to_string(),
            count,
        }),
    }
}

/// Whether a bare value has to be quoted to stay a single token.
fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '$'))
}

fn render_value(value: &str, quoted: bool) -> String {
    if quoted || needs_quotes(value) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Rewrite the value of `key` in `block` with the result of `transform`.
///
/// `transform` receives the current value and returns the new value text, or
/// an error to abort without producing any output. When the new text equals
/// the current one the result is marked unchanged.
///
/// # Errors
/// Returns [`Error::FieldNotFound`] (converted into `E`) if the setting is
/// missing, or whatever `transform` returns.
pub fn mutate<F, E>(block: &BlockSpan, key: &str, transform: F) -> std::result::Result<MutationResult, E>
where
    F: FnOnce(&FieldValue) -> std::result::Result<String, E>,
    E: From<Error>,
{
    let field = find_field(block, key)?;
    let new = transform(&field)?;
    let content = block.content();

    if new == field.raw {
        tracing::debug!(key, value = %new, "Value unchanged");
        return Ok(MutationResult {
            key: key.to_string(),
            old: field.raw,
            new,
            changed: false,
            content: content.to_string(),
        });
    }

    let token = render_value(&new, field.quoted);
    let mut rewritten =
        String::with_capacity(content.len() - field.range.len() + token.len());
    rewritten.push_str(&content[..field.range.start]);
    rewritten.push_str(&token);
    rewritten.push_str(&content[field.range.end..]);

    tracing::debug!(key, old = %field.raw, new = %new, "Rewrote value");

    Ok(MutationResult {
        key: key.to_string(),
        old: field.raw,
        new,
        changed: true,
        content: rewritten,
    })
}
