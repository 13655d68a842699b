//! Path segments and their inverse rendering.
//!
//! # Responsibilities
//! - Turn one segment into an expression fragment for a combined regex
//! - Report the parameter key a segment binds, if any
//! - Render a segment back to literal text from parameter values
//!
//! # Design Decisions
//! - A keyed segment can only pair a literal or a regex with a key; the
//!   type rules out keyed wildcards
//! - Keys are a validated newtype, so no segment can carry a malformed key
//! - Fragments never rely on capture group numbering of their neighbours;
//!   `capture_count` reports how many groups each fragment opens
//! - Bare regex segments have no inverse and refuse to render

use std::fmt;

use regex::Regex;

use crate::routing::context::Params;
use crate::routing::error::{RouteError, RouteResult};

/// Parameter key bound by a wildcard or keyed segment.
///
/// Only constructed through [`ParamKey::new`], which rejects empty keys
/// and characters outside ASCII alphanumerics, `_`, `-` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamKey(String);

impl ParamKey {
    pub fn new(key: impl Into<String>) -> RouteResult<Self> {
        validate_key(key.into()).map(ParamKey)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Segment that can be paired with a parameter key.
#[derive(Debug, Clone)]
pub enum KeyedSegment {
    Literal(String),
    Regex(Regex),
}

/// One piece of a multi-part path pattern.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Matched verbatim.
    Literal(String),
    /// Matched by expression, binds nothing.
    Regex(Regex),
    /// Matches any text (greedy, possibly empty) and binds it to the key.
    Wildcard(ParamKey),
    /// A literal or regex whose matched text is bound to the key.
    Keyed(KeyedSegment, ParamKey),
}

impl Segment {
    /// Literal segment.
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    /// Regex segment. Fails if the expression does not compile.
    pub fn regex(expr: &str) -> RouteResult<Self> {
        compile(expr).map(Segment::Regex)
    }

    /// Wildcard segment bound to `key`.
    pub fn wildcard(key: impl Into<String>) -> RouteResult<Self> {
        Ok(Segment::Wildcard(ParamKey::new(key)?))
    }

    /// Keyed segment pairing `inner` with `key`.
    pub fn keyed(inner: KeyedSegment, key: impl Into<String>) -> RouteResult<Self> {
        Ok(Segment::Keyed(inner, ParamKey::new(key)?))
    }

    /// Keyed regex segment, e.g. `[0-9]+` bound to `id`.
    pub fn keyed_regex(expr: &str, key: impl Into<String>) -> RouteResult<Self> {
        Self::keyed(KeyedSegment::Regex(compile(expr)?), key)
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Segment::literal(text)
    }
}

/// Compile a user supplied expression.
pub(crate) fn compile(expr: &str) -> RouteResult<Regex> {
    Regex::new(expr).map_err(|source| RouteError::InvalidRegex {
        expr: expr.to_string(),
        source,
    })
}

/// Keys are non-empty and limited to ASCII alphanumerics, `_`, `-` and `.`.
pub fn validate_key(key: String) -> RouteResult<String> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(key)
    } else {
        Err(RouteError::InvalidKey(key))
    }
}

fn keyed_expression(inner: &KeyedSegment) -> String {
    match inner {
        KeyedSegment::Literal(text) => regex::escape(text),
        KeyedSegment::Regex(re) => format!("(?:{})", re.as_str()),
    }
}

/// Expression fragment matching this segment.
///
/// Wildcards and keyed segments open exactly one capturing group of
/// their own; user regexes may open more, see [`capture_count`].
pub fn segment_expression(segment: &Segment) -> String {
    match segment {
        Segment::Literal(text) => regex::escape(text),
        Segment::Regex(re) => format!("(?:{})", re.as_str()),
        Segment::Wildcard(_) => "((?s:.*))".to_string(),
        Segment::Keyed(inner, _) => format!("({})", keyed_expression(inner)),
    }
}

/// Number of capturing groups `segment_expression` opens for this segment.
pub fn capture_count(segment: &Segment) -> usize {
    let inner_groups = |re: &Regex| re.captures_len() - 1;
    match segment {
        Segment::Literal(_) => 0,
        Segment::Regex(re) => inner_groups(re),
        Segment::Wildcard(_) => 1,
        Segment::Keyed(KeyedSegment::Literal(_), _) => 1,
        Segment::Keyed(KeyedSegment::Regex(re), _) => 1 + inner_groups(re),
    }
}

/// Parameter key bound by this segment.
pub fn param_key(segment: &Segment) -> Option<&str> {
    match segment {
        Segment::Wildcard(key) | Segment::Keyed(_, key) => Some(key.as_str()),
        Segment::Literal(_) | Segment::Regex(_) => None,
    }
}

/// True if `literal` is matched in full by the segment.
///
/// Literal segments compare for equality.
pub fn segment_matches(segment: &KeyedSegment, literal: &str) -> bool {
    match segment {
        KeyedSegment::Literal(text) => text == literal,
        KeyedSegment::Regex(re) => match Regex::new(&format!("^(?:{})$", re.as_str())) {
            Ok(anchored) => anchored.is_match(literal),
            Err(e) => {
                tracing::warn!(expr = %re.as_str(), error = %e, "Failed to anchor segment expression");
                false
            }
        },
    }
}

fn lookup<'p>(params: &'p Params, key: &str) -> RouteResult<&'p str> {
    params
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| RouteError::MissingParameter(key.to_string()))
}

/// Render a segment back to path text.
pub fn render_segment(segment: &Segment, params: &Params) -> RouteResult<String> {
    match segment {
        Segment::Literal(text) => Ok(text.clone()),
        Segment::Regex(re) => Err(RouteError::NotInvertible(re.as_str().to_string())),
        Segment::Wildcard(key) => lookup(params, key.as_str()).map(str::to_string),
        Segment::Keyed(inner, key) => {
            let value = lookup(params, key.as_str())?;
            if segment_matches(inner, value) {
                Ok(value.to_string())
            } else {
                Err(RouteError::IncompatibleParameter {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
        }
    }
}
