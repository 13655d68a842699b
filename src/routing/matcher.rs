//! Pattern matching logic.
//!
//! # Responsibilities
//! - Match a literal or regex prefix of the remaining path
//! - Match an ordered list of segments against the whole remainder
//! - Guard on request method and other request attributes
//! - Render a pattern back to path text
//!
//! # Design Decisions
//! - Literal and regex patterns are prefix matches; the tail becomes the
//!   new remainder
//! - Segment lists are matched as one fully anchored expression with a
//!   trailing catch-all group; there is no per-segment backtracking
//! - Guards never consume path text and render as nothing
//! - Expressions are built per call, nothing is cached

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use regex::Regex;

use crate::routing::context::{Attributes, MatchContext, Params};
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::segment::{
    capture_count, compile, param_key, render_segment, segment_expression, Segment,
};

/// Predicate over a single attribute value.
pub type AttributePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Rule an attribute value must satisfy.
#[derive(Clone)]
pub enum AttributeRule {
    Equals(String),
    OneOf(HashSet<String>),
    Predicate(AttributePredicate),
}

impl AttributeRule {
    fn accepts(&self, value: &str) -> bool {
        match self {
            AttributeRule::Equals(expected) => expected == value,
            AttributeRule::OneOf(allowed) => allowed.contains(value),
            AttributeRule::Predicate(pred) => pred(value),
        }
    }
}

// Predicates are opaque closures, so only the variant is shown.
impl fmt::Debug for AttributeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeRule::Equals(v) => f.debug_tuple("Equals").field(v).finish(),
            AttributeRule::OneOf(set) => f.debug_tuple("OneOf").field(set).finish(),
            AttributeRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Ordered set of attribute rules, all of which must hold.
#[derive(Debug, Clone, Default)]
pub struct AttributeGuard {
    rules: Vec<(String, AttributeRule)>,
}

impl AttributeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to equal `value`.
    pub fn equals(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.rule(key, AttributeRule::Equals(value.into()))
    }

    /// Require `key` to be one of `values`.
    pub fn one_of<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = values.into_iter().map(Into::into).collect();
        self.rule(key, AttributeRule::OneOf(set))
    }

    /// Require `key` to satisfy `pred`.
    pub fn satisfies<F>(self, key: impl Into<String>, pred: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(key, AttributeRule::Predicate(Arc::new(pred)))
    }

    /// Append a rule. Rules are checked in insertion order.
    pub fn rule(mut self, key: impl Into<String>, rule: AttributeRule) -> Self {
        self.rules.push((key.into(), rule));
        self
    }

    /// True when every rule holds. A missing attribute fails its rule.
    pub fn admits(&self, attributes: &Attributes) -> bool {
        self.rules.iter().all(|(key, rule)| {
            attributes
                .get(key)
                .map(|value| rule.accepts(value))
                .unwrap_or(false)
        })
    }
}

/// Something tested against the remaining path and request attributes.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact prefix of the remainder.
    Literal(String),
    /// Expression matching a prefix of the remainder. Not invertible.
    Regex(Regex),
    /// Ordered segments matched against the whole remainder.
    Segments(Vec<Segment>),
    /// Request method must equal this one.
    Method(Method),
    /// Request attributes must satisfy every rule.
    Attributes(AttributeGuard),
}

impl Pattern {
    /// Regex prefix pattern. Fails if the expression does not compile.
    pub fn regex(expr: &str) -> RouteResult<Self> {
        compile(expr).map(Pattern::Regex)
    }

    /// Segment list pattern.
    pub fn segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        Pattern::Segments(segments.into_iter().collect())
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::Literal(text.to_string())
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::Literal(text)
    }
}

impl From<Method> for Pattern {
    fn from(method: Method) -> Self {
        Pattern::Method(method)
    }
}

impl From<AttributeGuard> for Pattern {
    fn from(guard: AttributeGuard) -> Self {
        Pattern::Attributes(guard)
    }
}

fn build(expr: &str) -> Option<Regex> {
    match Regex::new(expr) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(expr = %expr, error = %e, "Failed to compile route expression");
            None
        }
    }
}

fn match_prefix<'a>(re: &Regex, ctx: &MatchContext<'a>) -> Option<MatchContext<'a>> {
    let anchored = build(&format!("^(?:{})((?s:.*))$", re.as_str()))?;
    let caps = anchored.captures(ctx.remainder)?;
    let tail = caps.get(caps.len() - 1)?.as_str();
    Some(ctx.advance(tail))
}

fn match_segments<'a>(segments: &[Segment], ctx: &MatchContext<'a>) -> Option<MatchContext<'a>> {
    let body: String = segments.iter().map(segment_expression).collect();
    let re = build(&format!("^{}((?s:.*))$", body))?;
    let caps = re.captures(ctx.remainder)?;

    let mut params = ctx.params.clone();
    let mut group = 1;
    for segment in segments {
        if let Some(key) = param_key(segment) {
            let value = caps.get(group).map_or("", |m| m.as_str());
            params.insert(key.to_string(), value.to_string());
        }
        group += capture_count(segment);
    }

    let tail = caps.get(group)?.as_str();
    Some(MatchContext {
        remainder: tail,
        params,
        attributes: ctx.attributes,
    })
}

/// Match `pattern` against the context, returning the advanced context.
pub fn match_pattern<'a>(pattern: &Pattern, ctx: &MatchContext<'a>) -> Option<MatchContext<'a>> {
    match pattern {
        Pattern::Literal(text) => ctx
            .remainder
            .strip_prefix(text.as_str())
            .map(|tail| ctx.advance(tail)),
        Pattern::Regex(re) => match_prefix(re, ctx),
        Pattern::Segments(segments) => match_segments(segments, ctx),
        Pattern::Method(method) => {
            (ctx.attributes.get("method") == Some(method.as_str())).then(|| ctx.clone())
        }
        Pattern::Attributes(guard) => guard.admits(ctx.attributes).then(|| ctx.clone()),
    }
}

/// Parameter keys bound by `pattern`, in segment order.
pub fn pattern_keys(pattern: &Pattern) -> impl Iterator<Item = &str> {
    let segments: &[Segment] = match pattern {
        Pattern::Segments(segments) => segments.as_slice(),
        _ => &[],
    };
    segments.iter().filter_map(param_key)
}

/// Render `pattern` back to path text using `params`.
pub fn unmatch_pattern(pattern: &Pattern, params: &Params) -> RouteResult<String> {
    match pattern {
        Pattern::Literal(text) => Ok(text.clone()),
        Pattern::Regex(re) => Err(RouteError::NotInvertible(re.as_str().to_string())),
        Pattern::Segments(segments) => segments
            .iter()
            .map(|segment| render_segment(segment, params))
            .collect(),
        Pattern::Method(_) | Pattern::Attributes(_) => Ok(String::new()),
    }
}
