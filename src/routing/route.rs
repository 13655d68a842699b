//! Route tree and recursive resolution.
//!
//! # Responsibilities
//! - Represent a route as a pattern paired with what it leads to
//! - Resolve a path through nested routes and alternatives
//! - Generate the path leading to a given handler
//!
//! # Design Decisions
//! - Trees are plain owned values; no cycles are possible
//! - Alternatives are tried in order and the first success wins, in
//!   both directions
//! - A handler is only resolved once the whole path has been consumed
//! - Generation descends before rendering, so a pattern is only rendered
//!   on a branch that actually leads to the requested handler
//! - The supplied parameters must be exactly the keys bound along that
//!   branch; a leftover key fails the branch

use crate::routing::context::{MatchContext, Params};
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::matcher::{match_pattern, pattern_keys, unmatch_pattern, Pattern};

/// What a route leads to.
#[derive(Debug, Clone)]
pub enum Matched<H> {
    /// Terminal handler identifier.
    Handler(H),
    /// Routes tried in order.
    Alternatives(Vec<Route<H>>),
    /// A single nested route.
    Nested(Box<Route<H>>),
}

/// A pattern and what it leads to.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub pattern: Pattern,
    pub matched: Matched<H>,
}

impl<H> Route<H> {
    pub fn new(pattern: impl Into<Pattern>, matched: Matched<H>) -> Self {
        Self {
            pattern: pattern.into(),
            matched,
        }
    }

    /// Route ending in a handler.
    pub fn handler(pattern: impl Into<Pattern>, handler: H) -> Self {
        Self::new(pattern, Matched::Handler(handler))
    }

    /// Route whose children are tried in order.
    pub fn alternatives<I>(pattern: impl Into<Pattern>, routes: I) -> Self
    where
        I: IntoIterator<Item = Route<H>>,
    {
        Self::new(pattern, Matched::Alternatives(routes.into_iter().collect()))
    }

    /// Route delegating to a single child.
    pub fn nested(pattern: impl Into<Pattern>, route: Route<H>) -> Self {
        Self::new(pattern, Matched::Nested(Box::new(route)))
    }
}

/// Outcome of a successful resolution.
#[derive(Debug)]
pub struct Resolved<'r, H> {
    pub handler: &'r H,
    pub params: Params,
}

/// Resolve `matched` against the context.
pub fn resolve<'r, H>(matched: &'r Matched<H>, ctx: &MatchContext<'_>) -> Option<Resolved<'r, H>> {
    match matched {
        Matched::Handler(handler) => ctx.remainder.is_empty().then(|| Resolved {
            handler,
            params: ctx.params.clone(),
        }),
        Matched::Alternatives(routes) => routes.iter().enumerate().find_map(|(index, route)| {
            tracing::trace!(index, remainder = %ctx.remainder, "Trying alternative");
            match_pair(route, ctx)
        }),
        Matched::Nested(route) => match_pair(route, ctx),
    }
}

/// Match a route's pattern, then resolve what it leads to.
pub fn match_pair<'r, H>(route: &'r Route<H>, ctx: &MatchContext<'_>) -> Option<Resolved<'r, H>> {
    let next = match_pattern(&route.pattern, ctx)?;
    resolve(&route.matched, &next)
}

/// Path text leading from `matched` to `handler`.
///
/// `Ok(None)` means `handler` is not reachable from here. Errors come
/// from rendering a branch that does lead to `handler`; alternatives keep
/// looking past such a branch and report its error only if none succeeds.
pub fn generate<H: PartialEq>(
    matched: &Matched<H>,
    handler: &H,
    params: &Params,
) -> RouteResult<Option<String>> {
    generate_within(matched, handler, params, &mut Vec::new())
}

/// Render a route's pattern followed by the path its subtree generates.
pub fn unmatch_pair<H: PartialEq>(
    route: &Route<H>,
    handler: &H,
    params: &Params,
) -> RouteResult<Option<String>> {
    unmatch_within(route, handler, params, &mut Vec::new())
}

// `bound` holds the keys declared by patterns between the root and `matched`.
fn generate_within<'r, H: PartialEq>(
    matched: &'r Matched<H>,
    handler: &H,
    params: &Params,
    bound: &mut Vec<&'r str>,
) -> RouteResult<Option<String>> {
    match matched {
        Matched::Handler(id) if id == handler => {
            check_unexpected(params, bound)?;
            Ok(Some(String::new()))
        }
        Matched::Handler(_) => Ok(None),
        Matched::Alternatives(routes) => {
            let mut first_error: Option<RouteError> = None;
            for route in routes {
                match unmatch_within(route, handler, params, bound) {
                    Ok(Some(path)) => return Ok(Some(path)),
                    Ok(None) => {}
                    Err(e) => {
                        first_error.get_or_insert(e);
                    }
                }
            }
            match first_error {
                Some(e) => Err(e),
                None => Ok(None),
            }
        }
        Matched::Nested(route) => unmatch_within(route, handler, params, bound),
    }
}

fn unmatch_within<'r, H: PartialEq>(
    route: &'r Route<H>,
    handler: &H,
    params: &Params,
    bound: &mut Vec<&'r str>,
) -> RouteResult<Option<String>> {
    let depth = bound.len();
    bound.extend(pattern_keys(&route.pattern));
    let tail = generate_within(&route.matched, handler, params, bound);
    bound.truncate(depth);

    let Some(tail) = tail? else {
        return Ok(None);
    };
    let mut path = unmatch_pattern(&route.pattern, params)?;
    path.push_str(&tail);
    Ok(Some(path))
}

fn check_unexpected(params: &Params, bound: &[&str]) -> RouteResult<()> {
    match params.keys().filter(|key| !bound.contains(&key.as_str())).min() {
        Some(key) => Err(RouteError::UnexpectedParameter(key.clone())),
        None => Ok(()),
    }
}
