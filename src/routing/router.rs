//! Route lookup and path generation.
//!
//! # Responsibilities
//! - Match a path and request attributes to a handler and parameters
//! - Generate the path that routes to a handler
//!
//! # Design Decisions
//! - Pure functions over an immutable tree (thread-safe without locks)
//! - No match is `None`, never an error
//! - Generation failures are usage errors and always carry a reason

use std::fmt::Debug;

use serde::Serialize;

use crate::routing::context::{Attributes, MatchContext, Params};
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::route::{match_pair, unmatch_pair, Route};

/// Handler and parameters a path resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch<H> {
    pub handler: H,
    pub params: Params,
}

/// Match `path` against `routes`.
pub fn match_route<H: Clone>(
    path: &str,
    routes: &Route<H>,
    attributes: &Attributes,
) -> Option<RouteMatch<H>> {
    let ctx = MatchContext::new(path, attributes);
    match match_pair(routes, &ctx) {
        Some(resolved) => {
            tracing::debug!(path = %path, params = ?resolved.params, "Route matched");
            Some(RouteMatch {
                handler: resolved.handler.clone(),
                params: resolved.params,
            })
        }
        None => {
            tracing::debug!(path = %path, "No route matched");
            None
        }
    }
}

/// Generate the path that routes to `handler` with `params`.
pub fn path_for<H: PartialEq + Debug>(
    handler: &H,
    routes: &Route<H>,
    params: &Params,
) -> RouteResult<String> {
    match unmatch_pair(routes, handler, params) {
        Ok(Some(path)) => {
            tracing::debug!(handler = ?handler, path = %path, "Generated path");
            Ok(path)
        }
        Ok(None) => {
            tracing::debug!(handler = ?handler, "No route produces handler");
            Err(RouteError::UnknownHandler(format!("{:?}", handler)))
        }
        Err(e) => {
            tracing::debug!(handler = ?handler, error = %e, "Path generation failed");
            Err(e)
        }
    }
}
