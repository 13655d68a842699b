//! Per-call matching state.
//!
//! # Responsibilities
//! - Hold the request attributes a route tree can guard on
//! - Thread the unconsumed path and extracted parameters through a match
//!
//! # Design Decisions
//! - A context is created fresh per call and never shared
//! - Patterns return a new context instead of mutating, so a failed
//!   alternative leaves nothing behind for the next one
//! - Attributes are borrowed; they are supplied once and never mutated

use std::collections::HashMap;

use axum::http::Method;

/// Parameter values keyed by the names declared in segments.
pub type Params = HashMap<String, String>;

/// Request attributes consulted by method and attribute guards.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    method: Option<Method>,
    values: HashMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add an attribute value. Keys are stored as given.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the request method in place.
    pub fn set_method(&mut self, method: Method) {
        self.method = Some(method);
    }

    /// Add an attribute value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// The request method, if one was supplied.
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Look up an attribute. `"method"` resolves to the request method,
    /// falling back to a plain `method` value when none was set. Method
    /// guards read through here too.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == "method" {
            if let Some(method) = &self.method {
                return Some(method.as_str());
            }
        }
        self.values.get(key).map(String::as_str)
    }
}

/// State threaded through one `match_route` call.
#[derive(Debug, Clone)]
pub struct MatchContext<'a> {
    /// Unconsumed suffix of the path.
    pub remainder: &'a str,
    /// Parameters extracted so far.
    pub params: Params,
    /// Attributes of the request being routed.
    pub attributes: &'a Attributes,
}

impl<'a> MatchContext<'a> {
    /// Start a match over the full path.
    pub fn new(path: &'a str, attributes: &'a Attributes) -> Self {
        Self {
            remainder: path,
            params: Params::new(),
            attributes,
        }
    }

    /// Same context with a new remainder.
    pub fn advance(&self, remainder: &'a str) -> Self {
        Self {
            remainder,
            params: self.params.clone(),
            attributes: self.attributes,
        }
    }
}
