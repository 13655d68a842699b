//! Configuration validation and route tree construction.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check each route names exactly one pattern and one outcome
//! - Compile expressions and check parameter keys
//! - Build the immutable route tree from a valid config
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Every error carries the location of the offending entry
//! - Overlapping or unreachable routes are not detected; first match wins

use std::fmt;

use axum::http::Method;

use crate::config::schema::{AttributeRuleConfig, RouteConfig, RouterConfig, SegmentConfig};
use crate::routing::error::RouteError;
use crate::routing::matcher::{AttributeGuard, Pattern};
use crate::routing::route::{Matched, Route};
use crate::routing::segment::{KeyedSegment, Segment};

/// Methods a `method` guard may name.
const METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::CONNECT,
    Method::TRACE,
];

/// A single problem found in the route configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Where the problem is, e.g. `routes.routes[1].segments[0]`.
    pub location: String,
    pub message: String,
}

impl ValidationError {
    fn new(location: &str, message: impl Into<String>) -> Self {
        Self {
            location: location.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    build_routes(&config.routes).map(|_| ())
}

/// Build the route tree rooted at `config`, collecting every error found.
pub fn build_routes(config: &RouteConfig) -> Result<Route<String>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    match build_route(config, "routes", &mut errors) {
        Some(route) if errors.is_empty() => Ok(route),
        _ => Err(errors),
    }
}

fn build_route(
    config: &RouteConfig,
    location: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Route<String>> {
    let pattern = build_pattern(config, location, errors);
    let matched = build_matched(config, location, errors);
    Some(Route {
        pattern: pattern?,
        matched: matched?,
    })
}

fn build_matched(
    config: &RouteConfig,
    location: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Matched<String>> {
    match (&config.handler, config.routes.is_empty()) {
        (Some(_), false) => {
            errors.push(ValidationError::new(
                location,
                "route has both a handler and child routes",
            ));
            None
        }
        (None, true) => {
            errors.push(ValidationError::new(
                location,
                "route needs a handler or child routes",
            ));
            None
        }
        (Some(handler), true) => Some(Matched::Handler(handler.clone())),
        (None, false) => {
            let children: Vec<Option<Route<String>>> = config
                .routes
                .iter()
                .enumerate()
                .map(|(i, child)| build_route(child, &format!("{}.routes[{}]", location, i), errors))
                .collect();
            children
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .map(Matched::Alternatives)
        }
    }
}

fn build_pattern(
    config: &RouteConfig,
    location: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Pattern> {
    let declared = [
        config.path.is_some(),
        config.regex.is_some(),
        config.segments.is_some(),
        config.method.is_some(),
        config.attributes.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count();

    if declared != 1 {
        errors.push(ValidationError::new(
            location,
            format!(
                "expected exactly one of path, regex, segments, method, attributes (found {})",
                declared
            ),
        ));
        return None;
    }

    if let Some(path) = &config.path {
        return Some(Pattern::Literal(path.clone()));
    }

    if let Some(expr) = &config.regex {
        return record(Pattern::regex(expr), location, errors);
    }

    if let Some(segments) = &config.segments {
        if segments.is_empty() {
            errors.push(ValidationError::new(location, "segments must not be empty"));
            return None;
        }
        let built: Vec<Option<Segment>> = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| build_segment(seg, &format!("{}.segments[{}]", location, i), errors))
            .collect();
        return built
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .map(Pattern::Segments);
    }

    if let Some(method) = &config.method {
        let upper = method.to_ascii_uppercase();
        return match METHODS.iter().find(|m| m.as_str() == upper) {
            Some(m) => Some(Pattern::Method(m.clone())),
            None => {
                errors.push(ValidationError::new(
                    location,
                    format!("unknown method `{}`", method),
                ));
                None
            }
        };
    }

    let rules = config.attributes.as_ref()?;
    let guard = rules
        .iter()
        .fold(AttributeGuard::new(), |guard, (key, rule)| match rule {
            AttributeRuleConfig::Equals(value) => guard.equals(key.clone(), value.clone()),
            AttributeRuleConfig::OneOf(values) => guard.one_of(key.clone(), values.iter().cloned()),
        });
    Some(Pattern::Attributes(guard))
}

fn build_segment(
    config: &SegmentConfig,
    location: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Segment> {
    match config {
        SegmentConfig::Literal(text) => Some(Segment::literal(text.clone())),
        SegmentConfig::Regex { regex } => record(Segment::regex(regex), location, errors),
        SegmentConfig::Param {
            param,
            regex: None,
            literal: None,
        } => record(Segment::wildcard(param.clone()), location, errors),
        SegmentConfig::Param {
            param,
            regex: Some(expr),
            literal: None,
        } => record(Segment::keyed_regex(expr, param.clone()), location, errors),
        SegmentConfig::Param {
            param,
            regex: None,
            literal: Some(text),
        } => record(
            Segment::keyed(KeyedSegment::Literal(text.clone()), param.clone()),
            location,
            errors,
        ),
        SegmentConfig::Param { .. } => {
            errors.push(ValidationError::new(
                location,
                "parameter segment takes either regex or literal, not both",
            ));
            None
        }
    }
}

fn record<T>(
    result: Result<T, RouteError>,
    location: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<T> {
    result
        .map_err(|e| errors.push(ValidationError::new(location, e.to_string())))
        .ok()
}
