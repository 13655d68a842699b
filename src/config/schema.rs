//! Configuration schema definitions.
//!
//! This module defines the on-disk shape of a route tree and the settings
//! around it. All types derive Serde traits for deserialization from
//! config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::validation::{build_routes, ValidationError};
use crate::routing::route::Route;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Observability settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Root of the route tree.
    pub routes: RouteConfig,
}

impl RouterConfig {
    /// Build the route tree this config describes.
    pub fn build_routes(&self) -> Result<Route<String>, Vec<ValidationError>> {
        build_routes(&self.routes)
    }
}

/// One route: a single pattern and either a handler or child routes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Literal path prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Regex path prefix. Such routes cannot be used for path generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    /// Segment list matched against the whole remaining path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentConfig>>,

    /// Request method guard (GET, POST, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Request attribute guard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, AttributeRuleConfig>>,

    /// Handler identifier this route resolves to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    /// Child routes, tried in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteConfig>,
}

/// One entry of a `segments` list.
///
/// ```toml
/// segments = ["articles/", { param = "id", regex = "[0-9]+" }, "/article.html"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SegmentConfig {
    /// Literal text.
    Literal(String),
    /// Parameter: a wildcard, or a keyed regex/literal when one is given.
    Param {
        param: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        literal: Option<String>,
    },
    /// Unbound regex.
    Regex { regex: String },
}

/// Rule for one request attribute.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AttributeRuleConfig {
    /// Attribute must equal this value.
    Equals(String),
    /// Attribute must be one of these values.
    OneOf(Vec<String>),
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
