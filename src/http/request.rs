//! Request attribute extraction.
//!
//! # Responsibilities
//! - Extract routing-relevant information (method, host, path)
//! - Expose request headers to attribute guards
//!
//! # Design Decisions
//! - Header names are lowercase (as `http` normalizes them)
//! - The URI authority wins over the Host header when both are present
//! - Non-UTF-8 header values are skipped rather than lossily converted

use axum::http::Request;

use crate::routing::context::Attributes;
use crate::routing::route::Route;
use crate::routing::router::{match_route, RouteMatch};

/// Build the attribute map guards see for `req`.
///
/// Keys: every header by name, plus `host`, `server_name` (host without
/// port) and `scheme` when known. The method is carried separately.
pub fn attributes_from_request<B>(req: &Request<B>) -> Attributes {
    let mut attrs = Attributes::new().with_method(req.method().clone());

    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            attrs.insert(name.as_str(), value);
        }
    }

    let host = req
        .uri()
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            req.headers()
                .get("host")
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        });
    if let Some(host) = host {
        attrs.insert("server_name", server_name(&host));
        attrs.insert("host", host);
    }

    if let Some(scheme) = req.uri().scheme_str() {
        attrs.insert("scheme", scheme);
    }

    attrs
}

/// Host without userinfo or port, lowercased.
fn server_name(host: &str) -> String {
    let host = host.rsplit('@').next().unwrap_or(host);
    let name = if host.starts_with('[') {
        // IPv6 literal: keep the brackets, drop the port after them
        host.split_once(']')
            .map(|(addr, _)| format!("{}]", addr))
            .unwrap_or_else(|| host.to_string())
    } else {
        host.split(':').next().unwrap_or(host).to_string()
    };
    name.to_lowercase()
}

/// Match a request's path and attributes against `routes`.
pub fn match_request<H: Clone, B>(routes: &Route<H>, req: &Request<B>) -> Option<RouteMatch<H>> {
    let attrs = attributes_from_request(req);
    match_route(req.uri().path(), routes, &attrs)
}
