//! Bidirectional URI routing.
//!
//! Given a declarative route tree, match a path plus request attributes
//! to a handler identifier and extracted parameters, or go the other way
//! and generate the path that routes to a handler.
//!
//! ```
//! use bidi_router::routing::{match_route, path_for, Attributes, Params, Pattern, Route, Segment};
//!
//! let routes = Route::alternatives("/", [
//!     Route::handler("index.html", "index"),
//!     Route::handler(
//!         Pattern::segments([
//!             Segment::literal("articles/"),
//!             Segment::wildcard("id").unwrap(),
//!             Segment::literal("/article.html"),
//!         ]),
//!         "article",
//!     ),
//! ]);
//!
//! let m = match_route("/articles/123/article.html", &routes, &Attributes::new()).unwrap();
//! assert_eq!(m.handler, "article");
//! assert_eq!(m.params["id"], "123");
//!
//! let params = Params::from([("id".to_string(), "123".to_string())]);
//! assert_eq!(path_for(&"article", &routes, &params).unwrap(), "/articles/123/article.html");
//! ```

// Core
pub mod routing;

// Integration
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod observability;

pub use config::RouterConfig;
pub use routing::{match_route, path_for, Route, RouteError, RouteMatch, RouteTable};
