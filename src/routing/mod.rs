//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Matching (top-down):
//!     path + request attributes
//!     → router.rs (fresh MatchContext)
//!     → route.rs (pattern, then what it leads to; alternatives in order)
//!     → matcher.rs (consume path prefix / check guards)
//!     → segment.rs (expression fragments, parameter keys)
//!     → Return: handler + params, or None
//!
//! Generation (bottom-up):
//!     handler + params
//!     → route.rs (find the branch leading to the handler)
//!     → matcher.rs / segment.rs (render each pattern on that branch)
//!     → Return: path, or a RouteError
//! ```
//!
//! # Design Decisions
//! - Route trees are immutable once built; lookups share them freely
//! - Deterministic: first matching alternative wins
//! - No regex caching; expressions are assembled per call

pub mod context;
pub mod error;
pub mod matcher;
pub mod route;
pub mod router;
pub mod segment;
pub mod table;

pub use context::{Attributes, MatchContext, Params};
pub use error::{RouteError, RouteResult};
pub use matcher::{AttributeGuard, AttributeRule, Pattern};
pub use route::{Matched, Route};
pub use router::{match_route, path_for, RouteMatch};
pub use segment::{KeyedSegment, ParamKey, Segment};
pub use table::RouteTable;
