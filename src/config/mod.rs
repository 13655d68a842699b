//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route tree construction)
//!     → Route<String> (immutable)
//!     → installed in a RouteTable
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → RouteTable::replace swaps the tree atomically
//! ```
//!
//! # Design Decisions
//! - A route tree is immutable once built; changes require full reload
//! - An invalid file never replaces a working tree
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_routes, parse_config, ConfigError};
pub use schema::{AttributeRuleConfig, ObservabilityConfig, RouteConfig, RouterConfig, SegmentConfig};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
