//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, config and watcher produce:
//!     → tracing events (match / no match, generation, reloads)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered by level)
//! ```

pub mod logging;

pub use logging::init_logging;
