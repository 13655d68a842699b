//! Hot-swappable route table.
//!
//! Every lookup loads one immutable snapshot of the tree; `replace` swaps
//! in a new tree atomically. Lookups that are already running keep the
//! tree they started with.

use std::fmt::Debug;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::context::{Attributes, Params};
use crate::routing::error::RouteResult;
use crate::routing::route::Route;
use crate::routing::router::{match_route, path_for, RouteMatch};

/// Route tree shared between concurrent lookups.
pub struct RouteTable<H> {
    current: ArcSwap<Route<H>>,
}

impl<H: Clone + PartialEq + Debug> RouteTable<H> {
    pub fn new(routes: Route<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(routes),
        }
    }

    /// Match `path` against the current tree.
    pub fn match_route(&self, path: &str, attributes: &Attributes) -> Option<RouteMatch<H>> {
        let routes = self.current.load();
        match_route(path, &routes, attributes)
    }

    /// Generate a path from the current tree.
    pub fn path_for(&self, handler: &H, params: &Params) -> RouteResult<String> {
        let routes = self.current.load();
        path_for(handler, &routes, params)
    }

    /// Install a new tree.
    pub fn replace(&self, routes: Route<H>) {
        self.current.store(Arc::new(routes));
        tracing::info!("Route table replaced");
    }

    /// The tree currently in use.
    pub fn snapshot(&self) -> Arc<Route<H>> {
        self.current.load_full()
    }
}
