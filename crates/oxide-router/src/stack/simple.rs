//! Flat route stack.

use crate::error::{Result, RouterError};
use crate::options::RouteOptions;
use crate::order::RouteOrder;
use crate::request::{Params, Request, Uri};
use crate::result::{MatchOutcome, NameMode};
use crate::route::{AssembledUri, PartialRoute, Route};
use crate::stack::{RouteStack, match_routes, merge_params};

/// A flat, priority ordered list of named routes.
///
/// A success is named after the matching entry; names of nested stacks are
/// not combined. Use [`TreeRouteStack`](crate::TreeRouteStack) for
/// `parent/child` names.
#[derive(Debug, Default)]
pub struct SimpleRouteStack {
    routes: RouteOrder,
    default_params: Params,
}

impl SimpleRouteStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route, builder style.
    #[must_use]
    pub fn with_route(mut self, name: &str, route: impl Route + 'static) -> Self {
        self.add_route(name, Box::new(route), None);
        self
    }

    /// Sets one default param.
    pub fn set_default_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.default_params.insert(name.into(), value.into());
    }

    /// Returns the default params, added under every matched route's params.
    #[must_use]
    pub const fn default_params(&self) -> &Params {
        &self.default_params
    }
}

impl Route for SimpleRouteStack {
    fn match_request(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<MatchOutcome> {
        match_routes(
            &self.routes,
            &self.default_params,
            request,
            path_offset,
            options,
            NameMode::Replace,
            false,
        )
    }

    fn assemble(&self, uri: &Uri, params: &Params, options: &RouteOptions) -> Result<AssembledUri> {
        let name = options.name.as_deref().ok_or(RouterError::MissingRouteName)?;
        let route = self
            .routes
            .get(name)
            .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;

        let mut options = options.clone();
        options.name = None;
        route.assemble(uri, &merge_params(&self.default_params, params), &options)
    }

    fn into_partial(self: Box<Self>) -> std::result::Result<Box<dyn PartialRoute>, Box<dyn Route>> {
        Err(self)
    }

    fn as_stack(&self) -> Option<&dyn RouteStack> {
        Some(self)
    }
}

impl RouteStack for SimpleRouteStack {
    fn add_route(&mut self, name: &str, route: Box<dyn Route>, priority: Option<i32>) {
        self.routes.insert(name, route, priority.unwrap_or_default());
    }

    fn remove_route(&mut self, name: &str) -> Option<Box<dyn Route>> {
        self.routes.remove(name)
    }

    fn route(&self, name: &str) -> Option<&dyn Route> {
        self.routes.get(name)
    }

    fn route_names(&self) -> Vec<&str> {
        self.routes.names()
    }

    fn clear_routes(&mut self) {
        self.routes.clear();
    }

    fn set_default_params(&mut self, params: Params) {
        self.default_params = params;
    }
}
