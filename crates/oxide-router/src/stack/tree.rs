//! Hierarchical route stack.

use crate::error::{Result, RouterError};
use crate::options::RouteOptions;
use crate::order::RouteOrder;
use crate::request::{Params, Request, Uri};
use crate::result::{MatchOutcome, NameMode};
use crate::route::{AssembledUri, PartialRoute, Route};
use crate::stack::{RouteStack, match_routes, merge_params};

/// A priority ordered list of named routes that builds `parent/child`
/// names.
///
/// Matching prepends the entry name to the name reported by the route, so a
/// match of child `post` under entry `blog` is named `blog/post`. Assembling
/// resolves such names one level at a time.
///
/// Once a route reports a method failure, later routes are matched with
/// [`RouteOptions::force_method_failure`] set: a request whose path matched
/// with the wrong method is answered with every allowed method instead of
/// being picked up by a less specific route.
#[derive(Debug, Default)]
pub struct TreeRouteStack {
    routes: RouteOrder,
    default_params: Params,
}

impl TreeRouteStack {
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

    /// Returns the default params.
    #[must_use]
    pub const fn default_params(&self) -> &Params {
        &self.default_params
    }

    /// Returns a route by name, mutably.
    pub fn route_mut(&mut self, name: &str) -> Option<&mut (dyn Route + 'static)> {
        self.routes.get_mut(name)
    }
}

impl Route for TreeRouteStack {
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
            NameMode::Prepend,
            true,
        )
    }

    fn assemble(&self, uri: &Uri, params: &Params, options: &RouteOptions) -> Result<AssembledUri> {
        let name = options.name.as_deref().ok_or(RouterError::MissingRouteName)?;
        let (head, rest) = match name.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        let route = self
            .routes
            .get(head)
            .ok_or_else(|| RouterError::RouteNotFound(head.to_string()))?;

        if rest.is_some() && route.as_stack().is_none() {
            return Err(RouterError::NoChildRoutes(head.to_string()));
        }

        let mut child_options = options.clone();
        child_options.name = rest.map(str::to_string);
        route.assemble(uri, &merge_params(&self.default_params, params), &child_options)
    }

    fn into_partial(self: Box<Self>) -> std::result::Result<Box<dyn PartialRoute>, Box<dyn Route>> {
        Err(self)
    }

    fn as_stack(&self) -> Option<&dyn RouteStack> {
        Some(self)
    }
}

impl RouteStack for TreeRouteStack {
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
