//! Route stacks: named collections of routes.
//!
//! A stack is itself a route. Matching tries its routes in
//! [`RouteOrder`](crate::RouteOrder) and tags the first success with the
//! route's name; assembling looks a route up by the `name` option.

mod simple;
mod translator_aware;
mod tree;

pub use simple::SimpleRouteStack;
pub use translator_aware::TranslatorAwareRouteStack;
pub use tree::TreeRouteStack;

use std::borrow::Cow;

use tracing::trace;

use crate::error::Result;
use crate::options::RouteOptions;
use crate::order::RouteOrder;
use crate::request::{Params, Request};
use crate::result::{MatchOutcome, NameMode};
use crate::route::Route;

/// A route holding named child routes.
pub trait RouteStack: Route {
    /// Adds a route. `None` priority means 0.
    fn add_route(&mut self, name: &str, route: Box<dyn Route>, priority: Option<i32>);

    /// Removes a route by name.
    fn remove_route(&mut self, name: &str) -> Option<Box<dyn Route>>;

    /// Returns a route by name.
    fn route(&self, name: &str) -> Option<&dyn Route>;

    /// Returns true if a route with this name exists.
    fn has_route(&self, name: &str) -> bool {
        self.route(name).is_some()
    }

    /// Route names in matching order.
    fn route_names(&self) -> Vec<&str>;

    /// Removes all routes.
    fn clear_routes(&mut self);

    /// Replaces the params added under every match made through this stack.
    fn set_default_params(&mut self, params: Params);

    /// Adds several routes with default priority.
    fn add_routes<I, N>(&mut self, routes: I)
    where
        Self: Sized,
        I: IntoIterator<Item = (N, Box<dyn Route>)>,
        N: AsRef<str>,
    {
        for (name, route) in routes {
            self.add_route(name.as_ref(), route, None);
        }
    }

    /// Replaces all routes.
    fn set_routes<I, N>(&mut self, routes: I)
    where
        Self: Sized,
        I: IntoIterator<Item = (N, Box<dyn Route>)>,
        N: AsRef<str>,
    {
        self.clear_routes();
        self.add_routes(routes);
    }
}

/// Default params overlaid by `params`.
pub(crate) fn merge_params(defaults: &Params, params: &Params) -> Params {
    let mut merged = defaults.clone();
    merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Shared matching loop of the stacks.
///
/// Returns the first success, renamed with `name_mode` and with
/// `default_params` under its params. Otherwise the union of all method
/// failures, or a plain failure. With `force_after_method_failure`, routes
/// tried after a method failure are asked to fail on method too, so they
/// only contribute allowed methods.
pub(crate) fn match_routes(
    routes: &RouteOrder,
    default_params: &Params,
    request: &Request,
    path_offset: usize,
    options: &RouteOptions,
    name_mode: NameMode,
    force_after_method_failure: bool,
) -> Result<MatchOutcome> {
    let mut options = Cow::Borrowed(options);
    let mut allowed_methods: Vec<String> = Vec::new();

    for (name, route) in routes.iter() {
        trace!(route = name, path_offset, "Trying route");
        let outcome = route.match_request(request, path_offset, &options)?;

        if outcome.is_success() {
            let params = merge_params(default_params, outcome.params());
            return outcome
                .with_matched_route_name(name, name_mode)?
                .with_matched_params(params);
        }

        if outcome.is_method_failure() {
            allowed_methods.extend(outcome.allowed_methods().iter().cloned());
            if force_after_method_failure && !options.force_method_failure {
                options.to_mut().force_method_failure = true;
            }
        }
    }

    if allowed_methods.is_empty() {
        Ok(MatchOutcome::failure())
    } else {
        MatchOutcome::method_failure(allowed_methods)
    }
}
