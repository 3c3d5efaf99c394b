//! Part route: a partial route with child routes.

use std::borrow::Cow;

use crate::error::{Result, RouterError};
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri};
use crate::result::{MatchOutcome, intersect_methods};
use crate::route::{AssembledUri, PartialRoute, Route};
use crate::stack::{RouteStack, TreeRouteStack, merge_params};

/// A node of a route tree.
///
/// The part's own route matches the beginning of the path and its child
/// routes match the rest. When `may_terminate` is set the part also matches
/// on its own, if its route consumes the whole path.
///
/// A method failure of the part's own route does not stop matching: the
/// children are still tried, with method routes forced to fail, so that the
/// reported allowed methods are as precise as possible.
#[derive(Debug)]
pub struct Part {
    route: Box<dyn PartialRoute>,
    children: Box<dyn RouteStack>,
    may_terminate: bool,
}

impl Part {
    /// Creates a part with an empty [`TreeRouteStack`] of children.
    #[must_use]
    pub fn new(route: Box<dyn PartialRoute>, may_terminate: bool) -> Self {
        Self::with_children(route, Box::new(TreeRouteStack::new()), may_terminate)
    }

    /// Creates a part with the given child stack.
    #[must_use]
    pub fn with_children(
        route: Box<dyn PartialRoute>,
        children: Box<dyn RouteStack>,
        may_terminate: bool,
    ) -> Self {
        Self {
            route,
            children,
            may_terminate,
        }
    }

    /// Creates a part from any route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidArgument`] when `route` cannot match
    /// part of a path.
    pub fn from_route(
        route: Box<dyn Route>,
        children: Box<dyn RouteStack>,
        may_terminate: bool,
    ) -> Result<Self> {
        let route = route.into_partial().map_err(|route| {
            RouterError::InvalidArgument(format!(
                "Part route requires a partial route, got {route:?}"
            ))
        })?;
        Ok(Self::with_children(route, children, may_terminate))
    }

    /// Returns true if the part matches without a child.
    #[must_use]
    pub const fn may_terminate(&self) -> bool {
        self.may_terminate
    }

    /// Returns the child stack.
    #[must_use]
    pub fn children(&self) -> &dyn RouteStack {
        self.children.as_ref()
    }
}

impl Route for Part {
    fn match_request(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<MatchOutcome> {
        let own = self.route.partial_match(request, path_offset, options)?;

        if own.is_failure() && !own.is_method_failure() {
            return Ok(MatchOutcome::failure());
        }

        if self.may_terminate && own.is_full_path_match(request.path().len()) {
            if own.is_method_failure() {
                return MatchOutcome::method_failure(own.allowed_methods());
            }
            return Ok(MatchOutcome::matched(own.params().clone(), None));
        }

        let mut child_options = Cow::Borrowed(options);
        if own.is_success() {
            child_options.to_mut().inherit_params(own.params());
        }
        if own.is_method_failure() {
            child_options.to_mut().force_method_failure = true;
        }

        let next_offset = path_offset + own.matched_length();
        let child = self
            .children
            .match_request(request, next_offset, &child_options)?;

        if own.is_success() && child.is_success() {
            let params = merge_params(own.params(), child.params());
            return child.with_matched_params(params);
        }

        if own.is_method_failure() && child.is_method_failure() {
            return method_failure_or_failure(intersect_methods(
                own.allowed_methods(),
                child.allowed_methods(),
            ));
        }

        if own.is_method_failure() && child.is_success() {
            return MatchOutcome::method_failure(own.allowed_methods());
        }

        if child.is_method_failure() {
            let own_methods = own.matched_allowed_methods();
            if own_methods.is_empty() {
                return MatchOutcome::method_failure(child.allowed_methods());
            }
            return method_failure_or_failure(intersect_methods(own_methods, child.allowed_methods()));
        }

        Ok(MatchOutcome::failure())
    }

    fn assemble(&self, uri: &Uri, params: &Params, options: &RouteOptions) -> Result<AssembledUri> {
        let mut own_options = options.clone().with_has_child(options.name.is_some());
        own_options.name = None;

        let own = self.route.assemble(uri, params, &own_options)?;
        let mut remaining = params.clone();
        for name in &own.consumed_params {
            remaining.remove(name);
        }

        if options.name.is_none() {
            if !self.may_terminate {
                return Err(RouterError::MayNotTerminate);
            }
            return Ok(own);
        }

        let child = self.children.assemble(&own.uri, &remaining, options)?;
        let mut consumed = own.consumed_params;
        consumed.extend(child.consumed_params);
        Ok(AssembledUri::new(child.uri).with_consumed_params(consumed))
    }

    fn into_partial(self: Box<Self>) -> std::result::Result<Box<dyn PartialRoute>, Box<dyn Route>> {
        Err(self)
    }

    fn as_stack(&self) -> Option<&dyn RouteStack> {
        Some(self)
    }
}

fn method_failure_or_failure(methods: Vec<String>) -> Result<MatchOutcome> {
    if methods.is_empty() {
        return Ok(MatchOutcome::failure());
    }
    MatchOutcome::method_failure(methods)
}

impl RouteStack for Part {
    fn add_route(&mut self, name: &str, route: Box<dyn Route>, priority: Option<i32>) {
        self.children.add_route(name, route, priority);
    }

    fn remove_route(&mut self, name: &str) -> Option<Box<dyn Route>> {
        self.children.remove_route(name)
    }

    fn route(&self, name: &str) -> Option<&dyn Route> {
        self.children.route(name)
    }

    fn route_names(&self) -> Vec<&str> {
        self.children.route_names()
    }

    fn clear_routes(&mut self) {
        self.children.clear_routes();
    }

    fn set_default_params(&mut self, params: Params) {
        self.children.set_default_params(params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{Literal, Method, Segment};

    fn literal(path: &str) -> Box<Literal> {
        Box::new(Literal::new(path, Params::new()).unwrap())
    }

    fn method(verb: &str) -> Box<Method> {
        Box::new(Method::new(verb, Params::new()).unwrap())
    }

    fn request(method: &str, path: &str) -> Request {
        Request::new(method, Uri::from_path(path))
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn foo_bar() -> Part {
        let mut part = Part::new(literal("/foo"), true);
        part.add_route("bar", literal("/bar"), None);
        part
    }

    fn match_path(part: &Part, method: &str, path: &str) -> MatchOutcome {
        part.match_request(&request(method, path), 0, &RouteOptions::new())
            .unwrap()
    }

    #[test]
    fn test_terminating_part() {
        let part = foo_bar();

        let outcome = match_path(&part, "GET", "/foo");
        assert!(outcome.is_success());
        assert_eq!(outcome.route_name(), None);

        let outcome = match_path(&part, "GET", "/foo/bar");
        assert!(outcome.is_success());
        assert_eq!(outcome.route_name(), Some("bar"));

        assert!(match_path(&part, "GET", "/foo/baz").is_failure());
        assert!(match_path(&part, "GET", "/bar").is_failure());
    }

    #[test]
    fn test_non_terminating_part() {
        let mut part = Part::new(literal("/foo"), false);
        part.add_route("bar", literal("/bar"), None);
        assert!(match_path(&part, "GET", "/foo").is_failure());
        assert!(match_path(&part, "GET", "/foo/bar").is_success());
    }

    #[test]
    fn test_params_are_merged_child_wins() {
        let own = Segment::new("/:lang", Default::default(), params(&[("page", "home")])).unwrap();
        let mut part = Part::new(Box::new(own), false);
        part.add_route("page", Box::new(Segment::new("/:page", Default::default(), Params::new()).unwrap()), None);

        let outcome = match_path(&part, "GET", "/en/about");
        assert_eq!(outcome.params(), &params(&[("lang", "en"), ("page", "about")]));
        assert_eq!(outcome.route_name(), Some("page"));
    }

    #[test]
    fn test_children_see_parent_params() {
        let own = Segment::new("/:locale", Default::default(), Params::new()).unwrap();
        let mut part = Part::new(Box::new(own), false);
        part.add_route("about", Box::new(Segment::new("/{about}", Default::default(), Params::new()).unwrap()), None);

        let translator = crate::translator::MessageCatalog::new("en")
            .message("default", "de", "about", "ueber");
        let options = RouteOptions::new().with_translator(std::sync::Arc::new(translator));
        let outcome = part
            .match_request(&request("GET", "/de/ueber"), 0, &options)
            .unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn test_own_method_failure_on_terminating_match() {
        let mut part = Part::new(method("GET"), true);
        part.add_route("bar", literal("/bar"), None);
        let outcome = match_path(&part, "POST", "");
        assert!(outcome.is_method_failure());
        assert_eq!(outcome.allowed_methods(), ["GET"]);
    }

    #[test]
    fn test_own_method_failure_with_child_success() {
        let mut part = Part::new(method("GET"), false);
        part.add_route("bar", literal("/bar"), None);
        let outcome = match_path(&part, "POST", "/bar");
        assert!(outcome.is_method_failure());
        assert_eq!(outcome.allowed_methods(), ["GET"]);
    }

    #[test]
    fn test_own_method_failure_without_child_match() {
        let mut part = Part::new(method("GET"), false);
        part.add_route("bar", literal("/bar"), None);
        assert!(!match_path(&part, "POST", "/baz").is_method_failure());
    }

    #[test]
    fn test_method_failures_intersect() {
        let mut part = Part::new(method("GET,POST"), false);
        let mut child = Part::new(method("POST,PUT"), false);
        child.add_route("path", literal("/foo"), None);
        part.add_route("child", Box::new(child), None);

        let outcome = match_path(&part, "DELETE", "/foo");
        assert!(outcome.is_method_failure());
        assert_eq!(outcome.allowed_methods(), ["POST"]);
    }

    #[test]
    fn test_disjoint_method_failures_fail_plainly() {
        let mut part = Part::new(method("GET"), false);
        let mut child = Part::new(method("PUT"), false);
        child.add_route("path", literal("/foo"), None);
        part.add_route("child", Box::new(child), None);

        let outcome = match_path(&part, "DELETE", "/foo");
        assert!(outcome.is_failure());
        assert!(!outcome.is_method_failure());
    }

    #[test]
    fn test_child_method_failure_narrowed_by_own_methods() {
        let mut part = Part::new(method("GET,POST"), false);
        let mut child = Part::new(method("POST,PUT"), false);
        child.add_route("path", literal("/foo"), None);
        part.add_route("child", Box::new(child), None);

        // GET passes the part's own method route and fails the child's.
        let outcome = match_path(&part, "GET", "/foo");
        assert!(outcome.is_method_failure());
        assert_eq!(outcome.allowed_methods(), ["POST"]);
    }

    #[test]
    fn test_child_method_failure_without_own_methods() {
        let mut part = Part::new(literal("/api"), false);
        let mut child = Part::new(method("PUT"), false);
        child.add_route("path", literal("/foo"), None);
        part.add_route("child", Box::new(child), None);

        let outcome = match_path(&part, "GET", "/api/foo");
        assert!(outcome.is_method_failure());
        assert_eq!(outcome.allowed_methods(), ["PUT"]);
    }

    #[test]
    fn test_assemble_own_route() {
        let part = foo_bar();
        let assembled = part.assemble(&Uri::new(), &Params::new(), &RouteOptions::new()).unwrap();
        assert_eq!(assembled.uri.path(), "/foo");
    }

    #[test]
    fn test_assemble_child() {
        let part = foo_bar();
        let assembled = part
            .assemble(&Uri::new(), &Params::new(), &RouteOptions::new().with_name("bar"))
            .unwrap();
        assert_eq!(assembled.uri.path(), "/foo/bar");
    }

    #[test]
    fn test_assemble_may_not_terminate() {
        let part = Part::new(literal("/foo"), false);
        let err = part.assemble(&Uri::new(), &Params::new(), &RouteOptions::new()).unwrap_err();
        assert!(matches!(err, RouterError::MayNotTerminate));
    }

    #[test]
    fn test_assemble_strips_consumed_params() {
        let own = Segment::new("/:id", Default::default(), Params::new()).unwrap();
        let mut part = Part::new(Box::new(own), false);
        part.add_route("opt", Box::new(Segment::new("[/:id]", Default::default(), Params::new()).unwrap()), None);

        let assembled = part
            .assemble(&Uri::new(), &params(&[("id", "1")]), &RouteOptions::new().with_name("opt"))
            .unwrap();
        assert_eq!(assembled.uri.path(), "/1");
        assert_eq!(assembled.consumed_params, ["id"]);
    }

    #[test]
    fn test_assemble_own_route_renders_defaults_before_child() {
        let own = Segment::new("/:lang[/:region]", Default::default(), params(&[("region", "us")])).unwrap();
        let mut part = Part::new(Box::new(own), true);
        part.add_route("home", literal("/home"), None);

        let assembled = part
            .assemble(&Uri::new(), &params(&[("lang", "en")]), &RouteOptions::new().with_name("home"))
            .unwrap();
        assert_eq!(assembled.uri.path(), "/en/us/home");

        let assembled = part
            .assemble(&Uri::new(), &params(&[("lang", "en")]), &RouteOptions::new())
            .unwrap();
        assert_eq!(assembled.uri.path(), "/en");
    }

    #[test]
    fn test_from_route_rejects_stacks() {
        let err = Part::from_route(Box::new(TreeRouteStack::new()), Box::new(TreeRouteStack::new()), true)
            .unwrap_err();
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_child_management() {
        let mut part = foo_bar();
        assert!(part.has_route("bar"));
        assert_eq!(part.route_names(), ["bar"]);
        part.clear_routes();
        assert!(part.children().route_names().is_empty());
    }
}
