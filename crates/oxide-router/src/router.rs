//! Router facade.

use tracing::debug;

use crate::config::{NamedRoutes, RouteFactory, RouteSpec, RouterConfig};
use crate::error::Result;
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri};
use crate::result::MatchOutcome;
use crate::route::Route;
use crate::route_match::RouteMatch;
use crate::stack::{RouteStack, TreeRouteStack};

/// Owns the root route stack, the route factory and the prototypes.
///
/// # Example
///
/// ```
/// use oxide_router::{Params, Request, Router, Uri};
///
/// let mut router = Router::new();
/// router.add_route("user", &serde_json::from_value(serde_json::json!({
///     "type": "segment",
///     "options": { "route": "/users/:id", "constraints": { "id": "\\d+" } }
/// }))?)?;
///
/// let route_match = router.route_match(&Request::get(Uri::from_path("/users/42")))?.unwrap();
/// assert_eq!(route_match.matched_route_name(), Some("user"));
/// assert_eq!(route_match.parse::<u32>("id"), Some(42));
///
/// let params = Params::from([("id".to_string(), "7".to_string())]);
/// let uri = router.assemble("user", &params, Default::default())?;
/// assert_eq!(uri.path(), "/users/7");
/// # Ok::<(), oxide_router::RouterError>(())
/// ```
#[derive(Debug)]
pub struct Router<S = TreeRouteStack> {
    routes: S,
    factory: RouteFactory,
    prototypes: NamedRoutes,
    base_uri: Uri,
}

impl Router {
    /// Creates a router with an empty [`TreeRouteStack`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_stack(TreeRouteStack::new())
    }

    /// Creates a router from configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building a prototype or route.
    pub fn from_config(config: RouterConfig) -> Result<Self> {
        let mut router = Self::new();
        router.load_config(config)?;
        Ok(router)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RouteStack> Router<S> {
    /// Creates a router around an existing stack.
    pub fn with_stack(routes: S) -> Self {
        Self {
            routes,
            factory: RouteFactory::new(),
            prototypes: NamedRoutes::new(),
            base_uri: Uri::new(),
        }
    }

    /// Replaces the route factory.
    #[must_use]
    pub fn with_factory(mut self, factory: RouteFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Sets the URI assembling starts from.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: Uri) -> Self {
        self.base_uri = base_uri;
        self
    }

    /// Adds the prototypes, default params and routes of `config`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building a prototype or route.
    pub fn load_config(&mut self, config: RouterConfig) -> Result<()> {
        for (name, spec) in config.prototypes.iter() {
            self.add_prototype(name, spec.clone())?;
        }
        if !config.default_params.is_empty() {
            self.routes.set_default_params(config.default_params);
        }
        for (name, spec) in config.routes.iter() {
            self.add_route(name, spec)?;
        }
        debug!(
            routes = config.routes.len(),
            prototypes = config.prototypes.len(),
            "Loaded route configuration"
        );
        Ok(())
    }

    /// Returns the route factory.
    #[must_use]
    pub const fn factory(&self) -> &RouteFactory {
        &self.factory
    }

    /// Returns the route factory, mutably, to register route types.
    pub fn factory_mut(&mut self) -> &mut RouteFactory {
        &mut self.factory
    }

    /// Returns the root stack.
    #[must_use]
    pub const fn routes(&self) -> &S {
        &self.routes
    }

    /// Returns the root stack, mutably.
    pub fn routes_mut(&mut self) -> &mut S {
        &mut self.routes
    }

    /// Builds a route from `spec` and adds it to the root stack.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building the route.
    pub fn add_route(&mut self, name: &str, spec: &RouteSpec) -> Result<()> {
        let built = self.factory.route_from_spec(spec, &self.prototypes)?;
        debug!(route = name, priority = ?built.priority, "Adding route");
        self.routes.add_route(name, built.route, built.priority);
        Ok(())
    }

    /// Adds an already built route to the root stack.
    pub fn insert_route(&mut self, name: &str, route: Box<dyn Route>, priority: Option<i32>) {
        self.routes.add_route(name, route, priority);
    }

    /// Registers a prototype routes can refer to by name.
    ///
    /// The prototype is built once to validate it; every reference builds a fresh
    /// route from it.
    ///
    /// # Errors
    ///
    /// Returns any error raised while building the prototype.
    pub fn add_prototype(&mut self, name: &str, spec: RouteSpec) -> Result<()> {
        self.factory.route_from_spec(&spec, &NamedRoutes::new())?;
        self.prototypes.push(name, spec);
        Ok(())
    }

    /// Returns a prototype by name.
    #[must_use]
    pub fn prototype(&self, name: &str) -> Option<&RouteSpec> {
        self.prototypes.get(name)
    }

    /// Returns all prototypes.
    #[must_use]
    pub const fn prototypes(&self) -> &NamedRoutes {
        &self.prototypes
    }

    /// Matches a request against the root stack.
    ///
    /// # Errors
    ///
    /// Returns errors raised by the routes, for example a missing translator.
    pub fn match_request(&self, request: &Request) -> Result<MatchOutcome> {
        let outcome = self.routes.match_request(request, 0, &RouteOptions::new())?;
        debug!(
            method = request.method.as_str(),
            path = request.path(),
            route = outcome.route_name(),
            success = outcome.is_success(),
            allowed_methods = ?outcome.allowed_methods(),
            "Matched request"
        );
        Ok(outcome)
    }

    /// Matches a request, returning the route match on success.
    ///
    /// # Errors
    ///
    /// Same as [`Router::match_request`].
    pub fn route_match(&self, request: &Request) -> Result<Option<RouteMatch>> {
        let outcome = self.match_request(request)?;
        if outcome.is_success() {
            return RouteMatch::from_outcome(&outcome).map(Some);
        }
        Ok(None)
    }

    /// Assembles the URI of the route called `name`, starting from the base
    /// URI.
    ///
    /// # Errors
    ///
    /// Returns errors for unknown names and missing parameters.
    pub fn assemble(&self, name: &str, params: &Params, options: RouteOptions) -> Result<Uri> {
        let options = options.with_name(name);
        let assembled = self.routes.assemble(&self.base_uri, params, &options)?;
        Ok(assembled.uri)
    }
}
