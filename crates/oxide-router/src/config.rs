//! Building route trees from configuration.
//!
//! Configuration is plain serde data, usually JSON:
//!
//! ```
//! use oxide_router::{Request, Route, RouteFactory, RouteSpec, Uri};
//! use oxide_router::config::NamedRoutes;
//!
//! let spec: RouteSpec = serde_json::from_value(serde_json::json!({
//!     "type": "literal",
//!     "options": { "route": "/blog" },
//!     "may_terminate": true,
//!     "child_routes": {
//!         "post": {
//!             "type": "segment",
//!             "options": { "route": "/:slug", "constraints": { "slug": "[a-z-]+" } }
//!         }
//!     }
//! }))?;
//!
//! let built = RouteFactory::new().route_from_spec(&spec, &NamedRoutes::new())?;
//! let outcome = built.route.match_request(&Request::get(Uri::from_path("/blog/hello-world")), 0, &Default::default())?;
//! assert_eq!(outcome.route_name(), Some("post"));
//! # Ok::<(), oxide_router::RouterError>(())
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, RouterError};
use crate::request::Params;
use crate::route::Route;
use crate::routes::{Chain, Hostname, Literal, Method, Part, Regex, Scheme, Segment};
use crate::stack::{RouteStack, TreeRouteStack};

/// A route in configuration: a prototype name or a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteSpec {
    /// Reference to a named prototype.
    Prototype(String),
    /// Inline definition.
    Definition(Box<RouteDefinition>),
}

impl From<RouteDefinition> for RouteSpec {
    fn from(definition: RouteDefinition) -> Self {
        Self::Definition(Box::new(definition))
    }
}

/// An inline route definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// Route type, looked up in the [`RouteFactory`].
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub route_type: Option<String>,
    /// Options passed to the route type's constructor.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
    /// Priority in the enclosing stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// With child routes: whether the route also matches on its own.
    #[serde(default)]
    pub may_terminate: bool,
    /// Child routes; turns the route into a [`Part`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_routes: Option<NamedRoutes>,
    /// Routes chained after this one; turns the route into a [`Chain`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_routes: Option<Vec<RouteSpec>>,
}

impl RouteDefinition {
    /// Creates a definition of the given type.
    pub fn new(route_type: impl Into<String>, options: Value) -> Self {
        Self {
            route_type: Some(route_type.into()),
            options,
            ..Self::default()
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds a child route.
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, spec: impl Into<RouteSpec>) -> Self {
        self.child_routes
            .get_or_insert_with(NamedRoutes::new)
            .push(name, spec);
        self
    }

    /// Sets `may_terminate`.
    #[must_use]
    pub const fn with_may_terminate(mut self, may_terminate: bool) -> Self {
        self.may_terminate = may_terminate;
        self
    }

    /// Adds a chained route.
    #[must_use]
    pub fn with_chained(mut self, spec: impl Into<RouteSpec>) -> Self {
        self.chain_routes.get_or_insert_with(Vec::new).push(spec.into());
        self
    }
}

impl From<&str> for RouteSpec {
    fn from(prototype: &str) -> Self {
        Self::Prototype(prototype.to_string())
    }
}

/// Named route specs in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedRoutes(Vec<(String, RouteSpec)>);

impl NamedRoutes {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a route spec, replacing any spec with the same name.
    pub fn push(&mut self, name: impl Into<String>, spec: impl Into<RouteSpec>) {
        let name = name.into();
        self.0.retain(|(existing, _)| *existing != name);
        self.0.push((name, spec.into()));
    }

    /// Returns a spec by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteSpec> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    /// Iterates `(name, spec)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no specs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, S: Into<RouteSpec>> FromIterator<(N, S)> for NamedRoutes {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut routes = Self::new();
        for (name, spec) in iter {
            routes.push(name, spec);
        }
        routes
    }
}

impl<'de> Deserialize<'de> for NamedRoutes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // serde_json's map keeps insertion order with `preserve_order`.
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        map.into_iter()
            .map(|(name, spec)| {
                serde_json::from_value::<RouteSpec>(spec)
                    .map(|spec| (name, spec))
                    .map_err(de::Error::custom)
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for NamedRoutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, spec)| (name, spec)))
    }
}

/// Root configuration of a [`Router`](crate::Router).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Top level routes.
    #[serde(default)]
    pub routes: NamedRoutes,
    /// Named specs that routes can refer to by name.
    #[serde(default)]
    pub prototypes: NamedRoutes,
    /// Params added under every match.
    #[serde(default, deserialize_with = "scalar_params")]
    pub default_params: Params,
}

/// Deserializes a map whose values are strings, numbers or booleans into
/// string params.
fn scalar_params<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Params, D::Error> {
    let map = BTreeMap::<String, Value>::deserialize(deserializer)?;
    map.into_iter()
        .map(|(name, value)| match value {
            Value::String(value) => Ok((name, value)),
            Value::Number(value) => Ok((name, value.to_string())),
            Value::Bool(value) => Ok((name, value.to_string())),
            other => Err(de::Error::custom(format!(
                "param \"{name}\" must be a string, number or boolean, got {other}"
            ))),
        })
        .collect()
}

#[derive(Deserialize)]
struct LiteralOptions {
    route: String,
    #[serde(default, deserialize_with = "scalar_params")]
    defaults: Params,
}

#[derive(Deserialize)]
struct PatternOptions {
    route: String,
    #[serde(default)]
    constraints: HashMap<String, String>,
    #[serde(default, deserialize_with = "scalar_params")]
    defaults: Params,
}

#[derive(Deserialize)]
struct MethodOptions {
    verb: String,
    #[serde(default, deserialize_with = "scalar_params")]
    defaults: Params,
}

#[derive(Deserialize)]
struct SchemeOptions {
    scheme: String,
    #[serde(default, deserialize_with = "scalar_params")]
    defaults: Params,
}

#[derive(Deserialize)]
struct RegexOptions {
    regex: String,
    spec: String,
    #[serde(default, deserialize_with = "scalar_params")]
    defaults: Params,
}

/// Deserializes route options, treating absent options as an empty object.
///
/// # Errors
///
/// Returns [`RouterError::InvalidConfig`] naming the route type when the
/// options do not fit.
pub fn parse_options<T: DeserializeOwned>(route_type: &str, options: Value) -> Result<T> {
    let options = if options.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        options
    };
    serde_json::from_value(options)
        .map_err(|e| RouterError::InvalidConfig(format!("invalid options for \"{route_type}\" route: {e}")))
}

fn literal(options: Value) -> Result<Box<dyn Route>> {
    let options: LiteralOptions = parse_options("literal", options)?;
    Ok(Box::new(Literal::new(options.route, options.defaults)?))
}

fn segment(options: Value) -> Result<Box<dyn Route>> {
    let options: PatternOptions = parse_options("segment", options)?;
    Ok(Box::new(Segment::new(&options.route, options.constraints, options.defaults)?))
}

fn hostname(options: Value) -> Result<Box<dyn Route>> {
    let options: PatternOptions = parse_options("hostname", options)?;
    Ok(Box::new(Hostname::new(&options.route, options.constraints, options.defaults)?))
}

fn method(options: Value) -> Result<Box<dyn Route>> {
    let options: MethodOptions = parse_options("method", options)?;
    Ok(Box::new(Method::new(&options.verb, options.defaults)?))
}

fn scheme(options: Value) -> Result<Box<dyn Route>> {
    let options: SchemeOptions = parse_options("scheme", options)?;
    Ok(Box::new(Scheme::new(options.scheme, options.defaults)))
}

fn regex(options: Value) -> Result<Box<dyn Route>> {
    let options: RegexOptions = parse_options("regex", options)?;
    Ok(Box::new(Regex::new(&options.regex, options.spec, options.defaults)?))
}

/// Builds a route from its `options` object.
pub type RouteConstructor = fn(Value) -> Result<Box<dyn Route>>;

/// A route built from a spec, with the priority its definition asked for.
#[derive(Debug)]
pub struct BuiltRoute {
    /// The route.
    pub route: Box<dyn Route>,
    /// Priority from the definition, if any.
    pub priority: Option<i32>,
}

/// Registry of route types.
///
/// Type names are case-insensitive. The built-in types are `literal`,
/// `segment`, `hostname`, `method`, `regex` and `scheme`.
#[derive(Debug, Clone)]
pub struct RouteFactory {
    constructors: HashMap<String, RouteConstructor>,
}

impl Default for RouteFactory {
    fn default() -> Self {
        let mut factory = Self {
            constructors: HashMap::new(),
        };
        factory.register("literal", literal);
        factory.register("segment", segment);
        factory.register("hostname", hostname);
        factory.register("method", method);
        factory.register("regex", regex);
        factory.register("scheme", scheme);
        factory
    }
}

impl RouteFactory {
    /// Creates a factory knowing the built-in route types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route type, replacing any type with the same name.
    pub fn register(&mut self, route_type: &str, constructor: RouteConstructor) {
        self.constructors
            .insert(route_type.to_lowercase(), constructor);
    }

    /// Returns true if the route type is known.
    #[must_use]
    pub fn has_type(&self, route_type: &str) -> bool {
        self.constructors.contains_key(&route_type.to_lowercase())
    }

    /// Builds a route of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfig`] for an unknown type or bad
    /// options, and any construction error of the route itself.
    pub fn build(&self, route_type: &str, options: Value) -> Result<Box<dyn Route>> {
        let Some(constructor) = self.constructors.get(&route_type.to_lowercase()) else {
            warn!(route_type, "Unknown route type");
            return Err(RouterError::InvalidConfig(format!(
                "unknown route type \"{route_type}\""
            )));
        };
        let route = constructor(options)?;
        debug!(route_type, ?route, "Built route");
        Ok(route)
    }

    /// Builds a route from a spec, resolving prototype names in `prototypes`.
    ///
    /// Prototypes are resolved without prototypes of their own.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidConfig`] for unknown prototypes and
    /// types, definitions without a type, and routes used where a partial
    /// route is required. Construction errors of the routes themselves are
    /// passed through.
    pub fn route_from_spec(&self, spec: &RouteSpec, prototypes: &NamedRoutes) -> Result<BuiltRoute> {
        match spec {
            RouteSpec::Prototype(name) => {
                let Some(prototype) = prototypes.get(name) else {
                    warn!(prototype = name.as_str(), "Unknown prototype");
                    return Err(RouterError::InvalidConfig(format!(
                        "could not find prototype with name \"{name}\""
                    )));
                };
                self.route_from_spec(prototype, &NamedRoutes::new())
            }
            RouteSpec::Definition(definition) => self.route_from_definition(definition, prototypes),
        }
    }

    fn route_from_definition(
        &self,
        definition: &RouteDefinition,
        prototypes: &NamedRoutes,
    ) -> Result<BuiltRoute> {
        let built = if let Some(chain_routes) = &definition.chain_routes {
            self.chain_from_definition(definition, chain_routes, prototypes)?
        } else {
            let route_type = definition.route_type.as_deref().ok_or_else(|| {
                warn!(?definition, "Route definition without type");
                RouterError::InvalidConfig("missing \"type\" option".into())
            })?;
            BuiltRoute {
                route: self.build(route_type, definition.options.clone())?,
                priority: definition.priority,
            }
        };

        match &definition.child_routes {
            Some(child_routes) => self.part_from_definition(definition, built, child_routes, prototypes),
            None => Ok(built),
        }
    }

    fn chain_from_definition(
        &self,
        definition: &RouteDefinition,
        chain_routes: &[RouteSpec],
        prototypes: &NamedRoutes,
    ) -> Result<BuiltRoute> {
        let head = RouteDefinition {
            chain_routes: None,
            child_routes: None,
            ..definition.clone()
        };

        let mut members = Vec::with_capacity(chain_routes.len() + 1);
        members.push(("0".to_string(), self.route_from_definition(&head, prototypes)?.route));
        for (index, spec) in chain_routes.iter().enumerate() {
            let built = self.route_from_spec(spec, prototypes)?;
            members.push(((index + 1).to_string(), built.route));
        }

        let chain = Chain::from_routes(members).map_err(|e| RouterError::InvalidConfig(e.to_string()))?;
        Ok(BuiltRoute {
            route: Box::new(chain),
            priority: definition.priority,
        })
    }

    fn part_from_definition(
        &self,
        definition: &RouteDefinition,
        built: BuiltRoute,
        child_routes: &NamedRoutes,
        prototypes: &NamedRoutes,
    ) -> Result<BuiltRoute> {
        let mut children = TreeRouteStack::new();
        for (name, spec) in child_routes.iter() {
            let child = self.route_from_spec(spec, prototypes)?;
            children.add_route(name, child.route, child.priority);
        }

        let part = Part::from_route(built.route, Box::new(children), definition.may_terminate)
            .map_err(|e| RouterError::InvalidConfig(e.to_string()))?;
        Ok(BuiltRoute {
            route: Box::new(part),
            priority: built.priority,
        })
    }
}
