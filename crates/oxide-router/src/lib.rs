//! # oxide-router
//!
//! Composable route matching and URI assembly.
//!
//! This crate provides:
//! - Leaf routes: literal prefixes, path patterns, regular expressions,
//!   hostnames, schemes and HTTP methods
//! - Composition: chains of partial routes and parts with child routes
//! - Route stacks ordered by priority, with default parameters
//! - Reverse routing: assemble a URI from a route name and parameters
//! - Translated path literals through a pluggable [`Translator`]
//! - Building route trees from JSON-style configuration
//!
//! ## Quick Start
//!
//! ```
//! use oxide_router::{Literal, Part, Params, Request, Route, RouteOptions, RouteStack, Segment, TreeRouteStack, Uri};
//! use std::collections::HashMap;
//!
//! let mut blog = Part::new(Box::new(Literal::new("/blog", Params::new())?), true);
//! blog.add_route(
//!     "post",
//!     Box::new(Segment::new("/:slug", HashMap::new(), Params::new())?),
//!     None,
//! );
//!
//! let mut routes = TreeRouteStack::new();
//! routes.add_route("blog", Box::new(blog), None);
//!
//! let outcome = routes.match_request(&Request::get(Uri::from_path("/blog/hello")), 0, &RouteOptions::new())?;
//! assert_eq!(outcome.route_name(), Some("blog/post"));
//! assert_eq!(outcome.params()["slug"], "hello");
//! # Ok::<(), oxide_router::RouterError>(())
//! ```
//!
//! ## Path Patterns
//!
//! [`Segment`] and [`Hostname`] routes use a small pattern language:
//!
//! - `:name` is a parameter, ending at the next delimiter
//! - `:name{-/}` is a parameter ending at any of the listed characters
//! - `[...]` is an optional group, nestable
//! - `{key}` is a literal translated at match and assemble time
//!
//! ```
//! use oxide_router::{Params, Request, Route, RouteOptions, Segment, Uri};
//! use std::collections::HashMap;
//!
//! let route = Segment::new("/archive[/:year[/:month]]", HashMap::new(), Params::new())?;
//! let outcome = route.match_request(&Request::get(Uri::from_path("/archive/2024")), 0, &RouteOptions::new())?;
//! assert_eq!(outcome.params()["year"], "2024");
//! # Ok::<(), oxide_router::RouterError>(())
//! ```
//!
//! ## Method Failures
//!
//! A request whose path matches but whose method does not gives a method
//! failure listing the allowed methods, rather than a plain failure:
//!
//! ```
//! use oxide_router::{Chain, Literal, Method, Params, PartialRoute, Request, Route, RouteOptions, Uri};
//!
//! let route = Chain::new(vec![
//!     Box::new(Literal::new("/users", Params::new())?) as Box<dyn PartialRoute>,
//!     Box::new(Method::new("POST", Params::new())?),
//! ]);
//! let outcome = route.match_request(&Request::get(Uri::from_path("/users")), 0, &RouteOptions::new())?;
//! assert!(outcome.is_method_failure());
//! assert_eq!(outcome.allowed_methods(), ["POST"]);
//! # Ok::<(), oxide_router::RouterError>(())
//! ```
//!
//! ## Configuration
//!
//! ```
//! use oxide_router::{Request, Router, RouterConfig, Uri};
//!
//! let config: RouterConfig = serde_json::from_value(serde_json::json!({
//!     "routes": {
//!         "home": { "type": "literal", "options": { "route": "/" } }
//!     }
//! }))?;
//! let router = Router::from_config(config)?;
//! assert!(router.match_request(&Request::get(Uri::from_path("/")))?.is_success());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod error;
mod options;
mod order;
pub mod pattern;
mod request;
mod result;
mod route;
mod route_match;
mod router;
mod routes;
mod stack;
mod translator;

pub use config::{BuiltRoute, RouteConstructor, RouteDefinition, RouteFactory, RouteSpec, RouterConfig};
pub use error::{Result, RouterError};
pub use options::RouteOptions;
pub use order::RouteOrder;
pub use request::{Params, Request, Uri};
pub use result::{MatchOutcome, NameMode, PartialMatchOutcome};
pub use route::{AssembledUri, PartialRoute, Route};
pub use route_match::RouteMatch;
pub use router::Router;
pub use routes::{Chain, Hostname, Literal, Method, Part, Regex, Scheme, Segment};
pub use stack::{RouteStack, SimpleRouteStack, TranslatorAwareRouteStack, TreeRouteStack};
pub use translator::{MessageCatalog, Translator, DEFAULT_TEXT_DOMAIN};
