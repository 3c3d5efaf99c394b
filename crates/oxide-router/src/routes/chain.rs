//! Chain route: several partial routes matched one after another.

use std::borrow::Cow;

use crate::error::{Result, RouterError};
use crate::options::RouteOptions;
use crate::order::RouteOrder;
use crate::request::{Params, Request, Uri};
use crate::result::{PartialMatchOutcome, intersect_methods};
use crate::route::{AssembledUri, PartialRoute, Route, partial_route};

/// Matches its members in sequence, each continuing where the previous one
/// stopped.
///
/// All members must match. Parameters are merged, later members winning.
/// Members that accept only some methods narrow the methods the chain
/// accepts to the intersection of their sets.
#[derive(Debug, Default)]
pub struct Chain {
    routes: RouteOrder<dyn PartialRoute>,
}

impl Chain {
    /// Creates a chain matching `routes` in order.
    #[must_use]
    pub fn new(routes: Vec<Box<dyn PartialRoute>>) -> Self {
        let mut chain = Self::default();
        for (index, route) in routes.into_iter().enumerate().rev() {
            chain.routes.insert(index.to_string(), route, 0);
        }
        chain
    }

    /// Creates a chain from named routes.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidArgument`] when a route cannot match
    /// part of a path.
    pub fn from_routes(routes: Vec<(String, Box<dyn Route>)>) -> Result<Self> {
        let mut chain = Self::default();
        for (name, route) in routes.into_iter().rev() {
            let route = route.into_partial().map_err(|route| {
                RouterError::InvalidArgument(format!(
                    "Chain route can only chain partial routes, got {route:?}"
                ))
            })?;
            chain.routes.insert(name, route, 0);
        }
        Ok(chain)
    }

    /// Number of chained routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the chain has no routes. An empty chain never matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn assemble_uri(&self, uri: &Uri, params: &Params, options: &RouteOptions) -> Result<AssembledUri> {
        let mut uri = uri.clone();
        let mut params = params.clone();
        let mut consumed = Vec::new();
        let last = self.routes.len().saturating_sub(1);

        for (index, (_, route)) in self.routes.iter().enumerate() {
            let member_options = options
                .clone()
                .with_has_child(options.has_child || index != last);
            let assembled = route.assemble(&uri, &params, &member_options)?;
            for name in &assembled.consumed_params {
                params.remove(name);
            }
            uri = assembled.uri;
            consumed.extend(assembled.consumed_params);
        }

        Ok(AssembledUri::new(uri).with_consumed_params(consumed))
    }
}

impl PartialRoute for Chain {
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<PartialMatchOutcome> {
        if self.routes.is_empty() {
            return Ok(PartialMatchOutcome::failure());
        }

        let mut options = Cow::Borrowed(options);
        let mut next_offset = path_offset;
        let mut method_failure = false;
        let mut allowed_methods: Option<Vec<String>> = None;
        let mut params = Params::new();

        for (_, route) in self.routes.iter() {
            let outcome = route.partial_match(request, next_offset, &options)?;

            if outcome.is_method_failure() {
                method_failure = true;
                options.to_mut().force_method_failure = true;
                allowed_methods = Some(narrow(allowed_methods, outcome.allowed_methods()));
            } else if outcome.is_failure() {
                return Ok(outcome);
            } else {
                params.extend(outcome.params().iter().map(|(k, v)| (k.clone(), v.clone())));
                options.to_mut().inherit_params(&params);
                if !outcome.matched_allowed_methods().is_empty() {
                    allowed_methods = Some(narrow(allowed_methods, outcome.matched_allowed_methods()));
                }
            }

            next_offset += outcome.matched_length();
        }

        let matched_length = next_offset - path_offset;
        let allowed_methods = allowed_methods.unwrap_or_default();
        if method_failure {
            if allowed_methods.is_empty() {
                return Ok(PartialMatchOutcome::failure());
            }
            return PartialMatchOutcome::method_failure(allowed_methods, path_offset, matched_length);
        }

        Ok(PartialMatchOutcome::matched(params, path_offset, matched_length, None)
            .with_matched_allowed_methods(allowed_methods))
    }
}

fn narrow(current: Option<Vec<String>>, methods: &[String]) -> Vec<String> {
    match current {
        Some(current) => intersect_methods(&current, methods),
        None => methods.to_vec(),
    }
}

partial_route!(Chain);
