//! Route traits.
//!
//! Every route can match a full request and assemble a URI. Routes that can
//! also match a piece of the path, leaving the rest to someone else,
//! implement [`PartialRoute`]; only those can be chained or carry child
//! routes.

use std::fmt;

use crate::error::Result;
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri};
use crate::result::{MatchOutcome, PartialMatchOutcome};
use crate::stack::RouteStack;

/// A URI produced by [`Route::assemble`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledUri {
    /// The assembled URI.
    pub uri: Uri,
    /// Names of the parameters the route used.
    pub consumed_params: Vec<String>,
}

impl AssembledUri {
    /// Creates an assembled URI that consumed no parameters.
    #[must_use]
    pub const fn new(uri: Uri) -> Self {
        Self {
            uri,
            consumed_params: Vec::new(),
        }
    }

    /// Sets the consumed parameter names.
    #[must_use]
    pub fn with_consumed_params(mut self, consumed_params: Vec<String>) -> Self {
        self.consumed_params = consumed_params;
        self
    }
}

/// A route: matches requests and assembles URIs.
pub trait Route: Send + Sync + fmt::Debug {
    /// Matches `request` from `path_offset` to the end of the path.
    ///
    /// # Errors
    ///
    /// Returns an error when the call itself is invalid, for example a
    /// translated literal without a translator. A request that simply does
    /// not match is a failed [`MatchOutcome`], not an error.
    fn match_request(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<MatchOutcome>;

    /// Assembles a URI on top of `uri` from `params`.
    ///
    /// # Errors
    ///
    /// Returns an error when a required parameter is missing or the route
    /// named in the options cannot be resolved.
    fn assemble(&self, uri: &Uri, params: &Params, options: &RouteOptions) -> Result<AssembledUri>;

    /// Converts into a partial route, or returns the route unchanged when it
    /// cannot match part of a path.
    fn into_partial(self: Box<Self>) -> std::result::Result<Box<dyn PartialRoute>, Box<dyn Route>>;

    /// Returns the route as a stack when it has child routes.
    fn as_stack(&self) -> Option<&dyn RouteStack> {
        None
    }
}

/// A route that can match part of a path.
pub trait PartialRoute: Route {
    /// Matches `request` starting at `path_offset`, consuming as much of the
    /// path as the route needs.
    ///
    /// # Errors
    ///
    /// Same as [`Route::match_request`].
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<PartialMatchOutcome>;
}

/// Full match in terms of a partial match: anything short of the end of the
/// path is a failure.
pub(crate) fn match_full_path<R: PartialRoute + ?Sized>(
    route: &R,
    request: &Request,
    path_offset: usize,
    options: &RouteOptions,
) -> Result<MatchOutcome> {
    let outcome = route.partial_match(request, path_offset, options)?;
    Ok(outcome.into_full_match(request.path().len()))
}

/// Implements [`Route`] for a type that implements [`PartialRoute`] and an
/// `assemble_uri` inherent method.
macro_rules! partial_route {
    ($ty:ty) => {
        impl $crate::route::Route for $ty {
            fn match_request(
                &self,
                request: &$crate::request::Request,
                path_offset: usize,
                options: &$crate::options::RouteOptions,
            ) -> $crate::error::Result<$crate::result::MatchOutcome> {
                $crate::route::match_full_path(self, request, path_offset, options)
            }

            fn assemble(
                &self,
                uri: &$crate::request::Uri,
                params: &$crate::request::Params,
                options: &$crate::options::RouteOptions,
            ) -> $crate::error::Result<$crate::route::AssembledUri> {
                self.assemble_uri(uri, params, options)
            }

            fn into_partial(
                self: Box<Self>,
            ) -> ::std::result::Result<
                Box<dyn $crate::route::PartialRoute>,
                Box<dyn $crate::route::Route>,
            > {
                Ok(self)
            }
        }
    };
}

pub(crate) use partial_route;
