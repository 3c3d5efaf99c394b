//! Scheme route.

use crate::error::Result;
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri};
use crate::result::PartialMatchOutcome;
use crate::route::{AssembledUri, PartialRoute, partial_route};

/// Matches the URI scheme without consuming any path.
#[derive(Debug, Clone)]
pub struct Scheme {
    scheme: String,
    defaults: Params,
}

impl Scheme {
    /// Creates a scheme route. The comparison is case-sensitive.
    pub fn new(scheme: impl Into<String>, defaults: Params) -> Self {
        Self {
            scheme: scheme.into(),
            defaults,
        }
    }

    fn assemble_uri(&self, uri: &Uri, _params: &Params, _options: &RouteOptions) -> Result<AssembledUri> {
        Ok(AssembledUri::new(uri.clone().with_scheme(self.scheme.as_str())))
    }
}

impl PartialRoute for Scheme {
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        _options: &RouteOptions,
    ) -> Result<PartialMatchOutcome> {
        if request.uri().scheme() != self.scheme {
            return Ok(PartialMatchOutcome::failure());
        }
        Ok(PartialMatchOutcome::matched(
            self.defaults.clone(),
            path_offset,
            0,
            None,
        ))
    }
}

partial_route!(Scheme);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;

    #[test]
    fn test_matches_scheme() {
        let route = Scheme::new("https", Params::new());
        let request = Request::get(Uri::from_path("/foo").with_scheme("https"));
        let outcome = route.partial_match(&request, 0, &RouteOptions::new()).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.matched_length(), 0);
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        let route = Scheme::new("https", Params::new());
        let request = Request::get(Uri::new().with_scheme("HTTPS"));
        assert!(route.partial_match(&request, 0, &RouteOptions::new()).unwrap().is_failure());

        let request = Request::get(Uri::new().with_scheme("http"));
        assert!(route.match_request(&request, 0, &RouteOptions::new()).unwrap().is_failure());
    }

    #[test]
    fn test_full_match_on_empty_path() {
        let route = Scheme::new("https", Params::new());
        let request = Request::get(Uri::new().with_scheme("https"));
        assert!(route.match_request(&request, 0, &RouteOptions::new()).unwrap().is_success());
    }

    #[test]
    fn test_assemble_sets_scheme() {
        let route = Scheme::new("https", Params::new());
        let assembled = route
            .assemble(&Uri::from_path("/foo").with_scheme("http"), &Params::new(), &RouteOptions::new())
            .unwrap();
        assert_eq!(assembled.uri.scheme(), "https");
        assert_eq!(assembled.uri.path(), "/foo");
    }
}
