//! HTTP method route.

use crate::error::{Result, RouterError};
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri};
use crate::result::{PartialMatchOutcome, normalize_methods};
use crate::route::{AssembledUri, PartialRoute, partial_route};

/// Matches the request method without consuming any path.
///
/// A request with any other method yields a method failure listing the
/// accepted verbs, so enclosing routes can answer "405 Method Not Allowed"
/// instead of "404 Not Found".
#[derive(Debug, Clone)]
pub struct Method {
    verbs: Vec<String>,
    defaults: Params,
}

impl Method {
    /// Creates a method route from a comma-separated verb list such as
    /// `"GET,POST"`. Verbs are trimmed and compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidArgument`] when the list names no verb.
    pub fn new(verb: &str, defaults: Params) -> Result<Self> {
        let verbs = normalize_methods(verb.split(',').map(str::trim).filter(|v| !v.is_empty()));
        if verbs.is_empty() {
            return Err(RouterError::InvalidArgument(format!(
                "Method route requires at least one verb, got \"{verb}\""
            )));
        }
        Ok(Self { verbs, defaults })
    }

    /// Returns the accepted verbs, upper-cased.
    #[must_use]
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    fn assemble_uri(&self, uri: &Uri, _params: &Params, _options: &RouteOptions) -> Result<AssembledUri> {
        Ok(AssembledUri::new(uri.clone()))
    }
}

impl PartialRoute for Method {
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<PartialMatchOutcome> {
        let method = request.method.to_uppercase();
        if !options.force_method_failure && self.verbs.contains(&method) {
            return Ok(
                PartialMatchOutcome::matched(self.defaults.clone(), path_offset, 0, None)
                    .with_matched_allowed_methods(&self.verbs),
            );
        }
        PartialMatchOutcome::method_failure(&self.verbs, path_offset, 0)
    }
}

partial_route!(Method);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;

    fn request(method: &str) -> Request {
        Request::new(method, Uri::new())
    }

    #[test]
    fn test_parses_verb_list() {
        let route = Method::new(" get , Post,,put ", Params::new()).unwrap();
        assert_eq!(route.verbs(), ["GET", "POST", "PUT"]);
    }

    #[test]
    fn test_rejects_empty_verb_list() {
        assert!(Method::new("", Params::new()).is_err());
        assert!(Method::new(" , ", Params::new()).is_err());
    }

    #[test]
    fn test_matches_method() {
        let route = Method::new("GET,POST", Params::new()).unwrap();
        let outcome = route.partial_match(&request("post"), 3, &RouteOptions::new()).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.path_offset(), 3);
        assert_eq!(outcome.matched_length(), 0);
        assert_eq!(outcome.matched_allowed_methods(), ["GET", "POST"]);
    }

    #[test]
    fn test_method_failure() {
        let route = Method::new("GET,POST", Params::new()).unwrap();
        let outcome = route.partial_match(&request("PUT"), 0, &RouteOptions::new()).unwrap();
        assert!(outcome.is_method_failure());
        assert_eq!(outcome.allowed_methods(), ["GET", "POST"]);
    }

    #[test]
    fn test_forced_method_failure() {
        let route = Method::new("GET", Params::new()).unwrap();
        let options = RouteOptions::new().with_force_method_failure(true);
        let outcome = route.partial_match(&request("GET"), 0, &options).unwrap();
        assert!(outcome.is_method_failure());
        assert_eq!(outcome.allowed_methods(), ["GET"]);
    }

    #[test]
    fn test_full_match_requires_empty_path() {
        let route = Method::new("GET", Params::new()).unwrap();
        let on_root = Request::get(Uri::from_path("/"));
        assert!(route.match_request(&on_root, 0, &RouteOptions::new()).unwrap().is_failure());
        assert!(route.match_request(&request("GET"), 0, &RouteOptions::new()).unwrap().is_success());
        assert!(route.match_request(&request("PUT"), 0, &RouteOptions::new()).unwrap().is_method_failure());
    }

    #[test]
    fn test_assemble_leaves_uri_untouched() {
        let route = Method::new("GET", Params::new()).unwrap();
        let uri = Uri::from_path("/foo");
        let assembled = route.assemble(&uri, &Params::new(), &RouteOptions::new()).unwrap();
        assert_eq!(assembled.uri, uri);
    }
}
