//! Successful match handed to request handlers.

use crate::error::{Result, RouterError};
use crate::request::Params;
use crate::result::MatchOutcome;

/// Parameters and name of the route that matched a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    params: Params,
    matched_route_name: Option<String>,
}

impl RouteMatch {
    /// Creates a route match from parameters.
    #[must_use]
    pub const fn new(params: Params) -> Self {
        Self {
            params,
            matched_route_name: None,
        }
    }

    /// Creates a route match from a successful outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidState`] for a failed outcome.
    pub fn from_outcome(outcome: &MatchOutcome) -> Result<Self> {
        if !outcome.is_success() {
            return Err(RouterError::InvalidState(
                "Route match cannot be created from failure route result".into(),
            ));
        }
        Ok(Self {
            params: outcome.params().clone(),
            matched_route_name: outcome.route_name().map(str::to_string),
        })
    }

    /// Sets the matched route name.
    #[must_use]
    pub fn with_matched_route_name(mut self, name: impl Into<String>) -> Self {
        self.matched_route_name = Some(name.into());
        self
    }

    /// Returns the matched route name.
    #[must_use]
    pub fn matched_route_name(&self) -> Option<&str> {
        self.matched_route_name.as_deref()
    }

    /// Gets a parameter value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Gets a parameter value or `default`.
    #[must_use]
    pub fn param_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.param(name).unwrap_or(default)
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.param(name).and_then(|v| v.parse().ok())
    }

    /// Sets a parameter.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Returns all parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl TryFrom<MatchOutcome> for RouteMatch {
    type Error = RouterError;

    fn try_from(outcome: MatchOutcome) -> Result<Self> {
        Self::from_outcome(&outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> MatchOutcome {
        let mut params = Params::new();
        params.insert("id".into(), "42".into());
        params.insert("slug".into(), "hello".into());
        MatchOutcome::matched(params, Some("blog/post".into()))
    }

    #[test]
    fn test_from_success() {
        let route_match = RouteMatch::from_outcome(&outcome()).unwrap();
        assert_eq!(route_match.matched_route_name(), Some("blog/post"));
        assert_eq!(route_match.param("slug"), Some("hello"));
        assert_eq!(route_match.param("missing"), None);
        assert_eq!(route_match.param_or("missing", "x"), "x");
    }

    #[test]
    fn test_from_failure() {
        assert!(RouteMatch::from_outcome(&MatchOutcome::failure()).is_err());
        let method_failure = MatchOutcome::method_failure(["GET"]).unwrap();
        assert!(RouteMatch::try_from(method_failure).is_err());
    }

    #[test]
    fn test_parse() {
        let route_match = RouteMatch::try_from(outcome()).unwrap();
        assert_eq!(route_match.parse::<u32>("id"), Some(42));
        assert_eq!(route_match.parse::<u32>("slug"), None);
    }

    #[test]
    fn test_set_param() {
        let mut route_match = RouteMatch::new(Params::new()).with_matched_route_name("home");
        route_match.set_param("controller", "index");
        assert_eq!(route_match.param("controller"), Some("index"));
        assert_eq!(route_match.iter().collect::<Vec<_>>(), [("controller", "index")]);
        assert_eq!(route_match.params().len(), 1);
    }
}
