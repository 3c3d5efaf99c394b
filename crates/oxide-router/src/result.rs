//! Routing outcomes.
//!
//! A route either matches, fails, or fails because the request method is not
//! allowed on an otherwise matching path. All three states are ordinary
//! values: nothing here is an error.

use crate::error::{Result, RouterError};
use crate::request::Params;

/// How [`MatchOutcome::with_matched_route_name`] combines names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMode {
    /// Replace the existing name.
    #[default]
    Replace,
    /// Prepend as the parent part: `new/existing`.
    Prepend,
    /// Append as the child part: `existing/new`.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Success {
        params: Params,
        route_name: Option<String>,
    },
    Failure,
    MethodFailure {
        allowed_methods: Vec<String>,
    },
}

/// Upper-cases and deduplicates method names, keeping first-seen order.
pub(crate) fn normalize_methods<I, S>(methods: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for method in methods {
        let method = method.as_ref().to_uppercase();
        if !normalized.contains(&method) {
            normalized.push(method);
        }
    }
    normalized
}

/// Methods present in both lists, in the order of `left`.
pub(crate) fn intersect_methods(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .filter(|method| right.contains(method))
        .cloned()
        .collect()
}

/// Result of matching a request against a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    state: State,
}

impl MatchOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub const fn matched(params: Params, route_name: Option<String>) -> Self {
        Self {
            state: State::Success { params, route_name },
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            state: State::Failure,
        }
    }

    /// Creates a failure for a request whose path matched but whose method is
    /// not one of `allowed_methods`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidArgument`] when `allowed_methods` is empty.
    pub fn method_failure<I, S>(allowed_methods: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_methods = normalize_methods(allowed_methods);
        if allowed_methods.is_empty() {
            return Err(RouterError::InvalidArgument(
                "Method failure requires list of allowed methods".into(),
            ));
        }
        Ok(Self {
            state: State::MethodFailure { allowed_methods },
        })
    }

    /// Is this a routing success?
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.state, State::Success { .. })
    }

    /// Is this a routing failure, method failures included?
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Is this a failure caused by the request method?
    #[must_use]
    pub const fn is_method_failure(&self) -> bool {
        matches!(self.state, State::MethodFailure { .. })
    }

    /// Matched parameters; empty unless successful.
    #[must_use]
    pub fn params(&self) -> &Params {
        static EMPTY: Params = Params::new();
        match &self.state {
            State::Success { params, .. } => params,
            _ => &EMPTY,
        }
    }

    /// Matched route name, set by route stacks.
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        match &self.state {
            State::Success { route_name, .. } => route_name.as_deref(),
            _ => None,
        }
    }

    /// Allowed methods on method failure; empty otherwise.
    #[must_use]
    pub fn allowed_methods(&self) -> &[String] {
        match &self.state {
            State::MethodFailure { allowed_methods } => allowed_methods,
            _ => &[],
        }
    }

    /// Returns the outcome with its route name combined with `name`.
    ///
    /// When no name is set yet, every mode simply sets it.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidArgument`] for an empty name and
    /// [`RouterError::InvalidState`] when the outcome is not a success.
    pub fn with_matched_route_name(self, name: &str, mode: NameMode) -> Result<Self> {
        if name.is_empty() {
            return Err(RouterError::InvalidArgument(
                "Route name cannot be empty".into(),
            ));
        }
        let State::Success { params, route_name } = self.state else {
            return Err(RouterError::InvalidState(
                "Only successful routing can have matched route name".into(),
            ));
        };
        let route_name = match (mode, route_name) {
            (NameMode::Prepend, Some(existing)) => format!("{name}/{existing}"),
            (NameMode::Append, Some(existing)) => format!("{existing}/{name}"),
            _ => name.to_string(),
        };
        Ok(Self::matched(params, Some(route_name)))
    }

    /// Returns the outcome with its parameters replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidState`] when the outcome is not a success.
    pub fn with_matched_params(self, params: Params) -> Result<Self> {
        let State::Success { route_name, .. } = self.state else {
            return Err(RouterError::InvalidState(
                "Only successful routing can have matched params".into(),
            ));
        };
        Ok(Self::matched(params, route_name))
    }
}

/// Result of matching part of a request path.
///
/// Besides the match state it records where matching started and how many
/// path bytes were consumed, so composites can continue after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialMatchOutcome {
    outcome: MatchOutcome,
    path_offset: usize,
    matched_length: usize,
    matched_allowed_methods: Vec<String>,
}

impl PartialMatchOutcome {
    /// Creates a successful partial outcome.
    #[must_use]
    pub const fn matched(
        params: Params,
        path_offset: usize,
        matched_length: usize,
        route_name: Option<String>,
    ) -> Self {
        Self {
            outcome: MatchOutcome::matched(params, route_name),
            path_offset,
            matched_length,
            matched_allowed_methods: Vec::new(),
        }
    }

    /// Creates a failed partial outcome.
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            outcome: MatchOutcome::failure(),
            path_offset: 0,
            matched_length: 0,
            matched_allowed_methods: Vec::new(),
        }
    }

    /// Creates a method failure covering `matched_length` bytes from
    /// `path_offset`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidArgument`] when `allowed_methods` is empty.
    pub fn method_failure<I, S>(
        allowed_methods: I,
        path_offset: usize,
        matched_length: usize,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            outcome: MatchOutcome::method_failure(allowed_methods)?,
            path_offset,
            matched_length,
            matched_allowed_methods: Vec::new(),
        })
    }

    /// Records the methods a successful method route accepted.
    #[must_use]
    pub fn with_matched_allowed_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.matched_allowed_methods = normalize_methods(methods);
        self
    }

    /// See [`MatchOutcome::is_success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// See [`MatchOutcome::is_failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.outcome.is_failure()
    }

    /// See [`MatchOutcome::is_method_failure`].
    #[must_use]
    pub const fn is_method_failure(&self) -> bool {
        self.outcome.is_method_failure()
    }

    /// Matched parameters; empty unless successful.
    #[must_use]
    pub fn params(&self) -> &Params {
        self.outcome.params()
    }

    /// Matched route name.
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.outcome.route_name()
    }

    /// Allowed methods on method failure.
    #[must_use]
    pub fn allowed_methods(&self) -> &[String] {
        self.outcome.allowed_methods()
    }

    /// Methods accepted by a successful method match, if any were recorded.
    #[must_use]
    pub fn matched_allowed_methods(&self) -> &[String] {
        &self.matched_allowed_methods
    }

    /// Path offset matching started at.
    #[must_use]
    pub const fn path_offset(&self) -> usize {
        self.path_offset
    }

    /// Number of path bytes consumed from the offset.
    #[must_use]
    pub const fn matched_length(&self) -> usize {
        self.matched_length
    }

    /// Returns true if the outcome covers the path up to `path_length`.
    ///
    /// A plain failure never does, even for an empty path.
    #[must_use]
    pub const fn is_full_path_match(&self, path_length: usize) -> bool {
        if self.is_failure() && !self.is_method_failure() {
            return false;
        }
        self.path_offset + self.matched_length == path_length
    }

    /// See [`MatchOutcome::with_matched_route_name`].
    ///
    /// # Errors
    ///
    /// Same as [`MatchOutcome::with_matched_route_name`].
    pub fn with_matched_route_name(mut self, name: &str, mode: NameMode) -> Result<Self> {
        self.outcome = self.outcome.with_matched_route_name(name, mode)?;
        Ok(self)
    }

    /// See [`MatchOutcome::with_matched_params`].
    ///
    /// # Errors
    ///
    /// Same as [`MatchOutcome::with_matched_params`].
    pub fn with_matched_params(mut self, params: Params) -> Result<Self> {
        self.outcome = self.outcome.with_matched_params(params)?;
        Ok(self)
    }

    /// Converts to a full match outcome for a path of `path_length` bytes.
    ///
    /// Anything short of a full path match becomes a plain failure.
    #[must_use]
    pub fn into_full_match(self, path_length: usize) -> MatchOutcome {
        if self.is_full_path_match(path_length) {
            self.outcome
        } else {
            MatchOutcome::failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_failure() {
        let result = MatchOutcome::failure();
        assert!(result.is_failure());
        assert!(!result.is_method_failure());
        assert!(!result.is_success());
        assert!(result.params().is_empty());
        assert!(result.allowed_methods().is_empty());
    }

    #[test]
    fn test_method_failure() {
        let result = MatchOutcome::method_failure(["GET", "POST"]).unwrap();
        assert!(result.is_failure());
        assert!(result.is_method_failure());
        assert!(!result.is_success());
        assert_eq!(result.allowed_methods(), ["GET", "POST"]);
    }

    #[test]
    fn test_method_failure_normalizes_methods() {
        let result = MatchOutcome::method_failure(["GeT", "get", "POST", "POST"]).unwrap();
        assert_eq!(result.allowed_methods(), ["GET", "POST"]);
    }

    #[test]
    fn test_method_failure_rejects_empty_list() {
        let err = MatchOutcome::method_failure(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, RouterError::InvalidArgument(_)));
        assert!(err.to_string().contains("requires list of allowed methods"));
    }

    #[test]
    fn test_matched() {
        let result = MatchOutcome::matched(params(&[("foo", "bar")]), Some("name".into()));
        assert!(result.is_success());
        assert!(!result.is_failure());
        assert_eq!(result.params(), &params(&[("foo", "bar")]));
        assert_eq!(result.route_name(), Some("name"));
    }

    #[test]
    fn test_route_name_modes() {
        let result = MatchOutcome::matched(Params::new(), Some("foo".into()));
        let replaced = result
            .clone()
            .with_matched_route_name("bar", NameMode::Replace)
            .unwrap();
        let prepended = result
            .clone()
            .with_matched_route_name("bar", NameMode::Prepend)
            .unwrap();
        let appended = result
            .clone()
            .with_matched_route_name("bar", NameMode::Append)
            .unwrap();

        assert_eq!(result.route_name(), Some("foo"));
        assert_eq!(replaced.route_name(), Some("bar"));
        assert_eq!(prepended.route_name(), Some("bar/foo"));
        assert_eq!(appended.route_name(), Some("foo/bar"));
    }

    #[test]
    fn test_route_name_set_when_missing() {
        for mode in [NameMode::Replace, NameMode::Prepend, NameMode::Append] {
            let result = MatchOutcome::matched(Params::new(), None)
                .with_matched_route_name("bar", mode)
                .unwrap();
            assert_eq!(result.route_name(), Some("bar"));
        }
    }

    #[test]
    fn test_route_name_rejects_empty_name() {
        let err = MatchOutcome::matched(Params::new(), Some("foo".into()))
            .with_matched_route_name("", NameMode::Replace)
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidArgument(_)));
    }

    #[test]
    fn test_with_methods_require_success() {
        let err = MatchOutcome::failure()
            .with_matched_route_name("foo", NameMode::Replace)
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidState(_)));

        let err = MatchOutcome::method_failure(["GET"])
            .unwrap()
            .with_matched_params(params(&[("foo", "bar")]))
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidState(_)));
    }

    #[test]
    fn test_with_matched_params_keeps_name() {
        let result = MatchOutcome::matched(params(&[("foo", "bar")]), Some("n".into()))
            .with_matched_params(params(&[("baz", "qux")]))
            .unwrap();
        assert_eq!(result.params(), &params(&[("baz", "qux")]));
        assert_eq!(result.route_name(), Some("n"));
    }

    #[test]
    fn test_partial_offsets() {
        let result = PartialMatchOutcome::matched(Params::new(), 10, 5, Some("foo".into()));
        assert_eq!(result.path_offset(), 10);
        assert_eq!(result.matched_length(), 5);

        let renamed = result
            .with_matched_route_name("bar", NameMode::Replace)
            .unwrap();
        assert_eq!(renamed.path_offset(), 10);
        assert_eq!(renamed.matched_length(), 5);
        assert_eq!(renamed.route_name(), Some("bar"));
    }

    #[test]
    fn test_partial_method_failure() {
        let result = PartialMatchOutcome::method_failure(["get", "POST"], 10, 20).unwrap();
        assert!(result.is_method_failure());
        assert_eq!(result.allowed_methods(), ["GET", "POST"]);
        assert_eq!(result.path_offset(), 10);
        assert_eq!(result.matched_length(), 20);
        assert!(PartialMatchOutcome::method_failure(Vec::<&str>::new(), 0, 0).is_err());
    }

    #[test]
    fn test_full_path_match() {
        let cases = [
            ("/foo", 0, 4, true),
            ("/foo", 0, 3, false),
            ("/foo", 1, 3, true),
            ("/foo/bar", 1, 3, false),
            ("", 0, 0, true),
        ];
        for (path, offset, length, expected) in cases {
            let result = PartialMatchOutcome::matched(Params::new(), offset, length, None);
            assert_eq!(
                result.is_full_path_match(path.len()),
                expected,
                "path {path:?} offset {offset} length {length}"
            );
        }
    }

    #[test]
    fn test_failure_is_never_full_path_match() {
        assert!(!PartialMatchOutcome::failure().is_full_path_match(0));
    }

    #[test]
    fn test_method_failure_can_be_full_path_match() {
        let result = PartialMatchOutcome::method_failure(["GET"], 0, 4).unwrap();
        assert!(result.is_full_path_match(4));
        let full = result.into_full_match(4);
        assert!(full.is_method_failure());
        assert_eq!(full.allowed_methods(), ["GET"]);
    }

    #[test]
    fn test_into_full_match() {
        let result = PartialMatchOutcome::matched(params(&[("foo", "bar")]), 0, 4, None);
        assert!(result.clone().into_full_match(4).is_success());
        assert!(!result.into_full_match(5).is_success());
    }

    #[test]
    fn test_matched_allowed_methods() {
        let result = PartialMatchOutcome::matched(Params::new(), 0, 0, None)
            .with_matched_allowed_methods(["get", "post", "GET"]);
        assert_eq!(result.matched_allowed_methods(), ["GET", "POST"]);
    }

    #[test]
    fn test_intersect_methods() {
        let left = normalize_methods(["GET", "POST", "PUT"]);
        let right = normalize_methods(["PUT", "GET"]);
        assert_eq!(intersect_methods(&left, &right), ["GET", "PUT"]);
    }
}
