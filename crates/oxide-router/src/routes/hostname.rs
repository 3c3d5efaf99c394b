//! Hostname route.

use std::collections::HashMap;

use super::segment::Matcher;
use super::untranslated;
use crate::error::Result;
use crate::options::RouteOptions;
use crate::pattern::{BuildContext, Pattern, PatternSyntax};
use crate::request::{Params, Request, Uri};
use crate::result::PartialMatchOutcome;
use crate::route::{AssembledUri, PartialRoute, partial_route};

/// Matches the whole host against a pattern such as `:subdomain.example.com`.
///
/// Hostname routes consume no path, so they are usually chained with path
/// routes or carry them as children.
#[derive(Debug, Clone)]
pub struct Hostname {
    pattern: Pattern,
    defaults: Params,
    matcher: Matcher,
}

impl Hostname {
    /// Creates a hostname route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`](crate::RouterError::InvalidPattern)
    /// for a malformed definition and
    /// [`RouterError::InvalidRegex`](crate::RouterError::InvalidRegex) for a
    /// constraint that does not compile.
    pub fn new(route: &str, constraints: HashMap<String, String>, defaults: Params) -> Result<Self> {
        let pattern = Pattern::parse(route, PatternSyntax::Hostname)?;
        let matcher = Matcher::new(pattern.compile(&constraints, &untranslated), true)?;
        Ok(Self {
            pattern,
            defaults,
            matcher,
        })
    }

    /// Returns the parsed pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn assemble_uri(&self, uri: &Uri, params: &Params, _options: &RouteOptions) -> Result<AssembledUri> {
        let raw = |value: &str| value.to_string();
        let built = self.pattern.build(params, &self.defaults, &BuildContext {
            has_child: false,
            encode: &raw,
            translate: &untranslated,
        })?;
        Ok(AssembledUri::new(uri.clone().with_host(built.text)).with_consumed_params(built.params))
    }
}

impl PartialRoute for Hostname {
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        _options: &RouteOptions,
    ) -> Result<PartialMatchOutcome> {
        let Some((captured, _)) = self
            .matcher
            .captures(request.uri().host(), str::to_string)
        else {
            return Ok(PartialMatchOutcome::failure());
        };

        let mut params = self.defaults.clone();
        params.extend(captured);
        Ok(PartialMatchOutcome::matched(params, path_offset, 0, None))
    }
}

partial_route!(Hostname);
