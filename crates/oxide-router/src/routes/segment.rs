//! Segment route: path patterns with parameters.

use std::collections::HashMap;

use regex::Regex as CompiledRegex;
use tracing::trace;

use super::{translation, untranslated};
use crate::error::Result;
use crate::options::RouteOptions;
use crate::pattern::{BuildContext, CompiledPattern, Pattern, PatternSyntax};
use crate::request::{Params, Request, Uri, encode_path_segment, raw_url_decode};
use crate::result::PartialMatchOutcome;
use crate::route::{AssembledUri, PartialRoute, partial_route};

/// Matches a path pattern such as `/:controller[/:action]`.
///
/// See [`pattern`](crate::pattern) for the definition language. Captured
/// values are percent-decoded; assembled values are percent-encoded,
/// leaving characters that are legal inside a path segment alone.
#[derive(Debug, Clone)]
pub struct Segment {
    pattern: Pattern,
    constraints: HashMap<String, String>,
    defaults: Params,
    // None when the pattern has translated literals and is compiled per call.
    matcher: Option<Matcher>,
}

#[derive(Debug, Clone)]
pub(super) struct Matcher {
    regex: CompiledRegex,
    groups: Vec<(String, String)>,
}

impl Matcher {
    pub(super) fn new(compiled: CompiledPattern, anchor_end: bool) -> Result<Self> {
        let end = if anchor_end { "$" } else { "" };
        Ok(Self {
            regex: CompiledRegex::new(&format!("^(?:{}){end}", compiled.source))?,
            groups: compiled.groups,
        })
    }

    /// Matches `input` from its start, returning the captured parameters and
    /// the matched length. Empty captures are skipped.
    pub(super) fn captures(&self, input: &str, decode: fn(&str) -> String) -> Option<(Params, usize)> {
        let captures = self.regex.captures(input)?;
        let mut params = Params::new();
        for (group, name) in &self.groups {
            if let Some(value) = captures.name(group).filter(|m| !m.is_empty()) {
                params.insert(name.clone(), decode(value.as_str()));
            }
        }
        Some((params, captures.get(0).map_or(0, |m| m.len())))
    }
}

impl Segment {
    /// Creates a segment route.
    ///
    /// `constraints` replace the default capture body of the named
    /// parameters with a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`](crate::RouterError::InvalidPattern)
    /// for a malformed definition and
    /// [`RouterError::InvalidRegex`](crate::RouterError::InvalidRegex) for a
    /// constraint that does not compile.
    pub fn new(route: &str, constraints: HashMap<String, String>, defaults: Params) -> Result<Self> {
        let pattern = Pattern::parse(route, PatternSyntax::Path)?;
        let matcher = Matcher::new(pattern.compile(&constraints, &untranslated), false)?;
        let matcher = (!pattern.has_translated_literals()).then_some(matcher);
        Ok(Self {
            pattern,
            constraints,
            defaults,
            matcher,
        })
    }

    /// Returns the parsed pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn assemble_uri(&self, uri: &Uri, params: &Params, options: &RouteOptions) -> Result<AssembledUri> {
        let built = if self.pattern.has_translated_literals() {
            let translate = translation(options)?;
            self.pattern.build(params, &self.defaults, &BuildContext {
                has_child: options.has_child,
                encode: &encode_path_segment,
                translate: &translate,
            })?
        } else {
            self.pattern.build(params, &self.defaults, &BuildContext {
                has_child: options.has_child,
                encode: &encode_path_segment,
                translate: &untranslated,
            })?
        };

        let path = format!("{}{}", uri.path(), built.text);
        Ok(AssembledUri::new(uri.clone().with_path(path)).with_consumed_params(built.params))
    }
}

impl PartialRoute for Segment {
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        options: &RouteOptions,
    ) -> Result<PartialMatchOutcome> {
        let translated;
        let matcher = if let Some(matcher) = &self.matcher {
            matcher
        } else {
            let translate = translation(options)?;
            translated = Matcher::new(self.pattern.compile(&self.constraints, &translate), false)?;
            trace!(pattern = self.pattern.definition(), regex = %translated.regex, "Compiled translated pattern");
            &translated
        };

        let Some((captured, matched_length)) = request
            .path()
            .get(path_offset..)
            .and_then(|rest| matcher.captures(rest, raw_url_decode))
        else {
            return Ok(PartialMatchOutcome::failure());
        };

        let mut params = self.defaults.clone();
        params.extend(captured);
        Ok(PartialMatchOutcome::matched(params, path_offset, matched_length, None))
    }
}

partial_route!(Segment);
