//! Regular expression route.

use regex::Regex as CompiledRegex;

use crate::error::Result;
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri, raw_url_decode, raw_url_encode};
use crate::result::PartialMatchOutcome;
use crate::route::{AssembledUri, PartialRoute, partial_route};

/// Matches the path against a user supplied regular expression.
///
/// Named capture groups become parameters. Assembly fills a spec string in
/// which `%name%` stands for the value of parameter `name`:
///
/// ```
/// use oxide_router::{Params, Regex, Route, RouteOptions, Uri};
///
/// let route = Regex::new(r"/blog/(?P<id>\d+)\.(?P<format>\w+)", "/blog/%id%.%format%", Params::new())?;
/// let params = Params::from([("id".to_string(), "42".to_string()), ("format".to_string(), "html".to_string())]);
/// let assembled = route.assemble(&Uri::new(), &params, &RouteOptions::new())?;
/// assert_eq!(assembled.uri.path(), "/blog/42.html");
/// # Ok::<(), oxide_router::RouterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Regex {
    regex: CompiledRegex,
    spec: String,
    defaults: Params,
}

impl Regex {
    /// Creates a regex route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidRegex`](crate::RouterError::InvalidRegex)
    /// when `regex` does not compile.
    pub fn new(regex: &str, spec: impl Into<String>, defaults: Params) -> Result<Self> {
        Ok(Self {
            regex: CompiledRegex::new(&format!("^(?:{regex})"))?,
            spec: spec.into(),
            defaults,
        })
    }

    fn assemble_uri(&self, uri: &Uri, params: &Params, _options: &RouteOptions) -> Result<AssembledUri> {
        let mut merged = self.defaults.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut url = self.spec.clone();
        let mut consumed = Vec::new();
        for (key, value) in &merged {
            let token = format!("%{key}%");
            if url.contains(&token) {
                url = url.replace(&token, &raw_url_encode(value));
                consumed.push(key.clone());
            }
        }

        let path = format!("{}{url}", uri.path());
        Ok(AssembledUri::new(uri.clone().with_path(path)).with_consumed_params(consumed))
    }
}

impl PartialRoute for Regex {
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        _options: &RouteOptions,
    ) -> Result<PartialMatchOutcome> {
        let Some(captures) = request
            .path()
            .get(path_offset..)
            .and_then(|rest| self.regex.captures(rest))
        else {
            return Ok(PartialMatchOutcome::failure());
        };

        let mut params = self.defaults.clone();
        for name in self.regex.capture_names().flatten() {
            if let Some(value) = captures.name(name).filter(|m| !m.is_empty()) {
                params.insert(name.to_string(), raw_url_decode(value.as_str()));
            }
        }

        let matched_length = captures.get(0).map_or(0, |m| m.len());
        Ok(PartialMatchOutcome::matched(params, path_offset, matched_length, None))
    }
}

partial_route!(Regex);
