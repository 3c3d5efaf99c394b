//! Literal path route.

use crate::error::{Result, RouterError};
use crate::options::RouteOptions;
use crate::request::{Params, Request, Uri};
use crate::result::PartialMatchOutcome;
use crate::route::{AssembledUri, PartialRoute, partial_route};

/// Matches a fixed piece of path.
#[derive(Debug, Clone)]
pub struct Literal {
    path: String,
    defaults: Params,
}

impl Literal {
    /// Creates a literal route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidArgument`] for an empty path.
    pub fn new(path: impl Into<String>, defaults: Params) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(RouterError::InvalidArgument(
                "Literal uri path part cannot be empty".into(),
            ));
        }
        Ok(Self { path, defaults })
    }

    /// Returns the literal path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn assemble_uri(&self, uri: &Uri, _params: &Params, _options: &RouteOptions) -> Result<AssembledUri> {
        let path = format!("{}{}", uri.path(), self.path);
        Ok(AssembledUri::new(uri.clone().with_path(path)))
    }
}

impl PartialRoute for Literal {
    fn partial_match(
        &self,
        request: &Request,
        path_offset: usize,
        _options: &RouteOptions,
    ) -> Result<PartialMatchOutcome> {
        let matches = request
            .path()
            .get(path_offset..)
            .is_some_and(|rest| rest.starts_with(&self.path));
        if !matches {
            return Ok(PartialMatchOutcome::failure());
        }
        Ok(PartialMatchOutcome::matched(
            self.defaults.clone(),
            path_offset,
            self.path.len(),
            None,
        ))
    }
}

partial_route!(Literal);
