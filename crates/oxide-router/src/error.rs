//! Error types for routing.
//!
//! Routing outcomes ("no route matched", "method not allowed") are not
//! errors; they are carried by [`MatchOutcome`](crate::MatchOutcome). The
//! variants here describe malformed route definitions and misuse of the
//! matching and assembling calls.

use thiserror::Error;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Malformed route definition.
    #[error("invalid route definition \"{definition}\": {message} at position {position}")]
    InvalidPattern {
        definition: String,
        message: String,
        position: usize,
    },

    /// A user supplied or generated regular expression failed to compile.
    #[error("invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A value passed to a constructor was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was applied to an outcome in the wrong state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A parameter required to assemble a URI was not supplied.
    #[error("missing parameter \"{0}\"")]
    MissingParameter(String),

    /// Assembling through a stack requires a route name.
    #[error("missing \"name\" option")]
    MissingRouteName,

    /// Route name not found.
    #[error("route with name \"{0}\" not found")]
    RouteNotFound(String),

    /// A nested route name addressed a route without children.
    #[error("route with name \"{0}\" does not have child routes")]
    NoChildRoutes(String),

    /// A part route cannot be assembled on its own.
    #[error("part route may not terminate")]
    MayNotTerminate,

    /// The route uses translated literals but no translator was provided.
    #[error("no translator provided")]
    MissingTranslator,

    /// Route configuration could not be turned into routes.
    #[error("invalid route configuration: {0}")]
    InvalidConfig(String),

    /// Route configuration could not be deserialized.
    #[error("malformed route configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl RouterError {
    /// Returns true for errors raised while building routes, as opposed to
    /// errors raised by matching or assembling calls.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern { .. }
                | Self::InvalidRegex(_)
                | Self::InvalidArgument(_)
                | Self::InvalidConfig(_)
                | Self::Json(_)
        )
    }

    pub(crate) fn pattern(definition: &str, message: impl Into<String>, position: usize) -> Self {
        Self::InvalidPattern {
            definition: definition.to_string(),
            message: message.into(),
            position,
        }
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
